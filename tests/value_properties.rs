use proptest::prelude::*;

use pipeconf::params::{Origin, ParamValue, ParameterSet};

proptest! {
    #[test]
    fn integer_text_becomes_int(i in any::<i64>()) {
        prop_assert_eq!(ParamValue::from_raw(&i.to_string()), ParamValue::Int(i));
    }

    #[test]
    fn identifiers_stay_text(s in "[a-z][a-z_]{0,12}") {
        prop_assume!(s != "true" && s != "false");
        prop_assert_eq!(ParamValue::from_raw(&s), ParamValue::Str(s.clone()));
    }

    #[test]
    fn digest_ignores_insertion_order(
        entries in prop::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{0,8}", 1..12)
    ) {
        let mut forward = ParameterSet::new();
        for (key, raw) in &entries {
            forward.insert("bwa", key, ParamValue::from_raw(raw), Origin::Default);
        }

        let mut backward = ParameterSet::new();
        for (key, raw) in entries.iter().rev() {
            backward.insert("bwa", key, ParamValue::from_raw(raw), Origin::Override);
        }

        prop_assert_eq!(forward.digest(), backward.digest());
    }

    #[test]
    fn later_layer_wins(first in 1i64..64, second in 1i64..64) {
        let mut base = ParameterSet::new();
        base.insert("bwa", "threads", first, Origin::Default);

        let mut top = ParameterSet::new();
        top.insert("bwa", "threads", second, Origin::Override);

        base.merge_layer(top);
        prop_assert_eq!(&base.get("bwa_threads").unwrap().value, &ParamValue::Int(second));
        prop_assert_eq!(base.len(), 1);
    }
}
