use std::collections::BTreeMap;
use std::error::Error;

use pipeconf::errors::PipeconfError;
use pipeconf::params::{ParamValue, placeholders, render_statement, substitute};
use pipeconf_test_utils::builders::ParameterSetBuilder;

type TestResult = Result<(), Box<dyn Error>>;

fn pipeline_params() -> pipeconf::params::ParameterSet {
    ParameterSetBuilder::new()
        .with_general("genome", "hg19")
        .with("bwa", "threads", "4")
        .with("bwa", "index_dir", "/ifs/mirror/genomes/bwa")
        .with("deseq", "fdr", "0.01")
        .with("filtering", "dedup", "true")
        .build()
}

#[test]
fn statement_uses_flattened_names() -> TestResult {
    let mut locals = BTreeMap::new();
    locals.insert("infile".to_string(), ParamValue::from("sample.fastq.gz"));

    let rendered = render_statement(
        "bwa aln -t %(bwa_threads)i %(bwa_index_dir)s/%(genome)s %(infile)s",
        &pipeline_params(),
        &locals,
    )?;

    assert_eq!(
        rendered,
        "bwa aln -t 4 /ifs/mirror/genomes/bwa/hg19 sample.fastq.gz"
    );
    Ok(())
}

#[test]
fn general_keys_have_both_names() -> TestResult {
    let rendered = render_statement(
        "%(genome)s %(general_genome)s",
        &pipeline_params(),
        &BTreeMap::new(),
    )?;
    assert_eq!(rendered, "hg19 hg19");
    Ok(())
}

#[test]
fn locals_take_precedence() -> TestResult {
    let mut locals = BTreeMap::new();
    locals.insert("genome".to_string(), ParamValue::from("mm10"));

    let rendered = render_statement("%(genome)s", &pipeline_params(), &locals)?;
    assert_eq!(rendered, "mm10");
    Ok(())
}

#[test]
fn numeric_conversions() -> TestResult {
    let params = pipeline_params();
    let none = BTreeMap::new();

    assert_eq!(render_statement("%(deseq_fdr)f", &params, &none)?, "0.010000");
    assert_eq!(render_statement("%(bwa_threads)f", &params, &none)?, "4.000000");
    assert_eq!(render_statement("%(deseq_fdr)i", &params, &none)?, "0");
    assert_eq!(render_statement("%(bwa_threads)d", &params, &none)?, "4");
    assert_eq!(render_statement("%(filtering_dedup)i", &params, &none)?, "1");
    Ok(())
}

#[test]
fn integer_conversion_of_text_fails() {
    let result = render_statement("%(genome)i", &pipeline_params(), &BTreeMap::new());
    match result {
        Err(PipeconfError::BadPlaceholder { message, .. }) => {
            assert!(message.contains("needs a number"));
        }
        other => panic!("Expected BadPlaceholder, got: {:?}", other),
    }
}

#[test]
fn missing_conversion_character_fails() {
    let result = render_statement("%(genome) done", &pipeline_params(), &BTreeMap::new());
    assert!(matches!(result, Err(PipeconfError::BadPlaceholder { .. })));
}

#[test]
fn unsupported_conversion_fails() {
    let result = render_statement("%(genome)x", &pipeline_params(), &BTreeMap::new());
    match result {
        Err(PipeconfError::BadPlaceholder { message, .. }) => {
            assert!(message.contains("unsupported conversion 'x'"));
        }
        other => panic!("Expected BadPlaceholder, got: {:?}", other),
    }
}

#[test]
fn unknown_name_is_a_missing_reference() {
    let result = render_statement("%(outfile)s", &pipeline_params(), &BTreeMap::new());
    match result {
        Err(PipeconfError::MissingReference { name, context }) => {
            assert_eq!(name, "outfile");
            assert_eq!(context, "statement");
        }
        other => panic!("Expected MissingReference, got: {:?}", other),
    }
}

#[test]
fn percent_signs_outside_placeholders() -> TestResult {
    let rendered = render_statement(
        "awk '{printf \"%%s\\n\", $1}' | sort -k1,1 | head -n 50%",
        &pipeline_params(),
        &BTreeMap::new(),
    )?;
    assert_eq!(rendered, "awk '{printf \"%s\\n\", $1}' | sort -k1,1 | head -n 50%");
    Ok(())
}

#[test]
fn names_are_case_insensitive() -> TestResult {
    let rendered = render_statement("%(BWA_Threads)s", &pipeline_params(), &BTreeMap::new())?;
    assert_eq!(rendered, "4");
    Ok(())
}

#[test]
fn placeholders_are_listed_in_order() {
    let names = placeholders("%(b)s %%  %(a)i %( c )s");
    assert_eq!(names, vec!["b", "a", "c"]);
}

#[test]
fn substitute_reports_its_context() {
    let result = substitute("%()s", "[bwa] index_dir", |_| None);
    match result {
        Err(PipeconfError::BadPlaceholder { context, message }) => {
            assert_eq!(context, "[bwa] index_dir");
            assert!(message.contains("empty"));
        }
        other => panic!("Expected BadPlaceholder, got: {:?}", other),
    }
}
