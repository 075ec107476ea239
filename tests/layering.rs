use std::error::Error;
use std::path::PathBuf;

use pipeconf::config::{LoadOptions, default_search_paths, load_layered};
use pipeconf::errors::PipeconfError;
use pipeconf::fs::mock::MockFileSystem;
use pipeconf::params::{Origin, ParamValue};
use pipeconf::schema::Schema;
use pipeconf_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

const SHARED: &str = r#"
[general]
genome=hg19
database=csvdb

[bwa]
threads=4
index_dir=/ifs/mirror/genomes/bwa
"#;

const LOCAL: &str = r#"
[bwa]
threads=12

[deseq]
fdr=0.05
"#;

fn search_list() -> Vec<PathBuf> {
    default_search_paths(&PathBuf::from("work"))
}

#[test]
fn search_list_puts_shared_config_first() {
    let paths = search_list();
    assert_eq!(
        paths,
        vec![
            PathBuf::from("work/../pipeline.yml"),
            PathBuf::from("work/../pipeline.ini"),
            PathBuf::from("work/pipeline.yml"),
            PathBuf::from("work/pipeline.ini"),
        ]
    );
}

#[test]
fn local_config_overrides_shared_config() -> TestResult {
    init_tracing();

    let fs = MockFileSystem::new();
    fs.add_file("work/../pipeline.ini", SHARED);
    fs.add_file("work/pipeline.ini", LOCAL);

    let loaded = load_layered(&fs, &search_list(), &LoadOptions::default(), &Schema::builtin())?;

    assert_eq!(
        loaded.files,
        vec![
            PathBuf::from("work/../pipeline.ini"),
            PathBuf::from("work/pipeline.ini")
        ]
    );

    let params = &loaded.params;
    assert_eq!(params.get("bwa_threads").unwrap().value, ParamValue::Int(12));
    assert_eq!(
        params.get("bwa_index_dir").unwrap().value,
        ParamValue::Str("/ifs/mirror/genomes/bwa".into())
    );
    assert_eq!(params.get("genome").unwrap().value, ParamValue::Str("hg19".into()));
    assert_eq!(params.get("deseq_fdr").unwrap().value, ParamValue::Float(0.05));

    assert_eq!(
        params.get("bwa_threads").unwrap().origin,
        Origin::File {
            path: PathBuf::from("work/pipeline.ini"),
            line: Some(3)
        }
    );
    Ok(())
}

#[test]
fn ini_and_yaml_layers_mix() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("work/../pipeline.ini", SHARED);
    fs.add_file("work/pipeline.yml", "bwa:\n  threads: 2\ngenome: mm10\n");

    let loaded = load_layered(&fs, &search_list(), &LoadOptions::default(), &Schema::builtin())?;

    assert_eq!(loaded.params.get("bwa_threads").unwrap().value, ParamValue::Int(2));
    assert_eq!(loaded.params.get("genome").unwrap().value, ParamValue::Str("mm10".into()));
    assert_eq!(loaded.params.get("database").unwrap().value, ParamValue::Str("csvdb".into()));
    Ok(())
}

#[test]
fn no_existing_file_is_an_error() {
    let fs = MockFileSystem::new();
    let result = load_layered(&fs, &search_list(), &LoadOptions::default(), &Schema::builtin());

    match result {
        Err(PipeconfError::NoConfigFiles(paths)) => assert_eq!(paths.len(), 4),
        other => panic!("Expected NoConfigFiles, got: {:?}", other),
    }
}

#[test]
fn unsupported_extension_is_an_error() {
    let fs = MockFileSystem::new();
    fs.add_file("pipeline.toml", "[bwa]\nthreads=4\n");

    let result = load_layered(
        &fs,
        &[PathBuf::from("pipeline.toml")],
        &LoadOptions::default(),
        &Schema::builtin(),
    );
    assert!(matches!(result, Err(PipeconfError::UnsupportedFormat(_))));
}

#[test]
fn overrides_apply_after_all_files() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("work/pipeline.ini", LOCAL);

    let options = LoadOptions {
        with_defaults: false,
        overrides: vec!["bwa.threads=16".to_string(), "genome=mm10".to_string()],
    };
    let loaded = load_layered(&fs, &search_list(), &options, &Schema::builtin())?;

    let threads = loaded.params.get("bwa_threads").unwrap();
    assert_eq!(threads.value, ParamValue::Int(16));
    assert_eq!(threads.origin, Origin::Override);
    assert_eq!(loaded.params.get("genome").unwrap().value, ParamValue::Str("mm10".into()));
    Ok(())
}

#[test]
fn malformed_override_is_rejected() {
    let fs = MockFileSystem::new();
    fs.add_file("work/pipeline.ini", LOCAL);

    for bad in ["bwa.threads", "=4", "bwa.=4", ".threads=4"] {
        let options = LoadOptions {
            with_defaults: false,
            overrides: vec![bad.to_string()],
        };
        let result = load_layered(&fs, &search_list(), &options, &Schema::builtin());
        assert!(
            matches!(result, Err(PipeconfError::InvalidOverride(_))),
            "override {bad:?} should be rejected"
        );
    }
}

#[test]
fn defaults_sit_below_every_file() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("work/pipeline.ini", LOCAL);

    let options = LoadOptions {
        with_defaults: true,
        overrides: Vec::new(),
    };
    let loaded = load_layered(&fs, &search_list(), &options, &Schema::builtin())?;

    let threads = loaded.params.get("bwa_threads").unwrap();
    assert_eq!(threads.value, ParamValue::Int(12));

    let samtools = loaded.params.get("samtools_threads").unwrap();
    assert_eq!(samtools.value, ParamValue::Int(1));
    assert_eq!(samtools.origin, Origin::Default);
    Ok(())
}

#[test]
fn parse_errors_stop_loading() {
    let fs = MockFileSystem::new();
    fs.add_file("work/../pipeline.ini", SHARED);
    fs.add_file("work/pipeline.ini", "[bwa]\nthreads=4\nthreads=8\n");

    let result = load_layered(&fs, &search_list(), &LoadOptions::default(), &Schema::builtin());
    assert!(matches!(result, Err(PipeconfError::DuplicateKey { .. })));
}

#[test]
fn dotted_override_targets_nested_yaml_key() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("work/pipeline.yml", "deep:\n  bamcoverage:\n    options: --normalizeUsing RPKM\n");

    let options = LoadOptions {
        with_defaults: false,
        overrides: vec!["deep.bamcoverage.options=--normalizeUsing CPM".to_string()],
    };
    let loaded = load_layered(&fs, &search_list(), &options, &Schema::builtin())?;

    let entry = loaded.params.get("deep_bamcoverage_options").unwrap();
    assert_eq!(entry.value, ParamValue::Str("--normalizeUsing CPM".into()));
    assert_eq!(entry.origin, Origin::Override);
    assert_eq!(loaded.params.section("deep").unwrap().len(), 1);

    let bad = LoadOptions {
        with_defaults: false,
        overrides: vec!["deep.bamcoverage..options=x".to_string()],
    };
    let result = load_layered(&fs, &search_list(), &bad, &Schema::builtin());
    assert!(matches!(result, Err(PipeconfError::InvalidOverride(_))));
    Ok(())
}
