use std::error::Error;
use std::path::Path;

use pipeconf::config::parse_ini;
use pipeconf::errors::PipeconfError;
use pipeconf::params::{Origin, ParamValue};
use pipeconf_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn parse(text: &str) -> pipeconf::errors::Result<pipeconf::params::ParameterSet> {
    parse_ini(text, Path::new("pipeline.ini"))
}

#[test]
fn values_are_converted_and_keys_lowercased() -> TestResult {
    init_tracing();

    let params = parse(
        r#"
[General]
Genome = hg19
paired_end=1

[deseq]
fdr: 0.01
use_fit=true
"#,
    )?;

    assert_eq!(
        params.get_in("general", "genome").unwrap().value,
        ParamValue::Str("hg19".into())
    );
    assert_eq!(params.get_in("general", "paired_end").unwrap().value, ParamValue::Int(1));
    assert_eq!(params.get_in("deseq", "fdr").unwrap().value, ParamValue::Float(0.01));
    assert_eq!(params.get_in("deseq", "use_fit").unwrap().value, ParamValue::Bool(true));
    Ok(())
}

#[test]
fn comments_and_blank_lines_are_ignored() -> TestResult {
    let params = parse(
        r#"
# leading comment
[bwa]
; semicolon comment

threads=4
    # indented comment
"#,
    )?;

    let bwa = params.section("bwa").unwrap();
    assert_eq!(bwa.len(), 1);
    assert_eq!(bwa["threads"].value, ParamValue::Int(4));
    Ok(())
}

#[test]
fn indented_lines_continue_the_previous_value() -> TestResult {
    let params = parse("[bwa]\naln_options=-l 25\n    -k 2\nthreads=4\n")?;

    assert_eq!(
        params.get_in("bwa", "aln_options").unwrap().value,
        ParamValue::Str("-l 25\n-k 2".into())
    );
    assert_eq!(params.get_in("bwa", "threads").unwrap().value, ParamValue::Int(4));
    Ok(())
}

#[test]
fn origins_carry_line_numbers() -> TestResult {
    let params = parse("[general]\ngenome=hg19\n\n[bwa]\nthreads=4\n")?;

    assert_eq!(
        params.get_in("bwa", "threads").unwrap().origin,
        Origin::File {
            path: "pipeline.ini".into(),
            line: Some(5)
        }
    );
    Ok(())
}

#[test]
fn references_resolve_against_section_then_default() -> TestResult {
    let params = parse(
        r#"
[DEFAULT]
mirror=/ifs/mirror
genome=mm10

[general]
genome=hg19
genome_dir=%(mirror)s/%(genome)s

[bwa]
index_dir=%(mirror)s/bwa/%(genome)s
"#,
    )?;

    assert_eq!(
        params.get_in("general", "genome_dir").unwrap().value,
        ParamValue::Str("/ifs/mirror/hg19".into())
    );
    assert_eq!(
        params.get_in("bwa", "index_dir").unwrap().value,
        ParamValue::Str("/ifs/mirror/bwa/mm10".into())
    );
    // DEFAULT keys are only visible to interpolation.
    assert!(params.section("DEFAULT").is_none());
    assert!(params.get_in("bwa", "mirror").is_none());
    Ok(())
}

#[test]
fn chained_references_resolve_in_dependency_order() -> TestResult {
    let params = parse("[report]\nhtml=%(base)s/html\nbase=%(root)s/report\nroot=/tmp\n")?;

    assert_eq!(
        params.get_in("report", "html").unwrap().value,
        ParamValue::Str("/tmp/report/html".into())
    );
    Ok(())
}

#[test]
fn resolved_numbers_are_typed() -> TestResult {
    let params = parse("[DEFAULT]\nn=8\n\n[bwa]\nthreads=%(n)s\n")?;
    assert_eq!(params.get_in("bwa", "threads").unwrap().value, ParamValue::Int(8));
    Ok(())
}

#[test]
fn duplicate_key_reports_both_lines() {
    let result = parse("[bwa]\nthreads=4\nindex_dir=/x\nthreads=8\n");

    match result {
        Err(PipeconfError::DuplicateKey {
            section,
            key,
            first_line,
            line,
            ..
        }) => {
            assert_eq!(section, "bwa");
            assert_eq!(key, "threads");
            assert_eq!(first_line, 2);
            assert_eq!(line, 4);
        }
        Err(e) => panic!("Expected DuplicateKey error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn same_key_in_different_sections_is_fine() -> TestResult {
    let params = parse("[bwa]\nthreads=4\n\n[bowtie]\nthreads=2\n")?;
    assert_eq!(params.get_in("bowtie", "threads").unwrap().value, ParamValue::Int(2));
    Ok(())
}

#[test]
fn duplicate_section_is_an_error() {
    let result = parse("[bwa]\nthreads=4\n\n[BWA]\nindex_dir=/x\n");
    assert!(matches!(
        result,
        Err(PipeconfError::DuplicateSection { line: 4, .. })
    ));
}

#[test]
fn key_before_any_section_is_a_syntax_error() {
    let result = parse("genome=hg19\n[general]\n");
    match result {
        Err(PipeconfError::Syntax { line, message, .. }) => {
            assert_eq!(line, 1);
            assert!(message.contains("before any [section]"));
        }
        other => panic!("Expected Syntax error, got: {:?}", other),
    }
}

#[test]
fn line_without_separator_is_a_syntax_error() {
    let result = parse("[general]\njust some words\n");
    assert!(matches!(result, Err(PipeconfError::Syntax { line: 2, .. })));
}

#[test]
fn unterminated_header_is_a_syntax_error() {
    let result = parse("[general\ngenome=hg19\n");
    assert!(matches!(result, Err(PipeconfError::Syntax { line: 1, .. })));
}

#[test]
fn reference_cycle_is_detected() {
    let result = parse("[general]\na=%(b)s\nb=%(a)s\n");
    match result {
        Err(PipeconfError::InterpolationCycle { section, key }) => {
            assert_eq!(section, "general");
            assert!(key == "a" || key == "b");
        }
        other => panic!("Expected InterpolationCycle, got: {:?}", other),
    }
}

#[test]
fn self_reference_is_a_cycle() {
    let result = parse("[general]\na=x%(a)s\n");
    assert!(matches!(result, Err(PipeconfError::InterpolationCycle { .. })));
}

#[test]
fn unknown_reference_is_reported() {
    let result = parse("[general]\ngenome_dir=%(mirror)s/plain\n");
    match result {
        Err(PipeconfError::MissingReference { name, context }) => {
            assert_eq!(name, "mirror");
            assert!(context.contains("[general] genome_dir"));
        }
        other => panic!("Expected MissingReference, got: {:?}", other),
    }
}

#[test]
fn double_percent_is_a_literal() -> TestResult {
    let params = parse("[general]\nformat=%%d reads\n")?;
    assert_eq!(
        params.get_in("general", "format").unwrap().value,
        ParamValue::Str("%d reads".into())
    );
    Ok(())
}

#[test]
fn text_after_section_header_is_ignored() -> TestResult {
    let params = parse("[bwa]  # aligner settings\nthreads=4\n[deseq] ; stats\nfdr=0.05\n")?;
    assert_eq!(params.get_in("bwa", "threads").unwrap().value, ParamValue::Int(4));
    assert_eq!(params.get_in("deseq", "fdr").unwrap().value, ParamValue::Float(0.05));
    Ok(())
}
