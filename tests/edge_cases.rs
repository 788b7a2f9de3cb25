//! Edge case tests: degenerate inputs must not panic.

use codegrade::analyzer::AnalysisEngine;
use codegrade::{AnalysisError, AnalysisReport, Category};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn analyze_path(path: &Path) -> Result<AnalysisReport, anyhow::Error> {
    AnalysisEngine::new().analyze_file(path)
}

fn temp_source(suffix: &str, content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(suffix).unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn empty_python_file() {
    let file = temp_source(".py", b"");
    let report = analyze_path(file.path()).unwrap();
    assert_eq!(report.overall_score, 93);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn empty_javascript_file() {
    let file = temp_source(".js", b"");
    let report = analyze_path(file.path()).unwrap();
    assert_eq!(report.metric(Category::Modularity).unwrap().score, 0);
    assert_eq!(report.overall_score, 70);
}

#[test]
fn only_comments_no_crash() {
    let file = temp_source(".js", b"// nothing here\n/* or here */");
    let report = analyze_path(file.path()).unwrap();
    assert_eq!(report.metrics.len(), 6);

    let file = temp_source(".py", b"# nothing here\n");
    let report = analyze_path(file.path()).unwrap();
    assert_eq!(report.metrics.len(), 6);
}

#[test]
fn prose_as_python_degrades_instead_of_failing() {
    let file = temp_source(".py", b"hello world, this is not code");
    let report = analyze_path(file.path()).unwrap();
    assert!(!report.diagnostics.is_empty());
    assert_eq!(report.metric(Category::Naming).unwrap().score, 0);
}

#[test]
fn unbalanced_javascript_braces() {
    let file = temp_source(".js", b"function {{{ broken\nfunction open() {\n  if (x) {\n");
    let report = analyze_path(file.path()).unwrap();
    assert_eq!(report.metrics.len(), 6);
}

#[test]
fn unterminated_strings_and_comments() {
    for source in [&b"const s = 'open\nlet t = `tmpl"[..], b"/* never closed", b"x = \"\"\"open"] {
        for suffix in [".js", ".py"] {
            let file = temp_source(suffix, source);
            assert!(analyze_path(file.path()).is_ok());
        }
    }
}

#[test]
fn invalid_utf8_is_an_encoding_error() {
    let file = temp_source(".py", &[0xff, 0xfe, 0x00, 0x41]);
    let err = analyze_path(file.path()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AnalysisError>(),
        Some(AnalysisError::Encoding { .. })
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = analyze_path(Path::new("tests/fixtures/does_not_exist.py")).unwrap_err();
    assert!(err.to_string().contains("Failed to read file"));
}

#[test]
fn oversized_source_is_rejected() {
    let engine = AnalysisEngine::new().with_max_source_bytes(1024);
    let source = "x = 1\n".repeat(500);
    assert!(matches!(
        engine.analyze("big.py", &source),
        Err(AnalysisError::SourceTooLarge {
            size: 3000,
            limit: 1024
        })
    ));
}

#[test]
fn crlf_line_endings() {
    let file = temp_source(
        ".py",
        b"\"\"\"Module docstring here.\"\"\"\r\nimport os\r\nKEY = os.getenv('KEY')\r\n",
    );
    let report = analyze_path(file.path()).unwrap();
    // every line ends in '\r', which counts as trailing whitespace
    assert_eq!(report.metric(Category::Formatting).unwrap().score, 13);
}

#[test]
fn unicode_identifiers_and_strings() {
    let file = temp_source(".py", "café = 'naïve'\ndef grüßen():\n    return '👋'\n".as_bytes());
    let report = analyze_path(file.path()).unwrap();
    assert_eq!(report.metrics.len(), 6);

    let file = temp_source(".js", "const ñame = '🎉';\nfunction hola() {\n    return ñame;\n}\n".as_bytes());
    let report = analyze_path(file.path()).unwrap();
    assert_eq!(report.metrics.len(), 6);
}
