use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const INPUT: &str = r#"<svg xmlns="http://www.w3.org/2000/svg">
  <path d="M0,0 L10,0"/>
  <path d="M10.2,0 L20,0"/>
</svg>
"#;

fn svgalign(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_svgalign"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to spawn svgalign")
}

#[test]
fn aligns_into_requested_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.svg"), INPUT).unwrap();

    let out = svgalign(&["in.svg", "-o", "aligned.svg", "-t", "0.5"], dir.path());
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let written = fs::read_to_string(dir.path().join("aligned.svg")).unwrap();
    assert!(written.contains(r#"d="M0,0 L10.1,0""#));
    assert!(written.contains(r#"d="M10.1,0 L20,0""#));
}

#[test]
fn default_output_is_output_svg() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.svg"), INPUT).unwrap();

    let out = svgalign(&["in.svg"], dir.path());
    assert!(out.status.success());
    // Default threshold 0.3 still covers the 0.2 gap.
    let written = fs::read_to_string(dir.path().join("output.svg")).unwrap();
    assert!(written.contains("L10.1,0"));
}

#[test]
fn missing_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = svgalign(&["nope.svg"], dir.path());
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("nope.svg"));
    assert!(!dir.path().join("output.svg").exists());
}

#[test]
fn missing_argument_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = svgalign(&[], dir.path());
    assert!(!out.status.success());
}

#[test]
fn broken_document_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.svg"), "<svg><path d='M0 0'></svg>").unwrap();
    let out = svgalign(&["in.svg"], dir.path());
    assert!(!out.status.success());
    assert!(!dir.path().join("output.svg").exists());
}

#[test]
fn strict_mode_rejects_malformed_paths() {
    let dir = tempfile::tempdir().unwrap();
    let input = INPUT.replace("M10.2,0 L20,0", "M10.2,0 L20");
    fs::write(dir.path().join("in.svg"), &input).unwrap();

    let out = svgalign(&["in.svg", "--strict"], dir.path());
    assert!(!out.status.success());
    assert!(!dir.path().join("output.svg").exists());

    // Without --strict the bad path is skipped and left as is.
    let out = svgalign(&["in.svg"], dir.path());
    assert!(out.status.success());
    let written = fs::read_to_string(dir.path().join("output.svg")).unwrap();
    assert_eq!(written, input);
}

#[test]
fn rejects_non_positive_threshold() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.svg"), INPUT).unwrap();
    let out = svgalign(&["in.svg", "--threshold=0"], dir.path());
    assert!(!out.status.success());
    assert!(!dir.path().join("output.svg").exists());
}

#[test]
fn cluster_strategy_is_selectable() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.svg"), INPUT).unwrap();
    let out = svgalign(&["in.svg", "--strategy", "cluster", "-t", "0.5"], dir.path());
    assert!(out.status.success());
    let written = fs::read_to_string(dir.path().join("output.svg")).unwrap();
    assert!(written.contains("L10.1,0"));
}
