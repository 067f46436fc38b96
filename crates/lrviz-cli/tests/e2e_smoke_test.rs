use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use lrviz::LrvizError;
use lrviz_cli::{Args, KindArg, run};

/// Samples live at the workspace root, not in this crate
fn samples_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("samples")
}

/// Collects all .lra files from a directory
fn collect_lra_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("lra")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(input: &Path, output: &Path, kind: KindArg) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        kind,
        steps: None,
        table: false,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_samples() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let samples = collect_lra_files(samples_dir());

    assert!(!samples.is_empty(), "No valid samples found in samples/");

    let mut failed = Vec::new();

    for sample in &samples {
        let output = temp_dir.path().join(format!(
            "{}.svg",
            sample.file_stem().unwrap().to_string_lossy()
        ));

        if let Err(e) = run(&args(sample, &output, KindArg::Both)) {
            failed.push((sample.clone(), e));
        }
    }

    if !failed.is_empty() {
        eprintln!("\nValid samples that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid sample(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_samples() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let samples = collect_lra_files(samples_dir().join("errors"));

    assert!(!samples.is_empty(), "No error samples found in samples/errors/");

    let mut unexpectedly_succeeded = Vec::new();

    for sample in &samples {
        let output = temp_dir.path().join(format!(
            "error_{}.svg",
            sample.file_stem().unwrap().to_string_lossy()
        ));

        match run(&args(sample, &output, KindArg::Lr0)) {
            Err(LrvizError::Parse { .. }) => {}
            Err(other) => panic!("{}: expected a parse error, got {other}", sample.display()),
            Ok(()) => unexpectedly_succeeded.push(sample.clone()),
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError samples that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error sample(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_both_kinds_write_tagged_outputs() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("expr.svg");

    run(&args(&samples_dir().join("expr.lra"), &output, KindArg::Both)).unwrap();

    assert!(temp_dir.path().join("expr.lr0.svg").is_file());
    assert!(temp_dir.path().join("expr.slr.svg").is_file());
    assert!(!output.exists());
}

#[test]
fn e2e_partial_reveal() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("partial.svg");

    let mut partial = args(&samples_dir().join("expr.lra"), &output, KindArg::Slr);
    partial.steps = Some(2);
    partial.table = true;
    run(&partial).unwrap();

    let svg = fs::read_to_string(&output).unwrap();
    assert_eq!(svg.matches("class=\"item-set\"").count(), 3);
    assert_eq!(svg.matches("class=\"transition\"").count(), 2);
}

#[test]
fn e2e_missing_kind_writes_nothing() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("slr.svg");

    run(&args(
        &samples_dir().join("right_recursion.lra"),
        &output,
        KindArg::Slr,
    ))
    .unwrap();

    assert!(!output.exists());
}

#[test]
fn e2e_missing_input() {
    let temp_dir = tempdir().unwrap();
    let result = run(&args(
        &temp_dir.path().join("absent.lra"),
        &temp_dir.path().join("out.svg"),
        KindArg::Lr0,
    ));
    assert!(matches!(result, Err(LrvizError::Io(_))));
}
