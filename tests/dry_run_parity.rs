use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;
use std::fs;
use std::path::PathBuf;

use longpath_move::{path_length, relocate_long_paths, RunMode, RunOptions};

/// Tree with colliding base names across subdirectories plus one unique file.
fn build_tree(source: &ChildPath) {
    source.create_dir_all().unwrap();
    source
        .child("sub_a_with_a_long_name/data.csv")
        .write_str("alpha")
        .unwrap();
    source
        .child("sub_b_with_a_long_name/data.csv")
        .write_str("beta!")
        .unwrap();
    source
        .child("sub_c_with_a_long_name/unique.log")
        .write_str("gamma")
        .unwrap();
}

fn pairs(report: &longpath_move::RunReport) -> Vec<(PathBuf, PathBuf)> {
    report
        .moves
        .iter()
        .map(|m| (m.original_path.clone(), m.new_path.clone()))
        .collect()
}

/// Given the same tree, threshold and (initially empty) target, the dry-run
/// plan and the real run must produce identical (original, new) pairs in the
/// same order, with identical collision-naming decisions.
#[test]
fn plan_matches_execution() -> Result<(), Box<dyn std::error::Error>> {
    let temp = assert_fs::TempDir::new()?;
    let source = temp.child("src");
    let target = temp.child("flat");
    build_tree(&source);

    let max_len = path_length(source.path()) + 10;

    let dry_opts = RunOptions {
        source: source.path().to_path_buf(),
        target: target.path().to_path_buf(),
        max_path_len: max_len,
        mode: RunMode::DryRun,
    };
    let plan = relocate_long_paths(&dry_opts)?;

    // The simulation must not have touched anything.
    assert!(!target.path().exists(), "dry run must not create the target");
    source.child("sub_a_with_a_long_name/data.csv").assert("alpha");
    source.child("sub_b_with_a_long_name/data.csv").assert("beta!");
    source.child("sub_c_with_a_long_name/unique.log").assert("gamma");

    let real_opts = RunOptions {
        mode: RunMode::Real,
        ..dry_opts
    };
    let executed = relocate_long_paths(&real_opts)?;

    assert_eq!(plan.moves.len(), 3);
    assert_eq!(pairs(&plan), pairs(&executed));
    assert_eq!(plan.total_bytes(), executed.total_bytes());

    // And the real run actually carried the plan out.
    for rec in &executed.moves {
        assert!(!rec.original_path.exists());
        assert!(rec.new_path.exists());
    }
    Ok(())
}

/// Dry-run sizes come from the walk metadata, so totals match the real run.
#[test]
fn planned_sizes_match_file_sizes() -> Result<(), Box<dyn std::error::Error>> {
    let temp = assert_fs::TempDir::new()?;
    let source = temp.child("src");
    let target = temp.child("flat");
    build_tree(&source);

    let opts = RunOptions {
        source: source.path().to_path_buf(),
        target: target.path().to_path_buf(),
        max_path_len: path_length(source.path()) + 10,
        mode: RunMode::DryRun,
    };
    let plan = relocate_long_paths(&opts)?;

    for rec in &plan.moves {
        assert_eq!(rec.file_size, fs::metadata(&rec.original_path)?.len());
    }
    assert_eq!(plan.total_bytes(), 15);
    Ok(())
}
