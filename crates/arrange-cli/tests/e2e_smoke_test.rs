use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tempfile::tempdir;

use arrange::LayoutMode;
use arrange_cli::{Args, ModeStore, run};

/// Collects all .json files from a directory
fn collect_json_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demos live at the workspace root, not in the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args(input: &Path, output: Option<&Path>, mode: Option<LayoutMode>, state: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.map(|path| path.to_string_lossy().to_string()),
        mode,
        config: None,
        state: Some(state.to_string_lossy().to_string()),
        log_level: "off".to_string(),
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let state = temp_dir.path().join("state.toml");
    let valid_demos = collect_json_files(demos_path());

    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for mode in [LayoutMode::Align, LayoutMode::Compact] {
        for demo_path in &valid_demos {
            let output_path = temp_dir.path().join(format!(
                "{}_{mode}.json",
                demo_path.file_stem().unwrap().to_string_lossy()
            ));

            match run(&args(demo_path, Some(&output_path), Some(mode), &state)) {
                Ok(()) => {
                    let before = read_json(demo_path);
                    let after = read_json(&output_path);
                    if before["nodes"].as_array().map(Vec::len)
                        != after["nodes"].as_array().map(Vec::len)
                    {
                        failed_demos.push((demo_path.clone(), "node count changed".to_string()));
                    }
                }
                Err(e) => failed_demos.push((demo_path.clone(), e.to_string())),
            }
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo run(s) failed unexpectedly", failed_demos.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let state = temp_dir.path().join("state.toml");
    let error_demos = collect_json_files(demos_path().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_path = temp_dir.path().join(format!(
            "error_{}.json",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args(demo_path, Some(&output_path), None, &state)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
        if output_path.exists() {
            unexpectedly_succeeded.push(output_path);
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_overwrites_input_and_keeps_extra_fields() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("workflow.json");
    fs::copy(demos_path().join("text_to_image.json"), &input).unwrap();

    run(&args(&input, None, None, &temp_dir.path().join("state.toml"))).unwrap();

    let document = read_json(&input);
    assert_eq!(document["extra"]["ds"]["scale"], 1.0);
    assert_eq!(document["nodes"][0]["type"], "KSampler");

    // Checkpoint loader (id 4) feeds everything, so it lands at the origin.
    let loader = document["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|node| node["id"] == 4)
        .unwrap();
    assert_eq!(loader["pos"], serde_json::json!([100.0, 100.0]));
}

#[test]
fn e2e_mode_flag_is_remembered() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let state = temp_dir.path().join("state.toml");
    let demo = demos_path().join("text_to_image.json");
    let flagged = temp_dir.path().join("flagged.json");
    let remembered = temp_dir.path().join("remembered.json");
    let aligned = temp_dir.path().join("aligned.json");

    run(&args(&demo, Some(&flagged), Some(LayoutMode::Compact), &state)).unwrap();
    assert_eq!(
        ModeStore::new(Some(&state)).load().unwrap(),
        Some(LayoutMode::Compact)
    );

    run(&args(&demo, Some(&remembered), None, &state)).unwrap();
    assert_eq!(read_json(&flagged), read_json(&remembered));

    run(&args(&demo, Some(&aligned), Some(LayoutMode::Align), &state)).unwrap();
    assert_ne!(read_json(&flagged), read_json(&aligned));
}
