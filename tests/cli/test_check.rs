// Tests for the `strata check` command end to end.

use serde_json::Value;

use crate::common::{create_project, forbidden_contract, run_strata, write_contracts, write_file};

fn project() -> (tempfile::TempDir, std::path::PathBuf) {
    let (dir, root) = create_project(&[
        ("src/app/core.py", "import os\nfrom app.web import views\n"),
        ("src/app/web/views.py", "from app.core import settings\n"),
        ("src/app/migrations/m0001.py", "import app.web\n"),
    ]);
    write_contracts(
        &root,
        vec![forbidden_contract("core/web", &["app.core", "app.migrations"], &["app.web"], &[])],
    );
    (dir, root)
}

#[test]
fn test_check_walks_working_directory() {
    let (_dir, root) = project();
    let output = run_strata(&root, &["check", "--json", "--search-path", "src"]);
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["summary"]["analyzed_files"], 3);
    let files: Vec<&str> = json["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["file"].as_str().unwrap())
        .collect();
    assert_eq!(files, vec!["src/app/core.py", "src/app/migrations/m0001.py"]);
}

#[test]
fn test_check_explicit_files() {
    let (_dir, root) = project();
    let output = run_strata(
        &root,
        &["check", "--json", "--search-path", "src", "src/app/web/views.py"],
    );
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["summary"]["analyzed_files"], 1);
    assert_eq!(json["violations"].as_array().unwrap().len(), 0);
}

#[test]
fn test_check_exclude_folders() {
    let (_dir, root) = project();
    let output = run_strata(
        &root,
        &[
            "check",
            "--json",
            "--search-path",
            "src",
            "--exclude-folders",
            "src/app/migrations",
        ],
    );
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["summary"]["analyzed_files"], 2);
    assert_eq!(json["violations"].as_array().unwrap().len(), 1);
}

#[test]
fn test_check_target_folders_in_message() {
    let (_dir, root) = project();
    let output = run_strata(&root, &["check", "--json", "--target-folders", "src/app"]);
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();

    let messages: Vec<&str> = json["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["message"].as_str().unwrap())
        .collect();
    assert_eq!(messages.len(), 2);
    assert!(messages
        .iter()
        .all(|m| m.ends_with("(targeting folders: src/app)")));
}

#[test]
fn test_check_reads_project_config() {
    let (_dir, root) = project();
    write_file(
        &root,
        ".strata/strata.json",
        r#"{ "search_paths": ["src"], "exclude_folders": ["src/app/migrations"] }"#,
    );
    let output = run_strata(&root, &["check", "--json"]);
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["summary"]["analyzed_files"], 2);
    assert_eq!(json["violations"][0]["importer"], "app.core");
}

#[test]
fn test_check_pythonpath_is_a_search_root() {
    let (_dir, root) = project();
    let output = std::process::Command::new(crate::common::strata_bin())
        .args(["check", "--json", "src/app/core.py"])
        .current_dir(&root)
        .env("PYTHONPATH", root.join("src"))
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["violations"][0]["importer"], "app.core");
    assert_eq!(json["violations"][0]["imported"], "app.web");
}

#[test]
fn test_check_human_output() {
    let (_dir, root) = project();
    let output = run_strata(&root, &["check", "--search-path", "src", "src/app/core.py"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("error[E9003]"));
    assert!(stdout.contains("src/app/core.py:2"));
}

fn two_contract_project() -> (tempfile::TempDir, std::path::PathBuf) {
    let (dir, root) = project();
    write_contracts(
        &root,
        vec![
            forbidden_contract("core/web", &["app.core", "app.migrations"], &["app.web"], &[]),
            forbidden_contract("web/core", &["app.web"], &["app.core"], &[]),
        ],
    );
    (dir, root)
}

fn contract_names(json: &Value) -> Vec<&str> {
    json["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["contract"].as_str().unwrap())
        .collect()
}

#[test]
fn test_check_contract_flag_skips_other_broken_contracts() {
    let (_dir, root) = two_contract_project();

    let all = run_strata(&root, &["check", "--json", "--search-path", "src"]);
    let json: Value = serde_json::from_slice(&all.stdout).unwrap();
    assert!(contract_names(&json).contains(&"web/core"));

    let only = run_strata(
        &root,
        &["check", "--json", "--search-path", "src", "--contract", "core/web"],
    );
    let json: Value = serde_json::from_slice(&only.stdout).unwrap();
    assert_eq!(contract_names(&json), vec!["core/web", "core/web"]);
    assert_eq!(json["summary"]["contracts_total"], 1);
}

#[test]
fn test_check_only_contracts_from_project_config() {
    let (_dir, root) = two_contract_project();
    write_file(
        &root,
        ".strata/strata.json",
        r#"{ "search_paths": ["src"], "only_contracts": ["web/core"] }"#,
    );
    let output = run_strata(&root, &["check", "--json"]);
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(contract_names(&json), vec!["web/core"]);
    assert_eq!(json["violations"][0]["file"], "src/app/web/views.py");
}

#[test]
fn test_check_show_timings() {
    let (_dir, root) = project();

    let plain = run_strata(&root, &["check", "--json", "--search-path", "src"]);
    let json: Value = serde_json::from_slice(&plain.stdout).unwrap();
    assert!(json.get("timings").is_none());

    let timed = run_strata(
        &root,
        &["check", "--json", "--search-path", "src", "--show-timings"],
    );
    let json: Value = serde_json::from_slice(&timed.stdout).unwrap();
    assert!(json["timings"]["total_us"].is_u64());
    assert!(json["timings"]["slowest_file"].is_string());

    let human = run_strata(&root, &["check", "--search-path", "src", "--show-timings"]);
    let stdout = String::from_utf8_lossy(&human.stdout);
    assert!(stdout.contains("parse time: "), "stdout: {stdout}");
    assert!(stdout.contains("across 3 file(s)"), "stdout: {stdout}");
}
