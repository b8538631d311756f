use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;
use zip::write::SimpleFileOptions;

const OWN: &str = "com.dilongdann.quickrun";

const SVG_32: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32" viewBox="0 0 32 32"><circle cx="16" cy="16" r="12" fill="#c33"/></svg>"##;

fn parse_jsonl(stdout: &[u8]) -> Vec<Value> {
    let s = String::from_utf8_lossy(stdout);
    s.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).expect("valid jsonl line"))
        .collect()
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let file = fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    for (name, content) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

fn workspace(root: &Path) {
    write_file(
        &root.join(".quickrun/workspace.json"),
        r#"{
            "items": [
                {"name": "Main", "type_id": "Application"},
                {"name": "Tests", "type_id": "Junit", "icon": "RunConfigurations.Junit"},
                {"name": "Scratch", "type_id": "Application", "temporary": true},
                {"name": "Touch", "type_id": "Shell", "command": ["touch", "ran.txt"]}
            ],
            "kinds": [
                {"id": "Application", "label": "Application", "icon": "RunConfigurations.Application"},
                {"id": "Shell", "label": "Shell Script"}
            ]
        }"#,
    );
    write_file(&root.join("plugin/icons/run.svg"), SVG_32);
}

fn quickrun(root: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("quickrun"));
    cmd.arg("--root").arg(root);
    cmd
}

fn run_jsonl(root: &Path, args: &[&str]) -> Vec<Value> {
    let assert = quickrun(root).args(args).assert().success();
    parse_jsonl(&assert.get_output().stdout)
}

fn keys(records: &[Value]) -> Vec<String> {
    records
        .iter()
        .filter_map(|v| v.get("key").and_then(|k| k.as_str()).map(str::to_string))
        .collect()
}

#[test]
fn catalog_starts_with_sentinels_and_lists_own_icons() {
    let temp = tempdir().unwrap();
    workspace(temp.path());

    let records = run_jsonl(temp.path(), &["catalog"]);
    let keys = keys(&records);

    assert_eq!(keys[0], "");
    assert_eq!(records[0]["name"], "Default icon");
    assert_eq!(keys[1], "file:CHOOSE");

    let own_key = format!("plugin:{}::/icons/run.svg", OWN);
    let own = records.iter().find(|r| r["key"] == own_key.as_str()).unwrap();
    assert_eq!(own["name"], "Run");
    assert!(keys.contains(&"Actions.Execute".to_string()));
    assert!(keys.contains(&"rcType:Application".to_string()));
}

#[test]
fn catalog_is_sorted_by_display_name() {
    let temp = tempdir().unwrap();
    workspace(temp.path());

    let records = run_jsonl(temp.path(), &["catalog"]);
    let names: Vec<String> = records[2..]
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_lowercase())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn catalog_complete_adds_extra_resources() {
    let temp = tempdir().unwrap();
    workspace(temp.path());
    write_zip(
        &temp.path().join("vendor.zip"),
        &[("icons/deploy.svg", SVG_32), ("readme.txt", "x")],
    );
    write_file(
        &temp.path().join(".quickrun/config.json"),
        r#"{"extra_resources": [{"owner_id": "vendor", "path": "vendor.zip"}]}"#,
    );

    let fast = keys(&run_jsonl(temp.path(), &["catalog"]));
    assert!(!fast.contains(&"plugin:vendor::/icons/deploy.svg".to_string()));

    let complete = keys(&run_jsonl(temp.path(), &["catalog", "--complete"]));
    assert!(complete.contains(&"plugin:vendor::/icons/deploy.svg".to_string()));
    assert!(!complete.iter().any(|k| k.contains("readme")));
}

#[test]
fn catalog_filter_keeps_sentinels() {
    let temp = tempdir().unwrap();
    workspace(temp.path());

    let keys = keys(&run_jsonl(temp.path(), &["catalog", "--filter", "shell script"]));
    assert_eq!(keys, vec!["", "file:CHOOSE", "rcType:Shell"]);
}

#[test]
fn catalog_with_missing_plugin_dir_still_succeeds() {
    let temp = tempdir().unwrap();

    let records = run_jsonl(temp.path(), &["catalog", "--complete"]);
    assert_eq!(keys(&records)[..2], ["".to_string(), "file:CHOOSE".to_string()]);
}

#[test]
fn resolve_builtin_and_plugin_keys() {
    let temp = tempdir().unwrap();
    workspace(temp.path());

    let records = run_jsonl(temp.path(), &["resolve", "Builtin.Actions.Execute"]);
    assert_eq!(records[0]["icon"], "Actions.Execute");
    assert_eq!(records[0]["data"]["selection"]["mode"], "CATALOG_KEY");

    let key = format!("plugin:{}::/icons/run.svg", OWN);
    let records = run_jsonl(temp.path(), &["resolve", &key]);
    assert_eq!(records[0]["data"]["selection"]["mode"], "PLUGIN_RESOURCE");
    assert_eq!(records[0]["data"]["resolved"], true);

    let records = run_jsonl(temp.path(), &["resolve", "Actions.Nope"]);
    assert_eq!(records[0]["data"]["resolved"], false);
    assert!(records[0].get("icon").is_none());
}

#[test]
fn resolve_choose_file_requires_file_flag() {
    let temp = tempdir().unwrap();
    workspace(temp.path());

    quickrun(temp.path())
        .args(["resolve", "file:CHOOSE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--file"));
}

#[test]
fn resolve_choose_file_decodes_and_fits_image() {
    let temp = tempdir().unwrap();
    workspace(temp.path());
    write_file(&temp.path().join("art/logo.svg"), SVG_32);

    let records = run_jsonl(temp.path(), &["resolve", "file:CHOOSE", "--file", "art/logo.svg"]);
    let data = &records[0]["data"];
    assert_eq!(data["selection"]["mode"], "FILE");
    assert_eq!(data["image"]["width"], 32);
    assert_eq!(data["image"]["display_width"], 16);
    assert_eq!(data["image"]["display_height"], 16);
}

#[test]
fn resolve_oversized_svg_is_rasterized_within_bounds() {
    let temp = tempdir().unwrap();
    workspace(temp.path());
    write_file(
        &temp.path().join("art/huge.svg"),
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="30000" height="30000"><rect width="30000" height="30000" fill="#c33"/></svg>"##,
    );

    let records = run_jsonl(temp.path(), &["resolve", "file:CHOOSE", "--file", "art/huge.svg"]);
    let data = &records[0]["data"];
    assert_eq!(data["resolved"], true);
    assert_eq!(data["image"]["width"], 1024);
    assert_eq!(data["image"]["display_width"], 16);
}

#[test]
fn select_persists_and_default_key_clears() {
    let temp = tempdir().unwrap();
    workspace(temp.path());
    let state_path = temp.path().join(".quickrun/quick_run.json");

    let records = run_jsonl(temp.path(), &["select", "Application", "Main", "General.Settings"]);
    assert_eq!(records[0]["key"], "Application::Main");
    assert_eq!(records[0]["icon"], "General.Settings");

    let state: Value = serde_json::from_str(&fs::read_to_string(&state_path).unwrap()).unwrap();
    assert_eq!(
        state["selections"]["Application::Main"],
        serde_json::json!({"mode": "CATALOG_KEY", "value": "General.Settings"})
    );

    run_jsonl(temp.path(), &["select", "Application", "Main", ""]);
    let state: Value = serde_json::from_str(&fs::read_to_string(&state_path).unwrap()).unwrap();
    assert!(state["selections"].get("Application::Main").is_none());
}

#[test]
fn corrupt_state_is_treated_as_empty() {
    let temp = tempdir().unwrap();
    workspace(temp.path());
    write_file(&temp.path().join(".quickrun/quick_run.json"), "{{{");

    let records = run_jsonl(temp.path(), &["bar"]);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["data"]["action"], "edit");
}

#[test]
fn items_list_shows_live_rows_without_temporary() {
    let temp = tempdir().unwrap();
    workspace(temp.path());

    let records = run_jsonl(temp.path(), &["items", "list"]);
    assert_eq!(
        keys(&records),
        vec!["Application::Main", "Junit::Tests", "Shell::Touch"]
    );
    assert_eq!(records[0]["data"]["enabled"], false);
    // kind icon, then own icon
    assert_eq!(records[0]["icon"], "RunConfigurations.Application");
    assert_eq!(records[1]["icon"], "RunConfigurations.Junit");
    assert_eq!(records[2]["icon"], "Actions.Execute");
}

#[test]
fn bar_follows_configured_order_and_flags() {
    let temp = tempdir().unwrap();
    workspace(temp.path());

    run_jsonl(temp.path(), &["items", "set", "Junit", "Tests", "--display-name", "All tests"]);
    run_jsonl(temp.path(), &["items", "set", "Application", "Main"]);
    run_jsonl(temp.path(), &["items", "set", "Shell", "Touch", "--disabled"]);
    run_jsonl(temp.path(), &["items", "set", "Application", "Gone"]);
    run_jsonl(temp.path(), &["items", "show-name", "Application", "Main", "false"]);

    let records = run_jsonl(temp.path(), &["bar"]);
    let actual: Vec<&str> = records
        .iter()
        .filter_map(|r| r["data"]["actual_name"].as_str())
        .collect();
    assert_eq!(actual, vec!["Tests", "Main"]);
    assert_eq!(records[0]["name"], "All tests");
    assert_eq!(records[0]["data"]["description"], "Run \"Tests\"");
    assert_eq!(records[1]["name"], "");
    assert_eq!(records[2]["data"]["action"], "edit");
    assert_eq!(records[2]["icon"], "Actions.Edit");
}

#[test]
fn show_name_on_unknown_item_fails() {
    let temp = tempdir().unwrap();
    workspace(temp.path());

    quickrun(temp.path())
        .args(["items", "show-name", "Application", "Main", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a configured item"));
}

#[test]
fn items_move_reorders_and_saves_all_rows() {
    let temp = tempdir().unwrap();
    workspace(temp.path());

    let records = run_jsonl(temp.path(), &["items", "move", "2", "0"]);
    assert_eq!(
        keys(&records),
        vec!["Shell::Touch", "Application::Main", "Junit::Tests"]
    );

    let records = run_jsonl(temp.path(), &["items", "move", "0", "2"]);
    assert_eq!(
        keys(&records),
        vec!["Application::Main", "Shell::Touch", "Junit::Tests"]
    );

    quickrun(temp.path())
        .args(["items", "move", "7", "0"])
        .assert()
        .failure();
}

#[test]
fn markdown_output_groups_sections() {
    let temp = tempdir().unwrap();
    workspace(temp.path());

    quickrun(temp.path())
        .args(["--format", "md", "--no-color", "items", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Items"))
        .stdout(predicate::str::contains("`Application::Main`"));
}

#[cfg(unix)]
#[test]
fn run_executes_item_ignoring_case() {
    let temp = tempdir().unwrap();
    workspace(temp.path());

    let records = run_jsonl(temp.path(), &["run", "touch"]);
    assert_eq!(records[0]["kind"], "run");
    assert!(temp.path().join("ran.txt").exists());

    quickrun(temp.path())
        .args(["run", "Main"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no command"));
}
