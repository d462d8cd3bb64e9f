//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// A temp directory whose project config points the library at `library.json` inside it.
fn shelf_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let library = tmp.path().join("library.json");
    fs::write(
        tmp.path().join(".promptshelf.toml"),
        format!("[storage]\npath = {:?}\n", library.to_str().unwrap()),
    )
    .unwrap();
    tmp
}

/// Run a command from `dir` with `--json` and parse stdout.
fn run_json(dir: &TempDir, args: &[&str]) -> Value {
    let output = cmd()
        .args(["-C", dir.path().to_str().unwrap(), "--json"])
        .args(args)
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("prompt"));
}

#[test]
fn long_help_lists_environment() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("PROMPTSHELF_STORAGE__PATH"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_outputs_valid_json() {
    let output = cmd().arg("info").arg("--json").assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: Value = serde_json::from_str(&stdout).expect("info --json should output valid JSON");

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn quiet_and_verbose_flags_accepted() {
    cmd().args(["-q", "info"]).assert().success();
    cmd().args(["-vv", "info"]).assert().success();
}

#[test]
fn color_choices_accepted() {
    for choice in ["auto", "always", "never"] {
        cmd().args(["--color", choice, "info"]).assert().success();
    }
}

// =============================================================================
// Analyze Command
// =============================================================================

#[test]
fn analyze_json_has_expected_shape() {
    let output = cmd()
        .args(["--json", "analyze", "--text", "Make it good."])
        .assert()
        .success();
    let json: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();

    assert_eq!(json["word_count"], 3);
    assert_eq!(json["character_count"], 13);
    assert_eq!(json["estimated_tokens"], 4);
    assert!(json["readability_score"].as_u64().unwrap() <= 100);

    let suggestions = json["suggestions"].as_array().unwrap();
    assert!(!suggestions.is_empty() && suggestions.len() <= 6);
    for s in suggestions {
        assert!(s["category"].is_string());
        assert!(["low", "medium", "high"].contains(&s["priority"].as_str().unwrap()));
        assert!(s["message"].is_string());
    }
}

#[test]
fn analyze_empty_input_has_no_suggestions() {
    let output = cmd()
        .args(["--json", "analyze"])
        .write_stdin("")
        .assert()
        .success();
    let json: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();

    assert_eq!(json["word_count"], 0);
    assert_eq!(json["readability_score"], 100);
    assert_eq!(json["suggestions"], serde_json::json!([]));
}

#[test]
fn analyze_reads_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("prompt.txt");
    fs::write(&path, "Please write something nice about this.").unwrap();

    cmd()
        .args(["--color", "never", "analyze", path.to_str().unwrap(), "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Readability:"))
        .stdout(predicate::str::contains("vague pronoun"));
}

#[test]
fn analyze_missing_file_fails() {
    cmd()
        .args(["analyze", "/definitely/not/a/prompt.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn analyze_respects_input_limit() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".promptshelf.toml"), "max_input_bytes = 8\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "analyze"])
        .write_stdin("This prompt is longer than eight bytes.")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

// =============================================================================
// Library Commands
// =============================================================================

#[test]
fn prompt_round_trip_through_library_file() {
    let dir = shelf_dir();

    let project = run_json(&dir, &["project", "add", "Writing", "-d", "Blog work"]);
    assert_eq!(project["name"], "Writing");

    let added = run_json(
        &dir,
        &[
            "prompt",
            "add",
            "--title",
            "Outline",
            "--project",
            "writing",
            "--tag",
            "blog",
            "--content",
            "Outline a post about ownership in Rust.",
        ],
    );
    assert_eq!(added["version"], 1);
    assert_eq!(added["usage_count"], 0);
    let id = added["id"].as_str().unwrap().to_string();

    assert!(dir.path().join("library.json").is_file());

    let listed = run_json(&dir, &["prompt", "list", "--search", "OWNERSHIP"]);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], id.as_str());

    let used = run_json(&dir, &["prompt", "use", &id[..8]]);
    assert_eq!(used["usage_count"], 1);

    let edited = run_json(&dir, &["prompt", "edit", &id, "--title", "Post outline"]);
    assert_eq!(edited["version"], 2);
    assert_eq!(edited["title"], "Post outline");
}

#[test]
fn project_with_prompts_cannot_be_removed() {
    let dir = shelf_dir();
    run_json(&dir, &["project", "add", "Work"]);
    run_json(
        &dir,
        &["prompt", "add", "-t", "Report", "-p", "Work", "--content", "Draft the report."],
    );

    cmd()
        .args(["-C", dir.path().to_str().unwrap(), "project", "rm", "Work"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("still has 1 prompt"));
}

#[test]
fn prompt_add_reads_stdin() {
    let dir = shelf_dir();
    run_json(&dir, &["project", "add", "Work"]);

    cmd()
        .args(["-C", dir.path().to_str().unwrap(), "--json"])
        .args(["prompt", "add", "-t", "Piped", "-p", "Work"])
        .write_stdin("Summarize the attached notes.")
        .assert()
        .success()
        .stdout(predicate::str::contains("Summarize the attached notes."));
}

#[test]
fn prompt_for_unknown_project_fails() {
    let dir = shelf_dir();
    cmd()
        .args(["-C", dir.path().to_str().unwrap()])
        .args(["prompt", "add", "-t", "Lost", "-p", "Nowhere", "--content", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("project not found"));
}

#[test]
fn removing_category_uncategorizes_prompts() {
    let dir = shelf_dir();
    run_json(&dir, &["project", "add", "Work"]);
    run_json(&dir, &["category", "add", "-p", "Work", "Email"]);
    run_json(
        &dir,
        &[
            "prompt", "add", "-t", "Reply", "-p", "Work", "--category", "Email", "--content",
            "Reply politely.",
        ],
    );

    run_json(&dir, &["category", "rm", "Email"]);
    let listed = run_json(&dir, &["prompt", "list"]);
    assert!(listed[0]["category_id"].is_null());
}

#[test]
fn project_and_category_edits_persist() {
    let dir = shelf_dir();
    run_json(&dir, &["project", "add", "Work"]);
    run_json(&dir, &["category", "add", "-p", "Work", "Email"]);

    let project = run_json(
        &dir,
        &["project", "edit", "work", "-d", "Client work", "--color", "#10b981"],
    );
    assert_eq!(project["name"], "Work");
    assert_eq!(project["description"], "Client work");
    assert_eq!(project["color"], "#10b981");

    let category = run_json(
        &dir,
        &["category", "edit", "-p", "Work", "email", "--name", "Mail", "-d", "Drafts"],
    );
    assert_eq!(category["name"], "Mail");
    assert_eq!(category["description"], "Drafts");

    let listed = run_json(&dir, &["project", "list"]);
    assert_eq!(listed[0]["description"], "Client work");
    assert_eq!(listed[0]["categories"], 1);

    cmd()
        .args(["-C", dir.path().to_str().unwrap(), "project", "edit", "Work"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to change"));
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn no_subcommand_shows_help() {
    // arg_required_else_help makes clap print help to stderr and exit 2
    cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn invalid_subcommand_shows_error() {
    cmd()
        .arg("not-a-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}
