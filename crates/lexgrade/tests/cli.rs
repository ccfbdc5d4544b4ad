//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const SIMPLE: &str = "I like cats. My cat is small. It is black. We play every day.";

const COMPLEX: &str = "Although contemporary epidemiological investigations have \
    substantially illuminated the multifactorial determinants of cardiovascular \
    morbidity, considerable uncertainty persists regarding the comparative \
    contributions of socioeconomic deprivation, environmental exposures, and \
    heritable predispositions, particularly because longitudinal observational \
    methodologies frequently encounter confounding variables whose \
    interrelationships remain insufficiently characterized.";

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env_remove("LEXGRADE_EXPECT_LEVEL")
        .env_remove("LEXGRADE_CLOZE_BLANKS")
        .env_remove("LEXGRADE_SEED");
    cmd
}

/// A temp directory holding `simple.txt` and `complex.txt`.
fn fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("simple.txt"), SIMPLE).unwrap();
    fs::write(tmp.path().join("complex.txt"), COMPLEX).unwrap();
    tmp
}

fn json_output(tmp: &TempDir, args: &[&str]) -> Value {
    let output = cmd()
        .current_dir(tmp.path())
        .args(args)
        .arg("--json")
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_lists_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("readability"))
        .stdout(predicate::str::contains("level"))
        .stdout(predicate::str::contains("cloze"));
}

#[test]
fn long_help_documents_environment() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("LEXGRADE_CLOZE_BLANKS"));
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
fn info_json_has_package_fields() {
    let tmp = TempDir::new().unwrap();
    let json = json_output(&tmp, &["info"]);

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["config"].is_object());
}

#[test]
fn info_text_shows_defaults() {
    cmd()
        .args(["--color", "never", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains("Cloze blanks"));
}

// =============================================================================
// Analyze Command
// =============================================================================

#[test]
fn analyze_json_has_report_fields() {
    let tmp = fixture();
    let json = json_output(&tmp, &["analyze", "simple.txt", "--seed", "1"]);

    assert_eq!(json["overall_level"], "A1");
    for field in [
        "flesch_kincaid_grade",
        "flesch_reading_ease",
        "gunning_fog_index",
        "smog_index",
        "type_token_ratio",
        "mtld",
        "avg_sentence_length",
        "clause_density",
        "complexity_score",
    ] {
        assert!(json[field].is_number(), "missing {field}");
    }
    assert_eq!(json["blanked_words"].as_array().unwrap().len(), 5);
    assert!(json["top_bigrams"].is_array());
}

#[test]
fn analyze_complex_text_is_b2() {
    let tmp = fixture();
    let json = json_output(&tmp, &["analyze", "complex.txt", "--seed", "1"]);
    assert_eq!(json["overall_level"], "B2");
}

#[test]
fn analyze_same_seed_same_output() {
    let tmp = fixture();
    let first = json_output(&tmp, &["analyze", "complex.txt", "--seed", "8"]);
    let second = json_output(&tmp, &["analyze", "complex.txt", "--seed", "8"]);
    assert_eq!(first, second);
}

#[test]
fn analyze_text_output_shows_level() {
    let tmp = fixture();
    cmd()
        .current_dir(tmp.path())
        .args(["analyze", "simple.txt", "--seed", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A1"))
        .stdout(predicate::str::contains("Readability:"));
}

#[test]
fn analyze_reads_stdin() {
    let output = cmd()
        .args(["analyze", "-", "--json", "--seed", "3"])
        .write_stdin("the cat sat. the cat ran.")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["top_bigrams"][0]["ngram"][0], "the");
    assert_eq!(json["top_bigrams"][0]["ngram"][1], "cat");
    assert_eq!(json["top_bigrams"][0]["count"], 2);
}

#[test]
fn analyze_empty_file_is_all_zero() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("empty.txt"), "").unwrap();
    let json = json_output(&tmp, &["analyze", "empty.txt"]);

    assert_eq!(json["overall_level"], "A1");
    assert_eq!(json["complexity_score"], 0.0);
    assert_eq!(json["cloze_text"], "");
}

// =============================================================================
// Readability Command
// =============================================================================

#[test]
fn readability_json_scores() {
    let output = cmd()
        .args(["readability", "-", "--json"])
        .write_stdin("The cat sat on mats.")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["words"], 5);
    assert_eq!(json["sentences"], 1);
    assert_eq!(json["flesch_kincaid_grade"], -1.8);
    assert_eq!(json["flesch_reading_ease"], 117.2);
    assert_eq!(json["smog_index"], 0.0);
}

#[test]
fn readability_text_output() {
    let tmp = fixture();
    cmd()
        .current_dir(tmp.path())
        .args(["--color", "never", "readability", "complex.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Flesch-Kincaid grade"))
        .stdout(predicate::str::contains("SMOG"));
}

// =============================================================================
// Level Command
// =============================================================================

#[test]
fn level_prints_level() {
    let tmp = fixture();
    cmd()
        .current_dir(tmp.path())
        .args(["level", "simple.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A1"));
}

#[test]
fn level_expect_match_passes() {
    let tmp = fixture();
    cmd()
        .current_dir(tmp.path())
        .args(["level", "complex.txt", "--expect", "B2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS"));
}

#[test]
fn level_expect_mismatch_fails() {
    let tmp = fixture();
    cmd()
        .current_dir(tmp.path())
        .args(["level", "simple.txt", "--expect", "b1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected B1"));
}

#[test]
fn level_json_mismatch_still_prints_report() {
    let tmp = fixture();
    let output = cmd()
        .current_dir(tmp.path())
        .args(["level", "simple.txt", "--expect", "B2", "--json"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["level"], "A1");
    assert_eq!(json["matched"], false);
}

#[test]
fn level_rejects_unknown_level() {
    let tmp = fixture();
    cmd()
        .current_dir(tmp.path())
        .args(["level", "simple.txt", "--expect", "C1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// =============================================================================
// Cloze Command
// =============================================================================

#[test]
fn cloze_json_blanks_requested_words() {
    let tmp = fixture();
    let json = json_output(&tmp, &["cloze", "complex.txt", "--blanks", "3", "--seed", "5"]);

    let words = json["blanked_words"].as_array().unwrap();
    assert_eq!(words.len(), 3);
    let text = json["text"].as_str().unwrap();
    for word in words {
        let word = word.as_str().unwrap();
        assert!(!text.split(' ').any(|w| w == word), "{word} not blanked");
    }
}

#[test]
fn cloze_text_output_lists_answers() {
    let tmp = fixture();
    cmd()
        .current_dir(tmp.path())
        .args(["cloze", "simple.txt", "--blanks", "2", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_____"));
}

#[test]
fn cloze_matches_analyze_for_same_seed() {
    let tmp = fixture();
    let cloze = json_output(&tmp, &["cloze", "complex.txt", "--seed", "12"]);
    let analysis = json_output(&tmp, &["analyze", "complex.txt", "--seed", "12"]);
    assert_eq!(cloze["text"], analysis["cloze_text"]);
    assert_eq!(cloze["blanked_words"], analysis["blanked_words"]);
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn quiet_and_verbose_flags_accepted() {
    for flags in [["-q", "info"], ["-v", "info"], ["-vv", "info"]] {
        cmd().args(flags).assert().success();
    }
}

#[test]
fn color_choices_accepted() {
    for choice in ["auto", "always", "never"] {
        cmd().args(["--color", choice, "info"]).assert().success();
    }
}

#[test]
fn chdir_flag_resolves_relative_files() {
    let tmp = fixture();
    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "level", "simple.txt"])
        .assert()
        .success();
}

#[test]
fn log_dir_receives_json_lines() {
    let tmp = fixture();
    let log_path = tmp.path().join("logs").join("run.jsonl");
    cmd()
        .current_dir(tmp.path())
        .env("LEXGRADE_LOG_PATH", &log_path)
        .args(["-v", "level", "simple.txt"])
        .assert()
        .success();

    let contents = fs::read_to_string(&log_path).unwrap();
    let first = contents.lines().next().expect("log file should not be empty");
    let event: Value = serde_json::from_str(first).unwrap();
    assert!(event["level"].is_string());
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
fn missing_file_fails() {
    cmd()
        .args(["analyze", "/nonexistent/lexgrade/input.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn oversized_stdin_is_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("lexgrade.toml"), "max_input_bytes = 8\n").unwrap();
    cmd()
        .current_dir(tmp.path())
        .args(["readability", "-"])
        .write_stdin("This text is longer than eight bytes.")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

#[test]
fn chdir_nonexistent_fails() {
    cmd()
        .args(["-C", "/nonexistent/path/that/does/not/exist", "info"])
        .assert()
        .failure();
}
