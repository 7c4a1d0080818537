//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary with an empty home directory, so no user config is picked up.
fn tutorgrade() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("tutorgrade").unwrap();
    cmd.env("HOME", std::env::temp_dir().join("tutorgrade-cli-tests-home"))
        .env_remove("TUTORGRADE_SUBMISSIONS");
    cmd
}

const SPANISH: &str = "../../exercise-sets/spanish-basics.toml";

fn grade(exercise: &str, answer: &str) -> assert_cmd::assert::Assert {
    tutorgrade()
        .arg("grade")
        .arg("--exercise-set")
        .arg(SPANISH)
        .arg("--exercise")
        .arg(exercise)
        .arg("--answer")
        .arg(answer)
        .assert()
}

#[test]
fn validate_spanish_set() {
    tutorgrade()
        .arg("validate")
        .arg("--exercise-set")
        .arg(SPANISH)
        .assert()
        .success()
        .stdout(predicate::str::contains("Spanish Basics (8 exercises)"))
        .stdout(predicate::str::contains("All exercise sets valid"));
}

#[test]
fn validate_directory() {
    tutorgrade()
        .arg("validate")
        .arg("--exercise-set")
        .arg("../../exercise-sets")
        .assert()
        .success()
        .stdout(predicate::str::contains("French Basics (4 exercises)"))
        .stdout(predicate::str::contains("Spanish Basics"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(
        &path,
        r#"
[exercise_set]
id = "broken"
name = "Broken"

[[exercises]]
id = "order"
type = "ordering"
points = 2
items = ["a", "b"]
correctOrder = [0, 0]
"#,
    )
    .unwrap();

    tutorgrade()
        .arg("validate")
        .arg("--exercise-set")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[order] WARNING: correctOrder"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn validate_nonexistent_file() {
    tutorgrade()
        .arg("validate")
        .arg("--exercise-set")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn grade_single_choice_with_bare_string() {
    grade("greeting", r#""b""#)
        .success()
        .stdout(predicate::str::contains("Score: 1/1"))
        .stdout(predicate::str::contains("Correct: yes"))
        .stdout(predicate::str::contains("Perfect! You got everything correct."));
}

#[test]
fn grade_partial_multiple_choice() {
    grade("colors", r#"["a"]"#)
        .success()
        .stdout(predicate::str::contains("Score: 5/10"))
        .stdout(predicate::str::contains("Correct: no (1/2)"))
        .stdout(predicate::str::contains("Keep practicing!"));
}

#[test]
fn grade_fill_in_blanks_lists_missed_blanks() {
    grade("ser", r#"{"b1": " Soy ", "b2": "eres", "b3": "es."}"#)
        .success()
        .stdout(predicate::str::contains("Score: 3/4"))
        .stdout(predicate::str::contains("Incorrect: b4"))
        .stdout(predicate::str::contains("Good effort!"));
}

#[test]
fn grade_translation_keyword_credit() {
    grade("morning", r#""Good morning, friend""#)
        .success()
        .stdout(predicate::str::contains("Score: 4/10"))
        .stdout(predicate::str::contains("Good morning, how are you?"));
}

#[test]
fn grade_exact_translation() {
    grade("morning", r#""good morning how are you""#)
        .success()
        .stdout(predicate::str::contains("Score: 10/10"))
        .stdout(predicate::str::contains("Perfect translation!"));
}

#[test]
fn grade_free_writing_is_pending() {
    grade("my-house", r#""Mi casa es grande.""#)
        .success()
        .stdout(predicate::str::contains("Score: 0/20"))
        .stdout(predicate::str::contains("Status: pending review"))
        .stdout(predicate::str::contains("requires teacher review"))
        .stdout(predicate::str::contains("Write at least 10 words (currently 4)."))
        .stdout(predicate::str::contains("Include: hay"));
}

#[test]
fn grade_json_output() {
    let output = tutorgrade()
        .arg("grade")
        .arg("--exercise-set")
        .arg(SPANISH)
        .arg("--exercise")
        .arg("days")
        .arg("--answer")
        .arg("[1, 3, 2, 0]")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["correct"], false);
    assert_eq!(result["score"], 2.0);
    assert_eq!(result["details"]["correctAnswers"], 2);
    assert_eq!(result["details"]["incorrectItems"], serde_json::json!(["2", "3"]));
}

#[test]
fn grade_unknown_exercise() {
    grade("nope", r#""x""#)
        .failure()
        .stderr(predicate::str::contains("exercise 'nope' not found"));
}

#[test]
fn grade_wrong_answer_shape() {
    grade("days", r#""lunes""#)
        .failure()
        .stderr(predicate::str::contains(
            "answer for ordering exercise must be a list of item indices",
        ));
}

#[test]
fn grade_invalid_json_answer() {
    grade("greeting", "not json")
        .failure()
        .stderr(predicate::str::contains("answer is not valid JSON"));
}

#[test]
fn missing_explicit_config_fails() {
    tutorgrade()
        .arg("stats")
        .arg("--config")
        .arg("/nonexistent/tutorgrade.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    tutorgrade()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created tutorgrade.toml"))
        .stdout(predicate::str::contains("Created exercise-sets/example.toml"));

    assert!(dir.path().join("tutorgrade.toml").exists());

    tutorgrade()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--exercise-set")
        .arg("exercise-sets/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("All exercise sets valid"));

    tutorgrade()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists, skipping"));
}

#[test]
fn stats_without_submissions() {
    let dir = TempDir::new().unwrap();

    tutorgrade()
        .current_dir(dir.path())
        .env("TUTORGRADE_SUBMISSIONS", dir.path().join("subs.json"))
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("No submissions recorded."));
}

#[test]
fn user_config_is_read_from_home() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".config").join("tutorgrade");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "output_format = \"json\"\n").unwrap();

    tutorgrade()
        .env("HOME", home.path())
        .arg("grade")
        .arg("--exercise-set")
        .arg(SPANISH)
        .arg("--exercise")
        .arg("greeting")
        .arg("--answer")
        .arg(r#""b""#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"correct\": true"))
        .stdout(predicate::str::contains("Score:").not());
}
