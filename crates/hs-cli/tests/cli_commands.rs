//! End-to-end tests for the `hs` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const STARFALL: &str = "\
system:
  name: Starfall
  edition: 2e
  publisher: Acme
order:
  - name: Pick a name
  - select: Choose a role
  - spend: Buy statistics
";

fn hs() -> Command {
    Command::cargo_bin("hs").unwrap()
}

fn write_file(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn seed_writes_fixture() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "starfall.yaml", STARFALL);
    let output = dir.path().join("fixtures/systems.json");

    hs().arg("seed")
        .arg("--dir")
        .arg(dir.path())
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote 1 systems and 3 operations"));

    let fixture: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let rows = fixture.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["model"], "CharacterCreator.System");
    assert_eq!(rows[0]["pk"], 1);
    assert_eq!(rows[1]["model"], "CharacterCreator.Operation");
    assert!(rows[1]["fields"]["previous"].is_null());
    assert_eq!(rows[3]["fields"]["previous"], 3);
    assert_eq!(rows[3]["fields"]["system"], 1);
}

#[test]
fn seed_reports_broken_files_but_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "broken.yaml", "system: [unclosed\n");
    write_file(dir.path(), "starfall.yaml", STARFALL);
    let output = dir.path().join("systems.json");

    hs().arg("seed")
        .arg("--dir")
        .arg(dir.path())
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped 1 file(s)"))
        .stderr(predicate::str::contains("broken.yaml"));

    // The good file compiled with no pk gap.
    let fixture: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(fixture[0]["pk"], 1);
}

#[test]
fn seed_output_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "b_starfall.yaml", STARFALL);
    write_file(
        dir.path(),
        "a_moonfall.yml",
        "system:\n  name: Moonfall\norder:\n  - name: Name\n",
    );

    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");
    for output in [&first, &second] {
        hs().arg("seed")
            .arg("--dir")
            .arg(dir.path())
            .arg("--output")
            .arg(output)
            .assert()
            .success();
    }

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn seed_missing_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    hs().arg("seed")
        .arg("--dir")
        .arg(dir.path().join("no-such-dir"))
        .arg("--output")
        .arg(dir.path().join("out.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn check_passes_clean_definitions() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "starfall.yaml", STARFALL);

    hs().arg("check")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ok: 1 systems, 3 operations"));
}

#[test]
fn check_fails_on_multi_key_order_entry() {
    let dir = tempfile::tempdir().unwrap();
    write_file(
        dir.path(),
        "bad.yaml",
        "system:\n  name: Bad\norder:\n  - name: Name\n    select: Role\n",
    );

    hs().arg("check")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly one operation"))
        .stderr(predicate::str::contains("problem(s) found"));
}

#[test]
fn check_fails_on_unknown_operation_name() {
    let dir = tempfile::tempdir().unwrap();
    write_file(
        dir.path(),
        "bad.yaml",
        "system:\n  name: Bad\norder:\n  - reroll: Again\n",
    );

    hs().arg("check")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("reroll"));
}

#[test]
fn roll_is_reproducible_with_a_seed() {
    let first = hs()
        .args(["roll", "2d6 + 1", "--seed", "42"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^2d6 \+ 1 = \d+\n$").unwrap());
    let first_out = first.get_output().stdout.clone();

    let second = hs().args(["roll", "2d6 + 1", "--seed", "42"]).assert().success();
    assert_eq!(first_out, second.get_output().stdout);
}

#[test]
fn roll_rejects_bad_expressions() {
    hs().args(["roll", "banana"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));

    hs().args(["roll", "0d6"]).assert().failure();
}
