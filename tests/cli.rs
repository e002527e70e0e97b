use predicates::prelude::*;

#[test]
fn test_cli_help() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("cycletime-forecast");
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("forecast"));
}

#[test]
fn explain_prints_worked_example() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("cycletime-forecast");
    cmd.arg("explain");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Cumulative: [6, 14, 21, 26, 35]"));
}
