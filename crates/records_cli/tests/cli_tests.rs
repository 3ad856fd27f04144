use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const SCHEMA_DIR: &str = "../../fixtures/schemas";

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

/// Helper to create a Command for the rcv binary pointed at the shared schemas
// TODO: Migrate to cargo::cargo_bin_cmd! macro when available
// See: https://github.com/assert-rs/assert_cmd/issues/139
#[allow(deprecated)]
fn rcv() -> Command {
    let mut cmd = Command::cargo_bin("rcv").expect("Failed to find rcv binary");
    cmd.env_remove("RCV_SCHEMA_DIR")
        .env_remove("RCV_MAX_DEPTH")
        .env("NO_COLOR", "1");
    cmd
}

// ============================================================================
// check command tests
// ============================================================================

#[test]
fn test_check_claims_schema() {
    rcv()
        .args(["--schema-dir", SCHEMA_DIR, "check", "claims_data.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema is valid"))
        .stdout(predicate::str::contains("Claims Data"))
        .stdout(predicate::str::contains(
            "claim_id, patient_id, provider_id, claim_date, amount, status",
        ))
        .stdout(predicate::str::contains("format date"));
}

#[test]
fn test_check_json_output() {
    let output = rcv()
        .args(["--schema-dir", SCHEMA_DIR, "check", "patient_record.json", "--format", "json"])
        .output()
        .expect("Failed to run rcv");

    assert!(output.status.success());
    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(summary["name"], "patient_record.json");
    assert_eq!(summary["depth"], 3);
    assert_eq!(summary["required"][0], "patient_id");
}

#[test]
fn test_check_missing_schema() {
    rcv()
        .args(["--schema-dir", SCHEMA_DIR, "check", "nonexistent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_check_invalid_schema() {
    rcv()
        .args(["--schema-dir", "tests/fixtures", "check", "broken_schema.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("money"));
}

#[test]
fn test_check_rejects_traversal() {
    rcv()
        .args(["--schema-dir", SCHEMA_DIR, "check", "../schemas/claims_data.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid schema name"));
}

#[test]
fn test_schema_dir_from_env() {
    rcv()
        .env("RCV_SCHEMA_DIR", SCHEMA_DIR)
        .args(["check", "medical_chart.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Medical Chart"));
}

#[test]
fn test_max_depth_limits_schema() {
    rcv()
        .args(["--schema-dir", SCHEMA_DIR, "--max-depth", "2", "check", "patient_record.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("maximum depth of 2"));
}

// ============================================================================
// validate command tests
// ============================================================================

#[test]
fn test_validate_valid_claim() {
    rcv()
        .args(["--schema-dir", SCHEMA_DIR, "validate"])
        .arg(fixture_path("valid_claim.json"))
        .args(["--schema", "claims_data.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation PASSED"));
}

#[test]
fn test_validate_incomplete_claim() {
    rcv()
        .args(["--schema-dir", SCHEMA_DIR, "validate"])
        .arg(fixture_path("incomplete_claim.json"))
        .args(["--schema", "claims_data.json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Validation FAILED"))
        .stdout(predicate::str::contains("Missing required field at provider_id"))
        .stdout(predicate::str::contains("Total errors:   4"));
}

#[test]
fn test_validate_required_check() {
    rcv()
        .args(["--schema-dir", SCHEMA_DIR, "validate"])
        .arg(fixture_path("incomplete_claim.json"))
        .args(["--schema", "claims_data.json", "--check", "required"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("missing required field 'claim_date'"));
}

#[test]
fn test_validate_types_check() {
    rcv()
        .args(["--schema-dir", SCHEMA_DIR, "validate"])
        .arg(fixture_path("invalid_types_claim.json"))
        .args(["--schema", "claims_data.json", "--check", "types"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Type mismatch at amount: expected number (int/float), got string",
        ))
        .stdout(predicate::str::contains("claim_date").not());
}

#[test]
fn test_validate_format_check() {
    rcv()
        .args(["--schema-dir", SCHEMA_DIR, "validate"])
        .arg(fixture_path("invalid_types_claim.json"))
        .args(["--schema", "claims_data.json", "--check", "format"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn test_validate_json_output() {
    let output = rcv()
        .args(["--schema-dir", SCHEMA_DIR, "validate"])
        .arg(fixture_path("invalid_types_claim.json"))
        .args(["--schema", "claims_data.json", "--format", "json"])
        .output()
        .expect("Failed to run rcv");

    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");

    assert_eq!(report["passed"], false);
    assert_eq!(report["summary"]["error_count"], 3);
    assert_eq!(report["details"][0]["kind"], "type");
    assert_eq!(report["details"][0]["path"], "amount");
    assert_eq!(report["details"][1]["kind"], "format");
    assert_eq!(report["details"][2]["kind"], "constraint");
}

#[test]
fn test_validate_missing_record_file() {
    rcv()
        .args(["--schema-dir", SCHEMA_DIR, "validate", "nonexistent.json"])
        .args(["--schema", "claims_data.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read record file"));
}

#[test]
fn test_validate_malformed_record() {
    rcv()
        .args(["--schema-dir", SCHEMA_DIR, "validate"])
        .arg(fixture_path("malformed.json"))
        .args(["--schema", "claims_data.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn test_validate_missing_schema() {
    rcv()
        .args(["--schema-dir", SCHEMA_DIR, "validate"])
        .arg(fixture_path("valid_claim.json"))
        .args(["--schema", "nonexistent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load schema 'nonexistent.json'"));
}

#[test]
fn test_validate_against_yaml_schema() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("visit.yaml"),
        "type: object\nrequired: [visit_date]\nproperties:\n  visit_date:\n    type: string\n    format: date\n",
    )
    .unwrap();
    let record = dir.path().join("visit.json");
    fs::write(&record, r#"{"visit_date": "2024-02-30"}"#).unwrap();

    rcv()
        .arg("--schema-dir")
        .arg(dir.path())
        .arg("validate")
        .arg(&record)
        .args(["--schema", "visit.yaml"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Format error at visit_date: expected YYYY-MM-DD, got '2024-02-30'",
        ));
}

#[test]
fn test_help() {
    rcv()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("--schema-dir"));
}
