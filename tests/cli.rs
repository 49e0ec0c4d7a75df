use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fincast(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fincast").unwrap();
    cmd.env("FINCAST_DATA_DIR", data_dir)
        .env_remove("FINCAST_LOG")
        .env_remove("RUST_LOG");
    cmd
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

const FLAT_INCOME: &str = "date,amount,type,category,description\n\
                           2024-01-15,1000,income,Sales,January invoices\n\
                           2024-02-15,1000,income,Sales,February invoices\n\
                           2024-03-15,1000,income,Sales,March invoices\n";

const REVENUE_DROP: &str = "date,amount,type,category\n\
                            2024-01-10,1000,income,Sales\n\
                            2024-02-10,750,income,Sales\n\
                            2024-03-10,750,income,Sales\n";

#[test]
fn test_help_lists_commands() {
    let temp_dir = TempDir::new().unwrap();
    fincast(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("forecast"))
        .stdout(predicate::str::contains("anomalies"))
        .stdout(predicate::str::contains("benchmarks"))
        .stdout(predicate::str::contains("report"));
}

#[test]
fn test_summary() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "flat.csv", FLAT_INCOME);

    fincast(temp_dir.path())
        .arg("summary")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Jan 2024"))
        .stdout(predicate::str::contains("Mar 2024"))
        .stdout(predicate::str::contains("3 transactions over 3 months"))
        .stdout(predicate::str::contains("Total income:  $3000.00"));
}

#[test]
fn test_forecast_appends_projected_months() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "flat.csv", FLAT_INCOME);

    fincast(temp_dir.path())
        .args(["forecast", "-n", "2"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Apr 2024"))
        .stdout(predicate::str::contains("May 2024"))
        .stdout(predicate::str::contains("forecast"))
        .stdout(predicate::str::contains("Jun 2024").not());
}

#[test]
fn test_forecast_needs_three_months() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(
        &temp_dir,
        "short.csv",
        "date,amount\n2024-01-15,1000\n2024-02-15,900\n",
    );

    fincast(temp_dir.path())
        .arg("forecast")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("At least 3 months of history"))
        .stdout(predicate::str::contains("Mar 2024").not());
}

#[test]
fn test_forecast_output_csv() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "flat.csv", FLAT_INCOME);
    let output = temp_dir.path().join("exports").join("forecast.csv");

    fincast(temp_dir.path())
        .args(["forecast", "--horizon", "1", "--output"])
        .arg(&output)
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Forecast exported to"));

    let csv = std::fs::read_to_string(&output).unwrap();
    assert!(csv.contains("2024-04,Apr 2024,1000.00,0.00,1000.00,true"));
}

#[test]
fn test_anomalies_reports_revenue_drop() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "drop.csv", REVENUE_DROP);

    fincast(temp_dir.path())
        .arg("anomalies")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("[MEDIUM]"))
        .stdout(predicate::str::contains(
            "Revenue dropped 25.0% in Feb 2024 (from $1000.00 to $750.00)",
        ))
        .stdout(predicate::str::contains("Suggested actions:"));
}

#[test]
fn test_anomalies_output_csv() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "drop.csv", REVENUE_DROP);
    let output = temp_dir.path().join("out").join("alerts.csv");

    fincast(temp_dir.path())
        .args(["anomalies", "--output"])
        .arg(&output)
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("[MEDIUM]"))
        .stdout(predicate::str::contains("Alerts exported to"));

    let csv = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Month,Type,Severity,Message,Recommendation");
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("2024-02,Revenue drop,medium,"));
}

#[test]
fn test_bank_debit_and_credit_amount_columns() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(
        &temp_dir,
        "bank.csv",
        "Date,Description,Debit Amount,Credit Amount\n\
         2024-01-03,Rent,500.00,\n\
         2024-01-04,Client,,2000.00\n",
    );

    fincast(temp_dir.path())
        .arg("summary")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total income:  $2000.00"))
        .stdout(predicate::str::contains("Total expense: $500.00"))
        .stderr(predicate::str::contains("unreadable amounts").not());
}

#[test]
fn test_huge_amount_is_coerced_not_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(
        &temp_dir,
        "huge.csv",
        "date,amount,type\n\
         2024-01-01,-1e18,expense\n\
         2024-01-02,1e18,income\n\
         2024-01-03,40,income\n",
    );

    fincast(temp_dir.path())
        .arg("summary")
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::contains("2 rows had unreadable amounts"))
        .stdout(predicate::str::contains("Total income:  $40.00"));
}

#[test]
fn test_anomalies_none_for_steady_business() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "flat.csv", FLAT_INCOME);

    fincast(temp_dir.path())
        .arg("anomalies")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("No anomalies detected."));
}

#[test]
fn test_benchmarks_with_business_type() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(
        &temp_dir,
        "shop.csv",
        "date,amount,category\n\
         2024-01-05,10000,Sales\n\
         2024-01-06,-2500,Rent\n",
    );

    fincast(temp_dir.path())
        .args(["benchmarks", "--business-type", "retail"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Compared with Retail businesses"))
        .stdout(predicate::str::contains("rent"))
        .stdout(predicate::str::contains("Rent spending is 25.0% of revenue"));
}

#[test]
fn test_benchmarks_rejects_unknown_business_type() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "flat.csv", FLAT_INCOME);

    fincast(temp_dir.path())
        .args(["benchmarks", "--business-type", "spaceport"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown business type"));
}

#[test]
fn test_report_json_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "drop.csv", REVENUE_DROP);

    let output = fincast(temp_dir.path())
        .args(["report", "--format", "json"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["schema_version"], "1.0.0");
    assert_eq!(value["periods"].as_array().unwrap().len(), 3);
    assert_eq!(value["forecast"].as_array().unwrap().len(), 6);
    assert_eq!(value["alerts"][0]["kind"], "revenue_drop");
    assert_eq!(value["alerts"][0]["severity"], "medium");
}

#[test]
fn test_report_yaml_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "flat.csv", FLAT_INCOME);
    let output = temp_dir.path().join("report.yaml");

    fincast(temp_dir.path())
        .args(["report", "--format", "yaml", "--output"])
        .arg(&output)
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to"));

    let yaml = std::fs::read_to_string(&output).unwrap();
    assert!(yaml.starts_with("# fincast insight report"));
    assert!(yaml.contains("predicted: true"));
}

#[test]
fn test_report_save_uses_reports_dir() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "flat.csv", FLAT_INCOME);

    fincast(temp_dir.path())
        .args(["report", "--format", "csv", "--save"])
        .arg(&file)
        .assert()
        .success();

    let saved: Vec<_> = std::fs::read_dir(temp_dir.path().join("reports"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].starts_with("insight-"));
    assert!(saved[0].ends_with(".csv"));
}

#[test]
fn test_report_terminal() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "drop.csv", REVENUE_DROP);

    fincast(temp_dir.path())
        .arg("report")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cash Flow Insight Report"))
        .stdout(predicate::str::contains("ANOMALIES (1)"))
        .stdout(predicate::str::contains("RECOMMENDATIONS"));
}

#[test]
fn test_json_input() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(
        &temp_dir,
        "ledger.json",
        r#"[
            {"date": "2024-01-03", "amount": 1200, "type": "income"},
            {"date": "2024-01-20", "amount": "-300.50", "category": "Rent"}
        ]"#,
    );

    fincast(temp_dir.path())
        .arg("summary")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("$899.50"));
}

#[test]
fn test_bad_rows_are_tolerated_with_warnings() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(
        &temp_dir,
        "messy.csv",
        "date,amount,type\n\
         2024-01-05,1000,income\n\
         not a date,500,income\n\
         2024-01-09,lots,expense\n",
    );

    fincast(temp_dir.path())
        .arg("summary")
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::contains("skipped 1 of 3 rows"))
        .stderr(predicate::str::contains("1 rows had unreadable amounts"))
        .stdout(predicate::str::contains("Total income:  $1000.00"));
}

#[test]
fn test_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();

    fincast(temp_dir.path())
        .args(["summary", "does-not-exist.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Import error"));
}

#[test]
fn test_excessive_horizon_fails() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "flat.csv", FLAT_INCOME);

    fincast(temp_dir.path())
        .args(["forecast", "--horizon", "500"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the maximum"));
}

#[test]
fn test_init_and_config() {
    let temp_dir = TempDir::new().unwrap();

    fincast(temp_dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized fincast"));
    assert!(temp_dir.path().join("config.json").exists());

    fincast(temp_dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings already exist"));

    fincast(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Forecast horizon: 3 months"))
        .stdout(predicate::str::contains("Business type:    General"));
}

#[test]
fn test_settings_change_default_horizon() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "flat.csv", FLAT_INCOME);
    write_file(&temp_dir, "config.json", r#"{"forecast_horizon": 1}"#);

    fincast(temp_dir.path())
        .arg("forecast")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Apr 2024"))
        .stdout(predicate::str::contains("May 2024").not());
}

#[test]
fn test_invalid_settings_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    write_file(&temp_dir, "config.json", "{ not json");

    fincast(temp_dir.path())
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse settings file"));
}
