//! End-to-end report runs against a mock FMP server.

use fundsheet::data::DataError;
use fundsheet::output::ExportFormat;
use fundsheet::{FailurePolicy, ReportConfig, ReportError, run_report};
use httpmock::{Method::GET, MockServer};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

const ENTERPRISE_VALUES: &str =
    include_str!("../../fundsheet-data/tests/fixtures/enterprise_values_AAPL.json");
const INCOME_STATEMENT: &str =
    include_str!("../../fundsheet-data/tests/fixtures/income_statement_AAPL.json");

fn mock_aapl(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET)
            .path("/enterprise-values")
            .query_param("symbol", "AAPL");
        then.status(200)
            .header("content-type", "application/json")
            .body(ENTERPRISE_VALUES);
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/income-statement")
            .query_param("symbol", "AAPL");
        then.status(200)
            .header("content-type", "application/json")
            .body(INCOME_STATEMENT);
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/enterprise-values")
            .query_param("symbol", "NOPE");
        then.status(404).body("Not Found");
    });
}

fn config_for(server: &MockServer, output: PathBuf) -> ReportConfig {
    ReportConfig {
        api_key: "test-key".to_string(),
        base_url: server.base_url(),
        output,
        ..Default::default()
    }
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("fundsheet-report-{}-{}", std::process::id(), name))
}

fn read_part(path: &Path, part: &str) -> String {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entry = archive.by_name(part).unwrap();
    let mut xml = String::new();
    entry.read_to_string(&mut xml).unwrap();
    xml
}

#[tokio::test]
async fn test_one_success_and_one_404_write_one_row() {
    let server = MockServer::start();
    mock_aapl(&server);
    let output = temp_path("mixed.xlsx");

    let (collected, path) = run_report(&config_for(&server, output.clone()), &["AAPL", "NOPE"])
        .await
        .unwrap();

    assert_eq!(path, output);
    assert_eq!(collected.evaluations.len(), 1);
    assert_eq!(collected.evaluations[0].symbol, "AAPL");
    assert_eq!(collected.skipped.len(), 1);
    assert_eq!(collected.skipped[0].0, "NOPE");
    assert_eq!(collected.skipped[0].1.status(), Some(404));

    let sheet = read_part(&path, "xl/worksheets/sheet1.xml");
    assert_eq!(sheet.matches("<row ").count(), 2);
    let strings = read_part(&path, "xl/sharedStrings.xml");
    assert!(strings.contains("AAPL"));
    assert!(!strings.contains("NOPE"));

    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn test_rerun_replaces_output() {
    let server = MockServer::start();
    mock_aapl(&server);
    let output = temp_path("rerun.xlsx");
    let config = config_for(&server, output.clone());

    run_report(&config, &["AAPL"]).await.unwrap();
    run_report(&config, &["AAPL"]).await.unwrap();

    let workbook = read_part(&output, "xl/workbook.xml");
    assert_eq!(workbook.matches("<sheet ").count(), 1);
    let sheet = read_part(&output, "xl/worksheets/sheet1.xml");
    assert_eq!(sheet.matches("<row ").count(), 2);

    std::fs::remove_file(&output).ok();
}

#[tokio::test]
async fn test_abort_policy_writes_nothing() {
    let server = MockServer::start();
    mock_aapl(&server);
    let output = temp_path("abort.xlsx");
    let config = ReportConfig {
        failure_policy: FailurePolicy::Abort,
        ..config_for(&server, output.clone())
    };

    let result = run_report(&config, &["NOPE", "AAPL"]).await;

    assert!(matches!(
        result,
        Err(ReportError::Data(DataError::Status { status: 404, .. }))
    ));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_csv_report_carries_ratio() {
    let server = MockServer::start();
    mock_aapl(&server);
    let output = temp_path("rows.csv");
    let config = ReportConfig {
        format: ExportFormat::Csv,
        ..config_for(&server, output.clone())
    };

    run_report(&config, &["aapl"]).await.unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("P/E ratio"));
    assert!(lines[1].starts_with("AAPL,2024-09-28,227.79,"));
    assert!(lines[1].contains(",6.11,37.28"));
    assert!(lines[1].contains(",171.21,6.16,27.79"));

    std::fs::remove_file(&output).ok();
}
