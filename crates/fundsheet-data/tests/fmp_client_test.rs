//! Integration tests for the FMP client against a mock server.

use approx::assert_relative_eq;
use fundsheet_data::fmp::{EnterpriseValueEntry, FmpClient, IncomeStatementEntry};
use fundsheet_data::{DataError, Endpoint};
use httpmock::{Method::GET, MockServer};

const ENTERPRISE_VALUES: &str = include_str!("fixtures/enterprise_values_AAPL.json");
const INCOME_STATEMENT: &str = include_str!("fixtures/income_statement_AAPL.json");
const API_KEY: &str = "test-key";

fn client_for(server: &MockServer) -> FmpClient {
    FmpClient::builder(API_KEY)
        .base_url(server.base_url())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_fetches_and_merges_both_endpoints() {
    let server = MockServer::start();

    let values_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/enterprise-values")
            .query_param("symbol", "AAPL")
            .query_param("apikey", API_KEY)
            .query_param("limit", "2");
        then.status(200)
            .header("content-type", "application/json")
            .body(ENTERPRISE_VALUES);
    });
    let income_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/income-statement")
            .query_param("symbol", "AAPL")
            .query_param("apikey", API_KEY)
            .query_param("limit", "2");
        then.status(200)
            .header("content-type", "application/json")
            .body(INCOME_STATEMENT);
    });

    let client = client_for(&server);
    let eval = client.fetch_evaluation("AAPL", 2).await.unwrap();

    values_mock.assert();
    income_mock.assert();

    assert_eq!(eval.symbol, "AAPL");
    assert_eq!(eval.date, "2024-09-28");
    assert_relative_eq!(eval.market.stock_price, 227.79);
    assert_eq!(eval.market.number_of_shares, 15_343_783_000);
    assert_eq!(eval.income.net_income, 93_736_000_000);
    assert_relative_eq!(eval.income.eps, 6.11);
    assert_eq!(eval.prior_stock_price, Some(171.21));
    assert_eq!(eval.prior_eps, Some(6.16));
}

#[tokio::test]
async fn test_single_period_has_no_prior() {
    let server = MockServer::start();
    let values: Vec<EnterpriseValueEntry> = serde_json::from_str(ENTERPRISE_VALUES).unwrap();
    let statements: Vec<IncomeStatementEntry> = serde_json::from_str(INCOME_STATEMENT).unwrap();

    server.mock(|when, then| {
        when.method(GET)
            .path("/enterprise-values")
            .query_param("limit", "1");
        then.status(200)
            .header("content-type", "application/json")
            .body(serde_json::to_string(&values[..1]).unwrap());
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/income-statement")
            .query_param("limit", "1");
        then.status(200)
            .header("content-type", "application/json")
            .body(serde_json::to_string(&statements[..1]).unwrap());
    });

    let eval = client_for(&server)
        .fetch_evaluation("AAPL", 1)
        .await
        .unwrap();
    assert!(!eval.has_prior());
    assert_relative_eq!(eval.income.eps, 6.11);
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/enterprise-values");
        then.status(404).body("Not Found");
    });

    let result = client_for(&server).fetch_evaluation("NOPE", 2).await;
    match result {
        Err(DataError::Status {
            endpoint,
            symbol,
            status,
        }) => {
            assert_eq!(endpoint, Endpoint::EnterpriseValues);
            assert_eq!(symbol, "NOPE");
            assert_eq!(status, 404);
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unauthorized_income_statement_is_reported() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/enterprise-values");
        then.status(200)
            .header("content-type", "application/json")
            .body(ENTERPRISE_VALUES);
    });
    server.mock(|when, then| {
        when.method(GET).path("/income-statement");
        then.status(401)
            .body(r#"{"Error Message": "Invalid API KEY."}"#);
    });

    let err = client_for(&server)
        .fetch_evaluation("AAPL", 2)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/enterprise-values");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"Error Message": "Limit Reach"}"#);
    });

    let result = client_for(&server).fetch_evaluation("AAPL", 2).await;
    assert!(matches!(
        result,
        Err(DataError::Decode {
            endpoint: Endpoint::EnterpriseValues,
            ..
        })
    ));
}

#[tokio::test]
async fn test_empty_array_means_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/enterprise-values");
        then.status(200)
            .header("content-type", "application/json")
            .body("[]");
    });
    server.mock(|when, then| {
        when.method(GET).path("/income-statement");
        then.status(200)
            .header("content-type", "application/json")
            .body("[]");
    });

    let err = client_for(&server)
        .fetch_evaluation("ZZZZ", 2)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("ZZZZ"));
}

#[tokio::test]
async fn test_base_url_with_path_prefix() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/stable/income-statement");
        then.status(200)
            .header("content-type", "application/json")
            .body(INCOME_STATEMENT);
    });

    let client = FmpClient::builder(API_KEY)
        .base_url(server.url("/stable"))
        .build()
        .unwrap();
    let statements = client.income_statements("AAPL", 2).await.unwrap();

    mock.assert();
    assert_eq!(statements.len(), 2);
}
