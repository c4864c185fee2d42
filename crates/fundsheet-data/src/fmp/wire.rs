//! Wire shapes of the two FMP endpoints.
//!
//! Both endpoints answer with a JSON array ordered newest period first.

use super::de::{de_f64, de_i64, de_string};
use serde::{Deserialize, Serialize};

/// One period from the `enterprise-values` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseValueEntry {
    /// Stock symbol
    #[serde(default, deserialize_with = "de_string")]
    pub symbol: String,
    /// Valuation date
    #[serde(default, deserialize_with = "de_string")]
    pub date: String,
    /// Share price at the valuation date
    #[serde(default, deserialize_with = "de_f64")]
    pub stock_price: f64,
    /// Shares outstanding
    #[serde(default, deserialize_with = "de_i64")]
    pub number_of_shares: i64,
    /// Market capitalization
    #[serde(default, deserialize_with = "de_i64")]
    pub market_capitalization: i64,
    /// Cash and equivalents subtracted from market cap
    #[serde(default, deserialize_with = "de_i64")]
    pub minus_cash_and_cash_equivalents: i64,
    /// Total debt added to market cap
    #[serde(default, deserialize_with = "de_i64")]
    pub add_total_debt: i64,
    /// Enterprise value
    #[serde(default, deserialize_with = "de_i64")]
    pub enterprise_value: i64,
}

/// One period from the `income-statement` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatementEntry {
    /// Statement date
    #[serde(default, deserialize_with = "de_string")]
    pub date: String,
    /// Stock symbol
    #[serde(default, deserialize_with = "de_string")]
    pub symbol: String,
    /// Reporting currency (e.g. "USD")
    #[serde(default, deserialize_with = "de_string")]
    pub reported_currency: String,
    /// SEC Central Index Key
    #[serde(default, deserialize_with = "de_string")]
    pub cik: String,
    /// Filing date
    #[serde(default, deserialize_with = "de_string")]
    pub filing_date: String,
    /// Acceptance timestamp
    #[serde(default, deserialize_with = "de_string")]
    pub accepted_date: String,
    /// Fiscal year
    #[serde(default, deserialize_with = "de_string")]
    pub fiscal_year: String,
    /// Fiscal period ("FY", "Q1", ...)
    #[serde(default, deserialize_with = "de_string")]
    pub period: String,
    /// Total revenue
    #[serde(default, deserialize_with = "de_i64")]
    pub revenue: i64,
    /// Cost of revenue
    #[serde(default, deserialize_with = "de_i64")]
    pub cost_of_revenue: i64,
    /// Gross profit
    #[serde(default, deserialize_with = "de_i64")]
    pub gross_profit: i64,
    /// Research and development expenses
    #[serde(default, deserialize_with = "de_i64")]
    pub research_and_development_expenses: i64,
    /// General and administrative expenses
    #[serde(default, deserialize_with = "de_i64")]
    pub general_and_administrative_expenses: i64,
    /// Selling and marketing expenses
    #[serde(default, deserialize_with = "de_i64")]
    pub selling_and_marketing_expenses: i64,
    /// Selling, general and administrative expenses
    #[serde(default, deserialize_with = "de_i64")]
    pub selling_general_and_administrative_expenses: i64,
    /// Other expenses
    #[serde(default, deserialize_with = "de_i64")]
    pub other_expenses: i64,
    /// Operating expenses
    #[serde(default, deserialize_with = "de_i64")]
    pub operating_expenses: i64,
    /// Cost and expenses
    #[serde(default, deserialize_with = "de_i64")]
    pub cost_and_expenses: i64,
    /// Net interest income
    #[serde(default, deserialize_with = "de_i64")]
    pub net_interest_income: i64,
    /// Interest income
    #[serde(default, deserialize_with = "de_i64")]
    pub interest_income: i64,
    /// Interest expense
    #[serde(default, deserialize_with = "de_i64")]
    pub interest_expense: i64,
    /// Depreciation and amortization
    #[serde(default, deserialize_with = "de_i64")]
    pub depreciation_and_amortization: i64,
    /// EBITDA
    #[serde(default, deserialize_with = "de_i64")]
    pub ebitda: i64,
    /// EBIT
    #[serde(default, deserialize_with = "de_i64")]
    pub ebit: i64,
    /// Non-operating income excluding interest
    #[serde(default, deserialize_with = "de_i64")]
    pub non_operating_income_excluding_interest: i64,
    /// Operating income
    #[serde(default, deserialize_with = "de_i64")]
    pub operating_income: i64,
    /// Total other income/expenses, net
    #[serde(default, deserialize_with = "de_i64")]
    pub total_other_income_expenses_net: i64,
    /// Income before tax
    #[serde(default, deserialize_with = "de_i64")]
    pub income_before_tax: i64,
    /// Income tax expense
    #[serde(default, deserialize_with = "de_i64")]
    pub income_tax_expense: i64,
    /// Net income from continuing operations
    #[serde(default, deserialize_with = "de_i64")]
    pub net_income_from_continuing_operations: i64,
    /// Net income from discontinued operations
    #[serde(default, deserialize_with = "de_i64")]
    pub net_income_from_discontinued_operations: i64,
    /// Other adjustments to net income
    #[serde(default, deserialize_with = "de_i64")]
    pub other_adjustments_to_net_income: i64,
    /// Net income
    #[serde(default, deserialize_with = "de_i64")]
    pub net_income: i64,
    /// Net income deductions
    #[serde(default, deserialize_with = "de_i64")]
    pub net_income_deductions: i64,
    /// Bottom line net income
    #[serde(default, deserialize_with = "de_i64")]
    pub bottom_line_net_income: i64,
    /// Basic earnings per share
    #[serde(default, deserialize_with = "de_f64")]
    pub eps: f64,
    /// Diluted earnings per share
    #[serde(default, deserialize_with = "de_f64")]
    pub eps_diluted: f64,
    /// Weighted average shares outstanding
    #[serde(default, deserialize_with = "de_i64")]
    pub weighted_average_shs_out: i64,
    /// Weighted average diluted shares outstanding
    #[serde(default, deserialize_with = "de_i64")]
    pub weighted_average_shs_out_dil: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTERPRISE_VALUES: &str = include_str!("../../tests/fixtures/enterprise_values_AAPL.json");
    const INCOME_STATEMENT: &str = include_str!("../../tests/fixtures/income_statement_AAPL.json");

    #[test]
    fn test_decode_enterprise_values() {
        let entries: Vec<EnterpriseValueEntry> = serde_json::from_str(ENTERPRISE_VALUES).unwrap();
        assert_eq!(entries.len(), 2);

        let latest = &entries[0];
        assert_eq!(latest.symbol, "AAPL");
        assert_eq!(latest.date, "2024-09-28");
        assert_eq!(latest.stock_price, 227.79);
        assert_eq!(latest.number_of_shares, 15_343_783_000);
        assert_eq!(latest.enterprise_value, 3_571_846_329_570);
        assert_eq!(entries[1].date, "2023-09-30");
    }

    #[test]
    fn test_decode_income_statement() {
        let entries: Vec<IncomeStatementEntry> = serde_json::from_str(INCOME_STATEMENT).unwrap();
        assert_eq!(entries.len(), 2);

        let latest = &entries[0];
        assert_eq!(latest.cik, "0000320193");
        assert_eq!(latest.fiscal_year, "2024");
        assert_eq!(latest.revenue, 391_035_000_000);
        assert_eq!(latest.net_income, 93_736_000_000);
        assert_eq!(latest.eps, 6.11);
        assert_eq!(latest.eps_diluted, 6.08);
        assert_eq!(entries[1].net_interest_income, -183_000_000);
    }

    #[test]
    fn test_sparse_entry_defaults_to_zero() {
        let entries: Vec<IncomeStatementEntry> =
            serde_json::from_str(r#"[{"symbol": "NEWCO", "eps": null, "fiscalYear": 2025}]"#)
                .unwrap();
        let entry = &entries[0];
        assert_eq!(entry.symbol, "NEWCO");
        assert_eq!(entry.fiscal_year, "2025");
        assert_eq!(entry.eps, 0.0);
        assert_eq!(entry.revenue, 0);
        assert!(entry.date.is_empty());
    }

    #[test]
    fn test_serializes_with_api_field_names() {
        let entry = EnterpriseValueEntry {
            symbol: "MSFT".to_string(),
            stock_price: 420.5,
            ..Default::default()
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"stockPrice\":420.5"));
        assert!(json.contains("\"numberOfShares\":0"));
    }
}
