//! Column layout shared by every output format.
//!
//! The header row and every data row are both driven by [`Column::ALL`], so
//! adding a column means adding one variant and its two match arms.

use crate::ratio::{current_pe, prior_pe};
use fundsheet_data::Evaluation;
use std::fmt;

/// One output column, in sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Stock symbol
    Symbol,
    /// Report date of the current period
    Date,
    /// Share price
    StockPrice,
    /// Shares outstanding
    NumberOfShares,
    /// Market capitalization
    MarketCapitalization,
    /// Total revenue
    Revenue,
    /// Net income
    NetIncome,
    /// Basic earnings per share
    Eps,
    /// Price / EPS
    PeRatio,
    /// Share price one period earlier
    PriorStockPrice,
    /// EPS one period earlier
    PriorEps,
    /// Prior price / prior EPS
    PriorPeRatio,
}

impl Column {
    /// Every column in sheet order.
    pub const ALL: [Self; 12] = [
        Self::Symbol,
        Self::Date,
        Self::StockPrice,
        Self::NumberOfShares,
        Self::MarketCapitalization,
        Self::Revenue,
        Self::NetIncome,
        Self::Eps,
        Self::PeRatio,
        Self::PriorStockPrice,
        Self::PriorEps,
        Self::PriorPeRatio,
    ];

    /// Header label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Symbol => "Symbol",
            Self::Date => "Date",
            Self::StockPrice => "StockPrice",
            Self::NumberOfShares => "NumberOfShares",
            Self::MarketCapitalization => "MarketCapitalization",
            Self::Revenue => "Revenue",
            Self::NetIncome => "NetIncome",
            Self::Eps => "Eps",
            Self::PeRatio => "P/E ratio",
            Self::PriorStockPrice => "PriorStockPrice",
            Self::PriorEps => "PriorEps",
            Self::PriorPeRatio => "Prior P/E ratio",
        }
    }

    /// Zero-based position in [`Column::ALL`].
    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|c| c == self)
            .unwrap_or_default()
    }

    /// Spreadsheet column letter (`A`, `B`, ... `Z`, `AA`, ...).
    pub fn letter(&self) -> String {
        column_letter(self.index())
    }

    /// For ratio columns, the (price, eps) columns they divide.
    pub const fn ratio_inputs(&self) -> Option<(Self, Self)> {
        match self {
            Self::PeRatio => Some((Self::StockPrice, Self::Eps)),
            Self::PriorPeRatio => Some((Self::PriorStockPrice, Self::PriorEps)),
            _ => None,
        }
    }

    /// Value of this column for one evaluation.
    pub fn cell(&self, evaluation: &Evaluation) -> CellValue {
        match self {
            Self::Symbol => CellValue::Text(evaluation.symbol.clone()),
            Self::Date => CellValue::Text(evaluation.date.clone()),
            Self::StockPrice => CellValue::Number(evaluation.market.stock_price),
            Self::NumberOfShares => CellValue::Integer(evaluation.market.number_of_shares),
            Self::MarketCapitalization => {
                CellValue::Integer(evaluation.market.market_capitalization)
            }
            Self::Revenue => CellValue::Integer(evaluation.income.revenue),
            Self::NetIncome => CellValue::Integer(evaluation.income.net_income),
            Self::Eps => CellValue::Number(evaluation.income.eps),
            Self::PeRatio => current_pe(evaluation).into(),
            Self::PriorStockPrice => evaluation.prior_stock_price.into(),
            Self::PriorEps => evaluation.prior_eps.into(),
            Self::PriorPeRatio => prior_pe(evaluation).into(),
        }
    }

    /// Guarded division formula for a ratio column on a zero-based sheet row.
    ///
    /// Yields an empty string instead of a made-up ratio when the price is
    /// blank, or instead of `#DIV/0!` when EPS is blank or zero.
    pub fn formula(&self, row: u32) -> Option<String> {
        let (price, eps) = self.ratio_inputs()?;
        let r = row + 1;
        let p = format!("{}{}", price.letter(), r);
        let e = format!("{}{}", eps.letter(), r);
        Some(format!("=IF(OR({p}=\"\",{e}=\"\",{e}=0),\"\",{p}/{e})"))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Text cell
    Text(String),
    /// Floating point cell
    Number(f64),
    /// Integer cell
    Integer(i64),
    /// Blank cell
    Empty,
}

impl CellValue {
    /// Numeric view of the cell, if it has one.
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Integer(i) => Some(*i as f64),
            Self::Text(_) | Self::Empty => None,
        }
    }

    /// Plain-text rendering used by CSV export; blank cells render empty.
    pub fn to_field(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Empty => String::new(),
        }
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Empty, Self::Number)
    }
}

/// Header labels in column order.
pub fn header() -> Vec<&'static str> {
    Column::ALL.iter().map(Column::label).collect()
}

/// One row of cells per evaluation, in column order.
pub fn rows(evaluations: &[Evaluation]) -> Vec<Vec<CellValue>> {
    evaluations
        .iter()
        .map(|e| Column::ALL.iter().map(|c| c.cell(e)).collect())
        .collect()
}

/// Bijective base-26 column name for a zero-based index.
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}
