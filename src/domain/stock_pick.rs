//! Curated stock picks.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::query::Query;
use super::response::Pagination;
use super::wire::wire_enum;

wire_enum! {
    pub enum Recommendation {
        Buy => "Buy",
        Sell => "Sell",
        Hold => "Hold",
    }
}

wire_enum! {
    pub enum Confidence {
        High => "High",
        Medium => "Medium",
        Low => "Low",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPick {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub market: String,
    pub recommendation: Recommendation,
    #[serde(with = "rust_decimal::serde::float")]
    pub target_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_price: Decimal,
    pub potential_return: f64,
    pub confidence: Confidence,
    pub reasoning: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPicksSummary {
    pub total_picks: u32,
    pub avg_potential_return: f64,
    pub high_confidence_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPicksResponse {
    pub data: Vec<StockPick>,
    pub pagination: Pagination,
    pub summary: StockPicksSummary,
}

/// Filters for `GET /stock-picks`. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockPickFilter {
    pub recommendation: Option<Recommendation>,
    pub confidence: Option<Confidence>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl StockPickFilter {
    #[must_use]
    pub fn to_path(&self) -> String {
        Query::new()
            .text(
                "recommendation",
                self.recommendation.map(Recommendation::as_str),
            )
            .text("confidence", self.confidence.map(Confidence::as_str))
            .number("page", self.page)
            .number("pageSize", self.page_size)
            .into_path("/stock-picks")
    }
}
