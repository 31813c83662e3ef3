//! Trade history, performance and watchlist.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::query::Query;
use super::response::Pagination;
use super::signal::TradeAction;
use super::wire::wire_enum;

wire_enum! {
    /// Currency market used to filter trades.
    pub enum TradeMarket {
        Inr => "INR",
        Usd => "USD",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub user_id: String,
    pub stock: String,
    pub market: String,
    pub action: TradeAction,
    #[serde(with = "rust_decimal::serde::float")]
    pub entry_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub exit_price: Decimal,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub profit: Decimal,
    pub profit_percentage: f64,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradesResponse {
    pub data: Vec<Trade>,
    pub pagination: Pagination,
}

/// Filters for `GET /portfolio/trades`. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeFilter {
    pub market: Option<TradeMarket>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl TradeFilter {
    #[must_use]
    pub fn to_path(&self) -> String {
        Query::new()
            .text("market", self.market.map(TradeMarket::as_str))
            .text("startDate", self.start_date.as_deref())
            .text("endDate", self.end_date.as_deref())
            .number("page", self.page)
            .number("pageSize", self.page_size)
            .into_path("/portfolio/trades")
    }
}

/// Initial capital per currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialInvestment {
    #[serde(rename = "INR", with = "rust_decimal::serde::float")]
    pub inr: Decimal,
    #[serde(rename = "USD", with = "rust_decimal::serde::float")]
    pub usd: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPerformance {
    #[serde(with = "rust_decimal::serde::float")]
    pub current_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_profit: Decimal,
    pub total_profit_percentage: f64,
    pub win_rate: f64,
    pub winning_trades: u32,
    pub losing_trades: u32,
    pub total_trades: u32,
    pub initial_investment: InitialInvestment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub name: String,
    pub market: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistResponse {
    pub data: Vec<WatchlistItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToWatchlistRequest {
    pub symbol: String,
    pub name: String,
    pub market: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistAdded {
    pub success: bool,
    pub watchlist_item: WatchlistItem,
}
