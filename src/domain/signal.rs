//! Trading signals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::query::Query;
use super::response::Pagination;
use super::wire::wire_enum;

wire_enum! {
    /// Direction of a signal or trade.
    pub enum TradeAction {
        Buy => "BUY",
        Sell => "SELL",
    }
}

wire_enum! {
    /// Market a signal belongs to.
    pub enum SignalMarket {
        India => "India",
        Us => "US",
    }
}

wire_enum! {
    /// Lifecycle state of a signal.
    pub enum SignalStatus {
        Active => "active",
        Completed => "completed",
        Stopped => "stopped",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub id: String,
    pub stock: String,
    pub action: TradeAction,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub target: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub stop_loss: Decimal,
    pub market: SignalMarket,
    pub status: SignalStatus,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub profit: Option<Decimal>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalsResponse {
    pub data: Vec<Signal>,
    pub pagination: Pagination,
}

/// Dashboard headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalStatistics {
    pub active_signals: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub today_profit: Decimal,
    pub win_rate: f64,
    pub avg_response_time: f64,
    pub total_trades: u64,
}

/// Filters for `GET /signals`. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalFilter {
    pub status: Option<SignalStatus>,
    pub market: Option<SignalMarket>,
    pub action: Option<TradeAction>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl SignalFilter {
    /// Request path including the query string.
    #[must_use]
    pub fn to_path(&self) -> String {
        Query::new()
            .text("status", self.status.map(SignalStatus::as_str))
            .text("market", self.market.map(SignalMarket::as_str))
            .text("action", self.action.map(TradeAction::as_str))
            .number("page", self.page)
            .number("pageSize", self.page_size)
            .into_path("/signals")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn filter_path_matches_wire_contract() {
        let filter = SignalFilter {
            status: Some(SignalStatus::Active),
            page_size: Some(10),
            ..Default::default()
        };
        assert_eq!(filter.to_path(), "/signals?status=active&pageSize=10");
    }

    #[test]
    fn full_filter_orders_params() {
        let filter = SignalFilter {
            status: Some(SignalStatus::Stopped),
            market: Some(SignalMarket::Us),
            action: Some(TradeAction::Sell),
            page: Some(2),
            page_size: Some(25),
        };
        assert_eq!(
            filter.to_path(),
            "/signals?status=stopped&market=US&action=SELL&page=2&pageSize=25"
        );
    }

    #[test]
    fn signal_deserializes_numbers_as_decimals() {
        let json = r#"{
            "id": "sig-1",
            "stock": "RELIANCE",
            "action": "BUY",
            "price": 2450.5,
            "target": 2600,
            "stopLoss": 2400.25,
            "market": "India",
            "status": "completed",
            "profit": 149.5,
            "createdAt": "2024-03-01T09:15:00Z",
            "completedAt": "2024-03-04T15:30:00Z"
        }"#;

        let signal: Signal = serde_json::from_str(json).unwrap();
        assert_eq!(signal.price, dec!(2450.5));
        assert_eq!(signal.stop_loss, dec!(2400.25));
        assert_eq!(signal.profit, Some(dec!(149.5)));
        assert_eq!(signal.market, SignalMarket::India);
    }

    #[test]
    fn open_signal_has_no_profit() {
        let json = r#"{
            "id": "sig-2", "stock": "AAPL", "action": "SELL",
            "price": 190, "target": 180, "stopLoss": 195,
            "market": "US", "status": "active", "createdAt": "2024-03-01T09:15:00Z"
        }"#;
        let signal: Signal = serde_json::from_str(json).unwrap();
        assert_eq!(signal.profit, None);
        assert_eq!(signal.completed_at, None);
    }
}
