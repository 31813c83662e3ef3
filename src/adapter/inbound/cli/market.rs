//! Handlers for the `signals` and `picks` commands.

use tabled::Tabled;

use super::command::{PickListArgs, PicksCommand, SignalListArgs, SignalsCommand};
use super::context::Context;
use super::output;
use crate::domain::signal::{Signal, SignalFilter, TradeAction};
use crate::domain::stock_pick::{StockPick, StockPickFilter};
use crate::domain::Pagination;
use crate::error::Result;

#[derive(Tabled)]
struct SignalRow {
    #[tabled(rename = "Stock")]
    stock: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Stop")]
    stop_loss: String,
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Profit")]
    profit: String,
}

impl From<&Signal> for SignalRow {
    fn from(signal: &Signal) -> Self {
        let action = match signal.action {
            TradeAction::Buy => output::positive(signal.action),
            TradeAction::Sell => output::negative(signal.action),
        };
        Self {
            stock: signal.stock.clone(),
            action,
            price: signal.price.to_string(),
            target: signal.target.to_string(),
            stop_loss: signal.stop_loss.to_string(),
            market: signal.market.to_string(),
            status: signal.status.to_string(),
            profit: signal.profit.map_or_else(|| "-".into(), output::signed),
        }
    }
}

#[derive(Tabled)]
struct PickRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Call")]
    recommendation: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Return")]
    potential_return: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
}

impl From<&StockPick> for PickRow {
    fn from(pick: &StockPick) -> Self {
        Self {
            symbol: pick.symbol.clone(),
            name: pick.name.clone(),
            recommendation: pick.recommendation.to_string(),
            current: pick.current_price.to_string(),
            target: pick.target_price.to_string(),
            potential_return: format!("{:.1}%", pick.potential_return),
            confidence: pick.confidence.to_string(),
        }
    }
}

pub(super) fn show_pagination(pagination: &Pagination) {
    output::note(&format!(
        "page {} of {} ({} items)",
        pagination.page, pagination.total_pages, pagination.total_items
    ));
}

pub async fn execute_signals(ctx: &Context, command: SignalsCommand) -> Result<()> {
    match command {
        SignalsCommand::List(args) => list_signals(ctx, &args).await,
        SignalsCommand::Stats => signal_stats(ctx).await,
    }
}

async fn list_signals(ctx: &Context, args: &SignalListArgs) -> Result<()> {
    let filter = SignalFilter {
        status: args.status.get(),
        market: args.market.get(),
        action: args.action.get(),
        page: args.page.page,
        page_size: args.page.page_size,
    };

    let pb = output::spinner("Loading signals...");
    let response = ctx.services.signals.list(&filter).await;
    output::spinner_clear(&pb);
    let response = response?;

    if output::is_json() {
        output::command_json("signals.list", &response);
        return Ok(());
    }

    output::section("Signals");
    if response.data.is_empty() {
        output::note("No signals match these filters");
        return Ok(());
    }
    output::table(response.data.iter().map(SignalRow::from));
    show_pagination(&response.pagination);
    Ok(())
}

async fn signal_stats(ctx: &Context) -> Result<()> {
    let stats = ctx.services.signals.statistics().await?;

    if output::is_json() {
        output::command_json("signals.stats", &stats);
        return Ok(());
    }

    output::section("Signal Statistics");
    output::field("Active", stats.active_signals);
    output::field("Today", output::signed(stats.today_profit));
    output::field("Win rate", format!("{:.1}%", stats.win_rate));
    output::field("Avg response", format!("{:.1}s", stats.avg_response_time));
    output::field("Total trades", stats.total_trades);
    Ok(())
}

pub async fn execute_picks(ctx: &Context, command: PicksCommand) -> Result<()> {
    match command {
        PicksCommand::List(args) => list_picks(ctx, &args).await,
    }
}

async fn list_picks(ctx: &Context, args: &PickListArgs) -> Result<()> {
    let filter = StockPickFilter {
        recommendation: args.recommendation.get(),
        confidence: args.confidence.get(),
        page: args.page.page,
        page_size: args.page.page_size,
    };

    let pb = output::spinner("Loading stock picks...");
    let response = ctx.services.stock_picks.list(&filter).await;
    output::spinner_clear(&pb);
    let response = response?;

    if output::is_json() {
        output::command_json("picks.list", &response);
        return Ok(());
    }

    output::section("Stock Picks");
    if response.data.is_empty() {
        output::note("No picks match these filters");
    } else {
        output::table(response.data.iter().map(PickRow::from));
        show_pagination(&response.pagination);
    }

    let summary = &response.summary;
    output::section("Summary");
    output::field("Picks", summary.total_picks);
    output::field(
        "Avg return",
        format!("{:.1}%", summary.avg_potential_return),
    );
    output::field("High confidence", summary.high_confidence_count);
    Ok(())
}
