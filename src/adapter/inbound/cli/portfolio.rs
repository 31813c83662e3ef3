//! Handlers for the `portfolio` and `watchlist` commands.

use tabled::Tabled;

use super::command::{PortfolioCommand, TradeListArgs, WatchlistAddArgs, WatchlistCommand};
use super::context::{self, Context};
use super::market::show_pagination;
use super::output;
use crate::domain::portfolio::{AddToWatchlistRequest, Trade, TradeFilter, WatchlistItem};
use crate::error::Result;

#[derive(Tabled)]
struct TradeRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Stock")]
    stock: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Entry")]
    entry: String,
    #[tabled(rename = "Exit")]
    exit: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "%")]
    percent: String,
}

impl From<&Trade> for TradeRow {
    fn from(trade: &Trade) -> Self {
        Self {
            date: trade.created_at.chars().take(10).collect(),
            stock: trade.stock.clone(),
            action: trade.action.to_string(),
            quantity: trade.quantity,
            entry: format!("{} {}", trade.entry_price, trade.market),
            exit: trade.exit_price.to_string(),
            profit: output::signed(trade.profit),
            percent: format!("{:.2}", trade.profit_percentage),
        }
    }
}

#[derive(Tabled)]
struct WatchRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Market")]
    market: String,
}

impl From<&WatchlistItem> for WatchRow {
    fn from(item: &WatchlistItem) -> Self {
        Self {
            id: item.id.clone(),
            symbol: item.symbol.clone(),
            name: item.name.clone(),
            market: item.market.clone(),
        }
    }
}

pub async fn execute(ctx: &Context, command: PortfolioCommand) -> Result<()> {
    match command {
        PortfolioCommand::Trades(args) => trades(ctx, args).await,
        PortfolioCommand::Performance => performance(ctx).await,
    }
}

async fn trades(ctx: &Context, args: TradeListArgs) -> Result<()> {
    let filter = TradeFilter {
        market: args.market.get(),
        start_date: args.from,
        end_date: args.to,
        page: args.page.page,
        page_size: args.page.page_size,
    };

    let pb = output::spinner("Loading trades...");
    let response = ctx.services.portfolio.trades(&filter).await;
    output::spinner_clear(&pb);
    let response = response?;

    if output::is_json() {
        output::command_json("portfolio.trades", &response);
        return Ok(());
    }

    output::section("Trades");
    if response.data.is_empty() {
        output::note("No trades in this range");
        return Ok(());
    }
    output::table(response.data.iter().map(TradeRow::from));
    show_pagination(&response.pagination);
    Ok(())
}

async fn performance(ctx: &Context) -> Result<()> {
    let perf = ctx.services.portfolio.performance().await?;

    if output::is_json() {
        output::command_json("portfolio.performance", &perf);
        return Ok(());
    }

    output::section("Performance");
    output::field("Current value", perf.current_value);
    output::field(
        "Total profit",
        format!(
            "{} ({:.2}%)",
            output::signed(perf.total_profit),
            perf.total_profit_percentage
        ),
    );
    output::field("Win rate", format!("{:.1}%", perf.win_rate));
    output::field(
        "Trades",
        format!(
            "{} ({} won, {} lost)",
            perf.total_trades, perf.winning_trades, perf.losing_trades
        ),
    );
    output::section("Initial Investment");
    output::field("INR", perf.initial_investment.inr);
    output::field("USD", perf.initial_investment.usd);
    Ok(())
}

pub async fn execute_watchlist(ctx: &Context, command: WatchlistCommand) -> Result<()> {
    match command {
        WatchlistCommand::List => list_watchlist(ctx).await,
        WatchlistCommand::Add(args) => add(ctx, args).await,
        WatchlistCommand::Remove(args) => remove(ctx, &args.id).await,
    }
}

async fn list_watchlist(ctx: &Context) -> Result<()> {
    let response = ctx.services.portfolio.watchlist().await?;

    if output::is_json() {
        output::command_json("watchlist.list", &response);
        return Ok(());
    }

    output::section("Watchlist");
    if response.data.is_empty() {
        output::note("Nothing watched yet");
        output::hint("add a symbol with `superpi watchlist add --symbol TCS --name ... --market India`");
        return Ok(());
    }
    output::table(response.data.iter().map(WatchRow::from));
    Ok(())
}

async fn add(ctx: &Context, args: WatchlistAddArgs) -> Result<()> {
    let request = AddToWatchlistRequest {
        symbol: args.symbol.trim().to_uppercase(),
        name: args.name.trim().to_string(),
        market: args.market.trim().to_string(),
    };
    let added = ctx.services.portfolio.add_to_watchlist(&request).await?;

    if output::is_json() {
        output::command_json("watchlist.add", &added);
        return Ok(());
    }
    output::success(&format!(
        "Watching {} ({})",
        added.watchlist_item.symbol,
        output::muted(&added.watchlist_item.id)
    ));
    Ok(())
}

async fn remove(ctx: &Context, id: &str) -> Result<()> {
    if !context::confirm(&format!("Remove watchlist item {id}?"))? {
        output::note("Cancelled");
        return Ok(());
    }
    let ack = ctx.services.portfolio.remove_from_watchlist(id).await?;

    if output::is_json() {
        output::command_json("watchlist.remove", &ack);
        return Ok(());
    }
    output::success(ack.message.as_deref().unwrap_or("Removed from watchlist"));
    Ok(())
}
