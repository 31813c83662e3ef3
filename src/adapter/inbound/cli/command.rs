//! Command-line interface definitions.
//!
//! Defines the CLI structure for the superpi client using `clap`. Each
//! command group maps onto one backend area: authentication, signals,
//! stock picks, portfolio, settings and the admin console.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};

use super::paths;
use crate::domain::parse_filter;
use crate::domain::portfolio::TradeMarket;
use crate::domain::signal::{SignalMarket, SignalStatus, TradeAction};
use crate::domain::stock_pick::{Confidence, Recommendation};

/// Trading-signal subscription client
#[derive(Parser, Debug)]
#[command(name = "superpi")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file.
    #[arg(short, long, global = true, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// A list filter where `all` means "do not filter".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filter<T>(pub Option<T>);

impl<T: Copy> Filter<T> {
    #[must_use]
    pub const fn get(&self) -> Option<T> {
        self.0
    }
}

/// clap value parser for [`Filter`].
fn filter<T>(value: &str) -> Result<Filter<T>, String>
where
    T: FromStr<Err = String>,
{
    parse_filter(value).map(Filter)
}

/// Top-level subcommands for the superpi CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in, sign up and manage the local session
    #[command(subcommand)]
    Auth(AuthCommand),

    /// View or edit your profile
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Show the roles granted to the signed-in user
    Roles,

    /// Browse trading signals
    #[command(subcommand)]
    Signals(SignalsCommand),

    /// Browse stock picks
    #[command(subcommand)]
    Picks(PicksCommand),

    /// Trade history and performance
    #[command(subcommand)]
    Portfolio(PortfolioCommand),

    /// Manage the watchlist
    #[command(subcommand)]
    Watchlist(WatchlistCommand),

    /// Notification and market preferences
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Admin console
    #[command(subcommand)]
    Admin(AdminCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `superpi auth`.
#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Sign in and store the session token.
    Login(LoginArgs),
    /// Create an account.
    Signup(SignupArgs),
    /// Sign out and forget the stored token.
    Logout,
    /// Show the user the server associates with the stored token.
    Whoami,
    /// Request a password reset email.
    ForgotPassword(EmailArg),
    /// Show whether a session token is stored locally.
    Status,
}

/// Arguments for `auth login`.
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email address.
    #[arg(long)]
    pub email: String,

    /// Read the password from stdin instead of prompting.
    #[arg(long)]
    pub password_stdin: bool,
}

/// Arguments for `auth signup`.
#[derive(Args, Debug)]
pub struct SignupArgs {
    /// Account email address.
    #[arg(long)]
    pub email: String,

    /// Full name; the first word becomes the first name.
    #[arg(long)]
    pub name: Option<String>,

    /// Read the password from stdin instead of prompting.
    #[arg(long)]
    pub password_stdin: bool,
}

#[derive(Args, Debug)]
pub struct EmailArg {
    /// Account email address.
    #[arg(long)]
    pub email: String,
}

/// Subcommands for `superpi profile`.
#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Display the profile.
    Show,
    /// Replace name and phone.
    Update(ProfileUpdateArgs),
}

#[derive(Args, Debug)]
pub struct ProfileUpdateArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    /// International phone number; omit to leave unset.
    #[arg(long)]
    pub phone: Option<String>,
}

/// Page selection shared by list commands.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct PageArgs {
    /// Page number (1-based).
    #[arg(long)]
    pub page: Option<u32>,

    /// Items per page.
    #[arg(long)]
    pub page_size: Option<u32>,
}

/// Subcommands for `superpi signals`.
#[derive(Subcommand, Debug)]
pub enum SignalsCommand {
    /// List signals.
    List(SignalListArgs),
    /// Show signal statistics.
    Stats,
}

#[derive(Args, Debug)]
pub struct SignalListArgs {
    /// active, completed, stopped or all.
    #[arg(long, default_value = "all", value_parser = filter::<SignalStatus>)]
    pub status: Filter<SignalStatus>,

    /// India, US or all.
    #[arg(long, default_value = "all", value_parser = filter::<SignalMarket>)]
    pub market: Filter<SignalMarket>,

    /// BUY, SELL or all.
    #[arg(long, default_value = "all", value_parser = filter::<TradeAction>)]
    pub action: Filter<TradeAction>,

    #[command(flatten)]
    pub page: PageArgs,
}

/// Subcommands for `superpi picks`.
#[derive(Subcommand, Debug)]
pub enum PicksCommand {
    /// List stock picks.
    List(PickListArgs),
}

#[derive(Args, Debug)]
pub struct PickListArgs {
    /// Buy, Sell, Hold or all.
    #[arg(long, default_value = "all", value_parser = filter::<Recommendation>)]
    pub recommendation: Filter<Recommendation>,

    /// High, Medium, Low or all.
    #[arg(long, default_value = "all", value_parser = filter::<Confidence>)]
    pub confidence: Filter<Confidence>,

    #[command(flatten)]
    pub page: PageArgs,
}

/// Subcommands for `superpi portfolio`.
#[derive(Subcommand, Debug)]
pub enum PortfolioCommand {
    /// List closed trades.
    Trades(TradeListArgs),
    /// Show portfolio performance.
    Performance,
}

#[derive(Args, Debug)]
pub struct TradeListArgs {
    /// INR, USD or all.
    #[arg(long, default_value = "all", value_parser = filter::<TradeMarket>)]
    pub market: Filter<TradeMarket>,

    /// Earliest trade date (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<String>,

    /// Latest trade date (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

/// Subcommands for `superpi watchlist`.
#[derive(Subcommand, Debug)]
pub enum WatchlistCommand {
    /// List watched symbols.
    List,
    /// Watch a symbol.
    Add(WatchlistAddArgs),
    /// Stop watching an item.
    Remove(IdArg),
}

#[derive(Args, Debug)]
pub struct WatchlistAddArgs {
    #[arg(long)]
    pub symbol: String,

    /// Company name.
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub market: String,
}

#[derive(Args, Debug)]
pub struct IdArg {
    /// Item identifier.
    pub id: String,
}

/// Subcommands for `superpi settings`.
#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Display current preferences.
    Show,
    /// Change one or more preferences.
    Update(SettingsUpdateArgs),
}

#[derive(Args, Debug, Default)]
pub struct SettingsUpdateArgs {
    #[arg(long)]
    pub push: Option<bool>,

    #[arg(long)]
    pub email: Option<bool>,

    #[arg(long)]
    pub sms: Option<bool>,

    #[arg(long)]
    pub weekend: Option<bool>,

    #[arg(long)]
    pub india: Option<bool>,

    #[arg(long)]
    pub us: Option<bool>,
}

/// Subcommands for `superpi admin`.
#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Application and email settings
    #[command(subcommand)]
    Settings(AdminSettingsCommand),

    /// Security policy
    #[command(subcommand)]
    Security(SecurityCommand),

    /// IP whitelist
    #[command(subcommand)]
    Ip(IpCommand),

    /// User management
    #[command(subcommand)]
    Users(UsersCommand),

    /// Browse the admin audit log.
    AuditLogs(AuditLogArgs),
}

#[derive(Subcommand, Debug)]
pub enum AdminSettingsCommand {
    /// Display all admin settings.
    Show,
    /// Update application settings.
    App(AppSettingsArgs),
    /// Update outgoing email configuration.
    Email(EmailConfigArgs),
}

#[derive(Args, Debug)]
pub struct AppSettingsArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Put the application into maintenance mode.
    #[arg(long)]
    pub maintenance: bool,

    /// Enforce API rate limits.
    #[arg(long)]
    pub rate_limiting: bool,
}

#[derive(Args, Debug)]
pub struct EmailConfigArgs {
    #[arg(long)]
    pub smtp_host: String,

    #[arg(long, allow_negative_numbers = true)]
    pub smtp_port: i64,

    #[arg(long)]
    pub smtp_username: Option<String>,

    /// Read the SMTP password from stdin.
    #[arg(long)]
    pub password_stdin: bool,

    #[arg(long)]
    pub from_email: String,

    /// Send email notifications to users.
    #[arg(long)]
    pub notifications: bool,
}

#[derive(Subcommand, Debug)]
pub enum SecurityCommand {
    /// Display the security policy.
    Show,
    /// Change one or more policy switches.
    Update(SecurityUpdateArgs),
}

#[derive(Args, Debug, Default)]
pub struct SecurityUpdateArgs {
    #[arg(long)]
    pub two_factor: Option<bool>,

    #[arg(long)]
    pub email_verification: Option<bool>,

    #[arg(long)]
    pub strong_password: Option<bool>,

    /// Session timeout in minutes.
    #[arg(long)]
    pub session_timeout: Option<u32>,

    #[arg(long)]
    pub remember_me: Option<bool>,

    #[arg(long)]
    pub rbac: Option<bool>,

    #[arg(long)]
    pub ip_whitelist: Option<bool>,
}

#[derive(Subcommand, Debug)]
pub enum IpCommand {
    /// List whitelisted addresses.
    List,
    /// Whitelist an IPv4 address.
    Add(IpAddArgs),
    /// Remove a whitelist entry.
    Remove(IdArg),
}

#[derive(Args, Debug)]
pub struct IpAddArgs {
    #[arg(long)]
    pub ip: String,

    #[arg(long, default_value = "")]
    pub description: String,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List users.
    List(UserListArgs),
    /// Replace a user's roles.
    Roles(UserRolesArgs),
}

#[derive(Args, Debug)]
pub struct UserListArgs {
    #[arg(long)]
    pub role: Option<String>,

    /// Match against name or email.
    #[arg(long)]
    pub search: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug)]
pub struct UserRolesArgs {
    /// Target user identifier.
    pub user_id: String,

    /// Role to grant; repeat for several.
    #[arg(long = "role", required = true)]
    pub roles: Vec<String>,
}

#[derive(Args, Debug)]
pub struct AuditLogArgs {
    #[arg(long)]
    pub user_id: Option<String>,

    #[arg(long)]
    pub action: Option<String>,

    #[arg(long)]
    pub from: Option<String>,

    #[arg(long)]
    pub to: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

/// Subcommands for `superpi config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate a configuration file for correctness.
    Validate,
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_command_factory_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name_and_version() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "superpi");
        assert!(cmd.get_version().is_some());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["superpi", "signals", "stats", "--json", "-vv", "-q"]).unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Signals(SignalsCommand::Stats)
        ));
    }

    #[test]
    fn test_config_path_defaults_to_home() {
        let cli = Cli::try_parse_from(["superpi", "config", "show"]).unwrap();
        assert_eq!(cli.config, paths::default_config());

        let cli = Cli::try_parse_from(["superpi", "-c", "/tmp/x.toml", "config", "show"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("/tmp/x.toml"));
    }

    #[test]
    fn test_signal_filters_default_to_all() {
        let cli = Cli::try_parse_from(["superpi", "signals", "list"]).unwrap();
        let Commands::Signals(SignalsCommand::List(args)) = cli.command else {
            panic!("expected signals list");
        };
        assert_eq!(args.status.get(), None);
        assert_eq!(args.market.get(), None);
        assert_eq!(args.action.get(), None);
        assert_eq!(args.page.page, None);
    }

    #[test]
    fn test_signal_filters_parse_wire_values() {
        let cli = Cli::try_parse_from([
            "superpi",
            "signals",
            "list",
            "--status",
            "active",
            "--market",
            "us",
            "--action",
            "sell",
            "--page-size",
            "10",
        ])
        .unwrap();
        let Commands::Signals(SignalsCommand::List(args)) = cli.command else {
            panic!("expected signals list");
        };
        assert_eq!(args.status.get(), Some(SignalStatus::Active));
        assert_eq!(args.market.get(), Some(SignalMarket::Us));
        assert_eq!(args.action.get(), Some(TradeAction::Sell));
        assert_eq!(args.page.page_size, Some(10));
    }

    #[test]
    fn test_unknown_filter_value_is_rejected() {
        let result = Cli::try_parse_from(["superpi", "picks", "list", "--confidence", "huge"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_login_requires_email() {
        assert!(Cli::try_parse_from(["superpi", "auth", "login"]).is_err());

        let cli = Cli::try_parse_from([
            "superpi",
            "auth",
            "login",
            "--email",
            "jane@example.com",
            "--password-stdin",
        ])
        .unwrap();
        let Commands::Auth(AuthCommand::Login(args)) = cli.command else {
            panic!("expected auth login");
        };
        assert_eq!(args.email, "jane@example.com");
        assert!(args.password_stdin);
    }

    #[test]
    fn test_settings_update_takes_explicit_booleans() {
        let cli = Cli::try_parse_from([
            "superpi", "settings", "update", "--push", "true", "--sms", "false",
        ])
        .unwrap();
        let Commands::Settings(SettingsCommand::Update(args)) = cli.command else {
            panic!("expected settings update");
        };
        assert_eq!(args.push, Some(true));
        assert_eq!(args.sms, Some(false));
        assert_eq!(args.email, None);
    }

    #[test]
    fn test_user_roles_collects_repeated_flags() {
        let cli = Cli::try_parse_from([
            "superpi", "admin", "users", "roles", "u-7", "--role", "User", "--role", "Admin",
        ])
        .unwrap();
        let Commands::Admin(AdminCommand::Users(UsersCommand::Roles(args))) = cli.command else {
            panic!("expected admin users roles");
        };
        assert_eq!(args.user_id, "u-7");
        assert_eq!(args.roles, vec!["User", "Admin"]);
    }

    #[test]
    fn test_user_roles_requires_a_role() {
        assert!(Cli::try_parse_from(["superpi", "admin", "users", "roles", "u-7"]).is_err());
    }

    #[test]
    fn test_trade_filter_dates() {
        let cli = Cli::try_parse_from([
            "superpi",
            "portfolio",
            "trades",
            "--market",
            "INR",
            "--from",
            "2024-01-01",
        ])
        .unwrap();
        let Commands::Portfolio(PortfolioCommand::Trades(args)) = cli.command else {
            panic!("expected portfolio trades");
        };
        assert_eq!(args.market.get(), Some(TradeMarket::Inr));
        assert_eq!(args.from.as_deref(), Some("2024-01-01"));
        assert_eq!(args.to, None);
    }
}
