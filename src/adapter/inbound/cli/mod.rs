//! CLI module graph and command dispatch.

pub mod admin;
pub mod auth;
pub mod command;
pub mod config;
pub mod context;
pub mod diagnostic;
pub mod market;
pub mod output;
pub mod paths;
pub mod portfolio;
pub mod settings;

use command::{Cli, ColorChoice, Commands, ConfigCommand};
use context::Context;

/// Apply global flags to the output layer.
pub fn configure_output(cli: &Cli) {
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(output::OutputConfig::new(cli.json, cli.quiet, cli.verbose));
}

/// Run one parsed command line.
///
/// # Errors
///
/// Returns a rendered diagnostic for any failure.
pub async fn run(cli: Cli) -> miette::Result<()> {
    configure_output(&cli);

    if let Commands::Config(command) = &cli.command {
        return match command {
            ConfigCommand::Init(args) => {
                config::execute_init(&cli.config, args.force).map_err(diagnostic::report)
            }
            ConfigCommand::Show => config::execute_show(&cli.config),
            ConfigCommand::Validate => config::execute_validate(&cli.config),
        };
    }

    let route = match cli.command {
        Commands::Auth(_) => Context::sign_in_route(),
        _ => "/",
    };
    let ctx = Context::connect(&cli.config, route)?;

    let result = match cli.command {
        Commands::Auth(command) => auth::execute(&ctx, command).await,
        Commands::Profile(command) => auth::execute_profile(&ctx, command).await,
        Commands::Roles => auth::execute_roles(&ctx).await,
        Commands::Signals(command) => market::execute_signals(&ctx, command).await,
        Commands::Picks(command) => market::execute_picks(&ctx, command).await,
        Commands::Portfolio(command) => portfolio::execute(&ctx, command).await,
        Commands::Watchlist(command) => portfolio::execute_watchlist(&ctx, command).await,
        Commands::Settings(command) => settings::execute(&ctx, command).await,
        Commands::Admin(command) => admin::execute(&ctx, command).await,
        Commands::Config(_) => Ok(()),
    };
    ctx.finish().await;
    result.map_err(diagnostic::report)
}
