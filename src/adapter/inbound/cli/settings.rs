//! Handler for the `settings` command group.

use super::command::{SettingsCommand, SettingsUpdateArgs};
use super::context::Context;
use super::output;
use crate::domain::settings::{UpdateSettingsRequest, UserSettings};
use crate::error::Result;

pub async fn execute(ctx: &Context, command: SettingsCommand) -> Result<()> {
    match command {
        SettingsCommand::Show => {
            let settings = ctx.services.settings.get().await?;
            if output::is_json() {
                output::command_json("settings.show", &settings);
            } else {
                show(&settings);
            }
            Ok(())
        }
        SettingsCommand::Update(args) => update(ctx, &args).await,
    }
}

fn to_request(args: &SettingsUpdateArgs) -> UpdateSettingsRequest {
    UpdateSettingsRequest {
        push_notifications: args.push,
        email_notifications: args.email,
        sms_alerts: args.sms,
        weekend_notifications: args.weekend,
        india_market_enabled: args.india,
        us_market_enabled: args.us,
    }
}

async fn update(ctx: &Context, args: &SettingsUpdateArgs) -> Result<()> {
    let request = to_request(args);
    if request.is_empty() {
        output::warning("Nothing to change");
        output::hint("pass at least one of --push, --email, --sms, --weekend, --india, --us");
        return Ok(());
    }

    let updated = ctx.services.settings.update(&request).await?;
    if output::is_json() {
        output::command_json("settings.update", &updated);
        return Ok(());
    }
    output::success(&format!(
        "Updated {}",
        request.changed_fields().join(", ")
    ));
    show(&updated.settings);
    Ok(())
}

fn show(settings: &UserSettings) {
    output::section("Notifications");
    output::field("Push", output::yes_no(settings.push_notifications));
    output::field("Email", output::yes_no(settings.email_notifications));
    output::field("SMS", output::yes_no(settings.sms_alerts));
    output::field("Weekends", output::yes_no(settings.weekend_notifications));
    output::section("Markets");
    output::field("India", output::yes_no(settings.india_market_enabled));
    output::field("US", output::yes_no(settings.us_market_enabled));
}
