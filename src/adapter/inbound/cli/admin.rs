//! Handlers for the `admin` command group.

use tabled::Tabled;

use super::command::{
    AdminCommand, AdminSettingsCommand, AppSettingsArgs, AuditLogArgs, EmailConfigArgs,
    IpAddArgs, IpCommand, SecurityCommand, SecurityUpdateArgs, UserListArgs, UserRolesArgs,
    UsersCommand,
};
use super::context::{self, Context};
use super::market::show_pagination;
use super::output;
use crate::domain::admin::{
    AdminUser, AuditLogEntry, AuditLogFilter, IpWhitelistEntry, SecuritySettings,
    UpdateSecuritySettingsRequest, UserFilter,
};
use crate::domain::validation::{AppSettingsForm, EmailConfigForm, IpWhitelistForm};
use crate::error::Result;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Roles")]
    roles: String,
    #[tabled(rename = "Last sign-in")]
    last_sign_in: String,
}

impl From<&AdminUser> for UserRow {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id.clone(),
            name: format!("{} {}", user.first_name, user.last_name),
            email: user.email.clone(),
            roles: user.roles.join(", "),
            last_sign_in: user.last_sign_in_at.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

#[derive(Tabled)]
struct IpRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Added by")]
    created_by: String,
}

impl From<&IpWhitelistEntry> for IpRow {
    fn from(entry: &IpWhitelistEntry) -> Self {
        Self {
            id: entry.id.clone(),
            address: entry.ip_address.clone(),
            description: entry.description.clone(),
            created_by: entry.created_by.clone(),
        }
    }
}

#[derive(Tabled)]
struct AuditRow {
    #[tabled(rename = "When")]
    at: String,
    #[tabled(rename = "Admin")]
    admin: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Entity")]
    entity: String,
    #[tabled(rename = "IP")]
    ip: String,
}

impl From<&AuditLogEntry> for AuditRow {
    fn from(entry: &AuditLogEntry) -> Self {
        Self {
            at: entry.created_at.clone(),
            admin: entry.admin_user_id.clone(),
            action: entry.action.clone(),
            entity: format!("{}:{}", entry.entity_type, entry.entity_id),
            ip: entry.ip_address.clone(),
        }
    }
}

pub async fn execute(ctx: &Context, command: AdminCommand) -> Result<()> {
    match command {
        AdminCommand::Settings(cmd) => settings(ctx, cmd).await,
        AdminCommand::Security(cmd) => security(ctx, cmd).await,
        AdminCommand::Ip(cmd) => ip(ctx, cmd).await,
        AdminCommand::Users(cmd) => users(ctx, cmd).await,
        AdminCommand::AuditLogs(args) => audit_logs(ctx, args).await,
    }
}

async fn settings(ctx: &Context, command: AdminSettingsCommand) -> Result<()> {
    match command {
        AdminSettingsCommand::Show => show_settings(ctx).await,
        AdminSettingsCommand::App(args) => update_app(ctx, &args).await,
        AdminSettingsCommand::Email(args) => update_email(ctx, &args).await,
    }
}

async fn show_settings(ctx: &Context) -> Result<()> {
    let settings = ctx.services.admin.settings().await?;
    if output::is_json() {
        output::command_json("admin.settings.show", &settings);
        return Ok(());
    }

    let app = &settings.app_settings;
    output::section("Application");
    output::field("Name", &app.app_name);
    output::field("Description", &app.app_description);
    output::field("Maintenance", output::yes_no(app.maintenance_mode));
    output::field("Rate limiting", output::yes_no(app.api_rate_limiting_enabled));

    let email = &settings.email_config;
    output::section("Email");
    output::field("SMTP", format!("{}:{}", email.smtp_host, email.smtp_port));
    output::field("From", &email.from_email);
    output::field("Enabled", output::yes_no(email.email_notifications_enabled));

    let api = &settings.api_config;
    output::section("API");
    output::field("Endpoint", &api.azure_endpoint);
    output::field("Version", &api.api_version);
    output::field(
        "Rate limit",
        format!(
            "{} requests / {} min",
            api.rate_limit_requests, api.rate_limit_window_minutes
        ),
    );

    let notify = &settings.notification_config;
    output::section("Notifications");
    output::field("Email", output::yes_no(notify.email_enabled));
    output::field("Slack", output::yes_no(notify.slack_enabled));
    Ok(())
}

async fn update_app(ctx: &Context, args: &AppSettingsArgs) -> Result<()> {
    let update = AppSettingsForm {
        app_name: args.name.clone(),
        app_description: args.description.clone(),
        maintenance_mode: args.maintenance,
        api_rate_limiting_enabled: args.rate_limiting,
    }
    .validate()?;

    let updated = ctx.services.admin.update_app_settings(&update).await?;
    if output::is_json() {
        output::command_json("admin.settings.app", &updated);
        return Ok(());
    }
    output::success(&format!(
        "Application settings saved for {}",
        updated.settings.app_name
    ));
    if updated.settings.maintenance_mode {
        output::warning("Maintenance mode is on");
    }
    Ok(())
}

async fn update_email(ctx: &Context, args: &EmailConfigArgs) -> Result<()> {
    let smtp_password = if args.password_stdin {
        Some(context::read_secret(true, "SMTP password")?)
    } else {
        None
    };
    let update = EmailConfigForm {
        smtp_host: args.smtp_host.clone(),
        smtp_port: args.smtp_port,
        smtp_username: args.smtp_username.clone(),
        smtp_password,
        from_email: args.from_email.clone(),
        email_notifications_enabled: args.notifications,
    }
    .validate()?;

    let ack = ctx.services.admin.update_email_config(&update).await?;
    if output::is_json() {
        output::command_json("admin.settings.email", &ack);
        return Ok(());
    }
    output::success(ack.message.as_deref().unwrap_or("Email configuration saved"));
    Ok(())
}

async fn security(ctx: &Context, command: SecurityCommand) -> Result<()> {
    match command {
        SecurityCommand::Show => {
            let settings = ctx.services.admin.security_settings().await?;
            if output::is_json() {
                output::command_json("admin.security.show", &settings);
            } else {
                show_security(&settings);
            }
            Ok(())
        }
        SecurityCommand::Update(args) => {
            let update = security_request(&args);
            if update == UpdateSecuritySettingsRequest::default() {
                output::warning("Nothing to change");
                return Ok(());
            }
            let updated = ctx.services.admin.update_security_settings(&update).await?;
            if output::is_json() {
                output::command_json("admin.security.update", &updated);
            } else {
                output::success("Security policy updated");
                show_security(&updated.settings);
            }
            Ok(())
        }
    }
}

fn security_request(args: &SecurityUpdateArgs) -> UpdateSecuritySettingsRequest {
    UpdateSecuritySettingsRequest {
        two_factor_required: args.two_factor,
        email_verification_required: args.email_verification,
        strong_password_required: args.strong_password,
        session_timeout_minutes: args.session_timeout,
        remember_me_enabled: args.remember_me,
        rbac_enabled: args.rbac,
        ip_whitelist_enabled: args.ip_whitelist,
    }
}

fn show_security(settings: &SecuritySettings) {
    output::section("Security");
    output::field("Two-factor", output::yes_no(settings.two_factor_required));
    output::field(
        "Email verify",
        output::yes_no(settings.email_verification_required),
    );
    output::field(
        "Strong passwd",
        output::yes_no(settings.strong_password_required),
    );
    output::field(
        "Session",
        format!("{} min", settings.session_timeout_minutes),
    );
    output::field("Remember me", output::yes_no(settings.remember_me_enabled));
    output::field("RBAC", output::yes_no(settings.rbac_enabled));
    output::field("IP whitelist", output::yes_no(settings.ip_whitelist_enabled));
}

async fn ip(ctx: &Context, command: IpCommand) -> Result<()> {
    match command {
        IpCommand::List => {
            let list = ctx.services.admin.ip_whitelist().await?;
            if output::is_json() {
                output::command_json("admin.ip.list", &list);
                return Ok(());
            }
            output::section("IP Whitelist");
            if list.data.is_empty() {
                output::note("No addresses whitelisted");
            } else {
                output::table(list.data.iter().map(IpRow::from));
            }
            Ok(())
        }
        IpCommand::Add(args) => add_ip(ctx, &args).await,
        IpCommand::Remove(args) => {
            if !context::confirm(&format!("Remove whitelist entry {}?", args.id))? {
                output::note("Cancelled");
                return Ok(());
            }
            let ack = ctx.services.admin.remove_ip(&args.id).await?;
            if output::is_json() {
                output::command_json("admin.ip.remove", &ack);
            } else {
                output::success(ack.message.as_deref().unwrap_or("Entry removed"));
            }
            Ok(())
        }
    }
}

async fn add_ip(ctx: &Context, args: &IpAddArgs) -> Result<()> {
    let request = IpWhitelistForm {
        ip_address: args.ip.clone(),
        description: args.description.clone(),
    }
    .validate()?;

    let added = ctx.services.admin.add_ip(&request).await?;
    if output::is_json() {
        output::command_json("admin.ip.add", &added);
        return Ok(());
    }
    output::success(&format!(
        "Whitelisted {} ({})",
        added.entry.ip_address,
        output::muted(&added.entry.id)
    ));
    Ok(())
}

async fn users(ctx: &Context, command: UsersCommand) -> Result<()> {
    match command {
        UsersCommand::List(args) => list_users(ctx, args).await,
        UsersCommand::Roles(args) => update_roles(ctx, args).await,
    }
}

async fn list_users(ctx: &Context, args: UserListArgs) -> Result<()> {
    let filter = UserFilter {
        role: args.role,
        search: args.search,
        page: args.page.page,
        page_size: args.page.page_size,
    };

    let pb = output::spinner("Loading users...");
    let response = ctx.services.admin.users(&filter).await;
    output::spinner_clear(&pb);
    let response = response?;

    if output::is_json() {
        output::command_json("admin.users.list", &response);
        return Ok(());
    }
    output::section("Users");
    if response.data.is_empty() {
        output::note("No users match these filters");
        return Ok(());
    }
    output::table(response.data.iter().map(UserRow::from));
    show_pagination(&response.pagination);
    Ok(())
}

async fn update_roles(ctx: &Context, args: UserRolesArgs) -> Result<()> {
    let ack = ctx
        .services
        .admin
        .update_user_roles(&args.user_id, args.roles.clone())
        .await?;
    if output::is_json() {
        output::command_json("admin.users.roles", &ack);
        return Ok(());
    }
    output::success(&format!(
        "{} now has roles: {}",
        args.user_id,
        args.roles.join(", ")
    ));
    Ok(())
}

async fn audit_logs(ctx: &Context, args: AuditLogArgs) -> Result<()> {
    let filter = AuditLogFilter {
        user_id: args.user_id,
        action: args.action,
        start_date: args.from,
        end_date: args.to,
        page: args.page.page,
        page_size: args.page.page_size,
    };

    let pb = output::spinner("Loading audit log...");
    let response = ctx.services.admin.audit_logs(&filter).await;
    output::spinner_clear(&pb);
    let response = response?;

    if output::is_json() {
        output::command_json("admin.audit-logs", &response);
        return Ok(());
    }
    output::section("Audit Log");
    if response.data.is_empty() {
        output::note("No entries");
        return Ok(());
    }
    output::table(response.data.iter().map(AuditRow::from));
    show_pagination(&response.pagination);
    Ok(())
}
