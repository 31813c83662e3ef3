//! Handlers for the `auth`, `profile` and `roles` commands.

use serde_json::json;

use super::command::{AuthCommand, LoginArgs, ProfileCommand, ProfileUpdateArgs, SignupArgs};
use super::context::{self, Context};
use super::output;
use crate::domain::auth::{AuthResponse, User, UserProfile};
use crate::domain::validation::{ForgotPasswordForm, LoginForm, ProfileForm, SignupForm};
use crate::error::Result;

pub async fn execute(ctx: &Context, command: AuthCommand) -> Result<()> {
    match command {
        AuthCommand::Login(args) => login(ctx, &args).await,
        AuthCommand::Signup(args) => signup(ctx, &args).await,
        AuthCommand::Logout => logout(ctx).await,
        AuthCommand::Whoami => whoami(ctx).await,
        AuthCommand::ForgotPassword(args) => forgot_password(ctx, &args.email).await,
        AuthCommand::Status => {
            status(ctx);
            Ok(())
        }
    }
}

async fn login(ctx: &Context, args: &LoginArgs) -> Result<()> {
    let password = context::read_secret(args.password_stdin, "Password")?;
    let request = LoginForm {
        email: args.email.clone(),
        password,
    }
    .validate()?;

    let pb = output::spinner("Signing in...");
    let response = match ctx.services.auth.login(&request).await {
        Ok(response) => response,
        Err(e) => {
            output::spinner_fail(&pb, "Sign-in failed");
            return Err(e);
        }
    };
    report_auth(&pb, "auth.login", &response, "Signed in")
}

async fn signup(ctx: &Context, args: &SignupArgs) -> Result<()> {
    let (password, confirm_password) = context::read_new_password(args.password_stdin)?;
    let request = SignupForm {
        email: args.email.clone(),
        password,
        confirm_password,
        name: args.name.clone(),
    }
    .validate()?;

    let pb = output::spinner("Creating account...");
    let response = match ctx.services.auth.register(&request).await {
        Ok(response) => response,
        Err(e) => {
            output::spinner_fail(&pb, "Sign-up failed");
            return Err(e);
        }
    };
    report_auth(&pb, "auth.signup", &response, "Account created")
}

/// Render an auth reply. A `success: false` reply is shown as a failure
/// without turning it into an error exit.
fn report_auth(
    pb: &indicatif::ProgressBar,
    command: &str,
    response: &AuthResponse,
    done: &str,
) -> Result<()> {
    if output::is_json() {
        output::spinner_clear(pb);
        output::command_json(
            command,
            &json!({
                "success": response.success,
                "user": response.user,
                "error": response.error,
            }),
        );
        return Ok(());
    }

    if !response.success {
        let reason = response.error.as_deref().unwrap_or("request was not accepted");
        output::spinner_fail(pb, reason);
        return Ok(());
    }

    output::spinner_success(pb, done);
    if let Some(user) = &response.user {
        show_user(user);
    }
    Ok(())
}

async fn logout(ctx: &Context) -> Result<()> {
    let result = ctx.services.auth.logout().await;
    if output::is_json() {
        output::command_json(
            "auth.logout",
            &json!({
                "cleared": true,
                "serverError": result.as_ref().err().map(ToString::to_string),
            }),
        );
        return Ok(());
    }

    output::success("Local session cleared");
    if let Err(e) = result {
        output::warning(&format!("Server did not confirm sign-out: {e}"));
    }
    Ok(())
}

async fn whoami(ctx: &Context) -> Result<()> {
    let pb = output::spinner("Fetching account...");
    let response = ctx.services.auth.current_user().await;
    output::spinner_clear(&pb);
    let response = response?;

    if output::is_json() {
        output::command_json("auth.whoami", &response);
        return Ok(());
    }
    match response.user.filter(|_| response.success) {
        Some(user) => show_user(&user),
        None => output::warning("The server did not return a user for this session"),
    }
    Ok(())
}

async fn forgot_password(ctx: &Context, email: &str) -> Result<()> {
    let request = ForgotPasswordForm {
        email: email.to_string(),
    }
    .validate()?;
    let response = ctx.services.auth.forgot_password(&request).await?;

    if output::is_json() {
        output::command_json("auth.forgot-password", &response);
        return Ok(());
    }
    output::success(&format!(
        "If an account exists for {}, a reset link is on its way",
        request.email
    ));
    Ok(())
}

fn status(ctx: &Context) {
    let client = &ctx.services.client;
    let signed_in = client.is_authenticated();

    if output::is_json() {
        output::command_json(
            "auth.status",
            &json!({
                "authenticated": signed_in,
                "baseUrl": client.base_url(),
                "sessionFile": ctx.config.session.resolved_path(),
                "persist": ctx.config.session.persist,
            }),
        );
        return;
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("API", client.base_url());
    if signed_in {
        output::success("Session token stored");
    } else {
        output::warning("Not signed in");
        output::hint("run `superpi auth login --email <address>`");
    }
    if let Some(path) = ctx.config.session.resolved_path().filter(|_| ctx.config.session.persist) {
        output::field("Session file", path.display());
    }
}

fn show_user(user: &User) {
    output::section("Account");
    output::field("Name", user.display_name());
    output::field("Email", &user.email);
    output::field("Id", output::muted(&user.id));
    if !user.roles.is_empty() {
        output::field("Roles", user.roles.join(", "));
    }
    if let Some(last) = &user.last_sign_in_at {
        output::field("Last sign-in", last);
    }
}

pub async fn execute_profile(ctx: &Context, command: ProfileCommand) -> Result<()> {
    match command {
        ProfileCommand::Show => {
            let profile = ctx.services.auth.profile().await?;
            if output::is_json() {
                output::command_json("profile.show", &profile);
            } else {
                show_profile(&profile);
            }
            Ok(())
        }
        ProfileCommand::Update(args) => update_profile(ctx, &args).await,
    }
}

async fn update_profile(ctx: &Context, args: &ProfileUpdateArgs) -> Result<()> {
    let update = ProfileForm {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        phone: args.phone.clone(),
    }
    .validate()?;

    let updated = ctx.services.auth.update_profile(&update).await?;
    if output::is_json() {
        output::command_json("profile.update", &updated);
        return Ok(());
    }
    output::success("Profile updated");
    show_profile(&updated.profile);
    Ok(())
}

fn show_profile(profile: &UserProfile) {
    output::section("Profile");
    output::field(
        "Name",
        format!("{} {}", profile.first_name, profile.last_name),
    );
    output::field("Email", &profile.email);
    output::field("Phone", profile.phone.as_deref().unwrap_or("-"));
    output::field("Updated", &profile.updated_at);
}

pub async fn execute_roles(ctx: &Context) -> Result<()> {
    let roles = ctx.services.auth.roles().await?;
    if output::is_json() {
        output::command_json("roles", &roles);
        return Ok(());
    }
    output::section("Roles");
    if roles.roles.is_empty() {
        output::note("(none)");
    }
    for role in &roles.roles {
        output::note(&format!("- {role}"));
    }
    if roles.is_admin {
        output::field("Admin", output::highlight("yes"));
    }
    Ok(())
}
