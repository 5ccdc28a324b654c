//! Login, register and logout commands

use std::sync::Arc;

use colored::Colorize;
use log::debug;

use crate::cli::{CommandContext, prompt, student};
use crate::error::{Error, Result};
use crate::output::popup;
use crate::router::Route;
use crate::views::{FixedAnswer, LoginForm, RegisterForm, SubmitOutcome};

/// Fill the login form from flags, prompting for what is missing
pub fn fill_login_form(
    form: &mut LoginForm,
    login: Option<String>,
    password: Option<String>,
) -> Result<()> {
    form.login = prompt::text("Identifiant", login, &form.login)?;
    form.password = prompt::secret("Mot de passe", password)?;
    Ok(())
}

/// Fill the registration form from flags, prompting for what is missing
pub fn fill_register_form(form: &mut RegisterForm, fields: RegisterFields) -> Result<()> {
    form.first_name = prompt::text("Prénom", fields.first_name, &form.first_name)?;
    form.last_name = prompt::text("Nom", fields.last_name, &form.last_name)?;
    form.login = prompt::text("Identifiant", fields.login, &form.login)?;
    form.password = prompt::secret("Mot de passe", fields.password)?;
    Ok(())
}

/// Registration values given on the command line
#[derive(Debug, Default)]
pub struct RegisterFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub login: Option<String>,
    pub password: Option<String>,
}

fn invalid(messages: &[(&str, &str)]) -> Error {
    eprintln!("{}", popup::render_field_messages(messages));
    Error::Reported("invalid form".to_string())
}

/// Run the login command; on success enter the student list and print it
pub async fn login(
    ctx: &CommandContext,
    login: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let mut view = ctx.login_view();
    fill_login_form(&mut view.form, login, password)?;

    let outcome = view.submit().await;
    if outcome == SubmitOutcome::Invalid {
        return Err(invalid(&view.field_messages()));
    }

    if let Some(shown) = view.popup() {
        popup::print(shown, ctx.format)?;
    }

    match view.dismiss_popup() {
        Some(Route::Students) => student::list(ctx).await,
        Some(_) => Ok(()),
        None if outcome == SubmitOutcome::Failed => {
            Err(Error::Reported("login failed".to_string()))
        }
        None => Ok(()),
    }
}

/// Run the register command
pub async fn register(ctx: &CommandContext, fields: RegisterFields) -> Result<()> {
    let mut view = ctx.register_view();
    fill_register_form(&mut view.form, fields)?;

    let outcome = view.submit().await;
    if outcome == SubmitOutcome::Invalid {
        return Err(invalid(&view.field_messages()));
    }

    if let Some(shown) = view.popup() {
        popup::print(shown, ctx.format)?;
    }

    match view.dismiss_popup() {
        Some(Route::Login) => {
            println!("\n  → Run {} to sign in", "rosterop login".cyan());
            Ok(())
        }
        _ if outcome == SubmitOutcome::Failed => {
            Err(Error::Reported("registration failed".to_string()))
        }
        _ => Ok(()),
    }
}

/// Run the logout command
pub fn logout(ctx: &CommandContext) -> Result<()> {
    let mut view = ctx.student_view(Arc::new(FixedAnswer(false)));
    let route = view.logout()?;
    println!("{} Signed out", "✓".green());
    debug!("Entered {}", route);
    Ok(())
}
