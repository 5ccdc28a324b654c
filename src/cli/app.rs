//! Interactive mode
//!
//! Walks the views the way a browser session would: every transition goes
//! through the router, so the guard decides which view is actually entered.

use std::sync::Arc;

use colored::Colorize;
use dialoguer::{Select, theme::ColorfulTheme};
use log::debug;

use crate::cli::auth::{RegisterFields, fill_login_form, fill_register_form};
use crate::cli::prompt::{self, TerminalConfirm};
use crate::cli::student::{fill_form, load, print_students, report_submit};
use crate::cli::{CommandContext, StudentFields};
use crate::error::{Error, Result};
use crate::output::popup;
use crate::router::Route;
use crate::views::{DeleteOutcome, StudentListView, SubmitOutcome};

fn choose(prompt: &str, items: &[&str]) -> Result<Option<usize>> {
    Ok(Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()?)
}

/// Run the interactive loop until the user quits
pub async fn run(ctx: &CommandContext, start: Option<&str>) -> Result<()> {
    let mut route = match start {
        Some(path) => ctx.router.navigate_to_path(path),
        None => ctx.enter(Route::DEFAULT),
    };

    loop {
        debug!("Interactive view: {}", ctx.router.current());
        let next = match route {
            Route::Home => home(ctx)?,
            Route::Login => login(ctx).await?,
            Route::Register => register(ctx).await?,
            Route::Students | Route::StudentsCreate => students(ctx, route).await?,
        };

        match next {
            Some(next) => route = next,
            None => return Ok(()),
        }
    }
}

fn home(ctx: &CommandContext) -> Result<Option<Route>> {
    println!("\n{}", "Gestion des étudiants".bold());
    let view = ctx.home_view();

    Ok(match choose("Accueil", &["Se connecter", "S'inscrire", "Quitter"])? {
        Some(0) => Some(view.go_to_login()),
        Some(1) => Some(view.go_to_register()),
        _ => None,
    })
}

async fn login(ctx: &CommandContext) -> Result<Option<Route>> {
    let mut view = ctx.login_view();

    loop {
        fill_login_form(&mut view.form, None, None)?;
        let outcome = view.submit().await;
        if outcome == SubmitOutcome::Invalid {
            eprintln!("{}", popup::render_field_messages(&view.field_messages()));
            continue;
        }

        if let Some(shown) = view.popup() {
            popup::print(shown, ctx.format)?;
        }
        if let Some(next) = view.dismiss_popup() {
            return Ok(Some(next));
        }

        match choose("Que faire ?", &["Réessayer", "Accueil"])? {
            Some(0) => view.reset(),
            Some(_) => return Ok(Some(ctx.enter(Route::Home))),
            None => return Ok(None),
        }
    }
}

async fn register(ctx: &CommandContext) -> Result<Option<Route>> {
    let mut view = ctx.register_view();

    loop {
        fill_register_form(&mut view.form, RegisterFields::default())?;
        let outcome = view.submit().await;
        if outcome == SubmitOutcome::Invalid {
            eprintln!("{}", popup::render_field_messages(&view.field_messages()));
            continue;
        }

        if let Some(shown) = view.popup() {
            popup::print(shown, ctx.format)?;
        }
        if let Some(next) = view.dismiss_popup() {
            return Ok(Some(next));
        }

        match choose("Que faire ?", &["Réessayer", "Accueil"])? {
            Some(0) => {}
            Some(_) => return Ok(Some(view.go_home())),
            None => return Ok(None),
        }
    }
}

async fn students(ctx: &CommandContext, route: Route) -> Result<Option<Route>> {
    let mut view = ctx.student_view(Arc::new(TerminalConfirm));
    match load(&mut view, ctx.format).await {
        Ok(()) | Err(Error::Reported(_)) => {}
        Err(e) => return Err(e),
    }

    if route == Route::StudentsCreate {
        edit(&mut view, None).await?;
    }

    loop {
        print_students(view.students(), ctx.format)?;

        let action = choose(
            "Étudiants",
            &[
                "Ajouter",
                "Modifier",
                "Supprimer",
                "Actualiser",
                "Se déconnecter",
                "Quitter",
            ],
        )?;

        match action {
            Some(0) => edit(&mut view, None).await?,
            Some(1) => {
                if let Some(id) = pick(&view, "Modifier")? {
                    edit(&mut view, Some(id)).await?;
                }
            }
            Some(2) => {
                if let Some(id) = pick(&view, "Supprimer")? {
                    match view.delete(id).await {
                        DeleteOutcome::Deleted => println!("{} Étudiant supprimé", "✓".green()),
                        DeleteOutcome::Failed => {
                            prompt::alert("Impossible de supprimer cet étudiant.")
                        }
                        DeleteOutcome::Cancelled | DeleteOutcome::Discarded => {}
                    }
                }
            }
            Some(3) => {
                if let Err(e) = load(&mut view, ctx.format).await {
                    debug!("Reload failed: {}", e);
                }
            }
            Some(4) => return Ok(Some(view.logout()?)),
            _ => {
                view.lifetime().end();
                return Ok(None);
            }
        }
    }
}

/// Select a listed student; returns its id
fn pick(view: &StudentListView, action: &str) -> Result<Option<i64>> {
    let labels: Vec<String> = view
        .students()
        .iter()
        .map(|s| format!("#{} {} <{}>", s.id, s.full_name(), s.email))
        .collect();
    if labels.is_empty() {
        println!("Aucun étudiant.");
        return Ok(None);
    }

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(action)
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(selection.map(|idx| view.students()[idx].id))
}

/// Open the modal (create, or edit `id`) and submit until it closes or the
/// user gives up
async fn edit(view: &mut StudentListView, id: Option<i64>) -> Result<()> {
    match id {
        Some(id) => {
            view.open_edit_by_id(id);
        }
        None => view.open_create(),
    }

    loop {
        fill_form(&mut view.form, StudentFields::default())?;
        let outcome = view.submit_modal().await;
        let done = if id.is_some() {
            "Étudiant mis à jour"
        } else {
            "Étudiant créé"
        };

        match report_submit(view, outcome, done) {
            Ok(()) => return Ok(()),
            Err(Error::Reported(_)) => {}
            Err(e) => return Err(e),
        }

        match choose("Que faire ?", &["Corriger", "Annuler"])? {
            Some(0) => {}
            _ => {
                view.close_modal();
                view.reset_form();
                return Ok(());
            }
        }
    }
}
