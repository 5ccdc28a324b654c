//! Student commands
//!
//! Every command enters the student list through the route guard first, so
//! without a stored session they fail with a login hint before any request.

use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use crate::cli::{CommandContext, OutputFormat, StudentFields, prompt};
use crate::client::models::Student;
use crate::error::{ApiError, Error, Result};
use crate::models::StudentDisplay;
use crate::output::{self, json, popup, table};
use crate::router::Route;
use crate::views::{DeleteOutcome, FixedAnswer, StudentForm, StudentListView, SubmitOutcome};

/// Enter `route` or fail with the guard's redirect
fn enter_guarded(ctx: &CommandContext, route: Route) -> Result<()> {
    let entered = ctx.enter(route);
    if entered != route {
        debug!("Guard redirected {} to {}", route, entered);
        return Err(ApiError::Unauthorized.into());
    }
    Ok(())
}

fn spinner(format: OutputFormat, message: &str) -> Option<ProgressBar> {
    if format == OutputFormat::Json {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

/// Activate the view (initial list load) behind a spinner
pub async fn load(view: &mut StudentListView, format: OutputFormat) -> Result<()> {
    let pb = spinner(format, "Chargement des étudiants...");
    view.activate().await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    match view.load_error() {
        Some(shown) => {
            popup::print(shown, format)?;
            Err(Error::Reported("student list unavailable".to_string()))
        }
        None => Ok(()),
    }
}

/// Print the loaded list in the requested format
pub fn print_students(students: &[Student], format: OutputFormat) -> Result<()> {
    let rows: Vec<StudentDisplay> = students.iter().map(StudentDisplay::from).collect();
    output::print(&rows, format)?;
    if format == OutputFormat::Pretty {
        println!("{} étudiant(s)", rows.len());
    }
    Ok(())
}

/// Fill the student form from flags, prompting with the current values
pub fn fill_form(form: &mut StudentForm, fields: StudentFields) -> Result<()> {
    form.first_name = prompt::text("Prénom", fields.first_name, &form.first_name)?;
    form.last_name = prompt::text("Nom", fields.last_name, &form.last_name)?;
    form.email = prompt::text("Email", fields.email, &form.email)?;
    Ok(())
}

/// Report the outcome of a modal submit
pub fn report_submit(view: &mut StudentListView, outcome: SubmitOutcome, done: &str) -> Result<()> {
    match outcome {
        SubmitOutcome::Succeeded => {
            println!("{} {}", "✓".green(), done);
            Ok(())
        }
        SubmitOutcome::Invalid => {
            eprintln!("{}", popup::render_field_messages(&view.field_messages()));
            Err(Error::Reported("invalid form".to_string()))
        }
        SubmitOutcome::Failed => {
            let message = view
                .take_alert()
                .unwrap_or_else(|| "Erreur lors de l'enregistrement.".to_string());
            prompt::alert(&message);
            Err(Error::Reported(message))
        }
        SubmitOutcome::Discarded => Ok(()),
    }
}

fn read_only_view(ctx: &CommandContext) -> StudentListView {
    ctx.student_view(Arc::new(FixedAnswer(false)))
}

/// Run the student list command
pub async fn list(ctx: &CommandContext) -> Result<()> {
    enter_guarded(ctx, Route::Students)?;
    let mut view = read_only_view(ctx);
    load(&mut view, ctx.format).await?;
    print_students(view.students(), ctx.format)
}

/// Run the student get command
pub async fn get(ctx: &CommandContext, id: i64) -> Result<()> {
    enter_guarded(ctx, Route::Students)?;
    let view = read_only_view(ctx);
    let student = view.get(id).await?;
    let display = StudentDisplay::from(student);

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&display)?),
        _ => println!("{}", table::format_record(&display)),
    }
    Ok(())
}

/// Run the student create command
pub async fn create(ctx: &CommandContext, fields: StudentFields) -> Result<()> {
    enter_guarded(ctx, Route::StudentsCreate)?;
    let mut view = read_only_view(ctx);
    load(&mut view, ctx.format).await?;

    view.open_create();
    fill_form(&mut view.form, fields)?;
    let outcome = view.submit_modal().await;
    report_submit(&mut view, outcome, "Étudiant créé")?;
    print_students(view.students(), ctx.format)
}

/// Run the student update command
pub async fn update(ctx: &CommandContext, id: i64, fields: StudentFields) -> Result<()> {
    enter_guarded(ctx, Route::Students)?;
    let mut view = read_only_view(ctx);
    load(&mut view, ctx.format).await?;

    if !view.open_edit_by_id(id) {
        return Err(ApiError::NotFound(format!("student {}", id)).into());
    }
    fill_form(&mut view.form, fields)?;
    let outcome = view.submit_modal().await;
    report_submit(&mut view, outcome, "Étudiant mis à jour")?;
    print_students(view.students(), ctx.format)
}

/// Run the student delete command
pub async fn delete(ctx: &CommandContext, id: i64, yes: bool) -> Result<()> {
    enter_guarded(ctx, Route::Students)?;
    let mut view = ctx.student_view(ctx.confirmation(yes));
    load(&mut view, ctx.format).await?;

    match view.delete(id).await {
        DeleteOutcome::Deleted => {
            println!("{} Étudiant {} supprimé", "✓".green(), id);
            print_students(view.students(), ctx.format)
        }
        DeleteOutcome::Cancelled => {
            println!("Suppression annulée.");
            Ok(())
        }
        DeleteOutcome::Failed => {
            prompt::alert(&format!("Impossible de supprimer l'étudiant {}.", id));
            Err(Error::Reported("delete failed".to_string()))
        }
        DeleteOutcome::Discarded => Ok(()),
    }
}
