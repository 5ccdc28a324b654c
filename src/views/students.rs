//! Student list view
//!
//! Loads the list on activation, edits through a modal form (create or
//! update, followed by a full reload), deletes after confirmation by
//! removing the record locally, and logs out by clearing the token.

use std::sync::Arc;

use log::{debug, warn};

use super::form::{FormErrors, Rule};
use super::{Confirm, Popup, SubmitOutcome, ViewLifetime};
use crate::client::StudentApi;
use crate::client::models::{NewStudent, Student};
use crate::error::Result;
use crate::router::{Navigator, Route};
use crate::session::SharedTokenStore;

pub const CREATE_ERROR: &str = "Erreur lors de la création.";
pub const UPDATE_ERROR: &str = "Erreur lors de la mise à jour.";
pub const LOAD_ERROR_TITLE: &str = "Chargement impossible";
pub const LOAD_ERROR: &str = "Impossible de charger la liste des étudiants.";
pub const DELETE_PROMPT: &str = "Supprimer cet étudiant ?";

/// Which form the modal is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Closed,
    Create,
    /// Editing the student with this id
    Edit(i64),
}

/// Result of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined the confirmation
    Cancelled,
    Deleted,
    /// The backend refused; the list is unchanged
    Failed,
    Discarded,
}

/// Student form fields (create and edit)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl StudentForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors
            .require("firstName", &self.first_name)
            .require("lastName", &self.last_name)
            .require("email", &self.email)
            .email("email", &self.email);
        errors
    }

    fn to_new_student(&self) -> NewStudent {
        NewStudent {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }
}

impl From<&Student> for StudentForm {
    fn from(student: &Student) -> Self {
        Self {
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            email: student.email.clone(),
        }
    }
}

pub fn field_message(field: &str, rule: Rule) -> &'static str {
    match (field, rule) {
        ("firstName", _) => "Le prénom est requis",
        ("lastName", _) => "Le nom est requis",
        ("email", Rule::Email) => "L’email n’est pas valide",
        ("email", Rule::Required) => "L’email est requis",
        _ => "Champ requis",
    }
}

pub struct StudentListView {
    api: Arc<dyn StudentApi>,
    store: SharedTokenStore,
    navigator: Arc<dyn Navigator>,
    confirm: Arc<dyn Confirm>,
    lifetime: ViewLifetime,
    students: Vec<Student>,
    load_error: Option<Popup>,
    modal: ModalMode,
    pub form: StudentForm,
    submitted: bool,
    alert: Option<String>,
}

impl StudentListView {
    pub fn new(
        api: Arc<dyn StudentApi>,
        store: SharedTokenStore,
        navigator: Arc<dyn Navigator>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        Self {
            api,
            store,
            navigator,
            confirm,
            lifetime: ViewLifetime::new(),
            students: Vec::new(),
            load_error: None,
            modal: ModalMode::Closed,
            form: StudentForm::default(),
            submitted: false,
            alert: None,
        }
    }

    pub fn lifetime(&self) -> ViewLifetime {
        self.lifetime.clone()
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Error popup left by the last failed list load
    pub fn load_error(&self) -> Option<&Popup> {
        self.load_error.as_ref()
    }

    pub fn modal(&self) -> ModalMode {
        self.modal
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Pending alert from the last failed create/update
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    pub fn field_messages(&self) -> Vec<(&'static str, &'static str)> {
        if !self.submitted {
            return Vec::new();
        }
        self.form
            .validate()
            .iter()
            .map(|(field, rule)| (field, field_message(field, rule)))
            .collect()
    }

    /// Load the list; called once when the view is entered
    pub async fn activate(&mut self) {
        self.reload().await;
    }

    async fn reload(&mut self) {
        let result = self.api.list_students().await;
        if !self.lifetime.is_active() {
            debug!("Student list arrived after the view ended; discarding");
            return;
        }

        match result {
            Ok(students) => {
                debug!("Loaded {} students", students.len());
                self.students = students;
                self.load_error = None;
            }
            Err(e) => {
                warn!("Failed to load students: {}", e);
                self.load_error = Some(Popup::error(LOAD_ERROR_TITLE, LOAD_ERROR));
            }
        }
    }

    /// Fetch a single student
    pub async fn get(&self, id: i64) -> Result<Student> {
        self.api.get_student(id).await
    }

    pub fn open_create(&mut self) {
        self.reset_form();
        self.alert = None;
        self.modal = ModalMode::Create;
    }

    /// Open the modal pre-filled with `student`
    pub fn open_edit(&mut self, student: &Student) {
        self.reset_form();
        self.form = StudentForm::from(student);
        self.alert = None;
        self.modal = ModalMode::Edit(student.id);
    }

    /// Open the edit modal for a listed student; false if absent
    pub fn open_edit_by_id(&mut self, id: i64) -> bool {
        match self.students.iter().find(|s| s.id == id).cloned() {
            Some(student) => {
                self.open_edit(&student);
                true
            }
            None => false,
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = ModalMode::Closed;
    }

    /// Submit the modal form (create or update, depending on the mode)
    pub async fn submit_modal(&mut self) -> SubmitOutcome {
        self.submitted = true;
        if self.modal == ModalMode::Closed || !self.form.validate().is_empty() {
            return SubmitOutcome::Invalid;
        }

        let payload = self.form.to_new_student();
        let (result, error_message) = match self.modal {
            ModalMode::Edit(id) => (
                self.api.update_student(id, &payload.with_id(id)).await,
                UPDATE_ERROR,
            ),
            _ => (self.api.create_student(&payload).await, CREATE_ERROR),
        };

        if !self.lifetime.is_active() {
            debug!("Save response arrived after the view ended; discarding");
            return SubmitOutcome::Discarded;
        }

        match result {
            Ok(()) => {
                self.modal = ModalMode::Closed;
                self.reset_form();
                self.reload().await;
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                warn!("Failed to save student: {}", e);
                self.alert = Some(error_message.to_string());
                SubmitOutcome::Failed
            }
        }
    }

    /// Delete after confirmation; the record is removed locally on success
    pub async fn delete(&mut self, id: i64) -> DeleteOutcome {
        if !self.confirm.confirm(DELETE_PROMPT) {
            return DeleteOutcome::Cancelled;
        }

        let result = self.api.delete_student(id).await;
        if !self.lifetime.is_active() {
            return DeleteOutcome::Discarded;
        }

        match result {
            Ok(()) => {
                self.students.retain(|s| s.id != id);
                DeleteOutcome::Deleted
            }
            Err(e) => {
                debug!("Delete of student {} failed: {}", id, e);
                DeleteOutcome::Failed
            }
        }
    }

    /// Clear the session token and return to the landing view
    pub fn logout(&mut self) -> Result<Route> {
        self.store.clear()?;
        self.lifetime.end();
        Ok(self.navigator.navigate(Route::Home))
    }

    pub fn reset_form(&mut self) {
        self.submitted = false;
        self.form = StudentForm::default();
    }
}
