//! Login view
//!
//! Two required fields. A successful login stores the token and shows a
//! success popup; dismissing it enters the student list. A failed login
//! shows a generic error popup and stays on the page.

use std::sync::Arc;

use log::{debug, warn};

use super::form::{FormErrors, Rule};
use super::{Popup, SubmitOutcome, ViewLifetime, ViewState};
use crate::client::AuthApi;
use crate::client::models::Credentials;
use crate::router::{Navigator, Route};
use crate::session::SharedTokenStore;

pub const SUCCESS_TITLE: &str = "Connexion réussie";
pub const SUCCESS_MESSAGE: &str = "Vous êtes connecté.";
pub const ERROR_TITLE: &str = "Échec de connexion";
pub const ERROR_MESSAGE: &str = "Identifiant ou mot de passe incorrect";

/// Login form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub login: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors
            .require("login", &self.login)
            .require("password", &self.password);
        errors
    }
}

/// Message shown under a login field
pub fn field_message(field: &str, rule: Rule) -> &'static str {
    match (field, rule) {
        ("login", _) => "L’identifiant est requis",
        ("password", _) => "Le mot de passe est requis",
        _ => "Champ requis",
    }
}

pub struct LoginView {
    auth: Arc<dyn AuthApi>,
    store: SharedTokenStore,
    navigator: Arc<dyn Navigator>,
    lifetime: ViewLifetime,
    pub form: LoginForm,
    submitted: bool,
    popup: Option<Popup>,
}

impl LoginView {
    pub fn new(
        auth: Arc<dyn AuthApi>,
        store: SharedTokenStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            auth,
            store,
            navigator,
            lifetime: ViewLifetime::new(),
            form: LoginForm::default(),
            submitted: false,
            popup: None,
        }
    }

    /// Handle that ends this view's lifetime
    pub fn lifetime(&self) -> ViewLifetime {
        self.lifetime.clone()
    }

    pub fn state(&self) -> ViewState {
        ViewState::of(self.popup.as_ref())
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Field messages, shown once a submit has been attempted
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

    /// Validate, then call the login endpoint once
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.submitted = true;
        if !self.form.validate().is_empty() {
            return SubmitOutcome::Invalid;
        }

        let credentials = Credentials {
            login: self.form.login.clone(),
            password: self.form.password.clone(),
        };
        let result = self.auth.login(&credentials).await;

        if !self.lifetime.is_active() {
            debug!("Login response arrived after the view ended; discarding");
            return SubmitOutcome::Discarded;
        }

        let stored = result.and_then(|response| self.store.set(&response.token));
        match stored {
            Ok(()) => {
                self.popup = Some(Popup::success(SUCCESS_TITLE, SUCCESS_MESSAGE));
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                warn!("Login failed: {}", e);
                self.popup = Some(Popup::error(ERROR_TITLE, ERROR_MESSAGE));
                SubmitOutcome::Failed
            }
        }
    }

    /// Close the popup; returns the route entered, if any
    pub fn dismiss_popup(&mut self) -> Option<Route> {
        match self.state() {
            ViewState::SuccessPopupShown => {
                self.popup = None;
                Some(self.navigator.navigate(Route::Students))
            }
            ViewState::ErrorPopupShown => {
                self.popup = None;
                None
            }
            ViewState::Idle => None,
        }
    }

    /// Clear every field and the submitted flag
    pub fn reset(&mut self) {
        self.submitted = false;
        self.form = LoginForm::default();
    }
}
