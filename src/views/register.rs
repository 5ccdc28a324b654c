//! Registration view

use std::sync::Arc;

use log::{debug, warn};

use super::form::{FormErrors, Rule};
use super::{Popup, SubmitOutcome, ViewLifetime, ViewState};
use crate::client::AuthApi;
use crate::client::models::Registration;
use crate::router::{Navigator, Route};

pub const SUCCESS_TITLE: &str = "Inscription réussie";
pub const SUCCESS_MESSAGE: &str = "Votre compte a été créé. Vous pouvez vous connecter.";
pub const ERROR_TITLE: &str = "Échec de l'inscription";
pub const ERROR_MESSAGE: &str = "Impossible de finaliser l'inscription";

/// Registration form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub login: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors
            .require("firstName", &self.first_name)
            .require("lastName", &self.last_name)
            .require("login", &self.login)
            .require("password", &self.password);
        errors
    }

    fn to_registration(&self) -> Registration {
        Registration {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            login: self.login.clone(),
            password: self.password.clone(),
        }
    }
}

pub fn field_message(field: &str, _rule: Rule) -> &'static str {
    match field {
        "firstName" => "Le prénom est requis",
        "lastName" => "Le nom est requis",
        "login" => "L’identifiant est requis",
        "password" => "Le mot de passe est requis",
        _ => "Champ requis",
    }
}

pub struct RegisterView {
    auth: Arc<dyn AuthApi>,
    navigator: Arc<dyn Navigator>,
    lifetime: ViewLifetime,
    pub form: RegisterForm,
    submitted: bool,
    popup: Option<Popup>,
}

impl RegisterView {
    pub fn new(auth: Arc<dyn AuthApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            auth,
            navigator,
            lifetime: ViewLifetime::new(),
            form: RegisterForm::default(),
            submitted: false,
            popup: None,
        }
    }

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

    pub async fn submit(&mut self) -> SubmitOutcome {
        self.submitted = true;
        if !self.form.validate().is_empty() {
            return SubmitOutcome::Invalid;
        }

        let result = self.auth.register(&self.form.to_registration()).await;

        if !self.lifetime.is_active() {
            debug!("Register response arrived after the view ended; discarding");
            return SubmitOutcome::Discarded;
        }

        match result {
            Ok(body) => {
                debug!("Registration accepted: {}", body);
                self.popup = Some(Popup::success(SUCCESS_TITLE, SUCCESS_MESSAGE));
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                warn!("Registration failed: {}", e);
                self.popup = Some(Popup::error(ERROR_TITLE, ERROR_MESSAGE));
                SubmitOutcome::Failed
            }
        }
    }

    /// Close the popup; success continues to the login view
    pub fn dismiss_popup(&mut self) -> Option<Route> {
        match self.state() {
            ViewState::SuccessPopupShown => {
                self.popup = None;
                Some(self.navigator.navigate(Route::Login))
            }
            ViewState::ErrorPopupShown => {
                self.popup = None;
                None
            }
            ViewState::Idle => None,
        }
    }

    pub fn reset(&mut self) {
        self.submitted = false;
        self.form = RegisterForm::default();
    }

    pub fn go_home(&self) -> Route {
        self.navigator.navigate(Route::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockRosterClient;
    use crate::error::ApiError;
    use crate::router::testing::RecordingNavigator;

    fn filled() -> RegisterForm {
        RegisterForm {
            first_name: "Jean".to_string(),
            last_name: "Dupont".to_string(),
            login: "jdupont".to_string(),
            password: "secret".to_string(),
        }
    }

    fn view_with(api: MockRosterClient) -> (Arc<MockRosterClient>, Arc<RecordingNavigator>, RegisterView) {
        let api = Arc::new(api);
        let navigator = Arc::new(RecordingNavigator::new());
        let view = RegisterView::new(api.clone(), navigator.clone());
        (api, navigator, view)
    }

    #[tokio::test]
    async fn test_any_missing_field_blocks_submit() {
        let blanks: [fn(&mut RegisterForm); 4] = [
            |f| f.first_name.clear(),
            |f| f.last_name.clear(),
            |f| f.login.clear(),
            |f| f.password.clear(),
        ];

        for blank in blanks {
            let (api, _, mut view) = view_with(MockRosterClient::new());
            view.form = filled();
            blank(&mut view.form);

            assert_eq!(view.submit().await, SubmitOutcome::Invalid);
            assert_eq!(view.field_messages().len(), 1);
            assert_eq!(api.call_counts().await.register, 0);
        }
    }

    #[tokio::test]
    async fn test_success_popup_then_login() {
        let (api, navigator, mut view) = view_with(MockRosterClient::new());
        view.form = filled();

        assert_eq!(view.submit().await, SubmitOutcome::Succeeded);
        assert_eq!(view.state(), ViewState::SuccessPopupShown);
        assert!(navigator.visits().is_empty());

        let requests = api.captured_requests().await;
        assert_eq!(requests[0].path, "/api/register");
        assert_eq!(requests[0].body.as_ref().unwrap()["firstName"], "Jean");

        assert_eq!(view.dismiss_popup(), Some(Route::Login));
        assert_eq!(navigator.visits(), vec![Route::Login]);
    }

    #[tokio::test]
    async fn test_failure_shows_generic_error() {
        let (_, navigator, mut view) = view_with(
            MockRosterClient::new()
                .with_error(ApiError::BadRequest("login already taken".to_string()))
                .await,
        );
        view.form = filled();

        assert_eq!(view.submit().await, SubmitOutcome::Failed);
        let popup = view.popup().unwrap();
        assert_eq!(popup.message, ERROR_MESSAGE);
        assert!(!popup.message.contains("taken"));

        assert_eq!(view.dismiss_popup(), None);
        assert!(navigator.visits().is_empty());
    }

    #[tokio::test]
    async fn test_reset_and_go_home() {
        let (_, navigator, mut view) = view_with(MockRosterClient::new());
        view.form.login = "jdupont".to_string();
        view.submit().await;

        view.reset();
        assert_eq!(view.form, RegisterForm::default());
        assert!(!view.is_submitted());

        assert_eq!(view.go_home(), Route::Home);
        assert_eq!(navigator.visits(), vec![Route::Home]);
    }
}
