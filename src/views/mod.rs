//! UI-agnostic view models
//!
//! Each view owns its form state, talks to the backend through the API
//! traits, and reports outcomes as [`Popup`]s. Rendering is left to the
//! caller (the terminal layer in `cli`). Collaborators are passed in
//! explicitly so tests can substitute mocks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub mod form;
pub mod home;
pub mod login;
pub mod register;
pub mod students;

pub use form::{FormErrors, Rule};
pub use home::HomeView;
pub use login::{LoginForm, LoginView};
pub use register::{RegisterForm, RegisterView};
pub use students::{DeleteOutcome, ModalMode, StudentForm, StudentListView};

/// Kind of transient message shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKind {
    Success,
    Error,
}

/// Transient overlay carrying a single outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub kind: PopupKind,
    pub title: String,
    pub message: String,
}

impl Popup {
    pub fn success(title: &str, message: &str) -> Self {
        Self {
            kind: PopupKind::Success,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn error(title: &str, message: &str) -> Self {
        Self {
            kind: PopupKind::Error,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

/// Popup state of a form view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    SuccessPopupShown,
    ErrorPopupShown,
}

impl ViewState {
    pub(crate) fn of(popup: Option<&Popup>) -> Self {
        match popup.map(|p| p.kind) {
            None => ViewState::Idle,
            Some(PopupKind::Success) => ViewState::SuccessPopupShown,
            Some(PopupKind::Error) => ViewState::ErrorPopupShown,
        }
    }
}

/// Result of a form submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; no request was made
    Invalid,
    Succeeded,
    Failed,
    /// The view ended before the response arrived; nothing was applied
    Discarded,
}

/// Cancellation handle tied to a view's active lifetime.
///
/// Clones share state. Once [`end`](Self::end) is called, responses that
/// arrive afterwards are dropped instead of being applied to the view.
#[derive(Debug, Clone, Default)]
pub struct ViewLifetime {
    ended: Arc<AtomicBool>,
}

impl ViewLifetime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the owning view as destroyed
    pub fn end(&self) {
        self.ended.store(true, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        !self.ended.load(Ordering::SeqCst)
    }
}

/// Interactive yes/no confirmation
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirmation that always gives the same answer (`--yes`, tests)
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
