//! Command execution context
//!
//! Wires the configuration, the session file, the HTTP client and the
//! router once per invocation, and builds the views on top of them.

use std::path::PathBuf;
use std::sync::Arc;

use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::RosterClient;
use crate::config::Config;
use crate::error::Result;
use crate::router::{Navigator, Route, Router};
use crate::session::{FileTokenStore, SharedTokenStore};
use crate::views::{Confirm, FixedAnswer, HomeView, LoginView, RegisterView, StudentListView};

use super::prompt::TerminalConfirm;

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded configuration (defaults when no file exists yet)
    pub config: Config,
    /// Path the configuration was loaded from
    pub config_path: PathBuf,
    /// Session token persisted next to the configuration
    pub store: SharedTokenStore,
    /// API client (Arc-wrapped so views can share it)
    pub client: Arc<RosterClient>,
    pub router: Arc<Router>,
    /// Resolved output format
    pub format: OutputFormat,
}

impl CommandContext {
    /// Build the context from the global options.
    ///
    /// A missing config file is not an error: the default API host is used
    /// until `rosterop init` writes one.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config_path = Config::resolve_path(opts.config_ref())?;
        let config = Config::load_or_default(opts.config_ref())?;

        let session_path = Config::session_path(&config_path);
        debug!("Session file: {}", session_path.display());
        let store: SharedTokenStore = Arc::new(FileTokenStore::new(session_path));

        let api_host = config.api_host(opts.api_host_ref());
        let client = Arc::new(RosterClient::new(&api_host, store.clone())?);
        let router = Arc::new(Router::new(store.clone()));

        let format = opts
            .format
            .or_else(|| {
                config
                    .preferences
                    .format
                    .as_deref()
                    .and_then(OutputFormat::from_name)
            })
            .unwrap_or_default();

        Ok(Self {
            config,
            config_path,
            store,
            client,
            router,
            format,
        })
    }

    fn navigator(&self) -> Arc<dyn Navigator> {
        self.router.clone()
    }

    /// Enter `route` through the guard; returns the route actually entered
    pub fn enter(&self, route: Route) -> Route {
        self.router.navigate(route)
    }

    /// Confirmation used for deletes: `--yes` or the config preference skip it
    pub fn confirmation(&self, assume_yes: bool) -> Arc<dyn Confirm> {
        if assume_yes || self.config.preferences.assume_yes {
            Arc::new(FixedAnswer(true))
        } else {
            Arc::new(TerminalConfirm)
        }
    }

    pub fn home_view(&self) -> HomeView {
        HomeView::new(self.navigator())
    }

    pub fn login_view(&self) -> LoginView {
        LoginView::new(self.client.clone(), self.store.clone(), self.navigator())
    }

    pub fn register_view(&self) -> RegisterView {
        RegisterView::new(self.client.clone(), self.navigator())
    }

    pub fn student_view(&self, confirm: Arc<dyn Confirm>) -> StudentListView {
        StudentListView::new(
            self.client.clone(),
            self.store.clone(),
            self.navigator(),
            confirm,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn opts_for(path: &std::path::Path) -> GlobalOptions {
        GlobalOptions {
            config: Some(path.to_string_lossy().to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_context_without_config_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");

        let ctx = CommandContext::new(&opts_for(&path)).unwrap();

        assert_eq!(ctx.config_path, path);
        assert_eq!(ctx.format, OutputFormat::Pretty);
        assert_eq!(ctx.client.base_url(), "http://localhost:8080/api");
        assert!(!ctx.store.has_token());
    }

    #[test]
    fn test_format_preference_and_flag() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "preferences:\n  format: json\n").unwrap();

        let ctx = CommandContext::new(&opts_for(&path)).unwrap();
        assert_eq!(ctx.format, OutputFormat::Json);

        let mut opts = opts_for(&path);
        opts.format = Some(OutputFormat::Table);
        let ctx = CommandContext::new(&opts).unwrap();
        assert_eq!(ctx.format, OutputFormat::Table);
    }

    #[test]
    fn test_guard_uses_session_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(temp.path().join("session.yaml"), "token: abc\n").unwrap();

        let ctx = CommandContext::new(&opts_for(&path)).unwrap();
        assert_eq!(ctx.enter(Route::Students), Route::Students);

        ctx.store.clear().unwrap();
        assert_eq!(ctx.enter(Route::Students), Route::Login);
    }
}
