//! Public landing view

use std::sync::Arc;

use crate::router::{Navigator, Route};

pub struct HomeView {
    navigator: Arc<dyn Navigator>,
}

impl HomeView {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self { navigator }
    }

    pub fn go_to_login(&self) -> Route {
        self.navigator.navigate(Route::Login)
    }

    pub fn go_to_register(&self) -> Route {
        self.navigator.navigate(Route::Register)
    }
}
