use std::sync::Arc;

use crate::application::services::SessionController;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<SessionController>,
    pub settings: Settings,
}

impl AppState {
    pub fn new(controller: Arc<SessionController>, settings: Settings) -> Self {
        Self {
            controller,
            settings,
        }
    }
}
