pub mod config;
pub mod entities;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod tracking;
pub mod utils;

use std::sync::Arc;

pub use config::Config;
pub use error::{AppError, AppResult};

use tracking::ArrivalNotifier;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub notifier: Arc<ArrivalNotifier>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            notifier: Arc::new(ArrivalNotifier::new()),
        }
    }
}
