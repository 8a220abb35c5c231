use std::sync::Arc;

use crate::config::HubConfig;
use crate::plot::PlotOptions;

/// Shared application state, passed to all route handlers via `axum::extract::State`.
///
/// Immutable after startup: requests never write to it.
pub struct AppState {
    pub config: HubConfig,
}

impl AppState {
    pub fn new(config: HubConfig) -> Arc<Self> {
        Arc::new(Self { config })
    }

    pub fn plot_options(&self) -> PlotOptions {
        PlotOptions {
            dir: self.config.plot_dir.clone(),
            width: self.config.plot_width,
            height: self.config.plot_height,
        }
    }
}
