//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It is
//! read-only: the server config and a rasterizer whose font database is loaded
//! once at startup. Nothing about a construct outlives the request that
//! rendered it.

use std::sync::Arc;

use crate::batch::BatchOptions;
use crate::config::ServerConfig;
use crate::render::Rasterizer;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub rasterizer: Rasterizer,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let rasterizer = Rasterizer::new(&config.render);
        Self::with_rasterizer(config, rasterizer)
    }

    #[must_use]
    pub fn with_rasterizer(config: ServerConfig, rasterizer: Rasterizer) -> Self {
        Self { config: Arc::new(config), rasterizer }
    }

    /// Batch options for web requests: continue past bad lines, bounded size.
    #[must_use]
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions { max_constructs: Some(self.config.max_constructs), ..BatchOptions::default() }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
