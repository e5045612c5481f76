//! # Simple Stock Web
//!
//! Browser dashboard and JSON API over the `simple-stock-core` pipeline.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`charts`] | SVG geometry for the price and volume charts |
//! | [`error`] | Web error type and HTTP status mapping |
//! | [`page`] | Dashboard view model |
//! | [`routes`] | Axum router and handlers |
//! | [`state`] | Shared application state and templates |

pub mod charts;
pub mod error;
pub mod page;
pub mod routes;
pub mod state;

pub use error::{ErrorBody, WebError};
pub use routes::{router, DashboardQuery};
pub use state::{default_assets_dir, AppState};
