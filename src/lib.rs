//! Admin console for the IJG Research content API: documents, categories,
//! news, users and a local calendar.

pub mod api;
pub mod auth;
pub mod calendar;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod mock_data;
pub mod models;
pub mod pages;
pub mod session;

pub use api::ApiClient;
pub use auth::AuthGuard;
pub use config::AdminConfig;
pub use error::ApiError;
pub use session::SessionStore;
