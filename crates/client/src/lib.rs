//! REST client and screen controllers for the CDC Dreams API.
//!
//! - [`api::DreamsApi`] wraps the HTTP endpoints with `reqwest`, always
//!   taking an explicit [`auth::AuthToken`].
//! - [`auth::Session`] holds the token in a keyed [`auth::TokenStore`].
//! - [`controller::ResourceListController`] is the generic
//!   fetch / paginate / create / edit / delete unit behind every list
//!   screen; [`screens`] composes it with lookup collections.
//! - [`report::ReportScreen`] loads the collections the report needs and
//!   delegates the arithmetic to `dreams_core::reporting`.

pub mod api;
pub mod auth;
pub mod config;
pub mod controller;
pub mod endpoints;
pub mod error;
pub mod report;
pub mod resource;
pub mod screens;

pub use api::DreamsApi;
pub use auth::{AuthToken, Session};
pub use config::ClientConfig;
pub use controller::ResourceListController;
pub use error::{ClientError, ClientResult};
