//! The usuarios module: a user resource stored in a document collection and
//! served over REST.
//!
//! Layers, leaves first:
//! - `contract`: plain models, public errors and the in-process API trait
//! - `domain`: validation, the repository port and the service
//! - `infra::storage`: Mongo, in-memory and "store down" repositories
//! - `api::rest`: DTOs, envelope, error mapping, handlers and routes
//! - `gateways`: the local client implementing the contract trait

pub mod api;
pub mod config;
pub mod contract;
pub mod domain;
pub mod gateways;
pub mod infra;
pub mod module;

pub use config::UsuariosConfig;
pub use contract::{client::UsuariosApi, error::UsuariosError, model};
pub use module::UsuariosModule;
