//! Shared types and models for the Farmkeep record keeper
//!
//! This crate contains the entity models, form validation, and the derived
//! views (filters, sorts, joins, statistics) shared between the backend and
//! the browser client (via WASM).

pub mod models;
pub mod types;
pub mod validation;
pub mod views;

pub use models::*;
pub use types::*;
pub use validation::*;
pub use views::*;
