//! Domain layer for the Flowshelf catalog
//!
//! This module contains the catalog's models, errors, and the port traits
//! that adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{AttemptFailure, CatalogError, DraftError, GenerationError, StoreError};
