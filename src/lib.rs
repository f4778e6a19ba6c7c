//! Flowshelf - Automation workflow catalog
//!
//! Flowshelf serves a catalog of automation recipes: a static catalog shipped
//! with the binary merged with user-authored workflows from a hosted record
//! store, filtered and ordered for browsing. It also drafts new workflows by
//! prompting a generative text API, falling back across a roster of models.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Records, filters, drafts, errors and ports
//! - **Service Layer** (`services`): Catalog query engine and draft generation
//! - **Adapters** (`adapters`): Static catalog, record stores and the generative API client
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use flowshelf::adapters::StaticCatalog;
//! use flowshelf::domain::models::FilterState;
//! use flowshelf::services::catalog_query;
//!
//! let catalog = StaticCatalog::embedded()?;
//! let filter = FilterState::new().with_department("Finance");
//! let shown = catalog_query::query(catalog.records(), &[], &filter);
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{CatalogError, DraftError, GenerationError, StoreError};
pub use domain::models::{
    AutomationCategory, Config, DraftRequest, DraftResult, FilterState, PriceRange, RecordId,
    SessionContext, WorkflowFormData, WorkflowRecord,
};
pub use domain::ports::{RecordStore, TextGenerator};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{CatalogService, DraftGenerator};
