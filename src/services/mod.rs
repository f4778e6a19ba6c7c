pub mod catalog_query;
pub mod catalog_service;
pub mod draft_generator;
pub mod prompt;

pub use catalog_service::{CatalogService, Facets, RefreshOutcome};
pub use draft_generator::{DraftGenerator, DraftGeneratorConfig};
