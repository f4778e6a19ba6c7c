//! Adapters: concrete implementations of the domain ports plus the static catalog.

pub mod gemini;
pub mod memory_store;
pub mod postgrest;
pub mod row;
pub mod static_catalog;

pub use gemini::GeminiClient;
pub use memory_store::InMemoryRecordStore;
pub use postgrest::PostgrestRecordStore;
pub use row::WorkflowRow;
pub use static_catalog::StaticCatalog;
