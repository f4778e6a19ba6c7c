pub mod record_store;
pub mod text_generator;

pub use record_store::RecordStore;
pub use text_generator::TextGenerator;
