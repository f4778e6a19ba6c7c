pub mod config;
pub mod description;
pub mod draft;
pub mod filter;
pub mod session;
pub mod workflow;
pub mod workflow_form;

pub use config::{
    CatalogConfig, Config, GenerationConfig, LoggingConfig, SessionConfig, StoreConfig,
};
pub use description::{Description, DescriptionMeta, StructuredDescription};
pub use draft::{DraftRequest, DraftResult};
pub use filter::{FilterState, PriceRange};
pub use session::{SessionContext, DEMO_USER_ID};
pub use workflow::{
    normalize_platform, AutomationCategory, Origin, RecordId, WorkflowRecord,
    CANONICAL_WORKSPACE_PLATFORM, DEFAULT_TIER, GEM_TIER,
};
pub use workflow_form::WorkflowFormData;
