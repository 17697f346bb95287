pub mod logging;

pub mod config;
pub mod content_service;
pub mod credentials;
pub mod errors;
pub mod evaluator;
pub mod export;
pub mod fallback;
pub mod models;
pub mod quiz;
pub mod remote;
pub mod sequencing;
pub mod workspace;

pub use config::Config;
pub use content_service::ContentGenerationService;
pub use credentials::{CredentialStore, Credentials, MemoryCredentialStore};
pub use errors::*;
pub use evaluator::evaluate;
pub use models::*;
pub use quiz::{Performance, QuizReport, QuizSession};
pub use remote::{ContentBackend, HttpContentBackend};
pub use sequencing::LatestSlot;
pub use workspace::{RequestOutcome, StudyWorkspace};
