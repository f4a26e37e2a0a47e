//! CineSofía Core Library
//!
//! Turns a movie title or a screenshot into a structured philosophical
//! analysis by asking a generative model for schema-constrained JSON, and
//! tracks the single in-flight analysis through a small state machine.

pub mod coordinator;
pub mod error;
pub mod format;
pub mod gemini;
pub mod prompt;
pub mod provider;
pub mod schema;
pub mod state;
pub mod types;

// Re-export commonly used items at crate root
pub use coordinator::AnalysisCoordinator;
pub use error::{AnalysisError, ErrorKind, Result};
pub use format::{format_analysis_readable, share_text, youtube_embed_url};
pub use gemini::{GeminiClient, GenerateContentRequest, GenerateContentResponse, GenerativeModel};
pub use provider::ProviderConfig;
pub use state::{
    AppController, ApplicationState, Commit, RequestTicket, SearchMode, Submission, SubmitRejected,
};
pub use types::{Activity, PhilosophicalAnalysis};
