pub mod analysis;
pub mod error;
pub mod io;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod sentiment;
pub mod stages;
pub mod taxonomy;

pub use analysis::{DemeanorAnalyzer, DemeanorConfig, IntentConfig, TestIntentDetector, ToneLexicon};
pub use error::{EngineError, EngineResult};
pub use io::{
    AnnotationReport, AnnotationResult, AnnotationStore, AnnotationSummary, JsonlStore,
    parse_transcribe_file, parse_transcribe_json,
};
pub use llm::{AnthropicClient, AnthropicConfig};
pub use models::{DemeanorFlag, FlagType, Severity, TestDetection, Transcript};
pub use pipeline::{AnnotateConfig, Annotator, DEFAULT_EXAMINER_LABEL};
pub use sentiment::{HttpSentimentClient, NoSentiment, SentimentBackend, SentimentService};
pub use taxonomy::{Category, Taxonomy};
