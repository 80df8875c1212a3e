pub mod annotation_client;
pub mod llm_client;

pub use annotation_client::AnnotationClient;
pub use llm_client::LlmClient;
