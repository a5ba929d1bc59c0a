pub mod feedback;
pub mod generator;
pub mod llm_service;

pub use feedback::{ConsoleFeedback, FeedbackEffects, SilentFeedback};
pub use generator::GeneratorService;
pub use llm_service::LlmService;
