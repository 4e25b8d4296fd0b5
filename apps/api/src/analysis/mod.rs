// Analysis core: prompt building, response normalization, validation, and
// the two document flows. All LLM calls go through llm_client — no direct
// Gemini calls here.

pub mod analyzer;
pub mod handlers;
pub mod matcher;
pub mod models;
pub mod normalize;
pub mod prompts;
pub mod validate;
