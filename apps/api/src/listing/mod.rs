// Listing copy generation.
// Implements: feature taxonomy, selection reduction, prompt building,
// response parsing, and the generate → repair → length-revision pipeline.
// All model calls go through llm_client::CompletionModel.

pub mod handlers;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod prompt_builder;
pub mod prompts;
pub mod reducer;
pub mod taxonomy;
