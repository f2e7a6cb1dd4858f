// Match Analyzer
// Résumé text + job description → one Gemini call → JSON match/ATS report.
// All model calls go through llm_client; nothing here talks HTTP to Gemini.

pub mod analyzer;
pub mod handlers;
pub mod models;
pub mod parse;
pub mod prompts;
