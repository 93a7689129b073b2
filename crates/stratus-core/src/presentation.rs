//! Presentation outline shared between the LLM bridge and the deck renderer.

use serde::{Deserialize, Serialize};

/// Structured outline for a generated slide deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckOutline {
    pub title: String,
    pub agenda: String,
    pub key_findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub conclusion: String,
    pub qa_points: Vec<String>,
}
