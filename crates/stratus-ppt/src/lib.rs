//! Slide-deck rendering for Stratus.
//!
//! Renders a [`DeckOutline`] into a minimal OOXML `.pptx` package: one
//! title slide plus one content slide per outline section, zipped with
//! stored (uncompressed) entries. The goal is a package presentation tools
//! open, not OOXML fidelity.

pub mod deck;
pub mod zip;

pub use deck::render_deck;

/// MIME type for the generated deck.
pub const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";
