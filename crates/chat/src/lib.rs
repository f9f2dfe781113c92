//! Conversational campaign-intake engine with simulated-typing reveal.

pub mod reveal;
pub mod session;

pub use reveal::Typewriter;
pub use session::{ChatSession, SessionState, TurnOutcome};
