//! Character-by-character typewriter over an assistant reply. The stepping
//! logic is pure; the session drives it from a timer task.

/// Incremental reveal of one message. One instance per message; nothing is
/// shared across turns.
#[derive(Debug)]
pub struct Typewriter {
    chars: Vec<char>,
    shown: usize,
}

impl Typewriter {
    pub fn new(message: &str) -> Self {
        Self {
            chars: message.chars().collect(),
            shown: 0,
        }
    }

    /// Reveal the next character. Returns `None` once the whole message has
    /// been revealed; total `Some` steps equal the message's char count.
    pub fn step(&mut self) -> Option<char> {
        let ch = self.chars.get(self.shown).copied()?;
        self.shown += 1;
        Some(ch)
    }

    pub fn is_done(&self) -> bool {
        self.shown == self.chars.len()
    }

    /// The full message, for committing to the transcript after the reveal.
    pub fn full_text(&self) -> String {
        self.chars.iter().collect()
    }
}
