//! Block and comment output.
//!
//! A block is an optional `N` word followed by its words joined with the
//! configured separator. Comments are parenthesised, upper-cased and never
//! numbered.

use crate::sequence::SequenceNumberer;

/// Characters allowed inside a comment, after upper-casing.
pub const PERMITTED_COMMENT_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789.,=_- ";

#[derive(Debug)]
pub struct Emitter {
    separator: &'static str,
    sequence: Option<SequenceNumberer>,
    lines: Vec<String>,
    blocks: usize,
}

impl Emitter {
    /// `sequence` is `None` when blocks are written without N words.
    pub fn new(separator: &'static str, sequence: Option<SequenceNumberer>) -> Self {
        Self {
            separator,
            sequence,
            lines: Vec::new(),
            blocks: 0,
        }
    }

    /// Write a block from the words that are present. Returns `false` and
    /// writes nothing when every word was suppressed.
    pub fn emit_block(&mut self, words: &[Option<String>]) -> bool {
        self.emit_block_with_comment(words, None)
    }

    /// Like [`Emitter::emit_block`], with a trailing comment on the same line.
    pub fn emit_block_with_comment(
        &mut self,
        words: &[Option<String>],
        comment: Option<&str>,
    ) -> bool {
        let present: Vec<&str> = words
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|w| !w.is_empty())
            .collect();
        if present.is_empty() {
            return false;
        }

        let mut line = String::new();
        if let Some(sequence) = self.sequence.as_mut() {
            line.push_str(&format!("N{}", sequence.next()));
            line.push_str(self.separator);
        }
        line.push_str(&present.join(self.separator));
        if let Some(text) = comment.map(filter_comment).filter(|t| !t.is_empty()) {
            line.push_str(&format!(" ({})", text));
        }

        self.lines.push(line);
        self.blocks += 1;
        true
    }

    /// Write a comment line. Text with nothing printable is dropped.
    pub fn comment(&mut self, text: &str) {
        let text = filter_comment(text);
        if !text.is_empty() {
            self.lines.push(format!("({})", text));
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn block_count(&self) -> usize {
        self.blocks
    }

    /// The finished program, one line per block or comment.
    pub fn finish(self) -> String {
        let mut program = self.lines.join("\n");
        program.push('\n');
        program
    }
}

/// Upper-case `text` and drop every character the controller rejects in comments.
pub fn filter_comment(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .filter(|c| PERMITTED_COMMENT_CHARS.contains(*c))
        .collect::<String>()
        .trim()
        .to_string()
}
