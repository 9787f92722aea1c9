//! Greedy word wrapping.

use font_metrics::Measure;
use serde::{Deserialize, Serialize};

/// How much fits on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// Measured width in pixels.
    Pixels(i32),
    /// Number of characters.
    Characters(usize),
}

/// Which budget a box applies to its text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    /// Wrap to the box width in pixels. Overlong words stay whole.
    #[default]
    Pixels,
    /// Wrap to a fixed character count. Overlong words are broken into chunks.
    Characters(usize),
}

impl WrapMode {
    pub fn budget(self, box_width: i32) -> Budget {
        match self {
            WrapMode::Pixels => Budget::Pixels(box_width),
            WrapMode::Characters(n) => Budget::Characters(n),
        }
    }
}

/// Break `text` into lines that fit `budget`.
///
/// Runs of whitespace, newlines included, collapse to a single separator and
/// the block is trimmed, so empty or blank input yields no lines.
pub fn wrap(text: &str, measure: &impl Measure, budget: Budget) -> Vec<String> {
    match budget {
        Budget::Pixels(width) => wrap_pixels(text, measure, width),
        Budget::Characters(width) => wrap_characters(text, width),
    }
}

fn wrap_pixels(text: &str, measure: &impl Measure, width: i32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measure.measure(&candidate) <= width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn wrap_characters(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let needed = if len == 0 { word_len } else { len + 1 + word_len };

        if needed <= width {
            if len > 0 {
                current.push(' ');
                len += 1;
            }
            current.push_str(word);
            len += word_len;
            continue;
        }

        if word_len <= width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            len = word_len;
            continue;
        }

        // Overlong word: fill what is left of the current line, then chunk the rest.
        let mut rest = word.chars();
        if len > 0 {
            let space_left = width.saturating_sub(len + 1);
            if space_left > 0 {
                current.push(' ');
                current.extend(rest.by_ref().take(space_left));
            }
            lines.push(std::mem::take(&mut current));
        }

        let chars: Vec<char> = rest.collect();
        let mut chunks = chars.chunks(width).peekable();
        while let Some(chunk) = chunks.next() {
            let chunk: String = chunk.iter().collect();
            if chunks.peek().is_some() {
                lines.push(chunk);
            } else {
                len = chunk.chars().count();
                current = chunk;
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
