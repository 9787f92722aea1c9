//! Line placement and vertical stacking.

use font_metrics::Measure;

use crate::{
    geometry::{Align, LayoutBox},
    wrap::{WrapMode, wrap},
};

/// A run of text to draw with its top-left corner at `(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRun {
    pub text: String,
    pub x: i32,
    pub y: i32,
}

impl DrawRun {
    fn new(text: impl Into<String>, x: i32, y: i32) -> Self {
        Self { text: text.into(), x, y }
    }
}

/// The draw runs for a whole paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineLayout {
    pub runs: Vec<DrawRun>,
    /// Number of wrapped lines.
    pub lines: usize,
    /// `y` just past the last line, trailing line gap included.
    pub bottom: i32,
}

impl LineLayout {
    /// Whether the stacked lines extend below the box. Overflow is drawn anyway.
    pub fn overflows(&self, bx: &LayoutBox) -> bool {
        self.bottom > bx.bottom()
    }
}

/// Place one line whose top is at `y`.
pub fn place_line(
    line: &str,
    is_last: bool,
    measure: &impl Measure,
    bx: &LayoutBox,
    align: Align,
    y: i32,
) -> Vec<DrawRun> {
    if line.is_empty() {
        return Vec::new();
    }
    match align {
        Align::Left => vec![DrawRun::new(line, bx.x, y)],
        Align::Center => vec![DrawRun::new(line, centered_x(line, measure, bx), y)],
        Align::Justified if is_last => vec![DrawRun::new(line, bx.x, y)],
        Align::Justified => justify(line, measure, bx, y),
    }
}

fn centered_x(text: &str, measure: &impl Measure, bx: &LayoutBox) -> i32 {
    bx.x + (bx.width - measure.measure(text)) / 2
}

fn justify(line: &str, measure: &impl Measure, bx: &LayoutBox, y: i32) -> Vec<DrawRun> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() < 2 {
        return vec![DrawRun::new(line, centered_x(line, measure, bx), y)];
    }

    let widths: Vec<i32> = words.iter().map(|w| measure.measure(w)).collect();
    let slack = bx.width - widths.iter().sum::<i32>();
    // Remainder pixels are dropped, leaving at most n - 2 pixels at the right edge.
    let gap = slack / (words.len() as i32 - 1);
    if gap < 0 {
        return vec![DrawRun::new(line, bx.x, y)];
    }

    let mut x = bx.x;
    words
        .iter()
        .zip(&widths)
        .map(|(word, width)| {
            let run = DrawRun::new(*word, x, y);
            x += width + gap;
            run
        })
        .collect()
}

/// Stack wrapped lines from the top of the box, one line advance apart.
pub fn compose(lines: &[String], measure: &impl Measure, bx: &LayoutBox, align: Align) -> LineLayout {
    let advance = measure.line_advance();
    let mut runs = Vec::new();
    let mut y = bx.y;

    for (i, line) in lines.iter().enumerate() {
        let is_last = i + 1 == lines.len();
        runs.extend(place_line(line, is_last, measure, bx, align, y));
        y += advance;
    }

    LineLayout { runs, lines: lines.len(), bottom: y }
}

/// Wrap `text` for the box and compose the result.
pub fn layout_text(
    text: &str,
    measure: &impl Measure,
    bx: &LayoutBox,
    align: Align,
    mode: WrapMode,
) -> LineLayout {
    let lines = wrap(text, measure, mode.budget(bx.width));
    compose(&lines, measure, bx, align)
}
