#![forbid(unsafe_code)]

//! Line breaking in display cells.
//!
//! Widths are counted in terminal-style cells via `unicode-width`, so CJK
//! characters take two cells and grapheme clusters (emoji, ZWJ sequences,
//! combining marks) are never split.
//!
//! # Example
//! ```
//! use hketa_text::wrap::{wrap_text, WrapMode};
//!
//! let lines = wrap_text("Tsim Sha Tsui Ferry", 10, WrapMode::Word);
//! let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
//! assert_eq!(texts, vec!["Tsim Sha", "Tsui Ferry"]);
//! ```

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// How lines are broken when they exceed the width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Only explicit newlines break lines.
    None,
    /// Break at whitespace; an over-long word keeps its own line.
    Word,
    /// Break anywhere between graphemes.
    Char,
    /// Break at whitespace, splitting over-long words between graphemes.
    #[default]
    WordChar,
}

/// One output line and its width in cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub width: usize,
}

impl Line {
    fn new(text: &str) -> Self {
        let text = text.trim_end();
        Self {
            text: text.to_string(),
            width: text.width(),
        }
    }
}

/// Break `text` into lines no wider than `width` cells where possible.
///
/// Always returns at least one line. A `width` of zero is treated as one.
pub fn wrap_text(text: &str, width: usize, mode: WrapMode) -> Vec<Line> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        match mode {
            WrapMode::None => lines.push(Line::new(paragraph)),
            WrapMode::Char => wrap_chars(paragraph, width, &mut lines),
            WrapMode::Word => wrap_words(paragraph, width, false, &mut lines),
            WrapMode::WordChar => wrap_words(paragraph, width, true, &mut lines),
        }
    }

    lines
}

/// Display width of `text` in cells.
#[inline]
pub fn display_width(text: &str) -> usize {
    text.width()
}

fn wrap_chars(paragraph: &str, width: usize, lines: &mut Vec<Line>) {
    let start = lines.len();
    let mut current = String::new();
    let mut current_width = 0;
    push_graphemes(paragraph, width, lines, &mut current, &mut current_width);
    finish_paragraph(&current, start, lines);
}

fn wrap_words(paragraph: &str, width: usize, char_fallback: bool, lines: &mut Vec<Line>) {
    let start = lines.len();
    let mut current = String::new();
    let mut current_width = 0;

    for word in split_words(paragraph) {
        let word_width = word.width();

        if current_width + word_width <= width {
            current.push_str(word);
            current_width += word_width;
            continue;
        }

        // Whitespace that doesn't fit is where the line breaks.
        let is_space = word.trim().is_empty();
        if !current.trim().is_empty() {
            lines.push(Line::new(&current));
        }
        current.clear();
        current_width = 0;
        if is_space {
            continue;
        }

        if word_width > width {
            if char_fallback {
                push_graphemes(word, width, lines, &mut current, &mut current_width);
            } else {
                lines.push(Line::new(word));
            }
        } else {
            current.push_str(word);
            current_width = word_width;
        }
    }

    finish_paragraph(&current, start, lines);
}

/// Push the trailing partial line, or an empty line for an empty paragraph.
fn finish_paragraph(current: &str, start: usize, lines: &mut Vec<Line>) {
    if !current.is_empty() || lines.len() == start {
        lines.push(Line::new(current));
    }
}

/// Append graphemes to `current`, flushing full lines into `lines`.
fn push_graphemes(
    text: &str,
    width: usize,
    lines: &mut Vec<Line>,
    current: &mut String,
    current_width: &mut usize,
) {
    for grapheme in text.graphemes(true) {
        let grapheme_width = grapheme.width();
        if *current_width + grapheme_width > width && !current.is_empty() {
            lines.push(Line::new(current));
            current.clear();
            *current_width = 0;
            if grapheme.trim().is_empty() {
                continue;
            }
        }
        current.push_str(grapheme);
        *current_width += grapheme_width;
    }
}

/// Split into alternating runs of whitespace and non-whitespace.
fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;
    let mut in_space = None;

    for (offset, grapheme) in text.grapheme_indices(true) {
        let is_space = grapheme.chars().all(char::is_whitespace);
        if in_space.is_some_and(|prev| prev != is_space) {
            words.push(&text[start..offset]);
            start = offset;
        }
        in_space = Some(is_space);
    }
    if start < text.len() {
        words.push(&text[start..]);
    }
    words
}
