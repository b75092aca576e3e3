//! Styled data: text with interleaved styling whose visible width is
//! independent of escape bytes.
//!
//! Block render functions produce a [`StyledText`] tree. The renderer only
//! needs three shape operations from it ([`lines`](StyledText::lines),
//! [`chunk_every`](StyledText::chunk_every), [`unlines`](StyledText::unlines))
//! plus escape-blind width measurement and final ANSI emission.

use super::ansi;
use super::color::{Style, SGR_RESET};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Text with optional nested styling.
///
/// Plain payloads may themselves carry raw escape sequences; those count as
/// zero columns everywhere and are never split by chunking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyledText {
    /// An unstyled string (may contain newlines and raw escapes).
    Plain(String),
    /// A styled subtree. Nested styles layer: inner colors win, modifiers
    /// accumulate.
    Styled(Box<StyledText>, Style),
    /// A sequence of parts rendered back to back.
    Concat(Vec<StyledText>),
}

/// A flattened span: one text run under one effective style.
#[derive(Debug, Clone)]
struct Run {
    text: String,
    style: Style,
}

fn from_runs(mut runs: Vec<Run>) -> StyledText {
    let wrap = |run: Run| {
        if run.style.is_plain() {
            StyledText::Plain(run.text)
        } else {
            StyledText::Styled(Box::new(StyledText::Plain(run.text)), run.style)
        }
    };
    match runs.len() {
        0 => StyledText::Plain(String::new()),
        1 => wrap(runs.remove(0)),
        _ => StyledText::Concat(runs.into_iter().map(wrap).collect()),
    }
}

impl StyledText {
    /// Create plain text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    /// Wrap text in a style.
    pub fn styled(text: impl Into<Self>, style: Style) -> Self {
        Self::Styled(Box::new(text.into()), style)
    }

    /// Concatenate parts.
    pub fn concat(parts: Vec<Self>) -> Self {
        Self::Concat(parts)
    }

    /// Join parts with newlines.
    pub fn unlines(parts: impl IntoIterator<Item = Self>) -> Self {
        let mut out = Vec::new();
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                out.push(Self::Plain("\n".to_string()));
            }
            out.push(part);
        }
        Self::Concat(out)
    }

    fn collect_runs(&self, inherited: Style, out: &mut Vec<Run>) {
        match self {
            Self::Plain(text) => {
                if !text.is_empty() {
                    out.push(Run {
                        text: text.clone(),
                        style: inherited,
                    });
                }
            }
            Self::Styled(child, style) => child.collect_runs(inherited.merge(*style), out),
            Self::Concat(parts) => {
                for part in parts {
                    part.collect_runs(inherited, out);
                }
            }
        }
    }

    fn runs(&self) -> Vec<Run> {
        let mut out = Vec::new();
        self.collect_runs(Style::new(), &mut out);
        out
    }

    /// Visible column count, with escape sequences counted as zero.
    ///
    /// Meaningful for single-line content; newlines contribute nothing.
    pub fn visible_width(&self) -> usize {
        self.runs()
            .iter()
            .map(|run| ansi::visible_width(&run.text))
            .sum()
    }

    /// Split on explicit line breaks, preserving styles per line.
    ///
    /// Empty content yields one empty line.
    pub fn lines(&self) -> Vec<Self> {
        let mut lines = Vec::new();
        let mut current: Vec<Run> = Vec::new();
        for run in self.runs() {
            for (i, part) in run.text.split('\n').enumerate() {
                if i > 0 {
                    lines.push(from_runs(std::mem::take(&mut current)));
                }
                if !part.is_empty() {
                    current.push(Run {
                        text: part.to_string(),
                        style: run.style,
                    });
                }
            }
        }
        lines.push(from_runs(current));
        lines
    }

    /// Chunk into pieces of at most `n` visible columns.
    ///
    /// Lines are chunked independently and the results flattened. Escape
    /// sequences never split: a sequence landing on a chunk boundary opens
    /// the following chunk, except at end of input where it stays with the
    /// last chunk. A line whose width is an exact multiple of `n` produces
    /// no trailing empty chunk.
    pub fn chunk_every(&self, n: usize) -> Vec<Self> {
        if n == 0 {
            return vec![self.clone()];
        }
        let mut out = Vec::new();
        for line in self.lines() {
            out.extend(chunk_line(line.runs(), n));
        }
        out
    }

    /// Render the tree to a string with SGR sequences.
    ///
    /// Each styled run is wrapped in its SGR prefix and a reset; plain runs
    /// pass through untouched.
    pub fn to_ansi(&self) -> String {
        let mut out = String::new();
        for run in self.runs() {
            if run.style.is_plain() {
                out.push_str(&run.text);
            } else {
                out.push_str(&run.style.sgr());
                out.push_str(&run.text);
                out.push_str(SGR_RESET);
            }
        }
        out
    }
}

/// Chunk one line's runs by visible width.
fn chunk_line(runs: Vec<Run>, n: usize) -> Vec<StyledText> {
    let mut chunks: Vec<Vec<Run>> = Vec::new();
    let mut current: Vec<Run> = Vec::new();
    let mut used = 0usize;

    for run in runs {
        let mut text = String::new();
        let mut close = |current: &mut Vec<Run>, text: &mut String, used: &mut usize| {
            if !text.is_empty() {
                current.push(Run {
                    text: std::mem::take(text),
                    style: run.style,
                });
            }
            if !current.is_empty() {
                chunks.push(std::mem::take(current));
            }
            *used = 0;
        };

        for segment in ansi::segments(&run.text) {
            match segment {
                ansi::Segment::Escape(esc) => {
                    if used == n {
                        close(&mut current, &mut text, &mut used);
                    }
                    text.push_str(esc);
                }
                ansi::Segment::Text(t) => {
                    for grapheme in t.graphemes(true) {
                        let width = UnicodeWidthStr::width(grapheme);
                        if used + width > n {
                            close(&mut current, &mut text, &mut used);
                        }
                        text.push_str(grapheme);
                        used += width;
                    }
                }
            }
        }
        if !text.is_empty() {
            current.push(Run {
                text,
                style: run.style,
            });
        }
    }

    let tail_width: usize = current.iter().map(|r| ansi::visible_width(&r.text)).sum();
    if current.is_empty() && !chunks.is_empty() {
        // Exact multiple of n: nothing left over.
    } else if tail_width == 0 && !current.is_empty() && !chunks.is_empty() {
        // Trailing escapes only: keep them with the final chunk.
        if let Some(last) = chunks.last_mut() {
            last.append(&mut current);
        }
    } else {
        chunks.push(current);
    }

    chunks.into_iter().map(from_runs).collect()
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        Self::Plain(text.to_string())
    }
}

impl From<String> for StyledText {
    fn from(text: String) -> Self {
        Self::Plain(text)
    }
}

impl std::fmt::Display for StyledText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_ansi())
    }
}
