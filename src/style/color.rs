//! Color and text-attribute primitives for styled block content.
//!
//! Block styles exist for exactly one purpose here: producing the SGR
//! prefix of a styled run. So the vocabulary is deliberately small, a
//! truecolor pair plus the few text attributes progress dashboards actually
//! set, and every flag maps to one code in the emitted sequence.

use bitflags::bitflags;
use std::fmt::Write as _;

/// A 24-bit color channel triple.
///
/// Emitted as an SGR truecolor parameter (`38;2;r;g;b` for foreground,
/// `48;2;r;g;b` for background); the engine never stores colors in any
/// other form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

bitflags! {
    /// Text attributes a block style can turn on.
    ///
    /// Each flag corresponds to exactly one SGR code with near-universal
    /// terminal support; anything fancier belongs in raw escapes inside the
    /// block content.
    ///
    /// # Example
    /// ```
    /// use footlight::{Modifiers, Style};
    ///
    /// let style = Style::new().bold().underline();
    /// assert!(style.modifiers.contains(Modifiers::BOLD | Modifiers::UNDERLINE));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold weight (SGR 1), the usual choice for block titles.
        const BOLD = 1 << 0;
        /// Faint rendition (SGR 2) for secondary detail.
        const DIM = 1 << 1;
        /// Italic slant (SGR 3).
        const ITALIC = 1 << 2;
        /// Underline (SGR 4).
        const UNDERLINE = 1 << 3;
    }
}

impl Modifiers {
    /// SGR codes for the set flags, in emission order.
    fn codes(self) -> impl Iterator<Item = &'static str> {
        [
            (Self::BOLD, "1"),
            (Self::DIM, "2"),
            (Self::ITALIC, "3"),
            (Self::UNDERLINE, "4"),
        ]
        .into_iter()
        .filter_map(move |(flag, code)| self.contains(flag).then_some(code))
    }
}

/// A text style: optional colors plus modifiers.
///
/// An unset field inherits from the enclosing style (or the terminal
/// default at the top level). Styles render to a single SGR sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color, if set.
    pub fg: Option<Rgb>,
    /// Background color, if set.
    pub bg: Option<Rgb>,
    /// Active modifiers.
    pub modifiers: Modifiers,
}

impl Style {
    /// A style with nothing set.
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            modifiers: Modifiers::empty(),
        }
    }

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn fg(mut self, color: Rgb) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn bg(mut self, color: Rgb) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add modifiers (builder pattern).
    #[inline]
    #[must_use]
    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    /// Bold shorthand.
    #[inline]
    #[must_use]
    pub fn bold(self) -> Self {
        self.modifiers(Modifiers::BOLD)
    }

    /// Dim shorthand.
    #[inline]
    #[must_use]
    pub fn dim(self) -> Self {
        self.modifiers(Modifiers::DIM)
    }

    /// Italic shorthand.
    #[inline]
    #[must_use]
    pub fn italic(self) -> Self {
        self.modifiers(Modifiers::ITALIC)
    }

    /// Underline shorthand.
    #[inline]
    #[must_use]
    pub fn underline(self) -> Self {
        self.modifiers(Modifiers::UNDERLINE)
    }

    /// Check whether the style sets anything at all.
    #[inline]
    pub const fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.modifiers.is_empty()
    }

    /// Layer `inner` over `self`: inner colors win, modifiers accumulate.
    #[must_use]
    pub fn merge(self, inner: Self) -> Self {
        Self {
            fg: inner.fg.or(self.fg),
            bg: inner.bg.or(self.bg),
            modifiers: self.modifiers | inner.modifiers,
        }
    }

    /// Render the style as a single SGR escape sequence.
    ///
    /// Returns an empty string for a plain style.
    pub fn sgr(&self) -> String {
        if self.is_plain() {
            return String::new();
        }
        let mut seq = String::from("\x1b[");
        let mut first = true;
        let mut push = |seq: &mut String, code: &str| {
            if !first {
                seq.push(';');
            }
            first = false;
            seq.push_str(code);
        };
        for code in self.modifiers.codes() {
            push(&mut seq, code);
        }
        if let Some(fg) = self.fg {
            push(&mut seq, "38");
            let _ = write!(seq, ";2;{};{};{}", fg.r, fg.g, fg.b);
        }
        if let Some(bg) = self.bg {
            push(&mut seq, "48");
            let _ = write!(seq, ";2;{};{};{}", bg.r, bg.g, bg.b);
        }
        seq.push('m');
        seq
    }
}

/// SGR reset sequence.
pub(crate) const SGR_RESET: &str = "\x1b[0m";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_style_has_no_sgr() {
        assert_eq!(Style::new().sgr(), "");
        assert!(Style::new().is_plain());
    }

    #[test]
    fn test_sgr_modifiers_and_colors() {
        let style = Style::new().bold().fg(Rgb::new(1, 2, 3));
        assert_eq!(style.sgr(), "\x1b[1;38;2;1;2;3m");

        let style = Style::new().bg(Rgb::new(10, 20, 30));
        assert_eq!(style.sgr(), "\x1b[48;2;10;20;30m");
    }

    #[test]
    fn test_every_modifier_has_its_code() {
        let style = Style::new().bold().dim().italic().underline();
        assert_eq!(style.sgr(), "\x1b[1;2;3;4m");
    }

    #[test]
    fn test_merge_inner_wins() {
        let outer = Style::new().fg(Rgb::new(250, 250, 250)).bold();
        let inner = Style::new().fg(Rgb::new(5, 5, 5)).underline();
        let merged = outer.merge(inner);
        assert_eq!(merged.fg, Some(Rgb::new(5, 5, 5)));
        assert!(merged
            .modifiers
            .contains(Modifiers::BOLD | Modifiers::UNDERLINE));
    }
}
