//! Styled data and escape-aware width math.
//!
//! Everything the renderer knows about text shape lives here: the
//! [`StyledText`] tree block render functions produce, the [`Style`] /
//! [`Rgb`] / [`Modifiers`] attribute types, and the hand-written ANSI
//! scanner used to measure and pad text without counting escape bytes.

pub mod ansi;
mod color;
mod text;

pub use color::{Modifiers, Rgb, Style};
pub use text::StyledText;
