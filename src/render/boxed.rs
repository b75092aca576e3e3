//! Fixed-rectangle fitting for block repaints.
//!
//! A repaint must cover every row the previous paint occupied, otherwise
//! stale characters survive at the right edge and below shrinking content.
//! Fitting pads each line to the full width and blank-fills missing rows,
//! so overwriting the rectangle is itself the erase.

use crate::style::ansi;

/// Right-pad `lines` to `min_width` visible columns and blank-fill to
/// `min_height` rows. Escape sequences count as zero columns.
pub fn fit(mut lines: Vec<String>, min_width: usize, min_height: usize) -> Vec<String> {
    for line in &mut lines {
        let cols = ansi::visible_width(line);
        if cols < min_width {
            line.push_str(&" ".repeat(min_width - cols));
        }
    }
    while lines.len() < min_height {
        lines.push(" ".repeat(min_width));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pads_lines_to_width() {
        let rows = fit(vec!["ab".to_string()], 4, 1);
        assert_eq!(rows, vec!["ab  "]);
    }

    #[test]
    fn test_blank_fills_to_height() {
        let rows = fit(vec!["ab".to_string()], 3, 3);
        assert_eq!(rows, vec!["ab ", "   ", "   "]);
    }

    #[test]
    fn test_escapes_do_not_count() {
        let rows = fit(vec!["\x1b[1mx\x1b[0m".to_string()], 3, 1);
        assert_eq!(rows, vec!["\x1b[1mx\x1b[0m  "]);
    }

    #[test]
    fn test_full_line_untouched() {
        let rows = fit(vec!["abcd".to_string()], 4, 1);
        assert_eq!(rows, vec!["abcd"]);
    }
}
