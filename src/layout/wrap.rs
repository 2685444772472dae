use super::measure::{FontStyle, TextMeasurer};
use crate::error::MeasurementError;
use crate::units::Pt;

/// Greedily wraps a single line of text (no embedded newlines) into lines no wider than
/// `max_width`.
///
/// Words are whitespace-delimited and re-joined with single spaces. A candidate line
/// wraps only when it is strictly wider than `max_width`, so text that exactly fills the
/// column stays on one line. A word that is wider than `max_width` on its own is emitted
/// on a line by itself, unbroken: letters are never hyphenated or truncated.
///
/// Empty or whitespace-only input produces no lines.
pub fn wrap_line<M: TextMeasurer + ?Sized>(
    measurer: &M,
    text: &str,
    style: FontStyle,
    size: Pt,
    max_width: Pt,
) -> Result<Vec<String>, MeasurementError> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measurer.text_width(&candidate, style, size)? > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        // a lone word is never split, but it still has to be measurable
        if lines.is_empty() {
            measurer.text_width(&current, style, size)?;
        }
        lines.push(current);
    }

    Ok(lines)
}
