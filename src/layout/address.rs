/// Break a free-form address into display lines.
///
/// The input is split on newlines, then every line containing `", "` is split again on
/// it. Pieces are trimmed and empty ones dropped, so an empty address yields no lines.
///
/// ```
/// use pdf_letter::layout::format_address;
///
/// assert_eq!(
///     format_address("12 Main St, Springfield, IL\nUSA"),
///     vec!["12 Main St", "Springfield", "IL", "USA"],
/// );
/// ```
pub fn format_address(raw: &str) -> Vec<String> {
    raw.split('\n')
        .flat_map(|line| line.split(", "))
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(ToString::to_string)
        .collect()
}
