//! Two-digit numbering for articles and sections.

/// Format a number the way TEN headings number items.
///
/// Single digits are zero-padded to two characters; larger numbers are
/// printed as-is.
///
/// # Examples
/// ```
/// use ten_newsletter::text::format_number;
///
/// assert_eq!(format_number(3), "03");
/// assert_eq!(format_number(12), "12");
/// assert_eq!(format_number(120), "120");
/// ```
pub fn format_number(n: usize) -> String {
    format!("{n:02}")
}
