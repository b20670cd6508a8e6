//! Terminal punctuation required by the TEN standard.

/// Characters that already end a title, line or list item.
const TERMINATORS: [char; 6] = ['.', ':', ';', '!', '?', ','];

/// Make sure text ends with punctuation.
///
/// Trailing whitespace is removed. Text that does not already end in one of
/// `. : ; ! ? ,` gets a `;` if it is a list item (starts with
/// `list_item_prefix`) and a `.` otherwise. Blank text stays empty.
///
/// # Examples
/// ```
/// use ten_newsletter::text::ensure_full_stop;
///
/// assert_eq!(ensure_full_stop("Hello world", "- "), "Hello world.");
/// assert_eq!(ensure_full_stop("- List item", "- "), "- List item;");
/// assert_eq!(ensure_full_stop("Really?  ", "- "), "Really?");
/// assert_eq!(ensure_full_stop("   ", "- "), "");
/// ```
pub fn ensure_full_stop(text: &str, list_item_prefix: &str) -> String {
    let text = text.trim_end();
    if text.is_empty() || text.ends_with(TERMINATORS) {
        return text.to_string();
    }

    // An empty prefix would make every line a list item
    let terminator = if !list_item_prefix.is_empty() && text.starts_with(list_item_prefix) {
        ';'
    } else {
        '.'
    };

    let mut result = String::with_capacity(text.len() + 1);
    result.push_str(text);
    result.push(terminator);
    result
}
