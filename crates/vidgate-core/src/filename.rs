//! Download file naming.

const FALLBACK_NAME: &str = "video";

/// Reduce a video title to a filename-safe form.
///
/// Keeps ASCII letters, digits, `_` and whitespace (every whitespace character becomes a
/// plain space), then trims. A title with nothing left becomes `video`.
pub fn sanitize_title(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                Some(c)
            } else if c.is_whitespace() {
                Some(' ')
            } else {
                None
            }
        })
        .collect();

    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// `Content-Disposition` value for downloading `title` with the given extension.
pub fn content_disposition(title: &str, extension: &str) -> String {
    format!(
        "attachment; filename=\"{}.{}\"",
        sanitize_title(title),
        extension
    )
}
