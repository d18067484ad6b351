/// Text sent when a digest has no lines
pub const EMPTY_MESSAGE: &str = "No data to share";

/// Newline-joined digest: the title, then every line in order.
///
/// A digest without lines becomes [`EMPTY_MESSAGE`]. Length is not limited
/// here; share targets may truncate.
pub fn export_message(title: &str, lines: &[String]) -> String {
    if lines.iter().all(|l| l.trim().is_empty()) {
        return EMPTY_MESSAGE.to_string();
    }

    let mut parts: Vec<&str> = Vec::with_capacity(lines.len() + 1);
    if !title.trim().is_empty() {
        parts.push(title);
    }
    parts.extend(lines.iter().map(String::as_str));
    parts.join("\n")
}

/// Pre-filled share link: `<target>?text=<url-encoded message>`
pub fn share_url(target: &str, message: &str) -> String {
    let separator = if target.contains('?') { '&' } else { '?' };
    format!("{}{}text={}", target, separator, urlencoding::encode(message))
}
