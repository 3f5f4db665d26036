// Helper functions shared across the bundler

use lazy_static::lazy_static;
use regex::Regex;

/// Token in a target filename that gets replaced with the extension
/// derived from the asset URL (e.g. `"01 - Intro.{ext}"`).
pub const EXT_PLACEHOLDER: &str = "{ext}";

/// Upper bound for error text forwarded to the UI.
pub const MAX_STATUS_LEN: usize = 200;

lazy_static! {
    // Same character class the web UI rejects in filenames
    static ref UNSAFE_CHARS_RE: Regex = Regex::new(r#"[<>:"/\\|?*]"#).unwrap();
    // Trailing `.ext` of a URL path, query string already stripped
    static ref URL_EXT_RE: Regex = Regex::new(r"\.([A-Za-z0-9]{1,5})$").unwrap();
}

/// Normalize arbitrary text into a safe path segment.
///
/// Replaces `< > : " / \ | ? *` with `-` and trims surrounding
/// whitespace. Total and idempotent.
pub fn sanitize_file_name(name: &str) -> String {
    UNSAFE_CHARS_RE.replace_all(name, "-").trim().to_string()
}

/// Extract the file extension from a URL's path component, if any.
///
/// Query string and fragment are ignored, so
/// `https://cdn/a/track.mp3?sig=x` yields `Some("mp3")`.
pub fn extension_from_url(url: &str) -> Option<String> {
    let path = url
        .split(['?', '#'])
        .next()
        .unwrap_or(url);
    URL_EXT_RE
        .captures(path)
        .map(|c| c[1].to_lowercase())
}

/// Resolve the `{ext}` placeholder in a target filename against the
/// asset URL, falling back to `default_ext` when the URL path carries
/// no extension. Filenames without the placeholder pass through.
pub fn resolve_target_filename(target: &str, url: &str, default_ext: &str) -> String {
    if !target.contains(EXT_PLACEHOLDER) {
        return target.to_string();
    }
    let ext = extension_from_url(url).unwrap_or_else(|| default_ext.to_string());
    target.replace(EXT_PLACEHOLDER, &ext)
}

/// Truncate a status/error message to `MAX_STATUS_LEN` characters,
/// appending an ellipsis when anything was cut.
pub fn truncate_message(msg: &str) -> String {
    if msg.chars().count() <= MAX_STATUS_LEN {
        return msg.to_string();
    }
    let cut: String = msg.chars().take(MAX_STATUS_LEN).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_unsafe_chars() {
        assert_eq!(
            sanitize_file_name(r#"a<b>c:d"e/f\g|h?i*j"#),
            "a-b-c-d-e-f-g-h-i-j"
        );
    }

    #[test]
    fn test_sanitize_trims_whitespace() {
        assert_eq!(sanitize_file_name("  My Card  "), "My Card");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let once = sanitize_file_name("  Track: 1/2? *final*  ");
        assert_eq!(sanitize_file_name(&once), once);
    }

    #[test]
    fn test_sanitize_output_has_no_unsafe_chars() {
        let out = sanitize_file_name(r#"<>:"/\|?* mixed <in> text"#);
        for c in ['<', '>', ':', '"', '/', '\\', '|', '?', '*'] {
            assert!(!out.contains(c), "found {:?} in {:?}", c, out);
        }
    }

    #[test]
    fn test_extension_from_url() {
        assert_eq!(
            extension_from_url("https://cdn.example.com/a/track.mp3"),
            Some("mp3".to_string())
        );
        assert_eq!(
            extension_from_url("https://cdn.example.com/a/track.MP3?sig=abc&x=1"),
            Some("mp3".to_string())
        );
        assert_eq!(extension_from_url("https://cdn.example.com/a/track"), None);
    }

    #[test]
    fn test_resolve_target_filename_placeholder() {
        assert_eq!(
            resolve_target_filename("01 - Intro.{ext}", "https://c/x/audio.mp3", "mp3"),
            "01 - Intro.mp3"
        );
        // URL without extension falls back to the per-kind default
        assert_eq!(
            resolve_target_filename("1 - Icon.{ext}", "https://c/icons/abcdef", "jpg"),
            "1 - Icon.jpg"
        );
        // No placeholder: untouched
        assert_eq!(
            resolve_target_filename("Card - Details.txt", "https://ignored", "mp3"),
            "Card - Details.txt"
        );
    }

    #[test]
    fn test_truncate_message() {
        let short = "all good";
        assert_eq!(truncate_message(short), short);

        let long = "x".repeat(MAX_STATUS_LEN + 50);
        let cut = truncate_message(&long);
        assert!(cut.chars().count() <= MAX_STATUS_LEN + 1);
        assert!(cut.ends_with('…'));
    }
}
