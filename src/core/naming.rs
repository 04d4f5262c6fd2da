//! File name and script literal helpers

use regex::Regex;
use std::sync::OnceLock;

/// Longest file name most filesystems accept, in bytes
pub const MAX_FILE_NAME_BYTES: usize = 255;

struct Patterns {
    illegal: Regex,
    control: Regex,
    reserved: Regex,
    windows_reserved: Regex,
    windows_trailing: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        illegal: compile(r#"[/?<>\\:*|"]"#),
        control: compile(r"[\x00-\x1f\x{80}-\x{9f}]"),
        reserved: compile(r"^\.+$"),
        windows_reserved: compile(r"(?i)^(con|prn|aux|nul|com[0-9]|lpt[0-9])(\..*)?$"),
        windows_trailing: compile(r"[. ]+$"),
    })
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("file name pattern is a valid literal")
}

/// Makes a string safe to use as a file name on every major OS
///
/// Path separators, `? < > : * | "`, control characters, dot-only names,
/// Windows device names and trailing dots or spaces are removed. The result is
/// truncated to [`MAX_FILE_NAME_BYTES`] on a character boundary and may be
/// empty.
///
/// # Examples
///
/// ```
/// use assetport::core::naming::sanitize_filename;
///
/// assert_eq!(sanitize_filename("hero/banner?.png"), "herobanner.png");
/// assert_eq!(sanitize_filename("CON.png"), "");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let p = patterns();
    let cleaned = p.illegal.replace_all(name, "");
    let cleaned = p.control.replace_all(&cleaned, "");
    let cleaned = p.reserved.replace(&cleaned, "");
    let cleaned = p.windows_reserved.replace(&cleaned, "");
    let cleaned = p.windows_trailing.replace(&cleaned, "");
    truncate_bytes(&cleaned, MAX_FILE_NAME_BYTES).to_string()
}

fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Escapes text for use inside a single- or double-quoted JavaScript string
pub fn escape_js_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("banner.png", "banner.png" ; "plain name unchanged")]
    #[test_case("a/b\\c.png", "abc.png" ; "separators removed")]
    #[test_case("what?<>:*|\".jpg", "what.jpg" ; "reserved punctuation removed")]
    #[test_case("tab\there.png", "tabhere.png" ; "control characters removed")]
    #[test_case("..", "" ; "dot only name")]
    #[test_case("com1.svg", "" ; "windows device name")]
    #[test_case("Lpt9", "" ; "windows device name without extension")]
    #[test_case("console.png", "console.png" ; "device prefix is fine")]
    #[test_case("logo. . ", "logo" ; "trailing dots and spaces")]
    #[test_case("héro.png", "héro.png" ; "non ascii kept")]
    fn test_sanitize_filename(input: &str, expected: &str) {
        assert_eq!(sanitize_filename(input), expected);
    }

    #[test]
    fn test_sanitize_truncates_on_char_boundary() {
        let long = "é".repeat(200);
        let sanitized = sanitize_filename(&long);
        assert!(sanitized.len() <= MAX_FILE_NAME_BYTES);
        assert_eq!(sanitized.chars().count(), 127);
    }

    #[test]
    fn test_escape_js_string() {
        assert_eq!(escape_js_string("/Users/me"), "/Users/me");
        assert_eq!(escape_js_string(r"C:\Art"), r"C:\\Art");
        assert_eq!(escape_js_string("it's \"x\""), r#"it\'s \"x\""#);
        assert_eq!(escape_js_string("a\nb\rc"), r"a\nb\rc");
        assert_eq!(escape_js_string("\u{2028}\u{2029}"), r"\u2028\u2029");
    }
}
