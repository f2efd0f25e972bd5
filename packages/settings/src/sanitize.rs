// ABOUTME: Sanitizers applied to untrusted form input before it is stored
// ABOUTME: Strips markup and control characters; never rejects input

use std::sync::LazyLock;

use clubdata_storage::OptionSanitizer;
use regex::Regex;
use serde_json::Value;

use crate::html::HtmlSafe;
use crate::types::{ClubSettings, ClubSettingsInput, SanitizedText};

static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script[^>]*?>.*?</script>").expect("script pattern is valid")
});

static STYLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<style[^>]*?>.*?</style>").expect("style pattern is valid")
});

static LINE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n\t ]+").expect("whitespace pattern is valid"));

static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" +").expect("space pattern is valid"));

/// Percent-encoded octets such as `%3C`
static PERCENT_OCTET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)%[a-f0-9]{2}").expect("octet pattern is valid"));

static EMAIL_LOCAL_INVALID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-zA-Z0-9!#$%&'*+/=?^_`{|}~.\-]").expect("local part pattern is valid")
});

static EMAIL_DOMAIN_DOTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{2,}").expect("dot run pattern is valid"));

static EMAIL_LABEL_INVALID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[^a-z0-9\-]+").expect("label pattern is valid"));

/// Characters trimmed from both ends of a value
const TRIM_CHARS: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Minimum byte length of anything that could be an address like `a@b.co`
const MIN_EMAIL_LEN: usize = 6;

/// Sanitize single-line text: strip tags and control characters, fold all
/// whitespace (including line breaks) into single spaces, trim.
pub fn sanitize_text_field(input: &str) -> String {
    sanitize_text(input, false)
}

/// Sanitize multi-line text: like [`sanitize_text_field`] but line breaks and
/// tabs are preserved.
pub fn sanitize_textarea_field(input: &str) -> String {
    sanitize_text(input, true)
}

fn sanitize_text(input: &str, keep_newlines: bool) -> String {
    let mut filtered = strip_control_chars(input);

    if filtered.contains('<') {
        filtered = escape_unclosed_less_than(&filtered);
        filtered = strip_all_tags(&filtered);
        filtered = filtered.replace("<\n", "&lt;\n");
    }

    if !keep_newlines {
        filtered = LINE_WHITESPACE.replace_all(&filtered, " ").into_owned();
    }

    filtered = filtered.trim_matches(TRIM_CHARS).to_string();

    let mut found = false;
    while PERCENT_OCTET.is_match(&filtered) {
        filtered = PERCENT_OCTET.replace_all(&filtered, "").into_owned();
        found = true;
    }

    if found {
        filtered = SPACE_RUN
            .replace_all(&filtered, " ")
            .trim_matches(TRIM_CHARS)
            .to_string();
    }

    filtered
}

/// Drop C0 control characters and DEL, keeping tab, line feed and carriage return
fn strip_control_chars(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r') || !c.is_ascii())
        .collect()
}

/// A `<` that is followed by another `<` or by the end of the text before any
/// `>` cannot open a tag; escape that run so tag stripping leaves it alone.
fn escape_unclosed_less_than(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];

        match candidate[1..].find(&['<', '>'][..]) {
            Some(offset) if candidate.as_bytes()[offset + 1] == b'>' => {
                let end = offset + 2;
                out.push_str(&candidate[..end]);
                rest = &candidate[end..];
            }
            Some(offset) => {
                let end = offset + 1;
                out.push_str(HtmlSafe::escape(&candidate[..end]).as_str());
                rest = &candidate[end..];
            }
            None => {
                out.push_str(HtmlSafe::escape(candidate).as_str());
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

/// Remove `<script>`/`<style>` blocks including their content, then every
/// remaining tag, then trim.
fn strip_all_tags(input: &str) -> String {
    let without_scripts = SCRIPT_BLOCK.replace_all(input, "");
    let without_styles = STYLE_BLOCK.replace_all(&without_scripts, "");
    strip_tags(&without_styles)
        .trim_matches(TRIM_CHARS)
        .to_string()
}

/// Remove tags. A `<` followed by whitespace is literal text; an unterminated
/// tag swallows the rest of the input.
fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if c != '<' {
            out.push(c);
            continue;
        }

        match chars.peek() {
            None => out.push(c),
            Some((_, next)) if next.is_whitespace() => out.push(c),
            Some(_) => match input[idx..].find('>') {
                Some(close) => {
                    let resume = idx + close;
                    while let Some((pos, _)) = chars.peek() {
                        if *pos > resume {
                            break;
                        }
                        chars.next();
                    }
                }
                None => break,
            },
        }
    }

    out
}

/// Reduce an address to the characters allowed in an email address.
///
/// Returns an empty string when the result cannot be an address at all: too
/// short, no `@` after the first character, an empty local part, or fewer
/// than two domain labels.
pub fn sanitize_email(input: &str) -> String {
    if input.len() < MIN_EMAIL_LEN {
        return String::new();
    }

    let at = match input.char_indices().skip(1).find(|(_, c)| *c == '@') {
        Some((at, _)) => at,
        None => return String::new(),
    };

    let (local, domain) = (&input[..at], &input[at + 1..]);

    let local = EMAIL_LOCAL_INVALID.replace_all(local, "");
    if local.is_empty() {
        return String::new();
    }

    let domain = EMAIL_DOMAIN_DOTS.replace_all(domain, "");
    let domain = domain.trim_matches(|c| TRIM_CHARS.contains(&c) || c == '.');
    if domain.is_empty() {
        return String::new();
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return String::new();
    }

    let labels: Vec<String> = labels
        .into_iter()
        .map(|label| {
            let label = label.trim_matches(|c| TRIM_CHARS.contains(&c) || c == '-');
            EMAIL_LABEL_INVALID.replace_all(label, "").into_owned()
        })
        .filter(|label| !label.is_empty())
        .collect();

    if labels.len() < 2 {
        return String::new();
    }

    format!("{}@{}", local, labels.join("."))
}

/// Sanitize a whole submission into the record that gets stored.
///
/// The phone number is single-line text; address and email both go through
/// the multi-line sanitizer. Missing fields become empty strings.
pub fn sanitize_settings(input: &ClubSettingsInput) -> ClubSettings {
    ClubSettings {
        phone: SanitizedText::single_line(input.phone.as_deref().unwrap_or_default()),
        email: SanitizedText::multi_line(input.email.as_deref().unwrap_or_default()),
        address: SanitizedText::multi_line(input.address.as_deref().unwrap_or_default()),
    }
}

/// Sanitize hook handed to the option store for the club record
#[derive(Debug, Clone, Copy, Default)]
pub struct ClubSettingsSanitizer;

impl OptionSanitizer for ClubSettingsSanitizer {
    fn sanitize_option(&self, raw: &Value) -> Value {
        sanitize_settings(&ClubSettingsInput::from_value(raw)).to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("  030 / 123 456  ", "030 / 123 456")]
    #[case("+49 (30)\n123-456", "+49 (30) 123-456")]
    #[case("a\t\t b\r\nc", "a b c")]
    #[case("<b>0800</b> 123", "0800 123")]
    #[case("<script>alert(1)</script>0800", "0800")]
    #[case("1 < 2", "1 &lt; 2")]
    #[case("call %3Cme%3E now", "call me now")]
    #[case("", "")]
    fn test_sanitize_text_field(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_text_field(input), expected);
    }

    #[test]
    fn test_sanitize_textarea_keeps_line_breaks() {
        assert_eq!(
            sanitize_textarea_field("  Hauptstr. 1\n\n12345 Berlin \n"),
            "Hauptstr. 1\n\n12345 Berlin"
        );
    }

    #[test]
    fn test_sanitize_textarea_strips_tags() {
        assert_eq!(
            sanitize_textarea_field("<p>Vereinsheim</p>\n<style>p{}</style>Am See 3"),
            "Vereinsheim\nAm See 3"
        );
        assert_eq!(sanitize_textarea_field("<script>alert(1)</script>"), "");
    }

    #[test]
    fn test_sanitize_removes_control_characters() {
        assert_eq!(sanitize_text_field("a\u{0}b\u{7}c\u{7f}"), "abc");
        assert_eq!(sanitize_textarea_field("a\u{1b}[31m\nb"), "a[31m\nb");
    }

    #[test]
    fn test_unclosed_tag_consumes_rest() {
        assert_eq!(sanitize_text_field("hello <b x"), "hello &lt;b x");
        assert_eq!(strip_tags("a<b c"), "a");
    }

    #[test]
    fn test_less_than_before_whitespace_is_text() {
        assert_eq!(sanitize_text_field("a < b > c"), "a < b > c");
        assert_eq!(sanitize_textarea_field("x <\n>y"), "x &lt;\n>y");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let inputs = [
            "<em>Tel</em>: +49 (30) 123 %20 456",
            "Line1\n\n<b>Line2</b>\n 1 < 2",
            "<<b>x",
            "plain & simple",
            "<script>bad()</script>",
        ];

        for input in inputs {
            let once = sanitize_text_field(input);
            assert_eq!(sanitize_text_field(&once), once, "text: {:?}", input);

            let once = sanitize_textarea_field(input);
            assert_eq!(sanitize_textarea_field(&once), once, "textarea: {:?}", input);
        }
    }

    #[test]
    fn test_sanitize_settings_missing_fields_are_empty() {
        let settings = sanitize_settings(&ClubSettingsInput {
            phone: Some(" 030\n1234 ".to_string()),
            email: None,
            address: None,
        });

        assert_eq!(settings.phone.as_str(), "030 1234");
        assert_eq!(settings.email.as_str(), "");
        assert_eq!(settings.address.as_str(), "");
    }

    #[test]
    fn test_sanitize_settings_email_keeps_line_breaks() {
        let settings = sanitize_settings(&ClubSettingsInput {
            phone: None,
            email: Some("info@verein.de\nvorstand@verein.de".to_string()),
            address: None,
        });

        assert_eq!(settings.email.as_str(), "info@verein.de\nvorstand@verein.de");
    }

    #[test]
    fn test_club_settings_sanitizer_output_shape() {
        let stored = ClubSettingsSanitizer.sanitize_option(&serde_json::json!({
            "address": "<b>Am See 3</b>",
            "unexpected": "dropped"
        }));

        assert_eq!(
            stored,
            serde_json::json!({"phone": "", "email": "", "address": "Am See 3"})
        );
    }

    #[rstest]
    #[case("a@b.com", "a@b.com")]
    #[case("Info@Verein.de", "Info@Verein.de")]
    #[case(" in fo@ver ein.de", "info@verein.de")]
    #[case("info@verein..de", "")]
    #[case("info@mail..verein.de", "info@mailverein.de")]
    #[case("info@-verein-.de.", "info@verein.de")]
    #[case("a@b.c", "")]
    #[case("@verein.de", "")]
    #[case("info.verein.de", "")]
    #[case("info@localhost", "")]
    #[case("()@verein.de", "")]
    #[case("", "")]
    fn test_sanitize_email(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_email(input), expected);
    }
}
