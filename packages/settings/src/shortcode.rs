// ABOUTME: Shortcode expansion for documents that embed the club data
// ABOUTME: Replaces [clubdata] tags with the rendered public fragment

use regex::{Captures, Regex};

use crate::html::HtmlSafe;

/// Build the matcher for `[tag]`, `[tag /]` and `[tag attr="x"]`.
/// A tag wrapped in double brackets (`[[tag]]`) is an escaped literal.
fn shortcode_pattern(tag: &str) -> Regex {
    let pattern = format!(r"\[(\[?){}(\s[^\]]*)?/?\](\]?)", regex::escape(tag));
    Regex::new(&pattern).expect("escaped shortcode pattern is valid")
}

/// Replace every occurrence of the `tag` shortcode in `document` with
/// `replacement`. Attributes on the tag are accepted and ignored.
pub fn expand_shortcodes(document: &str, tag: &str, replacement: &HtmlSafe) -> String {
    if !document.contains('[') {
        return document.to_string();
    }

    shortcode_pattern(tag)
        .replace_all(document, |caps: &Captures| {
            let open = caps.get(1).map_or("", |m| m.as_str());
            let close = caps.get(3).map_or("", |m| m.as_str());
            let whole = &caps[0];

            if open == "[" && close == "]" {
                whole[1..whole.len() - 1].to_string()
            } else {
                format!("{}{}{}", open, replacement, close)
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fragment() -> HtmlSafe {
        HtmlSafe::escape("FRAGMENT")
    }

    #[test]
    fn test_expands_plain_tag() {
        assert_eq!(
            expand_shortcodes("<p>Kontakt:</p>[clubdata]<p>Ende</p>", "clubdata", &fragment()),
            "<p>Kontakt:</p>FRAGMENT<p>Ende</p>"
        );
    }

    #[test]
    fn test_expands_every_variant() {
        assert_eq!(
            expand_shortcodes("[clubdata /] [clubdata layout=\"wide\"] [clubdata]", "clubdata", &fragment()),
            "FRAGMENT FRAGMENT FRAGMENT"
        );
    }

    #[test]
    fn test_escaped_tag_is_literal() {
        assert_eq!(
            expand_shortcodes("Use [[clubdata]] to embed.", "clubdata", &fragment()),
            "Use [clubdata] to embed."
        );
    }

    #[test]
    fn test_other_tags_untouched() {
        let doc = "[clubdatax] [gallery] [club data]";
        assert_eq!(expand_shortcodes(doc, "clubdata", &fragment()), doc);
    }

    #[test]
    fn test_document_without_tags() {
        assert_eq!(
            expand_shortcodes("Nothing here", "clubdata", &fragment()),
            "Nothing here"
        );
    }
}
