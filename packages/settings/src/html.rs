// ABOUTME: HTML-safe string type and the escaping functions that produce it
// ABOUTME: Every render path builds markup from HtmlSafe values only

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Syntactically valid character references (`&name;`, `&#123;`, `&#x7B;`).
/// Names are not checked against the HTML entity table.
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);")
        .expect("entity pattern is valid")
});

/// Blank-line separators between paragraphs
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("paragraph pattern is valid"));

/// Single line breaks inside a paragraph, with trailing whitespace before them
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\n").expect("line break pattern is valid"));

/// Text that is safe to embed in HTML element content and quoted attributes.
///
/// The only ways to obtain one are [`HtmlSafe::escape`],
/// [`HtmlSafe::escape_textarea`], or the markup builders in this crate that
/// compose already-escaped values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HtmlSafe(String);

impl HtmlSafe {
    /// Escape `&`, `<`, `>`, `"` and `'`. Anything shaped like a character
    /// reference is not encoded a second time, so `&amp;` stays `&amp;`. This
    /// includes unknown names such as `&foo;`, which cannot carry markup.
    pub fn escape(text: &str) -> Self {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for entity in ENTITY.find_iter(text) {
            encode_into(&text[last..entity.start()], &mut out);
            out.push_str(entity.as_str());
            last = entity.end();
        }
        encode_into(&text[last..], &mut out);

        Self(out)
    }

    /// Escape for textarea content. Unlike [`HtmlSafe::escape`] every `&` is
    /// encoded, so whatever the browser shows is submitted back unchanged.
    pub fn escape_textarea(text: &str) -> Self {
        let mut out = String::with_capacity(text.len());
        encode_into(text, &mut out);
        Self(out)
    }

    /// Markup assembled by this crate from escaped parts
    pub(crate) fn from_markup(markup: String) -> Self {
        Self(markup)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert blank-line separated blocks into `<p>` elements and single
    /// newlines into `<br />`. Whitespace-only input yields an empty value.
    pub fn paragraphs(&self) -> HtmlSafe {
        let normalized = self.0.replace("\r\n", "\n").replace('\r', "\n");
        if normalized.trim().is_empty() {
            return HtmlSafe::default();
        }

        let mut out = String::new();
        for block in PARAGRAPH_BREAK.split(&normalized) {
            let block = block.trim_matches('\n');
            if block.trim().is_empty() {
                continue;
            }
            out.push_str("<p>");
            out.push_str(&LINE_BREAK.replace_all(block, "<br />\n"));
            out.push_str("</p>\n");
        }

        HtmlSafe(out)
    }
}

impl fmt::Display for HtmlSafe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HtmlSafe {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn encode_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
}
