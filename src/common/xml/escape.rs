use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

/// Escape XML special characters for use in text nodes and attribute values.
///
/// # Examples
///
/// ```
/// use pptx_tools::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

/// Strip characters that are not allowed anywhere in an XML 1.0 document.
///
/// Cell values are stringified from arbitrary `Display` implementations, so
/// control characters other than tab, newline and carriage return can appear.
pub fn strip_invalid_xml_chars(s: &str) -> std::borrow::Cow<'_, str> {
    let is_invalid = |c: char| c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r');
    if s.chars().any(is_invalid) {
        std::borrow::Cow::Owned(s.chars().filter(|c| !is_invalid(*c)).collect())
    } else {
        std::borrow::Cow::Borrowed(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_apostrophe() {
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_strip_invalid_chars() {
        assert_eq!(strip_invalid_xml_chars("a\u{1}b\tc"), "ab\tc");
        assert!(matches!(strip_invalid_xml_chars("plain"), std::borrow::Cow::Borrowed(_)));
    }
}
