//! Minimal XML element tree and serializer.
//!
//! The draw.io format only needs elements with ordered attributes and child
//! elements; there is no text content and no namespaces. [`Element`] models
//! exactly that and [`write_document`] writes it with an XML declaration.
//!
//! Attribute values are escaped on output, so callers can store arbitrary
//! user-provided strings (device names, metadata values) unchanged.
//! Characters XML 1.0 cannot carry at all (C0 controls other than tab, line
//! feed and carriage return, plus U+FFFE and U+FFFF) are written as U+FFFD.

use std::{fmt, io};

use indexmap::IndexMap;

/// The declaration written at the top of every document.
pub const DECLARATION: &str = "<?xml version='1.0' encoding='utf-8'?>";

/// An XML element with ordered attributes and child elements.
///
/// # Examples
///
/// ```
/// use rackdraw_core::xml::Element;
///
/// let cell = Element::new("mxCell")
///     .with_attr("id", "1")
///     .with_attr("parent", "0");
///
/// assert_eq!(cell.to_string(), r#"<mxCell id="1" parent="0" />"#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attributes: IndexMap<String, String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Returns the element name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets an attribute (builder style).
    pub fn with_attr(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Sets an attribute, replacing any previous value in place.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        self.attributes.insert(key.into(), value.to_string());
    }

    /// Returns the value of an attribute.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Returns all attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Appends a child element (builder style).
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Appends a child element.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    fn write_to<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        write!(out, "<{}", self.name)?;
        for (key, value) in &self.attributes {
            write!(out, " {key}=\"")?;
            escape_attr_into(out, value)?;
            out.write_char('"')?;
        }

        if self.children.is_empty() {
            return out.write_str(" />");
        }

        out.write_char('>')?;
        for child in &self.children {
            child.write_to(out)?;
        }
        write!(out, "</{}>", self.name)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// Writes `root` as a complete document, preceded by [`DECLARATION`].
///
/// # Errors
///
/// Returns any error produced by the underlying writer.
pub fn write_document<W: io::Write>(mut writer: W, root: &Element) -> io::Result<()> {
    writeln!(writer, "{DECLARATION}")?;
    write!(writer, "{root}")?;
    writer.flush()
}

/// Returns `true` if `name` can be used as an XML attribute name.
///
/// This accepts the XML `Name` production minus the colon, which would
/// otherwise introduce a namespace prefix.
///
/// # Examples
///
/// ```
/// use rackdraw_core::xml::is_valid_name;
///
/// assert!(is_valid_name("IP"));
/// assert!(is_valid_name("rack-unit_2"));
/// assert!(is_valid_name("用途"));
/// assert!(!is_valid_name("2fast"));
/// assert!(!is_valid_name("with space"));
/// ```
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    is_name_start_char(first) && chars.all(is_name_char)
}

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | '_'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

/// Escapes `text` for use inside a double-quoted attribute value.
///
/// Characters that are not legal anywhere in an XML document are replaced
/// with U+FFFD.
///
/// # Examples
///
/// ```
/// use rackdraw_core::xml::escape_attr;
///
/// assert_eq!(escape_attr("a&b"), "a&amp;b");
/// assert_eq!(escape_attr("web\u{1}01"), "web\u{FFFD}01");
/// ```
pub fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a String cannot fail.
    let _ = escape_attr_into(&mut out, text);
    out
}

fn escape_attr_into<W: fmt::Write>(out: &mut W, text: &str) -> fmt::Result {
    let mut start = 0usize;
    for (i, c) in text.char_indices() {
        let esc = match c {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' => "&quot;",
            '\'' => "&#39;",
            '\n' => "&#10;",
            '\r' => "&#13;",
            '\t' => "&#9;",
            c if !is_xml_char(c) => "\u{FFFD}",
            _ => continue,
        };
        if start < i {
            out.write_str(&text[start..i])?;
        }
        out.write_str(esc)?;
        start = i + c.len_utf8();
    }
    if start < text.len() {
        out.write_str(&text[start..])?;
    }
    Ok(())
}

/// The XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}'
        | '\u{A}'
        | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("plain"), "plain");
        assert_eq!(
            escape_attr(r#"a<b & "c" 'd'>"#),
            "a&lt;b &amp; &quot;c&quot; &#39;d&#39;&gt;"
        );
        assert_eq!(escape_attr("line\nbreak"), "line&#10;break");
        assert_eq!(escape_attr("机柜 & 1"), "机柜 &amp; 1");
    }

    #[test]
    fn test_escape_attr_replaces_non_xml_chars() {
        assert_eq!(escape_attr("web\u{1}01"), "web\u{FFFD}01");
        assert_eq!(escape_attr("a\u{B}b\u{1F}"), "a\u{FFFD}b\u{FFFD}");
        assert_eq!(escape_attr("\u{FFFE}\u{FFFF}"), "\u{FFFD}\u{FFFD}");
        assert_eq!(escape_attr("tab\tdel\u{7F}"), "tab&#9;del\u{7F}");
        assert_eq!(escape_attr("rack 🗄"), "rack 🗄");
    }

    #[test]
    fn test_nested_elements() {
        let root = Element::new("root")
            .with_child(Element::new("mxCell").with_attr("id", "0"))
            .with_child(
                Element::new("mxCell")
                    .with_attr("id", "1")
                    .with_attr("parent", "0"),
            );

        assert_eq!(
            root.to_string(),
            r#"<root><mxCell id="0" /><mxCell id="1" parent="0" /></root>"#
        );
    }

    #[test]
    fn test_set_attr_replaces_in_place() {
        let mut element = Element::new("diagram")
            .with_attr("name", "Rack 1")
            .with_attr("id", "rack-1");
        element.set_attr("name", "R1");

        let attrs: Vec<_> = element.attributes().collect();
        assert_eq!(attrs, vec![("name", "R1"), ("id", "rack-1")]);
    }

    #[test]
    fn test_write_document_has_declaration() {
        let mut buffer = Vec::new();
        write_document(&mut buffer, &Element::new("mxfile").with_attr("host", "a&b")).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "<?xml version='1.0' encoding='utf-8'?>\n<mxfile host=\"a&amp;b\" />"
        );
    }

    #[test]
    fn test_name_validation() {
        assert!(is_valid_name("a"));
        assert!(is_valid_name("_private"));
        assert!(is_valid_name("状态"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("-dash"));
        assert!(!is_valid_name("ns:attr"));
        assert!(!is_valid_name("a=b"));
    }
}
