use std::fmt::{self, Write as _};

use quick_xml::escape::escape;

use crate::core::{SepaError, SepaResult};

/// An element of the output tree.
///
/// Not a general purpose XML builder: names and text are checked when they
/// are set, a node holds either text or children, and rendering is fully
/// deterministic (attributes keep insertion order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
    text: String,
}

impl XmlNode {
    /// Empty element; fails with [`SepaError::InvalidXmlName`].
    pub fn new(name: &str) -> SepaResult<Self> {
        if !is_valid_xml_name(name) {
            return Err(SepaError::InvalidXmlName(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: String::new(),
        })
    }

    /// Leaf element with text content.
    pub fn with_text(name: &str, text: &str) -> SepaResult<Self> {
        let mut node = Self::new(name)?;
        node.set_text(text)?;
        Ok(node)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child called `name`.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Replace the text content. Only leaf nodes can be rendered with text.
    pub fn set_text(&mut self, value: &str) -> SepaResult<()> {
        if !is_valid_xml_text(value) {
            return Err(SepaError::InvalidXmlText {
                context: format!("element {}", self.name),
                value: value.to_string(),
            });
        }
        self.text = value.to_string();
        Ok(())
    }

    /// Set an attribute; an existing key keeps its position.
    pub fn set_attribute(&mut self, key: &str, value: impl fmt::Display) -> SepaResult<()> {
        if !is_valid_xml_name(key) {
            return Err(SepaError::InvalidXmlName(key.to_string()));
        }
        let value = value.to_string();
        if !is_valid_xml_text(&value) {
            return Err(SepaError::InvalidXmlText {
                context: format!("attribute {key}"),
                value,
            });
        }
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key.to_string(), value)),
        }
        Ok(())
    }

    /// Append `child` and return it for further building.
    pub fn append_child(&mut self, child: XmlNode) -> &mut XmlNode {
        let idx = self.children.len();
        self.children.push(child);
        &mut self.children[idx]
    }

    /// Append a new child element; an empty `text` leaves it self-closing.
    pub fn add_child(&mut self, name: &str, text: &str) -> SepaResult<&mut XmlNode> {
        Ok(self.append_child(Self::with_text(name, text)?))
    }

    /// Append a chain of nested elements (`["Id", "IBAN"]`) and set `text`
    /// on the innermost one, which is returned.
    pub fn add_path(&mut self, path: &[&str], text: &str) -> SepaResult<&mut XmlNode> {
        let Some((last, parents)) = path.split_last() else {
            return Ok(self);
        };
        let mut current = self;
        for name in parents {
            current = current.append_child(Self::new(name)?);
        }
        current.add_child(last, text)
    }

    /// Render this node and its descendants.
    ///
    /// With `pretty`, every level is indented by four spaces and every
    /// element ends with a newline; otherwise no whitespace is added.
    pub fn render(&self, indent: usize, pretty: bool) -> SepaResult<String> {
        let mut out = String::new();
        self.write_into(&mut out, indent, pretty)?;
        Ok(out)
    }

    fn write_into(&self, out: &mut String, level: usize, pretty: bool) -> SepaResult<()> {
        let has_children = !self.children.is_empty();
        let has_text = !self.text.is_empty();
        if has_children && has_text {
            return Err(SepaError::MixedContent(self.name.clone()));
        }

        let newline = if pretty { "\n" } else { "" };
        if pretty {
            out.extend(std::iter::repeat_n("    ", level));
        }

        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            // Writing into a String cannot fail.
            let _ = write!(out, " {key}=\"{}\"", escape(value.as_str()));
        }

        if !has_children && !has_text {
            out.push_str("/>");
            out.push_str(newline);
            return Ok(());
        }
        out.push('>');

        if has_text {
            out.push_str(&escape(self.text.as_str()));
        } else {
            out.push_str(newline);
            for child in &self.children {
                child.write_into(out, level + 1, pretty)?;
            }
            if pretty {
                out.extend(std::iter::repeat_n("    ", level));
            }
        }

        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
        out.push_str(newline);
        Ok(())
    }
}

/// Element and attribute name rule: ASCII letter, `_` or `:` first, then
/// letters, digits, `-`, `.`, `_` or `:`. Names starting with `xml` in any
/// case are reserved, `xmlns` prefixed names excepted.
pub fn is_valid_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_' || first == ':') {
        return false;
    }
    let lower = name.to_ascii_lowercase();
    if lower.starts_with("xml") && !lower.starts_with("xmlns") {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | ':'))
}

/// Whether every character of `text` is allowed in XML 1.0 content.
pub fn is_valid_xml_text(text: &str) -> bool {
    text.chars().all(is_valid_xml_char)
}

/// `Char` production of XML 1.0: tab, LF, CR, U+0020–U+D7FF, U+E000–U+FFFD
/// and U+10000–U+10FFFF. Surrogates cannot occur in a Rust `char`.
pub fn is_valid_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}
