//! Minimal XML tree over `quick-xml` events
//!
//! Every parsed node keeps the exact source text it came from, so rendering a
//! document re-emits untouched markup byte-for-byte. Only elements built in
//! code are serialized from their name, attributes and children.
//!
//! `quick-xml` does not check every well-formedness constraint, so
//! [`check_conformance`] runs `roxmltree` over the same input before any
//! tree built here is trusted.

use quick_xml::Reader;
use quick_xml::escape::{escape, partial_escape, unescape};
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::fmt;

/// Indentation used when a document gives no hint of its own
pub(crate) const DEFAULT_INDENT: &str = " ";

/// XML whitespace: space, tab, carriage return, line feed
pub(crate) fn is_blank(text: &str) -> bool {
    text.chars().all(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

/// Characters allowed anywhere in an XML 1.0 document
pub(crate) fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..)
}

/// Byte order mark some editors put in front of UTF-8 files
const BOM: char = '\u{FEFF}';

/// Error raised for input that is not well-formed XML
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParseError {
    position: Option<usize>,
    message: String,
}

impl ParseError {
    fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position: Some(position),
            message: message.into(),
        }
    }

    /// Error whose message already carries its own location
    fn located(message: impl Into<String>) -> Self {
        Self {
            position: None,
            message: message.into(),
        }
    }

    fn shifted(mut self, offset: usize) -> Self {
        if let Some(position) = &mut self.position {
            *position += offset;
        }
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{} at byte {position}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Check `source` against the full XML 1.0 and namespace rules
///
/// Catches what the event reader lets through: malformed names, `--` in
/// comments, characters outside the XML range, `<` in attribute values and
/// unbound namespace prefixes. A document type declaration is allowed; its
/// internal entities are never used by [`Document`].
pub(crate) fn check_conformance(source: &str) -> Result<(), ParseError> {
    let body = source.strip_prefix(BOM).unwrap_or(source);
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    roxmltree::Document::parse_with_options(body, options)
        .map(|_| ())
        .map_err(|e| ParseError::located(e.to_string()))
}

/// Keep attribute whitespace from being normalized to spaces on the next read
fn escape_layout(text: &str) -> String {
    text.replace('\t', "&#9;")
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Element(Element),
    /// Character data, escaped as in the source
    Text(String),
    /// Complete `<![CDATA[...]]>` section
    CData(String),
    /// Comment, processing instruction, XML declaration or doctype
    Markup(String),
}

impl Node {
    pub(crate) fn is_whitespace(&self) -> bool {
        matches!(self, Node::Text(raw) if is_blank(raw))
    }

    fn render_into(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.render_into(out),
            Node::Text(raw) | Node::CData(raw) | Node::Markup(raw) => out.push_str(raw),
        }
    }
}

/// Content of a CDATA section without its delimiters
pub(crate) fn cdata_content(raw: &str) -> &str {
    raw.strip_prefix("<![CDATA[")
        .and_then(|inner| inner.strip_suffix("]]>"))
        .unwrap_or(raw)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Tags {
    /// Source text of the start tag, and of the end tag unless self-closing
    Parsed { start: String, end: Option<String> },
    Built,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
    tags: Tags,
}

impl Element {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            tags: Tags::Built,
        }
    }

    pub(crate) fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub(crate) fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Append character data; `<`, `&`, `>` and carriage returns are escaped.
    pub(crate) fn with_text(mut self, text: &str) -> Self {
        if !text.is_empty() {
            self.children
                .push(Node::Text(partial_escape(text).replace('\r', "&#13;")));
        }
        self
    }

    fn parsed(tag: &BytesStart<'_>, raw: &str, position: usize) -> Result<Self, ParseError> {
        let name = std::str::from_utf8(tag.name().as_ref())
            .map_err(|e| ParseError::new(position, e.to_string()))?
            .to_string();

        let mut attributes = Vec::new();
        for attr in tag.attributes() {
            let attr = attr.map_err(|e| ParseError::new(position, e.to_string()))?;
            if attr.value.contains(&b'<') {
                return Err(ParseError::new(position, "'<' in attribute value"));
            }
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| ParseError::new(position, e.to_string()))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| ParseError::new(position, e.to_string()))?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
            tags: Tags::Parsed {
                start: raw.to_string(),
                end: None,
            },
        })
    }

    fn close(&mut self, raw: &str) {
        if let Tags::Parsed { end, .. } = &mut self.tags {
            *end = Some(raw.to_string());
        }
    }

    /// Turn a parsed self-closing element into one that can hold children.
    fn open(&mut self) {
        if let Tags::Parsed { start, end } = &mut self.tags
            && end.is_none()
        {
            let head = start.strip_suffix("/>").unwrap_or(start.as_str());
            *start = format!("{head}>");
            *end = Some(format!("</{}>", self.name));
        }
    }

    /// Reverse of [`Element::open`] for a parsed element left without children
    fn collapse(&mut self) {
        if let Tags::Parsed { start, end } = &mut self.tags
            && end.is_some()
            && self.children.is_empty()
            && let Some(head) = start.strip_suffix('>')
        {
            *start = format!("{head}/>");
            *end = None;
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub(crate) fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    pub(crate) fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |element| element.name == name)
    }

    /// Unescaped character data of the direct children
    pub(crate) fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Text(raw) => match unescape(raw) {
                    Ok(text) => out.push_str(&text),
                    Err(_) => out.push_str(raw),
                },
                Node::CData(raw) => out.push_str(cdata_content(raw)),
                _ => {}
            }
        }
        out
    }

    /// Indentation of this element's children when laid out one per line
    ///
    /// Returns `None` for compact layouts, including an explicit empty
    /// `<e></e>`. Without child elements to learn from, a self-closing
    /// element or one holding only whitespace gets the default indentation.
    pub(crate) fn child_indent(&self) -> Option<String> {
        if self.elements().next().is_none() {
            let explicit_empty =
                self.children.is_empty() && matches!(&self.tags, Tags::Parsed { end: Some(_), .. });
            return (!explicit_empty).then(|| DEFAULT_INDENT.to_string());
        }
        self.children.windows(2).find_map(|pair| match pair {
            [Node::Text(raw), Node::Element(_)] if is_blank(raw) => {
                raw.rfind('\n').map(|at| raw[at + 1..].to_string())
            }
            _ => None,
        })
    }

    /// Lay out built children one per line, `depth` levels of `unit` deep
    pub(crate) fn indent(&mut self, unit: &str, depth: usize) {
        if self.elements().next().is_none() {
            return;
        }
        let inner = format!("\n{}", unit.repeat(depth + 1));
        let outer = format!("\n{}", unit.repeat(depth));

        let mut laid_out = Vec::with_capacity(self.children.len() * 2 + 1);
        for mut child in self.children.drain(..) {
            if let Node::Element(element) = &mut child {
                element.indent(unit, depth + 1);
            }
            laid_out.push(Node::Text(inner.clone()));
            laid_out.push(child);
        }
        laid_out.push(Node::Text(outer));
        self.children = laid_out;
    }

    /// Append `child` as the last child element
    ///
    /// With an indentation the child goes on its own line, before the
    /// whitespace that precedes this element's closing tag. Only the line
    /// break in front of the child is added, so removing the child together
    /// with that whitespace restores the previous text exactly.
    pub(crate) fn append_element(&mut self, child: Element, indent: Option<&str>) {
        self.open();
        let Some(indent) = indent else {
            self.children.push(Node::Element(child));
            return;
        };

        let at = match self.children.last() {
            Some(last) if last.is_whitespace() => self.children.len() - 1,
            _ => self.children.len(),
        };
        self.children.insert(at, Node::Element(child));
        self.children.insert(at, Node::Text(format!("\n{indent}")));
    }

    /// Remove every direct child element matching `predicate`
    ///
    /// The whitespace directly in front of a removed element goes with it,
    /// which undoes the layout added by [`Element::append_element`]. An
    /// element emptied that way is written self-closing again.
    pub(crate) fn remove_elements_where(&mut self, predicate: impl Fn(&Element) -> bool) -> usize {
        let mut removed = 0;
        let mut took_layout = false;
        let mut index = self.children.len();
        while index > 0 {
            index -= 1;
            let hit = matches!(&self.children[index], Node::Element(element) if predicate(element));
            if !hit {
                continue;
            }
            self.children.remove(index);
            removed += 1;
            if index > 0 && self.children[index - 1].is_whitespace() {
                self.children.remove(index - 1);
                took_layout = true;
                index -= 1;
            }
        }
        if took_layout {
            self.collapse();
        }
        removed
    }

    fn render_into(&self, out: &mut String) {
        match &self.tags {
            Tags::Parsed { start, end } => {
                out.push_str(start);
                for child in &self.children {
                    child.render_into(out);
                }
                if let Some(end) = end {
                    out.push_str(end);
                }
            }
            Tags::Built => {
                out.push('<');
                out.push_str(&self.name);
                for (name, value) in &self.attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_layout(&escape(value.as_str())));
                    out.push('"');
                }
                if self.children.is_empty() {
                    out.push_str("/>");
                    return;
                }
                out.push('>');
                for child in &self.children {
                    child.render_into(out);
                }
                out.push_str("</");
                out.push_str(&self.name);
                out.push('>');
            }
        }
    }
}

/// A parsed XML document: prolog, a single root element, epilog
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Document {
    bom: bool,
    prolog: Vec<Node>,
    root: Element,
    epilog: Vec<Node>,
}

impl Document {
    /// Parse `source`, requiring well-formed XML with exactly one root
    ///
    /// Entity references other than the predefined ones are rejected; no
    /// external resource is ever resolved. A leading byte order mark is kept
    /// and written back by [`Document::render`].
    pub(crate) fn parse(source: &str) -> Result<Self, ParseError> {
        match source.strip_prefix(BOM) {
            Some(body) => Self::parse_body(body, true).map_err(|e| e.shifted(BOM.len_utf8())),
            None => Self::parse_body(source, false),
        }
    }

    fn parse_body(source: &str, bom: bool) -> Result<Self, ParseError> {
        if let Some((at, c)) = source.char_indices().find(|&(_, c)| !is_xml_char(c)) {
            return Err(ParseError::new(at, format!("character U+{:04X} is not allowed", c as u32)));
        }
        let mut reader = Reader::from_str(source);
        let mut stack: Vec<Element> = Vec::new();
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let start = reader.buffer_position() as usize;
            let event = reader
                .read_event()
                .map_err(|e| ParseError::new(start, e.to_string()))?;
            let end = reader.buffer_position() as usize;
            let raw = source
                .get(start..end)
                .ok_or_else(|| ParseError::new(start, "event outside of input"))?;

            let node = match event {
                Event::Start(tag) => {
                    stack.push(Element::parsed(&tag, raw, start)?);
                    continue;
                }
                Event::Empty(tag) => Node::Element(Element::parsed(&tag, raw, start)?),
                Event::End(_) => {
                    let mut element = stack
                        .pop()
                        .ok_or_else(|| ParseError::new(start, "unexpected closing tag"))?;
                    element.close(raw);
                    Node::Element(element)
                }
                Event::Text(_) => {
                    if raw.contains("]]>") {
                        return Err(ParseError::new(start, "']]>' in character data"));
                    }
                    unescape(raw).map_err(|e| ParseError::new(start, e.to_string()))?;
                    Node::Text(raw.to_string())
                }
                Event::CData(_) => Node::CData(raw.to_string()),
                Event::Comment(_) => {
                    let inner = raw
                        .strip_prefix("<!--")
                        .and_then(|rest| rest.strip_suffix("-->"))
                        .unwrap_or(raw);
                    if inner.contains("--") || inner.ends_with('-') {
                        return Err(ParseError::new(start, "'--' inside a comment"));
                    }
                    Node::Markup(raw.to_string())
                }
                Event::PI(_) => Node::Markup(raw.to_string()),
                Event::Decl(_) if start != 0 => {
                    return Err(ParseError::new(start, "XML declaration not at the start"));
                }
                Event::Decl(_) | Event::DocType(_) => {
                    if root.is_some() || !stack.is_empty() {
                        return Err(ParseError::new(start, "declaration after the root element"));
                    }
                    Node::Markup(raw.to_string())
                }
                Event::Eof => break,
            };

            if let Some(parent) = stack.last_mut() {
                parent.children.push(node);
                continue;
            }
            match node {
                Node::Element(element) => {
                    if root.is_some() {
                        return Err(ParseError::new(start, "more than one root element"));
                    }
                    root = Some(element);
                }
                Node::Text(raw) if !is_blank(&raw) => {
                    return Err(ParseError::new(start, "text outside of the root element"));
                }
                Node::CData(_) => {
                    return Err(ParseError::new(start, "CDATA outside of the root element"));
                }
                other if root.is_none() => prolog.push(other),
                other => epilog.push(other),
            }
        }

        if let Some(open) = stack.last() {
            return Err(ParseError::new(
                source.len(),
                format!("unclosed element <{}>", open.name),
            ));
        }
        let root = root.ok_or_else(|| ParseError::new(source.len(), "no root element"))?;
        Ok(Self {
            bom,
            prolog,
            root,
            epilog,
        })
    }

    pub(crate) fn root(&self) -> &Element {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub(crate) fn render(&self) -> String {
        let mut out = String::new();
        if self.bom {
            out.push(BOM);
        }
        for node in &self.prolog {
            node.render_into(&mut out);
        }
        self.root.render_into(&mut out);
        for node in &self.epilog {
            node.render_into(&mut out);
        }
        out
    }
}

/// Child elements of `element` paired with XPath-like locations under `path`
pub(crate) fn located_children<'a>(element: &'a Element, path: &str) -> Vec<(&'a Element, String)> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    element
        .elements()
        .map(|child| {
            let index = seen.entry(child.name()).or_insert(0);
            *index += 1;
            (child, format!("{path}/{}[{index}]", child.name()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE xbel>
<xbel xmlns:bookmark="http://www.freedesktop.org/standards/desktop-bookmarks">
 <!-- places -->
 <bookmark href="file:///home/u">
  <title>Home &amp; more</title>
  <info>
   <metadata owner="http://freedesktop.org">
    <bookmark:icon name="user-home"/>
   </metadata>
  </info>
 </bookmark>
 <separator/>
</xbel>
"#;

    #[test]
    fn test_render_is_byte_identical() {
        let document = Document::parse(PLACES).unwrap();
        assert_eq!(document.render(), PLACES);
    }

    #[test]
    fn test_parse_exposes_structure() {
        let document = Document::parse(PLACES).unwrap();
        let root = document.root();
        assert_eq!(root.name(), "xbel");

        let bookmark = root.elements_named("bookmark").next().unwrap();
        assert_eq!(bookmark.attribute("href"), Some("file:///home/u"));
        let title = bookmark.elements_named("title").next().unwrap();
        assert_eq!(title.text(), "Home & more");
    }

    #[test]
    fn test_child_indent_detected() {
        let document = Document::parse(PLACES).unwrap();
        assert_eq!(document.root().child_indent().as_deref(), Some(" "));
    }

    #[test]
    fn test_child_indent_compact() {
        let document = Document::parse("<xbel><bookmark href=\"x\"/></xbel>").unwrap();
        assert_eq!(document.root().child_indent(), None);
    }

    #[test]
    fn test_child_indent_default_without_children() {
        let document = Document::parse("<xbel>\n</xbel>").unwrap();
        assert_eq!(document.root().child_indent().as_deref(), Some(DEFAULT_INDENT));
    }

    #[test]
    fn test_append_then_remove_round_trips() {
        let mut document = Document::parse(PLACES).unwrap();
        let indent = document.root().child_indent();

        let mut added = Element::new("bookmark")
            .with_attribute("href", "file:///b")
            .with_child(Element::new("title").with_text("B"));
        added.indent(indent.as_deref().unwrap(), 1);
        document
            .root_mut()
            .append_element(added, indent.as_deref());

        let rendered = document.render();
        assert!(rendered.contains(
            " <separator/>\n <bookmark href=\"file:///b\">\n  <title>B</title>\n </bookmark>\n</xbel>"
        ));

        let removed = document
            .root_mut()
            .remove_elements_where(|el| el.attribute("href") == Some("file:///b"));
        assert_eq!(removed, 1);
        assert_eq!(document.render(), PLACES);
    }

    #[test]
    fn test_append_to_self_closing_root() {
        let mut document = Document::parse("<xbel/>").unwrap();
        document
            .root_mut()
            .append_element(Element::new("separator"), None);
        assert_eq!(document.render(), "<xbel><separator/></xbel>");
    }

    #[test]
    fn test_built_text_and_attributes_are_escaped() {
        let mut document = Document::parse("<xbel></xbel>").unwrap();
        document.root_mut().append_element(
            Element::new("bookmark")
                .with_attribute("href", "file:///a\"b")
                .with_child(Element::new("title").with_text("< & >")),
            None,
        );
        let rendered = document.render();
        assert!(rendered.contains("<title>&lt; &amp; &gt;</title>"));
        assert!(rendered.contains("href=\"file:///a&quot;b\""));

        let reparsed = Document::parse(&rendered).unwrap();
        let title = reparsed
            .root()
            .elements_named("bookmark")
            .next()
            .unwrap()
            .elements_named("title")
            .next()
            .unwrap()
            .text();
        assert_eq!(title, "< & >");
    }

    #[test]
    fn test_cdata_text() {
        let document = Document::parse("<title><![CDATA[a < b]]></title>").unwrap();
        assert_eq!(document.root().text(), "a < b");
    }

    #[test]
    fn test_parse_rejects_unclosed_element() {
        let err = Document::parse("<xbel><bookmark href=\"x\"></xbel>").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_parse_rejects_missing_close_at_eof() {
        assert!(Document::parse("<xbel><bookmark href=\"x\">").is_err());
    }

    #[test]
    fn test_parse_rejects_two_roots() {
        assert!(Document::parse("<xbel/><xbel/>").is_err());
    }

    #[test]
    fn test_parse_rejects_text_outside_root() {
        assert!(Document::parse("junk<xbel/>").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_entity() {
        assert!(Document::parse("<xbel><title>&ext;</title></xbel>").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert!(Document::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_control_character() {
        let err = Document::parse("<xbel><title>a\u{1}b</title></xbel>").unwrap_err();
        assert_eq!(err.to_string(), "character U+0001 is not allowed at byte 14");
    }

    #[test]
    fn test_parse_rejects_comment_with_double_hyphen() {
        assert!(Document::parse("<xbel><!-- a -- b --></xbel>").is_err());
        assert!(Document::parse("<xbel><!-- a ---></xbel>").is_err());
        assert!(Document::parse("<xbel><!-- a - b --></xbel>").is_ok());
    }

    #[test]
    fn test_parse_rejects_late_declaration() {
        assert!(Document::parse("<?xml version=\"1.0\"?><?xml version=\"1.0\"?><xbel/>").is_err());
    }

    #[test]
    fn test_parse_rejects_cdata_end_in_text() {
        assert!(Document::parse("<xbel><title>a ]]> b</title></xbel>").is_err());
    }

    #[test]
    fn test_parse_rejects_lt_in_attribute_value() {
        assert!(Document::parse("<xbel><bookmark href=\"a<b\"/></xbel>").is_err());
    }

    #[test]
    fn test_conformance_rejects_bad_name() {
        let source = "<xbel><metadata owner=\"o\"><1bad/></metadata></xbel>";
        assert!(Document::parse(source).is_ok());
        assert!(check_conformance(source).is_err());
    }

    #[test]
    fn test_conformance_accepts_doctype_and_bom() {
        assert!(check_conformance(PLACES).is_ok());
        assert!(check_conformance(&format!("\u{feff}{PLACES}")).is_ok());
    }

    #[test]
    fn test_byte_order_mark_round_trips() {
        let source = format!("\u{feff}{PLACES}");
        let document = Document::parse(&source).unwrap();
        assert_eq!(document.root().name(), "xbel");
        assert_eq!(document.render(), source);
    }

    #[test]
    fn test_remove_collapses_opened_root() {
        let mut document = Document::parse("<xbel />").unwrap();
        document
            .root_mut()
            .append_element(Element::new("separator"), Some(" "));
        assert_eq!(document.render(), "<xbel >\n <separator/></xbel>");

        document.root_mut().remove_elements_where(|el| el.name() == "separator");
        assert_eq!(document.render(), "<xbel />");
    }

    #[test]
    fn test_built_attribute_keeps_line_breaks() {
        let mut document = Document::parse("<xbel></xbel>").unwrap();
        document
            .root_mut()
            .append_element(Element::new("bookmark").with_attribute("href", "a\nb"), None);
        assert_eq!(document.render(), "<xbel><bookmark href=\"a&#10;b\"/></xbel>");
    }

    #[test]
    fn test_located_children_paths() {
        let document = Document::parse("<xbel><bookmark/><folder/><bookmark/></xbel>").unwrap();
        let paths: Vec<String> = located_children(document.root(), "/xbel")
            .into_iter()
            .map(|(_, path)| path)
            .collect();
        assert_eq!(
            paths,
            vec!["/xbel/bookmark[1]", "/xbel/folder[1]", "/xbel/bookmark[2]"]
        );
    }
}
