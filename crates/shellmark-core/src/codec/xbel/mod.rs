//! XBEL places file (`~/.local/share/user-places.xbel`)
//!
//! Entries written here are marked by a `<metadata owner=OWNER>` block that
//! carries a generated `<id>`. Only bookmarks with that marker are ever
//! removed. Every edit goes through a parsed tree; the document is validated
//! before it is touched and again after it has been rendered.

mod dom;
mod schema;

use super::{CodecError, CodecKind, EntryCodec, EntryIdentity, Mutation, absolute_target};
use dom::{Document, Element};
use std::path::Path;
use tracing::{debug, trace};
use url::Url;
use uuid::Uuid;

/// Owner marking entries created by this crate
pub const DEFAULT_OWNER: &str = "https://shellmark.dev";

/// Icon shown for entries created by this crate
pub const DEFAULT_ICON: &str = "drive-harddisk-encrypted";

/// Owner of the metadata block holding the icon
pub const FREEDESKTOP_OWNER: &str = "http://freedesktop.org";

/// Namespace of `<bookmark:icon>`
pub const BOOKMARK_NAMESPACE: &str = "http://www.freedesktop.org/standards/desktop-bookmarks";

/// Ownership marker and icon written into new bookmarks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XbelOptions {
    pub owner: String,
    pub icon: String,
}

impl Default for XbelOptions {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            icon: DEFAULT_ICON.to_string(),
        }
    }
}

/// Codec for XBEL documents
#[derive(Debug, Clone, Default)]
pub struct XbelCodec {
    options: XbelOptions,
}

/// `file://` URI of the absolute form of `target`
pub fn file_uri(target: &Path) -> Result<String, CodecError> {
    let absolute = absolute_target(target)?;
    Url::from_file_path(&absolute)
        .map(String::from)
        .map_err(|_| CodecError::InvalidPath(absolute))
}

/// Drop characters XML 1.0 cannot represent; carriage returns are kept and
/// written as character references.
fn xml_safe(text: &str) -> String {
    text.chars().filter(|&c| dom::is_xml_char(c)).collect()
}

impl XbelCodec {
    pub fn new(options: XbelOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &XbelOptions {
        &self.options
    }

    fn load(content: &str) -> Result<Document, CodecError> {
        let document = dom::check_conformance(content)
            .and_then(|()| Document::parse(content))
            .map_err(|e| CodecError::InvalidDocument(format!("not well-formed: {e}")))?;
        schema::validate(&document)
            .map_err(|v| CodecError::InvalidDocument(format!("not a valid XBEL document: {v}")))?;
        Ok(document)
    }

    /// Render `document`, refusing output that no longer parses and validates
    fn finish(document: &Document) -> Result<String, CodecError> {
        let rendered = document.render();
        let reparsed = dom::check_conformance(&rendered)
            .and_then(|()| Document::parse(&rendered))
            .map_err(|e| CodecError::SchemaViolationAfterMutation(e.to_string()))?;
        schema::validate(&reparsed)
            .map_err(|v| CodecError::SchemaViolationAfterMutation(v.to_string()))?;
        Ok(rendered)
    }

    fn owned_metadata<'a>(&'a self, bookmark: &'a Element) -> impl Iterator<Item = &'a Element> + 'a {
        bookmark
            .elements_named("info")
            .flat_map(|info| info.elements_named("metadata"))
            .filter(move |metadata| metadata.attribute("owner") == Some(self.options.owner.as_str()))
    }

    fn is_owned(&self, element: &Element) -> bool {
        element.name() == "bookmark" && self.owned_metadata(element).next().is_some()
    }

    fn carries_id(&self, element: &Element, id: &str) -> bool {
        element.name() == "bookmark"
            && self
                .owned_metadata(element)
                .flat_map(|metadata| metadata.elements_named("id"))
                .any(|marker| marker.text().trim() == id)
    }

    fn build_bookmark(&self, root: &Element, uri: &str, display_name: &str, id: &str) -> Element {
        let mut icon = Element::new("bookmark:icon");
        if root.attribute("xmlns:bookmark") != Some(BOOKMARK_NAMESPACE) {
            icon = icon.with_attribute("xmlns:bookmark", BOOKMARK_NAMESPACE);
        }
        let icon = icon.with_attribute("name", self.options.icon.as_str());

        let info = Element::new("info")
            .with_child(
                Element::new("metadata")
                    .with_attribute("owner", FREEDESKTOP_OWNER)
                    .with_child(icon),
            )
            .with_child(
                Element::new("metadata")
                    .with_attribute("owner", self.options.owner.as_str())
                    .with_child(Element::new("id").with_text(id)),
            );

        Element::new("bookmark")
            .with_attribute("href", uri)
            .with_child(Element::new("title").with_text(&xml_safe(display_name)))
            .with_child(info)
    }
}

impl EntryCodec for XbelCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Xbel
    }

    fn add(
        &self,
        content: &str,
        target: &Path,
        display_name: &str,
    ) -> Result<Mutation, CodecError> {
        let mut document = Self::load(content)?;
        let uri = file_uri(target)?;
        let indent = document.root().child_indent();

        let stale = document
            .root_mut()
            .remove_elements_where(|element| {
                self.is_owned(element) && element.attribute("href") == Some(uri.as_str())
            });
        if stale > 0 {
            debug!("Replaced {stale} stale bookmark(s) for {uri}");
        }

        let id = Uuid::new_v4().to_string();
        trace!(href = %uri, %id, "Adding XBEL bookmark");
        let mut bookmark = self.build_bookmark(document.root(), &uri, display_name, &id);
        if let Some(unit) = indent.as_deref() {
            bookmark.indent(unit, 1);
        }
        document
            .root_mut()
            .append_element(bookmark, indent.as_deref());

        Ok(Mutation {
            content: Self::finish(&document)?,
            identity: EntryIdentity::Id(id),
        })
    }

    fn remove(&self, content: &str, identity: &EntryIdentity) -> Result<String, CodecError> {
        let EntryIdentity::Id(id) = identity else {
            return Err(CodecError::EntryNotFound);
        };
        let mut document = Self::load(content)?;

        let removed = document
            .root_mut()
            .remove_elements_where(|element| self.carries_id(element, id));
        if removed == 0 {
            return Err(CodecError::EntryNotFound);
        }
        trace!(%id, removed, "Removed XBEL bookmark");
        Self::finish(&document)
    }
}
