//! Structural rules of XBEL 1.0 documents
//!
//! Checks the element structure of the XBEL DTD. Namespaced elements and
//! attributes are extensions and are accepted wherever they appear, as long
//! as their prefix is declared. Content of `<metadata>` is not checked.

use super::dom::{Document, Element, Node, cdata_content, is_blank, located_children};
use std::collections::HashSet;
use std::fmt;

const ROOT: &str = "xbel";
const XBEL_VERSION: &str = "1.0";

/// A rule broken by a document, with the location of the offending element
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Violation {
    path: String,
    message: String,
}

impl Violation {
    fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validate `document` against the XBEL structure
pub(crate) fn validate(document: &Document) -> Result<(), Violation> {
    let root = document.root();
    if root.name() != ROOT {
        return Err(Violation::new(
            "/",
            format!("root element must be <{ROOT}>, found <{}>", root.name()),
        ));
    }

    let path = format!("/{ROOT}");
    check_namespaces(root, &path, &mut Vec::new())?;

    let mut validator = Validator::default();
    validator.xbel(root, &path)?;
    validator.check_references()
}

fn is_bound(scopes: &[HashSet<String>], prefix: &str) -> bool {
    prefix == "xml" || prefix == "xmlns" || scopes.iter().any(|scope| scope.contains(prefix))
}

fn check_namespaces(
    element: &Element,
    path: &str,
    scopes: &mut Vec<HashSet<String>>,
) -> Result<(), Violation> {
    let mut declared = HashSet::new();
    for (name, value) in element.attributes() {
        if let Some(prefix) = name.strip_prefix("xmlns:") {
            if value.is_empty() {
                return Err(Violation::new(
                    path,
                    format!("prefix '{prefix}' is bound to an empty namespace"),
                ));
            }
            declared.insert(prefix.to_string());
        }
    }
    scopes.push(declared);

    if let Some((prefix, _)) = element.name().split_once(':')
        && !is_bound(scopes, prefix)
    {
        return Err(Violation::new(
            path,
            format!("undeclared namespace prefix '{prefix}'"),
        ));
    }
    for (name, _) in element.attributes() {
        if let Some((prefix, _)) = name.split_once(':')
            && !is_bound(scopes, prefix)
        {
            return Err(Violation::new(
                path,
                format!("undeclared namespace prefix '{prefix}' on attribute '{name}'"),
            ));
        }
    }

    for (child, child_path) in located_children(element, path) {
        check_namespaces(child, &child_path, scopes)?;
    }
    scopes.pop();
    Ok(())
}

fn is_extension(name: &str) -> bool {
    name.contains(':')
}

/// Position of a child in the `title?, info?, desc?, items*` sequence
fn sequence_rank(name: &str) -> Option<u8> {
    match name {
        "title" => Some(1),
        "info" => Some(2),
        "desc" => Some(3),
        "bookmark" | "folder" | "alias" | "separator" => Some(4),
        _ => None,
    }
}

#[derive(Default)]
struct Validator {
    ids: HashSet<String>,
    /// `(path, ref)` of every alias, resolved once all ids are known
    references: Vec<(String, String)>,
}

impl Validator {
    fn xbel(&mut self, element: &Element, path: &str) -> Result<(), Violation> {
        self.attributes(element, path, &["version", "id", "added"], &[])?;
        if let Some(version) = element.attribute("version")
            && version != XBEL_VERSION
        {
            return Err(Violation::new(
                path,
                format!("unsupported version '{version}'"),
            ));
        }
        self.sequence(element, path, true)
    }

    fn folder(&mut self, element: &Element, path: &str) -> Result<(), Violation> {
        self.attributes(element, path, &["id", "added", "folded"], &[])?;
        if let Some(folded) = element.attribute("folded")
            && folded != "yes"
            && folded != "no"
        {
            return Err(Violation::new(
                path,
                format!("folded must be 'yes' or 'no', found '{folded}'"),
            ));
        }
        self.sequence(element, path, true)
    }

    fn bookmark(&mut self, element: &Element, path: &str) -> Result<(), Violation> {
        self.attributes(
            element,
            path,
            &["href", "id", "added", "modified", "visited"],
            &["href"],
        )?;
        self.sequence(element, path, false)
    }

    fn alias(&mut self, element: &Element, path: &str) -> Result<(), Violation> {
        self.attributes(element, path, &["ref"], &["ref"])?;
        if let Some(target) = element.attribute("ref") {
            self.references
                .push((path.to_string(), target.to_string()));
        }
        element_only(element, path, |_| false)
    }

    fn separator(&mut self, element: &Element, path: &str) -> Result<(), Violation> {
        self.attributes(element, path, &[], &[])?;
        let mut seen_info = false;
        element_only(element, path, |name| {
            let first = name == "info" && !seen_info;
            seen_info |= name == "info";
            first
        })?;
        for (child, child_path) in located_children(element, path) {
            if child.name() == "info" {
                self.info(child, &child_path)?;
            }
        }
        Ok(())
    }

    fn info(&mut self, element: &Element, path: &str) -> Result<(), Violation> {
        self.attributes(element, path, &[], &[])?;
        element_only(element, path, |name| name == "metadata")?;

        let mut count = 0;
        for (child, child_path) in located_children(element, path) {
            if child.name() == "metadata" {
                count += 1;
                if child.attribute("owner").is_none() {
                    return Err(Violation::new(
                        &child_path,
                        "<metadata> requires attribute 'owner'",
                    ));
                }
            }
        }
        if count == 0 {
            return Err(Violation::new(path, "<info> requires at least one <metadata>"));
        }
        Ok(())
    }

    /// `title` and `desc`: character data only
    fn text_only(&mut self, element: &Element, path: &str) -> Result<(), Violation> {
        self.attributes(element, path, &[], &[])?;
        match element.elements().find(|child| !is_extension(child.name())) {
            Some(child) => Err(Violation::new(
                path,
                format!("unexpected element <{}> in text content", child.name()),
            )),
            None => Ok(()),
        }
    }

    /// Content model `title?, info?, desc?` followed by items when allowed
    fn sequence(&mut self, element: &Element, path: &str, items: bool) -> Result<(), Violation> {
        check_blank_text(element, path)?;

        let mut last = 0;
        for (child, child_path) in located_children(element, path) {
            let name = child.name();
            if is_extension(name) {
                continue;
            }
            let rank = match sequence_rank(name) {
                Some(4) if !items => None,
                rank => rank,
            };
            let Some(rank) = rank else {
                return Err(Violation::new(
                    path,
                    format!("unexpected element <{name}>"),
                ));
            };
            if rank < 4 && rank <= last {
                return Err(Violation::new(
                    &child_path,
                    format!("<{name}> is repeated or out of order"),
                ));
            }
            last = rank;

            match name {
                "title" | "desc" => self.text_only(child, &child_path)?,
                "info" => self.info(child, &child_path)?,
                "bookmark" => self.bookmark(child, &child_path)?,
                "folder" => self.folder(child, &child_path)?,
                "alias" => self.alias(child, &child_path)?,
                _ => self.separator(child, &child_path)?,
            }
        }
        Ok(())
    }

    /// Reject unknown unprefixed attributes, require `required`, record ids
    fn attributes(
        &mut self,
        element: &Element,
        path: &str,
        allowed: &[&str],
        required: &[&str],
    ) -> Result<(), Violation> {
        for (name, _) in element.attributes() {
            if name == "xmlns" || is_extension(name) {
                continue;
            }
            if !allowed.contains(&name.as_str()) {
                return Err(Violation::new(
                    path,
                    format!("unexpected attribute '{name}' on <{}>", element.name()),
                ));
            }
        }
        for name in required {
            if element.attribute(name).is_none() {
                return Err(Violation::new(
                    path,
                    format!("<{}> requires attribute '{name}'", element.name()),
                ));
            }
        }
        if allowed.contains(&"id")
            && let Some(id) = element.attribute("id")
            && !self.ids.insert(id.to_string())
        {
            return Err(Violation::new(path, format!("duplicate id '{id}'")));
        }
        Ok(())
    }

    fn check_references(&self) -> Result<(), Violation> {
        for (path, target) in &self.references {
            if !self.ids.contains(target) {
                return Err(Violation::new(
                    path,
                    format!("alias refers to unknown id '{target}'"),
                ));
            }
        }
        Ok(())
    }
}

fn check_blank_text(element: &Element, path: &str) -> Result<(), Violation> {
    for child in element.children() {
        let blank = match child {
            Node::Text(raw) => is_blank(raw),
            Node::CData(raw) => is_blank(cdata_content(raw)),
            _ => true,
        };
        if !blank {
            return Err(Violation::new(
                path,
                format!("unexpected text in <{}>", element.name()),
            ));
        }
    }
    Ok(())
}

/// Element-only content where `accept` decides on each unprefixed child
fn element_only(
    element: &Element,
    path: &str,
    mut accept: impl FnMut(&str) -> bool,
) -> Result<(), Violation> {
    check_blank_text(element, path)?;
    for child in element.elements() {
        if !is_extension(child.name()) && !accept(child.name()) {
            return Err(Violation::new(
                path,
                format!("unexpected element <{}> in <{}>", child.name(), element.name()),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(source: &str) -> Result<(), Violation> {
        validate(&Document::parse(source).unwrap())
    }

    fn message(source: &str) -> String {
        check(source).unwrap_err().to_string()
    }

    #[test]
    fn test_minimal_document() {
        assert!(check("<xbel/>").is_ok());
        assert!(check("<xbel version=\"1.0\"></xbel>").is_ok());
    }

    #[test]
    fn test_dolphin_style_document() {
        let source = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE xbel>
<xbel xmlns:bookmark="http://www.freedesktop.org/standards/desktop-bookmarks" xmlns:mime="http://www.freedesktop.org/standards/shared-mime-info" xmlns:kdepriv="http://www.kde.org/kdepriv">
 <info>
  <metadata owner="http://www.kde.org">
   <kde_places_version>4</kde_places_version>
  </metadata>
 </info>
 <bookmark href="file:///home/u">
  <title>Home</title>
  <info>
   <metadata owner="http://freedesktop.org">
    <bookmark:icon name="user-home"/>
   </metadata>
   <metadata owner="http://www.kde.org">
    <ID>1/0</ID>
    <isSystemItem>true</isSystemItem>
   </metadata>
  </info>
 </bookmark>
 <folder folded="no" id="f1">
  <title>Folder</title>
  <separator/>
  <alias ref="f1"/>
 </folder>
</xbel>
"#;
        assert_eq!(check(source), Ok(()));
    }

    #[test]
    fn test_wrong_root() {
        assert!(message("<places/>").contains("root element must be <xbel>"));
    }

    #[test]
    fn test_wrong_version() {
        assert!(message("<xbel version=\"2.0\"/>").contains("unsupported version"));
    }

    #[test]
    fn test_bookmark_requires_href() {
        let msg = message("<xbel><bookmark><title>x</title></bookmark></xbel>");
        assert!(msg.contains("/xbel/bookmark[1]"));
        assert!(msg.contains("requires attribute 'href'"));
    }

    #[test]
    fn test_unknown_element() {
        assert!(message("<xbel><link/></xbel>").contains("unexpected element <link>"));
    }

    #[test]
    fn test_unknown_attribute() {
        assert!(message("<xbel><bookmark href=\"x\" color=\"red\"/></xbel>")
            .contains("unexpected attribute 'color'"));
    }

    #[test]
    fn test_namespaced_extensions_accepted() {
        let source = r#"<xbel xmlns:x="urn:x"><bookmark href="a" x:color="red"><x:note/></bookmark></xbel>"#;
        assert!(check(source).is_ok());
    }

    #[test]
    fn test_undeclared_prefix() {
        assert!(message("<xbel><bookmark href=\"a\"><x:note/></bookmark></xbel>")
            .contains("undeclared namespace prefix 'x'"));
    }

    #[test]
    fn test_prefix_declared_on_element_itself() {
        let source = r#"<xbel><bookmark href="a"><info><metadata owner="o"><b:icon xmlns:b="urn:b" name="i"/></metadata></info></bookmark></xbel>"#;
        assert!(check(source).is_ok());
    }

    #[test]
    fn test_title_after_info_is_out_of_order() {
        let msg = message("<xbel><bookmark href=\"a\"><info><metadata owner=\"o\"/></info><title>t</title></bookmark></xbel>");
        assert!(msg.contains("out of order"));
    }

    #[test]
    fn test_repeated_title() {
        assert!(message("<xbel><title>a</title><title>b</title></xbel>").contains("repeated"));
    }

    #[test]
    fn test_title_after_items() {
        assert!(message("<xbel><separator/><title>a</title></xbel>").contains("out of order"));
    }

    #[test]
    fn test_bookmark_cannot_contain_items() {
        assert!(message("<xbel><bookmark href=\"a\"><separator/></bookmark></xbel>")
            .contains("unexpected element <separator>"));
    }

    #[test]
    fn test_empty_info() {
        assert!(message("<xbel><info></info></xbel>").contains("at least one <metadata>"));
    }

    #[test]
    fn test_metadata_requires_owner() {
        assert!(message("<xbel><info><metadata/></info></xbel>").contains("'owner'"));
    }

    #[test]
    fn test_text_in_element_content() {
        assert!(message("<xbel>stray</xbel>").contains("unexpected text"));
    }

    #[test]
    fn test_element_in_title() {
        assert!(message("<xbel><title>a<b/></title></xbel>").contains("in text content"));
    }

    #[test]
    fn test_folded_values() {
        assert!(check("<xbel><folder folded=\"yes\"/></xbel>").is_ok());
        assert!(message("<xbel><folder folded=\"maybe\"/></xbel>").contains("folded"));
    }

    #[test]
    fn test_duplicate_ids() {
        assert!(message("<xbel><folder id=\"a\"/><bookmark href=\"x\" id=\"a\"/></xbel>")
            .contains("duplicate id 'a'"));
    }

    #[test]
    fn test_alias_must_resolve() {
        assert!(message("<xbel><alias ref=\"nowhere\"/></xbel>").contains("unknown id"));
        assert!(check("<xbel><alias ref=\"b\"/><bookmark href=\"x\" id=\"b\"/></xbel>").is_ok());
    }

    #[test]
    fn test_separator_with_info() {
        assert!(check("<xbel><separator><info><metadata owner=\"o\"/></info></separator></xbel>").is_ok());
        assert!(message("<xbel><separator><title>t</title></separator></xbel>")
            .contains("unexpected element <title>"));
    }

    #[test]
    fn test_metadata_content_is_lax() {
        let source = "<xbel><info><metadata owner=\"o\">free <any>thing</any></metadata></info></xbel>";
        assert!(check(source).is_ok());
    }
}
