//! GTK bookmark list (`~/.config/gtk-3.0/bookmarks`)
//!
//! One bookmark per line: `file://<percent-encoded path> <display name>`.
//! The format has no schema, so content is treated as an opaque list of
//! lines. Adding appends unconditionally; an entry is identified by its exact
//! line, so removing drops one line equal to it.

use super::{CodecError, CodecKind, EntryCodec, EntryIdentity, Mutation, absolute_target};
use std::path::Path;
use url::form_urlencoded;

/// Codec for newline-delimited bookmark lists
#[derive(Debug, Clone, Copy, Default)]
pub struct LineListCodec;

impl LineListCodec {
    pub fn new() -> Self {
        Self
    }

    /// Build the bookmark line for `target` named `display_name`
    ///
    /// Line breaks in the display name are replaced by spaces so an entry
    /// always stays on a single line.
    pub fn encode_entry(target: &Path, display_name: &str) -> Result<String, CodecError> {
        let uri = format!("file://{}", encode_path(target)?);
        let name = display_name.replace(['\r', '\n'], " ");
        if name.is_empty() {
            Ok(uri)
        } else {
            Ok(format!("{uri} {name}"))
        }
    }
}

/// Percent-encode every segment of the absolute form of `target`
///
/// Separators are kept; spaces become `%20` rather than `+`.
pub fn encode_path(target: &Path) -> Result<String, CodecError> {
    let absolute = absolute_target(target)?;
    let bytes = absolute.as_os_str().as_encoded_bytes();
    let segments: Vec<String> = bytes
        .split(|b| *b == b'/')
        .map(|segment| form_urlencoded::byte_serialize(segment).collect::<String>())
        .map(|segment| segment.replace('+', "%20"))
        .collect();
    Ok(segments.join("/"))
}

fn line_ending(content: &str) -> &'static str {
    if content.contains("\r\n") { "\r\n" } else { "\n" }
}

impl EntryCodec for LineListCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::LineList
    }

    fn add(
        &self,
        content: &str,
        target: &Path,
        display_name: &str,
    ) -> Result<Mutation, CodecError> {
        let line = Self::encode_entry(target, display_name)?;
        let eol = line_ending(content);
        let existing = content.trim_end();

        let mut new_content = String::with_capacity(existing.len() + line.len() + 4);
        if !existing.is_empty() {
            new_content.push_str(existing);
            new_content.push_str(eol);
        }
        new_content.push_str(&line);
        new_content.push_str(eol);

        Ok(Mutation {
            content: new_content,
            identity: EntryIdentity::Line(line),
        })
    }

    fn remove(&self, content: &str, identity: &EntryIdentity) -> Result<String, CodecError> {
        let EntryIdentity::Line(line) = identity else {
            return Err(CodecError::EntryNotFound);
        };

        let mut lines: Vec<&str> = content.lines().collect();
        let position = lines
            .iter()
            .position(|l| *l == line.as_str())
            .ok_or(CodecError::EntryNotFound)?;
        lines.remove(position);

        let eol = line_ending(content);
        let mut new_content = lines.join(eol);
        if !lines.is_empty() && content.ends_with('\n') {
            new_content.push_str(eol);
        }
        Ok(new_content)
    }
}
