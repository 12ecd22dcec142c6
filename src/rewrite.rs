//! Root element rewriting.
//!
//! Streams an SVG document through `quick-xml`, hands the attributes of the
//! root `<svg>` element to a caller-supplied edit and writes everything else
//! back untouched. Namespace declarations travel with the root attributes, so
//! the default SVG namespace stays unprefixed.

use std::{fs, io, path::Path};

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesStart, BytesText, Event},
};
use thiserror::Error;

use crate::{error::CropError, viewbox::ViewBoxRect};

/// Rewriter failures, independent of the file they came from.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("document has no root element")]
    MissingRoot,

    #[error("root element is `<{0}>`, expected `<svg>`")]
    NotSvg(String),

    #[error("unexpected end of document inside `<{0}>`")]
    Unclosed(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

// ============================================================================
// Root attributes
// ============================================================================

/// Ordered attribute list of the root element.
///
/// Values are kept exactly as they appear in the source (still escaped).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RootAttributes {
    attrs: Vec<(String, String)>,
}

impl RootAttributes {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace `key` in place, or append it when absent.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((key.to_owned(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.attrs.iter().position(|(k, _)| k == key)?;
        Some(self.attrs.remove(index).1)
    }
}

// ============================================================================
// Streaming rewrite
// ============================================================================

/// Rewrite the root `<svg>` attributes of `source`.
///
/// The output always begins with a UTF-8 XML declaration; an existing
/// declaration is replaced. Returns the new document and the edit's result.
pub fn edit_root<T, F>(source: &str, edit: F) -> Result<(String, T), RewriteError>
where
    F: FnOnce(&mut RootAttributes) -> T,
{
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let mut reader = Reader::from_str(source);
    reader.config_mut().check_end_names = true;

    let mut writer = Writer::new(Vec::with_capacity(source.len() + 64));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut edit = Some(edit);
    let mut outcome = None;
    let mut open: Vec<String> = Vec::new();
    let mut first = true;

    loop {
        let event = reader.read_event()?;

        if first {
            first = false;
            if !matches!(event, Event::Decl(_) | Event::Eof) {
                writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
            }
        }

        match event {
            Event::Eof => break,
            Event::Decl(_) => {}
            Event::Start(e) => {
                let e = match edit.take() {
                    Some(f) => {
                        let (root, result) = rewrite_root_start(&e, f)?;
                        outcome = Some(result);
                        root
                    }
                    None => e,
                };
                open.push(element_name(&e));
                writer.write_event(Event::Start(e))?;
            }
            Event::Empty(e) => {
                let e = match edit.take() {
                    Some(f) => {
                        let (root, result) = rewrite_root_start(&e, f)?;
                        outcome = Some(result);
                        root
                    }
                    None => e,
                };
                writer.write_event(Event::Empty(e))?;
            }
            Event::End(e) => {
                open.pop();
                writer.write_event(Event::End(e))?;
            }
            other => writer.write_event(other)?,
        }
    }

    if let Some(name) = open.pop() {
        return Err(RewriteError::Unclosed(name));
    }
    let outcome = outcome.ok_or(RewriteError::MissingRoot)?;

    let document = String::from_utf8(writer.into_inner())
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    Ok((document, outcome))
}

/// Rebuild the root start tag with edited attributes.
fn rewrite_root_start<T, F>(
    start: &BytesStart<'_>,
    edit: F,
) -> Result<(BytesStart<'static>, T), RewriteError>
where
    F: FnOnce(&mut RootAttributes) -> T,
{
    if start.local_name().as_ref() != b"svg" {
        return Err(RewriteError::NotSvg(element_name(start)));
    }

    let mut attrs = RootAttributes::default();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        attrs.attrs.push((
            String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            String::from_utf8_lossy(&attr.value).into_owned(),
        ));
    }

    let result = edit(&mut attrs);

    let mut root = BytesStart::new(element_name(start));
    for (key, value) in &attrs.attrs {
        // Raw push: values are still escaped from the source. Only a quote
        // that was legal inside single quotes needs escaping for `"..."`.
        let value = value.replace('"', "&quot;");
        root.push_attribute((key.as_bytes(), value.as_bytes()));
    }
    Ok((root, result))
}

#[inline]
fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

// ============================================================================
// File rewrite
// ============================================================================

/// Point the root at `viewbox` and make the image scalable.
pub fn apply_viewbox(root: &mut RootAttributes, viewbox: &ViewBoxRect) {
    root.set("viewBox", viewbox.to_string());
    root.remove("width");
    root.remove("height");
}

/// Rewrite `input` with the new viewBox into `output`, replacing any existing file.
pub fn rewrite_file(input: &Path, output: &Path, viewbox: &ViewBoxRect) -> Result<(), CropError> {
    let source = fs::read_to_string(input).map_err(|err| CropError::Io(input.into(), err))?;

    let (document, ()) = edit_root(&source, |root| apply_viewbox(root, viewbox))
        .map_err(|err| CropError::from_rewrite(input, err))?;

    fs::write(output, document).map_err(|err| CropError::Io(output.into(), err))
}
