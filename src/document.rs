//! SVG document access.
//!
//! The document is parsed once with `roxmltree` to locate every `<path>`
//! element's `d` attribute and its byte range in the source text. Output
//! splices new attribute values into those ranges and copies every other
//! byte verbatim.

use std::ops::Range;

use roxmltree::{Document, ParsingOptions};

use crate::error::AlignError;

/// The `d` attribute of one `<path>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSource {
    /// Attribute value with entities resolved.
    pub data: String,
    /// Byte range of the raw value in the source text.
    pub range: Range<usize>,
    /// 1-based source line, for messages.
    pub line: u32,
}

#[derive(Debug, Clone)]
pub struct SvgDocument {
    text: String,
    paths: Vec<PathSource>,
}

impl SvgDocument {
    pub fn parse(text: impl Into<String>) -> Result<Self, AlignError> {
        let text = text.into();
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let doc = Document::parse_with_options(&text, options)?;

        let paths = doc
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "path")
            .filter_map(|n| {
                let attr = n
                    .attributes()
                    .find(|a| a.name() == "d" && a.namespace().is_none())?;
                Some(PathSource {
                    data: attr.value().to_string(),
                    range: attr.range_value(),
                    line: doc.text_pos_at(n.range().start).row,
                })
            })
            .collect();

        Ok(Self { text, paths })
    }

    /// `<path>` elements carrying a `d` attribute, in document order.
    pub fn paths(&self) -> &[PathSource] {
        &self.paths
    }

    /// Rebuild the document text, replacing the `d` value of path `i` with
    /// `replacements[i]` where it is `Some`.
    ///
    /// New values are escaped for use inside a quoted attribute.
    pub fn render(&self, replacements: &[Option<String>]) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut cursor = 0;
        for (source, replacement) in self.paths.iter().zip(replacements) {
            let Some(value) = replacement else {
                continue;
            };
            out.push_str(&self.text[cursor..source.range.start]);
            out.push_str(&escape_attr(value));
            cursor = source.range.end;
        }
        out.push_str(&self.text[cursor..]);
        out
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
