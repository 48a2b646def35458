//! HTML minification.
//!
//! A single forward pass over the source that understands just enough of
//! HTML to minify it safely:
//!
//! - comments are dropped
//! - whitespace runs in text collapse to one space; whitespace-only text
//!   spanning a line break between tags is dropped
//! - `<pre>` content and the raw text of `<script>`, `<style>` and
//!   `<textarea>` are copied verbatim
//! - boolean attributes with an empty value or their own name as value lose
//!   it (`checked="checked"` → `checked`)
//! - empty attribute values are dropped (`class=""` → `class`)
//! - attribute quotes are always kept as written
//!
//! Anything left open at end of input (comment, tag, quoted value, raw text
//! element) is a [`MarkupError`].

use super::Transform;
use crate::error::{MarkupError, TransformError};
use std::path::Path;

const BOOLEAN_ATTRIBUTES: &[&str] = &[
    "allowfullscreen",
    "async",
    "autofocus",
    "autoplay",
    "checked",
    "controls",
    "default",
    "defer",
    "disabled",
    "formnovalidate",
    "hidden",
    "inert",
    "ismap",
    "itemscope",
    "loop",
    "multiple",
    "muted",
    "nomodule",
    "novalidate",
    "open",
    "playsinline",
    "readonly",
    "required",
    "reversed",
    "selected",
];

/// Elements whose content is not markup and is copied untouched.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea"];

/// Markup minification policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupOptions {
    pub remove_comments: bool,
    pub collapse_whitespace: bool,
    pub reduce_boolean_attributes: bool,
    pub reduce_empty_attributes: bool,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            remove_comments: true,
            collapse_whitespace: true,
            reduce_boolean_attributes: true,
            reduce_empty_attributes: true,
        }
    }
}

/// HTML minifier.
#[derive(Debug, Clone, Default)]
pub struct MarkupMinifier {
    options: MarkupOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Double,
    Single,
    None,
}

#[derive(Debug)]
struct Attribute<'a> {
    name: &'a str,
    value: Option<(&'a str, Quote)>,
}

#[derive(Debug)]
struct StartTag<'a> {
    name: &'a str,
    attributes: Vec<Attribute<'a>>,
    self_closing: bool,
    /// Byte offset just past the closing `>`
    end: usize,
}

impl MarkupMinifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: MarkupOptions) -> Self {
        Self { options }
    }

    /// Minify an HTML document.
    pub fn minify(&self, source: &str) -> Result<String, MarkupError> {
        let mut out = String::with_capacity(source.len());
        let mut pre_depth = 0usize;
        // Output ends with a collapsed space. Survives dropped comments so the
        // text on both sides of one collapses as a single run.
        let mut trailing_space = false;

        tokenize(source, |token| match token {
            Token::Comment(comment) => {
                if !self.options.remove_comments {
                    out.push_str(comment);
                    trailing_space = false;
                }
            }
            Token::Declaration(decl) | Token::RawText(decl) => {
                out.push_str(decl);
                trailing_space = false;
            }
            Token::EndTag(name) => {
                if name.eq_ignore_ascii_case("pre") {
                    pre_depth = pre_depth.saturating_sub(1);
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
                trailing_space = false;
            }
            Token::StartTag(tag) => {
                self.write_start_tag(&tag, &mut out);
                if !tag.self_closing && tag.name.eq_ignore_ascii_case("pre") {
                    pre_depth += 1;
                }
                trailing_space = false;
            }
            Token::Text(text) => {
                trailing_space = self.write_text(text, pre_depth > 0, trailing_space, &mut out)
            }
        })?;

        Ok(out)
    }

    /// Write a text run. Returns whether the output now ends with a
    /// collapsed space.
    fn write_text(
        &self,
        text: &str,
        preformatted: bool,
        trailing_space: bool,
        out: &mut String,
    ) -> bool {
        if preformatted || !self.options.collapse_whitespace {
            out.push_str(text);
            return false;
        }

        if text.bytes().all(|b| b.is_ascii_whitespace()) {
            if text.is_empty() || text.contains('\n') {
                return trailing_space;
            }
            if !trailing_space {
                out.push(' ');
            }
            return true;
        }

        let mut in_space = trailing_space;
        for c in text.chars() {
            if c.is_ascii_whitespace() {
                if !in_space {
                    out.push(' ');
                }
                in_space = true;
            } else {
                out.push(c);
                in_space = false;
            }
        }
        in_space
    }

    fn write_start_tag(&self, tag: &StartTag<'_>, out: &mut String) {
        out.push('<');
        out.push_str(tag.name);

        for attr in &tag.attributes {
            out.push(' ');
            out.push_str(attr.name);

            let Some((value, quote)) = attr.value else {
                continue;
            };
            if self.options.reduce_boolean_attributes && is_reducible_boolean(attr.name, value) {
                continue;
            }
            if self.options.reduce_empty_attributes && value.is_empty() {
                continue;
            }

            out.push('=');
            match quote {
                Quote::Double => {
                    out.push('"');
                    out.push_str(value);
                    out.push('"');
                }
                Quote::Single => {
                    out.push('\'');
                    out.push_str(value);
                    out.push('\'');
                }
                Quote::None => out.push_str(value),
            }
        }

        out.push_str(if tag.self_closing { "/>" } else { ">" });
    }
}

impl Transform for MarkupMinifier {
    fn name(&self) -> &'static str {
        "html"
    }

    fn transform(&self, _path: &Path, source: &str) -> Result<String, TransformError> {
        Ok(self.minify(source)?)
    }
}

/// A start tag as seen by [`scan_elements`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupElement {
    /// Tag name, lowercased
    pub name: String,
    /// Attribute names (lowercased) with their unquoted values
    pub attributes: Vec<(String, Option<String>)>,
}

impl MarkupElement {
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|(n, _)| n == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }
}

/// Every start tag of `source`, in document order.
///
/// Uses the same tokenizer as [`MarkupMinifier`], so a document that scans
/// cleanly also minifies cleanly.
pub fn scan_elements(source: &str) -> Result<Vec<MarkupElement>, MarkupError> {
    let mut elements = Vec::new();
    tokenize(source, |token| {
        if let Token::StartTag(tag) = token {
            elements.push(MarkupElement {
                name: tag.name.to_ascii_lowercase(),
                attributes: tag
                    .attributes
                    .iter()
                    .map(|attr| {
                        (
                            attr.name.to_ascii_lowercase(),
                            attr.value.map(|(value, _)| value.to_string()),
                        )
                    })
                    .collect(),
            });
        }
    })?;
    Ok(elements)
}

enum Token<'a> {
    Comment(&'a str),
    Declaration(&'a str),
    StartTag(StartTag<'a>),
    EndTag(&'a str),
    RawText(&'a str),
    Text(&'a str),
}

fn tokenize<'a>(source: &'a str, mut emit: impl FnMut(Token<'a>)) -> Result<(), MarkupError> {
    let bytes = source.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] == b'<' {
            let rest = &source[pos..];

            if rest.starts_with("<!--") {
                // `<!-->` and `<!--->` close immediately
                let comment_end = if rest[4..].starts_with('>') {
                    pos + 5
                } else if rest[4..].starts_with("->") {
                    pos + 6
                } else {
                    let end = rest[4..]
                        .find("-->")
                        .ok_or(MarkupError::UnterminatedComment { offset: pos })?;
                    pos + 4 + end + 3
                };
                emit(Token::Comment(&source[pos..comment_end]));
                pos = comment_end;
                continue;
            }

            if rest.starts_with("<!") || rest.starts_with("<?") {
                let end = rest
                    .find('>')
                    .ok_or(MarkupError::UnterminatedDeclaration { offset: pos })?;
                emit(Token::Declaration(&rest[..=end]));
                pos += end + 1;
                continue;
            }

            if rest.starts_with("</") && starts_with_letter(&rest[2..]) {
                let end = rest.find('>').ok_or_else(|| MarkupError::UnterminatedTag {
                    offset: pos,
                    name: tag_name(&rest[2..]).to_string(),
                })?;
                emit(Token::EndTag(tag_name(&rest[2..end])));
                pos += end + 1;
                continue;
            }

            if starts_with_letter(&rest[1..]) {
                let tag = parse_start_tag(source, pos)?;
                let name = tag.name.to_ascii_lowercase();
                let raw = !tag.self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_str());
                pos = tag.end;
                emit(Token::StartTag(tag));

                if raw {
                    let close = find_closing_tag(source, pos, &name).ok_or(
                        MarkupError::UnterminatedRawText {
                            offset: pos,
                            name,
                        },
                    )?;
                    emit(Token::RawText(&source[pos..close]));
                    pos = close;
                }
                continue;
            }
        }

        // Text runs up to the next '<'. A '<' that did not open a tag
        // above is literal text.
        let search_from = if bytes[pos] == b'<' { pos + 1 } else { pos };
        let next = source[search_from..]
            .find('<')
            .map_or(source.len(), |i| search_from + i);
        emit(Token::Text(&source[pos..next]));
        pos = next;
    }

    Ok(())
}

fn starts_with_letter(s: &str) -> bool {
    s.as_bytes().first().is_some_and(u8::is_ascii_alphabetic)
}

/// A boolean attribute whose value carries no meaning: empty or its own
/// name. Other values (`hidden="until-found"`) are kept.
fn is_reducible_boolean(name: &str, value: &str) -> bool {
    BOOLEAN_ATTRIBUTES
        .iter()
        .any(|attr| attr.eq_ignore_ascii_case(name))
        && (value.is_empty() || value.eq_ignore_ascii_case(name))
}

/// Leading tag name of `s`, up to whitespace, `/` or `>`.
fn tag_name(s: &str) -> &str {
    let end = s
        .bytes()
        .position(|b| b.is_ascii_whitespace() || b == b'/' || b == b'>')
        .unwrap_or(s.len());
    &s[..end]
}

fn parse_start_tag(source: &str, start: usize) -> Result<StartTag<'_>, MarkupError> {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let name = tag_name(&source[start + 1..]);
    let mut i = start + 1 + name.len();
    let mut attributes = Vec::new();

    let unterminated = || MarkupError::UnterminatedTag {
        offset: start,
        name: name.to_string(),
    };

    loop {
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len {
            return Err(unterminated());
        }

        match bytes[i] {
            b'>' => {
                return Ok(StartTag {
                    name,
                    attributes,
                    self_closing: false,
                    end: i + 1,
                })
            }
            b'/' if bytes.get(i + 1) == Some(&b'>') => {
                return Ok(StartTag {
                    name,
                    attributes,
                    self_closing: true,
                    end: i + 2,
                })
            }
            b'/' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let attr_start = i;
        while i < len
            && !bytes[i].is_ascii_whitespace()
            && bytes[i] != b'='
            && bytes[i] != b'>'
            && !(bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'>'))
        {
            i += 1;
        }
        let attr_name = &source[attr_start..i];

        let mut j = i;
        while j < len && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if j >= len || bytes[j] != b'=' {
            attributes.push(Attribute {
                name: attr_name,
                value: None,
            });
            continue;
        }

        j += 1;
        while j < len && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if j >= len {
            return Err(unterminated());
        }

        let value = match bytes[j] {
            q @ (b'"' | b'\'') => {
                let close = source[j + 1..].find(q as char).ok_or_else(|| {
                    MarkupError::UnterminatedAttribute {
                        offset: attr_start,
                        name: attr_name.to_string(),
                    }
                })?;
                let quote = if q == b'"' { Quote::Double } else { Quote::Single };
                i = j + 1 + close + 1;
                (&source[j + 1..j + 1 + close], quote)
            }
            _ => {
                let value_start = j;
                while j < len && !bytes[j].is_ascii_whitespace() && bytes[j] != b'>' {
                    j += 1;
                }
                i = j;
                (&source[value_start..j], Quote::None)
            }
        };

        attributes.push(Attribute {
            name: attr_name,
            value: Some(value),
        });
    }
}

/// Byte offset of the `</name` that closes a raw text element opened before `from`.
fn find_closing_tag(source: &str, from: usize, name: &str) -> Option<usize> {
    // ASCII lowercasing keeps byte offsets aligned with `source`.
    let haystack = source[from..].to_ascii_lowercase();
    let needle = format!("</{}", name);
    let mut search = 0;

    while let Some(idx) = haystack[search..].find(&needle) {
        let at = search + idx;
        let after = at + needle.len();
        match haystack.as_bytes().get(after) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => {
                return Some(from + at)
            }
            None => return None,
            _ => search = after,
        }
    }

    None
}
