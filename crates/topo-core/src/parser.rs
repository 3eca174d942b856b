//! Parser for backend-rendered SVG markup → `SvgDocument`.
//!
//! Built on `winnow` 0.7. Handles the XML subset real topology renderers
//! emit: prolog, doctype, comments, CDATA, quoted attributes, self-closing
//! tags, character data with entity references. Comments and processing
//! instructions are dropped; everything else lands in the tree.

use crate::model::{Attribute, ElementIndex, SvgDocument, SvgElement};
use smallvec::SmallVec;
use winnow::combinator::{alt, delimited};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{take_till, take_until, take_while};

/// Parse SVG markup into an `SvgDocument`.
///
/// # Errors
/// Returns a message with the byte offset when a tag is malformed, an end
/// tag does not match its start tag, or an element is left unclosed.
#[must_use = "parsing result should be used"]
pub fn parse_svg(input: &str) -> Result<SvgDocument, String> {
    let mut doc = SvgDocument::new();
    let mut open: Vec<ElementIndex> = vec![doc.root];
    let mut rest = input;

    while !rest.is_empty() {
        let offset = input.len() - rest.len();

        if rest.starts_with("<!--") {
            skip_past(&mut rest, "-->").map_err(|e| format!("Unterminated comment at {offset}: {e}"))?;
        } else if rest.starts_with("<![CDATA[") {
            rest = &rest["<![CDATA[".len()..];
            let data: &str = take_until::<_, _, ContextError>(0.., "]]>")
                .parse_next(&mut rest)
                .map_err(|e| format!("Unterminated CDATA at {offset}: {e}"))?;
            rest = &rest["]]>".len()..];
            push_text(&mut doc, &open, data);
        } else if rest.starts_with("<?") {
            skip_past(&mut rest, "?>")
                .map_err(|e| format!("Unterminated processing instruction at {offset}: {e}"))?;
        } else if rest.starts_with("<!") {
            skip_declaration(&mut rest)
                .map_err(|e| format!("Unterminated declaration at {offset}: {e}"))?;
        } else if rest.starts_with("</") {
            let name = parse_end_tag
                .parse_next(&mut rest)
                .map_err(|e| format!("End tag parse error at {offset}: {e}"))?;
            let current = match open.last() {
                Some(&idx) if idx != doc.root => idx,
                _ => return Err(format!("Unexpected end tag </{name}> at {offset}")),
            };
            let expected = &doc.element(current).tag;
            if expected != name {
                return Err(format!(
                    "Mismatched end tag at {offset}: expected </{expected}>, found </{name}>"
                ));
            }
            open.pop();
        } else if rest.starts_with('<') {
            let tag = parse_start_tag
                .parse_next(&mut rest)
                .map_err(|e| format!("Tag parse error at {offset}: {e}"))?;
            let parent = open.last().copied().unwrap_or(doc.root);
            let mut element = SvgElement::new(tag.name);
            element.attributes = tag.attributes;
            let idx = doc.append_child(parent, element);
            if !tag.self_closing {
                open.push(idx);
            }
        } else {
            let raw: &str = take_till::<_, _, ContextError>(0.., '<')
                .parse_next(&mut rest)
                .map_err(|e| format!("Text parse error at {offset}: {e}"))?;
            push_text(&mut doc, &open, &decode_entities(raw));
        }
    }

    if open.len() > 1 {
        let unclosed: Vec<&str> = open[1..]
            .iter()
            .map(|&idx| doc.element(idx).tag.as_str())
            .collect();
        return Err(format!("Unclosed elements: {}", unclosed.join(" > ")));
    }

    log::trace!("parsed SVG with {} elements", doc.len());
    Ok(doc)
}

/// Append character data at the current insertion point: the tail of the
/// last child if the open element already has children, its text otherwise.
/// Character data outside the outermost element is discarded.
fn push_text(doc: &mut SvgDocument, open: &[ElementIndex], data: &str) {
    let Some(&parent) = open.last() else {
        return;
    };
    if parent == doc.root || data.is_empty() {
        return;
    }
    match doc.children(parent).last().copied() {
        Some(last) => doc.element_mut(last).tail.push_str(data),
        None => doc.element_mut(parent).text.push_str(data),
    }
}

// ─── Tags ───────────────────────────────────────────────────────────────

struct StartTag<'a> {
    name: &'a str,
    attributes: SmallVec<[Attribute; 4]>,
    self_closing: bool,
}

/// Error type for the sub-parsers below.
type ParseErr = ErrMode<ContextError>;

fn parse_start_tag<'a>(input: &mut &'a str) -> ModalResult<StartTag<'a>> {
    expect(input, "<")?;
    let name = parse_name(input)?;
    let mut attributes = SmallVec::new();
    loop {
        skip_space(input);
        if let Some(after) = input.strip_prefix("/>") {
            *input = after;
            return Ok(StartTag {
                name,
                attributes,
                self_closing: true,
            });
        }
        if let Some(after) = input.strip_prefix('>') {
            *input = after;
            return Ok(StartTag {
                name,
                attributes,
                self_closing: false,
            });
        }
        attributes.push(parse_attribute(input)?);
    }
}

fn parse_end_tag<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    expect(input, "</")?;
    let name = parse_name(input)?;
    skip_space(input);
    expect(input, ">")?;
    Ok(name)
}

fn parse_attribute(input: &mut &str) -> ModalResult<Attribute> {
    let name = parse_name(input)?;
    skip_space(input);
    expect(input, "=")?;
    skip_space(input);
    let value = alt((
        delimited('"', take_till::<_, _, ParseErr>(0.., '"'), '"'),
        delimited('\'', take_till::<_, _, ParseErr>(0.., '\''), '\''),
    ))
    .parse_next(input)?;
    Ok(Attribute {
        name: name.to_string(),
        value: decode_entities(value),
    })
}

// ─── Low-level parsers ──────────────────────────────────────────────────

fn parse_name<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| {
        c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '.')
    })
    .parse_next(input)
}

/// Consume a fixed token or backtrack.
fn expect(input: &mut &str, token: &str) -> ModalResult<()> {
    match input.strip_prefix(token) {
        Some(after) => {
            *input = after;
            Ok(())
        }
        None => Err(ErrMode::Backtrack(ContextError::new())),
    }
}

/// Consume optional whitespace (concrete error type avoids inference issues).
fn skip_space(input: &mut &str) {
    use winnow::ascii::multispace0;
    let _: Result<&str, ParseErr> = multispace0.parse_next(input);
}

/// Skip through the next occurrence of `terminator`.
fn skip_past(input: &mut &str, terminator: &str) -> ModalResult<()> {
    let _ = take_until::<_, _, ParseErr>(0.., terminator).parse_next(input)?;
    *input = &input[terminator.len()..];
    Ok(())
}

/// Skip `<!DOCTYPE ...>` including an optional `[...]` internal subset.
fn skip_declaration(input: &mut &str) -> ModalResult<()> {
    let _ = take_till::<_, _, ParseErr>(0.., |c: char| c == '[' || c == '>').parse_next(input)?;
    if input.starts_with('[') {
        skip_past(input, "]")?;
    }
    skip_past(input, ">")
}

/// Decode the predefined XML entities and numeric character references.
/// Unknown or malformed references are kept verbatim.
pub fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let entity = &rest[1..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => {
                    let code = if let Some(hex) = entity
                        .strip_prefix("#x")
                        .or_else(|| entity.strip_prefix("#X"))
                    {
                        u32::from_str_radix(hex, 16).ok()
                    } else if let Some(dec) = entity.strip_prefix('#') {
                        dec.parse::<u32>().ok()
                    } else {
                        None
                    };
                    code.and_then(char::from_u32)
                }
            };
            ch.map(|c| (c, semi + 1))
        });
        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
