//! PHPDoc annotation lookup.
//!
//! Finds the `/** ... */` comment attached to a declaration and splits it
//! into raw tag entries (`@param int $a` → name `@param`, content
//! `int $a`).  The content is handed out as written; interpreting it is up
//! to the caller.

use crate::tokens::{TokenBuffer, TokenKind};
use crate::types::Annotation;

/// Token index of the doc comment attached to the declaration at
/// `pointer`.
///
/// Walks backwards over whitespace, plain comments, modifiers
/// (`public static final ...`) and attribute groups (`#[Route('/')]`).
/// Anything else means the declaration has no doc comment.
pub fn find_doc_comment(buffer: &TokenBuffer, pointer: usize) -> Option<usize> {
    let mut i = pointer;
    while i > 0 {
        i -= 1;
        let token = buffer.token(i);
        match token.kind {
            TokenKind::DocComment => return Some(i),
            TokenKind::Whitespace | TokenKind::Comment => {}
            kind if kind.is_member_modifier() => {}
            TokenKind::CloseSquare => match token.matching {
                Some(open) if buffer.kind(open) == TokenKind::AttributeStart => i = open,
                _ => return None,
            },
            _ => return None,
        }
    }
    None
}

/// Split a doc comment into its tags, in source order.
///
/// Handles both multi-line blocks and one-liners such as
/// `/** @return int */`.  Only the tag's own line is captured.
pub fn parse_annotations(docblock: &str) -> Vec<Annotation> {
    let inner = docblock
        .trim()
        .strip_prefix("/**")
        .unwrap_or(docblock)
        .strip_suffix("*/")
        .unwrap_or(docblock);

    let mut annotations = Vec::new();

    for line in inner.lines() {
        let trimmed = line.trim().trim_start_matches('*').trim();
        if !trimmed.starts_with('@') {
            continue;
        }

        let name_end = trimmed
            .find(|c: char| c.is_whitespace() || c == '(')
            .unwrap_or(trimmed.len());
        let (name, rest) = trimmed.split_at(name_end);
        let rest = rest.trim();

        annotations.push(Annotation {
            name: name.to_string(),
            content: (!rest.is_empty()).then(|| rest.to_string()),
        });
    }

    annotations
}

/// All tags named `name` (e.g. `"@param"`) on the declaration at `pointer`.
pub fn annotations_by_name(buffer: &TokenBuffer, pointer: usize, name: &str) -> Vec<Annotation> {
    let Some(doc) = find_doc_comment(buffer, pointer) else {
        return Vec::new();
    };
    parse_annotations(buffer.content(doc))
        .into_iter()
        .filter(|annotation| annotation.name == name)
        .collect()
}

/// The `@param` tags of the function at `pointer`.
pub fn parameter_annotations(buffer: &TokenBuffer, pointer: usize) -> Vec<Annotation> {
    annotations_by_name(buffer, pointer, "@param")
}

/// The first `@return` tag of the function at `pointer`.
pub fn find_return_annotation(buffer: &TokenBuffer, pointer: usize) -> Option<Annotation> {
    annotations_by_name(buffer, pointer, "@return")
        .into_iter()
        .next()
}
