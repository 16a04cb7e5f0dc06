//! Type hint reconstruction.
//!
//! PHP spreads a type hint over several tokens: `?\Foo\Bar` is a nullable
//! marker, two namespace separators and two names; `int|string` is three
//! tokens.  [`assemble`] walks from a boundary token in one direction,
//! skips the tokens that never belong to a hint, and concatenates the rest
//! until a terminator.
//!
//! Where the walk may go is described by a [`Boundary`]: parameter hints and
//! hints in front of a body are bounded by a known token index, while hints
//! of body-less declarations run until a statement terminator.

use crate::tokens::{TokenBuffer, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the start of the buffer; fragments are prepended.
    Backward,
    /// Towards the end of the buffer; fragments are appended.
    Forward,
}

/// How far a walk may go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary<'a> {
    /// Stop before reaching this token index.
    Bounded(usize),
    /// No index limit; stop at the first token of one of these kinds.
    UnboundedUntil(&'a [TokenKind]),
}

impl Boundary<'_> {
    fn stops_at(&self, buffer: &TokenBuffer, index: usize, direction: Direction) -> bool {
        match (*self, direction) {
            (Boundary::Bounded(limit), Direction::Backward) => index <= limit,
            (Boundary::Bounded(limit), Direction::Forward) => index >= limit,
            (Boundary::UnboundedUntil(kinds), _) => kinds.contains(&buffer.kind(index)),
        }
    }
}

/// Parameters of one hint walk.
#[derive(Debug, Clone, Copy)]
pub struct HintScan<'a> {
    pub direction: Direction,
    pub boundary: Boundary<'a>,
    /// Skipped without ending the hint (in addition to whitespace and
    /// comments).
    pub transparent: &'a [TokenKind],
    /// End the hint.
    pub terminators: &'a [TokenKind],
}

/// Text and nullability of a reconstructed hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledHint {
    pub text: String,
    pub is_nullable: bool,
}

/// Walk from `start` (exclusive) according to `scan` and rebuild the hint.
///
/// A nullable marker sets [`AssembledHint::is_nullable`] and is left out of
/// the text; walking backward it also ends the walk, since it can only be
/// the leftmost part of a hint.
///
/// Returns `None` when no hint token was found before the walk ended.
pub fn assemble(buffer: &TokenBuffer, start: usize, scan: &HintScan<'_>) -> Option<AssembledHint> {
    let mut fragments: Vec<&str> = Vec::new();
    let mut is_nullable = false;
    let mut cursor = start;

    while let Some(index) = step(buffer, cursor, scan.direction) {
        if scan.boundary.stops_at(buffer, index, scan.direction) {
            break;
        }
        cursor = index;

        let kind = buffer.kind(index);
        if kind.is_ineffective() || scan.transparent.contains(&kind) {
            continue;
        }
        if kind == TokenKind::Nullable {
            is_nullable = true;
            if scan.direction == Direction::Backward {
                break;
            }
            continue;
        }
        if scan.terminators.contains(&kind) {
            break;
        }
        fragments.push(buffer.content(index));
    }

    if fragments.is_empty() {
        return None;
    }
    if scan.direction == Direction::Backward {
        fragments.reverse();
    }

    Some(AssembledHint {
        text: fragments.concat(),
        is_nullable,
    })
}

/// First token of one of `kinds` after `start` (exclusive) within
/// `boundary`.
pub fn find_forward(
    buffer: &TokenBuffer,
    kinds: &[TokenKind],
    start: usize,
    boundary: Boundary<'_>,
) -> Option<usize> {
    let mut cursor = start;
    while let Some(index) = step(buffer, cursor, Direction::Forward) {
        if boundary.stops_at(buffer, index, Direction::Forward) {
            return None;
        }
        if kinds.contains(&buffer.kind(index)) {
            return Some(index);
        }
        cursor = index;
    }
    None
}

fn step(buffer: &TokenBuffer, cursor: usize, direction: Direction) -> Option<usize> {
    match direction {
        Direction::Backward => cursor.checked_sub(1),
        Direction::Forward => Some(cursor + 1).filter(|&i| i < buffer.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward_until_semicolon() -> HintScan<'static> {
        HintScan {
            direction: Direction::Forward,
            boundary: Boundary::UnboundedUntil(&[TokenKind::Semicolon]),
            transparent: &[],
            terminators: &[],
        }
    }

    #[test]
    fn forward_walk_appends_fragments() {
        let buffer = TokenBuffer::from_source("<?php : \\Foo\\Bar;");
        let colon = buffer.find_next(&[TokenKind::Colon], 0, None).unwrap();
        let hint = assemble(&buffer, colon, &forward_until_semicolon()).unwrap();
        assert_eq!(hint.text, "\\Foo\\Bar");
        assert!(!hint.is_nullable);
    }

    #[test]
    fn forward_walk_strips_nullable_marker() {
        let buffer = TokenBuffer::from_source("<?php : ?  int;");
        let colon = buffer.find_next(&[TokenKind::Colon], 0, None).unwrap();
        let hint = assemble(&buffer, colon, &forward_until_semicolon()).unwrap();
        assert_eq!(hint.text, "int");
        assert!(hint.is_nullable);
    }

    #[test]
    fn empty_range_yields_none() {
        let buffer = TokenBuffer::from_source("<?php : ;");
        let colon = buffer.find_next(&[TokenKind::Colon], 0, None).unwrap();
        assert_eq!(assemble(&buffer, colon, &forward_until_semicolon()), None);
    }

    #[test]
    fn bounded_walk_stops_at_limit() {
        let buffer = TokenBuffer::from_source("<?php : int {}");
        let colon = buffer.find_next(&[TokenKind::Colon], 0, None).unwrap();
        let curly = buffer.find_next(&[TokenKind::OpenCurly], 0, None).unwrap();
        let scan = HintScan {
            direction: Direction::Forward,
            boundary: Boundary::Bounded(curly),
            transparent: &[],
            terminators: &[],
        };
        assert_eq!(assemble(&buffer, colon, &scan).unwrap().text, "int");
    }

    #[test]
    fn find_forward_respects_terminator() {
        let buffer = TokenBuffer::from_source("<?php a; b: c");
        let boundary = Boundary::UnboundedUntil(&[TokenKind::Semicolon]);
        assert_eq!(find_forward(&buffer, &[TokenKind::Colon], 0, boundary), None);
        let semicolon = buffer.find_next(&[TokenKind::Semicolon], 0, None).unwrap();
        assert!(find_forward(&buffer, &[TokenKind::Colon], semicolon, boundary).is_some());
    }
}
