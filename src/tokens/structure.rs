//! Structural linking.
//!
//! One forward pass over the raw tokens that:
//!
//!   1. matches every bracket pair (`()`, `[]`, `#[]`, `{}`),
//!   2. attaches parameter lists and bodies to the construct keywords that
//!      own them,
//!   3. builds the frame arena and stamps each token with its innermost
//!      frame.
//!
//! A construct keyword is "pending" from the keyword until its body brace
//! (or a `;` at the same bracket depth, which means it has no body).  The
//! body brace must sit at the same bracket depth as the keyword, so braces
//! inside default values or closure arguments never get attributed to an
//! outer declaration.

use tracing::debug;

use super::{ConstructKind, Frame, FrameId, RawToken, Token, TokenKind};

struct Pending {
    owner: usize,
    kind: ConstructKind,
    /// Bracket depth at the keyword.
    depth: usize,
    /// Opener of the parameter list, once seen.
    parameters: Option<usize>,
}

impl Pending {
    fn is_function_like(&self) -> bool {
        matches!(self.kind, ConstructKind::Function | ConstructKind::Closure)
    }
}

struct OpenBracket {
    index: usize,
    frame: Option<FrameId>,
}

pub(super) fn link(raw: Vec<RawToken>) -> (Vec<Token>, Vec<Frame>) {
    let mut tokens: Vec<Token> = raw
        .into_iter()
        .map(|t| Token {
            kind: t.kind,
            content: t.content,
            line: t.line,
            offset: t.offset,
            frame: None,
            matching: None,
            parenthesis: None,
            scope: None,
        })
        .collect();

    let mut frames: Vec<Frame> = Vec::new();
    let mut brackets: Vec<OpenBracket> = Vec::new();
    let mut pending: Vec<Pending> = Vec::new();
    let mut current: Option<FrameId> = None;

    for i in 0..tokens.len() {
        let kind = tokens[i].kind;

        if let Some(construct) = ConstructKind::from_keyword(kind) {
            pending.push(Pending {
                owner: i,
                kind: construct,
                depth: brackets.len(),
                parameters: None,
            });
        }

        match kind {
            TokenKind::OpenParen => {
                if let Some(p) = pending.last_mut()
                    && p.is_function_like()
                    && p.depth == brackets.len()
                    && p.parameters.is_none()
                {
                    p.parameters = Some(i);
                }
                brackets.push(OpenBracket { index: i, frame: None });
            }
            TokenKind::OpenSquare | TokenKind::AttributeStart => {
                brackets.push(OpenBracket { index: i, frame: None });
            }
            TokenKind::OpenCurly => {
                tokens[i].frame = current;
                let owns_body = pending.last().is_some_and(|p| {
                    p.depth == brackets.len() && (!p.is_function_like() || p.parameters.is_some())
                });
                let frame = if owns_body {
                    let Some(p) = pending.pop() else {
                        unreachable!("owns_body implies a pending construct");
                    };
                    let id = FrameId(frames.len());
                    frames.push(Frame {
                        kind: p.kind,
                        owner: p.owner,
                        parent: current,
                    });
                    tokens[p.owner].scope = Some((i, i));
                    current = Some(id);
                    Some(id)
                } else {
                    None
                };
                brackets.push(OpenBracket { index: i, frame });
                continue;
            }
            TokenKind::CloseParen | TokenKind::CloseSquare | TokenKind::CloseCurly => {
                let Some(open) = brackets.pop() else {
                    panic!("unbalanced `{}` at token {i}", tokens[i].content);
                };
                let expected = match kind {
                    TokenKind::CloseParen => &[TokenKind::OpenParen][..],
                    TokenKind::CloseSquare => &[TokenKind::OpenSquare, TokenKind::AttributeStart][..],
                    _ => &[TokenKind::OpenCurly][..],
                };
                assert!(
                    expected.contains(&tokens[open.index].kind),
                    "`{}` at token {} closed by `{}` at token {i}",
                    tokens[open.index].content,
                    open.index,
                    tokens[i].content,
                );
                tokens[open.index].matching = Some(i);
                tokens[i].matching = Some(open.index);

                if kind == TokenKind::CloseParen
                    && let Some(p) = pending.iter().rev().find(|p| p.parameters == Some(open.index))
                {
                    tokens[p.owner].parenthesis = Some((open.index, i));
                }

                if let Some(id) = open.frame {
                    let frame = &frames[id.0];
                    tokens[frame.owner].scope = Some((open.index, i));
                    current = frame.parent;
                }

                // Constructs started inside the closed bracket can no longer
                // receive a body.
                pending.retain(|p| p.depth <= brackets.len());
            }
            TokenKind::Semicolon => {
                pending.retain(|p| p.depth < brackets.len());
            }
            _ => {}
        }

        tokens[i].frame = current;
    }

    if let Some(open) = brackets.last() {
        panic!(
            "unclosed `{}` at token {}",
            tokens[open.index].content, open.index
        );
    }

    debug!(tokens = tokens.len(), frames = frames.len(), "linked token buffer");

    (tokens, frames)
}
