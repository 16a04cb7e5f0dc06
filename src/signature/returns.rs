//! Classification of a declaration's `return` statements.
//!
//! Only returns that belong to the declaration itself count.  A `return`
//! inside a closure or inside a method of an anonymous class returns from
//! that nested construct, so it is skipped.  Ownership is decided from the
//! token's frame chain, innermost first: the first closure or anonymous
//! class frame disqualifies the `return`, reaching the declaration's own
//! frame qualifies it.  Named functions declared inside the body are walked
//! through rather than treated as a barrier.

use tracing::trace;

use crate::tokens::{ConstructKind, TokenBuffer, TokenKind};

/// What the qualifying `return` statements of a body look like.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReturnKinds {
    /// Some qualifying `return` carries a value.
    pub returns_value: bool,
    /// Some qualifying `return` is bare.
    pub returns_void: bool,
}

/// Scan the body of the function at `pointer`.  Body-less declarations have
/// no returns at all.
pub fn scan_returns(buffer: &TokenBuffer, pointer: usize) -> ReturnKinds {
    let mut kinds = ReturnKinds::default();
    let Some((opener, closer)) = buffer.token(pointer).scope else {
        return kinds;
    };

    for index in opener + 1..closer {
        if buffer.kind(index) != TokenKind::Return || !belongs_to(buffer, index, pointer) {
            continue;
        }

        let is_bare = buffer
            .find_next_effective(index + 1, Some(closer + 1))
            .is_some_and(|next| {
                matches!(buffer.kind(next), TokenKind::Semicolon | TokenKind::CloseTag)
            });
        trace!(line = buffer.token(index).line, is_bare, "qualifying return");

        if is_bare {
            kinds.returns_void = true;
        } else {
            kinds.returns_value = true;
        }
    }

    kinds
}

fn belongs_to(buffer: &TokenBuffer, index: usize, pointer: usize) -> bool {
    for frame in buffer.frames(index) {
        if matches!(frame.kind, ConstructKind::Closure | ConstructKind::AnonClass) {
            return false;
        }
        if frame.owner == pointer {
            return true;
        }
    }
    false
}
