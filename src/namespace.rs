//! Namespace and class-like name lookups.
//!
//! Both lookups are purely lexical: they read the declared names out of the
//! token buffer and never resolve imports or aliases.

use crate::tokens::{ConstructKind, TokenBuffer, TokenKind};

/// Name of the namespace the token at `pointer` is declared in.
///
/// Handles both forms:
///   - statement form `namespace App\Models;`, which applies to everything
///     after it (until the next namespace statement),
///   - braced form `namespace App\Models { ... }`, which applies only to
///     tokens inside the braces.
///
/// Returns `None` in the global namespace, including the braced global
/// form `namespace { ... }`.
pub fn find_current_namespace_name(buffer: &TokenBuffer, pointer: usize) -> Option<String> {
    if let Some(frame) = buffer
        .frames(pointer)
        .find(|frame| frame.kind == ConstructKind::Namespace)
    {
        return namespace_declaration_name(buffer, frame.owner);
    }

    let keyword = (0..pointer)
        .rev()
        .find(|&i| buffer.kind(i) == TokenKind::Namespace)?;

    // A braced namespace we are not inside of does not apply.
    if buffer.token(keyword).scope.is_some() {
        return None;
    }

    namespace_declaration_name(buffer, keyword)
}

/// Name written after a `namespace` keyword, e.g. `App\Models`.
fn namespace_declaration_name(buffer: &TokenBuffer, keyword: usize) -> Option<String> {
    let mut name = String::new();
    for token in &buffer.tokens()[keyword + 1..] {
        match token.kind {
            TokenKind::Identifier | TokenKind::NsSeparator => name.push_str(&token.content),
            kind if kind.is_ineffective() => {}
            _ => break,
        }
    }
    let name = name.trim_start_matches('\\');
    (!name.is_empty()).then(|| name.to_string())
}

/// Declared name of the class, interface, trait or enum whose keyword is
/// at `pointer`.  Anonymous classes have none.
pub fn class_name(buffer: &TokenBuffer, pointer: usize) -> Option<String> {
    let end = buffer.token(pointer).scope.map(|(opener, _)| opener);
    let name = buffer.find_next(&[TokenKind::Identifier], pointer + 1, end)?;
    Some(buffer.content(name).to_string())
}
