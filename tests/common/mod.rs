#![allow(dead_code)]

use phpantom_signatures::signature;
use phpantom_signatures::{FunctionDescriptor, TokenBuffer, TokenKind, TypeHint};

pub fn buffer(php: &str) -> TokenBuffer {
    TokenBuffer::from_source(php)
}

/// Pointer of the named function or method called `name`.
pub fn function_pointer(buffer: &TokenBuffer, name: &str) -> usize {
    signature::function_pointers(buffer)
        .into_iter()
        .find(|&p| signature::function_name(buffer, p) == name)
        .unwrap_or_else(|| panic!("no function named {name}"))
}

/// Describe the function called `name` in `php`.
pub fn describe(php: &str, name: &str) -> FunctionDescriptor {
    let buffer = buffer(php);
    let pointer = function_pointer(&buffer, name);
    signature::describe_function(&buffer, pointer)
}

/// Index of the first token with exactly this content.
pub fn token_index(buffer: &TokenBuffer, content: &str) -> usize {
    buffer
        .tokens()
        .iter()
        .position(|t| t.content == content)
        .unwrap_or_else(|| panic!("no token `{content}`"))
}

/// Kinds of the effective (non-whitespace, non-comment) tokens.
pub fn effective_kinds(buffer: &TokenBuffer) -> Vec<TokenKind> {
    buffer
        .tokens()
        .iter()
        .map(|t| t.kind)
        .filter(|k| !k.is_ineffective())
        .collect()
}

pub fn hint(text: &str, is_nullable: bool, is_optional: bool) -> TypeHint {
    TypeHint {
        text: text.to_string(),
        is_nullable,
        is_optional,
    }
}
