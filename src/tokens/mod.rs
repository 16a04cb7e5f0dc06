//! Token buffer: the flat, immutable view of a PHP file the signature
//! extractor walks.
//!
//! A [`TokenBuffer`] is an ordered sequence of [`Token`]s.  Besides its kind
//! and raw text, every token carries the structural links the extractor
//! relies on:
//!
//!   - `matching`: for `(`, `)`, `[`, `]`, `#[`, `{`, `}` the index of the
//!     bracket on the other side (symmetric).
//!   - `parenthesis`: for function-like keywords, the parameter list
//!     opener/closer.
//!   - `scope`: for construct keywords, the body opener/closer, when a body
//!     exists.
//!   - `frame`: the innermost enclosing construct.  Frames live in a flat
//!     arena with parent indices, so "conditions" of a token are obtained by
//!     walking [`TokenBuffer::frames`] from the innermost outward.
//!
//! Sub-modules:
//! - [`lexer`]: PHP source → [`RawToken`]s
//! - [`structure`]: bracket matching, construct classification, frame arena

pub mod lexer;
mod structure;

use std::sync::atomic::{AtomicU64, Ordering};

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    OpenTag,
    CloseTag,
    InlineHtml,
    Whitespace,
    Comment,
    DocComment,

    Variable,
    /// Names, including scalar type names such as `int` or `string`.
    Identifier,
    NsSeparator,
    Number,
    ConstantString,

    // ─── Keywords ───────────────────────────────────────────────────
    Function,
    /// A `function` keyword that opens an anonymous function.
    Closure,
    Fn,
    Class,
    /// A `class` keyword directly after `new`.
    AnonClass,
    Interface,
    Trait,
    Enum,
    Namespace,
    Use,
    Return,
    New,
    Abstract,
    Final,
    Public,
    Protected,
    Private,
    Static,
    Readonly,
    Var,
    Const,
    Extends,
    Implements,

    // ─── Punctuation ────────────────────────────────────────────────
    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    OpenSquare,
    CloseSquare,
    /// `#[`, closed by a regular `]`.
    AttributeStart,
    Semicolon,
    Comma,
    Colon,
    DoubleColon,
    Equal,
    /// `?` in type position.
    Nullable,
    /// `?` as the ternary operator.
    InlineThen,
    /// `&` directly followed by a variable or `...`.
    AmpersandBeforeVariable,
    /// Any other `&`.
    BitwiseAnd,
    Ellipsis,
    BitwiseOr,
    ObjectOperator,
    NullsafeObjectOperator,
    DoubleArrow,
    Coalesce,
    Operator,
}

impl TokenKind {
    /// Whitespace and comments carry no meaning for signature extraction.
    pub fn is_ineffective(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::Comment | TokenKind::DocComment
        )
    }

    /// Visibility / promotion modifiers that may precede a typed parameter
    /// or property.
    pub fn is_member_modifier(self) -> bool {
        matches!(
            self,
            TokenKind::Public
                | TokenKind::Protected
                | TokenKind::Private
                | TokenKind::Static
                | TokenKind::Readonly
                | TokenKind::Var
                | TokenKind::Final
                | TokenKind::Abstract
        )
    }
}

/// The kind of construct a [`Frame`] stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstructKind {
    Namespace,
    Class,
    Interface,
    Trait,
    Enum,
    AnonClass,
    Function,
    Closure,
}

impl ConstructKind {
    /// Named class-like declarations whose members get `\Name::member`
    /// qualification.
    pub fn is_named_class_like(self) -> bool {
        matches!(
            self,
            ConstructKind::Class | ConstructKind::Interface | ConstructKind::Trait | ConstructKind::Enum
        )
    }

    pub(crate) fn from_keyword(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Namespace => ConstructKind::Namespace,
            TokenKind::Class => ConstructKind::Class,
            TokenKind::Interface => ConstructKind::Interface,
            TokenKind::Trait => ConstructKind::Trait,
            TokenKind::Enum => ConstructKind::Enum,
            TokenKind::AnonClass => ConstructKind::AnonClass,
            TokenKind::Function => ConstructKind::Function,
            TokenKind::Closure => ConstructKind::Closure,
            _ => return None,
        })
    }
}

/// Index of a [`Frame`] in [`TokenBuffer`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub(crate) usize);

/// One enclosing construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub kind: ConstructKind,
    /// Token index of the keyword that opened the construct.
    pub owner: usize,
    pub parent: Option<FrameId>,
}

/// A token as produced by the lexer, before structural links are added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub kind: TokenKind,
    pub content: String,
    /// 1-based line of the first byte.
    pub line: u32,
    /// Byte offset of the first byte.
    pub offset: u32,
}

impl RawToken {
    /// Build a token without position information (synthetic buffers).
    pub fn new(kind: TokenKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            line: 0,
            offset: 0,
        }
    }
}

/// A token with its structural links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub content: String,
    pub line: u32,
    pub offset: u32,
    /// Innermost enclosing construct, `None` at file level.
    pub frame: Option<FrameId>,
    /// The other side of a bracket pair.
    pub matching: Option<usize>,
    /// Parameter list `(opener, closer)` of a function-like keyword.
    pub parenthesis: Option<(usize, usize)>,
    /// Body `(opener, closer)` of a construct keyword.
    pub scope: Option<(usize, usize)>,
}

/// Identity of a buffer, unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(u64);

static NEXT_BUFFER_ID: AtomicU64 = AtomicU64::new(1);

impl BufferId {
    fn next() -> Self {
        BufferId(NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// An immutable, fully linked token sequence.
#[derive(Debug)]
pub struct TokenBuffer {
    id: BufferId,
    tokens: Vec<Token>,
    frames: Vec<Frame>,
}

impl TokenBuffer {
    /// Tokenize PHP source and link the result.
    ///
    /// # Panics
    ///
    /// When brackets are unbalanced.
    pub fn from_source(source: &str) -> Self {
        Self::from_raw(lexer::tokenize(source))
    }

    /// Link an already lexed token sequence.
    ///
    /// # Panics
    ///
    /// When brackets are unbalanced.
    pub fn from_raw(raw: Vec<RawToken>) -> Self {
        let (tokens, frames) = structure::link(raw);
        Self {
            id: BufferId::next(),
            tokens,
            frames,
        }
    }

    pub fn id(&self) -> BufferId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// # Panics
    ///
    /// When `pointer` is out of bounds.
    pub fn token(&self, pointer: usize) -> &Token {
        &self.tokens[pointer]
    }

    pub fn kind(&self, pointer: usize) -> TokenKind {
        self.tokens[pointer].kind
    }

    pub fn content(&self, pointer: usize) -> &str {
        &self.tokens[pointer].content
    }

    pub fn frame(&self, id: FrameId) -> &Frame {
        &self.frames[id.0]
    }

    /// Enclosing constructs of the token at `pointer`, innermost first.
    pub fn frames(&self, pointer: usize) -> Frames<'_> {
        Frames {
            buffer: self,
            next: self.tokens[pointer].frame,
        }
    }

    /// Next token at or after `start` (and before `end`, exclusive) whose
    /// kind is in `kinds`.
    pub fn find_next(&self, kinds: &[TokenKind], start: usize, end: Option<usize>) -> Option<usize> {
        let end = end.unwrap_or(self.tokens.len()).min(self.tokens.len());
        (start..end).find(|&i| kinds.contains(&self.tokens[i].kind))
    }

    /// Next token at or after `start` (and before `end`, exclusive) that is
    /// not whitespace or a comment.
    pub fn find_next_effective(&self, start: usize, end: Option<usize>) -> Option<usize> {
        let end = end.unwrap_or(self.tokens.len()).min(self.tokens.len());
        (start..end).find(|&i| !self.tokens[i].kind.is_ineffective())
    }

    /// Previous token at or before `start` (and at or after `end`) that is
    /// not whitespace or a comment.
    pub fn find_previous_effective(&self, start: usize, end: usize) -> Option<usize> {
        if start >= self.tokens.len() {
            return None;
        }
        (end..=start)
            .rev()
            .find(|&i| !self.tokens[i].kind.is_ineffective())
    }
}

/// Iterator over the enclosing frames of a token, innermost first.
pub struct Frames<'a> {
    buffer: &'a TokenBuffer,
    next: Option<FrameId>,
}

impl<'a> Iterator for Frames<'a> {
    type Item = &'a Frame;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.buffer.frame(self.next?);
        self.next = frame.parent;
        Some(frame)
    }
}
