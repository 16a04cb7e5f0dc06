//! PHP lexer.
//!
//! Cutting the source into tokens is left to `mago-syntax`'s lexer.  This
//! module maps its token kinds onto [`TokenKind`], folds interpolated
//! strings back into single tokens, and then runs a context pass that fixes
//! up tokens whose meaning depends on their neighbours:
//!
//!   - `private(set)` style asymmetric visibility becomes one modifier,
//!   - keywords used as member names (`$a->list`, `Foo::class`,
//!     `function new()`) become identifiers,
//!   - `function` is split into named functions and closures,
//!   - `class` after `new` becomes an anonymous class,
//!   - `?` in type position becomes the nullable marker,
//!   - `&` in front of a variable or `...` becomes the by-reference marker.

use mago_database::file::FileId;
use mago_syntax::lexer::Lexer;
use mago_syntax::settings::LexerSettings;
use mago_syntax::token::TokenKind as PhpKind;
use mago_syntax_core::input::Input;
use memchr::memchr_iter;

use super::{RawToken, TokenKind};

/// Split PHP source into raw tokens.
///
/// # Panics
///
/// When the lexer rejects the source.
pub fn tokenize(source: &str) -> Vec<RawToken> {
    let input = Input::new(FileId::new("input.php"), source.as_bytes());
    let mut lexer = Lexer::new(input, LexerSettings::default());
    let mut builder = TokenBuilder::new();

    while let Some(result) = lexer.advance() {
        match result {
            Ok(token) => builder.push(token.kind, token.value),
            Err(error) => panic!("PHP lexer rejected the source: {error:?}"),
        }
    }

    classify_in_context(builder.finish())
}

// ─── Token mapping ──────────────────────────────────────────────────────────

fn map_kind(kind: PhpKind, value: &str) -> TokenKind {
    match kind {
        PhpKind::OpenTag | PhpKind::EchoTag | PhpKind::ShortOpenTag => TokenKind::OpenTag,
        PhpKind::CloseTag => TokenKind::CloseTag,
        PhpKind::InlineText => TokenKind::InlineHtml,
        PhpKind::Whitespace => TokenKind::Whitespace,
        PhpKind::SingleLineComment | PhpKind::HashComment | PhpKind::MultiLineComment => {
            TokenKind::Comment
        }
        PhpKind::DocBlockComment => TokenKind::DocComment,

        PhpKind::Variable => TokenKind::Variable,
        PhpKind::Identifier
        | PhpKind::QualifiedIdentifier
        | PhpKind::FullyQualifiedIdentifier => TokenKind::Identifier,
        PhpKind::NamespaceSeparator => TokenKind::NsSeparator,
        PhpKind::LiteralInteger | PhpKind::LiteralFloat => TokenKind::Number,
        PhpKind::LiteralString => TokenKind::ConstantString,

        PhpKind::Function => TokenKind::Function,
        PhpKind::Fn => TokenKind::Fn,
        PhpKind::Class => TokenKind::Class,
        PhpKind::Interface => TokenKind::Interface,
        PhpKind::Trait => TokenKind::Trait,
        PhpKind::Enum => TokenKind::Enum,
        PhpKind::Namespace => TokenKind::Namespace,
        PhpKind::Use => TokenKind::Use,
        PhpKind::Return => TokenKind::Return,
        PhpKind::New => TokenKind::New,
        PhpKind::Abstract => TokenKind::Abstract,
        PhpKind::Final => TokenKind::Final,
        PhpKind::Public | PhpKind::PublicSet => TokenKind::Public,
        PhpKind::Protected | PhpKind::ProtectedSet => TokenKind::Protected,
        PhpKind::Private | PhpKind::PrivateSet => TokenKind::Private,
        PhpKind::Static => TokenKind::Static,
        PhpKind::Readonly => TokenKind::Readonly,
        PhpKind::Var => TokenKind::Var,
        PhpKind::Const => TokenKind::Const,
        PhpKind::Extends => TokenKind::Extends,
        PhpKind::Implements => TokenKind::Implements,

        PhpKind::LeftParenthesis => TokenKind::OpenParen,
        PhpKind::RightParenthesis => TokenKind::CloseParen,
        PhpKind::LeftBrace => TokenKind::OpenCurly,
        PhpKind::RightBrace => TokenKind::CloseCurly,
        PhpKind::LeftBracket => TokenKind::OpenSquare,
        PhpKind::RightBracket => TokenKind::CloseSquare,
        PhpKind::HashLeftBracket => TokenKind::AttributeStart,
        PhpKind::Semicolon => TokenKind::Semicolon,
        PhpKind::Comma => TokenKind::Comma,
        PhpKind::Colon => TokenKind::Colon,
        PhpKind::ColonColon => TokenKind::DoubleColon,
        PhpKind::Equal => TokenKind::Equal,
        PhpKind::Question => TokenKind::InlineThen,
        PhpKind::Ampersand => TokenKind::BitwiseAnd,
        PhpKind::DotDotDot => TokenKind::Ellipsis,
        PhpKind::Pipe => TokenKind::BitwiseOr,
        PhpKind::MinusGreaterThan => TokenKind::ObjectOperator,
        PhpKind::QuestionMinusGreaterThan => TokenKind::NullsafeObjectOperator,
        PhpKind::EqualGreaterThan => TokenKind::DoubleArrow,
        PhpKind::QuestionQuestion => TokenKind::Coalesce,

        // Every other keyword (`array`, `self`, `null`, `if`, magic
        // constants, ...) only matters for its text.
        _ if value.starts_with(|c: char| c.is_alphabetic() || c == '_') => TokenKind::Identifier,
        _ => TokenKind::Operator,
    }
}

/// Delimiter of an interpolated string that is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Double,
    Backtick,
    Document,
}

impl Quote {
    fn opened_by(kind: PhpKind) -> Option<Self> {
        match kind {
            PhpKind::DoubleQuote => Some(Quote::Double),
            PhpKind::Backtick => Some(Quote::Backtick),
            PhpKind::DocumentStart(_) => Some(Quote::Document),
            _ => None,
        }
    }

    fn is_closed_by(self, kind: PhpKind) -> bool {
        matches!(
            (self, kind),
            (Quote::Double, PhpKind::DoubleQuote)
                | (Quote::Backtick, PhpKind::Backtick)
                | (Quote::Document, PhpKind::DocumentEnd)
        )
    }
}

struct OpenString {
    quote: Quote,
    /// Depth of `{$...}` / `${...}` interpolation inside the string.
    depth: usize,
}

/// Collects lexer output into [`RawToken`]s, tracking positions and
/// folding every interpolated string (its quotes, parts and embedded
/// expressions) into one [`TokenKind::ConstantString`].
struct TokenBuilder {
    tokens: Vec<RawToken>,
    line: u32,
    offset: u32,
    strings: Vec<OpenString>,
    string_text: String,
    string_start: (u32, u32),
}

impl TokenBuilder {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            line: 1,
            offset: 0,
            strings: Vec::new(),
            string_text: String::new(),
            string_start: (1, 0),
        }
    }

    fn push(&mut self, kind: PhpKind, value: &str) {
        if !self.strings.is_empty() {
            self.push_string_part(kind, value);
        } else if let Some(quote) = Quote::opened_by(kind) {
            self.string_start = (self.line, self.offset);
            self.strings.push(OpenString { quote, depth: 0 });
            self.string_text.push_str(value);
        } else {
            self.tokens.push(RawToken {
                kind: map_kind(kind, value),
                content: value.to_string(),
                line: self.line,
                offset: self.offset,
            });
        }

        self.offset += value.len() as u32;
        self.line += memchr_iter(b'\n', value.as_bytes()).count() as u32;
    }

    fn push_string_part(&mut self, kind: PhpKind, value: &str) {
        self.string_text.push_str(value);
        let Some(open) = self.strings.last_mut() else {
            return;
        };

        if open.depth == 0 && open.quote.is_closed_by(kind) {
            self.strings.pop();
        } else if matches!(kind, PhpKind::LeftBrace | PhpKind::DollarLeftBrace) {
            open.depth += 1;
        } else if matches!(kind, PhpKind::RightBrace) && open.depth > 0 {
            open.depth -= 1;
        } else if open.depth > 0
            && let Some(quote) = Quote::opened_by(kind)
        {
            self.strings.push(OpenString { quote, depth: 0 });
        }

        if self.strings.is_empty() {
            self.flush_string();
        }
    }

    fn flush_string(&mut self) {
        let (line, offset) = self.string_start;
        self.tokens.push(RawToken {
            kind: TokenKind::ConstantString,
            content: std::mem::take(&mut self.string_text),
            line,
            offset,
        });
    }

    fn finish(mut self) -> Vec<RawToken> {
        if !self.strings.is_empty() {
            self.strings.clear();
            self.flush_string();
        }
        self.tokens
    }
}

fn is_keyword(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Function
            | TokenKind::Fn
            | TokenKind::Class
            | TokenKind::Interface
            | TokenKind::Trait
            | TokenKind::Enum
            | TokenKind::Namespace
            | TokenKind::Use
            | TokenKind::Return
            | TokenKind::New
            | TokenKind::Abstract
            | TokenKind::Final
            | TokenKind::Public
            | TokenKind::Protected
            | TokenKind::Private
            | TokenKind::Static
            | TokenKind::Readonly
            | TokenKind::Var
            | TokenKind::Const
            | TokenKind::Extends
            | TokenKind::Implements
    )
}

// ─── Context pass ───────────────────────────────────────────────────────────

fn previous_effective(tokens: &[RawToken], i: usize) -> Option<usize> {
    (0..i).rev().find(|&j| !tokens[j].kind.is_ineffective())
}

fn next_effective(tokens: &[RawToken], i: usize) -> Option<usize> {
    (i + 1..tokens.len()).find(|&j| !tokens[j].kind.is_ineffective())
}

fn next_effective_kind(tokens: &[RawToken], i: usize) -> Option<TokenKind> {
    next_effective(tokens, i).map(|j| tokens[j].kind)
}

fn classify_in_context(tokens: Vec<RawToken>) -> Vec<RawToken> {
    let mut tokens = merge_asymmetric_visibility(tokens);

    for i in 0..tokens.len() {
        let kind = tokens[i].kind;
        if is_keyword(kind) {
            tokens[i].kind = classify_keyword(&tokens, i, kind);
        }
    }

    let attribute_closers = attribute_closers(&tokens);

    for i in 0..tokens.len() {
        match tokens[i].kind {
            TokenKind::Function => {
                // `function &name()` returns by reference; the name follows the `&`.
                let mut j = i + 1;
                while j < tokens.len()
                    && (tokens[j].kind.is_ineffective() || tokens[j].content == "&")
                {
                    j += 1;
                }
                if tokens.get(j).is_none_or(|t| t.kind != TokenKind::Identifier) {
                    tokens[i].kind = TokenKind::Closure;
                }
            }
            TokenKind::Class
                if previous_effective(&tokens, i).is_some_and(|j| tokens[j].kind == TokenKind::New) =>
            {
                tokens[i].kind = TokenKind::AnonClass;
            }
            TokenKind::InlineThen if is_nullable_position(&tokens, i, &attribute_closers) => {
                tokens[i].kind = TokenKind::Nullable;
            }
            TokenKind::BitwiseAnd
                if matches!(
                    next_effective_kind(&tokens, i),
                    Some(TokenKind::Variable | TokenKind::Ellipsis)
                ) =>
            {
                tokens[i].kind = TokenKind::AmpersandBeforeVariable;
            }
            _ => {}
        }
    }

    tokens
}

/// Fold `private(set)` (and the `public` / `protected` forms) into one
/// visibility token when the lexer hands it out in pieces.
fn merge_asymmetric_visibility(tokens: Vec<RawToken>) -> Vec<RawToken> {
    let mut merged = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        let group_end = matches!(
            token.kind,
            TokenKind::Public | TokenKind::Protected | TokenKind::Private
        )
        .then(|| set_group_end(&tokens, i))
        .flatten();

        match group_end {
            Some(end) => {
                merged.push(RawToken {
                    kind: token.kind,
                    content: tokens[i..=end].iter().map(|t| t.content.as_str()).collect(),
                    line: token.line,
                    offset: token.offset,
                });
                i = end + 1;
            }
            None => {
                merged.push(token.clone());
                i += 1;
            }
        }
    }
    merged
}

/// Index of the `)` of a `(set)` group directly after the visibility
/// keyword at `i`.
fn set_group_end(tokens: &[RawToken], i: usize) -> Option<usize> {
    let open = next_effective(tokens, i)?;
    if tokens[open].kind != TokenKind::OpenParen {
        return None;
    }
    let set = next_effective(tokens, open)?;
    if tokens[set].kind != TokenKind::Identifier || !tokens[set].content.eq_ignore_ascii_case("set") {
        return None;
    }
    let close = next_effective(tokens, set)?;
    (tokens[close].kind == TokenKind::CloseParen).then_some(close)
}

/// For every `]`, whether it closes an attribute group `#[...]` rather than
/// an array or an offset.
fn attribute_closers(tokens: &[RawToken]) -> Vec<bool> {
    let mut closers = vec![false; tokens.len()];
    let mut open: Vec<bool> = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::AttributeStart => open.push(true),
            TokenKind::OpenSquare => open.push(false),
            TokenKind::CloseSquare => closers[i] = open.pop().unwrap_or(false),
            _ => {}
        }
    }
    closers
}

fn classify_keyword(tokens: &[RawToken], i: usize, kind: TokenKind) -> TokenKind {
    let previous = previous_effective(tokens, i).map(|j| tokens[j].kind);
    let member_name = matches!(
        previous,
        Some(
            TokenKind::ObjectOperator
                | TokenKind::NullsafeObjectOperator
                | TokenKind::DoubleColon
                | TokenKind::Const
                | TokenKind::Function
        )
    );
    if member_name {
        return TokenKind::Identifier;
    }
    // `use function Foo\bar;` imports, it does not declare.
    if kind == TokenKind::Function && previous == Some(TokenKind::Use) {
        return TokenKind::Identifier;
    }
    match kind {
        // `namespace\foo()` is a relative name, not a declaration.
        TokenKind::Namespace
            if tokens.get(i + 1).is_some_and(|t| t.kind == TokenKind::NsSeparator) =>
        {
            TokenKind::Identifier
        }
        TokenKind::Enum if next_effective_kind(tokens, i) != Some(TokenKind::Identifier) => {
            TokenKind::Identifier
        }
        // `readonly()` is a legal function name.
        TokenKind::Readonly if next_effective_kind(tokens, i) == Some(TokenKind::OpenParen) => {
            TokenKind::Identifier
        }
        _ => kind,
    }
}

/// `?` is the nullable marker when it sits where a type starts and is
/// followed by a type name.  A type starts after `(`, `,`, `:`, `const`, a
/// member modifier, or the `]` closing an attribute group; a `]` closing an
/// array offset keeps `$a[0] ? x : y` a ternary.
fn is_nullable_position(tokens: &[RawToken], i: usize, attribute_closers: &[bool]) -> bool {
    let type_start = previous_effective(tokens, i).is_some_and(|j| {
        let kind = tokens[j].kind;
        matches!(
            kind,
            TokenKind::OpenParen | TokenKind::Comma | TokenKind::Colon | TokenKind::Const
        ) || kind.is_member_modifier()
            || attribute_closers[j]
    });
    let type_follows = matches!(
        next_effective_kind(tokens, i),
        Some(TokenKind::Identifier | TokenKind::NsSeparator | TokenKind::Static)
    );
    type_start && type_follows
}
