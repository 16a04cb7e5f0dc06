mod common;

use common::{buffer, effective_kinds};
use phpantom_signatures::tokens::lexer::tokenize;
use phpantom_signatures::{TokenBuffer, TokenKind};

fn kinds_of(buffer: &TokenBuffer, content: &str) -> Vec<TokenKind> {
    buffer
        .tokens()
        .iter()
        .filter(|t| t.content == content)
        .map(|t| t.kind)
        .collect()
}

// ─── Basic cuts ─────────────────────────────────────────────────────────────

#[test]
fn test_simple_statement() {
    let buffer = buffer("<?php\n$a = 1;");
    assert_eq!(
        effective_kinds(&buffer),
        vec![
            TokenKind::OpenTag,
            TokenKind::Variable,
            TokenKind::Equal,
            TokenKind::Number,
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn test_tokens_reassemble_source() {
    let php = "<?php\n/** doc */\nfunction f(?int &...$a): \\Foo\\Bar { return $a ?? 'x'; }\n";
    let joined: String = tokenize(php).into_iter().map(|t| t.content).collect();
    assert_eq!(joined, php);
}

#[test]
fn test_lines_and_offsets() {
    let buffer = buffer("<?php\n\nfunction f() {}");
    let function = buffer
        .tokens()
        .iter()
        .find(|t| t.kind == TokenKind::Function)
        .unwrap();
    assert_eq!(function.line, 3);
    assert_eq!(function.offset, 7);
}

#[test]
fn test_inline_html_and_close_tag() {
    let buffer = buffer("<html><?php echo 1; ?>\n<b></b>");
    assert_eq!(
        effective_kinds(&buffer),
        vec![
            TokenKind::InlineHtml,
            TokenKind::OpenTag,
            TokenKind::Identifier,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::CloseTag,
            TokenKind::InlineHtml,
        ]
    );
}

#[test]
fn test_keywords_are_case_insensitive() {
    let buffer = buffer("<?php FUNCTION Foo() {}");
    assert_eq!(kinds_of(&buffer, "FUNCTION"), vec![TokenKind::Function]);
}

// ─── Opaque tokens ──────────────────────────────────────────────────────────

#[test]
fn test_comments_and_strings_hide_braces() {
    let buffer = buffer("<?php // function x() {\n$a = '{'; /* } */ $b = \"}\"; # {\n");
    assert!(
        !buffer
            .tokens()
            .iter()
            .any(|t| matches!(t.kind, TokenKind::OpenCurly | TokenKind::CloseCurly)),
        "braces inside comments and strings must not become tokens"
    );
}

#[test]
fn test_doc_comment_vs_plain_comment() {
    let buffer = buffer("<?php /** @return int */ /**/ /* x */");
    assert_eq!(kinds_of(&buffer, "/** @return int */"), vec![TokenKind::DocComment]);
    assert_eq!(kinds_of(&buffer, "/* x */"), vec![TokenKind::Comment]);
}

#[test]
fn test_heredoc_is_one_token() {
    let buffer = buffer("<?php\n$a = <<<EOT\n{ function }\nEOT;\n");
    let strings: Vec<&str> = buffer
        .tokens()
        .iter()
        .filter(|t| t.kind == TokenKind::ConstantString)
        .map(|t| t.content.as_str())
        .collect();
    assert_eq!(strings, vec!["<<<EOT\n{ function }\nEOT"]);
    assert!(!buffer.tokens().iter().any(|t| t.kind == TokenKind::OpenCurly));
}

#[test]
fn test_attribute_start_is_not_a_comment() {
    let buffer = buffer("<?php #[Pure] function f() {}");
    assert_eq!(kinds_of(&buffer, "#["), vec![TokenKind::AttributeStart]);
    assert_eq!(kinds_of(&buffer, "Pure"), vec![TokenKind::Identifier]);
}

#[test]
fn test_interpolated_string_is_one_token() {
    let php = "<?php $s = \"a {$b['c']} $e->f `{\";";
    let buffer = buffer(php);
    let strings: Vec<&str> = buffer
        .tokens()
        .iter()
        .filter(|t| t.kind == TokenKind::ConstantString)
        .map(|t| t.content.as_str())
        .collect();
    assert_eq!(strings, vec!["\"a {$b['c']} $e->f `{\""]);
    assert_eq!(kinds_of(&buffer, "$b"), Vec::<TokenKind>::new());
    assert_eq!(
        effective_kinds(&buffer),
        vec![
            TokenKind::OpenTag,
            TokenKind::Variable,
            TokenKind::Equal,
            TokenKind::ConstantString,
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn test_interpolated_heredoc_positions_follow() {
    let php = "<?php\n$a = <<<EOT\n{$x}\nEOT;\nfunction f() {}\n";
    let buffer = buffer(php);
    let function = buffer
        .tokens()
        .iter()
        .find(|t| t.kind == TokenKind::Function)
        .unwrap();
    assert_eq!(function.line, 5);
    assert_eq!(function.offset as usize, php.find("function").unwrap());
    let joined: String = tokenize(php).into_iter().map(|t| t.content).collect();
    assert_eq!(joined, php);
}

// ─── Context classification ─────────────────────────────────────────────────

#[test]
fn test_keywords_as_member_names() {
    let buffer = buffer("<?php $a->class; Foo::class; $a->function(); $a?->new;");
    assert!(
        !buffer
            .tokens()
            .iter()
            .any(|t| matches!(t.kind, TokenKind::Class | TokenKind::Function | TokenKind::New)),
        "member names must be identifiers"
    );
}

#[test]
fn test_function_vs_closure() {
    let buffer =
        buffer("<?php function named() {} $f = function () {}; $g = function &() {}; function &byRef() {}");
    assert_eq!(
        kinds_of(&buffer, "function"),
        vec![
            TokenKind::Function,
            TokenKind::Closure,
            TokenKind::Closure,
            TokenKind::Function,
        ]
    );
}

#[test]
fn test_use_function_is_an_import() {
    let buffer = buffer("<?php use function Foo\\bar;");
    assert_eq!(kinds_of(&buffer, "function"), vec![TokenKind::Identifier]);
}

#[test]
fn test_anonymous_class() {
    let buffer = buffer("<?php $x = new class {}; class Named {}");
    assert_eq!(
        kinds_of(&buffer, "class"),
        vec![TokenKind::AnonClass, TokenKind::Class]
    );
}

#[test]
fn test_enum_keyword_only_before_a_name() {
    let buffer = buffer("<?php enum Suit {} $x = enum(1);");
    assert_eq!(
        kinds_of(&buffer, "enum"),
        vec![TokenKind::Enum, TokenKind::Identifier]
    );
}

#[test]
fn test_nullable_vs_ternary() {
    let buffer =
        buffer("<?php function f(?int $a, ?\\Foo $b): ?string { return $a ? 1 : 2; }");
    assert_eq!(
        kinds_of(&buffer, "?"),
        vec![
            TokenKind::Nullable,
            TokenKind::Nullable,
            TokenKind::Nullable,
            TokenKind::InlineThen,
        ]
    );
}

#[test]
fn test_nullable_after_promotion_modifier() {
    let buffer = buffer("<?php class A { public function __construct(private readonly ?int $id) {} }");
    assert_eq!(kinds_of(&buffer, "?"), vec![TokenKind::Nullable]);
}

#[test]
fn test_ampersand_classification() {
    let buffer = buffer("<?php function f(&$a, A&B &...$b) {}");
    assert_eq!(
        kinds_of(&buffer, "&"),
        vec![
            TokenKind::AmpersandBeforeVariable,
            TokenKind::BitwiseAnd,
            TokenKind::AmpersandBeforeVariable,
        ]
    );
}

#[test]
fn test_multi_byte_operators() {
    let buffer = buffer("<?php $a?->b ?? $c => ...$d :: $e->f;");
    assert_eq!(kinds_of(&buffer, "?->"), vec![TokenKind::NullsafeObjectOperator]);
    assert_eq!(kinds_of(&buffer, "??"), vec![TokenKind::Coalesce]);
    assert_eq!(kinds_of(&buffer, "=>"), vec![TokenKind::DoubleArrow]);
    assert_eq!(kinds_of(&buffer, "..."), vec![TokenKind::Ellipsis]);
    assert_eq!(kinds_of(&buffer, "::"), vec![TokenKind::DoubleColon]);
    assert_eq!(kinds_of(&buffer, "->"), vec![TokenKind::ObjectOperator]);
}

#[test]
fn test_nullable_after_attribute_group() {
    let buffer = buffer("<?php function f(#[A] ?int $a, #[B(1)]?\\Foo $b) { return $c[0] ? 1 : 2; }");
    assert_eq!(
        kinds_of(&buffer, "?"),
        vec![
            TokenKind::Nullable,
            TokenKind::Nullable,
            TokenKind::InlineThen,
        ]
    );
}

#[test]
fn test_asymmetric_visibility_is_one_modifier() {
    let buffer = buffer("<?php class A { public function __construct(public private(set) string $x) {} }");
    let private: Vec<&str> = buffer
        .tokens()
        .iter()
        .filter(|t| t.kind == TokenKind::Private)
        .map(|t| t.content.as_str())
        .collect();
    assert_eq!(private, vec!["private(set)"]);
    assert!(!buffer.tokens().iter().any(|t| t.content == "set"));
}
