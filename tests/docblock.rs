mod common;

use common::{buffer, function_pointer};
use phpantom_signatures::Annotation;
use phpantom_signatures::docblock::{
    annotations_by_name, find_doc_comment, find_return_annotation, parameter_annotations,
    parse_annotations,
};

fn annotation(name: &str, content: Option<&str>) -> Annotation {
    Annotation {
        name: name.to_string(),
        content: content.map(str::to_string),
    }
}

// ─── Parsing ────────────────────────────────────────────────────────────────

#[test]
fn test_parse_multiline_block() {
    let doc = concat!(
        "/**\n",
        " * Summary line.\n",
        " *\n",
        " * @param int $a first\n",
        " * @param string|null $b\n",
        " * @return bool\n",
        " */",
    );
    assert_eq!(
        parse_annotations(doc),
        vec![
            annotation("@param", Some("int $a first")),
            annotation("@param", Some("string|null $b")),
            annotation("@return", Some("bool")),
        ]
    );
}

#[test]
fn test_parse_one_liner() {
    assert_eq!(
        parse_annotations("/** @return int */"),
        vec![annotation("@return", Some("int"))]
    );
}

#[test]
fn test_parse_tag_without_content() {
    assert_eq!(
        parse_annotations("/**\n * @internal\n */"),
        vec![annotation("@internal", None)]
    );
}

#[test]
fn test_parse_tag_name_ends_at_parenthesis() {
    assert_eq!(
        parse_annotations("/** @Route(\"/home\") */"),
        vec![annotation("@Route", Some("(\"/home\")"))]
    );
}

#[test]
fn test_parse_no_tags() {
    assert!(parse_annotations("/** Just prose. */").is_empty());
}

// ─── Attachment ─────────────────────────────────────────────────────────────

#[test]
fn test_doc_comment_through_modifiers_and_attributes() {
    let php = concat!(
        "<?php\n",
        "class A {\n",
        "    /**\n",
        "     * @param int $x\n",
        "     * @param array<int, string> $y\n",
        "     * @return static\n",
        "     * @return never\n",
        "     */\n",
        "    #[Pure]\n",
        "    // trailing remark\n",
        "    final public static function make(int $x, array $y) {}\n",
        "}\n",
    );
    let buffer = buffer(php);
    let pointer = function_pointer(&buffer, "make");

    assert!(find_doc_comment(&buffer, pointer).is_some());
    assert_eq!(
        parameter_annotations(&buffer, pointer),
        vec![
            annotation("@param", Some("int $x")),
            annotation("@param", Some("array<int, string> $y")),
        ]
    );
    assert_eq!(
        find_return_annotation(&buffer, pointer),
        Some(annotation("@return", Some("static")))
    );
}

#[test]
fn test_no_doc_comment() {
    let buffer = buffer("<?php\nfunction f($a) {}\n");
    let pointer = function_pointer(&buffer, "f");
    assert_eq!(find_doc_comment(&buffer, pointer), None);
    assert!(parameter_annotations(&buffer, pointer).is_empty());
    assert_eq!(find_return_annotation(&buffer, pointer), None);
}

#[test]
fn test_doc_comment_separated_by_statement_is_not_attached() {
    let php = "<?php\n/** @return int */\n$x = 1;\nfunction f() {}\n";
    let buffer = buffer(php);
    assert_eq!(find_doc_comment(&buffer, function_pointer(&buffer, "f")), None);
}

#[test]
fn test_plain_block_comment_is_not_a_doc_comment() {
    let php = "<?php\n/* @return int */\nfunction f() {}\n";
    let buffer = buffer(php);
    assert_eq!(find_return_annotation(&buffer, function_pointer(&buffer, "f")), None);
}

#[test]
fn test_annotations_by_name_filters() {
    let php = "<?php\n/**\n * @deprecated use g()\n * @param int $a\n */\nfunction f($a) {}\n";
    let buffer = buffer(php);
    let pointer = function_pointer(&buffer, "f");
    assert_eq!(
        annotations_by_name(&buffer, pointer, "@deprecated"),
        vec![annotation("@deprecated", Some("use g()"))]
    );
    assert!(annotations_by_name(&buffer, pointer, "@throws").is_empty());
}
