//! Data types produced by the signature extractor.
//!
//! All descriptors are owned snapshots: they hold no reference into the
//! token buffer they were derived from, so they can be cached, cloned and
//! sent across threads freely.

use serde::{Deserialize, Serialize};

/// A type hint reconstructed from the tokens of a parameter or return
/// position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeHint {
    /// The hint as written, without the leading `?` and without whitespace
    /// (e.g. "int", "\Foo\Bar", "int|string", "(A&B)|null").
    pub text: String,
    /// Whether the hint was written with a leading `?`.
    pub is_nullable: bool,
    /// Parameter hints only: whether the parameter has a default value.
    /// Always `false` for return hints.
    pub is_optional: bool,
}

/// One parameter of a function declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// The parameter name including the `$` prefix (e.g. "$text").
    pub name: String,
    pub hint: Option<TypeHint>,
    /// Whether the parameter is variadic (`...$rest`).
    pub is_variadic: bool,
    /// Whether the parameter is passed by reference (`&$out`).
    pub is_by_reference: bool,
}

/// Everything the extractor knows about one function or method
/// declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    /// The declared name (e.g. "updateText").
    pub name: String,
    /// `\Class::name` for methods, `class@anonymous::name` inside anonymous
    /// classes, `\Namespace\name` or plain `name` for free functions.
    pub qualified_name: String,
    pub is_method: bool,
    /// Declared without a body (abstract or interface methods).
    pub is_abstract: bool,
    /// Parameters in declaration order.
    pub parameters: Vec<ParameterDescriptor>,
    pub return_hint: Option<TypeHint>,
    /// Some `return` of the declaration itself carries a value.
    pub returns_value: bool,
    /// Some `return` of the declaration itself is a bare `return;`.
    pub returns_void: bool,
}

/// A raw PHPDoc tag attached to a declaration, e.g. `@param int $a`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    /// The tag name including `@` (e.g. "@param").
    pub name: String,
    /// Text following the tag on the same line, trimmed.  `None` when the
    /// tag stands alone.
    pub content: Option<String>,
}
