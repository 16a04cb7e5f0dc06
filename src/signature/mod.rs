//! Function signature extraction.
//!
//! Every query here is a free function over a shared `&TokenBuffer` and the
//! index of a `function` keyword (the "pointer").  Nothing is cached or
//! mutated, so any number of threads may query the same buffer at once.
//!
//! [`describe_function`] bundles all facts into a [`FunctionDescriptor`];
//! the individual queries are public for callers that need only one fact.
//!
//! Sub-modules:
//! - [`hint`]: type hint reconstruction from token ranges
//! - [`returns`]: `return` statement classification

pub mod hint;
pub mod returns;

use tracing::debug;

use crate::namespace;
use crate::tokens::{ConstructKind, TokenBuffer, TokenKind};
use crate::types::{FunctionDescriptor, ParameterDescriptor, TypeHint};

use self::hint::{AssembledHint, Boundary, Direction, HintScan};

pub use self::returns::{ReturnKinds, scan_returns};

/// Prefix of qualified names for methods of anonymous classes.
pub const ANONYMOUS_CLASS_PREFIX: &str = "class@anonymous";

const NAMESPACE_SEPARATOR: &str = "\\";

/// Tokens that end a parameter hint when walking back from the variable.
/// Commas separate parameters, `]` closes an attribute group, and modifiers
/// belong to constructor promotion.
const PARAMETER_HINT_TERMINATORS: &[TokenKind] = &[
    TokenKind::Comma,
    TokenKind::CloseSquare,
    TokenKind::AttributeStart,
    TokenKind::Public,
    TokenKind::Protected,
    TokenKind::Private,
    TokenKind::Readonly,
];

/// By-reference and variadic markers sit between the hint and the variable
/// but are not part of the hint.
const PARAMETER_HINT_TRANSPARENT: &[TokenKind] =
    &[TokenKind::AmpersandBeforeVariable, TokenKind::Ellipsis];

const STATEMENT_TERMINATORS: &[TokenKind] = &[TokenKind::Semicolon];

// ─── Enumeration ────────────────────────────────────────────────────────────

/// Pointers of all named function and method declarations, in source
/// order.  Closures and arrow functions are not included.
pub fn function_pointers(buffer: &TokenBuffer) -> Vec<usize> {
    buffer
        .tokens()
        .iter()
        .enumerate()
        .filter(|(_, token)| token.kind == TokenKind::Function && token.parenthesis.is_some())
        .map(|(i, _)| i)
        .collect()
}

// ─── Naming ─────────────────────────────────────────────────────────────────

/// The declared name: the first identifier between the keyword and the
/// parameter list.
///
/// # Panics
///
/// When `pointer` is not a named function with a parameter list.
pub fn function_name(buffer: &TokenBuffer, pointer: usize) -> String {
    let (opener, _) = parameter_list(buffer, pointer);
    let Some(name) = buffer.find_next(&[TokenKind::Identifier], pointer + 1, Some(opener)) else {
        panic!("function at token {pointer} has no name");
    };
    buffer.content(name).to_string()
}

/// The qualified name of the declaration.
///
///   - inside an anonymous class: `class@anonymous::name`
///   - inside a class, interface, trait or enum `Foo`: `\Foo::name`
///   - free function in namespace `App`: `\App\name`
///   - free function in the global namespace: `name`
///
/// The enclosing frames are searched innermost first and the first
/// class-like frame decides.  Method names are qualified by the bare class
/// name only; namespace prefixing applies to free functions.
pub fn fully_qualified_name(buffer: &TokenBuffer, pointer: usize) -> String {
    let name = function_name(buffer, pointer);

    for frame in buffer.frames(pointer) {
        if frame.kind == ConstructKind::AnonClass {
            return format!("{ANONYMOUS_CLASS_PREFIX}::{name}");
        }
        if frame.kind.is_named_class_like() {
            let Some(class) = namespace::class_name(buffer, frame.owner) else {
                panic!("class-like at token {} has no name", frame.owner);
            };
            return format!("{NAMESPACE_SEPARATOR}{class}::{name}");
        }
    }

    match namespace::find_current_namespace_name(buffer, pointer) {
        Some(ns) => format!("{NAMESPACE_SEPARATOR}{ns}{NAMESPACE_SEPARATOR}{name}"),
        None => name,
    }
}

// ─── Shape ──────────────────────────────────────────────────────────────────

/// A declaration without a body: abstract methods and interface methods.
pub fn is_abstract_function(buffer: &TokenBuffer, pointer: usize) -> bool {
    buffer.token(pointer).scope.is_none()
}

/// Whether any enclosing frame is a class, interface, trait, enum or
/// anonymous class.
pub fn is_method_function(buffer: &TokenBuffer, pointer: usize) -> bool {
    buffer
        .frames(pointer)
        .any(|frame| frame.kind.is_named_class_like() || frame.kind == ConstructKind::AnonClass)
}

fn parameter_list(buffer: &TokenBuffer, pointer: usize) -> (usize, usize) {
    let Some(list) = buffer.token(pointer).parenthesis else {
        panic!(
            "token {pointer} (`{}`) has no parameter list",
            buffer.content(pointer)
        );
    };
    list
}

// ─── Parameters ─────────────────────────────────────────────────────────────

/// Indices of the parameter variables, skipping anything nested in
/// brackets (default values, attribute arguments, DNF groups).
fn parameter_variables(buffer: &TokenBuffer, pointer: usize) -> Vec<usize> {
    let (opener, closer) = parameter_list(buffer, pointer);
    let mut variables = Vec::new();
    let mut i = opener + 1;
    while i < closer {
        let token = buffer.token(i);
        match token.kind {
            TokenKind::OpenParen
            | TokenKind::OpenSquare
            | TokenKind::AttributeStart
            | TokenKind::OpenCurly => {
                i = token.matching.unwrap_or(i);
            }
            TokenKind::Variable => variables.push(i),
            _ => {}
        }
        i += 1;
    }
    variables
}

/// Parameter names including `$`, in declaration order.
pub fn parameter_names(buffer: &TokenBuffer, pointer: usize) -> Vec<String> {
    parameter_variables(buffer, pointer)
        .into_iter()
        .map(|i| buffer.content(i).to_string())
        .collect()
}

/// Full parameter descriptors, in declaration order.
pub fn parameters(buffer: &TokenBuffer, pointer: usize) -> Vec<ParameterDescriptor> {
    let (opener, closer) = parameter_list(buffer, pointer);
    parameter_variables(buffer, pointer)
        .into_iter()
        .map(|variable| describe_parameter(buffer, variable, opener, closer))
        .collect()
}

fn describe_parameter(
    buffer: &TokenBuffer,
    variable: usize,
    opener: usize,
    closer: usize,
) -> ParameterDescriptor {
    let scan = HintScan {
        direction: Direction::Backward,
        boundary: Boundary::Bounded(opener),
        transparent: PARAMETER_HINT_TRANSPARENT,
        terminators: PARAMETER_HINT_TERMINATORS,
    };

    let mut is_variadic = false;
    let mut is_by_reference = false;
    let mut cursor = variable;
    while cursor > opener + 1 {
        let Some(previous) = buffer.find_previous_effective(cursor - 1, opener + 1) else {
            break;
        };
        match buffer.kind(previous) {
            TokenKind::Ellipsis => is_variadic = true,
            TokenKind::AmpersandBeforeVariable => is_by_reference = true,
            _ => break,
        }
        cursor = previous;
    }

    let is_optional = buffer
        .find_next(&[TokenKind::Equal, TokenKind::Comma], variable + 1, Some(closer))
        .is_some_and(|i| buffer.kind(i) == TokenKind::Equal);

    let hint = hint::assemble(buffer, variable, &scan).map(
        |AssembledHint { text, is_nullable }| TypeHint {
            text,
            is_nullable,
            is_optional,
        },
    );

    ParameterDescriptor {
        name: buffer.content(variable).to_string(),
        hint,
        is_variadic,
        is_by_reference,
    }
}

/// Each parameter name with its hint (or `None` when untyped), in
/// declaration order.
pub fn parameter_type_hints(buffer: &TokenBuffer, pointer: usize) -> Vec<(String, Option<TypeHint>)> {
    parameters(buffer, pointer)
        .into_iter()
        .map(|p| (p.name, p.hint))
        .collect()
}

/// Names of the parameters declared without a type hint.
pub fn parameters_without_type_hint(buffer: &TokenBuffer, pointer: usize) -> Vec<String> {
    parameters(buffer, pointer)
        .into_iter()
        .filter(|p| p.hint.is_none())
        .map(|p| p.name)
        .collect()
}

// ─── Return type ────────────────────────────────────────────────────────────

/// The declared return type.
///
/// With a body the hint lies between the `:` after the parameter list and
/// the body opener.  Without one there is no opener to bound the walk, so
/// it runs to the terminating `;`.
pub fn find_return_type_hint(buffer: &TokenBuffer, pointer: usize) -> Option<TypeHint> {
    let (_, closer) = parameter_list(buffer, pointer);
    let boundary = match buffer.token(pointer).scope {
        Some((opener, _)) => Boundary::Bounded(opener),
        None => Boundary::UnboundedUntil(STATEMENT_TERMINATORS),
    };

    let colon = hint::find_forward(buffer, &[TokenKind::Colon], closer, boundary)?;
    let scan = HintScan {
        direction: Direction::Forward,
        boundary,
        transparent: &[],
        terminators: &[],
    };

    hint::assemble(buffer, colon, &scan).map(|AssembledHint { text, is_nullable }| TypeHint {
        text,
        is_nullable,
        is_optional: false,
    })
}

pub fn has_return_type_hint(buffer: &TokenBuffer, pointer: usize) -> bool {
    find_return_type_hint(buffer, pointer).is_some()
}

/// Whether some `return` of the declaration itself carries a value.
pub fn returns_value(buffer: &TokenBuffer, pointer: usize) -> bool {
    scan_returns(buffer, pointer).returns_value
}

/// Whether some `return` of the declaration itself is bare.
pub fn returns_void(buffer: &TokenBuffer, pointer: usize) -> bool {
    scan_returns(buffer, pointer).returns_void
}

// ─── Descriptor ─────────────────────────────────────────────────────────────

/// Build the full descriptor of the function at `pointer`.
///
/// # Panics
///
/// When `pointer` is not a named function with a parameter list.
pub fn describe_function(buffer: &TokenBuffer, pointer: usize) -> FunctionDescriptor {
    let ReturnKinds {
        returns_value,
        returns_void,
    } = scan_returns(buffer, pointer);

    let descriptor = FunctionDescriptor {
        name: function_name(buffer, pointer),
        qualified_name: fully_qualified_name(buffer, pointer),
        is_method: is_method_function(buffer, pointer),
        is_abstract: is_abstract_function(buffer, pointer),
        parameters: parameters(buffer, pointer),
        return_hint: find_return_type_hint(buffer, pointer),
        returns_value,
        returns_void,
    };

    debug!(
        name = %descriptor.qualified_name,
        parameters = descriptor.parameters.len(),
        "described function"
    );

    descriptor
}
