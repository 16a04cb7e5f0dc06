//! Token-level extraction of PHP function signatures.
//!
//! Given a PHP file, the crate produces one [`FunctionDescriptor`] per named
//! function or method: its name and qualified name, whether it is a method
//! and whether it is abstract, its parameters with their type hints, its
//! return type hint, and whether its own `return` statements carry values.
//!
//! The work happens on a flat [`TokenBuffer`] rather than an AST.  Type
//! hints are rebuilt lexically from the tokens between structural
//! boundaries; nothing is resolved against a symbol table.
//!
//! ```
//! use phpantom_signatures::{TokenBuffer, signature};
//!
//! let buffer = TokenBuffer::from_source("<?php\nfunction f(?int $a = null): ?string {}\n");
//! let pointer = signature::function_pointers(&buffer)[0];
//! let descriptor = signature::describe_function(&buffer, pointer);
//!
//! assert_eq!(descriptor.name, "f");
//! assert_eq!(descriptor.parameters[0].hint.as_ref().unwrap().text, "int");
//! assert!(descriptor.return_hint.unwrap().is_nullable);
//! ```
//!
//! # Modules
//!
//! - [`tokens`]: lexer, bracket/body linking, construct frames
//! - [`signature`]: the extractor (names, parameters, hints, returns)
//! - [`namespace`]: namespace and class name lookups
//! - [`docblock`]: raw PHPDoc tag lookup
//! - [`cache`]: optional descriptor memoization
//! - [`report`], [`config`], [`error`]: the command-line driver's pieces

pub mod cache;
pub mod config;
pub mod docblock;
pub mod error;
pub mod namespace;
pub mod report;
pub mod signature;
pub mod tokens;
pub mod types;

// ─── Re-exports ─────────────────────────────────────────────────────────────

pub use cache::DescriptorCache;
pub use config::Config;
pub use error::{Error, Result};
pub use tokens::{BufferId, ConstructKind, RawToken, Token, TokenBuffer, TokenKind};
pub use types::{Annotation, FunctionDescriptor, ParameterDescriptor, TypeHint};
