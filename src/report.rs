//! Per-file reports: the driver-facing view of the extractor.
//!
//! A report bundles each function's descriptor with its source line and its
//! raw `@param` / `@return` annotations, ready to serialize.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::docblock;
use crate::error::{Error, Result};
use crate::signature;
use crate::tokens::TokenBuffer;
use crate::types::{Annotation, FunctionDescriptor};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionReport {
    /// 1-based line of the `function` keyword.
    pub line: u32,
    #[serde(flatten)]
    pub descriptor: FunctionDescriptor,
    pub parameter_annotations: Vec<Annotation>,
    pub return_annotation: Option<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub functions: Vec<FunctionReport>,
}

/// Report every named function in `buffer`.
pub fn describe_buffer(buffer: &TokenBuffer, include_abstract: bool) -> Vec<FunctionReport> {
    signature::function_pointers(buffer)
        .into_iter()
        .filter(|&pointer| include_abstract || !signature::is_abstract_function(buffer, pointer))
        .map(|pointer| FunctionReport {
            line: buffer.token(pointer).line,
            descriptor: signature::describe_function(buffer, pointer),
            parameter_annotations: docblock::parameter_annotations(buffer, pointer),
            return_annotation: docblock::find_return_annotation(buffer, pointer),
        })
        .collect()
}

/// Tokenize `source` and report every named function in it.
///
/// Source the tokenizer rejects or cannot link (unterminated strings,
/// unbalanced brackets, usually a file in the middle of being edited)
/// yields no functions rather than aborting
/// the whole run.
pub fn describe_source(source: &str, include_abstract: bool) -> Vec<FunctionReport> {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let buffer = TokenBuffer::from_source(source);
        describe_buffer(&buffer, include_abstract)
    }));

    match result {
        Ok(functions) => functions,
        Err(_) => {
            error!("PHPantom: tokenizer panicked while describing source");
            Vec::new()
        }
    }
}

pub fn describe_file(path: &Path, config: &Config) -> Result<FileReport> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let functions = describe_source(&content, config.include_abstract);
    debug!(path = %path.display(), functions = functions.len(), "described file");
    Ok(FileReport {
        path: path.to_path_buf(),
        functions,
    })
}

/// Expand `paths` into the list of files to scan.
///
/// Files are taken as given; directories are walked (honouring ignore files
/// when configured) and filtered by extension.  The result is sorted so
/// output is stable across runs.
pub fn collect_files(paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.exists() {
            warn!(path = %path.display(), "path does not exist, skipping");
            continue;
        }

        let walker = ignore::WalkBuilder::new(path)
            .git_ignore(config.respect_gitignore)
            .git_exclude(config.respect_gitignore)
            .ignore(config.respect_gitignore)
            .build();

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_some_and(|t| t.is_file()) && config.matches_extension(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}
