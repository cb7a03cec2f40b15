//! PDL compiler: parser, schema lowering and Rust binding generator.
//!
//! # Example
//!
//! ```
//! use pdl_compiler::Compilation;
//!
//! let source = r#"
//!     flag = bool false "enable the thing"
//!     mesh = set {
//!         cells = int 10
//!     }
//! "#;
//!
//! let compilation = Compilation::new(source).expect("out of fuel");
//! assert!(compilation.is_valid());
//! eprintln!("{}", compilation.dump_outline());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod build;
pub mod codegen;
pub mod diagnostics;
pub mod parser;
pub mod schema;

mod compilation;

#[cfg(test)]
mod compilation_tests;

use std::path::PathBuf;

/// Result type for passes that produce both output and diagnostics.
///
/// Fatal errors (like fuel exhaustion) use the outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

pub use codegen::{CodegenError, Generated};
pub use compilation::{Compilation, CompilationBuilder};
pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use parser::{Keyword, KeywordTable};
pub use schema::{Descriptor, DescriptorKind, Schema};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("schema has {} errors", .0.error_count())]
    ParseFailed(Diagnostics),

    /// A schema file failed to compile; `report` holds the rendered diagnostics.
    #[error("{}: schema has errors\n{report}", .path.display())]
    InvalidSchema { path: PathBuf, report: String },

    /// The file stem is neither an identifier nor `a__b__Name`.
    #[error("{}: `{stem}` is not a schema name; use an identifier or `a__b__Name`", .path.display())]
    InvalidSchemaName { path: PathBuf, stem: String },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

pub type Result<T> = std::result::Result<T, Error>;
