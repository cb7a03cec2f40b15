//! Build-script API.
//!
//! ```no_run
//! // build.rs
//! fn main() {
//!     if let Err(err) = pdl_compiler::build::Config::new()
//!         .file("schemas/solver.pdl")
//!         .compile()
//!     {
//!         panic!("{err}");
//!     }
//! }
//! ```
//!
//! Each `<stem>.pdl` becomes `<stem>.rs` and `<stem>_deps.rs` in `OUT_DIR`:
//!
//! ```ignore
//! include!(concat!(env!("OUT_DIR"), "/solver_deps.rs"));
//! include!(concat!(env!("OUT_DIR"), "/solver.rs"));
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::codegen::{self, naming::schema_name_from_stem};
use crate::{Compilation, Error, KeywordTable, Result};

/// Compiles a list of schema files to Rust.
#[derive(Clone, Debug, Default)]
pub struct Config {
    files: Vec<PathBuf>,
    out_dir: Option<PathBuf>,
    keywords: Option<KeywordTable>,
    codegen: codegen::Config,
    rerun: bool,
    colored: bool,
}

impl Config {
    pub fn new() -> Self {
        Self {
            rerun: true,
            ..Self::default()
        }
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    pub fn files<P: Into<PathBuf>>(mut self, paths: impl IntoIterator<Item = P>) -> Self {
        self.files.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Output directory. Defaults to `OUT_DIR`.
    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    pub fn keywords(mut self, keywords: KeywordTable) -> Self {
        self.keywords = Some(keywords);
        self
    }

    pub fn codegen(mut self, config: codegen::Config) -> Self {
        self.codegen = config;
        self
    }

    /// Whether to print `cargo:rerun-if-changed` for every input.
    pub fn emit_rerun_if_changed(mut self, value: bool) -> Self {
        self.rerun = value;
        self
    }

    /// Whether rendered diagnostics in [`Error::InvalidSchema`] carry ANSI colors.
    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// Compiles every file; stops at the first failure.
    pub fn compile(&self) -> Result<()> {
        let out_dir = match &self.out_dir {
            Some(dir) => dir.clone(),
            None => std::env::var_os("OUT_DIR").map(PathBuf::from).ok_or_else(|| Error::Io {
                path: PathBuf::from("OUT_DIR"),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "OUT_DIR is not set; call `out_dir()` outside build scripts",
                ),
            })?,
        };

        for file in &self.files {
            if self.rerun {
                println!("cargo:rerun-if-changed={}", file.display());
            }
            self.compile_file(file, &out_dir)?;
        }
        Ok(())
    }

    /// Compiles one file into `out_dir`, returning the paths written.
    pub fn compile_file(&self, file: &Path, out_dir: &Path) -> Result<(PathBuf, PathBuf)> {
        let stem = file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let name = schema_name_from_stem(&stem).ok_or_else(|| Error::InvalidSchemaName {
            path: file.to_path_buf(),
            stem: stem.clone(),
        })?;
        let source = read(file)?;
        tracing::debug!(file = %file.display(), schema = name, "compiling schema");

        let mut builder = Compilation::builder(&source);
        if let Some(keywords) = &self.keywords {
            builder = builder.with_keywords(keywords.clone());
        }
        let compilation = builder.compile()?;
        if !compilation.is_valid() {
            let path = file.display().to_string();
            let report = compilation
                .diagnostics()
                .filtered_printer(&source)
                .path(&path)
                .colored(self.colored)
                .render();
            return Err(Error::InvalidSchema {
                path: file.to_path_buf(),
                report,
            });
        }
        if compilation.diagnostics().has_warnings() {
            tracing::warn!(
                file = %file.display(),
                count = compilation.diagnostics().warning_count(),
                "schema has warnings"
            );
        }

        let schema = compilation.into_schema()?;
        let generated = codegen::generate(&schema, name, &self.codegen)?;

        let code_path = out_dir.join(format!("{stem}.rs"));
        let deps_path = out_dir.join(format!("{stem}_deps.rs"));
        write(&code_path, &generated.code)?;
        write(&deps_path, &generated.deps)?;
        tracing::info!(file = %file.display(), out = %code_path.display(), "generated bindings");
        Ok((code_path, deps_path))
    }
}

pub(crate) fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| Error::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
