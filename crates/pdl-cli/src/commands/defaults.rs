//! Print the default parameter tree of a schema as a JSON document.

use std::path::{Path, PathBuf};

use pdl_compiler::codegen::naming::schema_name_from_stem;
use pdl_compiler::schema::{SchemaPath, instantiate_with};
use pdl_core::ParameterSet;

use super::source::{compile, load_source, render_diagnostics};

pub struct DefaultsArgs {
    pub file: PathBuf,
    pub bases: Vec<PathBuf>,
    pub includes: Vec<PathBuf>,
    pub compact: bool,
    pub color: bool,
}

pub fn run(args: DefaultsArgs) {
    let document = match default_document(&args.file, &args.bases, &args.includes, args.color) {
        Ok(document) => document,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(1);
        }
    };

    let output = if args.compact {
        serde_json::to_string(&document)
    } else {
        serde_json::to_string_pretty(&document)
    }
    .expect("JSON values always serialize");
    println!("{output}");
}

/// Document holding the defaults of `file`, tagged with its schema name.
pub fn default_document(
    file: &Path,
    bases: &[PathBuf],
    includes: &[PathBuf],
    color: bool,
) -> Result<serde_json::Value, String> {
    let name = schema_name(file)?;
    let tree = default_tree_with(file, bases, includes, color)?;
    Ok(tree.to_document(Some(name)))
}

/// Default tree of `file`. `bases[0]` supplies the inherited schema, `bases[1]`
/// the base of that one, and so on.
pub fn default_tree(file: &Path, bases: &[PathBuf], color: bool) -> Result<ParameterSet, String> {
    default_tree_with(file, bases, &[], color)
}

/// Like [`default_tree`], filling each `includedset` from the file in
/// `includes` whose schema name matches.
pub fn default_tree_with(
    file: &Path,
    bases: &[PathBuf],
    includes: &[PathBuf],
    color: bool,
) -> Result<ParameterSet, String> {
    Instantiation {
        includes,
        color,
        active: Vec::new(),
    }
    .tree(file, bases)
}

struct Instantiation<'a> {
    includes: &'a [PathBuf],
    color: bool,
    /// Included files being instantiated, outermost first.
    active: Vec<PathBuf>,
}

impl Instantiation<'_> {
    fn tree(&mut self, file: &Path, bases: &[PathBuf]) -> Result<ParameterSet, String> {
        let source = load_source(file).map_err(|msg| format!("error: {msg}"))?;
        let compilation = compile(file, &source).map_err(|msg| format!("error: {msg}"))?;
        if !compilation.is_valid() {
            return Err(render_diagnostics(&compilation, file, self.color));
        }
        let schema = compilation
            .into_schema()
            .map_err(|e| format!("error: {}: {e}", file.display()))?;

        let base = match (&schema.base, bases.split_first()) {
            (Some(_), Some((next, rest))) => Some(self.tree(next, rest)?),
            (Some(path), None) => {
                tracing::warn!(
                    file = %file.display(),
                    base = %path,
                    "inherited schema not given with --base; its entries are missing"
                );
                None
            }
            (None, Some((unused, _))) => {
                tracing::warn!(
                    file = %file.display(),
                    base = %unused.display(),
                    "schema does not inherit; ignoring base"
                );
                None
            }
            (None, None) => None,
        };

        let mut failure = None;
        let tree = instantiate_with(&schema, base, &mut |path: &SchemaPath| {
            if failure.is_some() {
                return None;
            }
            let file = self.find_include(path)?;
            if self.active.contains(&file) {
                failure = Some(format!(
                    "error: {}: schema `{path}` includes itself",
                    file.display()
                ));
                return None;
            }
            self.active.push(file.clone());
            let tree = self.tree(&file, &[]);
            self.active.pop();
            match tree {
                Ok(tree) => Some(tree),
                Err(msg) => {
                    failure = Some(msg);
                    None
                }
            }
        });
        match failure {
            Some(msg) => Err(msg),
            None => Ok(tree),
        }
    }

    /// The include whose schema name is the last segment of `path`.
    fn find_include(&self, path: &SchemaPath) -> Option<PathBuf> {
        self.includes
            .iter()
            .find(|file| schema_name(file).is_ok_and(|name| name == path.name()))
            .cloned()
    }
}

fn schema_name(file: &Path) -> Result<&str, String> {
    let stem = file.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    schema_name_from_stem(stem).ok_or_else(|| {
        format!(
            "error: {}: `{stem}` is not a schema name; use an identifier or `a__b__Name`",
            file.display()
        )
    })
}
