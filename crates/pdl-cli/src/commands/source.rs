//! Reading schema files and reporting their diagnostics.

use std::fs;
use std::path::Path;

use pdl_compiler::Compilation;

pub fn load_source(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}

/// Parses and lowers `source`; fuel exhaustion becomes an error message.
pub fn compile<'a>(path: &Path, source: &'a str) -> Result<Compilation<'a>, String> {
    Compilation::new(source).map_err(|e| format!("{}: {}", path.display(), e))
}

pub fn render_diagnostics(compilation: &Compilation<'_>, path: &Path, color: bool) -> String {
    let path = path.display().to_string();
    compilation
        .diagnostics()
        .filtered_printer(compilation.source())
        .path(&path)
        .colored(color)
        .render()
}
