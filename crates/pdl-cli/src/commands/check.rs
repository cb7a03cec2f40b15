use std::path::{Path, PathBuf};

use super::source::{compile, load_source, render_diagnostics};

pub struct CheckArgs {
    pub files: Vec<PathBuf>,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let mut failed = false;
    for file in &args.files {
        if let Err(msg) = check_file(file, args.strict, args.color) {
            eprintln!("{msg}");
            failed = true;
        }
    }

    if failed {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}

fn check_file(file: &Path, strict: bool, color: bool) -> Result<(), String> {
    let source = load_source(file).map_err(|msg| format!("error: {msg}"))?;
    let compilation = compile(file, &source).map_err(|msg| format!("error: {msg}"))?;

    let diagnostics = compilation.diagnostics();
    let valid = if strict {
        !diagnostics.has_errors() && !diagnostics.has_warnings()
    } else {
        compilation.is_valid()
    };
    tracing::debug!(
        file = %file.display(),
        errors = diagnostics.error_count(),
        warnings = diagnostics.warning_count(),
        "checked"
    );

    if !valid {
        return Err(render_diagnostics(&compilation, file, color));
    }
    Ok(())
}
