//! Show the schema outline or syntax tree of a schema file.

use std::path::PathBuf;

use pdl_compiler::schema::Colors;

use super::source::{compile, load_source, render_diagnostics};

pub struct AstArgs {
    pub file: PathBuf,
    pub raw: bool,
    pub trivia: bool,
    pub color: bool,
}

pub fn run(args: AstArgs) {
    let source = load_source(&args.file).unwrap_or_else(|msg| {
        eprintln!("error: {msg}");
        std::process::exit(1);
    });
    let compilation = compile(&args.file, &source).unwrap_or_else(|msg| {
        eprintln!("error: {msg}");
        std::process::exit(1);
    });

    // Diagnostics go first; the dump still shows what was recovered.
    if !compilation.diagnostics().is_empty() {
        eprintln!("{}", render_diagnostics(&compilation, &args.file, args.color));
    }

    let dump = match (args.raw, args.trivia) {
        (true, true) => compilation.dump_cst_full(),
        (true, false) => compilation.dump_cst(),
        (false, _) => compilation.dump_outline_colored(Colors::new(args.color)),
    };
    print!("{dump}");

    if !compilation.is_valid() {
        std::process::exit(1);
    }
}
