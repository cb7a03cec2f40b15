//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("pdlc")
        .about("Compiler for the Parameter Definition Language")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(build_command())
        .subcommand(check_command())
        .subcommand(ast_command())
        .subcommand(defaults_command())
}

/// Generate Rust bindings for schema files.
pub fn build_command() -> Command {
    Command::new("build")
        .about("Generate Rust bindings for schema files")
        .override_usage(
            "\
  pdlc build <FILE>...
  pdlc build <FILE>... -o <DIR>",
        )
        .after_help(
            r#"EXAMPLES:
  pdlc build solver.pdl               # writes solver.rs, solver_deps.rs
  pdlc build *.pdl -o src/generated   # into another directory"#,
        )
        .arg(pdl_files_arg())
        .arg(out_dir_arg())
        .arg(color_arg())
}

/// Parse and validate schema files.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate schema files")
        .override_usage("  pdlc check <FILE>... [--strict]")
        .after_help(
            r#"EXAMPLES:
  pdlc check solver.pdl               # errors only
  pdlc check *.pdl --strict           # warnings fail too"#,
        )
        .arg(pdl_files_arg())
        .arg(strict_arg())
        .arg(color_arg())
}

/// Show the schema outline or the syntax tree.
pub fn ast_command() -> Command {
    Command::new("ast")
        .about("Show the schema outline or syntax tree of a file")
        .override_usage("  pdlc ast <FILE> [--raw [--trivia]]")
        .after_help(
            r#"EXAMPLES:
  pdlc ast solver.pdl                 # schema outline
  pdlc ast solver.pdl --raw           # concrete syntax tree
  pdlc ast solver.pdl --raw --trivia  # ... with whitespace and comments"#,
        )
        .arg(pdl_file_arg())
        .arg(raw_arg())
        .arg(trivia_arg())
        .arg(color_arg())
}

/// Print the default parameter tree as a JSON document.
pub fn defaults_command() -> Command {
    Command::new("defaults")
        .about("Print the default parameter tree as JSON")
        .override_usage("  pdlc defaults <FILE> [--base <FILE>]... [--include <FILE>]... [--compact]")
        .after_help(
            r#"EXAMPLES:
  pdlc defaults solver.pdl                       # pretty JSON
  pdlc defaults piso.pdl --base solver.pdl       # include inherited entries
  pdlc defaults case.pdl --include solvers__time__Time.pdl
  pdlc defaults solver.pdl --compact > case.json"#,
        )
        .arg(pdl_file_arg())
        .arg(base_arg())
        .arg(include_arg())
        .arg(compact_arg())
        .arg(color_arg())
}
