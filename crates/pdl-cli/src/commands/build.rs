use std::path::PathBuf;

use pdl_compiler::build;

pub struct BuildArgs {
    pub files: Vec<PathBuf>,
    pub out_dir: PathBuf,
    pub color: bool,
}

/// Compiles every file, continuing past failures.
pub fn run(args: BuildArgs) {
    let config = build::Config::new()
        .emit_rerun_if_changed(false)
        .colored(args.color);

    let mut failed = 0usize;
    for file in &args.files {
        println!("Processing PDL {}", file.display());
        if let Err(err) = config.compile_file(file, &args.out_dir) {
            eprintln!("error: {err}");
            failed += 1;
        }
    }

    if failed > 0 {
        tracing::info!(failed, total = args.files.len(), "build finished with errors");
        std::process::exit(1);
    }
}
