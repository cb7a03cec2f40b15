//! Dispatch logic: extract params from `ArgMatches` and convert them to
//! command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::ast::AstArgs;
use crate::commands::build::BuildArgs;
use crate::commands::check::CheckArgs;
use crate::commands::defaults::DefaultsArgs;

pub struct BuildParams {
    pub files: Vec<PathBuf>,
    pub out_dir: PathBuf,
    pub color: ColorChoice,
}

impl BuildParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            files: parse_files(m),
            out_dir: m
                .get_one::<PathBuf>("out_dir")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(".")),
            color: parse_color(m),
        }
    }
}

impl From<BuildParams> for BuildArgs {
    fn from(p: BuildParams) -> Self {
        Self {
            files: p.files,
            out_dir: p.out_dir,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub files: Vec<PathBuf>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            files: parse_files(m),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            files: p.files,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct AstParams {
    pub file: PathBuf,
    pub raw: bool,
    pub trivia: bool,
    pub color: ColorChoice,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: parse_file(m),
            raw: m.get_flag("raw"),
            trivia: m.get_flag("trivia"),
            color: parse_color(m),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            file: p.file,
            raw: p.raw,
            trivia: p.trivia,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DefaultsParams {
    pub file: PathBuf,
    pub bases: Vec<PathBuf>,
    pub includes: Vec<PathBuf>,
    pub compact: bool,
    pub color: ColorChoice,
}

impl DefaultsParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: parse_file(m),
            bases: m
                .get_many::<PathBuf>("base")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            includes: m
                .get_many::<PathBuf>("include")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            compact: m.get_flag("compact"),
            color: parse_color(m),
        }
    }
}

impl From<DefaultsParams> for DefaultsArgs {
    fn from(p: DefaultsParams) -> Self {
        Self {
            file: p.file,
            bases: p.bases,
            includes: p.includes,
            compact: p.compact,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_files(m: &ArgMatches) -> Vec<PathBuf> {
    m.get_many::<PathBuf>("files")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn parse_file(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("file").cloned().unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
