use std::ffi::OsString;
use std::path::PathBuf;

use clap::{App, ArgMatches};
use thiserror::Error;

use crate::graphics::scene::Demo;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Includes `--help` and `--version`, which clap reports as errors. Call `exit()` on it.
    #[error(transparent)]
    Clap(#[from] clap::Error),

    #[error("window size must be non-zero, got {width}x{height}")]
    EmptyWindow { width: u32, height: u32 },
}

/// Settings for one windowed run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub demo: Demo,
    pub vertex: PathBuf,
    pub fragment: PathBuf,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub resizable: bool,
    pub wireframe: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Config),
    Check { vertex: PathBuf, fragment: PathBuf },
}

/// Parses the process arguments.
pub fn parse() -> Result<Command, ConfigError> {
    parse_from(std::env::args_os())
}

/// Parses `args`, the first of which is the program name.
pub fn parse_from<I, T>(args: I) -> Result<Command, ConfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let yaml = load_yaml!("cli.yaml");
    let matches = App::from_yaml(yaml).get_matches_from_safe(args)?;

    if let Some(check) = matches.subcommand_matches("check") {
        return Ok(Command::Check {
            vertex: path_of(check, "VERTEX").unwrap_or_default(),
            fragment: path_of(check, "FRAGMENT").unwrap_or_default(),
        });
    }

    let demo = value_t!(matches, "DEMO", Demo)?;
    let width = value_t!(matches, "width", u32)?;
    let height = value_t!(matches, "height", u32)?;
    if width == 0 || height == 0 {
        return Err(ConfigError::EmptyWindow { width, height });
    }

    Ok(Command::Run(Config {
        demo,
        vertex: path_of(&matches, "vertex").unwrap_or_else(|| demo.default_vertex_shader()),
        fragment: path_of(&matches, "fragment").unwrap_or_else(|| demo.default_fragment_shader()),
        width,
        height,
        title: matches.value_of("title").unwrap_or("LearnOpenGL").to_owned(),
        resizable: matches.is_present("resizable"),
        wireframe: matches.is_present("wireframe"),
    }))
}

fn path_of(matches: &ArgMatches, name: &str) -> Option<PathBuf> {
    matches.value_of_os(name).map(PathBuf::from)
}
