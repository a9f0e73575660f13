// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::Error;
use crate::logger::Level;

use clap::{App, Arg, ArgMatches};
use serde_derive::*;

use std::ffi::OsString;
use std::io::Read;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

const MIN_WIDTH: u32 = 40;
const MIN_HEIGHT: u32 = 16;
const MAX_WIDTH: u32 = 1_000;
const MAX_HEIGHT: u32 = 1_000;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    general: General,
    #[serde(default)]
    display: Display,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct General {
    #[serde(with = "LevelDef")]
    #[serde(default = "default_logging_level")]
    logging: Level,
}

impl Default for General {
    fn default() -> Self {
        Self {
            logging: default_logging_level(),
        }
    }
}

/// Dimensions of the terminal surface, in character cells.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Display {
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_logging_level() -> Level {
    Level::Info
}

fn default_width() -> u32 {
    100
}

fn default_height() -> u32 {
    32
}

#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
#[serde(remote = "Level")]
enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn app() -> App<'static, 'static> {
    App::new(NAME)
        .version(VERSION)
        .author("Brian Martin <bmartin@twitter.com>")
        .about("Chart dot product benchmark results in the terminal")
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("FILE")
                .help("TOML config file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Increase verbosity by one level. Can be used more than once")
                .multiple(true),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .value_name("Columns")
                .help("Width of the chart in terminal columns")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .value_name("Rows")
                .help("Height of the chart in terminal rows")
                .takes_value(true),
        )
}

impl Config {
    /// parse command line options and return `Config`
    pub fn new() -> Result<Config, Error> {
        Self::from_matches(&app().get_matches())
    }

    /// parse the given arguments, the first being the program name
    pub fn from_args<I, T>(args: I) -> Result<Config, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app().get_matches_from_safe(args)?;
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Config, Error> {
        let mut config = if let Some(file) = matches.value_of("config") {
            Config::load_from_file(file)?
        } else {
            Default::default()
        };

        if let Some(width) = parse_numeric_arg(matches, "width")? {
            config.display.width = width;
        }

        if let Some(height) = parse_numeric_arg(matches, "height")? {
            config.display.height = height;
        }

        match matches.occurrences_of("verbose") {
            0 => {}
            1 => config.general.logging = Level::Debug,
            _ => config.general.logging = Level::Trace,
        }

        config.validate()?;
        Ok(config)
    }

    fn load_from_file(file: &str) -> Result<Config, Error> {
        let mut file = std::fs::File::open(file)?;
        let mut content = String::new();
        file.read_to_string(&mut content)?;
        Config::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Config, Error> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.width() < MIN_WIDTH || self.width() > MAX_WIDTH {
            return Err(Error::Config(format!(
                "width must be between {} and {} columns",
                MIN_WIDTH, MAX_WIDTH
            )));
        }
        if self.height() < MIN_HEIGHT || self.height() > MAX_HEIGHT {
            return Err(Error::Config(format!(
                "height must be between {} and {} rows",
                MIN_HEIGHT, MAX_HEIGHT
            )));
        }
        Ok(())
    }

    /// get logging level
    pub fn logging(&self) -> Level {
        self.general.logging
    }

    /// width of the chart in columns
    pub fn width(&self) -> u32 {
        self.display.width
    }

    /// height of the chart in rows
    pub fn height(&self) -> u32 {
        self.display.height
    }

    pub fn print(&self) {
        info!("-----");
        info!("Config: Logging: {}", self.logging());
        info!(
            "Config: Display: Width: {} Height: {}",
            self.width(),
            self.height()
        );
    }
}

/// a helper function to parse a numeric argument by name from `ArgMatches`
fn parse_numeric_arg(matches: &ArgMatches, key: &str) -> Result<Option<u32>, Error> {
    matches
        .value_of(key)
        .map(|v| {
            v.parse()
                .map_err(|_| Error::Config(format!("could not parse {}: {}", key, v)))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::from_args(vec![NAME]).unwrap();
        assert_eq!(config.logging(), Level::Info);
        assert_eq!(config.width(), 100);
        assert_eq!(config.height(), 32);
    }

    #[test]
    fn toml_sections() {
        let config = Config::from_toml(
            r#"
            [general]
            logging = "debug"

            [display]
            width = 120
            "#,
        )
        .unwrap();
        assert_eq!(config.logging(), Level::Debug);
        assert_eq!(config.width(), 120);
        assert_eq!(config.height(), 32);
    }

    #[test]
    fn empty_toml_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.logging(), Level::Info);
        assert_eq!(config.width(), 100);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        match Config::from_toml("[display]\ncolour = true\n") {
            Err(Error::Toml(_)) => {}
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn arguments() {
        let config =
            Config::from_args(vec![NAME, "--width", "80", "--height", "20", "-vv"]).unwrap();
        assert_eq!(config.width(), 80);
        assert_eq!(config.height(), 20);
        assert_eq!(config.logging(), Level::Trace);
    }

    #[test]
    fn undersized_display() {
        match Config::from_args(vec![NAME, "--width", "10"]) {
            Err(Error::Config(_)) => {}
            other => panic!("unexpected: {:?}", other),
        }
        match Config::from_toml("[display]\nheight = 4\n") {
            Err(Error::Config(_)) => {}
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn oversized_display() {
        match Config::from_args(vec![NAME, "--width", "65536", "--height", "65536"]) {
            Err(Error::Config(msg)) => assert!(msg.contains("width")),
            other => panic!("unexpected: {:?}", other),
        }
        match Config::from_toml("[display]\nheight = 4096\n") {
            Err(Error::Config(msg)) => assert!(msg.contains("height")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn malformed_argument() {
        match Config::from_args(vec![NAME, "--height", "tall"]) {
            Err(Error::Config(msg)) => assert!(msg.contains("height")),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
