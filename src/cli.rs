//! Command line parsing and logger setup for the `bmpglyph` binary.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use log::{Level, SetLoggerError, info};
use serde::Serialize;

use bmpglyph::{BitmapError, Glyphs, ImageInfo, Limits};

/// Errors surfaced by the binary on top of decode/render failures.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Bitmap(#[from] BitmapError),

    #[error("cannot write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot serialize header: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct CmdOptions {
    pub input: PathBuf,
    pub glyphs: Glyphs,
    pub limits: Limits,
    pub probe: bool,
    pub pause: bool,
}

/// Pixel buffer cap applied unless `--max-memory` overrides it (256 MiB).
pub const DEFAULT_MAX_MEMORY: &str = "268435456";

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("bmpglyph")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Print a black-and-white 24/32-bit BMP as ASCII art")
        .override_usage("bmpglyph [OPTIONS] <FILE.bmp>")
        .arg(Arg::new("in")
            .value_name("FILE.bmp")
            .help("Bitmap to render")
            .value_parser(value_parser!(PathBuf))
            .action(ArgAction::Set)
            .required(true))
        .arg(Arg::new("white")
            .long("white")
            .value_name("CHAR")
            .help("Glyph for white pixels")
            .value_parser(value_parser!(char))
            .default_value("#"))
        .arg(Arg::new("black")
            .long("black")
            .value_name("CHAR")
            .help("Glyph for black pixels")
            .value_parser(value_parser!(char))
            .default_value("."))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help("Refuse images wider than this (0 = no limit)")
            .value_parser(value_parser!(u64))
            .default_value("0"))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help("Refuse images taller than this (0 = no limit)")
            .value_parser(value_parser!(u64))
            .default_value("0"))
        .arg(Arg::new("max-pixels")
            .long("max-pixels")
            .help("Refuse images with more pixels than this (0 = no limit)")
            .value_parser(value_parser!(u64))
            .default_value("0"))
        .arg(Arg::new("max-memory")
            .long("max-memory")
            .value_name("BYTES")
            .help("Refuse images whose pixel buffer exceeds this many bytes (0 = no limit)")
            .value_parser(value_parser!(u64))
            .default_value(DEFAULT_MAX_MEMORY))
        .arg(Arg::new("probe")
            .long("probe")
            .action(ArgAction::SetTrue)
            .help("Print the file headers as JSON instead of rendering"))
        .arg(Arg::new("pause")
            .long("pause")
            .action(ArgAction::SetTrue)
            .help("Wait for Enter after printing"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the decoding options"))
}

fn flag(options: &ArgMatches, name: &str) -> bool {
    options.get_flag(name)
}

fn non_zero(options: &ArgMatches, name: &str) -> Option<u64> {
    options
        .get_one::<u64>(name)
        .copied()
        .filter(|&v| v != 0)
}

pub fn parse_options(options: &ArgMatches) -> CmdOptions {
    let input = options
        .get_one::<PathBuf>("in")
        .cloned()
        .unwrap_or_default();

    let defaults = Glyphs::default();
    let glyphs = Glyphs {
        white: options.get_one::<char>("white").copied().unwrap_or(defaults.white),
        black: options.get_one::<char>("black").copied().unwrap_or(defaults.black),
    };
    if glyphs != defaults {
        info!("Using glyphs white={:?} black={:?}", glyphs.white, glyphs.black);
    }

    let limits = Limits {
        max_width: non_zero(options, "max-width"),
        max_height: non_zero(options, "max-height"),
        max_pixels: non_zero(options, "max-pixels"),
        max_memory_bytes: non_zero(options, "max-memory"),
    };
    info!("Limits: {:?}", limits);

    CmdOptions {
        input,
        glyphs,
        limits,
        probe: flag(options, "probe"),
        pause: flag(options, "pause"),
    }
}

/// Set up logging options
///
/// Fails if a logger is already installed; `error!` output is then lost and
/// the caller has to report on its own.
pub fn setup_logger(options: &ArgMatches) -> Result<(), SetLoggerError> {
    let log_level = if flag(options, "debug") {
        Level::Debug
    } else if flag(options, "trace") {
        Level::Trace
    } else if flag(options, "warn") {
        Level::Warn
    } else if flag(options, "info") {
        Level::Info
    } else {
        Level::Warn
    };

    simple_logger::init_with_level(log_level)?;

    info!("Initialized logger");
    info!("Log level :{}", log_level);
    Ok(())
}

/// Header summary printed by `--probe`.
#[derive(Serialize)]
pub struct Metadata {
    pub file: String,
    pub file_size: u32,
    pub pixel_data_offset: u32,
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub top_down: bool,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub supported: bool,
}

impl Metadata {
    pub fn new(file: &std::path::Path, info: &ImageInfo) -> Metadata {
        Metadata {
            file: file.display().to_string(),
            file_size: info.file_header.file_size,
            pixel_data_offset: info.file_header.offset_data,
            header_size: info.info_header.size,
            width: info.width(),
            height: info.height(),
            top_down: info.info_header.is_top_down(),
            planes: info.info_header.planes,
            bits_per_pixel: info.bits_per_pixel(),
            compression: info.info_header.compression,
            image_size: info.info_header.size_image,
            supported: info.is_supported(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_hash_and_dot() {
        let matches = create_cmd_args()
            .try_get_matches_from(["bmpglyph", "a.bmp"])
            .unwrap();
        let opts = parse_options(&matches);
        assert_eq!(opts.input, PathBuf::from("a.bmp"));
        assert_eq!(opts.glyphs, Glyphs::default());
        assert_eq!(opts.limits.max_width, None);
        assert_eq!(opts.limits.max_pixels, None);
        assert_eq!(opts.limits.max_memory_bytes, Some(256 << 20));
        assert!(!opts.probe && !opts.pause);
    }

    #[test]
    fn memory_and_pixel_caps() {
        let matches = create_cmd_args()
            .try_get_matches_from([
                "bmpglyph", "--max-pixels", "1000", "--max-memory", "4096", "a.bmp",
            ])
            .unwrap();
        let limits = parse_options(&matches).limits;
        assert_eq!(limits.max_pixels, Some(1000));
        assert_eq!(limits.max_memory_bytes, Some(4096));

        let matches = create_cmd_args()
            .try_get_matches_from(["bmpglyph", "--max-memory", "0", "a.bmp"])
            .unwrap();
        assert_eq!(parse_options(&matches).limits, Limits::NONE);
    }

    #[test]
    fn second_logger_init_is_reported() {
        let matches = create_cmd_args()
            .try_get_matches_from(["bmpglyph", "a.bmp"])
            .unwrap();
        let _ = setup_logger(&matches);
        assert!(setup_logger(&matches).is_err());
    }

    #[test]
    fn glyph_and_limit_overrides() {
        let matches = create_cmd_args()
            .try_get_matches_from([
                "bmpglyph", "--white", "@", "--black", " ", "--max-width", "64", "a.bmp",
            ])
            .unwrap();
        let opts = parse_options(&matches);
        assert_eq!(opts.glyphs.white, '@');
        assert_eq!(opts.glyphs.black, ' ');
        assert_eq!(opts.limits.max_width, Some(64));
        assert_eq!(opts.limits.max_height, None);
    }

    #[test]
    fn second_positional_is_rejected() {
        assert!(create_cmd_args()
            .try_get_matches_from(["bmpglyph", "a.bmp", "b.bmp"])
            .is_err());
        assert!(create_cmd_args().try_get_matches_from(["bmpglyph"]).is_err());
    }
}
