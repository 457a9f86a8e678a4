use anyhow::{Context, Result};
use clap::{Arg, ArgMatches};
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

const ARG_LOGGING_LEVEL: &str = "ARG_LOGGING_LEVEL";

const LOGGING_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

pub(crate) fn logging_level_cli_arg<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_LOGGING_LEVEL)
        .long("logging-level")
        .empty_values(false)
        .multiple(false)
        .possible_values(&LOGGING_LEVELS)
        .default_value("info")
        .help("sets the minimal logging level")
}

pub(crate) fn init_logger(arg_matches: &ArgMatches<'_>) -> Result<()> {
    let level = arg_matches
        .value_of(ARG_LOGGING_LEVEL)
        .unwrap_or("info")
        .parse::<LevelFilter>()
        .context("while parsing the logging level")?;
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                colors.color(record.level()),
                message
            ));
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .context("while initializing the logger")
}
