mod app;
mod audio;
mod command;
mod config;
mod consts;
mod game;
mod scores;
mod util;
use crate::app::App;
use crate::config::{Config, ConfigError};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

static USAGE: &str = "Usage: sidewinder [options]

Options:
  -c PATH, --config PATH   Read configuration from PATH
  --scores PATH            Store the leaderboard at PATH
  -h, --help               Show this message and exit
  -V, --version            Show the program version and exit";

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("sidewinder: {e}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("sidewinder: {}", util::error_chain(&e));
            return ExitCode::from(2);
        }
    };
    let mut app = App::new(&config, args.scores);
    let terminal = ratatui::init();
    let r = app.run(terminal);
    ratatui::restore();
    for warning in app.take_warnings() {
        eprintln!("sidewinder: warning: {warning}");
    }
    io_exit(r)
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    scores: Option<PathBuf>,
}

/// Parse the command line.  Returns `Ok(None)` when `--help` or `--version`
/// already said everything there is to say.
fn parse_args() -> Result<Option<Arguments>, lexopt::Error> {
    use lexopt::prelude::*;
    let mut config = None;
    let mut scores = None;
    let mut parser = lexopt::Parser::from_env();
    while let Some(arg) = parser.next()? {
        match arg {
            Short('c') | Long("config") => config = Some(PathBuf::from(parser.value()?)),
            Long("scores") => scores = Some(PathBuf::from(parser.value()?)),
            Short('h') | Long("help") => {
                println!("{USAGE}");
                return Ok(None);
            }
            Short('V') | Long("version") => {
                println!("sidewinder {}", env!("CARGO_PKG_VERSION"));
                return Ok(None);
            }
            _ => return Err(arg.unexpected()),
        }
    }
    Ok(Some(Arguments { config, scores }))
}

/// A config file named on the command line must exist; the default one is
/// allowed to be missing.
fn load_config(args: &Arguments) -> Result<Config, ConfigError> {
    match args.config {
        Some(ref path) => Config::load(path, false),
        None => {
            let path = Config::default_path()?;
            Config::load(&path, true)
        }
    }
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
