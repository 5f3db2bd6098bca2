#![forbid(unsafe_code)]

//! Command-line argument parsing for the ETA board demo.
//!
//! Parses args manually. Supports environment variable overrides via the
//! `HKETA_DEMO_*` prefix; explicit flags win.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
hketa demo: a bus ETA board rendered as ASCII

USAGE:
    hketa-demo [OPTIONS]

OPTIONS:
    --stop=NAME          Stop name shown as the auto-sized title
    --width=PX           Window width in pixels (default: from HKETA_WINDOW_SIZE)
    --columns=N          Output width in characters (default: 64)
    --select=ROW         Click the middle of ROW (0-indexed) and report it
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT VARIABLES:
    HKETA_DEMO_STOP           Override --stop
    HKETA_DEMO_COLUMNS        Override --columns
    HKETA_DENSITY             Display density (e.g. 2.75)
    HKETA_FONT_SCALE          Font scale (e.g. 1.3)
    HKETA_WINDOW_SIZE         Window size as WIDTHxHEIGHT
    HKETA_LOG                 Log filter (e.g. hketa_text=debug)
    HKETA_LOG_FORMAT          'json' for JSON log lines";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    pub stop: String,
    /// Overrides the detected window width.
    pub width: Option<u32>,
    pub columns: usize,
    pub select: Option<usize>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            stop: "Tsim Sha Tsui Star Ferry Pier".into(),
            width: None,
            columns: 64,
            select: None,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse the process arguments and environment, exiting on `--help`,
    /// `--version`, or a bad argument.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match parse_from(&args, |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("hketa-demo {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }
}

/// Parse `args` with environment defaults looked up through `get_env`.
pub fn parse_from<F>(args: &[String], get_env: F) -> Result<Command, String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut opts = Opts::default();

    if let Some(val) = get_env("HKETA_DEMO_STOP") {
        opts.stop = val;
    }
    if let Some(val) = get_env("HKETA_DEMO_COLUMNS")
        && let Ok(n) = val.parse()
    {
        opts.columns = n;
    }

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            other => {
                if let Some(val) = other.strip_prefix("--stop=") {
                    opts.stop = val.to_string();
                } else if let Some(val) = other.strip_prefix("--width=") {
                    opts.width = Some(parse_number("--width", val)?);
                } else if let Some(val) = other.strip_prefix("--columns=") {
                    opts.columns = parse_number("--columns", val)?;
                } else if let Some(val) = other.strip_prefix("--select=") {
                    opts.select = Some(parse_number("--select", val)?);
                } else {
                    return Err(format!("Unknown argument: {other}"));
                }
            }
        }
    }

    Ok(Command::Run(opts))
}

fn parse_number<T: std::str::FromStr>(flag: &str, val: &str) -> Result<T, String> {
    val.parse()
        .map_err(|_| format!("Invalid {flag} value: {val}"))
}
