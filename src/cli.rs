use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use log::{Level, Log, Metadata, Record};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Plays back a simulated vehicle trajectory around a stylized planet and moon.
#[derive(Debug, Parser)]
#[command(name = "visualizer")]
pub struct Args {
    /// Trajectory file: a record count, then one `V(x, y, z)` per line
    pub path: PathBuf,

    /// Anything after the path is ignored, with a warning
    #[arg(hide = true)]
    pub extra: Vec<OsString>,

    #[arg(long, default_value_t = SCREEN_WIDTH)]
    pub width: u32,

    #[arg(long, default_value_t = SCREEN_HEIGHT)]
    pub height: u32,

    /// Also print load summaries and other debug output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Logs a warning if more than one path was given. Only the first is used.
    pub fn warn_about_extra(&self) {
        if !self.extra.is_empty() {
            log::warn!(
                "Too many arguments supplied; ignoring {:?} and using {}",
                self.extra,
                self.path.display()
            );
        }
    }
}

/// Installs the console logger, at `info` by default or `debug` with
/// `verbose`. `RUST_LOG` still takes precedence.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .build();
    let max_level = filter.filter();
    if log::set_boxed_logger(Box::new(ConsoleLogger { filter })).is_ok() {
        log::set_max_level(max_level);
    }
}

/// Filters like env_logger, but splits by level: warnings and errors go to
/// stderr, progress and everything below goes to stdout.
struct ConsoleLogger {
    filter: env_logger::Logger,
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.filter.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.filter.matches(record) {
            return;
        }
        // Nowhere left to report a failed write to
        let _ = write_record(record, &mut io::stdout().lock(), &mut io::stderr().lock());
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
    }
}

fn write_record<O: Write, E: Write>(record: &Record, out: &mut O, err: &mut E) -> io::Result<()> {
    if record.level() <= Level::Warn {
        writeln!(err, "{}", record.args())
    } else {
        writeln!(out, "{}", record.args())
    }
}
