//! Logging setup for the `hough-profile` binaries.
//!
//! Records from this workspace (targets under `hough_profile*`) pass at the
//! chosen [`Verbosity`]. Everything else, image decoders included, is held at
//! `warn`. Library code only emits through the `log` macros.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

const WORKSPACE_TARGET: &str = "hough_profile";
const FOREIGN_LEVEL: LevelFilter = LevelFilter::Warn;

/// How chatty the workspace crates are.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Warnings and errors only.
    Quiet,
    /// Pass summaries (`info`).
    #[default]
    Normal,
    /// Per-stage details (`debug`).
    Debug,
    Trace,
}

impl Verbosity {
    /// Map `-q` and a repeated `-v` count onto a verbosity; `-q` wins.
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Normal,
            (false, 1) => Verbosity::Debug,
            (false, _) => Verbosity::Trace,
        }
    }

    pub fn level(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Warn,
            Verbosity::Normal => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

fn level_for(target: &str, own: LevelFilter) -> LevelFilter {
    if target.starts_with(WORKSPACE_TARGET) {
        own
    } else {
        own.min(FOREIGN_LEVEL)
    }
}

/// Last path segment of a module target: `hough_profile_core::peaks` -> `peaks`.
fn short_target(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

struct StderrLogger {
    own: LevelFilter,
    started: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= level_for(metadata.target(), self.own)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "{:>8.3}s {:<5} {}: {}",
            self.started.elapsed().as_secs_f64(),
            record.level(),
            short_target(record.target()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger. Later calls keep the first verbosity.
pub fn init_logging(verbosity: Verbosity) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| StderrLogger {
        own: verbosity.level(),
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(logger.own.max(FOREIGN_LEVEL));
    Ok(())
}

/// `EnvFilter` directives equivalent to the stderr logger's filtering.
#[cfg(feature = "tracing")]
fn tracing_directives(verbosity: Verbosity) -> String {
    let own = verbosity.level();
    format!("{FOREIGN_LEVEL},hough_profile={own},hough_profile_core={own}").to_ascii_lowercase()
}

/// Install a `tracing` subscriber with span timings. `RUST_LOG`, when set,
/// replaces the verbosity-derived filter.
#[cfg(feature = "tracing")]
pub fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing_directives(verbosity)));
    let _ = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_timer(fmt::time::Uptime::default())
        .with_writer(std::io::stderr)
        .finish()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_to_verbosity() {
        assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, 4), Verbosity::Trace);
        assert_eq!(Verbosity::from_flags(true, 2), Verbosity::Quiet);
        assert_eq!(Verbosity::Quiet.level(), LevelFilter::Warn);
    }

    #[test]
    fn foreign_targets_are_capped_at_warn() {
        let own = Verbosity::Trace.level();
        assert_eq!(level_for("hough_profile_core::accumulator", own), own);
        assert_eq!(level_for("hough_profile", own), own);
        assert_eq!(level_for("png::decoder", own), LevelFilter::Warn);
        assert_eq!(
            level_for("png::decoder", LevelFilter::Error),
            LevelFilter::Error
        );
    }

    #[test]
    fn targets_are_shortened_to_the_module() {
        assert_eq!(short_target("hough_profile_core::peaks"), "peaks");
        assert_eq!(short_target("hough_profile"), "hough_profile");
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn tracing_filter_follows_verbosity() {
        assert_eq!(
            tracing_directives(Verbosity::Debug),
            "warn,hough_profile=debug,hough_profile_core=debug"
        );
        assert!(EnvFilter::try_new(tracing_directives(Verbosity::Quiet)).is_ok());
    }
}
