use stderrlog::Timestamp;

/// Logging setup arg group.
///
/// Logs go to stderr; stdout carries only results.
#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// Silence log messages.
    #[clap(short, long)]
    pub quiet: bool,

    /// Turn debugging information on (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, default_value = None)]
    verbose: Option<u8>,

    /// Enable timestamped logging.
    #[clap(short, long)]
    pub ts: bool,
}

/// Map a verbosity count to a level; 0 is off, 5 and above is trace.
pub fn log_level(level: u8) -> stderrlog::LogLevelNum {
    match level {
        0 => stderrlog::LogLevelNum::Off,
        1 => stderrlog::LogLevelNum::Error,
        2 => stderrlog::LogLevelNum::Warn,
        3 => stderrlog::LogLevelNum::Info,
        4 => stderrlog::LogLevelNum::Debug,
        _ => stderrlog::LogLevelNum::Trace,
    }
}

impl LogArgs {
    /// The verbosity count, or `default` when `-v` was not given.
    pub fn level(
        &self,
        default: u8,
    ) -> u8 {
        if let Some(verbose) = self.verbose
            && verbose > 0
        {
            verbose
        } else {
            default
        }
    }

    /// Initialize `stderrlog`.
    pub fn setup_logging(
        &self,
        default: u8,
    ) -> Result<(), Box<dyn std::error::Error>> {
        stderrlog::new()
            .quiet(self.quiet)
            .verbosity(log_level(self.level(default)))
            .timestamp(if self.ts {
                Timestamp::Second
            } else {
                Timestamp::Off
            })
            .init()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser, Debug)]
    struct Cli {
        #[clap(flatten)]
        logging: LogArgs,
    }

    #[test]
    fn test_level() {
        let cli = Cli::parse_from(["test"]);
        assert_eq!(cli.logging.level(2), 2);
        assert!(!cli.logging.quiet);

        let cli = Cli::parse_from(["test", "-vvv", "--ts"]);
        assert_eq!(cli.logging.level(2), 3);
        assert!(cli.logging.ts);

        let cli = Cli::parse_from(["test", "-q"]);
        assert!(cli.logging.quiet);
    }

    #[test]
    fn test_log_level() {
        assert!(matches!(log_level(0), stderrlog::LogLevelNum::Off));
        assert!(matches!(log_level(3), stderrlog::LogLevelNum::Info));
        assert!(matches!(log_level(9), stderrlog::LogLevelNum::Trace));
    }
}
