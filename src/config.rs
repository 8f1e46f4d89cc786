//! Configuration and CLI argument handling

use clap::Parser;

use crate::delta::{time_delta::MILLIS_PER_MINUTE, Target};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "countdown-clock")]
#[command(about = "Serve a pausable countdown over HTTP")]
#[command(version)]
pub struct Config {
    /// Target instant: epoch milliseconds or an ISO-8601 date/time
    #[arg(long)]
    pub target: Option<Target>,

    /// Count down this many minutes from launch when no target is given
    #[arg(short, long, default_value = "60")]
    pub minutes: i64,

    /// Wait for POST /start instead of starting immediately
    #[arg(long)]
    pub paused: bool,

    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// The configured target, or `minutes` after `now`
    pub fn resolve_target(&self, now: i64) -> Target {
        match &self.target {
            Some(target) => target.clone(),
            None => Target::Millis(now.saturating_add(self.minutes.saturating_mul(MILLIS_PER_MINUTE))),
        }
    }

    pub fn auto_start(&self) -> bool {
        !self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_one_hour() {
        let config = Config::try_parse_from(["countdown-clock"]).unwrap();
        assert_eq!(config.resolve_target(1_000), Target::Millis(1_000 + 3_600_000));
        assert!(config.auto_start());
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn explicit_target_wins() {
        let config = Config::try_parse_from([
            "countdown-clock",
            "--target",
            "2030-01-01T00:00:00Z",
            "--paused",
            "-v",
        ])
        .unwrap();
        assert_eq!(
            config.resolve_target(0),
            Target::Text("2030-01-01T00:00:00Z".to_string())
        );
        assert!(!config.auto_start());
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn huge_minutes_saturate() {
        let config = Config::try_parse_from([
            "countdown-clock",
            "--minutes",
            "9223372036854775807",
        ])
        .unwrap();
        assert_eq!(config.resolve_target(1_000), Target::Millis(i64::MAX));
    }

    #[test]
    fn rejects_unparseable_target() {
        assert!(Config::try_parse_from(["countdown-clock", "--target", "soon"]).is_err());
    }
}
