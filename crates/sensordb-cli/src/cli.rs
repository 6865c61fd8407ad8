//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use sensordb_types::TimeRange;

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "sensordb")]
#[command(author, version, about = "Store and query scalar sensor readings", long_about = None)]
pub struct Cli {
    /// Database file (overrides config), or use SENSORDB_DATABASE env var
    #[arg(short, long, global = true, env = "SENSORDB_DATABASE")]
    pub database: Option<PathBuf>,

    /// Configuration file (default: platform config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Append one reading
    Add {
        /// Sensor tag
        tag: String,

        /// Timestamp in milliseconds or RFC 3339
        #[arg(allow_hyphen_values = true)]
        timestamp: String,

        /// Measured value
        #[arg(allow_hyphen_values = true)]
        value: f64,

        /// Resolution tier (0 = raw data)
        #[arg(short, long, default_value = "0")]
        tier: i32,
    },

    /// Query readings of a tag
    Query {
        /// Sensor tag
        tag: String,

        /// Time range in interval notation, e.g. "[0,1000)" or "(500,]"
        #[arg(short, long, default_value = "(,)", allow_hyphen_values = true)]
        range: TimeRange,

        /// Only this resolution tier (default: all tiers)
        #[arg(short, long)]
        tier: Option<i32>,

        /// Maximum number of readings (0 for all)
        #[arg(short, long, default_value = "0")]
        limit: i64,

        /// Return the newest readings first
        #[arg(short, long)]
        newest_first: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete readings of a tag in every resolution tier
    Delete {
        /// Sensor tag
        tag: String,

        /// Time range in interval notation; "(,)" deletes everything
        #[arg(short, long, allow_hyphen_values = true)]
        range: TimeRange,
    },

    /// Print the tag of the first reading after a timestamp
    FirstAfter {
        /// Timestamp in milliseconds or RFC 3339
        #[arg(allow_hyphen_values = true)]
        timestamp: String,
    },

    /// Show database location, schema version and stored tags
    Info,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_query() {
        let cli = Cli::parse_from([
            "sensordb", "query", "temp", "--range", "(5,10]", "--tier", "1", "--limit", "3",
            "--newest-first", "--format", "csv",
        ]);

        let Commands::Query {
            tag,
            range,
            tier,
            limit,
            newest_first,
            format,
        } = cli.command
        else {
            panic!("expected query command");
        };
        assert_eq!(tag, "temp");
        assert_eq!(range, TimeRange::open_closed(5, 10));
        assert_eq!(tier, Some(1));
        assert_eq!(limit, 3);
        assert!(newest_first);
        assert_eq!(format, OutputFormat::Csv);
    }

    #[test]
    fn test_query_defaults() {
        let cli = Cli::parse_from(["sensordb", "query", "temp"]);
        let Commands::Query {
            range, tier, limit, ..
        } = cli.command
        else {
            panic!("expected query command");
        };
        assert_eq!(range, TimeRange::all());
        assert_eq!(tier, None);
        assert_eq!(limit, 0);
    }

    #[test]
    fn test_add_accepts_negative_values() {
        let cli = Cli::parse_from(["sensordb", "add", "temp", "-100", "-2.5", "--tier", "2"]);
        let Commands::Add {
            timestamp,
            value,
            tier,
            ..
        } = cli.command
        else {
            panic!("expected add command");
        };
        assert_eq!(timestamp, "-100");
        assert_eq!(value, -2.5);
        assert_eq!(tier, 2);
    }

    #[test]
    fn test_delete_requires_range() {
        assert!(Cli::try_parse_from(["sensordb", "delete", "temp"]).is_err());
        assert!(Cli::try_parse_from(["sensordb", "delete", "temp", "-r", "[x,1]"]).is_err());
    }

    #[test]
    fn test_global_database_flag() {
        let cli = Cli::parse_from(["sensordb", "info", "--database", "/tmp/x.db"]);
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/x.db")));
    }
}
