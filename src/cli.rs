// Command line interface parsing
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use clap::{
    crate_description,
    crate_name,
    crate_version,
    value_parser,
    Arg,
    ArgAction,
    ArgMatches,
    Command,
};
use tracing::debug;

/// Default number of objects displayed per bucket, negative meaning oldest
/// first.
pub const DEFAULT_COUNT: i64 = -5;

/// Default number of buckets analyzed at once.
pub const DEFAULT_CONCURRENCY: u16 = 8;

/// Default unit that sizes are displayed in.
pub const DEFAULT_UNIT: &str = "binary";

// This should match the string values in the SizeUnit FromStr impl
const VALID_UNITS: [&str; 3] = [
    "binary",
    "bytes",
    "decimal",
];

// Create clap app
fn create_app() -> Command {
    debug!("Creating CLI app");

    Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .arg(
            Arg::new("INCLUDE")
                .long("include")
                .short('i')
                .value_name("SUBSTRING")
                .help("Only report on buckets whose name contains this substring")
                .default_value("")
        )
        .arg(
            Arg::new("EXCLUDE")
                .long("exclude")
                .short('e')
                .value_name("SUBSTRING")
                .help("Skip buckets whose name contains this substring")
                .default_value("")
        )
        .arg(
            Arg::new("COUNT")
                .long("count")
                .short('n')
                .value_name("COUNT")
                .help("Number of objects to show for each bucket. 5 shows the five newest, -5 the five oldest.")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64))
                .default_value("-5")
        )
        .arg(
            Arg::new("JSON")
                .long("json")
                .help("Emit one JSON report per bucket instead of human readable blocks")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("UNIT")
                .env("S3REPORT_UNIT")
                .hide_env_values(true)
                .long("unit")
                .short('u')
                .value_name("UNIT")
                .help("Display sizes in binary (KiB), decimal (kB), or raw byte units")
                .default_value(DEFAULT_UNIT)
                .value_parser(VALID_UNITS)
        )
        .arg(
            Arg::new("CONCURRENCY")
                .env("S3REPORT_CONCURRENCY")
                .hide_env_values(true)
                .long("concurrency")
                .short('c')
                .value_name("N")
                .help("Maximum number of buckets analyzed at once")
                .value_parser(value_parser!(u16).range(1..))
                .default_value("8")
        )
        .arg(
            Arg::new("REGION")
                .env("AWS_REGION")
                .hide_env_values(true)
                .long("region")
                .short('r')
                .value_name("REGION")
                .help("Set the AWS region to create the client in.")
        )
}

/// Parse the command line arguments.
pub fn parse_args() -> ArgMatches {
    debug!("Parsing command line arguments");

    create_app().get_matches()
}
