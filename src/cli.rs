use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::config::{AppConfig, OutputTarget, ReportFormat};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub format: Option<ReportFormat>,
    pub output: Option<OutputTarget>,
    pub help: bool,
}

impl CliArgs {
    /// Flags win over both the config file and the environment.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(format) = self.format {
            config.report.format = Some(format);
        }
        if let Some(output) = self.output {
            config.report.output = Some(output);
        }
    }
}

/// Parse command line arguments (without the program name).
///
/// Supported forms:
///   weekly-review
///   weekly-review --format attachments --output slack
///   weekly-review -c ./review.toml
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => parsed.help = true,
            "-c" | "--config" => {
                let Some(value) = iter.next() else {
                    bail!("Missing value for {arg} flag");
                };
                parsed.config = Some(PathBuf::from(value));
            }
            "-f" | "--format" => {
                let Some(value) = iter.next() else {
                    bail!("Missing value for {arg} flag");
                };
                parsed.format = Some(ReportFormat::parse(value)?);
            }
            "-o" | "--output" => {
                let Some(value) = iter.next() else {
                    bail!("Missing value for {arg} flag");
                };
                parsed.output = Some(OutputTarget::parse(value)?);
            }
            other => bail!("Unknown argument '{other}'. Run with --help for usage."),
        }
    }

    Ok(parsed)
}

pub fn print_help() {
    println!("weekly-review — post the cards of a Trello list as a weekly review\n");
    println!("USAGE:");
    println!("  weekly-review [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -c, --config <path>     Config file (default ~/.weekly-review/config.toml)");
    println!("  -f, --format <format>   template | attachments");
    println!("  -o, --output <target>   console | slack");
    println!("  -h, --help              Show this help");
    println!();
    println!("ENVIRONMENT:");
    println!("  TRELLO_APP_KEY, TRELLO_APP_TOKEN, TRELLO_MEMBER_NAME, TRELLO_BOARD, TRELLO_LIST");
    println!("  SLACK_WEBHOOK_URL, SLACK_CHANNEL, SLACK_USER, SLACK_EMOJI");
    println!("  WEEKLY_REVIEW_FORMAT, WEEKLY_REVIEW_OUTPUT, WEEKLY_REVIEW_SECRET_ENCODING");
    println!("  RUST_LOG (default info)");
}
