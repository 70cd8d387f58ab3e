use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{self, CommandReport};

#[derive(Debug, Parser)]
#[command(
    name = "permit-viewer",
    version,
    about = "List building permits grouped by date, optionally for one neighborhood"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the command report as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show permits grouped by date.
    List {
        /// Neighborhood identifier, e.g. `mission` or `noe-valley`.
        #[arg(value_name = "NHID", conflicts_with = "nhid")]
        nhid_arg: Option<String>,
        #[arg(long)]
        nhid: Option<String>,
        /// Dataset URL or local file; defaults to the configured location.
        #[arg(long)]
        source: Option<String>,
    },
    /// List neighborhood identifiers present in the dataset.
    Neighborhoods {
        #[arg(long)]
        source: Option<String>,
    },
    /// Show resolved configuration.
    Status {
        #[arg(long)]
        source: Option<String>,
    },
}

fn print_report(report: &CommandReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    for line in &report.details {
        println!("{line}");
    }
    for issue in &report.issues {
        eprintln!("{}: {issue}", report.command);
    }
    Ok(())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose);

    let report = match cli.command {
        Command::List {
            nhid_arg,
            nhid,
            source,
        } => commands::list::run(&commands::list::ListOptions {
            nhid: nhid.or(nhid_arg),
            source,
        })?,
        Command::Neighborhoods { source } => {
            let opts = commands::neighborhoods::NeighborhoodsOptions { source };
            commands::neighborhoods::run(&opts)?
        }
        Command::Status { source } => commands::status::run(source.as_deref())?,
    };

    print_report(&report, cli.json)?;
    if !report.ok {
        anyhow::bail!("{} reported {} issue(s)", report.command, report.issues.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positional_and_flag_nhid_parse() {
        let cli = Cli::parse_from(["permit-viewer", "list", "mission"]);
        assert!(matches!(
            cli.command,
            Command::List { nhid_arg: Some(ref n), .. } if n == "mission"
        ));

        let cli = Cli::parse_from([
            "permit-viewer",
            "-vv",
            "list",
            "--nhid",
            "noe-valley",
            "--json",
        ]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Command::List { nhid: Some(ref n), .. } if n == "noe-valley"
        ));
    }

    #[test]
    fn both_nhid_forms_conflict() {
        let parsed = Cli::try_parse_from(["permit-viewer", "list", "a", "--nhid", "b"]);
        assert!(parsed.is_err());
    }
}
