use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod delivery;
mod filter;
mod models;
mod report;
mod script;
mod session;
mod utils;

#[derive(Parser)]
#[command(
    name = "synctrace",
    version,
    about = "Filter sync rule comparison reports and extract remediation scripts"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a comparison report with the selected filters applied
    View {
        /// Path to the report document (json, yaml or toml)
        report: String,
        /// Only show changes; also offers the remediation script
        #[arg(long)]
        only_changes: bool,
        /// Hide default sync rules
        #[arg(long)]
        hide_default_rules: bool,
        /// Hide the end-to-end attribute flow summary
        #[arg(long)]
        hide_summary: bool,
        /// Output format: text, json, markdown, or html
        #[arg(long, default_value = "text")]
        format: String,
        /// Write output to file instead of stdout
        #[arg(long)]
        output: Option<String>,
    },
    /// Assemble SyncRuleChanges.ps1.txt from the changes-only view
    Script {
        /// Path to the report document (json, yaml or toml)
        report: String,
        /// Leave fragments of default sync rules out of the script
        #[arg(long)]
        hide_default_rules: bool,
        /// Leave fragments of the end-to-end summary out of the script
        #[arg(long)]
        hide_summary: bool,
        /// Directory the script is saved into
        #[arg(long, default_value = ".")]
        out_dir: String,
        /// Write the script bytes to stdout instead of saving a file
        #[arg(long)]
        stdout: bool,
    },
    /// Toggle filters interactively; the script is re-issued on every change
    Session {
        /// Path to the report document (json, yaml or toml)
        report: String,
        /// Stage scripts here and hand out file:// links to them
        #[arg(long)]
        staging_dir: Option<String>,
        /// Directory the script is saved into when links are unavailable
        #[arg(long, default_value = ".")]
        out_dir: String,
    },
    /// Validate a report document, or every report under a directory
    Validate {
        /// Path to a report file or directory
        path: String,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::View {
            report,
            only_changes,
            hide_default_rules,
            hide_summary,
            format,
            output,
        } => {
            let state = filter::FilterState {
                only_show_changes: only_changes,
                hide_default_rules,
                hide_end_to_end_summary: hide_summary,
            };
            report::view_report(&report, state, &format, output.as_deref())?;
        }
        Commands::Script {
            report,
            hide_default_rules,
            hide_summary,
            out_dir,
            stdout,
        } => script::generate_script(&report, hide_default_rules, hide_summary, &out_dir, stdout)?,
        Commands::Session {
            report,
            staging_dir,
            out_dir,
        } => session::run_session(&report, staging_dir.as_deref(), &out_dir)?,
        Commands::Validate { path } => {
            let has_invalid = report::validate_reports(&path)?;
            if has_invalid {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
