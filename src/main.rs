use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use portunus_tasks::clean;
use portunus_tasks::config::ToolConfig;
use portunus_tasks::envcheck;
use portunus_tasks::fmtcheck::{self, FmtStatus};
use portunus_tasks::layout::{ProjectLayout, ProtoTarget};
use portunus_tasks::orchestrate;

#[derive(Parser)]
#[command(name = "portunus-tasks")]
#[command(about = "Build tasks for Portunus: protobuf stubs, drift checks, cleanup", long_about = None)]
struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Regenerate protobuf stubs for the Go server and the Nanopb firmware
    Proto {
        /// Generate Go server stubs only
        #[arg(long)]
        go: bool,

        /// Generate Nanopb firmware stubs only
        #[arg(long)]
        nanopb: bool,

        /// After generating, fail if output differs from committed files
        #[arg(long)]
        check: bool,
    },

    /// Remove files and directories, ignoring paths that do not exist
    Clean {
        /// Paths to remove
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Check that Go sources are gofmt-formatted
    FmtCheck {
        /// Directory to check
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Probe for the external tools the other commands need
    EnvCheck,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Cmd::Proto { go, nanopb, check } => {
            // Default: generate both when neither selector is given.
            let both = !go && !nanopb;
            let mut requested = Vec::new();
            if go || both {
                requested.push(ProtoTarget::Go);
            }
            if nanopb || both {
                requested.push(ProtoTarget::Nanopb);
            }

            let layout = ProjectLayout::new(&cli.root);
            let config = ToolConfig::load(layout.root());
            match orchestrate::run_generation(&layout, &config, &requested, check) {
                Ok(report) => ExitCode::from(report.exit_code()),
                Err(err) => {
                    eprintln!("error: {err}");
                    ExitCode::from(1)
                }
            }
        }

        Cmd::Clean { paths } => {
            if clean::clean_all(&paths) {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }

        Cmd::FmtCheck { dir } => {
            let status = fmtcheck::fmt_check(&dir);
            match &status {
                FmtStatus::Formatted => {}
                FmtStatus::Unformatted { files } => {
                    println!("The following files are not gofmt-formatted:\n");
                    println!("{files}");
                    println!("\nrun `gofmt -w {}` to fix them", dir.display());
                }
                FmtStatus::ToolError { message } => eprintln!("error: {message}"),
            }
            ExitCode::from(status.exit_code())
        }

        Cmd::EnvCheck => {
            let config = ToolConfig::load(&cli.root);
            if envcheck::env_check(&config) {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
    }
}
