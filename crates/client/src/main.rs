//! costly-client CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use costly_client::cli::waitlist::CleanupAction;
use costly_client::cli::{Cli, Commands};
use costly_client::client::CostlyClient;
use costly_client::output::{pretty, render};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = CostlyClient::new(&cli.base_url);

    match cli.command {
        Commands::Join(args) => {
            let response = client.join(&args.email).await?;
            if !cli.quiet {
                println!("{}", render(&response, cli.format, pretty::format_join));
            }
        }
        Commands::Count => {
            let response = client.count().await?;
            println!("{}", render(&response, cli.format, pretty::format_count));
        }
        Commands::Cleanup(cleanup_cmd) => match cleanup_cmd.action {
            CleanupAction::Report => {
                let report = client.cleanup_report().await?;
                println!("{}", render(&report, cli.format, pretty::format_report));
            }
            CleanupAction::Apply => {
                let response = client.cleanup_apply().await?;
                println!("{}", render(&response, cli.format, pretty::format_cleanup));
                if !response.failures.is_empty() {
                    return Ok(ExitCode::FAILURE);
                }
            }
        },
        Commands::Sequence => {
            let response = client.fix_sequence().await?;
            println!("{}", render(&response, cli.format, pretty::format_sequence));
        }
        Commands::Health(args) => {
            if args.live {
                let live = client.live().await?;
                if !cli.quiet {
                    println!("{}", if live { "Live" } else { "Not live" });
                }
                if !live {
                    return Ok(ExitCode::FAILURE);
                }
            } else {
                let readiness = client.ready().await?;
                if !cli.quiet {
                    println!("{}", render(&readiness, cli.format, pretty::format_readiness));
                }
                if !readiness.ready {
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
