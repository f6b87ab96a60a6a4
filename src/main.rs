use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mealplanner::cli::{self, EditArgs};

/// mealplanner - Meal plan recomputation tools
#[derive(Parser)]
#[command(name = "mealplanner")]
#[command(about = "Reshape, summarize and check generated meal plans", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recompute a plan for new parameters
    Recompute {
        /// Plan document (JSON)
        plan: PathBuf,

        #[command(flatten)]
        edit: EditArgs,

        /// Write the result here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Dashboard statistics over plan documents
    Stats {
        /// Plan documents (JSON)
        plans: Vec<PathBuf>,
    },
    /// Report consistency violations of a plan
    Check {
        /// Plan document (JSON)
        plan: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mealplanner::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealplanner::observability::init_observability(
        "mealplanner",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Recompute { plan, edit, output } => {
            let next = cli::recompute(&plan, edit.into()).await?;
            cli::emit(&next, output.as_deref()).await
        }
        Commands::Stats { plans } => {
            let summary = cli::stats(&config, &plans).await?;
            cli::emit(&summary, None).await
        }
        Commands::Check { plan } => {
            let violations = cli::check(&plan).await?;
            for violation in &violations {
                println!("{violation}");
            }

            if !violations.is_empty() {
                anyhow::bail!("{} violates {} rule(s)", plan.display(), violations.len());
            }

            Ok(())
        }
    }
}
