//! EcoDesign Hub CLI
//!
//! Loads a seed file into an in-memory hub and inspects it

use clap::{Parser, Subcommand};
use ecohub_core::logging_facility::{self, Profile};
use ecohub_core_types::RequestContext;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "ecohub")]
#[command(about = "EcoDesign Hub - in-memory record store tools", long_about = None)]
struct Cli {
    /// Log output profile: development, production or test
    #[arg(
        long,
        global = true,
        env = "ECOHUB_LOG_PROFILE",
        default_value = "development"
    )]
    log_profile: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Seed file operations
    Seed(commands::seed::SeedArgs),
    /// Print every record of an entity
    List(commands::list::ListArgs),
    /// Print one record by id
    Get(commands::get::GetArgs),
    /// Filter, sort and limit the records of an entity
    Query(commands::query::QueryArgs),
}

#[tokio::main]
async fn main() {
    // `.env` must be loaded before clap reads env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging_facility::init(cli.log_profile);

    let ctx = RequestContext::new();
    tracing::debug!(request_id = ctx.request_id.as_str(), "cli request");

    let result = match cli.command {
        Commands::Seed(args) => commands::seed::execute(args, &ctx).await,
        Commands::List(args) => commands::list::execute(args, &ctx).await,
        Commands::Get(args) => commands::get::execute(args, &ctx).await,
        Commands::Query(args) => commands::query::execute(args, &ctx).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
