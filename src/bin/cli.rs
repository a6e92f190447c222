use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fixture_catalog::api::FootballApiClient;
use fixture_catalog::ingest::{FailurePolicy, IngestReport};
use fixture_catalog::utils::init_tracing;
use fixture_catalog::{sync_fixtures, sync_teams, Config, Database, SyncTarget};

#[derive(Parser)]
#[command(name = "cli", about = "Maintain the fixture catalog")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create or update the database schema
    Migrate,
    /// Register a sport so teams and fixtures can be attached to it
    AddSport {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        image_url: String,
    },
    /// Hide a sport from the active sports listing
    DeactivateSport { id: i64 },
    /// Show a previously hidden sport again
    ActivateSport { id: i64 },
    /// Pull a league season's teams from the provider
    Teams(SyncArgs),
    /// Pull a league season's fixtures from the provider
    Fixtures {
        #[command(flatten)]
        sync: SyncArgs,
        /// Skip and report records that cannot be mapped, or abort the whole run
        #[arg(long, value_enum, default_value_t = FailurePolicy::Skip)]
        on_error: FailurePolicy,
    },
    /// Show how many provider requests are left today
    Usage,
}

#[derive(Args)]
struct SyncArgs {
    /// Provider league id (39 is the Premier League)
    #[arg(long, default_value_t = 39)]
    league: u32,
    #[arg(long, default_value_t = 2025)]
    season: u32,
    /// Catalog sport the records belong to, as printed by `add-sport`
    #[arg(long)]
    sport_id: i64,
}

impl From<&SyncArgs> for SyncTarget {
    fn from(args: &SyncArgs) -> Self {
        SyncTarget {
            league: args.league,
            season: args.season,
            sport_id: args.sport_id,
        }
    }
}

fn print_report(what: &str, report: &IngestReport) {
    println!("{} ingestion: {}", what, report.format());
    if !report.failures.is_empty() {
        println!("\nSkipped records:\n");
        for (i, failure) in report.failures.iter().enumerate() {
            println!("{}. {}: {}", i + 1, failure.provider_id, failure.reason);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("Invalid configuration")?;

    let db = Database::connect(&config.database)
        .await
        .context("Failed to connect to the database")?;

    match cli.command {
        Command::Migrate => {
            db.migrate().await.context("Failed to apply migrations")?;
            println!("Migrations completed successfully");
        }
        Command::AddSport {
            name,
            description,
            image_url,
        } => {
            let sport = db
                .create_sport(&name, &description, &image_url)
                .await
                .context("Failed to add sport")?;
            println!("Added sport {} with id {}", sport.name, sport.id);
        }
        Command::DeactivateSport { id } => {
            db.set_sport_active(id, false)
                .await
                .context("Failed to deactivate sport")?;
            println!("Sport {} is now inactive", id);
        }
        Command::ActivateSport { id } => {
            db.set_sport_active(id, true)
                .await
                .context("Failed to activate sport")?;
            println!("Sport {} is now active", id);
        }
        Command::Teams(sync) => {
            let client = FootballApiClient::new(&config.football_api)?;
            let report = sync_teams(&db, &client, SyncTarget::from(&sync))
                .await
                .context("Failed to ingest teams")?;
            print_report("Team", &report);
        }
        Command::Fixtures { sync, on_error } => {
            let client = FootballApiClient::new(&config.football_api)?;
            let report = sync_fixtures(&db, &client, SyncTarget::from(&sync), on_error)
                .await
                .context("Failed to ingest fixtures")?;
            print_report("Fixture", &report);
        }
        Command::Usage => {
            let client = FootballApiClient::new(&config.football_api)?;
            let quota = client.check_usage().await?;
            println!(
                "Football API requests used today: {} of {}",
                quota.current, quota.limit_day
            );
        }
    }

    db.close().await;
    Ok(())
}
