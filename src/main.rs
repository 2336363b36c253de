use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use pocket_ledger::cli::{
    handle_export_command, handle_movement_command, handle_report_command,
    handle_taxonomy_command, handle_user_command, ExportArgs, MovementCommands, ReportArgs,
    TaxonomyArgs, UserCommands,
};
use pocket_ledger::config::{paths::LedgerPaths, settings::Settings};
use pocket_ledger::storage::Storage;
use pocket_ledger::taxonomy::Taxonomy;

/// Environment variable holding the log filter
const LOG_ENV: &str = "POCKET_LOG";

#[derive(Parser)]
#[command(
    name = "pocket",
    version,
    about = "Personal income and expense ledger",
    long_about = "Pocket Ledger records household income and expenses against a fixed \
                  category taxonomy and reports monthly trends, category \
                  distribution and savings from the command line."
)]
struct Cli {
    /// User to log in as
    #[arg(short, long, global = true, env = "POCKET_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the ledger
    Init,

    /// Show current configuration and paths
    Config,

    /// User management commands
    #[command(subcommand)]
    User(UserCommands),

    /// Show the category taxonomy
    Taxonomy(TaxonomyArgs),

    /// Movement commands
    #[command(subcommand, alias = "mv")]
    Movement(MovementCommands),

    /// Movement report with trend, distribution and savings
    Report(ReportArgs),

    /// Export every movement
    Export(ExportArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("pocket_ledger=warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let taxonomy = Taxonomy::load_or_builtin(&paths)?;
    let storage = Storage::new(paths.clone())?;
    let user = cli.user.as_deref();

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing Pocket Ledger at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  pocket user add <name>     register a user");
            println!("  pocket taxonomy            show the categories");
            println!("  pocket movement add ...    record a movement");
        }
        Some(Commands::Config) => {
            println!("Pocket Ledger Configuration");
            println!("===========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Movements file:  {}", paths.movements_file().display());
            println!("Users file:      {}", paths.users_file().display());
            println!(
                "Taxonomy:        {}",
                if paths.taxonomy_file().exists() {
                    paths.taxonomy_file().display().to_string()
                } else {
                    "built-in".to_string()
                }
            );
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!(
                "  Shift thresholds: {} days (new), {} days (edit)",
                settings.effective_date.creation_threshold_days,
                settings.effective_date.edit_threshold_days
            );
            let kinds: Vec<String> = settings.default_kinds.iter().map(|k| k.to_string()).collect();
            println!("  Report kinds:    {}", kinds.join(", "));
            if !storage.is_initialized() {
                println!();
                println!("Not initialized. Run 'pocket init'.");
            }
        }
        Some(Commands::User(cmd)) => {
            handle_user_command(&storage, cmd)?;
        }
        Some(Commands::Taxonomy(args)) => {
            handle_taxonomy_command(&taxonomy, args)?;
        }
        Some(Commands::Movement(cmd)) => {
            handle_movement_command(&storage, &settings, &taxonomy, user, cmd)?;
        }
        Some(Commands::Report(args)) => {
            handle_report_command(&storage, &settings, args)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&storage, args)?;
        }
        None => {
            println!("Pocket Ledger - personal income and expense ledger");
            println!();
            println!("Run 'pocket --help' for usage information.");
        }
    }

    Ok(())
}
