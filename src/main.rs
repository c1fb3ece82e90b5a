use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nextcheck::cli::{
    handle_expense_command, handle_income_command, handle_show_command, handle_watch_command,
    Backend, ExpenseCommands, IncomeCommands,
};
use nextcheck::config::{paths::NextCheckPaths, settings::Settings, DueDayOverflow};
use nextcheck::models::IncomeId;

#[derive(Parser)]
#[command(
    name = "nextcheck",
    version,
    about = "When is the next paycheck, and what is due before it",
    long_about = "nextcheck derives the current pay period from your most recent pay \
                  date, lists the recurring bills that fall due before the next \
                  paycheck, and moves the pay date forward once payday has passed."
)]
struct Cli {
    /// Base URL of the income/expense service (local store when unset)
    #[arg(long, global = true, env = "NEXTCHECK_API_URL")]
    api_url: Option<String>,

    /// Income record to track on the remote service
    #[arg(long, global = true)]
    income_id: Option<IncomeId>,

    /// Days between paychecks
    #[arg(long, global = true)]
    cycle_days: Option<u32>,

    /// How due days past the end of a month are resolved
    #[arg(long, global = true, value_enum)]
    overflow: Option<DueDayOverflow>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the next paycheck and the expenses due before it
    Show {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Keep the card current, refreshing whenever the day changes
    Watch,

    /// Income record commands
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Recurring expense commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Show current configuration and paths
    Config,
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Some(Commands::Watch) => "info",
        _ => "warn",
    };
    init_tracing(default_level);

    // Initialize paths and settings
    let paths = NextCheckPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    if cli.api_url.is_some() {
        settings.api_url = cli.api_url;
    }
    if cli.income_id.is_some() {
        settings.income_id = cli.income_id;
    }
    if let Some(days) = cli.cycle_days {
        settings.cycle_length_days = days;
    }
    if let Some(overflow) = cli.overflow {
        settings.due_day_overflow = overflow;
    }
    settings.validate()?;

    let open_backend = || Backend::open(&paths, &settings);

    match cli.command.unwrap_or(Commands::Show { json: false }) {
        Commands::Show { json } => handle_show_command(&open_backend()?, &settings, json).await?,
        Commands::Watch => handle_watch_command(&open_backend()?, &settings).await?,
        Commands::Income(cmd) => handle_income_command(&open_backend()?, &settings, cmd).await?,
        Commands::Expense(cmd) => {
            handle_expense_command(&open_backend()?, &settings, cmd).await?
        }
        Commands::Config => {
            println!("nextcheck Configuration");
            println!("=======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!();
            println!("Settings:");
            println!("  Cycle length:      {} days", settings.cycle_length_days);
            println!("  Due day overflow:  {:?}", settings.due_day_overflow);
            println!("  Currency symbol:   {}", settings.currency_symbol);
            match (&settings.api_url, settings.income_id) {
                (Some(url), Some(id)) => println!("  Backend:           {} (income {})", url, id),
                (Some(url), None) => println!("  Backend:           {} (no income ID)", url),
                _ => println!("  Backend:           local store"),
            }
        }
    }

    Ok(())
}
