use anyhow::Result;
use clap::{Parser, Subcommand};

use monthwise::cli::{
    handle_budget_command, handle_category_command, handle_doctor_command, handle_export_command,
    handle_rollover_command, handle_transaction_command,
};
use monthwise::config::{paths::MonthwisePaths, settings::Settings};
use monthwise::models::MonthKey;
use monthwise::services::BudgetSession;
use monthwise::storage::Storage;

#[derive(Parser)]
#[command(
    name = "monthwise",
    version,
    about = "Month-by-month budgets over tagged transactions",
    long_about = "Monthwise keeps a set of budget categories per month, matches them \
                  against tagged transactions to compute actuals, and carries each \
                  month's surplus forward with rollover transfers."
)]
struct Cli {
    /// Budget month (YYYY-MM), defaults to the current month
    #[arg(short, long, global = true, env = "MONTHWISE_MONTH")]
    month: Option<MonthKey>,

    /// Only count transactions from this account (repeat for several)
    #[arg(short, long = "account", global = true)]
    accounts: Vec<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Category management commands
    #[command(subcommand)]
    Category(monthwise::cli::CategoryCommands),

    /// Budget view and month setup commands
    #[command(subcommand)]
    Budget(monthwise::cli::BudgetCommands),

    /// Rollover transfer commands
    #[command(subcommand)]
    Rollover(monthwise::cli::RolloverCommands),

    /// Transaction store commands
    #[command(subcommand, alias = "txn")]
    Transaction(monthwise::cli::TransactionCommands),

    /// Check the month for double-counted and uncategorized expenses
    Doctor,

    /// Export the month's budget
    Export(monthwise::cli::ExportArgs),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = MonthwisePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    monthwise::logging::init(&settings.log_filter);

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let session = BudgetSession::new(cli.month.unwrap_or_else(MonthKey::current))
        .with_accounts(settings.accounts_or_default(cli.accounts));
    let symbol = settings.currency_symbol.as_str();

    match cli.command {
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, &session, symbol, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, &session, cmd)?;
        }
        Some(Commands::Rollover(cmd)) => {
            handle_rollover_command(&storage, &session, symbol, cmd)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &session, symbol, cmd)?;
        }
        Some(Commands::Doctor) => {
            handle_doctor_command(&storage, &session, symbol)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&storage, &session, args)?;
        }
        Some(Commands::Audit { count }) => {
            let entries = storage.audit().read_recent(count)?;
            if entries.is_empty() {
                println!("No audit entries yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Init) => {
            println!("Initializing Monthwise at: {}", paths.base_dir().display());
            let created = monthwise::storage::init::initialize_storage(&paths)?;
            for file in &created {
                println!("  created {}", file.display());
            }
            println!("Initialization complete!");
            println!();
            println!("Run 'monthwise budget show' to set up the current month.");
        }
        Some(Commands::Config) => {
            println!("Monthwise Configuration");
            println!("=======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:      {}", settings.currency_symbol);
            println!("  Trend months:         {}", settings.trend_months);
            println!(
                "  Auto-apply template:  {}",
                settings.auto_apply_default_template
            );
            println!("  Log filter:           {}", settings.log_filter);
            if !settings.default_accounts.is_empty() {
                println!("  Default accounts:     {}", settings.default_accounts.join(", "));
            }
            println!();
            println!("Audit entries: {}", storage.audit().entry_count()?);
        }
        None => {
            println!("Monthwise - month-by-month budgeting");
            println!();
            println!("Run 'monthwise --help' for usage information.");
        }
    }

    Ok(())
}
