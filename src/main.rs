use anyhow::Result;
use clap::{Parser, Subcommand};

use fincast::cli::{
    handle_anomalies_command, handle_benchmarks_command, handle_forecast_command,
    handle_report_command, handle_summary_command, AnomaliesArgs, BenchmarksArgs, ForecastArgs,
    ReportArgs, SummaryArgs,
};
use fincast::config::{paths::FincastPaths, settings::Settings};
use fincast::logging::{init_logging, LoggingConfig};

#[derive(Parser)]
#[command(
    name = "fincast",
    version,
    about = "Cash-flow forecasting and anomaly detection for small businesses",
    long_about = "fincast reads a CSV or JSON export of business transactions, \
                  totals it by month, projects the next months with a moving \
                  average, flags revenue drops, expense spikes and deficits, \
                  and compares spending with industry benchmarks."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show monthly income, expense and balance
    Summary(SummaryArgs),

    /// Project income and expense for the coming months
    Forecast(ForecastArgs),

    /// Flag revenue drops, expense spikes and deficits
    #[command(alias = "alerts")]
    Anomalies(AnomaliesArgs),

    /// Compare spending with industry benchmarks
    Benchmarks(BenchmarksArgs),

    /// Produce the full insight report
    Report(ReportArgs),

    /// Write default settings to the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&LoggingConfig::from_env().with_verbosity(cli.verbose));

    let paths = FincastPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Summary(args)) => handle_summary_command(&settings, args)?,
        Some(Commands::Forecast(args)) => handle_forecast_command(&settings, args)?,
        Some(Commands::Anomalies(args)) => handle_anomalies_command(&settings, args)?,
        Some(Commands::Benchmarks(args)) => handle_benchmarks_command(&settings, args)?,
        Some(Commands::Report(args)) => handle_report_command(&paths, &settings, args)?,
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!(
                    "Settings already exist at: {}",
                    paths.settings_file().display()
                );
            } else {
                settings.save(&paths)?;
                println!("Initialized fincast at: {}", paths.base_dir().display());
                println!();
                println!("Edit config.json to set your business type, forecast horizon");
                println!("and anomaly thresholds.");
            }
        }
        Some(Commands::Config) => {
            println!("fincast Configuration");
            println!("=====================");
            println!("Data directory:    {}", paths.base_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!("Reports directory: {}", paths.reports_dir().display());
            println!();
            println!("Settings:");
            println!("  Forecast horizon: {} months", settings.forecast_horizon);
            println!(
                "  Business type:    {}",
                settings.business_profile.business_type
            );
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Date format:      {}", settings.date_format);
            let thresholds = &settings.anomaly_thresholds;
            println!(
                "  Revenue drop:     alert at {:.0}%, medium {:.0}%, high {:.0}%",
                thresholds.revenue_drop.alert * 100.0,
                thresholds.revenue_drop.medium * 100.0,
                thresholds.revenue_drop.high * 100.0
            );
            println!(
                "  Expense spike:    alert at {:.0}%, medium {:.0}%, high {:.0}%",
                thresholds.expense_spike.alert * 100.0,
                thresholds.expense_spike.medium * 100.0,
                thresholds.expense_spike.high * 100.0
            );
            println!(
                "  Deficit:          medium below -{}, high below -{}",
                thresholds.deficit.medium, thresholds.deficit.high
            );
        }
        None => {
            println!("fincast - cash-flow forecasting for small businesses");
            println!();
            println!("Run 'fincast --help' for usage information.");
            println!("Run 'fincast report <FILE>' for a full insight report.");
        }
    }

    Ok(())
}
