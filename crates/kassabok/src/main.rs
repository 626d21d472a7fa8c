use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use kassabok::actions::{self, AddArgs, FilterArgs};
use kassabok::rates::RateClient;
use kassabok::{AppConfig, Session, init_logging, open_backend};

#[derive(Parser, Debug)]
#[command(name = "kassabok")]
#[command(about = "A personal expense ledger backed by a sheet or local file")]
struct Args {
    /// Path to the data directory (default: ~/.kassabok/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the filtered expense table with totals
    Show {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Record one expense
    Add(AddArgs),
    /// Import a CSV or spreadsheet file and merge it into the dataset
    Import {
        file: PathBuf,
        /// Parse and preview only; merge nothing
        #[arg(long)]
        dry_run: bool,
    },
    /// Export the dataset to a CSV or spreadsheet file
    Export {
        file: PathBuf,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Review incomplete entries, or repair them from an edited export
    Audit {
        /// Write the incomplete subset to an editable file
        #[arg(long)]
        out: Option<PathBuf>,
        /// Apply fixes from an edited file
        #[arg(long)]
        apply: Option<PathBuf>,
    },
    /// Edit one year or month through an editable export
    Edit {
        #[arg(long)]
        year: i16,
        #[arg(long)]
        month: Option<i8>,
        /// Write the scoped subset to an editable file
        #[arg(long)]
        out: Option<PathBuf>,
        /// Apply edits from an edited file
        #[arg(long)]
        apply: Option<PathBuf>,
    },
    /// Monthly trends, next-month forecast and category insights
    Forecast {
        /// What-if: category (substring) to reduce
        #[arg(long)]
        reduce_category: Option<String>,
        /// What-if: reduction percentage
        #[arg(long, default_value_t = 10.0)]
        reduce_pct: f64,
    },
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".kassabok")
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;

    let config = AppConfig::load_or_default(&data_dir)?;
    let backend = open_backend(&config, &data_dir)?;
    let mut session = Session::new(Duration::from_secs(config.cache_ttl.medium_secs));

    match args.command {
        Command::Show { filter } => actions::show(
            &mut session,
            backend.as_ref(),
            &filter.into_filter_set(),
            &config.default_currency,
        )?,
        Command::Add(add_args) => {
            let mut rates = RateClient::new(
                &config.rates_url,
                Duration::from_secs(config.cache_ttl.long_secs),
            )?;
            actions::add(&mut session, backend.as_ref(), &config, &mut rates, add_args)?;
        }
        Command::Import { file, dry_run } => {
            actions::import_file(&mut session, backend.as_ref(), &file, dry_run)?
        }
        Command::Export { file, filter } => actions::export_file(
            &mut session,
            backend.as_ref(),
            &file,
            &filter.into_filter_set(),
        )?,
        Command::Audit { out, apply } => actions::audit(
            &mut session,
            backend.as_ref(),
            out.as_deref(),
            apply.as_deref(),
        )?,
        Command::Edit {
            year,
            month,
            out,
            apply,
        } => actions::edit(
            &mut session,
            backend.as_ref(),
            year,
            month,
            out.as_deref(),
            apply.as_deref(),
        )?,
        Command::Forecast {
            reduce_category,
            reduce_pct,
        } => actions::forecast(
            &mut session,
            backend.as_ref(),
            &config.default_currency,
            reduce_category.as_deref(),
            reduce_pct,
        )?,
    }

    Ok(())
}
