// Actions module - one handler per CLI subcommand
//
// Handlers own the user-facing flow (messages, warnings, degraded modes)
// and delegate every dataset operation to the core. All of them go through
// the session context, so the cache/version pairing holds no matter which
// command mutated the data.

mod add;
mod audit;
mod edit;
mod export;
mod forecast;
mod import;
mod show;

pub use add::{AddArgs, add};
pub use audit::audit;
pub use edit::edit;
pub use export::export_file;
pub use forecast::forecast;
pub use import::import_file;
pub use show::show;

use kassabok_core::{FilterSet, date};

/// Filter flags shared by `show` and `export`.
#[derive(Debug, Default, clap::Args)]
pub struct FilterArgs {
    /// Restrict to these categories (repeatable)
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Restrict to these shops (repeatable)
    #[arg(long = "shop")]
    pub shops: Vec<String>,

    #[arg(long)]
    pub price_min: Option<f64>,

    #[arg(long)]
    pub price_max: Option<f64>,

    /// Start of the date range (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// End of the date range (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

impl FilterArgs {
    pub fn into_filter_set(self) -> FilterSet {
        FilterSet {
            categories: self.categories,
            shops: self.shops,
            price_min: self.price_min,
            price_max: self.price_max,
            date_from: parse_bound(self.from, "--from"),
            date_to: parse_bound(self.to, "--to"),
            ..FilterSet::default()
        }
    }
}

fn parse_bound(raw: Option<String>, flag: &str) -> Option<jiff::civil::Date> {
    let raw = raw?;
    let parsed = date::parse_date(&raw);
    if parsed.is_none() {
        tracing::warn!("ignoring unparseable {flag} date: {raw}");
        eprintln!("Warning: could not read {flag} date {raw:?}, ignoring it.");
    }
    parsed
}
