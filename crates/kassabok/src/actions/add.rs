use color_eyre::Result;

use kassabok_core::{Currency, ExpenseType, Record, date};

use crate::config::AppConfig;
use crate::format::format_amount;
use crate::rates::RateClient;
use crate::session::Session;
use crate::storage::StorageBackend;

#[derive(Debug, clap::Args)]
pub struct AddArgs {
    /// Date of the purchase (YYYY-MM-DD, default today)
    #[arg(long)]
    pub date: Option<String>,

    /// Goods or Service
    #[arg(long = "type", value_name = "TYPE", default_value = "Goods")]
    pub expense_type: String,

    #[arg(long, default_value = "")]
    pub shop: String,

    #[arg(long, default_value = "Uncategorized")]
    pub category: String,

    #[arg(long, default_value = "")]
    pub subcategory: String,

    #[arg(long)]
    pub item: String,

    #[arg(long, default_value = "")]
    pub brand: String,

    #[arg(long)]
    pub quantity: Option<String>,

    #[arg(long, default_value = "Count")]
    pub unit: String,

    /// Amount paid, in --currency
    #[arg(long)]
    pub amount: String,

    /// Entry currency (default from config)
    #[arg(long)]
    pub currency: Option<String>,
}

/// Record one manually entered expense. Bad numeric input is coerced to
/// zero with a visible warning and the entry proceeds; a non-default entry
/// currency is converted at the live rate when the rate service answers,
/// and stored unconverted with a notice when it does not.
pub fn add(
    session: &mut Session,
    backend: &dyn StorageBackend,
    config: &AppConfig,
    rates: &mut RateClient,
    args: AddArgs,
) -> Result<()> {
    let entry_currency = args
        .currency
        .unwrap_or_else(|| config.default_currency.clone())
        .to_uppercase();
    if !config.supported_currencies.contains(&entry_currency) {
        eprintln!(
            "Warning: {entry_currency} is not in the configured currency list, recording it anyway."
        );
    }

    let amount = coerce_number(&args.amount, "amount");
    let quantity = args.quantity.as_deref().map(|q| coerce_number(q, "quantity"));

    let rate = if entry_currency != config.default_currency {
        match rates.convert(&entry_currency, &config.default_currency) {
            Some(rate) => {
                println!(
                    "Live rate: 1 {entry_currency} = {rate:.2} {}",
                    config.default_currency
                );
                rate
            }
            None => {
                eprintln!("Warning: exchange rate unavailable, storing the amount unconverted.");
                1.0
            }
        }
    } else {
        1.0
    };

    let mut record = Record::empty();
    record.date = Some(match args.date.as_deref() {
        None => today(),
        Some(raw) => date::parse_date(raw).unwrap_or_else(|| {
            eprintln!("Warning: could not read date {raw:?}, using today.");
            today()
        }),
    });
    record.expense_type = ExpenseType::parse(&args.expense_type);
    if record.expense_type.is_none() {
        eprintln!(
            "Warning: unknown expense type {:?}; the entry will show up as incomplete until fixed.",
            args.expense_type
        );
    }
    record.category = args.category;
    record.subcategory = args.subcategory;
    record.item = args.item;
    record.brand = args.brand;
    record.shop = args.shop;
    // The stored price is in the default currency; the currency column
    // remembers what the user actually typed the amount in.
    record.price_paid = (amount * rate * 100.0).round() / 100.0;
    record.currency = Currency::parse(&entry_currency, &Currency::default());
    record.quantity = quantity;
    record.quantity_unit = args.unit;
    record.recompute_price_per_unit();

    let item = record.item.clone();
    let price = record.price_paid;

    let mut updated = session.dataset(backend);
    updated.merge(vec![record]);
    session.persist(backend, &updated)?;

    println!(
        "Added {item}: {} ({} entries total)",
        format_amount(price, &config.default_currency),
        updated.len()
    );
    Ok(())
}

/// Coerce a typed-in number. Anything unparseable or negative becomes zero
/// with a warning; the entry still goes in.
fn coerce_number(raw: &str, field: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value >= 0.0 => value,
        Ok(_) => {
            tracing::warn!("negative {field} entered: {raw}");
            eprintln!("Warning: negative {field} entered, using 0.");
            0.0
        }
        Err(_) => {
            tracing::warn!("invalid {field} entered: {raw}");
            eprintln!("Warning: invalid {field} entered, using 0.");
            0.0
        }
    }
}

fn today() -> jiff::civil::Date {
    jiff::Zoned::now().date()
}
