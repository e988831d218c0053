use std::{error::Error, fs, path::PathBuf, process::exit};

use clap::Parser;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use monin_rs::{
    Backend, Decoder, Owner, Period, PeriodSummary, category_chart, format_currency,
    group_by_period, local_today, normalize, period_window, validate_transactions,
};

/// Prints the monthly summary of an exported list of expenses.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the exported sheet (CSV) or documents (JSON).
    #[arg(long)]
    input: PathBuf,

    /// The backend the file was exported from.
    #[arg(long, value_enum, default_value_t = Backend::Documents)]
    backend: Backend,

    /// The period to summarise, e.g. "January_2024". Defaults to the current month.
    #[arg(long)]
    period: Option<Period>,

    /// The canonical timezone used for the current date and for dates without a time.
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,

    /// The ID of the user that sheet rows are attributed to.
    #[arg(long, default_value = "local")]
    owner_id: String,

    /// The name of the user that sheet rows are attributed to.
    #[arg(long, default_value = "Local user")]
    owner_name: String,

    /// The email of the user that sheet rows are attributed to.
    #[arg(long, default_value = "")]
    owner_email: String,

    /// The currency symbol to show before amounts.
    #[arg(long, default_value = "Rp")]
    currency: String,

    /// Print the category chart options as JSON instead of the text summary.
    #[arg(long)]
    chart: bool,
}

fn main() {
    setup_logging();

    let args = Args::parse();

    if let Err(error) = run(&args) {
        print_error(error);
        exit(1);
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let today = local_today(&args.timezone)?;
    let period = args.period.unwrap_or_else(|| Period::of(today));

    let text = fs::read_to_string(&args.input)
        .map_err(|error| format!("could not read {}: {error}", args.input.display()))?;

    let owner = Owner::new(&args.owner_id, &args.owner_name, &args.owner_email);
    let decoder = Decoder::with_timezone(owner, &args.timezone)?;
    let records = args.backend.parse(&text)?;
    let transactions = normalize(&records, &decoder)?;
    validate_transactions(&transactions)?;

    tracing::info!(
        "Loaded {} transactions from {}",
        transactions.len(),
        args.input.display()
    );

    let groups = group_by_period(&transactions);
    let summary = PeriodSummary::new(period, &groups);

    if args.chart {
        println!("{}", category_chart(&summary.categories));
        return Ok(());
    }

    println!("Periods");
    for window_period in period_window(today) {
        let marker = if window_period == period { '>' } else { ' ' };
        let count = groups.transactions(window_period).len();
        println!("{marker} {:<16} {count:>4}", window_period.label());
    }

    let symbol = &args.currency;

    println!();
    println!("{}", period.label());
    println!("  Expense  {:>16}", format_currency(summary.totals.expense, symbol)?);
    println!("  Income   {:>16}", format_currency(summary.totals.income, symbol)?);
    println!("  Net      {:>16}", format_currency(summary.totals.net(), symbol)?);

    println!();
    println!("Categories");
    for slice in &summary.categories {
        println!(
            "  {:<28} {:>4} {:>16} {:>6.1}%",
            slice.title,
            slice.count,
            format_currency(slice.total, symbol)?,
            slice.percentage
        );
    }

    println!();
    println!("Users");
    for owner in &summary.owners {
        println!(
            "  {:<28} {:>16} {:>16}",
            owner.owner.name,
            format_currency(owner.totals.expense, symbol)?,
            format_currency(owner.totals.income, symbol)?
        );
    }

    Ok(())
}

fn print_error(error: impl ToString) {
    eprintln!(
        "\x1b[31;1m{}\x1b[0m",
        capitalise_first_char(&error.to_string())
    )
}

fn capitalise_first_char(string: &str) -> String {
    let mut chars = string.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
