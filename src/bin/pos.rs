use std::{
    error::Error,
    path::Path,
    process::exit,
    sync::{Arc, Mutex},
};

use clap::{Parser, Subcommand, ValueEnum};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use time::{
    Date, PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use fuel_station_pos::{
    Analytics, Caller, ErrorKind, FuelTypeId, PaginationConfig, Period, TransactionFilter,
    TransactionProcessor, TransactionRequest, list_transactions, list_user_transactions,
    setup_logging,
    stores::{
        UserStore,
        sqlite::{SQLiteFuelTypeStore, SQLiteTransactionStore, SQLiteUserStore},
    },
};

/// The point of sale for a fuel station.
///
/// Records fuel sales and prints reports over the ledger as JSON.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The canonical timezone of the station, e.g. "Europe/Kyiv".
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a fuel sale.
    Sell {
        /// The ID of the fuel type to sell.
        #[arg(long)]
        fuel_type_id: FuelTypeId,

        /// How many liters to sell.
        #[arg(long)]
        volume: Option<Decimal>,

        /// How much money the customer wants to spend.
        #[arg(long)]
        total_amount: Option<Decimal>,

        /// The logged in customer. Sales without a username are made as the guest.
        #[arg(long, short)]
        username: Option<String>,
    },
    /// Print a sales report.
    Analytics {
        /// Which report to print.
        #[arg(value_enum)]
        report: Report,

        /// How to bucket dates: daily, weekly or monthly.
        #[arg(long, short, default_value = "daily")]
        period: String,

        /// Include sales on or after this date, only applied together with --end.
        #[arg(long, value_parser = parse_date_time)]
        start: Option<PrimitiveDateTime>,

        /// Include sales strictly before this date, only applied together with --start.
        #[arg(long, value_parser = parse_date_time)]
        end: Option<PrimitiveDateTime>,
    },
    /// List transactions a page at a time.
    Transactions {
        /// Only list this user's transactions, newest first.
        #[arg(long, short)]
        username: Option<String>,

        /// Only list transactions of this fuel type.
        #[arg(long)]
        fuel_type: Option<String>,

        /// Only list transactions strictly after this date.
        #[arg(long, value_parser = parse_date_time)]
        start: Option<PrimitiveDateTime>,

        /// The zero-based page to print.
        #[arg(long)]
        page: Option<u64>,

        /// The number of transactions per page.
        #[arg(long)]
        size: Option<u64>,
    },
    /// Print the dashboard summary.
    Dashboard,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Report {
    /// Liters sold per fuel type.
    Sales,
    /// Liters sold per fuel type and period.
    SalesByPeriod,
    /// Revenue per fuel type and period.
    RevenueByPeriod,
    /// Revenue per period across all fuel types.
    TotalRevenue,
}

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");
const DATE_TIME_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

fn parse_date_time(text: &str) -> Result<PrimitiveDateTime, String> {
    let text = text.trim();

    if let Ok(date_time) = PrimitiveDateTime::parse(&text.replacen('T', " ", 1), DATE_TIME_FORMAT)
    {
        return Ok(date_time);
    }

    Date::parse(text, DATE_FORMAT)
        .map(|date| date.midnight())
        .map_err(|_| format!("expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS, got \"{text}\""))
}

fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

    let args = Args::parse();
    let db_path = Path::new(&args.db_path);

    if !db_path.is_file() {
        print_error(format!(
            "File does not exist at {db_path:#?}! Create one with create_db."
        ));
        exit(1);
    }

    let conn = Arc::new(Mutex::new(Connection::open(db_path)?));
    conn.lock()
        .map_err(|_| "could not acquire the database lock")?
        .pragma_update(None, "foreign_keys", "ON")?;

    if let Err(error) = run(args.command, &args.timezone, conn) {
        let code = match error.kind() {
            ErrorKind::Validation => 2,
            ErrorKind::State | ErrorKind::Internal => 1,
        };
        print_error(error);
        exit(code);
    }

    Ok(())
}

fn run(
    command: Command,
    timezone: &str,
    conn: Arc<Mutex<Connection>>,
) -> Result<(), fuel_station_pos::Error> {
    match command {
        Command::Sell {
            fuel_type_id,
            volume,
            total_amount,
            username,
        } => {
            let mut processor = TransactionProcessor::new(
                SQLiteFuelTypeStore::new(conn.clone()),
                SQLiteUserStore::new(conn.clone()),
                SQLiteTransactionStore::new(conn),
                timezone,
            );
            let caller = match username {
                Some(username) => Caller::Authenticated { username },
                None => Caller::Guest,
            };
            let request = TransactionRequest {
                fuel_type_id: Some(fuel_type_id),
                volume,
                total_amount,
            };

            print_json(&processor.process(request, &caller)?)
        }
        Command::Analytics {
            report,
            period,
            start,
            end,
        } => {
            let analytics = Analytics::new(SQLiteTransactionStore::new(conn));

            match report {
                Report::Sales => print_json(&analytics.sales_by_fuel_type(start, end)?),
                Report::SalesByPeriod => {
                    let period: Period = period.parse()?;
                    print_json(&analytics.sales_by_fuel_type_grouped_by_period(start, end, period)?)
                }
                Report::RevenueByPeriod => {
                    let period: Period = period.parse()?;
                    print_json(
                        &analytics.revenue_by_fuel_type_grouped_by_period(start, end, period)?,
                    )
                }
                Report::TotalRevenue => {
                    let period: Period = period.parse()?;
                    print_json(&analytics.total_revenue_grouped_by_period(start, end, period)?)
                }
            }
        }
        Command::Transactions {
            username,
            fuel_type,
            start,
            page,
            size,
        } => {
            let request = PaginationConfig::default().page_request(page, size)?;
            let filter = TransactionFilter::new(fuel_type.as_deref(), start);
            let store = SQLiteTransactionStore::new(conn.clone());

            let page = match username {
                Some(username) => {
                    let user = SQLiteUserStore::new(conn)
                        .get_by_username(&username)
                        .map_err(|error| match error {
                            fuel_station_pos::Error::NotFound => {
                                fuel_station_pos::Error::UserNotFound(username.clone())
                            }
                            error => error,
                        })?;
                    list_user_transactions(&store, user.id, &filter, request)?
                }
                None => list_transactions(&store, &filter, request)?,
            };

            print_json(&page)
        }
        Command::Dashboard => {
            let analytics = Analytics::new(SQLiteTransactionStore::new(conn));

            print_json(&analytics.dashboard_summary()?)
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<(), fuel_station_pos::Error> {
    println!("{}", to_json(value)?);

    Ok(())
}

fn to_json(value: &impl Serialize) -> Result<String, fuel_station_pos::Error> {
    serde_json::to_string_pretty(value).map_err(|error| {
        tracing::error!("could not serialize output: {error}");
        fuel_station_pos::Error::SerializationError(error.to_string())
    })
}

fn print_error(error: impl ToString) {
    eprintln!("\x1b[31;1m{}\x1b[0m", error.to_string())
}
