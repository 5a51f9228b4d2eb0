use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;

use fuel_station_pos::{
    initialize_db, seed_fuel_catalog, seed_guest_user, setup_logging,
    stores::sqlite::{SQLiteFuelTypeStore, SQLiteUserStore},
};

/// A utility for creating a new point of sale database.
///
/// The database is seeded with the guest user and the default fuel catalog.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let conn = Arc::new(Mutex::new(conn));

    println!("Seeding guest user...");
    seed_guest_user(&mut SQLiteUserStore::new(conn.clone()))?;

    println!("Seeding fuel catalog...");
    for fuel_type in seed_fuel_catalog(&mut SQLiteFuelTypeStore::new(conn))? {
        println!(
            "  {} (ID {}) at {} per liter",
            fuel_type.name, fuel_type.id, fuel_type.price_per_liter
        );
    }

    println!("Success!");

    Ok(())
}
