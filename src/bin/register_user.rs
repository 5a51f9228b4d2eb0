use std::{
    error::Error,
    io::{self},
    path::Path,
    process::exit,
    sync::{Arc, Mutex},
};

use clap::Parser;
use rusqlite::Connection;

use fuel_station_pos::{
    PasswordHash, Role, ValidatedPassword, register_user, setup_logging,
    stores::sqlite::SQLiteUserStore,
};

/// A utility for registering a customer or admin with the point of sale.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The name the user logs in with.
    #[arg(long, short)]
    username: String,

    /// Either USER or ADMIN.
    #[arg(long, short, default_value = "USER")]
    role: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

    let args = Args::parse();
    let db_path = Path::new(&args.db_path);
    validate_db_path(db_path);

    let role: Role = match args.role.parse() {
        Ok(role) => role,
        Err(error) => {
            print_error(error);
            exit(1);
        }
    };

    let password = match get_new_password() {
        Some(password) => password,
        None => return Ok(()),
    };

    let conn = Connection::open(db_path)?;
    let mut store = SQLiteUserStore::new(Arc::new(Mutex::new(conn)));

    match register_user(
        &mut store,
        &args.username,
        &password,
        role,
        PasswordHash::DEFAULT_COST,
    ) {
        Ok(user) => {
            println!("Registered {} with ID {} and role {}", user.username, user.id, user.role);
            Ok(())
        }
        Err(error) => {
            print_error(error);
            exit(1);
        }
    }
}

fn validate_db_path(db_path: &Path) {
    match db_path.extension() {
        None => {
            print_error("Database path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            print_error("Database path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if !db_path.is_file() {
        print_error(format!("File does not exist at {db_path:#?}!"));
        exit(1);
    }
}

fn get_new_password() -> Option<String> {
    loop {
        println!();

        let first_password = match rpassword::prompt_password("Enter a password: ") {
            Ok(string) => string,
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
                return None;
            }
            Err(error) => {
                print_error(format!("Could not read password from stdin: {error}"));
                return None;
            }
        };

        if let Err(error) = ValidatedPassword::new(&first_password) {
            print_error(error);
            continue;
        }

        let second_password = match rpassword::prompt_password("Enter the same password again: ") {
            Ok(string) => string,
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
                return None;
            }
            Err(error) => {
                print_error(format!("Could not read password from stdin: {error}"));
                return None;
            }
        };

        if first_password != second_password {
            print_error("Passwords must match, try again.");
            continue;
        }

        return Some(first_password);
    }
}

fn print_error(error: impl ToString) {
    eprintln!("\x1b[31;1m{}\x1b[0m", error.to_string())
}
