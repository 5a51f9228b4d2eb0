//! Registering users and seeding the data a fresh station needs.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{
    Error, PasswordHash, ValidatedPassword,
    fuel_type::FuelType,
    stores::{FuelTypeStore, UserStore},
    user::{GUEST_USERNAME, NewUser, Role, User},
};

/// The catalog a new database is seeded with.
pub const DEFAULT_FUEL_CATALOG: [(&str, Decimal); 4] = [
    ("A95", dec!(55.50)),
    ("A92", dec!(53.20)),
    ("Diesel", dec!(52.30)),
    ("LPG", dec!(33.90)),
];

/// The stored hash for the guest user. Bcrypt never produces it, so no
/// password can log in as the guest.
const UNUSABLE_PASSWORD_HASH: &str = "!";

/// Register a new user.
///
/// `cost` is the bcrypt cost used to hash `password`, see
/// [PasswordHash::DEFAULT_COST].
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyUsername] if `username` is empty,
/// - [Error::EmptyPassword] if `password` is empty,
/// - [Error::DuplicateUsername] if `username` is taken, which includes a
///   seeded guest user,
/// - [Error::ReservedUsername] if `username` is the guest username,
/// - or an internal error if hashing or the store fails.
pub fn register_user(
    store: &mut impl UserStore,
    username: &str,
    password: &str,
    role: Role,
    cost: u32,
) -> Result<User, Error> {
    if username.is_empty() {
        return Err(Error::EmptyUsername);
    }

    let validated_password = ValidatedPassword::new(password)?;

    match store.get_by_username(username) {
        Ok(_) => return Err(Error::DuplicateUsername(username.to_owned())),
        Err(Error::NotFound) => {}
        Err(error) => return Err(error),
    }

    if username == GUEST_USERNAME {
        return Err(Error::ReservedUsername);
    }

    let password_hash = PasswordHash::new(validated_password, cost).inspect_err(|error| {
        tracing::error!("an error occurred while hashing a password: {error}");
    })?;

    let user = store.create(NewUser {
        username: username.to_owned(),
        password_hash,
        role,
    })?;
    tracing::info!("Registered {} user {}", user.role, user.username);

    Ok(user)
}

/// Insert the guest user if it does not exist yet.
///
/// Returns the guest user either way.
///
/// # Errors
/// Returns an error if the store fails.
pub fn seed_guest_user(store: &mut impl UserStore) -> Result<User, Error> {
    match store.get_by_username(GUEST_USERNAME) {
        Ok(guest) => return Ok(guest),
        Err(Error::NotFound) => {}
        Err(error) => return Err(error),
    }

    let guest = store.create(NewUser {
        username: GUEST_USERNAME.to_owned(),
        password_hash: PasswordHash::new_unchecked(UNUSABLE_PASSWORD_HASH),
        role: Role::User,
    })?;
    tracing::info!("Seeded guest user with ID {}", guest.id);

    Ok(guest)
}

/// Add each fuel type in [DEFAULT_FUEL_CATALOG] that is not in the catalog yet.
///
/// Returns the fuel types that were added.
///
/// # Errors
/// Returns an error if the store fails.
pub fn seed_fuel_catalog(store: &mut impl FuelTypeStore) -> Result<Vec<FuelType>, Error> {
    let existing: Vec<String> = store
        .get_all()?
        .into_iter()
        .map(|fuel_type| fuel_type.name)
        .collect();

    let mut added = Vec::new();
    for (name, price_per_liter) in DEFAULT_FUEL_CATALOG {
        if existing.iter().any(|existing_name| existing_name == name) {
            continue;
        }

        added.push(store.create(name, price_per_liter)?);
    }
    tracing::info!("Seeded {} fuel types", added.len());

    Ok(added)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        Error, ErrorKind,
        db::initialize,
        stores::{
            FuelTypeStore, UserStore,
            sqlite::{SQLiteFuelTypeStore, SQLiteUserStore},
        },
        user::{GUEST_USERNAME, Role},
    };

    use super::{DEFAULT_FUEL_CATALOG, register_user, seed_fuel_catalog, seed_guest_user};

    const TEST_COST: u32 = 4;

    fn get_connection() -> Arc<Mutex<Connection>> {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        Arc::new(Mutex::new(conn))
    }

    fn count_users(connection: &Arc<Mutex<Connection>>) -> i64 {
        connection
            .lock()
            .unwrap()
            .query_row("SELECT COUNT(id) FROM user", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn registers_user_with_hashed_password() {
        let mut store = SQLiteUserStore::new(get_connection());

        let user = register_user(&mut store, "alice", "hunter2", Role::User, TEST_COST).unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(user.role, Role::User);
        assert_ne!(user.password_hash.as_ref(), "hunter2");
        assert!(user.password_hash.verify("hunter2").unwrap());
        assert_eq!(store.get_by_username("alice"), Ok(user));
    }

    #[test]
    fn registers_admin() {
        let mut store = SQLiteUserStore::new(get_connection());

        let user = register_user(&mut store, "root", "pa55", Role::Admin, TEST_COST).unwrap();

        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn rejects_empty_username() {
        let mut store = SQLiteUserStore::new(get_connection());

        let result = register_user(&mut store, "", "hunter2", Role::User, TEST_COST);

        assert_eq!(result, Err(Error::EmptyUsername));
    }

    #[test]
    fn rejects_empty_password() {
        let mut store = SQLiteUserStore::new(get_connection());

        let result = register_user(&mut store, "alice", "", Role::User, TEST_COST);

        assert_eq!(result, Err(Error::EmptyPassword));
    }

    #[test]
    fn rejects_guest_username() {
        let mut store = SQLiteUserStore::new(get_connection());

        let error = register_user(&mut store, GUEST_USERNAME, "hunter2", Role::User, TEST_COST)
            .unwrap_err();

        assert_eq!(error, Error::ReservedUsername);
        assert_eq!(
            error.to_string(),
            "Cannot register user with username 'guest'"
        );
    }

    #[test]
    fn seeded_guest_is_reported_as_duplicate() {
        let connection = get_connection();
        let mut store = SQLiteUserStore::new(connection.clone());
        seed_guest_user(&mut store).unwrap();

        let result = register_user(&mut store, GUEST_USERNAME, "hunter2", Role::User, TEST_COST);

        assert_eq!(result, Err(Error::DuplicateUsername(GUEST_USERNAME.to_owned())));
        assert_eq!(count_users(&connection), 1);
    }

    #[test]
    fn rejects_duplicate_username() {
        let connection = get_connection();
        let mut store = SQLiteUserStore::new(connection.clone());
        register_user(&mut store, "alice", "hunter2", Role::User, TEST_COST).unwrap();

        let error =
            register_user(&mut store, "alice", "other", Role::Admin, TEST_COST).unwrap_err();

        assert_eq!(error, Error::DuplicateUsername("alice".to_owned()));
        assert_eq!(error.to_string(), "Username already exists: alice");
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(count_users(&connection), 1);
    }

    #[test]
    fn seeding_guest_is_idempotent() {
        let connection = get_connection();
        let mut store = SQLiteUserStore::new(connection.clone());

        let first = seed_guest_user(&mut store).unwrap();
        let second = seed_guest_user(&mut store).unwrap();

        assert_eq!(first, second);
        assert!(first.is_guest());
        assert_eq!(count_users(&connection), 1);
    }

    #[test]
    fn guest_password_never_verifies() {
        let mut store = SQLiteUserStore::new(get_connection());

        let guest = seed_guest_user(&mut store).unwrap();

        assert!(!guest.password_hash.verify("!").unwrap_or(false));
    }

    #[test]
    fn seeding_catalog_skips_existing_fuel_types() {
        let mut store = SQLiteFuelTypeStore::new(get_connection());
        store.create("Diesel", rust_decimal_macros::dec!(49.99)).unwrap();

        let added = seed_fuel_catalog(&mut store).unwrap();
        let again = seed_fuel_catalog(&mut store).unwrap();

        assert_eq!(added.len(), DEFAULT_FUEL_CATALOG.len() - 1);
        assert!(again.is_empty());
        let diesel = store
            .get_all()
            .unwrap()
            .into_iter()
            .find(|fuel_type| fuel_type.name == "Diesel")
            .unwrap();
        assert_eq!(diesel.price_per_liter, rust_decimal_macros::dec!(49.99));
    }
}
