//! Database schema setup and helpers shared by the SQLite stores.

use std::str::FromStr;

use rusqlite::{Connection, Row, Transaction as SqlTransaction, types::Type};
use rust_decimal::Decimal;

use crate::{
    Error, fuel_type::create_fuel_type_table, transaction::create_transaction_table,
    user::create_user_table,
};

/// Create all of the database tables for the domain models.
///
/// Foreign key enforcement is switched on for `connection`, and the tables
/// are created inside a single exclusive transaction, so either
/// the whole schema exists afterwards or none of it was added.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // Has no effect inside a transaction, so it must be set first.
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_fuel_type_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Read a decimal stored as text from column `index` of `row`.
///
/// Money and volumes are stored as text so that SQLite never converts them
/// to floating point.
pub(crate) fn get_decimal(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let text: String = row.get(index)?;

    Decimal::from_str(&text).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error))
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use rust_decimal_macros::dec;

    use super::{get_decimal, initialize};

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).expect("first initialization failed");
        initialize(&conn).expect("second initialization failed");
    }

    #[test]
    fn decimals_keep_their_scale() {
        let conn = Connection::open_in_memory().unwrap();

        let value = conn
            .query_row("SELECT '1137.750'", [], |row| get_decimal(row, 0))
            .unwrap();

        assert_eq!(value, dec!(1137.75));
        assert_eq!(value.scale(), 3);
    }

    #[test]
    fn malformed_decimal_is_a_conversion_error() {
        let conn = Connection::open_in_memory().unwrap();

        let result = conn.query_row("SELECT 'twelve'", [], |row| get_decimal(row, 0));

        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(0, _, _))
        ));
    }
}
