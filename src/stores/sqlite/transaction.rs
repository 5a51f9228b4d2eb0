//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, ToSql, params_from_iter};

use crate::{
    Error,
    stores::{
        TransactionStore,
        transaction::{SortOrder, TransactionQuery},
    },
    transaction::{NewTransaction, TRANSACTION_COLUMNS, Transaction, map_transaction_row},
};

use super::lock;

/// Stores transactions in a SQLite database.
///
/// Note that because a transaction references a fuel type and a user, those
/// tables must be set up in the database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

/// Build the WHERE clause and its parameters for the filters in `query`.
fn where_clause(query: &TransactionQuery) -> (String, Vec<Box<dyn ToSql>>) {
    let mut where_clause_parts = vec![];
    let mut query_parameters: Vec<Box<dyn ToSql>> = vec![];

    if let Some(start_date) = query.start_date {
        query_parameters.push(Box::new(start_date));
        where_clause_parts.push(format!("transaction_date >= ?{}", query_parameters.len()));
    }

    if let Some(end_date) = query.end_date {
        query_parameters.push(Box::new(end_date));
        where_clause_parts.push(format!("transaction_date < ?{}", query_parameters.len()));
    }

    if let Some(after_date) = query.after_date {
        query_parameters.push(Box::new(after_date));
        where_clause_parts.push(format!("transaction_date > ?{}", query_parameters.len()));
    }

    if let Some(user_id) = query.user_id {
        query_parameters.push(Box::new(user_id.as_i64()));
        where_clause_parts.push(format!("user_id = ?{}", query_parameters.len()));
    }

    if let Some(fuel_type_name) = &query.fuel_type_name {
        query_parameters.push(Box::new(fuel_type_name.clone()));
        where_clause_parts.push(format!("fuel_type_name = ?{}", query_parameters.len()));
    }

    if where_clause_parts.is_empty() {
        (String::new(), query_parameters)
    } else {
        (
            String::from("WHERE ") + &where_clause_parts.join(" AND "),
            query_parameters,
        )
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Save a new transaction in the database.
    ///
    /// Decimals are written as text exactly as given.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL
    /// error, e.g. the fuel type or user ID does not exist.
    fn create(&mut self, transaction: NewTransaction) -> Result<Transaction, Error> {
        let connection = lock(&self.connection)?;

        let query = format!(
            "INSERT INTO \"transaction\" \
             (fuel_type_id, fuel_type_name, price_per_liter, volume, total_amount, transaction_date, user_id) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) \
             RETURNING {TRANSACTION_COLUMNS}"
        );

        let transaction = connection.prepare(&query)?.query_row(
            (
                transaction.fuel_type_id,
                &transaction.fuel_type_name,
                transaction.price_per_liter.to_string(),
                transaction.volume.to_string(),
                transaction.total_amount.to_string(),
                transaction.transaction_date,
                transaction.user_id.as_i64(),
            ),
            map_transaction_row,
        )?;

        Ok(transaction)
    }

    /// Query for transactions in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn get_query(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let (where_clause, query_parameters) = where_clause(query);
        let mut query_string_parts = vec![format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\""
        )];

        if !where_clause.is_empty() {
            query_string_parts.push(where_clause);
        }

        // Sort by date, and then ID to keep the order stable for transactions
        // made at the same instant.
        query_string_parts.push(
            match query.sort {
                Some(SortOrder::DateAscending) => "ORDER BY transaction_date ASC, id ASC",
                Some(SortOrder::DateDescending) => "ORDER BY transaction_date DESC, id DESC",
                None => "ORDER BY id ASC",
            }
            .to_owned(),
        );

        if let Some(limit) = query.limit {
            query_string_parts.push(format!("LIMIT {limit} OFFSET {}", query.offset));
        }

        let query_string = query_string_parts.join(" ");

        lock(&self.connection)?
            .prepare(&query_string)?
            .query_map(params_from_iter(query_parameters.iter()), map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }

    /// Count the transactions matching the filters in `query`.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is some SQL error.
    fn count(&self, query: &TransactionQuery) -> Result<u64, Error> {
        let (where_clause, query_parameters) = where_clause(query);
        let query_string = format!("SELECT COUNT(id) FROM \"transaction\" {where_clause}");

        let count: i64 = lock(&self.connection)?.query_row(
            &query_string,
            params_from_iter(query_parameters.iter()),
            |row| row.get(0),
        )?;

        u64::try_from(count)
            .map_err(|_| Error::SqlError(rusqlite::Error::IntegralValueOutOfRange(0, count)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use rust_decimal_macros::dec;
    use time::{PrimitiveDateTime, macros::datetime};

    use crate::{
        db::initialize,
        stores::{SortOrder, TransactionQuery, TransactionStore},
        transaction::NewTransaction,
        user::UserID,
    };

    use super::SQLiteTransactionStore;

    fn get_store() -> SQLiteTransactionStore {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn.execute(
            "INSERT INTO user (id, username, password, role) VALUES (1, 'guest', '!', 'USER'), \
             (2, 'alice', '!', 'USER')",
            (),
        )
        .unwrap();
        conn.execute(
            "INSERT INTO fuel_type (id, name, price_per_liter) VALUES (1, 'A95', '55.50'), \
             (2, 'Diesel', '52.30')",
            (),
        )
        .unwrap();

        SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)))
    }

    fn new_transaction(
        fuel_type_id: i64,
        fuel_type_name: &str,
        date: PrimitiveDateTime,
        user_id: i64,
    ) -> NewTransaction {
        NewTransaction {
            fuel_type_id,
            fuel_type_name: fuel_type_name.to_owned(),
            price_per_liter: dec!(55.50),
            volume: dec!(20.5),
            total_amount: dec!(1137.750),
            transaction_date: date,
            user_id: UserID::new(user_id),
        }
    }

    #[test]
    fn create_assigns_id_and_keeps_snapshot() {
        let mut store = get_store();
        let date = datetime!(2025-04-01 10:15:30);

        let transaction = store
            .create(new_transaction(1, "A95", date, 1))
            .expect("Could not create transaction");

        assert!(transaction.id > 0);
        assert_eq!(transaction.fuel_type_name, "A95");
        assert_eq!(transaction.price_per_liter, dec!(55.50));
        assert_eq!(transaction.total_amount.to_string(), "1137.750");
        assert_eq!(transaction.transaction_date, date);
        assert_eq!(transaction.user_id, UserID::new(1));
    }

    #[test]
    fn create_fails_on_unknown_user() {
        let mut store = get_store();

        let result = store.create(new_transaction(1, "A95", datetime!(2025-04-01 10:00), 42));

        assert!(result.is_err());
    }

    #[test]
    fn date_range_is_half_open() {
        let mut store = get_store();
        for date in [
            datetime!(2025-03-31 23:59:59),
            datetime!(2025-04-01 00:00),
            datetime!(2025-04-15 12:00),
            datetime!(2025-05-01 00:00),
        ] {
            store.create(new_transaction(1, "A95", date, 1)).unwrap();
        }

        let got = store
            .get_query(&TransactionQuery::between(
                Some(datetime!(2025-04-01 00:00)),
                Some(datetime!(2025-05-01 00:00)),
            ))
            .unwrap();

        let dates: Vec<_> = got.iter().map(|t| t.transaction_date).collect();
        assert_eq!(
            dates,
            vec![datetime!(2025-04-01 00:00), datetime!(2025-04-15 12:00)]
        );
    }

    #[test]
    fn after_date_excludes_the_bound() {
        let mut store = get_store();
        for date in [
            datetime!(2025-04-01 12:00),
            datetime!(2025-04-01 12:00:01),
            datetime!(2025-04-02 00:00),
        ] {
            store.create(new_transaction(1, "A95", date, 1)).unwrap();
        }

        let query = TransactionQuery {
            after_date: Some(datetime!(2025-04-01 12:00)),
            ..Default::default()
        };
        let got = store.get_query(&query).unwrap();

        let dates: Vec<_> = got.iter().map(|t| t.transaction_date).collect();
        assert_eq!(
            dates,
            vec![datetime!(2025-04-01 12:00:01), datetime!(2025-04-02 00:00)]
        );
        assert_eq!(store.count(&query).unwrap(), 2);
    }

    #[test]
    fn filters_by_user_and_fuel_type() {
        let mut store = get_store();
        let date = datetime!(2025-04-01 10:00);
        store.create(new_transaction(1, "A95", date, 1)).unwrap();
        store.create(new_transaction(2, "Diesel", date, 2)).unwrap();
        store.create(new_transaction(1, "A95", date, 2)).unwrap();

        let query = TransactionQuery {
            user_id: Some(UserID::new(2)),
            fuel_type_name: Some("A95".to_owned()),
            ..Default::default()
        };
        let got = store.get_query(&query).unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].user_id, UserID::new(2));
        assert_eq!(got[0].fuel_type_name, "A95");
        assert_eq!(store.count(&query).unwrap(), 1);
    }

    #[test]
    fn sorts_newest_first_and_pages() {
        let mut store = get_store();
        for day in 1..=5u8 {
            let date = datetime!(2025-04-01 08:00).replace_day(day).unwrap();
            store.create(new_transaction(1, "A95", date, 1)).unwrap();
        }

        let query = TransactionQuery {
            sort: Some(SortOrder::DateDescending),
            limit: Some(2),
            offset: 2,
            ..Default::default()
        };
        let got = store.get_query(&query).unwrap();

        let days: Vec<u8> = got.iter().map(|t| t.transaction_date.day()).collect();
        assert_eq!(days, vec![3, 2]);
        assert_eq!(store.count(&query).unwrap(), 5);
    }
}
