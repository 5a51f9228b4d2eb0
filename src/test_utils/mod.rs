#![allow(missing_docs)]

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{
    PasswordHash,
    db::initialize,
    fuel_type::{FuelType, FuelTypeId},
    register_user::seed_guest_user,
    stores::{
        FuelTypeStore, UserStore,
        sqlite::{SQLiteFuelTypeStore, SQLiteTransactionStore, SQLiteUserStore},
    },
    transaction::TransactionProcessor,
    user::{NewUser, Role, User},
};

pub(crate) type SQLiteProcessor =
    TransactionProcessor<SQLiteFuelTypeStore, SQLiteUserStore, SQLiteTransactionStore>;

/// An in-memory database with the guest user, a member called alice, and
/// two fuel types: A95 at 55.50 and Diesel at 52.30.
pub(crate) struct TestDb {
    connection: Arc<Mutex<Connection>>,
    pub guest: User,
    pub alice: User,
    pub a95: FuelType,
    pub diesel: FuelType,
}

impl TestDb {
    pub fn seeded() -> Self {
        let conn =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");
        initialize(&conn).expect("Could not create tables");
        let connection = Arc::new(Mutex::new(conn));

        let mut users = SQLiteUserStore::new(connection.clone());
        let guest = seed_guest_user(&mut users).expect("Could not seed guest user");
        let alice = users
            .create(NewUser {
                username: "alice".to_owned(),
                password_hash: PasswordHash::new_unchecked("hunter2"),
                role: Role::User,
            })
            .expect("Could not create alice");

        let mut fuel_types = SQLiteFuelTypeStore::new(connection.clone());
        let a95 = fuel_types
            .create("A95", dec!(55.50))
            .expect("Could not create A95");
        let diesel = fuel_types
            .create("Diesel", dec!(52.30))
            .expect("Could not create Diesel");

        Self {
            connection,
            guest,
            alice,
            a95,
            diesel,
        }
    }

    /// A seeded database whose guest user has been removed.
    pub fn without_guest() -> Self {
        let db = Self::seeded();
        db.connection
            .lock()
            .unwrap()
            .execute("DELETE FROM user WHERE id = ?1", [db.guest.id.as_i64()])
            .expect("Could not delete guest user");

        db
    }

    pub fn processor(&self) -> SQLiteProcessor {
        TransactionProcessor::new(
            SQLiteFuelTypeStore::new(self.connection.clone()),
            SQLiteUserStore::new(self.connection.clone()),
            self.transaction_store(),
            "Etc/UTC",
        )
    }

    pub fn transaction_store(&self) -> SQLiteTransactionStore {
        SQLiteTransactionStore::new(self.connection.clone())
    }

    /// Change a catalog price behind the stores' backs.
    pub fn set_price(&self, id: FuelTypeId, price_per_liter: Decimal) {
        self.connection
            .lock()
            .unwrap()
            .execute(
                "UPDATE fuel_type SET price_per_liter = ?1 WHERE id = ?2",
                (price_per_liter.to_string(), id),
            )
            .expect("Could not update price");
    }
}
