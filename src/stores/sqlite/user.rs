//! Implements a SQLite backed user store.
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    stores::UserStore,
    user::{NewUser, User, map_user_row},
};

use super::{is_unique_violation, lock};

/// Handles the creation and retrieval of User objects.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new user store.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl UserStore for SQLiteUserStore {
    /// Create and insert a new user into the database.
    ///
    /// # Errors
    ///
    /// Returns [Error::DuplicateUsername] if the username is taken, or
    /// [Error::SqlError] if another SQL related error occurred.
    fn create(&mut self, user: NewUser) -> Result<User, Error> {
        lock(&self.connection)?
            .prepare(
                "INSERT INTO user (username, password, role) VALUES (?1, ?2, ?3)
                 RETURNING id, username, password, role",
            )?
            .query_row(
                (
                    &user.username,
                    user.password_hash.as_ref(),
                    user.role.as_str(),
                ),
                map_user_row,
            )
            .map_err(|error| {
                if is_unique_violation(&error) {
                    Error::DuplicateUsername(user.username.clone())
                } else {
                    error.into()
                }
            })
    }

    /// Get the user from the database that has the specified `username`.
    ///
    /// # Errors
    ///
    /// Returns a [Error::NotFound] error if there is no user with the specified username or
    /// [Error::SqlError] if there are SQL related errors.
    fn get_by_username(&self, username: &str) -> Result<User, Error> {
        lock(&self.connection)?
            .prepare("SELECT id, username, password, role FROM user WHERE username = :username")?
            .query_row(&[(":username", &username)], map_user_row)
            .map_err(|error| error.into())
    }
}
