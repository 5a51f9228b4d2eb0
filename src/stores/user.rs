//! Defines the user store trait.

use crate::{
    Error,
    user::{NewUser, User},
};

/// Handles the creation and retrieval of User objects.
pub trait UserStore {
    /// Create a new user.
    ///
    /// Returns [Error::DuplicateUsername] if the username is already taken.
    fn create(&mut self, user: NewUser) -> Result<User, Error>;

    /// Get a user by their username.
    ///
    /// Returns [Error::NotFound] if no user with the given username exists.
    fn get_by_username(&self, username: &str) -> Result<User, Error>;
}
