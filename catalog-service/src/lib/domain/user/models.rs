use std::fmt;

use crate::user::errors::UserError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Represents a registered account able to obtain bearer tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: String,
}

/// User unique identifier type, assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is non-blank and at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MAX_LENGTH: usize = 255;

    /// Create a new valid username.
    ///
    /// # Arguments
    /// * `username` - Raw username string
    ///
    /// # Returns
    /// Validated Username value object
    ///
    /// # Errors
    /// * `Blank` - Username is empty or whitespace only
    /// * `TooLong` - Username longer than 255 characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        if username.trim().is_empty() {
            return Err(UsernameError::Blank);
        }

        let length = username.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(username))
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User ready to be inserted; the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: String,
}

impl NewUser {
    /// Attach the identifier assigned by the store.
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            password_hash: self.password_hash,
        }
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub password: String,
}

impl RegisterUserCommand {
    /// Construct a new registration command.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `password` - Plain text password (will be hashed by service)
    ///
    /// # Errors
    /// * `MissingPassword` - Password is empty
    pub fn new(username: Username, password: String) -> Result<Self, UserError> {
        if password.is_empty() {
            return Err(UserError::MissingPassword);
        }

        Ok(Self { username, password })
    }
}

/// Raw login credentials.
///
/// The username is deliberately not validated: a malformed username is
/// treated exactly like an unknown one.
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Bearer token handed out on successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub access_token: String,
    pub expires_in: i64,
}

/// Account created at startup when it does not exist yet.
#[derive(Debug, Clone)]
pub struct SeedUser {
    pub username: Username,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_validation() {
        assert!(Username::new("admin".to_string()).is_ok());
        assert_eq!(Username::new("  ".to_string()), Err(UsernameError::Blank));
        assert!(matches!(
            Username::new("a".repeat(256)),
            Err(UsernameError::TooLong { max: 255, .. })
        ));
    }

    #[test]
    fn test_register_command_requires_password() {
        let username = Username::new("alice".to_string()).unwrap();
        assert!(matches!(
            RegisterUserCommand::new(username, String::new()),
            Err(UserError::MissingPassword)
        ));
    }
}
