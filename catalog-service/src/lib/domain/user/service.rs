use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Duration;

use crate::domain::user::models::AuthToken;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service for registration and login.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    token_ttl: Duration,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Password hashing and token issuance
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>, token_ttl: Duration) -> Self {
        Self {
            repository,
            authenticator,
            token_ttl,
        }
    }

    async fn stored_hash_for(&self, username: &str) -> Result<Option<String>, UserError> {
        let Ok(username) = Username::new(username.to_string()) else {
            return Ok(None);
        };

        Ok(self
            .repository
            .find_by_username(&username)
            .await?
            .map(|user| user.password_hash))
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        let password_hash = self.authenticator.hash_password(&command.password)?;

        // The store's uniqueness constraint settles concurrent registrations.
        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    async fn login(&self, credentials: Credentials) -> Result<AuthToken, UserError> {
        let stored_hash = self.stored_hash_for(&credentials.username).await?;

        let result = self
            .authenticator
            .authenticate(
                &credentials.password,
                stored_hash.as_deref(),
                &credentials.username,
                self.token_ttl,
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => UserError::from(err),
                AuthenticationError::JwtError(err) => UserError::Token(err.to_string()),
            })?;

        tracing::debug!(username = %credentials.username, "Token issued");

        Ok(AuthToken {
            access_token: result.access_token,
            expires_in: result.expires_in,
        })
    }
}
