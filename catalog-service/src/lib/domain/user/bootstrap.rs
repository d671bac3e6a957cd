use auth::PasswordHasher;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::SeedUser;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Create the seed account unless it already exists.
///
/// Safe to run on every start. A concurrent insert of the same username
/// counts as already present.
///
/// # Returns
/// `true` when the account was created by this call
///
/// # Errors
/// * `Password` - Password hashing failed
/// * `DatabaseError` - Database operation failed
pub async fn ensure_seed_user<UR>(
    repository: &UR,
    hasher: &PasswordHasher,
    seed: &SeedUser,
) -> Result<bool, UserError>
where
    UR: UserRepository + ?Sized,
{
    if repository.find_by_username(&seed.username).await?.is_some() {
        tracing::debug!(username = %seed.username, "Seed user already present");
        return Ok(false);
    }

    let password_hash = hasher.hash(&seed.password)?;

    match repository
        .create(NewUser {
            username: seed.username.clone(),
            password_hash,
        })
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = %user.id, username = %user.username, "Seed user created");
            Ok(true)
        }
        Err(UserError::UsernameAlreadyExists(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::user::models::Username;
    use crate::outbound::repositories::memory::InMemoryUserRepository;

    fn seed() -> SeedUser {
        SeedUser {
            username: Username::new("admin".to_string()).unwrap(),
            password: "password".to_string(),
        }
    }

    #[tokio::test]
    async fn test_seed_user_created_once() {
        let repository = Arc::new(InMemoryUserRepository::new());
        let hasher = PasswordHasher::new();

        assert!(ensure_seed_user(repository.as_ref(), &hasher, &seed())
            .await
            .unwrap());
        assert!(!ensure_seed_user(repository.as_ref(), &hasher, &seed())
            .await
            .unwrap());

        let stored = repository
            .find_by_username(&seed().username)
            .await
            .unwrap()
            .expect("seed user stored");
        assert!(hasher.verify("password", &stored.password_hash).unwrap());
        assert_eq!(repository.count().await, 1);
    }
}
