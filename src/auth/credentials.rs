use std::sync::Arc;

use tracing::info;

use super::password::{hash_password, verify_password};
use super::AuthError;
use crate::database::models::User;
use crate::database::query_builder::SqlValue;
use crate::database::{Repository, Storage};

/// Look up `username` and check `password` against its stored hash.
pub async fn verify_credentials(
    storage: Arc<dyn Storage>,
    username: &str,
    password: &str,
) -> Result<User, AuthError> {
    let user = Repository::<User>::new(storage)
        .select_by_username(username)
        .await?
        .ok_or(AuthError::NotFound)?;

    if verify_password(password, &user.password_hash) {
        Ok(user)
    } else {
        Err(AuthError::InvalidCredentials)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    Created,
    AlreadyExists,
}

/// Create the admin account unless one with `username` already exists.
pub async fn provision_admin(
    storage: Arc<dyn Storage>,
    username: &str,
    password: &str,
) -> Result<Provisioned, AuthError> {
    let users = Repository::<User>::new(storage);
    if users.select_by_username(username).await?.is_some() {
        info!("Admin user {} already exists", username);
        return Ok(Provisioned::AlreadyExists);
    }

    let hash = hash_password(password)?;
    users
        .create(vec![
            ("username", SqlValue::Text(username.to_string())),
            ("password", SqlValue::Text(hash)),
        ])
        .await?;

    info!("Admin user {} created", username);
    Ok(Provisioned::Created)
}
