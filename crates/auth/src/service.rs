use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::domain::UserId;
use storage::{NewUser, Storage, UserRecord, UserUpdate};
use thiserror::Error;
use tracing::info;

use crate::{
    hash::{hash_password, verify_password},
    jwt::{mint_token, TokenConfig},
};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email ya registrado")]
    EmailTaken,
    #[error("Email inválido")]
    UnknownEmail,
    #[error("Contraseña inválida")]
    WrongPassword,
    #[error("Usuario no encontrado")]
    UserNotFound,
    #[error("Token requerido")]
    TokenMissing,
    #[error("Token inválido")]
    TokenInvalid,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Public view of a user; never carries the password digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub phone_alt: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for UserProfile {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            email: record.email,
            phone: record.phone,
            phone_alt: record.phone_alt,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    #[serde(default)]
    pub phone_alt: Option<String>,
}

/// Partial update; a `password` value is re-digested before storage.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub phone_alt: Option<String>,
}

#[derive(Clone)]
pub struct AuthService {
    storage: Storage,
    tokens: TokenConfig,
}

impl AuthService {
    pub fn new(storage: Storage, tokens: TokenConfig) -> Self {
        Self { storage, tokens }
    }

    pub fn tokens(&self) -> &TokenConfig {
        &self.tokens
    }

    pub async fn register(&self, input: RegisterInput) -> Result<UserProfile, AuthError> {
        if self.storage.find_by_email(&input.email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }
        let record = self
            .storage
            .create_user(NewUser {
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                password_hash: hash_password(&input.password),
                phone: input.phone,
                phone_alt: input.phone_alt,
            })
            .await?;
        info!(user_id = record.id.0, "user registered");
        Ok(record.into())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(UserProfile, String), AuthError> {
        let record = self
            .storage
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UnknownEmail)?;
        if !verify_password(password, &record.password_hash) {
            return Err(AuthError::WrongPassword);
        }
        let token = mint_token(&self.tokens, record.id).map_err(anyhow::Error::from)?;
        info!(user_id = record.id.0, "user logged in");
        Ok((record.into(), token))
    }

    pub async fn list(&self) -> Result<Vec<UserProfile>, AuthError> {
        let users = self.storage.list_users().await?;
        Ok(users.into_iter().map(UserProfile::from).collect())
    }

    pub async fn get(&self, id: UserId) -> Result<UserProfile, AuthError> {
        let record = self
            .storage
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        Ok(record.into())
    }

    pub async fn update(&self, id: UserId, input: UpdateInput) -> Result<UserProfile, AuthError> {
        let update = UserUpdate {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password_hash: input.password.as_deref().map(hash_password),
            phone: input.phone,
            phone_alt: input.phone_alt,
        };
        let touched = self.storage.update_user(id, update).await?;
        if touched == 0 {
            return Err(AuthError::UserNotFound);
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: UserId) -> Result<(), AuthError> {
        let deleted = self.storage.delete_user(id).await?;
        if deleted == 0 {
            return Err(AuthError::UserNotFound);
        }
        info!(user_id = id.0, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
