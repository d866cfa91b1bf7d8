use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::domain::UserId;

#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub ttl_seconds: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: i64,
    iat: i64,
    exp: i64,
}

pub fn mint_token(cfg: &TokenConfig, user_id: UserId) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.0,
        iat: now.timestamp(),
        exp: (now + Duration::seconds(cfg.ttl_seconds)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.secret.as_bytes()),
    )
}

pub fn verify_token(cfg: &TokenConfig, token: &str) -> Result<UserId, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(UserId(data.claims.sub))
}
