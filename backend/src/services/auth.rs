//! Authentication service
//!
//! Registration and login with bcrypt password hashing and JWT issuance.

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::models::{Role, User};
use shared::validation;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::services::parse_stored;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    access_token_expiry: i64,
}

/// User row as stored
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
    role: String,
    created_at: chrono::DateTime<Utc>,
}

impl UserRow {
    fn into_model(self) -> AppResult<User> {
        let role: Role = parse_stored(&self.role)?;
        Ok(User {
            id: self.id,
            username: self.username,
            password_hash: self.password_hash,
            role,
            created_at: self.created_at,
        })
    }
}

/// Registration input
#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::Manager
}

/// Login input
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Successful login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// JWT claims issued at login
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    username: String,
    role: String,
    exp: i64,
    iat: i64,
}

impl AuthService {
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.auth.jwt_secret.clone(),
            access_token_expiry: config.auth.access_token_expiry,
        }
    }

    /// Register a new user with a bcrypt-hashed password
    pub async fn register(&self, input: RegisterInput) -> AppResult<User> {
        validation::validate_username(&input.username)
            .map_err(|msg| AppError::validation("username", msg))?;
        validation::validate_password(&input.password)
            .map_err(|msg| AppError::validation("password", msg))?;

        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE username = $1")
                .bind(&input.username)
                .fetch_one(&self.db)
                .await?;

        if existing > 0 {
            return Err(AppError::DuplicateKey("username".to_string()));
        }

        let password_hash = bcrypt::hash(&input.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("password hashing failed: {}", e)))?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password_hash, role, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.username)
        .bind(&password_hash)
        .bind(input.role.as_str())
        .fetch_one(&self.db)
        .await?;

        let user = row.into_model()?;
        tracing::info!(username = %user.username, role = user.role.as_str(), "user registered");
        Ok(user)
    }

    /// Verify credentials and issue a JWT
    pub async fn login(&self, input: LoginInput) -> AppResult<LoginResponse> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash, role, created_at FROM users WHERE username = $1",
        )
        .bind(&input.username)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        let user = row.into_model()?;

        let verified = bcrypt::verify(&input.password, &user.password_hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("password verification failed: {}", e)))?;
        if !verified {
            return Err(AppError::InvalidCredentials);
        }

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role.as_str().to_string(),
            exp: now + self.access_token_expiry,
            iat: now,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("token signing failed: {}", e)))?;

        tracing::info!(username = %user.username, "user logged in");
        Ok(LoginResponse { token, user })
    }
}
