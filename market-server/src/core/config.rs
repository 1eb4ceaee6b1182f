use std::path::PathBuf;

/// Built-in development secret. Refused outright in production.
pub const DEV_JWT_SECRET: &str = "farmgate-dev-secret-do-not-ship";

/// Server configuration
///
/// # Environment variables
///
/// | variable | default | meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | JWT_SECRET | dev secret | HS256 key shared with the auth service |
/// | JWT_ISSUER | farmgate-auth | expected `iss` claim |
/// | JWT_AUDIENCE | farmgate-market | expected `aud` claim |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/farmgate HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// HS256 verification key for tokens minted by the auth service
    pub jwt_secret: String,
    /// Expected token issuer
    pub jwt_issuer: String,
    /// Expected token audience
    pub jwt_audience: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to their defaults.
    ///
    /// # Panics
    ///
    /// In production, when `JWT_SECRET` is unset: every token would
    /// verify against a publicly known key.
    pub fn from_env() -> Self {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if environment == "production" => {
                panic!("🚨 FATAL: JWT_SECRET must be set in production");
            }
            _ => DEV_JWT_SECRET.to_string(),
        };

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment,
            jwt_secret,
            jwt_issuer: std::env::var("JWT_ISSUER")
                .unwrap_or_else(|_| "farmgate-auth".into()),
            jwt_audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "farmgate-market".into()),
        }
    }

    /// Override the bits tests care about
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Directory the embedded database lives in
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Directory rolling log files land in
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the work directory layout if it is missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
