use std::env;
use std::path::PathBuf;

pub const DEFAULT_ACCESS_CODE: &str = "luxury123";

#[derive(Clone, Debug, PartialEq)]
pub enum StorageBackend {
    Json,
    Sqlite,
}

impl StorageBackend {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => StorageBackend::Sqlite,
            _ => StorageBackend::Json,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub storage: StorageBackend,
    pub database_url: String,
    pub admin_access_code: String,
    pub secure_cookies: bool,
    pub owner_email: String,
    pub smtp: SmtpConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            storage: StorageBackend::parse(&env::var("STORAGE_BACKEND").unwrap_or_default()),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "nailsure.db".to_string()),
            admin_access_code: env::var("ADMIN_ACCESS_CODE")
                .unwrap_or_else(|_| DEFAULT_ACCESS_CODE.to_string()),
            secure_cookies: env::var("COOKIE_SECURE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            owner_email: env::var("OWNER_EMAIL")
                .unwrap_or_else(|_| "owner@nailsure.example".to_string()),
            smtp: SmtpConfig {
                host: env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.example.com".to_string()),
                port: env::var("SMTP_PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(587),
                user: env::var("SMTP_USER").unwrap_or_else(|_| "user".to_string()),
                password: env::var("SMTP_PASS").unwrap_or_else(|_| "pass".to_string()),
            },
        }
    }

    pub fn uses_default_access_code(&self) -> bool {
        self.admin_access_code == DEFAULT_ACCESS_CODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_parse() {
        assert_eq!(StorageBackend::parse("sqlite"), StorageBackend::Sqlite);
        assert_eq!(StorageBackend::parse(" SQLite "), StorageBackend::Sqlite);
        assert_eq!(StorageBackend::parse("json"), StorageBackend::Json);
        assert_eq!(StorageBackend::parse(""), StorageBackend::Json);
        assert_eq!(StorageBackend::parse("postgres"), StorageBackend::Json);
    }
}
