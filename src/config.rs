use std::env;

use crate::domain::services::reporting::DEFAULT_BASE_PRICE;

/// `DATABASE_URL` value that keeps the persistent collections in process memory.
pub const MEMORY_DATABASE_URL: &str = "memory";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub port: u16,
    pub base_price: f64, // Simulated revenue per confirmed booking
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://booking-demo.db?mode=rwc".to_string()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            base_price: env::var("BASE_PRICE")
                .map(|raw| raw.parse().expect("BASE_PRICE must be a number"))
                .unwrap_or(DEFAULT_BASE_PRICE),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string()),
        }
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }
}
