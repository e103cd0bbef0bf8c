use anyhow::Result;
use chrono::NaiveTime;
use std::env;
use std::str::FromStr;

use crate::reporting::{HolidayCalendar, WorkRules};

/// Where attendance and HR records come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Postgres,
    /// Generated data held in memory for demos.
    Mock,
}

impl FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(DataSource::Postgres),
            "mock" | "memory" => Ok(DataSource::Mock),
            _ => Err(format!("Invalid data source: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub client_base_url: String,
    pub data_source: DataSource,
    pub mock_seed: u64,
    pub workday_start: NaiveTime,
    pub workday_end: NaiveTime,
    pub break_minutes: u32,
    pub late_grace_minutes: u32,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn time_or(key: &str, hour: u32) -> NaiveTime {
    let default = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
    env::var(key)
        .ok()
        .and_then(|value| NaiveTime::parse_from_str(value.trim(), "%H:%M").ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_env_only()
    }

    /// Load configuration from environment variables only (without loading .env files)
    /// This is useful for testing where you want to control the environment directly
    pub fn from_env_only() -> Result<Self> {
        Ok(Config {
            database_url: var_or("DATABASE_URL", "postgres://@localhost:5432/kwanza_erp"),
            host: var_or("HOST", "127.0.0.1"),
            port: parse_or("PORT", 8080),
            environment: var_or("ENVIRONMENT", "development"),
            client_base_url: var_or("CLIENT_BASE_URL", "http://localhost:3000"),
            data_source: parse_or("DATA_SOURCE", DataSource::Mock),
            mock_seed: parse_or("MOCK_SEED", 42),
            workday_start: time_or("WORKDAY_START", 8),
            workday_end: time_or("WORKDAY_END", 17),
            break_minutes: parse_or("BREAK_MINUTES", 60),
            late_grace_minutes: parse_or("LATE_GRACE_MINUTES", 0),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.is_development() {
            "debug"
        } else if self.is_production() {
            "warn,kwanza_erp=info"
        } else {
            "info"
        }
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Classifier rules for the configured workday, with Angolan holidays.
    pub fn work_rules(&self) -> WorkRules {
        WorkRules {
            shift_start: self.workday_start,
            shift_end: self.workday_end,
            break_minutes: self.break_minutes,
            late_grace_minutes: self.late_grace_minutes,
            holidays: HolidayCalendar::angola(),
        }
    }
}
