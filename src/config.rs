//! Application configuration constants.
//!
//! Centralizes values that would otherwise be hardcoded throughout the
//! codebase: server binding, database path resolution, the seeded genre
//! list and the tuning knobs of genre selection and question generation.

use serde::Deserialize;
use std::path::PathBuf;

// ==================== Database Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Deserialize)]
struct AppConfig {
    database: Option<DatabaseConfig>,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfig {
    path: Option<String>,
}

/// Load database path with priority: config.toml > .env > default
pub fn load_database_path() -> PathBuf {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Priority 1: config.toml
    if let Ok(contents) = std::fs::read_to_string("config.toml") {
        if let Ok(config) = toml::from_str::<AppConfig>(&contents) {
            if let Some(db) = config.database {
                if let Some(path) = db.path {
                    tracing::info!("Using database from config.toml: {}", path);
                    return PathBuf::from(path);
                }
            }
        }
    }

    // Priority 2: .env DATABASE_PATH
    if let Ok(path) = std::env::var("DATABASE_PATH") {
        tracing::info!("Using database from DATABASE_PATH env: {}", path);
        return PathBuf::from(path);
    }

    // Default
    let default = PathBuf::from("data/learning_log.db");
    tracing::info!("Using default database path: {}", default.display());
    default
}

/// Load the Gemini API key from .env or the environment.
///
/// `GEMINI_API_KEY` takes precedence; `GOOGLE_API_KEY` is accepted as a
/// fallback for setups that reuse one key across Google services.
pub fn load_api_key() -> Option<String> {
    let _ = dotenvy::dotenv();
    std::env::var("GEMINI_API_KEY")
        .or_else(|_| std::env::var("GOOGLE_API_KEY"))
        .ok()
        .filter(|k| !k.trim().is_empty())
}

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Server port
pub const SERVER_PORT: u16 = 3000;

/// Get the full server bind address
pub fn server_bind_addr() -> String {
    format!("{}:{}", SERVER_ADDR, SERVER_PORT)
}

// ==================== Session Configuration ====================

/// Session expiration time in hours
pub const SESSION_EXPIRY_HOURS: i64 = 1;

/// Probability threshold for session cleanup (0-255, lower = more frequent)
/// Value of 25 means ~10% chance (25/256) on each session access
pub const SESSION_CLEANUP_THRESHOLD: u8 = 25;

/// Name of the cookie carrying the session ID
pub const SESSION_COOKIE: &str = "quiz_session";

// ==================== Genre Configuration ====================

/// The fixed set of historical-era genres, seeded at first run.
/// Never created or deleted at runtime; "reset" zeroes counts only.
pub const GENRES: [&str; 11] = [
    "古代（縄文・弥生・古墳時代）",
    "飛鳥・奈良時代",
    "平安時代",
    "鎌倉時代",
    "室町時代",
    "安土桃山時代",
    "江戸時代",
    "明治時代",
    "大正時代",
    "昭和時代",
    "平成・令和時代",
];

// ==================== Genre Selection ====================

/// A genre counts as weak below this accuracy percentage
pub const WEAK_ACCURACY_THRESHOLD: f64 = 50.0;

/// Probability of drawing from the weak-genre pool when it is non-empty
pub const WEAK_GENRE_BIAS: f64 = 0.7;

// ==================== Question Generation ====================

/// Gemini model used for question generation
pub const GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Maximum attempts for one generation call (first try + retries)
pub const GENERATION_MAX_ATTEMPTS: u32 = 3;

/// Per-request timeout for the generation call, in seconds
pub const GENERATION_TIMEOUT_SECS: u64 = 60;
