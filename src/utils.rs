use crate::constants::DEFAULT_DATA_FILE;
use std::path::PathBuf;

/// Get the price CSV path from environment variable or use default
pub fn get_data_file() -> PathBuf {
    std::env::var("CRYPTO_DATA_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE))
}
