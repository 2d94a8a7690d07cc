//! Error types for datelex operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DateError {
    #[error("Invalid locale registration: {0}")]
    InvalidConfig(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time modifier: {0}")]
    InvalidModifier(String),

    #[error("Invalid date format: {0}")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, DateError>;
