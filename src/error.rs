use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Please fill out all fields.")]
    MissingFields,
    #[error("Amount must be a non-negative number (got '{0}')")]
    InvalidAmount(String),
    #[error("'{0}' is not one of the participants")]
    UnknownParticipant(String),
    #[error("Date must look like YYYY-MM-DD (got '{0}')")]
    InvalidDate(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("stored data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("mongodb: {0}")]
    Mongo(#[from] mongodb::error::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No expenses to export.")]
    NothingToExport,
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("at least one participant is required")]
    NoParticipants,
    #[error("participant '{0}' is listed twice")]
    DuplicateParticipant(String),
    #[error("participant names cannot be blank")]
    BlankParticipant,
}

#[derive(Debug, Error)]
pub enum BookError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
