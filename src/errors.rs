//! Unified application error type.
//! All modules (api, core, store, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Local state store
    // ---------------------------
    #[error("State store error: {0}")]
    Store(#[from] rusqlite::Error),

    // ---------------------------
    // Remote API
    // ---------------------------
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server rejected the request ({status}): {message}")]
    Api { status: u16, message: String },

    // ---------------------------
    // Parsing and validation
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid attendance record: {0}")]
    InvalidRecord(String),

    #[error("Invalid leave type: {0}. Use vacation, sick, personal, maternity or paternity")]
    InvalidLeaveType(String),

    #[error("Missing required option: {0}")]
    MissingOption(&'static str),

    // ---------------------------
    // Session state
    // ---------------------------
    #[error("Already checked in today at {0}")]
    AlreadyCheckedIn(String),

    #[error("No open check-in found for today")]
    NotCheckedIn,

    #[error("Already checked out today at {0}")]
    AlreadyCheckedOut(String),

    #[error("No employee configured. Run 'emsclock init --employee-id <ID> --name <NAME>' first")]
    NoEmployee,

    // ---------------------------
    // Leave requests
    // ---------------------------
    #[error("Leave request not found: {0}")]
    LeaveNotFound(String),

    #[error("Only pending leave requests can be cancelled (status is {0})")]
    LeaveNotCancellable(String),

    // ---------------------------
    // Config and export
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
