//! MySQL repository implementations

mod account_repository_impl;
mod auction_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use auction_repository_impl::MySqlAuctionRepository;

use sqlx::mysql::MySqlRow;
use sqlx::Row;

use eb_core::errors::DomainError;

/// Wrap a driver error with what was being attempted
pub(crate) fn internal(context: &str, error: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: format!("{}: {}", context, error),
    }
}

/// Read one column, reporting the column name on failure
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    row.try_get(name)
        .map_err(|e| internal(&format!("Failed to get {}", name), e))
}

/// Name of the unique index a write collided with, if any
///
/// MySQL reports `Duplicate entry '..' for key 'table.index'` (8.0.19+) or
/// `.. for key 'index'` (older servers).
pub(crate) fn violated_unique_key(error: &sqlx::Error) -> Option<String> {
    let db_error = error.as_database_error()?;
    if !db_error.is_unique_violation() {
        return None;
    }
    unique_key_from_message(db_error.message())
}

pub(crate) fn unique_key_from_message(message: &str) -> Option<String> {
    let (_, tail) = message.rsplit_once("for key '")?;
    let key = tail.split('\'').next()?;
    let key = key.rsplit('.').next().unwrap_or(key);
    Some(key.to_string())
}

/// `%needle%` with LIKE metacharacters escaped
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.trim().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
