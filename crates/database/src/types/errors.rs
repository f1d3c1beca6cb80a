//! Error types for the database layer

use thiserror::Error;

/// General database error
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database query error: {0}")]
    QueryError(sqlx::Error),

    #[error("Database migration error: {0}")]
    MigrationError(String),

    /// A UNIQUE constraint rejected the write.
    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    /// A FOREIGN KEY constraint rejected the write.
    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    /// A stored value could not be decoded into its domain type.
    #[error("Invalid stored data: {0}")]
    InvalidData(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_error) = &error {
            if db_error.is_unique_violation() {
                return DatabaseError::Duplicate(db_error.message().to_string());
            }
            if db_error.is_foreign_key_violation() {
                return DatabaseError::ForeignKey(db_error.message().to_string());
            }
        }
        DatabaseError::QueryError(error)
    }
}

impl From<sqlx::migrate::MigrateError> for DatabaseError {
    fn from(error: sqlx::migrate::MigrateError) -> Self {
        DatabaseError::MigrationError(error.to_string())
    }
}
