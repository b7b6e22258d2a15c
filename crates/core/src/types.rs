/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// External account identity, drawn from a dedicated database sequence.
pub type AccountNumber = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
