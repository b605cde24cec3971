/// Primary keys are UUIDs issued by the auth provider (accounts) or
/// generated by the database (everything else).
pub type EntityId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
