//! Database repositories for data access layer
//
// Connection pool setup
pub mod pool;
//
// Transaction utilities
pub mod transaction;
//
// Deduplicated user table written by the populate-users job
pub mod users;
