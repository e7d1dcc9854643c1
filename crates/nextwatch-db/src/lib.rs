//! Next Watch Database Library
//!
//! Postgres connection setup and the repositories ETL jobs write through.

pub mod db;

pub use db::pool::connect;
pub use db::transaction::TransactionGuard;
pub use db::users::{quote_ident, UserRepository};
