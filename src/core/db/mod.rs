/// Database Module
///
/// This module provides the data-access layer for marquee, organized into
/// focused submodules:
///
/// - **Connection Management** (`connection.rs`): the PostgreSQL-backed
///   store, its connection lifecycle, and transactional execution
/// - **Values and Results** (`query.rs`): typed bound parameters and the
///   in-memory representation of SELECT results
///
/// All database operations use the standardized `MarqueeError` type for
/// consistent error propagation.
pub mod connection;
pub mod query;

pub use connection::*;
pub use query::*;

use crate::core::Result;

/// A statement template paired with the values bound to its placeholders.
///
/// The template is `&'static str` on purpose: statement text is fixed at
/// compile time, so runtime input cannot become part of it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundStatement {
    pub text: &'static str,
    pub params: Vec<SqlValue>,
}

impl BoundStatement {
    pub fn new(text: &'static str, params: Vec<SqlValue>) -> Self {
        BoundStatement { text, params }
    }
}

/// The contract between menu handlers and the database.
///
/// Handlers are written against this trait so tests can substitute a
/// recording fake for the real PostgreSQL-backed store.
pub trait DataAccess {
    /// Runs an INSERT/UPDATE/DELETE with the given bound parameters and
    /// returns the number of rows affected.
    fn execute(&mut self, statement: &'static str, params: &[SqlValue]) -> Result<u64>;

    /// Runs a SELECT with the given bound parameters and returns its rows
    /// and column headers.
    fn query(&mut self, statement: &'static str, params: &[SqlValue]) -> Result<QueryResult>;

    /// Runs several statements inside one transaction. A failure of any
    /// statement rolls back the whole batch; success commits it. Returns
    /// the total number of rows affected.
    fn execute_atomic(&mut self, statements: &[BoundStatement]) -> Result<u64>;

    /// Releases the connection. Idempotent and non-throwing; failures are
    /// logged at debug level.
    fn close(&mut self);
}
