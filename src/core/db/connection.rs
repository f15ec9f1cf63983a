/// Connection Management Module
///
/// This module provides the PostgreSQL-backed implementation of the
/// data-access layer: connection establishment, statement execution,
/// transactional batches, and the best-effort close.
use crate::core::db::{
    query::{rows_to_result, to_sql_refs},
    BoundStatement, DataAccess, QueryResult, SqlValue,
};
use crate::core::{MarqueeError, Result};
use postgres::{Client, NoTls};
use tracing::debug;

/// Everything needed to reach the database server.
///
/// The password travels separately from the positional CLI arguments; an
/// empty password means trust/peer authentication.
#[derive(Debug, Clone)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

impl ConnectionParams {
    /// A printable form of the connection target, without the password.
    pub fn display_url(&self) -> String {
        format!(
            "postgresql://{}@{}:{}/{}",
            self.user, self.host, self.port, self.dbname
        )
    }
}

/// The PostgreSQL-backed store. Owns the single connection for the whole
/// process lifetime.
pub struct PgStore {
    client: Option<Client>,
}

impl PgStore {
    /// Opens one network connection to the server described by `params`.
    ///
    /// # Errors
    ///
    /// Returns `MarqueeError::Connection` if the server cannot be reached
    /// or refuses the credentials. Callers treat this as fatal; there is
    /// no retry.
    pub fn connect(params: &ConnectionParams) -> Result<Self> {
        let mut config = postgres::Config::new();
        config
            .host(&params.host)
            .port(params.port)
            .dbname(&params.dbname)
            .user(&params.user);
        if !params.password.is_empty() {
            config.password(&params.password);
        }

        let client = config.connect(NoTls).map_err(|e| {
            MarqueeError::Connection(format!(
                "Unable to connect to {}: {}",
                params.display_url(),
                e
            ))
        })?;
        debug!("opened connection to {}", params.display_url());

        Ok(PgStore {
            client: Some(client),
        })
    }

    fn client_mut(&mut self) -> Result<&mut Client> {
        self.client
            .as_mut()
            .ok_or_else(|| MarqueeError::Statement("connection is closed".to_string()))
    }
}

impl DataAccess for PgStore {
    fn execute(&mut self, statement: &'static str, params: &[SqlValue]) -> Result<u64> {
        let client = self.client_mut()?;
        client
            .execute(statement, &to_sql_refs(params))
            .map_err(|e| MarqueeError::Statement(e.to_string()))
    }

    fn query(&mut self, statement: &'static str, params: &[SqlValue]) -> Result<QueryResult> {
        let client = self.client_mut()?;
        // Prepare first so column headers are available even when the
        // result set is empty.
        let prepared = client
            .prepare(statement)
            .map_err(|e| MarqueeError::Statement(format!("Failed to prepare statement: {}", e)))?;
        let rows = client
            .query(&prepared, &to_sql_refs(params))
            .map_err(|e| MarqueeError::Statement(e.to_string()))?;
        rows_to_result(prepared.columns(), &rows)
    }

    fn execute_atomic(&mut self, statements: &[BoundStatement]) -> Result<u64> {
        let client = self.client_mut()?;
        let mut transaction = client
            .transaction()
            .map_err(|e| MarqueeError::Statement(format!("Failed to begin transaction: {}", e)))?;

        let mut affected = 0;
        for statement in statements {
            // Any failure drops the transaction, which rolls back every
            // statement already run in this batch.
            affected += transaction
                .execute(statement.text, &to_sql_refs(&statement.params))
                .map_err(|e| MarqueeError::Statement(e.to_string()))?;
        }

        transaction
            .commit()
            .map_err(|e| MarqueeError::Statement(format!("Failed to commit transaction: {}", e)))?;
        Ok(affected)
    }

    fn close(&mut self) {
        if let Some(client) = self.client.take() {
            if let Err(e) = client.close() {
                debug!("error while closing connection: {}", e);
            }
        }
    }
}

impl Drop for PgStore {
    fn drop(&mut self) {
        self.close();
    }
}
