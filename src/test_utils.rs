/// Test Utilities Module
///
/// Shared testing infrastructure: a recording fake for the data-access
/// layer and a scripted prompter, used by both the in-module unit tests
/// and the integration suites under `tests/`.
use crate::core::db::{BoundStatement, DataAccess, QueryResult, SqlValue};
use crate::core::{MarqueeError, Result};
use crate::input::Prompter;
use std::collections::{HashMap, VecDeque};
use std::io;

/// One call observed by the `RecordingStore`.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Execute {
        statement: &'static str,
        params: Vec<SqlValue>,
    },
    Query {
        statement: &'static str,
        params: Vec<SqlValue>,
    },
    Atomic(Vec<BoundStatement>),
    Close,
}

/// A fake `DataAccess` implementation that records every call.
///
/// By default every write affects one row and every query returns an empty
/// result. Tests can stage per-statement query results and inject failures
/// keyed on a substring of the statement text.
#[derive(Debug, Default)]
pub struct RecordingStore {
    pub calls: Vec<RecordedCall>,
    query_results: HashMap<&'static str, QueryResult>,
    fail_on: Option<&'static str>,
}

impl RecordingStore {
    pub fn new() -> Self {
        RecordingStore::default()
    }

    /// Stages the result returned for a statement whose text contains
    /// `fragment`.
    pub fn stage_query_result(&mut self, fragment: &'static str, result: QueryResult) {
        self.query_results.insert(fragment, result);
    }

    /// Makes any statement whose text contains `fragment` fail with a
    /// Statement error.
    pub fn fail_on(&mut self, fragment: &'static str) {
        self.fail_on = Some(fragment);
    }

    fn should_fail(&self, statement: &str) -> bool {
        self.fail_on.is_some_and(|fragment| statement.contains(fragment))
    }

    fn staged_result(&self, statement: &str) -> QueryResult {
        self.query_results
            .iter()
            .find(|(fragment, _)| statement.contains(*fragment))
            .map(|(_, result)| result.clone())
            .unwrap_or_else(QueryResult::empty)
    }

    /// The statements of every write call, in order, flattening atomic
    /// batches.
    pub fn write_statements(&self) -> Vec<&'static str> {
        self.calls
            .iter()
            .flat_map(|call| match call {
                RecordedCall::Execute { statement, .. } => vec![*statement],
                RecordedCall::Atomic(batch) => batch.iter().map(|s| s.text).collect(),
                _ => Vec::new(),
            })
            .collect()
    }

    /// How many times `close` was called.
    pub fn close_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, RecordedCall::Close))
            .count()
    }
}

impl DataAccess for RecordingStore {
    fn execute(&mut self, statement: &'static str, params: &[SqlValue]) -> Result<u64> {
        self.calls.push(RecordedCall::Execute {
            statement,
            params: params.to_vec(),
        });
        if self.should_fail(statement) {
            return Err(MarqueeError::Statement(format!(
                "staged failure for: {}",
                statement
            )));
        }
        Ok(1)
    }

    fn query(&mut self, statement: &'static str, params: &[SqlValue]) -> Result<QueryResult> {
        self.calls.push(RecordedCall::Query {
            statement,
            params: params.to_vec(),
        });
        if self.should_fail(statement) {
            return Err(MarqueeError::Statement(format!(
                "staged failure for: {}",
                statement
            )));
        }
        Ok(self.staged_result(statement))
    }

    fn execute_atomic(&mut self, statements: &[BoundStatement]) -> Result<u64> {
        self.calls.push(RecordedCall::Atomic(statements.to_vec()));
        for statement in statements {
            if self.should_fail(statement.text) {
                // Nothing from this batch is committed.
                return Err(MarqueeError::Statement(format!(
                    "staged failure for: {}",
                    statement.text
                )));
            }
        }
        Ok(statements.len() as u64)
    }

    fn close(&mut self) {
        self.calls.push(RecordedCall::Close);
    }
}

/// A prompter that replays a fixed script of answers.
#[derive(Debug)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        ScriptedPrompter {
            answers: answers.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&mut self, _label: &str) -> Result<String> {
        self.answers.pop_front().ok_or_else(|| {
            MarqueeError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "script exhausted",
            ))
        })
    }
}
