//! sqldeck dispatch - the query orchestration entry point
//!
//! One dispatch resolves a preset, obtains the matching connector, and
//! runs a full connect, query, disconnect cycle, returning the normalized
//! result or the first error encountered.

mod dispatcher;

#[cfg(test)]
mod dispatcher_tests;

pub use dispatcher::Dispatcher;
