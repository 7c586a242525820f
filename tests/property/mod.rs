//! Property-based tests

mod reconciliation;
