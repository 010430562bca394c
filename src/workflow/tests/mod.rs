//! Unit tests for the reconciliation engine.
