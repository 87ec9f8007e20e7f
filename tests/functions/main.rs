//! Integration tests for Layer 2: Functions
//!
//! Tests for the decorators and the timer queue they schedule on.

mod once;
