//! Tests for the ListStore trait and its implementations.

mod basic_operations;
