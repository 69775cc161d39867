//! Persisted state: subscriber set and last-seen token rows.

pub mod db;

pub use db::{Database, StoreError};
