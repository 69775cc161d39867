//! Core data types for the trending-token alert pipeline.

pub mod subscriber;
pub mod threshold;
pub mod token;

pub use subscriber::*;
pub use threshold::*;
pub use token::*;
