//! Backend-specific DDL and the parameterized statements the store runs.

mod builder;
pub mod dialect;
pub use builder::*;
pub use dialect::*;
