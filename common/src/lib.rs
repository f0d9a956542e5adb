//! TokenSwap Common Types
//!
//! This crate contains the value types shared by the swap form core and the
//! price feed: symbols, priced instruments, the price catalog snapshot,
//! identifiers and the validation error taxonomy.

pub mod catalog;
pub mod error;
pub mod identifiers;
pub mod instrument;
pub mod time;

pub use catalog::*;
pub use error::*;
pub use identifiers::*;
pub use instrument::*;
pub use time::*;
