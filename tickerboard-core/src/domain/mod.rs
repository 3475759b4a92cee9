//! Domain types: quotes and table columns.

pub mod column;
pub mod quote;

pub use column::{Column, UnknownColumn};
pub use quote::{Magnitude, Passthrough, Quote};
