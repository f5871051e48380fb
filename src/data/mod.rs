//! Data layer: core types, parsing, and writing of the tilt text format.
//!
//! ```text
//!   ID: A
//!   x: 0
//!   y: 12.5
//!   1.0,2.0
//!   3.0,4.0
//!
//!   ID: B
//!   ...
//! ```

pub mod error;
pub mod loader;
pub mod model;
pub mod writer;
