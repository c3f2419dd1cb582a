#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod error;
pub use error::*;

mod check;
pub use check::*;
