#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod tracing_macros;

mod convert;
pub use convert::*;

mod build;
pub use build::*;
