#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod shape;
pub use shape::*;

mod typed;
pub use typed::*;

mod typed_value;
pub use typed_value::*;

mod error;
pub use error::*;

mod field;
pub use field::*;

mod update;
pub use update::*;

// `Typed` implementations for std and chrono types
mod impls;

static_assertions::assert_impl_all!(Shape: Send, Sync);
static_assertions::assert_impl_all!(UpdateSchema: Send, Sync);
static_assertions::assert_impl_all!(ConversionError: Send, Sync);
