#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod value;
pub use value::*;

mod set;
pub use set::*;

mod map;
pub use map::*;

mod macros;
