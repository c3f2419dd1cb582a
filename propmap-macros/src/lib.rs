//! `#[derive(Typed)]` for propmap.
//!
//! Use it through the `propmap` crate, which re-exports it next to the trait.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod expand;
mod parse;

/// Derives `Typed` for a struct with named fields or a fieldless enum.
///
/// For structs it also derives `Record` and `Updatable`, and adds one `Field` token per
/// field as an associated constant named after the field in upper case.
///
/// # Attributes
///
/// On the struct:
///
/// - `#[propmap(updatable)]`: every field may appear in a validated patch.
/// - `#[propmap(crate = "path")]`: where the `propmap` crate lives (default `::propmap`).
///
/// On a field:
///
/// - `#[propmap(updatable)]`: the field may appear in a validated patch.
/// - `#[propmap(updatable, mapped)]`: the field holds a nested record whose own
///   updatable fields are validated recursively. The field type must be `Updatable`.
/// - `#[propmap(default)]` / `#[propmap(default = expr)]`: value used when building
///   from a map that does not supply the field.
/// - `#[propmap(rename = "key")]`: key of the field in property maps.
///
/// Each field also gets an associated `Field` constant named after it in upper case.
/// Fields named `shape` or `update_schema` are rejected since their constants would
/// shadow `Typed::SHAPE` and `Updatable::UPDATE_SCHEMA`; rename the Rust field and keep
/// the key with `rename`.
///
/// On an enum variant:
///
/// - `#[propmap(rename = "NAME")]`: name of the case in property maps.
///
/// ```ignore
/// use propmap::Typed;
///
/// #[derive(Typed)]
/// struct Customer {
///     id: String,
///     #[propmap(updatable)]
///     name: String,
///     #[propmap(updatable, mapped)]
///     address: Option<Address>,
///     #[propmap(default)]
///     tags: Vec<String>,
/// }
///
/// assert_eq!(Customer::NAME.name(), "name");
/// ```
#[proc_macro_derive(Typed, attributes(propmap))]
pub fn derive_typed(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match parse::parse(&input) {
        Ok(parsed) => expand::expand(parsed).into(),
        Err(err) => err.to_compile_error().into(),
    }
}
