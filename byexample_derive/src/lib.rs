//! Derive module for `byexample`.
//! See [documentation root](https://docs.rs/byexample/latest/byexample/index.html) for full details.
extern crate proc_macro;

mod generate;
mod load;
mod model;

use crate::model::DeriveExtraction;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;

/// Derive `FromMatches` for a struct with named fields.
///
/// Each field is looked up by its name (or `#[byexample(name = "...")]`):
/// * `bool`: whether the option was present.
/// * `Option<T>`: the value, if any.
/// * `Vec<T>`: every item of a vararg argument.
/// * `T`: the value, which must be present.
#[proc_macro_derive(FromMatches, attributes(byexample))]
pub fn from_matches(input: TokenStream) -> TokenStream {
    let derive_input = syn::parse_macro_input!(input as syn::DeriveInput);

    match DeriveExtraction::try_from(derive_input) {
        Ok(extraction) => TokenStream2::from(extraction).into(),
        Err(error) => error.to_compile_error().into(),
    }
}
