use crate::model::{DeriveField, ParameterType};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

impl From<DeriveField> for TokenStream2 {
    fn from(value: DeriveField) -> Self {
        let DeriveField {
            field_name,
            lookup,
            parameter_type,
        } = value;

        match parameter_type {
            ParameterType::Switch => quote! {
                #field_name: matches.include(#lookup)
            },
            ParameterType::Optional => quote! {
                #field_name: matches.extract(#lookup)?
            },
            ParameterType::Collection => quote! {
                #field_name: matches.extract_all(#lookup)?
            },
            ParameterType::Scalar => quote! {
                #field_name: matches.require(#lookup)?
            },
        }
    }
}
