use crate::model::{DeriveExtraction, DeriveField};
use syn::spanned::Spanned;

use super::invalid;

impl TryFrom<syn::DeriveInput> for DeriveExtraction {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        for attribute in &value.attrs {
            if attribute.path().is_ident("byexample") {
                return Err(invalid(
                    attribute.span(),
                    "#[byexample(..)] is only supported on fields",
                ));
            }
        }

        if !value.generics.params.is_empty() {
            return Err(invalid(
                value.generics.span(),
                "FromMatches cannot be derived for a generic struct",
            ));
        }

        match value.data {
            syn::Data::Struct(syn::DataStruct {
                fields: syn::Fields::Named(named),
                ..
            }) => {
                let fields = named
                    .named
                    .iter()
                    .map(DeriveField::try_from)
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(DeriveExtraction {
                    struct_name: value.ident,
                    fields,
                })
            }
            syn::Data::Struct(_) => Err(invalid(
                value.ident.span(),
                "FromMatches requires a struct with named fields",
            )),
            _ => Err(invalid(
                value.ident.span(),
                "FromMatches can only be derived for a struct",
            )),
        }
    }
}
