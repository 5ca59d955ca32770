use crate::model::DeriveExtraction;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

impl From<DeriveExtraction> for TokenStream2 {
    fn from(value: DeriveExtraction) -> Self {
        let DeriveExtraction {
            struct_name,
            fields,
        } = value;
        let fields: Vec<TokenStream2> = fields.into_iter().map(TokenStream2::from).collect();

        quote! {
            impl ::byexample::FromMatches for #struct_name {
                #[allow(unused_variables)]
                fn from_matches(
                    matches: &::byexample::Matches,
                ) -> ::std::result::Result<Self, ::byexample::ExtractError> {
                    ::std::result::Result::Ok(Self {
                        #( #fields, )*
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeriveField, ParameterType};
    use proc_macro2::Span;

    fn ident(name: &str) -> syn::Ident {
        syn::Ident::new(name, Span::call_site())
    }

    #[test]
    fn empty() {
        // Setup
        let extraction = DeriveExtraction {
            struct_name: ident("Empty"),
            fields: vec![],
        };

        // Execute
        let token_stream = TokenStream2::from(extraction);

        // Verify
        assert_eq!(
            token_stream.to_string(),
            quote! {
                impl ::byexample::FromMatches for Empty {
                    #[allow(unused_variables)]
                    fn from_matches(
                        matches: &::byexample::Matches,
                    ) -> ::std::result::Result<Self, ::byexample::ExtractError> {
                        ::std::result::Result::Ok(Self {})
                    }
                }
            }
            .to_string()
        );
    }

    #[test]
    fn fields() {
        // Setup
        let extraction = DeriveExtraction {
            struct_name: ident("Connect"),
            fields: vec![
                DeriveField {
                    field_name: ident("verbose"),
                    lookup: "verbose".to_string(),
                    parameter_type: ParameterType::Switch,
                },
                DeriveField {
                    field_name: ident("host"),
                    lookup: "host".to_string(),
                    parameter_type: ParameterType::Scalar,
                },
            ],
        };

        // Execute
        let token_stream = TokenStream2::from(extraction);

        // Verify
        assert_eq!(
            token_stream.to_string(),
            quote! {
                impl ::byexample::FromMatches for Connect {
                    #[allow(unused_variables)]
                    fn from_matches(
                        matches: &::byexample::Matches,
                    ) -> ::std::result::Result<Self, ::byexample::ExtractError> {
                        ::std::result::Result::Ok(Self {
                            verbose: matches.include("verbose"),
                            host: matches.require("host")?,
                        })
                    }
                }
            }
            .to_string()
        );
    }
}
