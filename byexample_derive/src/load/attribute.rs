use crate::model::{DeriveValue, IntermediateAttributes};
use quote::ToTokens;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::Token;

use super::invalid;

impl TryFrom<&syn::Attribute> for IntermediateAttributes {
    type Error = syn::Error;

    fn try_from(value: &syn::Attribute) -> Result<Self, Self::Error> {
        let mut attributes = IntermediateAttributes::default();

        // `#[byexample]` with no arguments.
        if let syn::Meta::Path(_) = value.meta {
            return Ok(attributes);
        }

        let expressions =
            value.parse_args_with(Punctuated::<syn::Expr, Token![,]>::parse_terminated)?;

        for expression in expressions {
            match expression {
                syn::Expr::Assign(assign) => {
                    let key = single_ident(&assign.left)?;
                    attributes
                        .pairs
                        .entry(key)
                        .or_default()
                        .push(DeriveValue {
                            tokens: assign.right.to_token_stream(),
                        });
                }
                syn::Expr::Path(_) => {
                    let key = single_ident(&expression)?;
                    attributes.singletons.insert(key);
                }
                other => {
                    return Err(invalid(
                        other.span(),
                        "expected `key = value` or `key` in #[byexample(..)]",
                    ));
                }
            }
        }

        Ok(attributes)
    }
}

fn single_ident(expression: &syn::Expr) -> Result<String, syn::Error> {
    match expression {
        syn::Expr::Path(path) => match path.path.get_ident() {
            Some(ident) => Ok(ident.to_string()),
            None => Err(invalid(path.span(), "expected a plain identifier")),
        },
        other => Err(invalid(other.span(), "expected a plain identifier")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;
    use std::collections::{HashMap, HashSet};
    use syn::parse_quote;

    #[test]
    fn empty() {
        // Setup
        let input: syn::Attribute = parse_quote! { #[byexample] };

        // Execute
        let attributes = IntermediateAttributes::try_from(&input).unwrap();

        // Verify
        assert_eq!(attributes, IntermediateAttributes::default());
    }

    #[test]
    fn pairs_and_singletons() {
        // Setup
        let input: syn::Attribute = parse_quote! { #[byexample(name = "retries", skip, name = "r")] };

        // Execute
        let attributes = IntermediateAttributes::try_from(&input).unwrap();

        // Verify
        assert_eq!(
            attributes,
            IntermediateAttributes {
                singletons: HashSet::from(["skip".to_string()]),
                pairs: HashMap::from([(
                    "name".to_string(),
                    vec![
                        DeriveValue {
                            tokens: quote! { "retries" },
                        },
                        DeriveValue {
                            tokens: quote! { "r" },
                        },
                    ]
                )]),
            }
        );
    }

    #[test]
    fn invalid_expression() {
        // Setup
        let input: syn::Attribute = parse_quote! { #[byexample(1 + 2)] };

        // Execute
        let error = IntermediateAttributes::try_from(&input).unwrap_err();

        // Verify
        assert_eq!(
            error.to_string(),
            "Invalid - expected `key = value` or `key` in #[byexample(..)]."
        );
    }

    #[test]
    fn invalid_key() {
        // Setup
        let input: syn::Attribute = parse_quote! { #[byexample(a::b = "c")] };

        // Execute
        let error = IntermediateAttributes::try_from(&input).unwrap_err();

        // Verify
        assert_eq!(error.to_string(), "Invalid - expected a plain identifier.");
    }
}
