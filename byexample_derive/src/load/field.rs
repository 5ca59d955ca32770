use crate::model::{DeriveField, IntermediateAttributes, ParameterType};
use syn::ext::IdentExt;
use syn::spanned::Spanned;

use super::invalid;

impl TryFrom<&syn::Field> for DeriveField {
    type Error = syn::Error;

    fn try_from(value: &syn::Field) -> Result<Self, Self::Error> {
        let field_name = match &value.ident {
            Some(ident) => ident.clone(),
            None => {
                return Err(invalid(
                    value.span(),
                    "FromMatches requires named fields",
                ))
            }
        };

        let mut attributes = IntermediateAttributes::default();
        for attribute in &value.attrs {
            if attribute.path().is_ident("byexample") {
                let IntermediateAttributes { singletons, pairs } =
                    IntermediateAttributes::try_from(attribute)?;
                attributes.singletons.extend(singletons);
                for (key, values) in pairs {
                    attributes.pairs.entry(key).or_default().extend(values);
                }
            }
        }

        if let Some(singleton) = attributes.singletons.iter().next() {
            return Err(invalid(
                value.span(),
                format!("unknown attribute `{singleton}` on field '{field_name}'"),
            ));
        }

        let mut lookup = None;
        for (key, values) in &attributes.pairs {
            match (key.as_str(), values.as_slice()) {
                ("name", [single]) => {
                    let literal: syn::LitStr =
                        syn::parse2(single.tokens.clone()).map_err(|_| {
                            invalid(
                                value.span(),
                                format!("`name` on field '{field_name}' must be a string literal"),
                            )
                        })?;
                    lookup.replace(literal.value());
                }
                ("name", _) => {
                    return Err(invalid(
                        value.span(),
                        format!("`name` on field '{field_name}' may only be given once"),
                    ));
                }
                (other, _) => {
                    return Err(invalid(
                        value.span(),
                        format!("unknown attribute `{other}` on field '{field_name}'"),
                    ));
                }
            }
        }

        let parameter_type = match &value.ty {
            syn::Type::Path(type_path) => match type_path.path.segments.last() {
                Some(segment) => match segment.ident.to_string().as_str() {
                    "bool" => ParameterType::Switch,
                    "Option" => ParameterType::Optional,
                    "Vec" => ParameterType::Collection,
                    _ => ParameterType::Scalar,
                },
                None => ParameterType::Scalar,
            },
            _ => ParameterType::Scalar,
        };

        Ok(DeriveField {
            lookup: lookup.unwrap_or_else(|| field_name.unraw().to_string()),
            field_name,
            parameter_type,
        })
    }
}
