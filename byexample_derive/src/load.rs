mod attribute;
mod extraction;
mod field;

fn invalid(span: proc_macro2::Span, message: impl std::fmt::Display) -> syn::Error {
    syn::Error::new(span, format!("Invalid - {message}."))
}
