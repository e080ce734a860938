use crate::value::{Radix, Value};

use proc_macro2::TokenStream;
use quote::{quote, ToTokens};

impl ToTokens for Radix {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(match self {
            Radix::Binary => quote! { ::sexptree::AtomKind::Binary },
            Radix::Octal => quote! { ::sexptree::AtomKind::Octal },
            Radix::Hex => quote! { ::sexptree::AtomKind::Hex },
        });
    }
}

impl ToTokens for Value {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let expanded = match self {
            Value::Symbol(name) => quote! {
                ::sexptree::Sexp::atom(#name, ::sexptree::AtomKind::Symbol)
            },
            Value::String(text) => quote! { ::sexptree::Sexp::string(#text) },
            Value::Char(text) => quote! {
                ::sexptree::Sexp::atom(#text, ::sexptree::AtomKind::Char)
            },
            Value::Radix(radix, digits) => quote! { ::sexptree::Sexp::atom(#digits, #radix) },
            Value::Literal(lit) => {
                let text = lit.to_string();
                quote! { ::sexptree::Sexp::atom(#text, ::sexptree::AtomKind::Symbol) }
            }
            Value::Negated(lit) => {
                let text = format!("-{}", lit);
                quote! { ::sexptree::Sexp::atom(#text, ::sexptree::AtomKind::Symbol) }
            }
            Value::Unquoted(tt) => quote! { ::sexptree::Sexp::from(#tt) },
            Value::List(elements) => quote! { ::sexptree::Sexp::list(vec![#(#elements),*]) },
            Value::Vector(elements) => quote! { ::sexptree::Sexp::vector(vec![#(#elements),*]) },
            Value::Complex(parts) => quote! { ::sexptree::Sexp::complex(vec![#(#parts),*]) },
        };
        tokens.extend(expanded);
    }
}

pub fn generate(value: Value) -> TokenStream {
    value.into_token_stream()
}
