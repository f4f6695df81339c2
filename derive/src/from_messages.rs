use std::collections::BTreeMap;

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Field, Ident, LitInt, Result, Type};

/// How a struct field stores the messages routed to it.
enum Collection {
    /// The latest message replaces any earlier one.
    Latest,
    /// Every message is appended.
    All,
}

struct Route {
    field: Ident,
    number: u16,
    collection: Collection,
}

pub(crate) fn expand_from_messages(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new_spanned(
            input,
            "`FromMessages` may only be derived on structs.",
        ))?
    };

    let mut routes = BTreeMap::new();

    for field in &data.fields {
        let Some((route, literal)) = route(field)? else {
            continue;
        };

        if routes.insert(route.number, route).is_some() {
            Err(Error::new_spanned(
                literal,
                "Each message number may be routed to one field only.",
            ))?
        }
    }

    let arms = routes.values().map(|route| {
        let Route {
            field,
            number,
            collection,
        } = route;

        let receiver = match collection {
            Collection::Latest => quote! {
                self.#field.insert(::core::default::Default::default())
            },
            Collection::All => quote! {{
                self.#field.push(::core::default::Default::default());
                match self.#field.last_mut() {
                    Some(message) => message,
                    None => return None,
                }
            }},
        };

        quote! {
            #number => Some(#receiver),
        }
    });

    let name = &input.ident;
    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::chainring::avec::FromMessages for #name #type_generics #where_clause {
            fn add_message(
                &mut self,
                number: u16,
            ) -> Option<&mut dyn ::chainring::avec::FromMessage> {
                match number {
                    #(#arms)*
                    _ => None,
                }
            }
        }
    };

    Ok(expanded.into())
}

/// Read the `message(N)` attribute of a struct field, if present.
fn route(field: &Field) -> Result<Option<(Route, LitInt)>> {
    let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("message")) else {
        return Ok(None);
    };

    let Some(ident) = &field.ident else {
        Err(Error::new_spanned(field, "Routed fields must be named."))?
    };

    let literal = attr.parse_args::<LitInt>()?;
    let number = literal.base10_parse::<u16>()?;

    let collection = match last_segment(&field.ty) {
        Some(segment) if segment == "Option" => Collection::Latest,
        Some(segment) if segment == "Vec" => Collection::All,
        _ => Err(Error::new_spanned(
            &field.ty,
            "Routed fields must have an `Option<T>` or `Vec<T>` type.",
        ))?,
    };

    let route = Route {
        field: ident.clone(),
        number,
        collection,
    };

    Ok(Some((route, literal)))
}

fn last_segment(ty: &Type) -> Option<&Ident> {
    let Type::Path(path) = ty else {
        return None;
    };

    path.path.segments.last().map(|s| &s.ident)
}
