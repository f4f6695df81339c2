use std::collections::BTreeSet;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as Tokens;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Expr, ExprClosure, GenericArgument, Ident, LitStr, Pat,
    PathArguments, Result, Token, Type,
    parse::{Parse, ParseStream},
};

/// What a struct field receives.
enum Source {
    /// The value of a decoded field, by name.
    Named(LitStr),
    /// The absolute timestamp of the message.
    Time(Ident),
}

/// The arguments of a `field(...)` attribute.
struct Attribute {
    source: Source,
    handler: Option<ExprClosure>,
}

impl Parse for Attribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let source = if input.peek(LitStr) {
            Source::Named(input.parse()?)
        } else {
            let ident = input.parse::<Ident>()?;

            if ident != "time" {
                Err(Error::new_spanned(
                    &ident,
                    "Expected a field name as a string literal, or `time`.",
                ))?
            }

            Source::Time(ident)
        };

        let handler = if input.parse::<Option<Token![,]>>()?.is_some() {
            Some(input.parse()?)
        } else {
            None
        };

        Ok(Self { source, handler })
    }
}

pub(crate) fn expand_from_message(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new_spanned(
            input,
            "`FromMessage` may only be derived on structs.",
        ))?
    };

    let mut names = BTreeSet::new();
    let mut arms = Vec::new();
    let mut time = None;

    for field in &data.fields {
        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("field")) else {
            continue;
        };

        let Some(ident) = &field.ident else {
            Err(Error::new_spanned(field, "Receiving fields must be named."))?
        };

        let Attribute { source, handler } = attr.parse_args()?;

        let (value_type, handler) = match &handler {
            Some(handler) => {
                let (value_type, handler) = accumulator(handler)?;
                (value_type, Some(handler))
            }
            None => (option_inner(&field.ty)?, None),
        };

        let store = |value: Tokens| match &handler {
            Some(Accumulator {
                accumulator,
                parameter,
                body,
            }) => {
                let field_type = &field.ty;
                quote! {
                    (|#accumulator: &mut #field_type, #parameter| { #body })(&mut self.#ident, #value)
                }
            }
            None => quote! { self.#ident = Some(#value) },
        };

        match source {
            Source::Named(name) => {
                if !names.insert(name.value()) {
                    Err(Error::new_spanned(
                        &name,
                        "Each field name may be received once only.",
                    ))?
                }

                let store = store(quote! { value });

                arms.push(quote! {
                    #name => {
                        if let Some(value) =
                            <#value_type as ::chainring::avec::FromValue>::from_value(field.value())
                        {
                            #store;
                        }
                    }
                });
            }
            Source::Time(keyword) => {
                if time.is_some() {
                    Err(Error::new_spanned(
                        keyword,
                        "The timestamp may be received once only.",
                    ))?
                }

                let store = store(quote! { timestamp });

                time = Some(quote! {
                    fn add_timestamp(
                        &mut self,
                        timestamp: ::chainring::chrono::DateTime<::chainring::chrono::Utc>,
                    ) {
                        #store;
                    }
                });
            }
        }
    }

    let name = &input.ident;
    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::chainring::avec::FromMessage for #name #type_generics #where_clause {
            fn add_field(&mut self, field: &::chainring::FieldValue) {
                match field.name() {
                    #(#arms)*
                    _ => {}
                }
            }

            #time
        }
    };

    Ok(expanded.into())
}

/// The parts of an accumulator closure.
struct Accumulator {
    accumulator: Pat,
    parameter: Pat,
    body: Expr,
}

/// Split an accumulator closure, returning the value type named by its
/// second parameter.
fn accumulator(handler: &ExprClosure) -> Result<(Type, Accumulator)> {
    let mut inputs = handler.inputs.iter();

    let (Some(accumulator), Some(parameter), None) = (inputs.next(), inputs.next(), inputs.next())
    else {
        Err(Error::new_spanned(
            handler,
            "Accumulator closures take two parameters.",
        ))?
    };

    let Pat::Type(typed) = parameter else {
        Err(Error::new_spanned(
            parameter,
            "The second parameter of an accumulator closure must name its type.",
        ))?
    };

    let parts = Accumulator {
        accumulator: accumulator.clone(),
        parameter: parameter.clone(),
        body: (*handler.body).clone(),
    };

    Ok(((*typed.ty).clone(), parts))
}

/// The `T` of a field of type `Option<T>`.
fn option_inner(ty: &Type) -> Result<Type> {
    let argument = match ty {
        Type::Path(path) => path.path.segments.last().and_then(|segment| {
            if segment.ident != "Option" {
                return None;
            }

            let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
                return None;
            };

            arguments.args.first()
        }),
        _ => None,
    };

    let Some(GenericArgument::Type(inner)) = argument else {
        Err(Error::new_spanned(
            ty,
            "Fields without an accumulator closure must have an `Option<T>` type.",
        ))?
    };

    Ok(inner.clone())
}
