//! Implementation of the `#[derive(Record)]` macro.
//!
//! This macro generates an implementation of the `Record` trait, field name
//! constants, and a `fields()` registry in declaration order.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    spanned::Spanned, Data, DeriveInput, Error, Fields, GenericArgument, PathArguments, Result,
    Type,
};

use super::attrs::{parse_column_attrs, ColumnType};

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut registry: Vec<TokenStream> = Vec::new();
    let mut id_field: Option<String> = None;

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let column_attrs = parse_column_attrs(&field.attrs)?;

        if column_attrs.skip {
            continue;
        }

        let column_type = match column_attrs.column_type {
            Some(t) => t,
            None if column_attrs.id => {
                return Err(Error::new(
                    field.span(),
                    "the id field needs a column type, e.g. #[column(Int, id)]",
                ))
            }
            None => continue,
        };

        let query_name = column_attrs
            .rename
            .unwrap_or_else(|| field_name.to_string());

        if column_attrs.id {
            if id_field.is_some() {
                return Err(Error::new(
                    column_attrs.span,
                    "only one field can be marked as id",
                ));
            }
            id_field = Some(query_name.clone());
        }

        let optional = is_option(&field.ty);

        let const_name = format_ident!("{}", to_screaming_snake_case(&query_name));
        field_constants.push(quote! {
            /// Field name constant.
            pub const #const_name: &'static str = #query_name;
        });

        let variant = format_ident!("{}", column_type.variant(optional));
        registry.push(quote! {
            ::gridserve::Field::new(#query_name, ::gridserve::FieldType::#variant)
        });

        let value_expr = if optional {
            let inner = value_of(column_type, &query_name, quote! { value }, true);
            quote! {
                match &self.#field_name {
                    ::std::option::Option::Some(value) => #inner,
                    ::std::option::Option::None => ::gridserve::Value::None,
                }
            }
        } else {
            value_of(column_type, &query_name, quote! { self.#field_name }, false)
        };

        field_matches.push(quote! {
            #query_name => #value_expr,
        });
    }

    let id_const = id_field.map(|name| {
        quote! {
            const ID_FIELD: &'static str = #name;
        }
    });

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*

            /// The record's columns, in declaration order.
            pub fn fields() -> ::gridserve::Fields {
                let fields: ::std::vec::Vec<::gridserve::Field> = ::std::vec![#(#registry),*];
                ::gridserve::Fields::from(fields)
            }
        }

        impl #impl_generics ::gridserve::Record for #struct_name #ty_generics #where_clause {
            #id_const

            fn field_value(&self, field: &str) -> ::gridserve::Value<'_> {
                match field {
                    #(#field_matches)*
                    _ => ::gridserve::Value::None,
                }
            }
        }
    };

    Ok(expanded)
}

/// Builds the `Value` for one field.
///
/// `by_ref` means `place` is a reference (the `Some` binding of an optional).
/// Integer reads that do not fit in `i64` panic with the field `name`.
fn value_of(column_type: ColumnType, name: &str, place: TokenStream, by_ref: bool) -> TokenStream {
    let read = if by_ref {
        quote! { *#place }
    } else {
        quote! { #place }
    };
    match column_type {
        ColumnType::String => {
            if by_ref {
                quote! { ::gridserve::Value::String(#place) }
            } else {
                quote! { ::gridserve::Value::String(&#place) }
            }
        }
        ColumnType::Int => quote! {
            ::gridserve::Value::Int(
                <i64 as ::std::convert::TryFrom<_>>::try_from(#read).unwrap_or_else(|_| {
                    ::std::panic!("field `{}` does not fit in i64", #name)
                }),
            )
        },
        ColumnType::Float64 => quote! { ::gridserve::Value::Float64((#read) as f64) },
        ColumnType::Float32 => quote! { ::gridserve::Value::Float32((#read) as f32) },
        ColumnType::Bool => quote! { ::gridserve::Value::Bool(#read) },
        ColumnType::Date => {
            let target = if by_ref {
                quote! { #place }
            } else {
                quote! { &#place }
            };
            quote! { ::gridserve::Value::Date(::gridserve::AsDate::as_date(#target)) }
        }
    }
}

/// Whether `ty` is spelled `Option<_>` (optionally path-qualified).
fn is_option(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    if path.qself.is_some() {
        return false;
    }
    let Some(last) = path.path.segments.last() else {
        return false;
    };
    if last.ident != "Option" {
        return false;
    }
    match &last.arguments {
        PathArguments::AngleBracketed(args) => {
            args.args.len() == 1 && matches!(args.args[0], GenericArgument::Type(_))
        }
        _ => false,
    }
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}
