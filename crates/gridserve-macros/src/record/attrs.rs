//! Attribute parsing for the Record derive macro.
//!
//! This module provides parsers for the `#[column(...)]` field attributes
//! used by the `Record` derive macro.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Ident, Lit, Meta, Result, Token,
};

/// The column type of a record field, before optionality is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Text field: `#[column(String)]`
    String,
    /// Signed integer field: `#[column(Int)]`
    Int,
    /// Double precision field: `#[column(Float64)]`
    Float64,
    /// Single precision field: `#[column(Float32)]`
    Float32,
    /// Boolean field: `#[column(Bool)]`
    Bool,
    /// Date field: `#[column(Date)]`, requires `AsDate`
    Date,
}

impl ColumnType {
    /// Parse a column type from an identifier.
    pub fn from_ident(ident: &Ident) -> Result<Self> {
        Self::from_name(&ident.to_string(), ident.span())
    }

    fn from_name(name: &str, span: Span) -> Result<Self> {
        match name {
            "String" | "string" => Ok(ColumnType::String),
            "Int" | "int" => Ok(ColumnType::Int),
            "Float64" | "float64" | "Double" => Ok(ColumnType::Float64),
            "Float32" | "float32" | "Float" => Ok(ColumnType::Float32),
            "Bool" | "bool" | "boolean" => Ok(ColumnType::Bool),
            "Date" | "date" => Ok(ColumnType::Date),
            other => Err(Error::new(
                span,
                format!(
                    "unknown column type: '{}'. Expected one of: String, Int, Float64, Float32, Bool, Date",
                    other
                ),
            )),
        }
    }

    /// The `FieldType` variant name for this column.
    pub fn variant(self, optional: bool) -> &'static str {
        match (self, optional) {
            (ColumnType::String, false) => "String",
            (ColumnType::String, true) => "OptionalString",
            (ColumnType::Int, false) => "Int",
            (ColumnType::Int, true) => "OptionalInt",
            (ColumnType::Float64, false) => "Float64",
            (ColumnType::Float64, true) => "OptionalFloat64",
            (ColumnType::Float32, false) => "Float32",
            (ColumnType::Float32, true) => "OptionalFloat32",
            (ColumnType::Bool, false) => "Bool",
            (ColumnType::Bool, true) => "OptionalBool",
            (ColumnType::Date, false) => "Date",
            (ColumnType::Date, true) => "OptionalDate",
        }
    }
}

/// Field-level attributes from `#[column(...)]`.
#[derive(Debug, Clone)]
pub struct ColumnAttr {
    /// The column type of this field.
    pub column_type: Option<ColumnType>,
    /// This field is the record identifier and default sort key.
    pub id: bool,
    /// Leave this field out of the record.
    pub skip: bool,
    /// Custom field name (default: field name).
    pub rename: Option<String>,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for ColumnAttr {
    fn default() -> Self {
        ColumnAttr {
            column_type: None,
            id: false,
            skip: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl Parse for ColumnAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = ColumnAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) => {
                    if p.is_ident("skip") {
                        attr.skip = true;
                    } else if p.is_ident("id") {
                        attr.id = true;
                    } else if let Some(ident) = p.get_ident() {
                        attr.column_type = Some(ColumnType::from_ident(ident)?);
                        attr.span = ident.span();
                    } else {
                        return Err(Error::new(
                            p.span(),
                            "expected column type: String, Int, Float64, Float32, Bool, Date, id, or skip",
                        ));
                    }
                }

                // rename = "custom_name" or ty = "bool"
                Meta::NameValue(nv) => {
                    let Some(name) = nv.path.get_ident().map(Ident::to_string) else {
                        return Err(Error::new(nv.path.span(), "expected rename or ty"));
                    };
                    let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    else {
                        return Err(Error::new(
                            nv.value.span(),
                            format!("{} must be a string literal", name),
                        ));
                    };
                    match name.as_str() {
                        "rename" => attr.rename = Some(s.value()),
                        "ty" => {
                            attr.column_type = Some(ColumnType::from_name(&s.value(), s.span())?);
                            attr.span = s.span();
                        }
                        _ => {
                            return Err(Error::new(
                                nv.path.span(),
                                "unknown attribute. Expected: rename or ty",
                            ))
                        }
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown column attribute. Expected a column type, id, skip, rename = \"...\", or ty = \"...\"",
                    ));
                }
            }
        }

        if attr.skip && attr.id {
            return Err(Error::new(attr.span, "a skipped field cannot be the id"));
        }

        Ok(attr)
    }
}

/// Extract `#[column(...)]` attributes from a field's attributes.
pub fn parse_column_attrs(attrs: &[Attribute]) -> Result<ColumnAttr> {
    for attr in attrs {
        if attr.path().is_ident("column") {
            return attr.parse_args::<ColumnAttr>();
        }
    }
    Ok(ColumnAttr::default())
}
