//! Reading `#[propmap(...)]` attributes off the derive input.

use syn::{Attribute, Data, DeriveInput, Expr, Fields, Ident, LitStr, Path, Type, Visibility};

/// What the derive was applied to.
pub enum Input {
    Record(RecordInput),
    Enum(EnumInput),
}

pub struct RecordInput {
    pub ident: Ident,
    pub generics: syn::Generics,
    pub krate: Path,
    pub fields: Vec<FieldInput>,
}

pub struct FieldInput {
    pub ident: Ident,
    pub vis: Visibility,
    pub ty: Type,
    /// Key in property maps.
    pub key: String,
    pub updatable: bool,
    pub mapped: bool,
    pub default: Option<FieldDefault>,
}

pub enum FieldDefault {
    /// `#[propmap(default)]`
    Trait,
    /// `#[propmap(default = expr)]`
    Expr(Box<Expr>),
}

pub struct EnumInput {
    pub ident: Ident,
    pub generics: syn::Generics,
    pub krate: Path,
    pub variants: Vec<VariantInput>,
}

pub struct VariantInput {
    pub ident: Ident,
    pub name: String,
}

#[derive(Default)]
struct Options {
    updatable: bool,
    mapped: bool,
    default: Option<FieldDefault>,
    rename: Option<String>,
    krate: Option<Path>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Position {
    Container,
    Field,
    Variant,
}

fn options(attrs: &[Attribute], position: Position) -> syn::Result<Options> {
    let mut opts = Options::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("propmap")) {
        attr.parse_nested_meta(|meta| {
            let allowed = |ok: bool| {
                if ok {
                    Ok(())
                } else {
                    Err(meta.error("attribute is not supported here"))
                }
            };
            if meta.path.is_ident("updatable") {
                allowed(position != Position::Variant)?;
                opts.updatable = true;
            } else if meta.path.is_ident("mapped") {
                allowed(position == Position::Field)?;
                opts.mapped = true;
            } else if meta.path.is_ident("default") {
                allowed(position == Position::Field)?;
                opts.default = Some(if meta.input.peek(syn::Token![=]) {
                    FieldDefault::Expr(Box::new(meta.value()?.parse()?))
                } else {
                    FieldDefault::Trait
                });
            } else if meta.path.is_ident("rename") {
                allowed(position != Position::Container)?;
                let name: LitStr = meta.value()?.parse()?;
                opts.rename = Some(name.value());
            } else if meta.path.is_ident("crate") {
                allowed(position == Position::Container)?;
                let path: LitStr = meta.value()?.parse()?;
                opts.krate = Some(path.parse()?);
            } else {
                return Err(meta.error(
                    "expected one of `updatable`, `mapped`, `default`, `rename`, `crate`",
                ));
            }
            Ok(())
        })?;
    }
    Ok(opts)
}

/// Associated constants of `Typed` and `Updatable` that field tokens must not shadow.
const RESERVED_TOKENS: &[&str] = &["SHAPE", "UPDATE_SCHEMA"];

/// Strips the `r#` prefix of raw identifiers.
pub fn unraw(ident: &Ident) -> String {
    let s = ident.to_string();
    match s.strip_prefix("r#") {
        Some(rest) => rest.to_owned(),
        None => s,
    }
}

pub fn parse(input: &DeriveInput) -> syn::Result<Input> {
    let container = options(&input.attrs, Position::Container)?;
    let krate = container
        .krate
        .unwrap_or_else(|| syn::parse_quote!(::propmap));

    match &input.data {
        Data::Struct(data) => {
            let Fields::Named(named) = &data.fields else {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "#[derive(Typed)] on a struct requires named fields",
                ));
            };
            let mut fields = Vec::with_capacity(named.named.len());
            for field in &named.named {
                let Some(ident) = field.ident.clone() else {
                    return Err(syn::Error::new_spanned(field, "expected a named field"));
                };
                let token = unraw(&ident).to_uppercase();
                if RESERVED_TOKENS.contains(&token.as_str()) {
                    return Err(syn::Error::new_spanned(
                        &ident,
                        format!(
                            "field `{ident}` would generate `Self::{token}`, \
                             which shadows the trait constant"
                        ),
                    ));
                }
                let opts = options(&field.attrs, Position::Field)?;
                fields.push(FieldInput {
                    key: opts.rename.unwrap_or_else(|| unraw(&ident)),
                    ident,
                    vis: field.vis.clone(),
                    ty: field.ty.clone(),
                    updatable: container.updatable || opts.updatable || opts.mapped,
                    mapped: opts.mapped,
                    default: opts.default,
                });
            }
            for (i, field) in fields.iter().enumerate() {
                if fields[..i].iter().any(|f| f.key == field.key) {
                    return Err(syn::Error::new_spanned(
                        &field.ident,
                        format!("duplicate property key `{}`", field.key),
                    ));
                }
            }
            Ok(Input::Record(RecordInput {
                ident: input.ident.clone(),
                generics: input.generics.clone(),
                krate,
                fields,
            }))
        }
        Data::Enum(data) => {
            if container.updatable {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "#[propmap(updatable)] applies to structs only",
                ));
            }
            if data.variants.is_empty() {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "#[derive(Typed)] needs at least one enum variant",
                ));
            }
            let mut variants = Vec::with_capacity(data.variants.len());
            for variant in &data.variants {
                if !matches!(variant.fields, Fields::Unit) {
                    return Err(syn::Error::new_spanned(
                        variant,
                        "#[derive(Typed)] supports fieldless enum variants only",
                    ));
                }
                let opts = options(&variant.attrs, Position::Variant)?;
                variants.push(VariantInput {
                    name: opts.rename.unwrap_or_else(|| unraw(&variant.ident)),
                    ident: variant.ident.clone(),
                });
            }
            Ok(Input::Enum(EnumInput {
                ident: input.ident.clone(),
                generics: input.generics.clone(),
                krate,
                variants,
            }))
        }
        Data::Union(_) => Err(syn::Error::new_spanned(
            &input.ident,
            "#[derive(Typed)] does not support unions",
        )),
    }
}
