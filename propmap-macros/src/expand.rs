use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::parse::{EnumInput, FieldDefault, FieldInput, Input, RecordInput, unraw};

pub fn expand(input: Input) -> TokenStream {
    match input {
        Input::Record(record) => expand_record(&record),
        Input::Enum(enum_) => expand_enum(&enum_),
    }
}

fn field_default(krate: &syn::Path, field: &FieldInput) -> TokenStream {
    let ty = &field.ty;
    match &field.default {
        None => quote! {},
        Some(FieldDefault::Trait) => quote! {
            .with_default(|| {
                <#ty as #krate::Typed>::to_typed(&<#ty as ::core::default::Default>::default())
            })
        },
        Some(FieldDefault::Expr(expr)) => quote! {
            .with_default(|| {
                let value: #ty = #expr;
                <#ty as #krate::Typed>::to_typed(&value)
            })
        },
    }
}

fn field_meta(krate: &syn::Path, field: &FieldInput) -> TokenStream {
    let key = &field.key;
    let ty = &field.ty;
    let flags = if field.mapped {
        quote! { .mapped(|| <#ty as #krate::Updatable>::UPDATE_SCHEMA) }
    } else if field.updatable {
        quote! { .updatable() }
    } else {
        quote! {}
    };
    quote! {
        #krate::FieldMeta::new(#key, || <#ty as #krate::Typed>::SHAPE) #flags
    }
}

fn field_token(krate: &syn::Path, field: &FieldInput) -> TokenStream {
    let ident = &field.ident;
    let vis = &field.vis;
    let ty = &field.ty;
    let key = &field.key;
    let token = format_ident!("{}", unraw(ident).to_uppercase(), span = ident.span());
    let doc = format!("Typed key of the `{key}` field.");
    quote! {
        #[doc = #doc]
        #vis const #token: #krate::Field<Self, #ty> =
            #krate::Field::new(#key, |record| &record.#ident);
    }
}

fn expand_record(record: &RecordInput) -> TokenStream {
    let RecordInput {
        ident,
        generics,
        krate,
        fields,
    } = record;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let type_name = ident.to_string();
    let count = fields.len();

    let field_defs = fields.iter().map(|field| {
        let key = &field.key;
        let ty = &field.ty;
        let default = field_default(krate, field);
        quote! {
            #krate::FieldDef::new(#key, || <#ty as #krate::Typed>::SHAPE) #default
        }
    });
    let field_metas = fields.iter().map(|field| field_meta(krate, field));
    let field_tokens = fields.iter().map(|field| field_token(krate, field));
    let takes = fields.iter().map(|field| {
        let ident = &field.ident;
        let key = &field.key;
        quote! { #ident: record.take(#key)? }
    });
    let captures = fields.iter().map(|field| {
        let ident = &field.ident;
        let key = &field.key;
        quote! { .with(#key, #krate::Typed::to_typed(&self.#ident)) }
    });

    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::Typed for #ident #ty_generics #where_clause {
            const SHAPE: &'static #krate::Shape = &const {
                #krate::Shape::new(
                    #type_name,
                    #krate::Def::Record(#krate::RecordDef::new(&const {
                        let fields: [#krate::FieldDef; #count] = [#(#field_defs),*];
                        fields
                    })),
                )
            };

            type Present = Self;

            fn to_typed(&self) -> #krate::TypedValue {
                #krate::TypedValue::Record(#krate::Record::to_record(self))
            }

            fn from_typed(
                value: #krate::TypedValue,
            ) -> ::core::result::Result<Self, #krate::ConversionError> {
                match value {
                    #krate::TypedValue::Record(mut record) => {
                        ::core::result::Result::Ok(Self { #(#takes,)* })
                    }
                    other => ::core::result::Result::Err(other.mismatch::<Self>()),
                }
            }

            fn into_present(self) -> ::core::option::Option<Self> {
                ::core::option::Option::Some(self)
            }

            fn as_present(&self) -> ::core::option::Option<&Self> {
                ::core::option::Option::Some(self)
            }
        }

        #[automatically_derived]
        impl #impl_generics #krate::Record for #ident #ty_generics #where_clause {
            fn to_record(&self) -> #krate::RecordValue {
                #krate::RecordValue::with_capacity(#count) #(#captures)*
            }
        }

        #[automatically_derived]
        impl #impl_generics #krate::Updatable for #ident #ty_generics #where_clause {
            const UPDATE_SCHEMA: &'static #krate::UpdateSchema = &const {
                #krate::UpdateSchema::new(#type_name, &const {
                    let fields: [#krate::FieldMeta; #count] = [#(#field_metas),*];
                    fields
                })
            };
        }

        #[allow(dead_code)]
        impl #impl_generics #ident #ty_generics #where_clause {
            #(#field_tokens)*
        }
    }
}

fn expand_enum(enum_: &EnumInput) -> TokenStream {
    let EnumInput {
        ident,
        generics,
        krate,
        variants,
    } = enum_;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let type_name = ident.to_string();
    let count = variants.len();
    let names: Vec<&str> = variants.iter().map(|v| v.name.as_str()).collect();
    let to_arms = variants.iter().enumerate().map(|(index, v)| {
        let variant = &v.ident;
        let name = &v.name;
        quote! { Self::#variant => (#index, #name) }
    });
    let from_arms = variants.iter().enumerate().map(|(index, v)| {
        let variant = &v.ident;
        quote! { #index => ::core::result::Result::Ok(Self::#variant) }
    });
    let unknown = format!("expected a valid value of type {type_name}");

    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::Typed for #ident #ty_generics #where_clause {
            const SHAPE: &'static #krate::Shape = &const {
                #krate::Shape::new(
                    #type_name,
                    #krate::Def::Enum(#krate::EnumDef::new(&const {
                        let variants: [&'static str; #count] = [#(#names),*];
                        variants
                    })),
                )
            };

            type Present = Self;

            fn to_typed(&self) -> #krate::TypedValue {
                let (index, name): (usize, &'static str) = match self {
                    #(#to_arms,)*
                };
                #krate::TypedValue::Enum(#krate::EnumCase { index, name })
            }

            fn from_typed(
                value: #krate::TypedValue,
            ) -> ::core::result::Result<Self, #krate::ConversionError> {
                match value {
                    #krate::TypedValue::Enum(case) => match case.index {
                        #(#from_arms,)*
                        _ => ::core::result::Result::Err(
                            #krate::ConversionError::parse_failure(#unknown),
                        ),
                    },
                    other => ::core::result::Result::Err(other.mismatch::<Self>()),
                }
            }

            fn into_present(self) -> ::core::option::Option<Self> {
                ::core::option::Option::Some(self)
            }

            fn as_present(&self) -> ::core::option::Option<&Self> {
                ::core::option::Option::Some(self)
            }
        }
    }
}
