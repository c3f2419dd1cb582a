//! The `#[test]` attribute behind `propmap_testhelpers::test`.

use unsynn::*;

keyword! {
    KFn = "fn";
}

unsynn! {
    struct Preamble {
        items: Any<Cons<Except<KFn>, TokenTree>>,
    }

    struct Signature {
        items: Any<Cons<Except<BraceGroup>, TokenTree>>,
    }

    struct TestFn {
        preamble: Preamble,
        _fn: KFn,
        name: Ident,
        signature: Signature,
        body: BraceGroup,
    }
}

impl quote::ToTokens for Preamble {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.items.to_tokens(tokens)
    }
}

impl quote::ToTokens for Signature {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.items.to_tokens(tokens)
    }
}

/// Marks a test function and runs `propmap_testhelpers::setup()` before its body.
///
/// ```ignore
/// #[propmap_testhelpers::test]
/// fn converts() { /* ... */ }
/// ```
///
/// An argument replaces the inner test attribute, e.g. `#[propmap_testhelpers::test(tokio::test)]`.
#[proc_macro_attribute]
pub fn test(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let item = TokenStream::from(item);
    let TestFn {
        preamble,
        _fn,
        name,
        signature,
        body,
    } = match item.to_token_iter().parse::<TestFn>() {
        Ok(decl) => decl,
        Err(_) => {
            return quote::quote! {
                ::core::compile_error!("#[propmap_testhelpers::test] expects a function");
            }
            .into();
        }
    };

    let test_attr = if attr.is_empty() {
        quote::quote! { #[::core::prelude::rust_2024::test] }
    } else {
        let attr = TokenStream::from(attr);
        quote::quote! { #[#attr] }
    };
    let body = body.0.stream();

    quote::quote! {
        #test_attr
        #preamble fn #name #signature {
            ::propmap_testhelpers::setup();

            #body
        }
    }
    .into()
}
