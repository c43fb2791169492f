/**
 * A function-like macro translating a legacy pattern literal at compile time:
 *
 * ```ignore
 * const KEY: &str = translate_regexp!("^{key}[ \t]*=", key = "user.name");
 * ```
 *
 * Syntax errors in the pattern become compile errors pointing at the literal.
 */

extern crate proc_macro;
extern crate rxt_regexp;
extern crate syn;
extern crate quote;

use proc_macro::TokenStream;
use proc_macro2::Span;
use syn::{parse_macro_input, Ident, LitStr, Token};
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use quote::quote;
use rxt_regexp::{translate_regexp_with_tokens, TokenTable};

/// A token name, either a plain identifier or a string for names that aren't
/// valid identifiers.
enum TokenName {
    Ident(Ident),
    Str(LitStr),
}

impl TokenName {
    fn value(&self) -> String {
        match self {
            TokenName::Ident(i) => i.unraw().to_string(),
            TokenName::Str(s) => s.value(),
        }
    }

    fn span(&self) -> Span {
        match self {
            TokenName::Ident(i) => i.span(),
            TokenName::Str(s) => s.span(),
        }
    }
}

struct TokenDefinition {
    name: TokenName,
    replacement: LitStr,
}

struct TranslateInput {
    pattern: LitStr,
    tokens: Vec<TokenDefinition>,
}

impl Parse for TokenDefinition {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name = if input.peek(LitStr) {
            TokenName::Str(input.parse()?)
        }
        else {
            TokenName::Ident(input.call(Ident::parse_any)?)
        };
        input.parse::<Token![=]>()?;
        let replacement = input.parse()?;
        Ok(Self{ name, replacement })
    }
}

impl Parse for TranslateInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let pattern = input.parse()?;
        let mut tokens = Vec::new();
        if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            let definitions = Punctuated::<TokenDefinition, Token![,]>::parse_terminated(input)?;
            tokens.extend(definitions);
        }
        Ok(Self{ pattern, tokens })
    }
}

#[proc_macro]
pub fn translate_regexp(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as TranslateInput);

    let mut table = TokenTable::new();
    for TokenDefinition{ name, replacement } in &input.tokens {
        if table.insert(name.value(), replacement.value()).is_some() {
            return compile_error(name.span(), format!("token `{}` is defined twice", name.value()));
        }
    }

    match translate_regexp_with_tokens(&input.pattern.value(), &table) {
        Ok(result) => quote!{ #result }.into(),
        Err(err) => compile_error(input.pattern.span(), format!("{}\n{}", err, err.caret_diagnostic())),
    }
}

fn compile_error(span: Span, message: String) -> TokenStream {
    syn::Error::new(span, message).to_compile_error().into()
}
