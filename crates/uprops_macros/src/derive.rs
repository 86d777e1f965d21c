use proc_macro2::*;
use quote::quote;
use syn::{punctuated::Punctuated, *};

fn enum_body(item: TokenStream) -> core::result::Result<(Ident, DataEnum), TokenStream> {
	let input_parsed = match syn::parse2::<DeriveInput>(item) {
	    Ok(derived_input) => derived_input,
	    Err(err) => return Err(err.to_compile_error()),
	};

	match input_parsed.data {
		Data::Enum(body) => Ok((input_parsed.ident, body)),
		_ => Err(quote!( compile_error!("Not an enum"); ))
	}
}

pub fn enum_from_name(item: TokenStream) -> TokenStream {
    let (ident, body_data) = match enum_body(item) {
        Ok(res) => res,
        Err(toks) => return toks,
    };

    let mut members = Vec::with_capacity(body_data.variants.len());
    let mut names = Vec::with_capacity(body_data.variants.len());

    for variant in &body_data.variants {
        // A variant may be spelled in multiple ways, e.g. `#[parse_name("C", "Common")]`
        let mut variant_names = Vec::new();
        for attr in variant.attrs.iter().filter(|attr| attr.path().is_ident("parse_name")) {
            match attr.parse_args_with(Punctuated::<LitStr, Token![,]>::parse_terminated) {
                Ok(list) => variant_names.extend(list.into_iter().map(|lit| lit.value())),
                Err(err) => return err.to_compile_error(),
            }
        }
        if variant_names.is_empty() {
            variant_names.push(variant.ident.to_string());
        }

        for name in variant_names {
            members.push(variant.ident.clone());
            names.push(name);
        }
    }

    quote!{
        impl uprops_base::EnumFromNameT for #ident {
            fn parse(s: &str) -> Option<Self> {
                match s {
                    #(#names => Some(Self::#members),)*
                    _ => None,
                }
            }
        }
    }
}

pub fn ucd_property(item: TokenStream) -> TokenStream {
    let (ident, body_data) = match enum_body(item) {
        Ok(res) => res,
        Err(toks) => return toks,
    };

    let count = body_data.variants.len();
    let mut members = Vec::with_capacity(count);
    let mut shorts = Vec::with_capacity(count);
    let mut longs = Vec::with_capacity(count);
    let mut indices = Vec::with_capacity(count);

    for (idx, variant) in body_data.variants.iter().enumerate() {
        if !matches!(variant.fields, Fields::Unit) {
            let msg = format!("UcdProperty variant '{}' can't have fields", variant.ident);
            return quote!(compile_error!(#msg););
        }

        let mut short = None;
        let mut long = None;
        for attr in variant.attrs.iter().filter(|attr| attr.path().is_ident("ucd")) {
            let res = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("short") {
                    short = Some(meta.value()?.parse::<LitStr>()?.value());
                    Ok(())
                } else if meta.path.is_ident("long") {
                    long = Some(meta.value()?.parse::<LitStr>()?.value());
                    Ok(())
                } else {
                    Err(meta.error("expected `short` or `long`"))
                }
            });
            if let Err(err) = res {
                return err.to_compile_error();
            }
        }

        let short = match short {
            Some(short) => short,
            None => {
                let msg = format!("Missing `#[ucd(short = \"..\")]` for member '{}'", variant.ident);
                return quote!(compile_error!(#msg););
            },
        };

        members.push(variant.ident.clone());
        shorts.push(short);
        longs.push(long.unwrap_or_else(|| variant.ident.to_string()));
        indices.push(idx);
    }

    quote!{
        impl uprops_base::EnumCountT for #ident {
            const COUNT: usize = #count;
        }

        impl uprops_base::EnumFromNameT for #ident {
            fn parse(s: &str) -> Option<Self> {
                #(
                    if uprops_base::loose_eq(s, #shorts) || uprops_base::loose_eq(s, #longs) {
                        return Some(Self::#members);
                    }
                )*
                None
            }
        }

        impl uprops_base::UcdPropertyT for #ident {
            const ALL: &'static [Self] = &[#(Self::#members,)*];

            fn short_name(self) -> &'static str {
                match self {
                    #(Self::#members => #shorts,)*
                }
            }

            fn long_name(self) -> &'static str {
                match self {
                    #(Self::#members => #longs,)*
                }
            }

            fn index(self) -> usize {
                match self {
                    #(Self::#members => #indices,)*
                }
            }
        }

        impl core::fmt::Display for #ident {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(uprops_base::UcdPropertyT::long_name(*self))
            }
        }
    }
}
