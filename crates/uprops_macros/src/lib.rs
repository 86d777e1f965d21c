mod derive;

use proc_macro::TokenStream;

#[proc_macro_derive(EnumFromName, attributes(parse_name))]
pub fn enum_from_name(item: TokenStream) -> TokenStream {
    derive::enum_from_name(item.into()).into()
}

/// Derive the short/long name tables of a closed set of Unicode properties.
/// 
/// Each variant needs a `#[ucd(short = "..")]` attribute, `long` defaults to the variant name.
#[proc_macro_derive(UcdProperty, attributes(ucd))]
pub fn ucd_property(item: TokenStream) -> TokenStream {
    derive::ucd_property(item.into()).into()
}
