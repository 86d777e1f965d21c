//! Contains traits implemented by the uprops derive macros


/// Trait to get the number of elements in an enum
pub trait EnumCountT {
    /// Count or number of element in an enum
    const COUNT : usize;
}

pub trait EnumFromNameT: Sized {
    /// Try to parse the enum from a string slice.
    fn parse(s: &str) -> Option<Self>;
}

/// A Unicode property that the compiler knows about at compile time.
/// 
/// Implemented by `#[derive(UcdProperty)]`, names are matched loosely when parsing.
pub trait UcdPropertyT: EnumCountT + EnumFromNameT + Copy + 'static {
    /// All properties, in declaration order
    const ALL: &'static [Self];

    /// Short alias, as used by the attributes of the UCD XML snapshot (e.g. `gc`)
    fn short_name(self) -> &'static str;

    /// Long, canonical name (e.g. `General_Category`)
    fn long_name(self) -> &'static str;

    /// Index of the property in `ALL`
    fn index(self) -> usize;
}
