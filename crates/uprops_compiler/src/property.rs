use uprops_macros::UcdProperty;

/// Properties the compiler generates tables for, or needs the names of.
/// 
/// Binary properties are resolved through the name catalog at runtime, as their set is taken from the settings.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, UcdProperty)]
pub enum PropertyId {
	#[ucd(short = "gc", long = "General_Category")]
	GeneralCategory,
	#[ucd(short = "sc", long = "Script")]
	Script,
	#[ucd(short = "lb", long = "Line_Break")]
	LineBreak,
	#[ucd(short = "ea", long = "East_Asian_Width")]
	EastAsianWidth,
	#[ucd(short = "blk", long = "Block")]
	Block,
	#[ucd(short = "ccc", long = "Canonical_Combining_Class")]
	CanonicalCombiningClass,
	#[ucd(short = "dt", long = "Decomposition_Type")]
	DecompositionType,
	#[ucd(short = "dm", long = "Decomposition_Mapping")]
	DecompositionMapping,
	#[ucd(short = "na", long = "Name")]
	Name,
}

#[cfg(test)]
mod test {
	use uprops_base::{EnumCountT, EnumFromNameT, UcdPropertyT};
	use super::PropertyId;

	#[test]
	fn names() {
		assert_eq!(PropertyId::COUNT, PropertyId::ALL.len());
		assert_eq!(PropertyId::LineBreak.short_name(), "lb");
		assert_eq!(PropertyId::LineBreak.to_string(), "Line_Break");
		assert_eq!(PropertyId::parse("east asian width"), Some(PropertyId::EastAsianWidth));
		assert_eq!(PropertyId::parse("CCC"), Some(PropertyId::CanonicalCombiningClass));
		assert_eq!(PropertyId::parse("Bidi_Class"), None);
		for (idx, prop) in PropertyId::ALL.iter().enumerate() {
			assert_eq!(prop.index(), idx);
		}
	}
}
