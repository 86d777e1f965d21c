//! Compiler settings, loaded from a toml file.

use std::{fs, path::Path};
use serde::{Deserialize, Deserializer};
use uprops_base::{EnumFromNameT, UcdPropertyT};
use uprops_logging::{log_verbose, LogLevel};
use crate::{combining_class::CombiningClassMode, PropertyId, Result, LOG_CAT};

/// Binary properties generated when no list is configured
const DEFAULT_BINARY_PROPERTIES: &[&str] = &[
	// general
	"White_Space", "Noncharacter_Code_Point", "Deprecated", "Logical_Order_Exception", "Variation_Selector",
	// case
	"Soft_Dotted",
	// identifiers
	"Pattern_Syntax", "Pattern_White_Space",
	// shaping and rendering
	"Join_Control",
	// bidi
	"Bidi_Control",
	// numeric
	"Hex_Digit", "ASCII_Hex_Digit",
	// cjk
	"Ideographic", "Unified_Ideograph", "Radical", "IDS_Binary_Operator", "IDS_Trinary_Operator",
	// misc
	"Quotation_Mark", "Dash", "Hyphen", "STerm", "Terminal_Punctuation", "Diacritic", "Extender",
	// contributory properties
	"Other_Alphabetic", "Other_Default_Ignorable_Code_Point", "Other_Grapheme_Extend",
	"Other_ID_Start", "Other_ID_Continue", "Other_Lowercase", "Other_Math", "Other_Uppercase",
];

/// Binary properties that are never given a value, `Gr_Link` is deprecated
const DEFAULT_EXCLUDED_BINARY_PROPERTIES: &[&str] = &["Gr_Link"];

#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
	/// Properties compiled into partition tables
	pub partitioned_properties:     Vec<String>,
	/// Binary properties compiled into range tables
	pub binary_properties:          Vec<String>,
	/// Binary properties left out of the binary property enumeration
	pub excluded_binary_properties: Vec<String>,
	pub combining_class_mode:       CombiningClassMode,
	#[serde(deserialize_with = "deserialize_log_level")]
	pub log_level:                  LogLevel,
}

impl Default for Settings {
	fn default() -> Self {
		let partitioned = [PropertyId::GeneralCategory, PropertyId::Script, PropertyId::LineBreak, PropertyId::EastAsianWidth];
		Self {
			partitioned_properties: partitioned.iter().map(|id| id.long_name().to_string()).collect(),
			binary_properties: DEFAULT_BINARY_PROPERTIES.iter().map(|name| name.to_string()).collect(),
			excluded_binary_properties: DEFAULT_EXCLUDED_BINARY_PROPERTIES.iter().map(|name| name.to_string()).collect(),
			combining_class_mode: CombiningClassMode::default(),
			log_level: LogLevel::Info,
		}
	}
}

impl Settings {
	/// Parse settings from toml, missing keys keep their default value
	pub fn load(toml: &str) -> Result<Self> {
		Ok(toml::from_str(toml)?)
	}

	pub fn load_file(path: &Path) -> Result<Self> {
		let settings = Self::load(&fs::read_to_string(path)?)?;
		log_verbose!(LOG_CAT, "Loaded settings from {}", path.display());
		Ok(settings)
	}
}

fn deserialize_log_level<'de, D: Deserializer<'de>>(deserializer: D) -> core::result::Result<LogLevel, D::Error> {
	let name = String::deserialize(deserializer)?;
	LogLevel::parse(&name).ok_or_else(|| serde::de::Error::custom(format!("unknown log level '{name}'")))
}

#[cfg(test)]
mod test {
	use pretty_assertions::assert_eq;
	use super::*;
	use crate::CompileError;

	#[test]
	fn empty_file_is_default() {
		assert_eq!(Settings::load("").unwrap(), Settings::default());
	}

	#[test]
	fn defaults() {
		let settings = Settings::default();
		assert_eq!(settings.partitioned_properties, vec!["General_Category", "Script", "Line_Break", "East_Asian_Width"]);
		assert_eq!(settings.binary_properties.len(), 32);
		assert_eq!(settings.excluded_binary_properties, vec!["Gr_Link"]);
		assert_eq!(settings.combining_class_mode, CombiningClassMode::Sparse);
	}

	#[test]
	fn overrides() {
		let settings = Settings::load(r#"
partitioned-properties = ["Script"]
binary-properties = ["White_Space", "Dash"]
combining-class-mode = "legacy"
log-level = "debug"
"#).unwrap();

		assert_eq!(settings.partitioned_properties, vec!["Script"]);
		assert_eq!(settings.binary_properties, vec!["White_Space", "Dash"]);
		assert_eq!(settings.excluded_binary_properties, vec!["Gr_Link"]);
		assert_eq!(settings.combining_class_mode, CombiningClassMode::Legacy);
		assert_eq!(settings.log_level, LogLevel::Debug);
	}

	#[test]
	fn invalid_settings() {
		assert!(matches!(Settings::load("log-level = \"loud\""), Err(CompileError::Settings(_))));
		assert!(matches!(Settings::load("combining-class-mode = \"dense\""), Err(CompileError::Settings(_))));
		assert!(matches!(Settings::load("partitioned = []"), Err(CompileError::Settings(_))));
	}
}
