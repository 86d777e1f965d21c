//! Property and property value names, as listed by `PropertyAliases.txt` and `PropertyValueAliases.txt`.

use std::{collections::HashMap, path::Path};
use uprops_base::{loose_eq, UcdPropertyT};
use uprops_logging::log_verbose;
use uprops_parser_utils::{for_each_data_line, str_parser::StrParser};
use crate::{CompileError, PropertyId, Result, LOG_CAT};

pub const PROPERTY_ALIASES_FILE: &str = "PropertyAliases.txt";
pub const PROPERTY_VALUE_ALIASES_FILE: &str = "PropertyValueAliases.txt";

/// Properties whose value alias lines start with the numeric value: `ccc; 0; NR; Not_Reordered`
const NUMERIC_VALUE_PROPERTIES: &[&str] = &["ccc"];
/// Placeholder used when a value has no short alias
const MISSING_ALIAS: &str = "n/a";

/// Aliases of a single property value, ordered as `[short, long, others...]`
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ValueAliasGroup {
	names: Vec<String>,
	value: u32,
}

impl ValueAliasGroup {
	pub fn short(&self) -> &str {
		&self.names[0]
	}

	pub fn long(&self) -> &str {
		self.names.get(1).unwrap_or(&self.names[0])
	}

	pub fn aliases(&self) -> &[String] {
		&self.names
	}

	/// Value stored in the generated tables
	pub fn value(&self) -> u32 {
		self.value
	}
}

/// Names of a single property
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PropertyRecord {
	short_name: String,
	/// Long name, followed by any other aliases
	aliases:    Vec<String>,
	values:     Vec<ValueAliasGroup>,
}

impl PropertyRecord {
	pub fn short_name(&self) -> &str {
		&self.short_name
	}

	pub fn long_name(&self) -> &str {
		&self.aliases[0]
	}

	/// Long name and other aliases, the short name is not included
	pub fn aliases(&self) -> &[String] {
		&self.aliases
	}

	pub fn values(&self) -> &[ValueAliasGroup] {
		&self.values
	}

	/// Find the value group containing the exact alias `value_alias`
	pub fn value_group(&self, value_alias: &str) -> Option<&ValueAliasGroup> {
		self.values.iter().find(|group| group.names.iter().any(|name| name == value_alias))
	}

	/// Find the value group with an alias loosely matching `value_name`
	pub fn value_group_loose(&self, value_name: &str) -> Option<&ValueAliasGroup> {
		self.values.iter().find(|group| group.names.iter().any(|name| loose_eq(name, value_name)))
	}

	/// Does the property have the shape of a binary property: 2 value groups, `N, No, F, False` and `Y, Yes, T, True`
	pub fn has_binary_shape(&self) -> bool {
		if self.values.len() != 2 || self.values.iter().any(|group| group.names.len() != 4) {
			return false;
		}
		let mut shorts = [self.values[0].short(), self.values[1].short()];
		shorts.sort_unstable();
		shorts == ["N", "Y"]
	}
}

/// Catalog of all property and property value names
#[derive(Clone, Debug, Default)]
pub struct NameCatalog {
	properties: Vec<PropertyRecord>,
	by_short:   HashMap<String, usize>,
}

impl NameCatalog {
	/// Load the catalog from the `PropertyAliases.txt` and `PropertyValueAliases.txt` files in `ucd_dir`
	pub fn load(ucd_dir: &Path) -> Result<Self> {
		log_verbose!(LOG_CAT, "Building property name table...");
		let mut catalog = Self::default();

		let path = ucd_dir.join(PROPERTY_ALIASES_FILE);
		for_each_data_line(&path, |_, line| {
			catalog.add_property_line(line);
			Ok::<_, CompileError>(())
		})?;
		log_verbose!(LOG_CAT, "...Loaded {}", path.display());

		let path = ucd_dir.join(PROPERTY_VALUE_ALIASES_FILE);
		for_each_data_line(&path, |line_number, line| catalog.add_value_line(PROPERTY_VALUE_ALIASES_FILE, line_number, line))?;
		log_verbose!(LOG_CAT, "...Loaded {}", path.display());

		Ok(catalog)
	}

	/// Parse the catalog from the contents of `PropertyAliases.txt` and `PropertyValueAliases.txt`
	pub fn parse(property_aliases: &str, value_aliases: &str) -> Result<Self> {
		let mut catalog = Self::default();
		for line in property_aliases.lines() {
			catalog.add_property_line(line);
		}
		for (idx, line) in value_aliases.lines().enumerate() {
			catalog.add_value_line(PROPERTY_VALUE_ALIASES_FILE, idx + 1, line)?;
		}
		Ok(catalog)
	}

	// `cjkAccountingNumeric ; kAccountingNumeric`, `gc ; General_Category`, ...
	fn add_property_line(&mut self, line: &str) {
		let names = StrParser::for_line(line, 0).words().collect::<Vec<_>>();
		if names.len() < 2 {
			return;
		}

		let record = PropertyRecord {
			short_name: names[0].to_string(),
			aliases: names[1..].iter().map(|name| name.to_string()).collect(),
			values: Vec::new(),
		};
		match self.by_short.get(names[0]) {
			Some(&idx) => self.properties[idx] = record,
			None => {
				self.by_short.insert(record.short_name.clone(), self.properties.len());
				self.properties.push(record);
			}
		}
	}

	// `sc ; Latn ; Latin`, `ccc; 0; NR ; Not_Reordered`, `blk; n/a ; Ancient_Symbols`, ...
	fn add_value_line(&mut self, source_name: &str, line_number: usize, line: &str) -> Result<()> {
		let mut names = StrParser::for_line(line, line_number).words().collect::<Vec<_>>();
		if names.len() < 2 {
			return Ok(());
		}

		let numeric = NUMERIC_VALUE_PROPERTIES.contains(&names[0]);
		if numeric {
			// Move the numeric value behind the other aliases, so the order is (short, long, others)
			let value = names.remove(1);
			names.push(value);
		}
		if names[1] == MISSING_ALIAS && names.len() > 2 {
			names[1] = names[2];
		}

		let idx = *self.by_short.get(names[0]).ok_or_else(|| CompileError::not_found("Property", names[0]))?;
		let record = &mut self.properties[idx];
		let value = if numeric {
			let last = names[names.len() - 1];
			last.parse::<u32>().map_err(|_| CompileError::malformed(source_name, Some(line_number), format!("'{last}' is not a numeric value of '{}'", names[0])))?
		} else {
			record.values.len() as u32
		};

		record.values.push(ValueAliasGroup {
			names: names[1..].iter().map(|name| name.to_string()).collect(),
			value,
		});
		Ok(())
	}

	/// Iterate over all properties, in the order they are listed in `PropertyAliases.txt`
	pub fn properties(&self) -> impl Iterator<Item = &PropertyRecord> {
		self.properties.iter()
	}

	/// Get a property by its short name or its long name
	pub fn property(&self, short_or_long_name: &str) -> Result<&PropertyRecord> {
		if let Some(&idx) = self.by_short.get(short_or_long_name) {
			return Ok(&self.properties[idx]);
		}
		self.properties.iter()
			.find(|record| record.long_name() == short_or_long_name)
			.ok_or_else(|| CompileError::not_found("Property", short_or_long_name))
	}

	/// Get the record of a property known at compile time
	pub fn property_of(&self, id: PropertyId) -> Result<&PropertyRecord> {
		self.property(id.short_name())
	}

	/// Get the long name of a property from any of its aliases, ignoring anything but letters and digits
	pub fn long_name(&self, alias: &str) -> Result<&str> {
		self.properties.iter()
			.find(|record| same_name(record.short_name(), alias) || record.aliases.iter().any(|name| same_name(name, alias)))
			.map(|record| record.long_name())
			.ok_or_else(|| CompileError::not_found("Property", alias))
	}

	/// Get the short name of a property from its long name
	pub fn short_name(&self, long_name: &str) -> Result<&str> {
		self.properties.iter()
			.find(|record| record.long_name() == long_name)
			.map(|record| record.short_name())
			.ok_or_else(|| CompileError::not_found("Property", long_name))
	}

	/// Get the group of aliases containing the exact `value_alias`
	pub fn value_group(&self, property: &str, value_alias: &str) -> Result<&ValueAliasGroup> {
		let record = self.property(property)?;
		record.value_group(value_alias).ok_or_else(|| CompileError::NotFound {
			what: "Property value",
			name: format!("{value_alias}' for '{}", record.long_name()),
		})
	}

	/// Get the long name of a property value from any of its aliases
	pub fn long_value_name(&self, property: &str, value_alias: &str) -> Result<&str> {
		self.value_group(property, value_alias).map(|group| group.long())
	}

	/// Get all binary properties, in catalog order, skipping the `excluded` ones.
	/// 
	/// The position of a property in the returned list is its value in the generated tables.
	pub fn binary_properties(&self, excluded: &[String]) -> Vec<&PropertyRecord> {
		self.properties.iter()
			.filter(|record| record.has_binary_shape())
			.filter(|record| !excluded.iter().any(|name| loose_eq(name, record.short_name()) || loose_eq(name, record.long_name())))
			.collect()
	}
}

/// Compare names using only their letters and digits
fn same_name(a: &str, b: &str) -> bool {
	let a = a.chars().filter(|ch| ch.is_ascii_alphanumeric());
	let b = b.chars().filter(|ch| ch.is_ascii_alphanumeric());
	a.eq(b)
}

#[cfg(test)]
pub(crate) mod test {
	use super::*;

	pub(crate) const PROPERTY_ALIASES: &str = "\
# PropertyAliases-5.1.0.txt
blk      ; Block
ccc      ; Canonical_Combining_Class
dm       ; Decomposition_Mapping
dt       ; Decomposition_Type
ea       ; East_Asian_Width
gc       ; General_Category
lb       ; Line_Break
na       ; Name
sc       ; Script
Dash     ; Dash
Gr_Link  ; Grapheme_Link
WSpace   ; White_Space              ; space
";

	pub(crate) const PROPERTY_VALUE_ALIASES: &str = "\
blk; ASCII                      ; Basic_Latin
blk; n/a                        ; Latin_1_Supplement
blk; NB                         ; No_Block
ccc;   0; NR                    ; Not_Reordered
ccc; 230; A                     ; Above
dt ; can                        ; canonical
dt ; com                        ; compat
dt ; none                       ; None
ea ; N                          ; Neutral
ea ; W                          ; Wide
gc ; C                          ; Other                  # Cc | Cf | Cn | Co | Cs
gc ; Cn                         ; Unassigned
gc ; L                          ; Letter                 # Ll | Lm | Lo | Lt | Lu
gc ; LC                         ; Cased_Letter           ; L&
gc ; Lu                         ; Uppercase_Letter
gc ; Ll                         ; Lowercase_Letter
gc ; Nd                         ; Decimal_Number         ; digit
lb ; AL                         ; Alphabetic
lb ; XX                         ; Unknown
sc ; Latn                       ; Latin
sc ; Zyyy                       ; Common
sc ; Zzzz                       ; Unknown
Dash; N                         ; No                     ; F                          ; False
Dash; Y                         ; Yes                    ; T                          ; True
Gr_Link; N                      ; No                     ; F                          ; False
Gr_Link; Y                      ; Yes                    ; T                          ; True
WSpace; N                       ; No                     ; F                          ; False
WSpace; Y                       ; Yes                    ; T                          ; True
";

	pub(crate) fn catalog() -> NameCatalog {
		NameCatalog::parse(PROPERTY_ALIASES, PROPERTY_VALUE_ALIASES).unwrap()
	}

	#[test]
	fn property_names() {
		let catalog = catalog();
		assert_eq!(catalog.property("sc").unwrap().long_name(), "Script");
		assert_eq!(catalog.property("White_Space").unwrap().short_name(), "WSpace");
		assert_eq!(catalog.long_name("space").unwrap(), "White_Space");
		assert_eq!(catalog.long_name("White-Space").unwrap(), "White_Space");
		assert_eq!(catalog.short_name("Line_Break").unwrap(), "lb");
		assert!(matches!(catalog.property("Bidi_Class"), Err(CompileError::NotFound { .. })));
	}

	#[test]
	fn value_names() {
		let catalog = catalog();
		assert_eq!(catalog.long_value_name("sc", "Latn").unwrap(), "Latin");
		assert_eq!(catalog.long_value_name("Script", "Latin").unwrap(), "Latin");
		assert_eq!(catalog.value_group("sc", "Zzzz").unwrap().value(), 2);
		assert!(matches!(catalog.long_value_name("sc", "Grek"), Err(CompileError::NotFound { .. })));
	}

	#[test]
	fn irregular_value_lines() {
		let catalog = catalog();

		// numeric value moves behind the aliases and becomes the value
		let above = catalog.value_group("ccc", "A").unwrap();
		assert_eq!(above.aliases(), ["A", "Above", "230"]);
		assert_eq!(above.value(), 230);

		// `n/a` is replaced by the long name
		let latin1 = catalog.value_group("blk", "Latin_1_Supplement").unwrap();
		assert_eq!(latin1.aliases(), ["Latin_1_Supplement", "Latin_1_Supplement"]);
		assert_eq!(latin1.value(), 1);
	}

	#[test]
	fn binary_detection() {
		let catalog = catalog();
		let names = catalog.binary_properties(&["Gr_Link".to_string()])
			.into_iter()
			.map(|record| record.short_name())
			.collect::<Vec<_>>();
		assert_eq!(names, vec!["Dash", "WSpace"]);

		let all = catalog.binary_properties(&[]);
		assert_eq!(all.len(), 3);
	}

	#[test]
	fn unknown_property_in_value_aliases() {
		let res = NameCatalog::parse(PROPERTY_ALIASES, "bc ; L ; Left_To_Right\n");
		assert!(matches!(res, Err(CompileError::NotFound { what: "Property", .. })));
	}
}
