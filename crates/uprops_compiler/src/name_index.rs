//! Sorted indices of folded names, used to find a value from any of its aliases.

use uprops_base::{cmp_folded, fold_chars};
use crate::{names::PropertyRecord, CompileError, Result};

/// Property whose single letter value aliases need to be told apart from its other value aliases
const SENTINEL_PROPERTY: &str = "gc";
const SENTINEL: char = '&';

/// Fold a name for lookup: lowercase it and drop underscores, hyphens and whitespace
pub fn fold_name(name: &str) -> String {
	fold_chars(name).collect()
}

/// Folded alias with the value it resolves to
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NameAlias {
	pub folded: String,
	pub value:  u32,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NameIndex {
	name:            String,
	entries:         Vec<NameAlias>,
	single_sentinel: bool,
}

impl NameIndex {
	/// Index all value aliases of a property
	pub fn for_property(record: &PropertyRecord) -> Self {
		let single_sentinel = record.short_name() == SENTINEL_PROPERTY;
		let mut entries = Vec::new();
		for group in record.values() {
			for alias in group.aliases() {
				entries.push((NameAlias { folded: fold_alias(alias, single_sentinel), value: group.value() }, group.long()));
			}
		}
		Self::new(record.long_name(), entries, single_sentinel)
	}

	/// Index the names of the binary properties, a property's value is its position in `binaries`
	pub fn for_binary_properties(name: &str, binaries: &[&PropertyRecord]) -> Self {
		let mut entries = Vec::new();
		for (value, record) in binaries.iter().enumerate() {
			let value = value as u32;
			entries.push((NameAlias { folded: fold_name(record.short_name()), value }, record.long_name()));
			for alias in record.aliases() {
				entries.push((NameAlias { folded: fold_name(alias), value }, record.long_name()));
			}
		}
		Self::new(name, entries, false)
	}

	/// Sort the entries by name, then by the long name of their value, and drop duplicate names.
	/// 
	/// Of colliding names, the value with the smallest long name is kept.
	fn new(name: &str, mut entries: Vec<(NameAlias, &str)>, single_sentinel: bool) -> Self {
		entries.sort_by(|(a, a_long), (b, b_long)| (&a.folded, a_long).cmp(&(&b.folded, b_long)));
		let mut entries = entries.into_iter().map(|(entry, _)| entry).collect::<Vec<_>>();
		entries.dedup_by(|next, prev| next.folded == prev.folded);
		Self { name: name.to_string(), entries, single_sentinel }
	}

	/// Add a name that no value group lists, an existing entry for the same name is kept
	pub fn insert(&mut self, name: &str, value: u32) {
		let folded = fold_alias(name, self.single_sentinel);
		if let Err(idx) = self.entries.binary_search_by(|entry| entry.folded.cmp(&folded)) {
			self.entries.insert(idx, NameAlias { folded, value });
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Character appended to a folded single letter name, if this index disambiguates them
	pub fn sentinel(&self) -> Option<char> {
		self.single_sentinel.then_some(SENTINEL)
	}

	fn sentinel_for(&self, name: &str) -> Option<char> {
		sentinel(name, self.single_sentinel)
	}

	pub fn entries(&self) -> &[NameAlias] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Find the value of a name, the name is folded before the lookup
	pub fn resolve(&self, name: &str) -> Result<u32> {
		let suffix = self.sentinel_for(name);
		self.entries.binary_search_by(|entry| cmp_folded(&entry.folded, name, suffix))
			.map(|idx| self.entries[idx].value)
			.map_err(|_| CompileError::NotFound { what: "Name", name: format!("{name}' in '{}", self.name) })
	}
}

fn fold_alias(alias: &str, single_sentinel: bool) -> String {
	let mut folded = fold_name(alias);
	folded.extend(sentinel(alias, single_sentinel));
	folded
}

// Decided on the folded name, so `_L` and `L ` are single letter names too
fn sentinel(alias: &str, single_sentinel: bool) -> Option<char> {
	(single_sentinel && fold_chars(alias).count() == 1).then_some(SENTINEL)
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::names::test::catalog;

	#[test]
	fn folding() {
		assert_eq!(fold_name("Line_Break"), "linebreak");
		assert_eq!(fold_name("East Asian-Width"), "eastasianwidth");
		assert_eq!(fold_name("L&"), "l&");
	}

	#[test]
	fn every_alias_resolves_to_its_group() {
		let catalog = catalog();
		let record = catalog.property("sc").unwrap();
		let index = NameIndex::for_property(record);
		for group in record.values() {
			for alias in group.aliases() {
				assert_eq!(index.resolve(alias).unwrap(), group.value());
			}
		}
		assert_eq!(index.resolve("LATIN").unwrap(), 0);
		assert!(matches!(index.resolve("Greek"), Err(CompileError::NotFound { .. })));
	}

	#[test]
	fn keys_are_sorted_and_unique() {
		let catalog = catalog();
		let index = NameIndex::for_property(catalog.property("gc").unwrap());
		assert!(index.entries().windows(2).all(|pair| pair[0].folded < pair[1].folded));
	}

	#[test]
	fn single_letter_categories() {
		let catalog = catalog();
		let record = catalog.property("gc").unwrap();
		let index = NameIndex::for_property(record);
		let letter = record.value_group("L").unwrap().value();

		assert!(index.entries().iter().any(|entry| entry.folded == "l&"));
		assert!(!index.entries().iter().any(|entry| entry.folded == "l"));
		let cased_letter = record.value_group("LC").unwrap().value();
		// `L` and the `L&` alias of Cased_Letter fold to the same key, Cased_Letter sorts first
		assert_eq!(index.resolve("L&").unwrap(), cased_letter);
		assert_eq!(index.resolve("L").unwrap(), cased_letter);
		assert_eq!(index.resolve("Letter").unwrap(), letter);
		assert_eq!(index.resolve("Cased_Letter").unwrap(), cased_letter);
		assert_eq!(index.resolve("C").unwrap(), record.value_group("Other").unwrap().value());
	}

	#[test]
	fn separators_around_single_letters() {
		let catalog = catalog();
		let record = catalog.property("gc").unwrap();
		let index = NameIndex::for_property(record);
		let other = record.value_group("C").unwrap().value();

		assert_eq!(index.resolve("C").unwrap(), other);
		assert_eq!(index.resolve("C ").unwrap(), other);
		assert_eq!(index.resolve("_c").unwrap(), other);
		assert_eq!(index.resolve("-C-").unwrap(), other);
	}

	#[test]
	fn inserted_names() {
		let catalog = catalog();
		let mut index = NameIndex::for_property(catalog.property("sc").unwrap());
		let len = index.len();

		index.insert("Not_Listed", 7);
		assert_eq!(index.len(), len + 1);
		assert_eq!(index.resolve("not listed").unwrap(), 7);
		assert!(index.entries().windows(2).all(|pair| pair[0].folded < pair[1].folded));

		index.insert("Latin", 7);
		assert_eq!(index.len(), len + 1);
		assert_eq!(index.resolve("Latin").unwrap(), 0);
	}

	#[test]
	fn binary_property_names() {
		let catalog = catalog();
		let binaries = catalog.binary_properties(&["Gr_Link".to_string()]);
		let index = NameIndex::for_binary_properties("Binary_Property", &binaries);
		assert_eq!(index.resolve("Dash").unwrap(), 0);
		assert_eq!(index.resolve("WSpace").unwrap(), 1);
		assert_eq!(index.resolve("white space").unwrap(), 1);
		assert_eq!(index.resolve("SPACE").unwrap(), 1);
		assert!(index.resolve("Gr_Link").is_err());
	}
}
