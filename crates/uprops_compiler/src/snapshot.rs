//! Character records of a UCD snapshot, with the values of the enclosing groups already applied.

use std::collections::BTreeMap;
use crate::{CodePointRange, Result};

/// Kind of element a character record was read from
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RecordKind {
	Char,
	Noncharacter,
	Reserved,
	Surrogate,
}

impl RecordKind {
	/// Get the kind of a snapshot element from its tag
	pub fn from_tag(tag: &[u8]) -> Option<Self> {
		match tag {
			b"char" => Some(Self::Char),
			b"noncharacter" => Some(Self::Noncharacter),
			b"reserved" => Some(Self::Reserved),
			b"surrogate" => Some(Self::Surrogate),
			_ => None,
		}
	}
}

/// A single code point or range of code points sharing the same attribute values
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CharRecord {
	pub kind:  RecordKind,
	pub range: CodePointRange,
	values:    Vec<Option<String>>,
}

impl CharRecord {
	/// Create a record, `values` contains a value for each requested attribute, in request order
	pub fn new(kind: RecordKind, range: CodePointRange, values: Vec<Option<String>>) -> Self {
		Self { kind, range, values }
	}

	/// Get the effective value of the `idx`-th requested attribute
	pub fn value(&self, idx: usize) -> Option<&str> {
		self.values.get(idx).and_then(|value| value.as_deref())
	}
}

/// A named block
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BlockRecord {
	pub range: CodePointRange,
	pub name:  String,
}

/// Lazy iterator over the character records of a snapshot
pub type RecordIter<'a> = Box<dyn Iterator<Item = Result<CharRecord>> + 'a>;

/// Source of UCD character records.
/// 
/// Every call to `records` starts a new pass over the snapshot.
pub trait UcdSnapshot {
	/// Iterate over all character records, only keeping the given attributes (e.g. `["sc"]`, `["dt", "dm", "na"]`)
	fn records<'a>(&'a self, attributes: &[&str]) -> Result<RecordIter<'a>>;

	/// Get all blocks, in snapshot order
	fn blocks(&self) -> Result<Vec<BlockRecord>>;
}

/// Snapshot kept in memory
#[derive(Clone, Default, Debug)]
pub struct MemorySnapshot {
	chars:  Vec<(RecordKind, CodePointRange, BTreeMap<String, String>)>,
	blocks: Vec<BlockRecord>,
}

impl MemorySnapshot {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a `char` record with its effective attribute values
	pub fn add_char(&mut self, range: CodePointRange, values: &[(&str, &str)]) -> &mut Self {
		self.add_record(RecordKind::Char, range, values)
	}

	pub fn add_record(&mut self, kind: RecordKind, range: CodePointRange, values: &[(&str, &str)]) -> &mut Self {
		let values = values.iter().map(|(key, value)| (key.to_string(), value.to_string())).collect();
		self.chars.push((kind, range, values));
		self
	}

	pub fn add_block(&mut self, range: CodePointRange, name: &str) -> &mut Self {
		self.blocks.push(BlockRecord { range, name: name.to_string() });
		self
	}
}

impl UcdSnapshot for MemorySnapshot {
	fn records<'a>(&'a self, attributes: &[&str]) -> Result<RecordIter<'a>> {
		let attributes = attributes.iter().map(|attr| attr.to_string()).collect::<Vec<_>>();
		Ok(Box::new(self.chars.iter().map(move |(kind, range, values)| {
			let values = attributes.iter().map(|attr| values.get(attr).cloned()).collect();
			Ok(CharRecord::new(*kind, *range, values))
		})))
	}

	fn blocks(&self) -> Result<Vec<BlockRecord>> {
		Ok(self.blocks.clone())
	}
}
