//! Variable length mappings stored as a source array, a flattened UTF-16 destination array and an offset array.

use crate::code_point::encode_utf16;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SequenceTable {
	sources: Vec<u32>,
	units:   Vec<u16>,
	/// `offsets[i]..offsets[i + 1]` is the range of `units` holding the `i`-th mapping
	offsets: Vec<usize>,
}

impl Default for SequenceTable {
	fn default() -> Self {
		Self { sources: Vec::new(), units: Vec::new(), offsets: vec![0] }
	}
}

impl SequenceTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a table from unsorted mappings, the mappings are sorted by source code point
	pub fn from_mappings(mut mappings: Vec<(u32, Vec<u32>)>) -> Self {
		mappings.sort_by_key(|(source, _)| *source);
		let mut table = Self::new();
		for (source, destination) in &mappings {
			table.push(*source, destination);
		}
		table
	}

	/// Append a mapping, supplementary code points in `destination` are stored as surrogate pairs
	pub fn push(&mut self, source: u32, destination: &[u32]) {
		self.sources.push(source);
		encode_utf16(destination, &mut self.units);
		self.offsets.push(self.units.len());
	}

	pub fn len(&self) -> usize {
		self.sources.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}

	pub fn sources(&self) -> &[u32] {
		&self.sources
	}

	pub fn units(&self) -> &[u16] {
		&self.units
	}

	pub fn offsets(&self) -> &[usize] {
		&self.offsets
	}

	/// Get the UTF-16 destination of the `idx`-th mapping
	pub fn get(&self, idx: usize) -> Option<&[u16]> {
		let begin = *self.offsets.get(idx)?;
		let end = *self.offsets.get(idx + 1)?;
		Some(&self.units[begin..end])
	}

	/// Get the UTF-16 destination of a source code point
	pub fn find(&self, source: u32) -> Option<&[u16]> {
		let idx = self.sources.binary_search(&source).ok()?;
		self.get(idx)
	}
}
