//! Sink writing the tables as rust source files, meant to be included into a single module.

use std::{
	collections::BTreeMap,
	fmt::{self, Write},
	fs,
	path::{Path, PathBuf},
};
use uprops_logging::log_info;
use crate::{
	binary::{BinaryPropertyTable, ElementWidth},
	case_folding::{CaseFoldingTables, SimpleFoldings},
	combining_class::CombiningClassTable,
	decomposition::DecompositionTables,
	name_index::NameIndex,
	partition::PartitionTable,
	sequence_table::SequenceTable,
	sink::{constant_name, snake_name, Accessor, Artifact, TableRecord, TableSink, ValueDefinition},
	Result, LOG_CAT,
};

const HEADER: &str = "// Automatically generated by uprops, do not edit.\n\n";
const VALUES_PER_LINE: usize = 16;

const DATA_TYPES: &str = "\
/// Start of a run of code points sharing a property value, the run ends at the next partition
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Partition {
	pub beginning: u32,
	pub value: u32,
}

/// Closed range of code points having a binary property
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Range<T> {
	pub first: T,
	pub last: T,
}

/// Folded property or property value name
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ValueName {
	pub name: &'static str,
	pub value: u32,
}

";

/// Writes every artifact to its own file in the output directory, once the sink is finished
pub struct RustSourceSink {
	out_dir: PathBuf,
	buffers: BTreeMap<Artifact, String>,
}

impl RustSourceSink {
	pub fn new(out_dir: &Path) -> Self {
		Self { out_dir: out_dir.to_path_buf(), buffers: BTreeMap::new() }
	}

	/// Render a single record as rust source
	pub fn render(record: &TableRecord, out: &mut String) -> Result<()> {
		match record {
			TableRecord::DataTypes => out.push_str(DATA_TYPES),
			TableRecord::ValueDefinitions { property, values } => write_definitions(out, property, values)?,
			TableRecord::Partitions(table) => write_partitions(out, table)?,
			TableRecord::BinaryProperty(table) => write_binary_property(out, table)?,
			TableRecord::NameIndex(index) => write_name_index(out, index)?,
			TableRecord::CaseFolding(tables) => write_case_folding(out, tables)?,
			TableRecord::CombiningClass(table) => write_combining_class(out, table)?,
			TableRecord::Decomposition(tables) => write_decomposition(out, tables)?,
			TableRecord::Accessor(accessor) => write_accessor(out, accessor)?,
		}
		Ok(())
	}
}

impl TableSink for RustSourceSink {
	fn emit(&mut self, record: TableRecord) -> Result<()> {
		let out = self.buffers.entry(record.artifact()).or_default();
		Self::render(&record, out)
	}

	fn finish(&mut self) -> Result<()> {
		fs::create_dir_all(&self.out_dir)?;
		for (artifact, content) in &self.buffers {
			let path = self.out_dir.join(artifact.file_name());
			fs::write(&path, format!("{HEADER}{content}"))?;
			log_info!(LOG_CAT, "Wrote {}", path.display());
		}
		Ok(())
	}
}

struct Hex<T>(T);

impl<T: fmt::LowerHex> fmt::Display for Hex<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:#x}", self.0)
	}
}

fn hex<T: Copy>(values: &[T]) -> Vec<Hex<T>> {
	values.iter().map(|value| Hex(*value)).collect()
}

/// Write a constant array of plain values
fn write_list<T: fmt::Display>(out: &mut String, name: &str, ty: &str, values: &[T]) -> fmt::Result {
	writeln!(out, "pub const {name}: [{ty}; {}] = [", values.len())?;
	for chunk in values.chunks(VALUES_PER_LINE) {
		out.push('\t');
		for (idx, value) in chunk.iter().enumerate() {
			if idx != 0 {
				out.push(' ');
			}
			write!(out, "{value},")?;
		}
		out.push('\n');
	}
	writeln!(out, "];\n")
}

/// Write a constant array of records, one record per line
fn write_records<T, F>(out: &mut String, name: &str, ty: &str, records: &[T], mut f: F) -> fmt::Result where
	F: FnMut(&mut String, &T) -> fmt::Result
{
	writeln!(out, "pub const {name}: [{ty}; {}] = [", records.len())?;
	for record in records {
		out.push('\t');
		f(out, record)?;
		out.push_str(",\n");
	}
	writeln!(out, "];\n")
}

fn write_definitions(out: &mut String, property: &str, values: &[ValueDefinition]) -> fmt::Result {
	writeln!(out, "pub mod {} {{", snake_name(property))?;
	for value in values {
		writeln!(out, "\t/// {}", value.long_name)?;
		writeln!(out, "\tpub const {}: u32 = {};", value.constant, value.value)?;
	}
	writeln!(out, "}}\n")
}

fn write_partitions(out: &mut String, table: &PartitionTable) -> fmt::Result {
	let name = format!("{}_PARTITIONS", constant_name(table.property()));
	write_records(out, &name, "Partition", table.partitions(), |out, partition| {
		write!(out, "Partition {{ beginning: {:#x}, value: {} }}", partition.beginning, partition.value)
	})
}

fn write_binary_property(out: &mut String, table: &BinaryPropertyTable) -> fmt::Result {
	let name = format!("{}_RANGES", constant_name(table.long_name()));
	let ty = format!("Range<{}>", table.width().rust_type());
	write_records(out, &name, &ty, table.ranges(), |out, range| {
		write!(out, "Range {{ first: {:#x}, last: {:#x} }}", range.first, range.last)
	})
}

fn write_name_index(out: &mut String, index: &NameIndex) -> fmt::Result {
	let name = format!("{}_NAMES", constant_name(index.name()));
	write_records(out, &name, "ValueName", index.entries(), |out, entry| {
		write!(out, "ValueName {{ name: {:?}, value: {} }}", entry.folded, entry.value)
	})
}

fn write_simple_foldings(out: &mut String, prefix: &str, foldings: &SimpleFoldings) -> fmt::Result {
	write_list(out, &format!("{prefix}_CASED"), "u32", &hex(&foldings.sources))?;
	write_list(out, &format!("{prefix}_FOLDED"), "u32", &hex(&foldings.destinations))
}

fn write_sequence_table(out: &mut String, source: &str, destination: &str, offsets: &str, table: &SequenceTable) -> fmt::Result {
	write_list(out, source, "u32", &hex(table.sources()))?;
	write_list(out, destination, "u16", &hex(table.units()))?;
	write_list(out, offsets, "usize", table.offsets())
}

fn write_case_folding(out: &mut String, tables: &CaseFoldingTables) -> fmt::Result {
	write_simple_foldings(out, "COMMON", &tables.common)?;
	write_simple_foldings(out, "SIMPLE", &tables.simple)?;
	write_sequence_table(out, "FULL_CASED", "FULL_FOLDED", "FULL_FOLDED_OFFSETS", &tables.full)
}

fn write_combining_class(out: &mut String, table: &CombiningClassTable) -> fmt::Result {
	fn split<T: Copy>(entries: &[(T, u8)]) -> (Vec<Hex<T>>, Vec<u8>) {
		entries.iter().map(|&(code_point, class)| (Hex(code_point), class)).unzip()
	}

	match table {
		CombiningClassTable::Sparse(entries) => {
			let (characters, values) = split(entries);
			write_list(out, "CANONICAL_COMBINING_CLASS_CHARACTERS", "u32", &characters)?;
			write_list(out, "CANONICAL_COMBINING_CLASS_VALUES", "u8", &values)
		},
		CombiningClassTable::Legacy { bmp, supplementary } => {
			let (characters, values) = split(bmp);
			write_list(out, "CANONICAL_COMBINING_CLASS_BMP_CHARACTERS", "u16", &characters)?;
			write_list(out, "CANONICAL_COMBINING_CLASS_BMP_VALUES", "u8", &values)?;
			let (characters, values) = split(supplementary);
			write_list(out, "CANONICAL_COMBINING_CLASS_SUPPLEMENTARY_CHARACTERS", "u32", &characters)?;
			write_list(out, "CANONICAL_COMBINING_CLASS_SUPPLEMENTARY_VALUES", "u8", &values)
		},
	}
}

fn write_decomposition(out: &mut String, tables: &DecompositionTables) -> fmt::Result {
	write_sequence_table(out, "CANONICAL_MAPPING_SOURCE", "CANONICAL_MAPPING_DESTINATION", "CANONICAL_MAPPING_OFFSETS", &tables.canonical)?;
	write_sequence_table(out, "COMPATIBILITY_MAPPING_SOURCE", "COMPATIBILITY_MAPPING_DESTINATION", "COMPATIBILITY_MAPPING_OFFSETS", &tables.compatibility)
}

fn write_accessor(out: &mut String, accessor: &Accessor) -> fmt::Result {
	match accessor {
		Accessor::Partition { property } => {
			let table = format!("{}_PARTITIONS", constant_name(property));
			writeln!(out, "/// Get the '{property}' value of a code point, `None` for invalid code points")?;
			writeln!(out, "#[inline]")?;
			writeln!(out, "pub fn {}_of(c: u32) -> Option<u32> {{", snake_name(property))?;
			writeln!(out, "\tif c > 0x10FFFF {{\n\t\treturn None;\n\t}}")?;
			writeln!(out, "\tlet idx = {table}.partition_point(|partition| partition.beginning <= c);")?;
			writeln!(out, "\tSome({table}[idx - 1].value)")?;
		},
		Accessor::Binary { property, width } => {
			let table = format!("{}_RANGES", constant_name(property));
			writeln!(out, "/// Check if a code point has the '{property}' property")?;
			writeln!(out, "#[inline]")?;
			writeln!(out, "pub fn is_{}(c: u32) -> bool {{", snake_name(property))?;
			match width {
				ElementWidth::Narrow => {
					writeln!(out, "\tif c > 0xFFFF {{\n\t\treturn false;\n\t}}")?;
					writeln!(out, "\tlet c = c as u16;")?;
				},
				ElementWidth::Wide => writeln!(out, "\tif c > 0x10FFFF {{\n\t\treturn false;\n\t}}")?,
			}
			writeln!(out, "\tlet idx = {table}.partition_point(|range| range.first <= c);")?;
			writeln!(out, "\tidx > 0 && c <= {table}[idx - 1].last")?;
		},
		Accessor::Name { property, sentinel } => {
			let table = format!("{}_NAMES", constant_name(property));
			writeln!(out, "/// Get the '{property}' value with the given name, case and separators are ignored")?;
			writeln!(out, "#[inline]")?;
			writeln!(out, "pub fn {}_from_name(name: &str) -> Option<u32> {{", snake_name(property))?;
			match sentinel {
				Some(sentinel) => writeln!(out, "\tlet suffix = if uprops_base::fold_chars(name).count() == 1 {{ Some({sentinel:?}) }} else {{ None }};")?,
				None => writeln!(out, "\tlet suffix = None;")?,
			}
			writeln!(out, "\t{table}.binary_search_by(|entry| uprops_base::cmp_folded(entry.name, name, suffix))")?;
			writeln!(out, "\t\t.ok()\n\t\t.map(|idx| {table}[idx].value)")?;
		},
		Accessor::CombiningClass { legacy: false } => {
			writeln!(out, "/// Get the canonical combining class of a code point")?;
			writeln!(out, "#[inline]")?;
			writeln!(out, "pub fn canonical_combining_class_of(c: u32) -> u8 {{")?;
			writeln!(out, "\tCANONICAL_COMBINING_CLASS_CHARACTERS.binary_search(&c)")?;
			writeln!(out, "\t\t.map_or(0, |idx| CANONICAL_COMBINING_CLASS_VALUES[idx])")?;
		},
		Accessor::CombiningClass { legacy: true } => {
			writeln!(out, "/// Get the canonical combining class of a code point")?;
			writeln!(out, "#[inline]")?;
			writeln!(out, "pub fn canonical_combining_class_of(c: u32) -> u8 {{")?;
			writeln!(out, "\tif c < 0x10000 {{")?;
			writeln!(out, "\t\tCANONICAL_COMBINING_CLASS_BMP_CHARACTERS.binary_search(&(c as u16))")?;
			writeln!(out, "\t\t\t.map_or(0, |idx| CANONICAL_COMBINING_CLASS_BMP_VALUES[idx])")?;
			writeln!(out, "\t}} else {{")?;
			writeln!(out, "\t\tCANONICAL_COMBINING_CLASS_SUPPLEMENTARY_CHARACTERS.binary_search(&c)")?;
			writeln!(out, "\t\t\t.map_or(0, |idx| CANONICAL_COMBINING_CLASS_SUPPLEMENTARY_VALUES[idx])")?;
			writeln!(out, "\t}}")?;
		},
		Accessor::FullCaseFolding => {
			writeln!(out, "/// Get the simple case folding of a code point")?;
			writeln!(out, "#[inline]")?;
			writeln!(out, "pub fn simple_case_folding(c: u32) -> u32 {{")?;
			writeln!(out, "\tif let Ok(idx) = COMMON_CASED.binary_search(&c) {{\n\t\treturn COMMON_FOLDED[idx];\n\t}}")?;
			writeln!(out, "\tSIMPLE_CASED.binary_search(&c).map_or(c, |idx| SIMPLE_FOLDED[idx])")?;
			writeln!(out, "}}\n")?;
			write_sequence_accessor(out, "Get the full case folding of a code point as UTF-16, if it differs from its simple case folding", "full_case_folding", "FULL_CASED", "FULL_FOLDED", "FULL_FOLDED_OFFSETS")?;
			return Ok(());
		},
		Accessor::Decomposition => {
			write_sequence_accessor(out, "Get the canonical decomposition of a code point as UTF-16", "canonical_decomposition", "CANONICAL_MAPPING_SOURCE", "CANONICAL_MAPPING_DESTINATION", "CANONICAL_MAPPING_OFFSETS")?;
			write_sequence_accessor(out, "Get the compatibility decomposition of a code point as UTF-16", "compatibility_decomposition", "COMPATIBILITY_MAPPING_SOURCE", "COMPATIBILITY_MAPPING_DESTINATION", "COMPATIBILITY_MAPPING_OFFSETS")?;
			return Ok(());
		},
	}
	writeln!(out, "}}\n")
}

fn write_sequence_accessor(out: &mut String, doc: &str, func: &str, source: &str, destination: &str, offsets: &str) -> fmt::Result {
	writeln!(out, "/// {doc}")?;
	writeln!(out, "#[inline]")?;
	writeln!(out, "pub fn {func}(c: u32) -> Option<&'static [u16]> {{")?;
	writeln!(out, "\tlet idx = {source}.binary_search(&c).ok()?;")?;
	writeln!(out, "\tSome(&{destination}[{offsets}[idx]..{offsets}[idx + 1]])")?;
	writeln!(out, "}}\n")
}
