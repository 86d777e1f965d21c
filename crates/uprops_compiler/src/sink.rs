//! Structured table records and the sinks receiving them.

use crate::{
	binary::{BinaryPropertyTable, ElementWidth},
	case_folding::CaseFoldingTables,
	combining_class::CombiningClassTable,
	decomposition::DecompositionTables,
	name_index::NameIndex,
	partition::PartitionTable,
	Result,
};

/// Group of records written together
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Artifact {
	/// Record types shared by all tables
	DataTypes,
	/// Value constants of the compiled properties
	Definitions,
	CodeTable,
	ValueNames,
	/// Lookup functions
	Inlines,
	DecompositionMappingTable,
}

impl Artifact {
	pub const ALL: [Artifact; 6] = [
		Artifact::DataTypes,
		Artifact::Definitions,
		Artifact::CodeTable,
		Artifact::ValueNames,
		Artifact::Inlines,
		Artifact::DecompositionMappingTable,
	];

	pub fn file_name(self) -> &'static str {
		match self {
			Artifact::DataTypes => "uprops_data_types.rs",
			Artifact::Definitions => "uprops_definitions.rs",
			Artifact::CodeTable => "uprops_code_table.rs",
			Artifact::ValueNames => "uprops_value_names.rs",
			Artifact::Inlines => "uprops_inlines.rs",
			Artifact::DecompositionMappingTable => "uprops_decomposition_mapping_table.rs",
		}
	}
}

/// Named value of a property
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ValueDefinition {
	pub value:     u32,
	pub long_name: String,
	/// Name of the generated constant, e.g. `UPPERCASE_LETTER`
	pub constant:  String,
}

impl ValueDefinition {
	pub fn new(value: u32, long_name: &str) -> Self {
		Self { value, long_name: long_name.to_string(), constant: constant_name(long_name) }
	}
}

/// Lookup function generated for a table
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Accessor {
	/// Value of a code point in a partition table
	Partition { property: String },
	/// Membership of a code point in a binary property
	Binary { property: String, width: ElementWidth },
	/// Value of a name in a name index
	Name { property: String, sentinel: Option<char> },
	CombiningClass { legacy: bool },
	FullCaseFolding,
	Decomposition,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TableRecord {
	DataTypes,
	ValueDefinitions { property: String, values: Vec<ValueDefinition> },
	Partitions(PartitionTable),
	BinaryProperty(BinaryPropertyTable),
	NameIndex(NameIndex),
	CaseFolding(CaseFoldingTables),
	CombiningClass(CombiningClassTable),
	Decomposition(DecompositionTables),
	Accessor(Accessor),
}

impl TableRecord {
	pub fn artifact(&self) -> Artifact {
		match self {
			TableRecord::DataTypes => Artifact::DataTypes,
			TableRecord::ValueDefinitions { .. } => Artifact::Definitions,
			TableRecord::Partitions(_) |
			TableRecord::BinaryProperty(_) |
			TableRecord::CaseFolding(_) |
			TableRecord::CombiningClass(_) => Artifact::CodeTable,
			TableRecord::NameIndex(_) => Artifact::ValueNames,
			TableRecord::Decomposition(_) => Artifact::DecompositionMappingTable,
			TableRecord::Accessor(_) => Artifact::Inlines,
		}
	}
}

/// Receiver of the compiled tables.
/// 
/// Nothing emitted is considered usable until `finish` returns successfully.
pub trait TableSink {
	fn emit(&mut self, record: TableRecord) -> Result<()>;

	fn finish(&mut self) -> Result<()>;
}

/// Sink keeping all records in memory
#[derive(Default, Debug)]
pub struct MemorySink {
	records:  Vec<TableRecord>,
	finished: bool,
}

impl MemorySink {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn records(&self) -> &[TableRecord] {
		&self.records
	}

	pub fn records_for(&self, artifact: Artifact) -> impl Iterator<Item = &TableRecord> {
		self.records.iter().filter(move |record| record.artifact() == artifact)
	}

	pub fn is_finished(&self) -> bool {
		self.finished
	}
}

impl TableSink for MemorySink {
	fn emit(&mut self, record: TableRecord) -> Result<()> {
		self.records.push(record);
		Ok(())
	}

	fn finish(&mut self) -> Result<()> {
		self.finished = true;
		Ok(())
	}
}

/// Name of a constant for a property or value name: uppercase, with every other character replaced by `_`
pub fn constant_name(name: &str) -> String {
	name.chars()
		.map(|ch| if ch.is_ascii_alphanumeric() { ch.to_ascii_uppercase() } else { '_' })
		.collect()
}

/// Name of a function or module for a property name: lowercase, with every other character replaced by `_`
pub fn snake_name(name: &str) -> String {
	constant_name(name).to_ascii_lowercase()
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn names() {
		assert_eq!(constant_name("Latin_1_Supplement"), "LATIN_1_SUPPLEMENT");
		assert_eq!(constant_name("Latin-1 Supplement"), "LATIN_1_SUPPLEMENT");
		assert_eq!(snake_name("General_Category"), "general_category");
		assert_eq!(ValueDefinition::new(3, "Cased_Letter").constant, "CASED_LETTER");
	}

	#[test]
	fn memory_sink_groups_by_artifact() {
		let mut sink = MemorySink::new();
		sink.emit(TableRecord::DataTypes).unwrap();
		sink.emit(TableRecord::Accessor(Accessor::FullCaseFolding)).unwrap();
		sink.emit(TableRecord::Accessor(Accessor::Decomposition)).unwrap();
		assert!(!sink.is_finished());
		sink.finish().unwrap();

		assert!(sink.is_finished());
		assert_eq!(sink.records().len(), 3);
		assert_eq!(sink.records_for(Artifact::Inlines).count(), 2);
		assert_eq!(sink.records_for(Artifact::CodeTable).count(), 0);
	}
}
