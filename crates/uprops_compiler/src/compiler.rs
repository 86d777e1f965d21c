//! Runs every table builder over a UCD snapshot, in a fixed order, and emits the results to a sink.

use std::path::Path;
use uprops_base::UcdPropertyT;
use uprops_logging::{log_info, log_verbose};
use crate::{
	binary::BinaryPropertyTable,
	block::{BlockTable, NO_BLOCK_NAME},
	case_folding::CaseFoldingTables,
	combining_class::{CombiningClassMode, CombiningClassTable},
	decomposition::DecompositionTables,
	name_index::NameIndex,
	names::{NameCatalog, PropertyRecord},
	partition::PartitionTable,
	range_compiler::compile_property,
	settings::Settings,
	sink::{Accessor, TableRecord, TableSink, ValueDefinition},
	snapshot::UcdSnapshot,
	xml::XmlSnapshot,
	CompileError, PropertyId, Result, LOG_CAT,
};

/// Name of the enumeration of binary properties
pub const BINARY_PROPERTY: &str = "Binary_Property";

pub struct Compiler {
	settings:     Settings,
	catalog:      NameCatalog,
	case_folding: CaseFoldingTables,
	snapshot:     Box<dyn UcdSnapshot>,
}

impl Compiler {
	pub fn new(settings: Settings, catalog: NameCatalog, case_folding: CaseFoldingTables, snapshot: Box<dyn UcdSnapshot>) -> Self {
		Self { settings, catalog, case_folding, snapshot }
	}

	/// Load the inputs: the UCD XML snapshot, and the flat text tables in `ucd_dir`
	pub fn open(settings: Settings, ucd_xml: &Path, ucd_dir: &Path) -> Result<Self> {
		let catalog = NameCatalog::load(ucd_dir)?;
		let case_folding = CaseFoldingTables::load(ucd_dir)?;
		let snapshot = Box::new(XmlSnapshot::open(ucd_xml));
		Ok(Self::new(settings, catalog, case_folding, snapshot))
	}

	pub fn catalog(&self) -> &NameCatalog {
		&self.catalog
	}

	/// Compile all tables into `sink`, the sink is only finished when every table compiled
	pub fn run(&self, sink: &mut dyn TableSink) -> Result<()> {
		sink.emit(TableRecord::DataTypes)?;
		self.compile_case_folding(sink)?;
		self.compile_decompositions(sink)?;
		for property in &self.settings.partitioned_properties {
			self.compile_partitioned_property(property, sink)?;
		}
		self.compile_blocks(sink)?;
		self.compile_combining_classes(sink)?;
		self.compile_binary_properties(sink)?;
		sink.finish()?;
		log_info!(LOG_CAT, "Done.");
		Ok(())
	}

	fn compile_case_folding(&self, sink: &mut dyn TableSink) -> Result<()> {
		sink.emit(TableRecord::CaseFolding(self.case_folding.clone()))?;
		sink.emit(TableRecord::Accessor(Accessor::FullCaseFolding))
	}

	fn compile_decompositions(&self, sink: &mut dyn TableSink) -> Result<()> {
		let tables = DecompositionTables::build(self.snapshot.as_ref())?;
		sink.emit(TableRecord::Decomposition(tables))?;
		sink.emit(TableRecord::Accessor(Accessor::Decomposition))
	}

	/// Find a property from any of its names
	fn property(&self, name: &str) -> Result<&PropertyRecord> {
		let long_name = self.catalog.long_name(name)?;
		self.catalog.property(long_name)
	}

	pub fn compile_partitioned_property(&self, name: &str, sink: &mut dyn TableSink) -> Result<()> {
		let record = self.property(name)?;
		log_verbose!(LOG_CAT, "Generating code for property '{}'...", record.long_name());

		let runs = compile_property(self.snapshot.as_ref(), record.short_name())?;
		let table = PartitionTable::build(record, &runs)?;
		log_info!(LOG_CAT, "Generated code for property '{}' ([{}])", record.long_name(), table.len());

		sink.emit(value_definitions(record))?;
		sink.emit(TableRecord::Partitions(table))?;
		sink.emit(TableRecord::Accessor(Accessor::Partition { property: record.long_name().to_string() }))?;
		emit_value_names(record, sink)
	}

	fn compile_blocks(&self, sink: &mut dyn TableSink) -> Result<()> {
		let record = self.catalog.property_of(PropertyId::Block)?;
		log_verbose!(LOG_CAT, "Generating code for property '{}'...", record.long_name());

		let table = BlockTable::build(record, self.snapshot.blocks()?)?;
		let mut definitions = value_definitions(record);
		if table.no_block_appended {
			if let TableRecord::ValueDefinitions { values, .. } = &mut definitions {
				values.push(ValueDefinition::new(table.no_block, NO_BLOCK_NAME));
			}
		}

		let mut names = NameIndex::for_property(record);
		if table.no_block_appended {
			names.insert(NO_BLOCK_NAME, table.no_block);
		}

		sink.emit(definitions)?;
		sink.emit(TableRecord::Partitions(table.partitions))?;
		sink.emit(TableRecord::Accessor(Accessor::Partition { property: record.long_name().to_string() }))?;
		emit_name_index(names, sink)
	}

	fn compile_combining_classes(&self, sink: &mut dyn TableSink) -> Result<()> {
		let record = self.catalog.property_of(PropertyId::CanonicalCombiningClass)?;
		log_verbose!(LOG_CAT, "Generating code for property '{}'...", record.long_name());

		let runs = compile_property(self.snapshot.as_ref(), PropertyId::CanonicalCombiningClass.short_name())?;
		let mode = self.settings.combining_class_mode;
		let table = CombiningClassTable::build(&runs, mode)?;

		sink.emit(value_definitions(record))?;
		sink.emit(TableRecord::CombiningClass(table))?;
		sink.emit(TableRecord::Accessor(Accessor::CombiningClass { legacy: mode == CombiningClassMode::Legacy }))?;
		emit_value_names(record, sink)
	}

	fn compile_binary_properties(&self, sink: &mut dyn TableSink) -> Result<()> {
		let detected = self.catalog.binary_properties(&self.settings.excluded_binary_properties);
		sink.emit(TableRecord::ValueDefinitions {
			property: BINARY_PROPERTY.to_string(),
			values: detected.iter()
				.enumerate()
				.map(|(value, record)| ValueDefinition::new(value as u32, record.long_name()))
				.collect(),
		})?;

		for name in &self.settings.binary_properties {
			let record = self.property(name)?;
			let value = detected.iter()
				.position(|binary| binary.short_name() == record.short_name())
				.ok_or_else(|| CompileError::not_found("Binary property", name.as_str()))?;

			log_verbose!(LOG_CAT, "Generating code for property '{}'...", record.long_name());
			let runs = compile_property(self.snapshot.as_ref(), record.short_name())?;
			let table = BinaryPropertyTable::build(record, value as u32, &runs)?;
			let width = table.width();
			sink.emit(TableRecord::BinaryProperty(table))?;
			sink.emit(TableRecord::Accessor(Accessor::Binary { property: record.long_name().to_string(), width }))?;
		}

		emit_name_index(NameIndex::for_binary_properties(BINARY_PROPERTY, &detected), sink)
	}
}

fn value_definitions(record: &PropertyRecord) -> TableRecord {
	TableRecord::ValueDefinitions {
		property: record.long_name().to_string(),
		values: record.values().iter().map(|group| ValueDefinition::new(group.value(), group.long())).collect(),
	}
}

fn emit_value_names(record: &PropertyRecord, sink: &mut dyn TableSink) -> Result<()> {
	emit_name_index(NameIndex::for_property(record), sink)
}

fn emit_name_index(index: NameIndex, sink: &mut dyn TableSink) -> Result<()> {
	let property = index.name().to_string();
	let sentinel = index.sentinel();
	sink.emit(TableRecord::NameIndex(index))?;
	sink.emit(TableRecord::Accessor(Accessor::Name { property, sentinel }))
}
