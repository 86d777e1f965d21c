//! Partition tables: the start of every run with its value, searched with an upper bound lookup.

use uprops_logging::{log_debug, log_verbose, LogCategory};
use crate::{
	code_point::is_valid_code_point,
	names::PropertyRecord,
	range_compiler::Run,
	CompileError, Result,
};

const LOG_CAT: LogCategory = LogCategory::new_with_sub("Compiler", "Partition");

/// Start of a run of code points sharing a property value, the run ends at the next partition
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Partition {
	pub beginning: u32,
	pub value:     u32,
}

/// Find the partition containing `code_point`: the partition with the greatest beginning that is not past it
pub fn resolve_partition(partitions: &[Partition], code_point: u32) -> Option<&Partition> {
	let idx = partitions.partition_point(|partition| partition.beginning <= code_point);
	idx.checked_sub(1).map(|idx| &partitions[idx])
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PartitionTable {
	property:   String,
	partitions: Vec<Partition>,
}

impl PartitionTable {
	/// Create a table from runs that already carry their final values
	pub fn from_runs(property: &str, runs: &[Run<u32>]) -> Self {
		let partitions = runs.iter().map(|run| Partition { beginning: run.first, value: run.value }).collect();
		Self { property: property.to_string(), partitions }
	}

	/// Create a table from runs holding raw value aliases, resolving them through the property's value groups.
	/// 
	/// Runs with different aliases of the same value are combined.
	pub fn build(record: &PropertyRecord, runs: &[Run<String>]) -> Result<Self> {
		let mut partitions: Vec<Partition> = Vec::with_capacity(runs.len());
		for run in runs {
			let group = record.value_group(&run.value).ok_or_else(|| CompileError::NotFound {
				what: "Property value",
				name: format!("{}' for '{}", run.value, record.long_name()),
			})?;

			match partitions.last() {
				Some(prev) if prev.value == group.value() => log_debug!(LOG_CAT, Self::build, "Combined partition U+{:04X} of '{}' with its predecessor", run.first, record.long_name()),
				_ => partitions.push(Partition { beginning: run.first, value: group.value() }),
			}
		}

		log_verbose!(LOG_CAT, "Generated partitions for property '{}' ([{}])", record.long_name(), partitions.len());
		Ok(Self { property: record.long_name().to_string(), partitions })
	}

	pub fn property(&self) -> &str {
		&self.property
	}

	pub fn partitions(&self) -> &[Partition] {
		&self.partitions
	}

	pub fn len(&self) -> usize {
		self.partitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.partitions.is_empty()
	}

	/// Get the value of a code point, `None` for invalid code points
	pub fn lookup(&self, code_point: u32) -> Option<u32> {
		if !is_valid_code_point(code_point) {
			return None;
		}
		resolve_partition(&self.partitions, code_point).map(|partition| partition.value)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::names::test::catalog;

	#[test]
	fn lookup_uses_the_preceding_partition() {
		let table = PartitionTable::from_runs("sc", &[
			Run::new(0, 0x41, 1),
			Run::new(0x41, 0x5B, 0),
			Run::new(0x5B, 0x110000, 2),
		]);
		assert_eq!(table.lookup(0), Some(1));
		assert_eq!(table.lookup(0x40), Some(1));
		assert_eq!(table.lookup(0x41), Some(0));
		assert_eq!(table.lookup(0x5A), Some(0));
		assert_eq!(table.lookup(0x5B), Some(2));
		assert_eq!(table.lookup(0x10FFFF), Some(2));
		assert_eq!(table.lookup(0x110000), None);
	}

	#[test]
	fn aliases_are_resolved_and_combined() {
		let catalog = catalog();
		let record = catalog.property("sc").unwrap();
		let runs = vec![
			Run::new(0, 0x41, "Zyyy".to_string()),
			Run::new(0x41, 0x50, "Latn".to_string()),
			Run::new(0x50, 0x5B, "Latin".to_string()),
			Run::new(0x5B, 0x110000, "Zzzz".to_string()),
		];
		let table = PartitionTable::build(record, &runs).unwrap();
		assert_eq!(table.property(), "Script");
		assert_eq!(table.partitions(), &[
			Partition { beginning: 0, value: 1 },
			Partition { beginning: 0x41, value: 0 },
			Partition { beginning: 0x5B, value: 2 },
		]);
	}

	#[test]
	fn unknown_alias() {
		let catalog = catalog();
		let record = catalog.property("sc").unwrap();
		let runs = vec![Run::new(0, 0x110000, "Grek".to_string())];
		assert!(matches!(PartitionTable::build(record, &runs), Err(CompileError::NotFound { .. })));
	}
}
