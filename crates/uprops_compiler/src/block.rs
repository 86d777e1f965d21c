//! Block partitions, with `No_Block` partitions filling the code points outside of any block.

use uprops_logging::{log_debug, log_verbose};
use crate::{
	code_point::CODE_SPACE_END,
	names::PropertyRecord,
	partition::PartitionTable,
	range_compiler::{validate_runs, Run},
	snapshot::BlockRecord,
	CompileError, Result, LOG_CAT,
};

pub const NO_BLOCK_NAME: &str = "No_Block";

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BlockTable {
	pub partitions: PartitionTable,
	/// Value of code points outside of any block
	pub no_block:   u32,
	/// Set when `No_Block` is not a listed value, and `no_block` was appended after the listed values
	pub no_block_appended: bool,
}

impl BlockTable {
	pub fn build(record: &PropertyRecord, mut blocks: Vec<BlockRecord>) -> Result<Self> {
		blocks.sort_by_key(|block| block.range.first());

		let (no_block, no_block_appended) = match record.value_group_loose(NO_BLOCK_NAME) {
			Some(group) => (group.value(), false),
			None => {
				log_debug!(LOG_CAT, Self::build, "'{NO_BLOCK_NAME}' is not a value of '{}', appending it", record.long_name());
				(record.values().len() as u32, true)
			},
		};

		let mut runs: Vec<Run<u32>> = Vec::with_capacity(blocks.len() * 2 + 1);
		for block in &blocks {
			let group = record.value_group_loose(&block.name).ok_or_else(|| CompileError::NotFound {
				what: "Block",
				name: block.name.clone(),
			})?;

			let prev_end = runs.last().map_or(0, |run| run.end);
			if block.range.first() < prev_end {
				return Err(CompileError::Overlap { property: record.long_name().to_string(), code_point: block.range.first() });
			}
			if block.range.first() > prev_end {
				runs.push(Run::new(prev_end, block.range.first(), no_block));
			}
			runs.push(Run::new(block.range.first(), block.range.end(), group.value()));
		}

		let end = runs.last().map_or(0, |run| run.end);
		if end < CODE_SPACE_END {
			runs.push(Run::new(end, CODE_SPACE_END, no_block));
		}

		validate_runs(record.long_name(), &runs)?;
		log_verbose!(LOG_CAT, "Generated code for property '{}' ([{}])", record.long_name(), blocks.len());
		Ok(Self {
			partitions: PartitionTable::from_runs(record.long_name(), &runs),
			no_block,
			no_block_appended,
		})
	}
}
