//! Canonical combining classes, only non-zero classes are stored.

use serde::Deserialize;
use uprops_logging::log_verbose;
use crate::{
	code_point::BMP_END,
	range_compiler::Run,
	CompileError, Result, LOG_CAT,
};

/// Layout of the combining class table
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CombiningClassMode {
	/// A single array of code points with their class
	#[default]
	Sparse,
	/// Separate arrays below and above U+10000, so the lower array can use 16-bit code points
	Legacy,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CombiningClassTable {
	Sparse(Vec<(u32, u8)>),
	Legacy {
		bmp:           Vec<(u16, u8)>,
		supplementary: Vec<(u32, u8)>,
	},
}

impl CombiningClassTable {
	/// Build the table from the merged runs of the `ccc` property, which hold numeric classes
	pub fn build(runs: &[Run<String>], mode: CombiningClassMode) -> Result<Self> {
		let mut entries = Vec::new();
		for run in runs {
			let class = run.value.parse::<u8>().map_err(|_| CompileError::malformed(
				"UCD snapshot",
				None,
				format!("'{}' at U+{:04X} is not a combining class", run.value, run.first)
			))?;
			if class != 0 {
				entries.extend((run.first..run.end).map(|code_point| (code_point, class)));
			}
		}

		log_verbose!(LOG_CAT, "Generated code for property 'Canonical_Combining_Class' ([{}])", entries.len());
		Ok(match mode {
			CombiningClassMode::Sparse => Self::Sparse(entries),
			CombiningClassMode::Legacy => {
				let split = entries.partition_point(|(code_point, _)| *code_point < BMP_END);
				let supplementary = entries.split_off(split);
				let bmp = entries.into_iter().map(|(code_point, class)| (code_point as u16, class)).collect();
				Self::Legacy { bmp, supplementary }
			},
		})
	}

	pub fn len(&self) -> usize {
		match self {
			Self::Sparse(entries) => entries.len(),
			Self::Legacy { bmp, supplementary } => bmp.len() + supplementary.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Get the combining class of a code point, missing code points have class 0
	pub fn lookup(&self, code_point: u32) -> u8 {
		fn find<T: Ord + Copy>(entries: &[(T, u8)], code_point: T) -> u8 {
			entries.binary_search_by_key(&code_point, |(entry, _)| *entry).map_or(0, |idx| entries[idx].1)
		}

		match self {
			Self::Sparse(entries) => find(entries, code_point),
			Self::Legacy { bmp, .. } if code_point < BMP_END => find(bmp, code_point as u16),
			Self::Legacy { supplementary, .. } => find(supplementary, code_point),
		}
	}
}
