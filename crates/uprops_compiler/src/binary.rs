//! Binary properties, stored as the sorted closed ranges of code points having the property.

use core::fmt;
use uprops_logging::log_verbose;
use crate::{
	code_point::BMP_END,
	names::PropertyRecord,
	range_compiler::Run,
	CompileError, Result, LOG_CAT,
};

/// Short alias of the value of code points that have a binary property
const YES_ALIAS: &str = "Y";

/// Width of the elements used to store a binary property's ranges
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ElementWidth {
	/// 16-bit, all ranges are in the Basic Multilingual Plane
	Narrow,
	/// 21-bit, stored in 32-bit elements
	Wide,
}

impl ElementWidth {
	pub fn bits(self) -> u32 {
		match self {
			ElementWidth::Narrow => 16,
			ElementWidth::Wide => 21,
		}
	}

	/// Name of the rust type storing an element
	pub fn rust_type(self) -> &'static str {
		match self {
			ElementWidth::Narrow => "u16",
			ElementWidth::Wide => "u32",
		}
	}
}

impl fmt::Display for ElementWidth {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-bit", self.bits())
	}
}

/// Closed range of code points `[first, last]`
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BinaryRange {
	pub first: u32,
	pub last:  u32,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BinaryPropertyTable {
	long_name: String,
	value:     u32,
	ranges:    Vec<BinaryRange>,
	width:     ElementWidth,
}

impl BinaryPropertyTable {
	/// Keep the runs having the property, `value` is the property's value in the binary property enumeration
	pub fn build(record: &PropertyRecord, value: u32, runs: &[Run<String>]) -> Result<Self> {
		let mut ranges = Vec::new();
		for run in runs {
			let group = record.value_group(&run.value).ok_or_else(|| CompileError::NotFound {
				what: "Property value",
				name: format!("{}' for '{}", run.value, record.long_name()),
			})?;
			if group.short() == YES_ALIAS {
				ranges.push(BinaryRange { first: run.first, last: run.last() });
			}
		}

		let width = if ranges.iter().any(|range| range.last >= BMP_END) { ElementWidth::Wide } else { ElementWidth::Narrow };
		log_verbose!(LOG_CAT, "Generated ranges for property '{}' ([{}], {width})", record.long_name(), ranges.len());
		Ok(Self { long_name: record.long_name().to_string(), value, ranges, width })
	}

	pub fn long_name(&self) -> &str {
		&self.long_name
	}

	pub fn value(&self) -> u32 {
		self.value
	}

	pub fn ranges(&self) -> &[BinaryRange] {
		&self.ranges
	}

	pub fn width(&self) -> ElementWidth {
		self.width
	}

	/// Check if a code point has the property
	pub fn contains(&self, code_point: u32) -> bool {
		if self.width == ElementWidth::Narrow && code_point >= BMP_END {
			return false;
		}
		let idx = self.ranges.partition_point(|range| range.first <= code_point);
		idx > 0 && code_point <= self.ranges[idx - 1].last
	}
}
