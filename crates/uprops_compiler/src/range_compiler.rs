//! Merging of per-range property assignments into a gapless list of runs over the whole code space.

use uprops_logging::log_debug;
use crate::{
	code_point::CODE_SPACE_END,
	snapshot::UcdSnapshot,
	CodePointRange, CompileError, Result, LOG_CAT,
};

/// Value of a property for a range of code points
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PropertyAssignment<V> {
	pub range: CodePointRange,
	pub value: V,
}

/// Half-open range of code points `[first, end)` sharing a single value
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Run<V> {
	pub first: u32,
	pub end:   u32,
	pub value: V,
}

impl<V> Run<V> {
	pub fn new(first: u32, end: u32, value: V) -> Self {
		Self { first, end, value }
	}

	/// Last code point of the run, inclusive
	pub fn last(&self) -> u32 {
		self.end - 1
	}
}

/// Collects the assignments of a single property and merges them into runs
pub struct RangeCompiler<V> {
	property:    String,
	assignments: Vec<PropertyAssignment<V>>,
}

impl<V: Clone + PartialEq> RangeCompiler<V> {
	pub fn new(property: &str) -> Self {
		Self { property: property.to_string(), assignments: Vec::new() }
	}

	pub fn push(&mut self, range: CodePointRange, value: V) {
		self.assignments.push(PropertyAssignment { range, value });
	}

	pub fn len(&self) -> usize {
		self.assignments.len()
	}

	pub fn is_empty(&self) -> bool {
		self.assignments.is_empty()
	}

	/// Merge the assignments into runs that exactly tile `[0, 0x110000)`.
	/// 
	/// Only contiguous assignments with the same value are merged.
	pub fn compile(mut self) -> Result<Vec<Run<V>>> {
		self.assignments.sort_by_key(|assignment| (assignment.range.first(), assignment.range.last()));

		let mut runs: Vec<Run<V>> = Vec::with_capacity(self.assignments.len());
		for assignment in self.assignments {
			let range = assignment.range;
			match runs.last_mut() {
				Some(prev) if prev.value == assignment.value && prev.end == range.first() => prev.end = range.end(),
				_ => runs.push(Run::new(range.first(), range.end(), assignment.value)),
			}
		}

		validate_runs(&self.property, &runs)?;
		log_debug!(LOG_CAT, Self::compile, "Merged '{}' into {} runs", self.property, runs.len());
		Ok(runs)
	}
}

/// Check that the runs tile `[0, 0x110000)` without gaps or overlaps, and that no neighbouring runs share a value
pub fn validate_runs<V: PartialEq>(property: &str, runs: &[Run<V>]) -> Result<()> {
	let coverage = |code_point| CompileError::Coverage { property: property.to_string(), code_point };

	let first = runs.first().ok_or_else(|| coverage(0))?;
	if first.first != 0 {
		return Err(coverage(0));
	}

	for pair in runs.windows(2) {
		let (prev, next) = (&pair[0], &pair[1]);
		if next.first < prev.end {
			return Err(CompileError::Overlap { property: property.to_string(), code_point: next.first });
		}
		if next.first > prev.end {
			return Err(coverage(prev.end));
		}
		if next.value == prev.value {
			return Err(CompileError::MergeInvariant { property: property.to_string(), code_point: next.first });
		}
	}

	// `runs` is not empty here
	let last = &runs[runs.len() - 1];
	if last.end != CODE_SPACE_END {
		return Err(coverage(last.end));
	}
	Ok(())
}

/// Read the raw values of a property from a snapshot and merge them into runs
pub fn compile_property(snapshot: &dyn UcdSnapshot, short_name: &str) -> Result<Vec<Run<String>>> {
	let mut compiler = RangeCompiler::new(short_name);
	for record in snapshot.records(&[short_name])? {
		let record = record?;
		let value = record.value(0).filter(|value| !value.is_empty()).ok_or_else(|| CompileError::malformed(
			"UCD snapshot",
			None,
			format!("Property '{short_name}' is not defined for {:?}", record.range)
		))?;
		compiler.push(record.range, value.to_string());
	}
	compiler.compile()
}

#[cfg(test)]
mod test {
	use super::*;

	fn compile(assignments: &[(u32, u32, &'static str)]) -> Result<Vec<Run<&'static str>>> {
		let mut compiler = RangeCompiler::new("sc");
		for &(first, last, value) in assignments {
			compiler.push(CodePointRange::new(first, last), value);
		}
		compiler.compile()
	}

	#[test]
	fn contiguous_equal_values_merge() {
		let runs = compile(&[
			(0x100, 0x10FFFF, "Zzzz"),
			(0x41, 0x5A, "Latn"),
			(0, 0x40, "Zyyy"),
			(0x5B, 0xFF, "Zzzz"),
		]);
		assert_eq!(runs.unwrap(), vec![
			Run::new(0, 0x41, "Zyyy"),
			Run::new(0x41, 0x5B, "Latn"),
			Run::new(0x5B, 0x110000, "Zzzz"),
		]);
	}

	#[test]
	fn separated_equal_values_stay_distinct() {
		let runs = compile(&[
			(0, 0x2F, "Zzzz"),
			(0x30, 0x39, "Zyyy"),
			(0x3A, 0x40, "Zzzz"),
			(0x41, 0x5A, "Latn"),
			(0x5B, 0x60, "Zzzz"),
			(0x61, 0x7A, "Latn"),
			(0x7B, 0x10FFFF, "Zzzz"),
		]).unwrap();
		let latin = runs.iter().filter(|run| run.value == "Latn").collect::<Vec<_>>();
		assert_eq!(latin.len(), 2);
		assert_eq!((latin[0].first, latin[0].last()), (0x41, 0x5A));
		assert_eq!((latin[1].first, latin[1].last()), (0x61, 0x7A));
	}

	#[test]
	fn gap_is_a_coverage_error() {
		let res = compile(&[(0, 0x40, "Zyyy"), (0x42, 0x10FFFF, "Zzzz")]);
		assert!(matches!(res, Err(CompileError::Coverage { code_point: 0x41, .. })));

		let res = compile(&[(1, 0x10FFFF, "Zzzz")]);
		assert!(matches!(res, Err(CompileError::Coverage { code_point: 0, .. })));

		let res = compile(&[(0, 0xFFFF, "Zzzz")]);
		assert!(matches!(res, Err(CompileError::Coverage { code_point: 0x10000, .. })));

		let res = compile(&[]);
		assert!(matches!(res, Err(CompileError::Coverage { code_point: 0, .. })));
	}

	#[test]
	fn overlap_is_an_error() {
		let res = compile(&[(0, 0x41, "Zyyy"), (0x41, 0x10FFFF, "Latn")]);
		assert!(matches!(res, Err(CompileError::Overlap { code_point: 0x41, .. })));
	}

	#[test]
	fn equal_neighbours_are_rejected() {
		let runs = vec![Run::new(0, 0x41, 1u32), Run::new(0x41, 0x110000, 1u32)];
		let res = validate_runs("gc", &runs);
		assert!(matches!(res, Err(CompileError::MergeInvariant { code_point: 0x41, .. })));
	}
}
