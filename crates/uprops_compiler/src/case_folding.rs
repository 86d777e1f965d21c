//! Case folding tables from `CaseFolding.txt`.

use std::path::Path;
use uprops_base::EnumFromNameT;
use uprops_logging::log_verbose;
use uprops_macros::EnumFromName;
use uprops_parser_utils::{for_each_data_line, str_parser::StrParser};
use crate::{sequence_table::SequenceTable, CompileError, Result, LOG_CAT};

pub const CASE_FOLDING_FILE: &str = "CaseFolding.txt";

/// Status field of a case folding line
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumFromName)]
pub enum CaseStatus {
	/// Shared by simple and full folding
	#[parse_name("C")]
	Common,
	/// Simple folding, when a full folding exists for the same code point
	#[parse_name("S")]
	Simple,
	/// Full folding, mapping to multiple code points
	#[parse_name("F")]
	Full,
	/// Turkic dotted and dotless I
	#[parse_name("T")]
	Turkic,
}

/// Single code point folding, sorted by source
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct SimpleFoldings {
	pub sources:      Vec<u32>,
	pub destinations: Vec<u32>,
}

impl SimpleFoldings {
	fn push(&mut self, source: u32, destination: u32) {
		self.sources.push(source);
		self.destinations.push(destination);
	}

	pub fn len(&self) -> usize {
		self.sources.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}

	pub fn find(&self, source: u32) -> Option<u32> {
		self.sources.binary_search(&source).ok().map(|idx| self.destinations[idx])
	}
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CaseFoldingTables {
	pub common: SimpleFoldings,
	pub simple: SimpleFoldings,
	pub full:   SequenceTable,
}

impl CaseFoldingTables {
	/// Load the tables from `CaseFolding.txt` in `ucd_dir`
	pub fn load(ucd_dir: &Path) -> Result<Self> {
		log_verbose!(LOG_CAT, "Generating case folding code...");
		let path = ucd_dir.join(CASE_FOLDING_FILE);
		let mut builder = CaseFoldingBuilder::default();
		for_each_data_line(&path, |line_number, line| builder.add_line(line_number, line))?;
		log_verbose!(LOG_CAT, "...Loaded {}", path.display());
		Ok(builder.finish())
	}

	/// Parse the tables from the contents of `CaseFolding.txt`
	pub fn parse(text: &str) -> Result<Self> {
		let mut builder = CaseFoldingBuilder::default();
		for (idx, line) in text.lines().enumerate() {
			if StrParser::new(line).can_parse() && !line.trim_start().starts_with('#') {
				builder.add_line(idx + 1, line)?;
			}
		}
		Ok(builder.finish())
	}

	/// Simple case folding of a code point
	pub fn fold_simple(&self, code_point: u32) -> u32 {
		self.common.find(code_point)
			.or_else(|| self.simple.find(code_point))
			.unwrap_or(code_point)
	}
}

#[derive(Default)]
struct CaseFoldingBuilder {
	common: Vec<(u32, u32)>,
	simple: Vec<(u32, u32)>,
	full:   Vec<(u32, Vec<u32>)>,
}

impl CaseFoldingBuilder {
	// `1E9E; F; 0073 0073; # LATIN CAPITAL LETTER SHARP S`
	fn add_line(&mut self, line_number: usize, line: &str) -> Result<()> {
		let parser_err = |err| CompileError::Parser { source_name: CASE_FOLDING_FILE.to_string(), err };

		let mut parser = StrParser::for_line(line, line_number);
		let source = parser.code_point_field().map_err(parser_err)?;
		let status = parser.next_field().unwrap_or_default();
		let status = CaseStatus::parse(status).ok_or_else(|| CompileError::malformed(CASE_FOLDING_FILE, Some(line_number), format!("Unknown status '{status}'")))?;
		let destination = parser.code_point_sequence_field().map_err(parser_err)?;

		match status {
			CaseStatus::Common | CaseStatus::Simple => {
				let &[destination] = destination.as_slice() else {
					return Err(CompileError::malformed(CASE_FOLDING_FILE, Some(line_number), format!("U+{source:04X} should fold to a single code point")));
				};
				if status == CaseStatus::Common {
					self.common.push((source, destination));
				} else {
					self.simple.push((source, destination));
				}
			},
			CaseStatus::Full => self.full.push((source, destination)),
			CaseStatus::Turkic => {},
		}
		Ok(())
	}

	fn finish(self) -> CaseFoldingTables {
		let simple_foldings = |mut mappings: Vec<(u32, u32)>| {
			mappings.sort_by_key(|(source, _)| *source);
			let mut foldings = SimpleFoldings::default();
			for (source, destination) in mappings {
				foldings.push(source, destination);
			}
			foldings
		};

		let tables = CaseFoldingTables {
			common: simple_foldings(self.common),
			simple: simple_foldings(self.simple),
			full: SequenceTable::from_mappings(self.full),
		};
		log_verbose!(LOG_CAT, "...Processed common case mapping ({}).", tables.common.len());
		log_verbose!(LOG_CAT, "...Processed simple case mapping ({}).", tables.simple.len());
		log_verbose!(LOG_CAT, "...Processed full case mapping ({}).", tables.full.len());
		tables
	}
}

#[cfg(test)]
pub(crate) mod test {
	use super::*;

	pub(crate) const CASE_FOLDING: &str = "\
# CaseFolding-5.1.0.txt
0041; C; 0061; # LATIN CAPITAL LETTER A
0042; C; 0062; # LATIN CAPITAL LETTER B
00DF; F; 0073 0073; # LATIN SMALL LETTER SHARP S
0049; T; 0131; # LATIN CAPITAL LETTER I
0130; F; 0069 0307; # LATIN CAPITAL LETTER I WITH DOT ABOVE
0130; T; 0069; # LATIN CAPITAL LETTER I WITH DOT ABOVE
1E9E; F; 0073 0073; # LATIN CAPITAL LETTER SHARP S
1E9E; S; 00DF; # LATIN CAPITAL LETTER SHARP S
10400; C; 10428; # DESERET CAPITAL LETTER LONG I
";

	#[test]
	fn tiers() {
		let tables = CaseFoldingTables::parse(CASE_FOLDING).unwrap();
		assert_eq!(tables.common.sources, vec![0x41, 0x42, 0x10400]);
		assert_eq!(tables.common.destinations, vec![0x61, 0x62, 0x10428]);
		assert_eq!(tables.simple.sources, vec![0x1E9E]);
		assert_eq!(tables.full.sources(), &[0xDF, 0x130, 0x1E9E]);

		assert_eq!(tables.fold_simple(0x41), 0x61);
		assert_eq!(tables.fold_simple(0x1E9E), 0xDF);
		assert_eq!(tables.fold_simple(0x49), 0x49);
	}

	#[test]
	fn sharp_s_full_folding() {
		let tables = CaseFoldingTables::parse(CASE_FOLDING).unwrap();
		let idx = tables.full.sources().iter().position(|&source| source == 0x1E9E).unwrap();
		let k = tables.full.offsets()[idx];
		assert_eq!(tables.full.offsets()[idx + 1], k + 2);
		assert_eq!(&tables.full.units()[k..k + 2], &[0x73, 0x73]);
		assert_eq!(tables.full.find(0x1E9E), Some(&[0x73, 0x73][..]));
	}

	#[test]
	fn malformed_lines() {
		let res = CaseFoldingTables::parse("0041; X; 0061;\n");
		assert!(matches!(res, Err(CompileError::MalformedInput { line: Some(1), .. })));

		let res = CaseFoldingTables::parse("0041; C; 0061 0062;\n");
		assert!(matches!(res, Err(CompileError::MalformedInput { .. })));

		let res = CaseFoldingTables::parse("# header\nZZ41; C; 0061;\n");
		assert!(matches!(res, Err(CompileError::Parser { err, .. }) if err.line == 2));

		let res = CaseFoldingTables::parse("0041; C; 200000;\n");
		assert!(matches!(res, Err(CompileError::Parser { err, .. }) if err.line == 1));

		let res = CaseFoldingTables::parse("110000; F; 0073 0073;\n");
		assert!(matches!(res, Err(CompileError::Parser { .. })));
	}

	#[test]
	fn load_from_directory() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join(CASE_FOLDING_FILE), CASE_FOLDING).unwrap();
		let tables = CaseFoldingTables::load(dir.path()).unwrap();
		assert_eq!(tables, CaseFoldingTables::parse(CASE_FOLDING).unwrap());
	}
}
