//! Canonical and compatibility decomposition tables.

use uprops_base::UcdPropertyT;
use uprops_logging::log_verbose;
use uprops_parser_utils::str_parser::parse_hex_code_point;
use crate::{
	snapshot::{RecordKind, UcdSnapshot},
	sequence_table::SequenceTable,
	CompileError, PropertyId, Result, LOG_CAT,
};

const ATTRIBUTES: [PropertyId; 3] = [PropertyId::DecompositionType, PropertyId::DecompositionMapping, PropertyId::Name];
const DT: usize = 0;
const DM: usize = 1;
const NA: usize = 2;

/// Decomposition type without a mapping
const NO_DECOMPOSITION: &str = "none";
const CANONICAL: &str = "can";
/// Mapping of a character to itself
const SELF_MAPPING: &str = "#";
/// Hangul syllables decompose algorithmically
const HANGUL_SYLLABLE_PREFIX: &str = "HANGUL SYLLABLE ";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DecompositionKind {
	Canonical,
	Compatibility,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct DecompositionTables {
	pub canonical:     SequenceTable,
	pub compatibility: SequenceTable,
}

impl DecompositionTables {
	pub fn build(snapshot: &dyn UcdSnapshot) -> Result<Self> {
		log_verbose!(LOG_CAT, "Generating 'Decomposition_Mapping' code table...");

		let mut canonical = Vec::new();
		let mut compatibility = Vec::new();
		let attributes = ATTRIBUTES.map(|id| id.short_name());
		for record in snapshot.records(&attributes)? {
			let record = record?;
			if record.kind != RecordKind::Char {
				continue;
			}

			let mapping = record.value(DM).unwrap_or(SELF_MAPPING);
			let dt = record.value(DT).unwrap_or(NO_DECOMPOSITION);
			if mapping == SELF_MAPPING || dt == NO_DECOMPOSITION || record.value(NA).map_or(false, |na| na.starts_with(HANGUL_SYLLABLE_PREFIX)) {
				continue;
			}

			let destination = parse_mapping(mapping)?;
			let mappings = match Self::kind_of(dt) {
				DecompositionKind::Canonical => &mut canonical,
				DecompositionKind::Compatibility => &mut compatibility,
			};
			for code_point in record.range.iter() {
				mappings.push((code_point, destination.clone()));
			}
		}

		let tables = Self {
			canonical: SequenceTable::from_mappings(canonical),
			compatibility: SequenceTable::from_mappings(compatibility),
		};
		log_verbose!(LOG_CAT, "...Processed canonical mappings ({}).", tables.canonical.len());
		log_verbose!(LOG_CAT, "...Processed compatibility mappings ({}).", tables.compatibility.len());
		Ok(tables)
	}

	/// Classify a decomposition type, every type but `can` is a compatibility decomposition
	pub fn kind_of(decomposition_type: &str) -> DecompositionKind {
		if decomposition_type == CANONICAL {
			DecompositionKind::Canonical
		} else {
			DecompositionKind::Compatibility
		}
	}
}

fn parse_mapping(mapping: &str) -> Result<Vec<u32>> {
	mapping.split_whitespace()
		.map(|code_point| parse_hex_code_point(code_point)
			.ok_or_else(|| CompileError::malformed("UCD snapshot", None, format!("Invalid decomposition mapping '{mapping}'"))))
		.collect()
}
