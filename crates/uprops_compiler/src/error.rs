use std::{fmt, io};
use uprops_parser_utils::ParserError;

/// Error that aborts a compiler run
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
	/// Unknown property, property value alias or name lookup key
	#[error("{what} '{name}' is unknown")]
	NotFound {
		what: &'static str,
		name: String,
	},
	/// The merged assignments of a property don't cover the whole code space
	#[error("The input repertoire of '{property}' is not successive at U+{code_point:04X}")]
	Coverage {
		property:   String,
		code_point: u32,
	},
	/// Two assignments of a property claim the same code point
	#[error("Assignments of '{property}' overlap at U+{code_point:04X}")]
	Overlap {
		property:   String,
		code_point: u32,
	},
	/// Two neighbouring merged runs have the same value, the merge should have combined them
	#[error("Merged runs of '{property}' share a value at U+{code_point:04X}")]
	MergeInvariant {
		property:   String,
		code_point: u32,
	},
	/// A source record doesn't have the expected shape
	#[error("Malformed input in {source_name}{}: {message}", line.map_or_else(String::new, |line| format!(":{line}")))]
	MalformedInput {
		source_name: String,
		line:        Option<usize>,
		message:     String,
	},
	#[error("Failed to parse {source_name}: {err}")]
	Parser {
		source_name: String,
		#[source]
		err:         ParserError,
	},
	#[error("Invalid settings: {0}")]
	Settings(#[from] toml::de::Error),
	#[error("Failed to read the UCD XML snapshot: {0}")]
	Xml(#[from] quick_xml::Error),
	#[error("Failed to format generated code")]
	Format(#[from] fmt::Error),
	#[error(transparent)]
	Io(#[from] io::Error),
}

impl CompileError {
	pub fn not_found(what: &'static str, name: impl Into<String>) -> Self {
		Self::NotFound { what, name: name.into() }
	}

	pub fn malformed(source_name: impl Into<String>, line: Option<usize>, message: impl Into<String>) -> Self {
		Self::MalformedInput { source_name: source_name.into(), line, message: message.into() }
	}
}

impl From<quick_xml::events::attributes::AttrError> for CompileError {
	fn from(err: quick_xml::events::attributes::AttrError) -> Self {
		Self::Xml(err.into())
	}
}

pub type Result<T> = core::result::Result<T, CompileError>;
