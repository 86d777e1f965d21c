//! Compiler turning a Unicode Character Database snapshot into static lookup tables.
//! 
//! Every builder consumes its own pass over the snapshot and emits structured [`sink::TableRecord`]s,
//! the [`writer::RustSourceSink`] turns those into rust source files.

use uprops_logging::LogCategory;

mod error;
pub use error::*;

pub mod code_point;
pub use code_point::CodePointRange;

mod property;
pub use property::PropertyId;

pub mod names;
pub mod name_index;
pub mod snapshot;
pub mod xml;
pub mod range_compiler;
pub mod partition;
pub mod binary;
pub mod sequence_table;
pub mod case_folding;
pub mod decomposition;
pub mod block;
pub mod combining_class;
pub mod sink;
pub mod writer;
pub mod settings;

mod compiler;
pub use compiler::*;

pub(crate) const LOG_CAT: LogCategory = LogCategory::new("Compiler");
