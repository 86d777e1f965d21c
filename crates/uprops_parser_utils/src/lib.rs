pub mod str_parser;
mod data_file;

pub use data_file::for_each_data_line;

/// Parser error
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
#[error("{msg} at {line}:{column}")]
pub struct ParserError {
    pub line   : usize,
    pub column : usize,
    pub msg    : &'static str,
}
