use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

/// Call `f` for each line of a UCD data file that contains data, with its 1-based line number.
/// 
/// Empty lines and lines only containing a comment are skipped. The file is closed before returning.
pub fn for_each_data_line<E, F>(path: &Path, mut f: F) -> Result<(), E> where
    E: From<io::Error>,
    F: FnMut(usize, &str) -> Result<(), E>
{
    let file = File::open(path)?;

    let mut data_reader = BufReader::new(file);
    let mut line = String::new();
    let mut line_number = 0;
    while data_reader.read_line(&mut line)? != 0 {
        line_number += 1;
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            f(line_number, line.trim_end_matches(['\r', '\n']))?;
        }
        line.clear();
    }
    Ok(())
}
