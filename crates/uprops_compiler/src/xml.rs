//! Reader for the grouped UCD XML snapshot (`ucd.nounihan.grouped.xml`).

use std::{
	fs::File,
	io::{BufRead, BufReader},
	path::{Path, PathBuf},
};
use quick_xml::{
	events::{BytesStart, Event},
	Reader,
};
use uprops_parser_utils::str_parser::parse_hex_code_point;
use crate::{
	snapshot::{BlockRecord, CharRecord, RecordIter, RecordKind, UcdSnapshot},
	CodePointRange, CompileError, Result,
};

const GROUP_TAG: &[u8] = b"group";
const BLOCK_TAG: &[u8] = b"block";

enum XmlSource {
	File(PathBuf),
	Text(String),
}

/// UCD snapshot read from its XML representation, every pass re-reads the source
pub struct XmlSnapshot {
	source: XmlSource,
}

impl XmlSnapshot {
	pub fn open(path: &Path) -> Self {
		Self { source: XmlSource::File(path.to_path_buf()) }
	}

	pub fn from_text(text: impl Into<String>) -> Self {
		Self { source: XmlSource::Text(text.into()) }
	}

	fn source_name(&self) -> String {
		match &self.source {
			XmlSource::File(path) => path.display().to_string(),
			XmlSource::Text(_) => "<memory>".to_string(),
		}
	}
}

impl UcdSnapshot for XmlSnapshot {
	fn records<'a>(&'a self, attributes: &[&str]) -> Result<RecordIter<'a>> {
		let attributes = attributes.iter().map(|attr| attr.to_string()).collect();
		Ok(match &self.source {
			XmlSource::File(path) => {
				let reader = BufReader::new(File::open(path)?);
				Box::new(XmlRecords::new(reader, attributes, self.source_name()))
			},
			XmlSource::Text(text) => Box::new(XmlRecords::new(text.as_bytes(), attributes, self.source_name())),
		})
	}

	fn blocks(&self) -> Result<Vec<BlockRecord>> {
		match &self.source {
			XmlSource::File(path) => read_blocks(BufReader::new(File::open(path)?), &self.source_name()),
			XmlSource::Text(text) => read_blocks(text.as_bytes(), &self.source_name()),
		}
	}
}

fn xml_reader<R: BufRead>(reader: R) -> Reader<R> {
	let mut xml_reader = Reader::from_reader(reader);
	let config = xml_reader.config_mut();
	config.trim_text(true);
	config.check_end_names = true;
	config.expand_empty_elements = true;
	xml_reader
}

/// Iterator over the character records of an XML snapshot
pub struct XmlRecords<R: BufRead> {
	reader:      Reader<R>,
	buffer:      Vec<u8>,
	attributes:  Vec<String>,
	/// Effective values of the enclosing groups, innermost last
	groups:      Vec<Vec<Option<String>>>,
	source_name: String,
	finished:    bool,
}

impl<R: BufRead> XmlRecords<R> {
	fn new(reader: R, attributes: Vec<String>, source_name: String) -> Self {
		Self {
			reader: xml_reader(reader),
			buffer: Vec::new(),
			attributes,
			groups: Vec::new(),
			source_name,
			finished: false,
		}
	}
}

impl<R: BufRead> Iterator for XmlRecords<R> {
	type Item = Result<CharRecord>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		loop {
			self.buffer.clear();
			let res = match self.reader.read_event_into(&mut self.buffer) {
				Ok(Event::Start(elem)) => match RecordKind::from_tag(elem.name().as_ref()) {
					Some(kind) => Some(read_char(kind, &elem, &self.attributes, self.groups.last(), &self.source_name)),
					None if elem.name().as_ref() == GROUP_TAG => match read_values(&elem, &self.attributes, self.groups.last()) {
						Ok(values) => {
							self.groups.push(values);
							None
						},
						Err(err) => Some(Err(err)),
					},
					None => None,
				},
				Ok(Event::End(elem)) => {
					if elem.name().as_ref() == GROUP_TAG {
						self.groups.pop();
					}
					None
				},
				Ok(Event::Eof) => {
					self.finished = true;
					return None;
				},
				Ok(_) => None,
				Err(err) => Some(Err(err.into())),
			};

			if let Some(res) = res {
				self.finished = res.is_err();
				return Some(res);
			}
		}
	}
}

/// Get the values of the requested attributes of an element, falling back to the values of the enclosing group
fn read_values(elem: &BytesStart, attributes: &[String], group: Option<&Vec<Option<String>>>) -> Result<Vec<Option<String>>> {
	let mut values = match group {
		Some(group) => group.clone(),
		None => vec![None; attributes.len()],
	};
	for attr in elem.attributes() {
		let attr = attr?;
		if let Some(idx) = attributes.iter().position(|name| name.as_bytes() == attr.key.as_ref()) {
			values[idx] = Some(attr.unescape_value()?.into_owned());
		}
	}
	Ok(values)
}

fn read_char(kind: RecordKind, elem: &BytesStart, attributes: &[String], group: Option<&Vec<Option<String>>>, source_name: &str) -> Result<CharRecord> {
	let range = read_range(elem, b"cp", source_name)?;
	let values = read_values(elem, attributes, group)?;
	Ok(CharRecord::new(kind, range, values))
}

/// Read the `cp` attribute, or the `first-cp` and `last-cp` attributes of an element
fn read_range(elem: &BytesStart, single_key: &[u8], source_name: &str) -> Result<CodePointRange> {
	let mut single = None;
	let mut first = None;
	let mut last = None;
	for attr in elem.attributes() {
		let attr = attr?;
		let slot = match attr.key.as_ref() {
			key if key == single_key => &mut single,
			b"first-cp" => &mut first,
			b"last-cp" => &mut last,
			_ => continue,
		};
		let value = attr.unescape_value()?;
		let code_point = parse_hex_code_point(&value)
			.ok_or_else(|| CompileError::malformed(source_name, None, format!("'{value}' is not a code point")))?;
		*slot = Some(code_point);
	}

	match (single, first, last) {
		(Some(cp), _, _) => Ok(CodePointRange::Single(cp)),
		(None, Some(first), Some(last)) if first <= last => Ok(CodePointRange::new(first, last)),
		(None, Some(first), Some(last)) => Err(CompileError::malformed(source_name, None, format!("Reversed range U+{first:04X}..U+{last:04X}"))),
		_ => Err(CompileError::malformed(source_name, None, format!("<{}> without a code point", String::from_utf8_lossy(elem.name().as_ref())))),
	}
}

fn read_blocks<R: BufRead>(reader: R, source_name: &str) -> Result<Vec<BlockRecord>> {
	let mut reader = xml_reader(reader);
	let mut buffer = Vec::new();
	let mut blocks = Vec::new();
	loop {
		buffer.clear();
		match reader.read_event_into(&mut buffer)? {
			Event::Start(elem) if elem.name().as_ref() == BLOCK_TAG => {
				let range = read_range(&elem, b"cp", source_name)?;
				let name = elem.try_get_attribute("name")?
					.ok_or_else(|| CompileError::malformed(source_name, None, format!("Block at {range:?} has no name")))?
					.unescape_value()?
					.into_owned();
				blocks.push(BlockRecord { range, name });
			},
			Event::Eof => break,
			_ => {},
		}
	}
	Ok(blocks)
}

#[cfg(test)]
mod test {
	use super::*;

	const SNAPSHOT: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<ucd xmlns="http://www.unicode.org/ns/2003/ucd/1.0">
  <repertoire>
    <group gc="Cc" sc="Zyyy" dt="none" dm="#">
      <char cp="0000" na=""/>
      <char cp="0001" na=""/>
    </group>
    <group gc="Lu" sc="Latn">
      <char first-cp="0041" last-cp="005A"/>
      <char cp="00C0" dt="can" dm="0041 0300" na="LATIN CAPITAL LETTER A WITH GRAVE"/>
    </group>
    <reserved first-cp="0378" last-cp="0379" gc="Cn" sc="Zzzz"/>
  </repertoire>
  <blocks>
    <block first-cp="0000" last-cp="007F" name="Basic Latin"/>
    <block first-cp="0080" last-cp="00FF" name="Latin-1 Supplement"/>
  </blocks>
</ucd>
"##;

	#[test]
	fn group_values_are_inherited() {
		let snapshot = XmlSnapshot::from_text(SNAPSHOT);
		let records = snapshot.records(&["sc", "dt"]).unwrap().collect::<Result<Vec<_>>>().unwrap();

		assert_eq!(records.len(), 5);
		assert_eq!(records[0].range, CodePointRange::Single(0));
		assert_eq!(records[0].value(0), Some("Zyyy"));
		assert_eq!(records[0].value(1), Some("none"));

		assert_eq!(records[2].range, CodePointRange::new(0x41, 0x5A));
		assert_eq!(records[2].value(0), Some("Latn"));
		assert_eq!(records[2].value(1), None);
		assert_eq!(records[3].value(1), Some("can"));

		assert_eq!(records[4].kind, RecordKind::Reserved);
		assert_eq!(records[4].value(0), Some("Zzzz"));
	}

	#[test]
	fn blocks() {
		let snapshot = XmlSnapshot::from_text(SNAPSHOT);
		let blocks = snapshot.blocks().unwrap();
		assert_eq!(blocks, vec![
			BlockRecord { range: CodePointRange::new(0, 0x7F), name: "Basic Latin".to_string() },
			BlockRecord { range: CodePointRange::new(0x80, 0xFF), name: "Latin-1 Supplement".to_string() },
		]);
	}

	#[test]
	fn bad_code_point() {
		let snapshot = XmlSnapshot::from_text(r#"<ucd><repertoire><char cp="XYZ" sc="Latn"/></repertoire></ucd>"#);
		let mut records = snapshot.records(&["sc"]).unwrap();
		assert!(matches!(records.next(), Some(Err(CompileError::MalformedInput { .. }))));
		assert!(records.next().is_none());
	}

	#[test]
	fn code_point_past_the_code_space() {
		let snapshot = XmlSnapshot::from_text(r#"<ucd><repertoire><reserved first-cp="E0000" last-cp="110000" sc="Zzzz"/></repertoire></ucd>"#);
		let mut records = snapshot.records(&["sc"]).unwrap();
		assert!(matches!(records.next(), Some(Err(CompileError::MalformedInput { .. }))));

		let snapshot = XmlSnapshot::from_text(r#"<ucd><blocks><block first-cp="0000" last-cp="200000" name="Everything"/></blocks></ucd>"#);
		assert!(matches!(snapshot.blocks(), Err(CompileError::MalformedInput { .. })));
	}
}
