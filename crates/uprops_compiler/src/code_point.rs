use core::fmt;

/// Largest code point
pub const MAX_CODE_POINT: u32 = 0x10FFFF;
/// End of the code space, exclusive
pub const CODE_SPACE_END: u32 = 0x110000;
/// First code point outside of the Basic Multilingual Plane
pub const BMP_END: u32 = 0x10000;

const HIGH_SURROGATE_FIRST: u32 = 0xD800;
const LOW_SURROGATE_FIRST: u32 = 0xDC00;
const SURROGATE_LAST: u32 = 0xDFFF;

pub const fn is_valid_code_point(c: u32) -> bool {
	c <= MAX_CODE_POINT
}

pub const fn is_surrogate(c: u32) -> bool {
	c >= HIGH_SURROGATE_FIRST && c <= SURROGATE_LAST
}

/// Is the code point usable as a scalar value (valid and not a surrogate)?
pub const fn is_scalar_value(c: u32) -> bool {
	is_valid_code_point(c) && !is_surrogate(c)
}

/// Split a supplementary code point into its high and low surrogates
pub const fn surrogate_pair(c: u32) -> (u16, u16) {
	let offset = c - BMP_END;
	let high = (offset >> 10) + HIGH_SURROGATE_FIRST;
	let low = (offset & 0x3FF) + LOW_SURROGATE_FIRST;
	(high as u16, low as u16)
}

/// Combine a surrogate pair back into a code point
pub const fn decode_surrogate_pair(high: u16, low: u16) -> u32 {
	(((high as u32 - HIGH_SURROGATE_FIRST) << 10) | (low as u32 - LOW_SURROGATE_FIRST)) + BMP_END
}

/// Append the UTF-16 code units of a code point sequence, splitting supplementary code points into surrogate pairs
pub fn encode_utf16(seq: &[u32], out: &mut Vec<u16>) {
	for &c in seq {
		if c < BMP_END {
			out.push(c as u16);
		} else {
			let (high, low) = surrogate_pair(c);
			out.push(high);
			out.push(low);
		}
	}
}

/// Decode UTF-16 code units back into code points, unpaired surrogates are kept as is
pub fn decode_utf16(units: &[u16]) -> Vec<u32> {
	let mut res = Vec::with_capacity(units.len());
	let mut idx = 0;
	while idx < units.len() {
		let unit = units[idx] as u32;
		if unit >= HIGH_SURROGATE_FIRST && unit < LOW_SURROGATE_FIRST && idx + 1 < units.len() {
			let next = units[idx + 1] as u32;
			if next >= LOW_SURROGATE_FIRST && next <= SURROGATE_LAST {
				res.push(decode_surrogate_pair(unit as u16, next as u16));
				idx += 2;
				continue;
			}
		}
		res.push(unit);
		idx += 1;
	}
	res
}

/// Inclusive range of code points
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodePointRange {
	Single(u32),
	Range(u32, u32),
}

impl CodePointRange {
	/// Create a range from its first and last code point, collapsing to `Single` when they are equal
	pub fn new(first: u32, last: u32) -> Self {
		if first == last {
			Self::Single(first)
		} else {
			Self::Range(first, last)
		}
	}

	pub fn first(&self) -> u32 {
		match *self {
			Self::Single(c) => c,
			Self::Range(first, _) => first,
		}
	}

	pub fn last(&self) -> u32 {
		match *self {
			Self::Single(c) => c,
			Self::Range(_, last) => last,
		}
	}

	/// End of the range, exclusive
	pub fn end(&self) -> u32 {
		self.last() + 1
	}

	pub fn len(&self) -> u32 {
		self.end() - self.first()
	}

	pub fn contains(&self, c: u32) -> bool {
		self.first() <= c && c <= self.last()
	}

	pub fn iter(&self) -> core::ops::RangeInclusive<u32> {
		self.first()..=self.last()
	}

	/// Merge `other` into this range, only succeeds if `other` starts right after this range ends
	pub fn merge(self, other: Self) -> Option<Self> {
		if self.end() == other.first() {
			Some(Self::Range(self.first(), other.last()))
		} else {
			None
		}
	}

	/// Parse a range in UCD text notation, either `0041` or `0041..005A`
	pub fn parse(s: &str) -> Option<Self> {
		let s = s.trim();
		let res = match s.split_once("..") {
			Some((first, last)) => Self::new(u32::from_str_radix(first, 16).ok()?, u32::from_str_radix(last, 16).ok()?),
			None => Self::Single(u32::from_str_radix(s, 16).ok()?),
		};
		if res.first() <= res.last() && is_valid_code_point(res.last()) {
			Some(res)
		} else {
			None
		}
	}
}

impl PartialEq<u32> for CodePointRange {
	fn eq(&self, other: &u32) -> bool {
		self.contains(*other)
	}
}

impl PartialOrd for CodePointRange {
	fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for CodePointRange {
	fn cmp(&self, other: &Self) -> core::cmp::Ordering {
		(self.first(), self.last()).cmp(&(other.first(), other.last()))
	}
}

impl fmt::Debug for CodePointRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Single(val) => write!(f, "U+{val:04X}"),
			Self::Range(first, last) => write!(f, "U+{first:04X}..U+{last:04X}"),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn surrogates_round_trip() {
		for c in [0x10000, 0x1D11E, 0x20000, 0x2F800, 0x10FFFF] {
			let (high, low) = surrogate_pair(c);
			assert!(is_surrogate(high as u32) && is_surrogate(low as u32));
			assert_eq!(decode_surrogate_pair(high, low), c);
		}
		assert_eq!(surrogate_pair(0x1D11E), (0xD834, 0xDD1E));
	}

	#[test]
	fn utf16_sequences() {
		let mut units = Vec::new();
		encode_utf16(&[0x41, 0x2F800, 0x3B1], &mut units);
		assert_eq!(units, vec![0x41, 0xD87E, 0xDC00, 0x3B1]);
		assert_eq!(decode_utf16(&units), vec![0x41, 0x2F800, 0x3B1]);
	}

	#[test]
	fn scalar_values() {
		assert!(is_scalar_value(0xD7FF));
		assert!(!is_scalar_value(0xD800));
		assert!(!is_scalar_value(0xDFFF));
		assert!(is_scalar_value(0xE000));
		assert!(!is_scalar_value(CODE_SPACE_END));
	}

	#[test]
	fn ranges() {
		let a = CodePointRange::parse("0041..005A").unwrap();
		let b = CodePointRange::parse("005B").unwrap();
		assert_eq!(a.len(), 26);
		assert!(a == 0x45);
		assert_eq!(a.merge(b), Some(CodePointRange::Range(0x41, 0x5B)));
		assert_eq!(b.merge(a), None);
		assert_eq!(CodePointRange::parse("005A..0041"), None);
		assert_eq!(CodePointRange::parse("110000"), None);
	}
}
