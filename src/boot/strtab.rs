use core::{ffi::CStr, slice};

/// String table in the '.strtab' section, used to get a symbol name.
#[derive(Debug, Clone, Copy)]
pub struct Strtab<'a> {
	bytes: &'a [u8],
}

impl<'a> Strtab<'a> {
	pub const fn new(bytes: &'a [u8]) -> Self {
		Strtab { bytes }
	}

	/// # Safety
	///
	/// `addr` must point to `size` bytes valid for `'a`.
	pub unsafe fn from_raw(addr: *const u8, size: usize) -> Self {
		Strtab::new(slice::from_raw_parts(addr, size))
	}

	/// Get the name formed C style string and transform to a string slice.
	pub fn get_name(&self, index: usize) -> Option<&'a str> {
		let tail = self.bytes.get(index..)?;

		CStr::from_bytes_until_nul(tail).ok()?.to_str().ok()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn names_by_offset() {
		let strtab = Strtab::new(b"\0foo\0bar\0\xff\0tail");

		assert_eq!(strtab.get_name(0), Some(""));
		assert_eq!(strtab.get_name(1), Some("foo"));
		assert_eq!(strtab.get_name(6), Some("ar"));
		assert_eq!(strtab.get_name(9), None);
		assert_eq!(strtab.get_name(11), None);
		assert_eq!(strtab.get_name(100), None);
	}
}
