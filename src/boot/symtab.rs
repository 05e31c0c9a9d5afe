use core::slice;

const STT_FUNC: u8 = 2;
const STT_FILE: u8 = 4;
const STB_LOCAL: u8 = 0;

/// Symbol table entry (`Elf64_Sym`)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct SymtabEntry {
	pub st_name: u32,
	pub st_info: u8,
	pub st_other: u8,
	pub st_shndx: u16,
	pub st_value: u64,
	pub st_size: u64,
}

impl SymtabEntry {
	pub const fn new(st_name: u32, bind: u8, kind: u8, st_value: u64, st_size: u64) -> Self {
		SymtabEntry {
			st_name,
			st_info: (bind << 4) | (kind & 0xf),
			st_other: 0,
			st_shndx: 0,
			st_value,
			st_size,
		}
	}

	fn kind(&self) -> u8 {
		self.st_info & 0xf
	}

	fn bind(&self) -> u8 {
		self.st_info >> 4
	}

	pub fn is_function(&self) -> bool {
		self.kind() == STT_FUNC
	}

	pub fn is_file(&self) -> bool {
		self.kind() == STT_FILE
	}

	pub fn is_local(&self) -> bool {
		self.bind() == STB_LOCAL
	}

	/// sizeless symbols cover their first byte only.
	pub fn contains(&self, addr: u64) -> bool {
		let len = self.st_size.max(1);

		self.st_value <= addr && addr - self.st_value < len
	}
}

/// Symbol table in the '.symtab' section.
#[derive(Debug, Clone, Copy)]
pub struct Symtab<'a> {
	entries: &'a [SymtabEntry],
}

impl<'a> Symtab<'a> {
	pub const fn new(entries: &'a [SymtabEntry]) -> Self {
		Symtab { entries }
	}

	/// # Safety
	///
	/// `addr` must point to `count` entries valid for `'a`.
	pub unsafe fn from_raw(addr: *const SymtabEntry, count: usize) -> Self {
		Symtab::new(slice::from_raw_parts(addr, count))
	}

	/// Find the function symbol that covers `addr`.
	pub fn find_function(&self, addr: u64) -> Option<(usize, &'a SymtabEntry)> {
		self.entries
			.iter()
			.enumerate()
			.find(|(_, entry)| entry.is_function() && entry.contains(addr))
	}

	/// Find the `STT_FILE` entry a local symbol was defined under.
	pub fn file_of(&self, index: usize) -> Option<&'a SymtabEntry> {
		let entry = self.entries.get(index)?;
		if !entry.is_local() {
			return None;
		}

		self.entries[..index].iter().rev().find(|e| e.is_file())
	}

	pub fn iter(&self) -> slice::Iter<'a, SymtabEntry> {
		self.entries.iter()
	}
}

impl<'a> IntoIterator for &Symtab<'a> {
	type Item = &'a SymtabEntry;
	type IntoIter = slice::Iter<'a, SymtabEntry>;
	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
