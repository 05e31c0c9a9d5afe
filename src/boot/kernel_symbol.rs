use core::mem::size_of;

use multiboot2::{BootInformation, ElfSection, ElfSectionsTag};
use spin::Once;

use crate::{
	config::VM_OFFSET,
	debuginfo::{ArgSizes, DebugInfo, DebugInfoResolver, SymbolNotFound},
	trace_feature,
};

use super::{symtab::SymtabEntry, Error, Strtab, Symtab};

pub static KSYMS: Once<KernelSymbol<'static>> = Once::new();

const UNKNOWN_FILE: &str = "<unknown>";

#[derive(Debug, Clone, Copy)]
pub struct KernelSymbol<'a> {
	symtab: Symtab<'a>,
	strtab: Strtab<'a>,
}

impl<'a> KernelSymbol<'a> {
	pub fn new(symtab: Symtab<'a>, strtab: Strtab<'a>) -> Self {
		Self { symtab, strtab }
	}

	pub fn find_name_by_addr(&self, addr: u64) -> Option<&'a str> {
		self.symtab
			.find_function(addr)
			.and_then(|(_, entry)| self.strtab.get_name(entry.st_name as usize))
	}
}

/// The symbol table knows neither lines nor arguments, so `line` is 0 and
/// no argument is reported.
impl DebugInfoResolver for KernelSymbol<'_> {
	fn resolve(&self, addr: u64) -> Result<DebugInfo<'_>, SymbolNotFound> {
		let (idx, entry) = self.symtab.find_function(addr).ok_or(SymbolNotFound)?;
		let function_name = self
			.strtab
			.get_name(entry.st_name as usize)
			.ok_or(SymbolNotFound)?;

		let file = self
			.symtab
			.file_of(idx)
			.and_then(|file| self.strtab.get_name(file.st_name as usize))
			.unwrap_or(UNKNOWN_FILE);

		trace_feature!("ksyms", "{:#x} => {}:{}", addr, file, function_name);

		Ok(DebugInfo {
			file,
			line: 0,
			function_name,
			function_start_address: entry.st_value,
			arg_sizes: ArgSizes::new(),
		})
	}
}

pub fn init(bi: &BootInformation) -> Result<(), Error> {
	let elf_tag = bi.elf_sections_tag().ok_or(Error::MissingElfHeader)?;

	let (symtab, strtab) = parse_elf_tag(&elf_tag)?;

	KSYMS.call_once(|| KernelSymbol::new(symtab, strtab));

	Ok(())
}

fn parse_elf_tag(tag: &ElfSectionsTag) -> Result<(Symtab<'static>, Strtab<'static>), Error> {
	let mut strtab = None;
	let mut symtab = None;

	for section in tag.sections() {
		if section.name() == ".symtab" {
			symtab = Some(unsafe { get_symtab(&section) });
		} else if section.name() == ".strtab" {
			strtab = Some(unsafe { get_strtab(&section) });
		}
	}

	match (symtab, strtab) {
		(Some(symtab), Some(strtab)) => Ok((symtab, strtab)),
		_ => Err(Error::MissingSection),
	}
}

fn phys_to_virt(addr: usize) -> usize {
	match addr < VM_OFFSET {
		true => addr + VM_OFFSET,
		false => addr,
	}
}

unsafe fn get_symtab(symtab: &ElfSection) -> Symtab<'static> {
	let addr = phys_to_virt(symtab.start_address() as usize) as *const SymtabEntry;
	let count = symtab.size() as usize / size_of::<SymtabEntry>();

	Symtab::from_raw(addr, count)
}

unsafe fn get_strtab(strtab: &ElfSection) -> Strtab<'static> {
	let addr = phys_to_virt(strtab.start_address() as usize) as *const u8;
	let size = strtab.size() as usize;

	Strtab::from_raw(addr, size)
}
