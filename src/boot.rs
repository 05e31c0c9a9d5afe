//! Kernel symbols handed over by the multiboot2 loader.

mod kernel_symbol;
mod strtab;
mod symtab;

use core::fmt;

pub use kernel_symbol::KernelSymbol;
pub use strtab::Strtab;
pub use symtab::{Symtab, SymtabEntry};

use kernel_symbol::KSYMS;

const MULTIBOOT2_MAGIC: u32 = 0x36d7_6289;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
	WrongMagic,
	FailedToLoadHeader,
	MissingSection,
	MissingElfHeader,
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let msg = match self {
			Error::WrongMagic => "wrong multiboot2 magic",
			Error::FailedToLoadHeader => "failed to load boot information",
			Error::MissingSection => "missing .symtab or .strtab section",
			Error::MissingElfHeader => "missing ELF sections tag",
		};
		f.write_str(msg)
	}
}

fn check_magic(magic: u32) -> bool {
	magic == MULTIBOOT2_MAGIC
}

/// Load the kernel symbol table from the boot information.
///
/// # Safety
///
/// `bi_header` must point to the multiboot2 information left by the loader,
/// and the `.symtab`/`.strtab` sections it describes must stay mapped.
pub unsafe fn init(bi_header: usize, magic: u32) -> Result<(), Error> {
	if !check_magic(magic) {
		return Err(Error::WrongMagic);
	}

	let bi = multiboot2::load(bi_header).map_err(|_| Error::FailedToLoadHeader)?;

	kernel_symbol::init(&bi)
}

pub fn ksyms() -> Option<&'static KernelSymbol<'static>> {
	KSYMS.get()
}
