//! Symbol metadata of code addresses.
//!
//! The walker only talks to [`DebugInfoResolver`], so the symbol source
//! (kernel symtab, a line table, a test table) can be swapped freely.

use core::fmt;

use crate::{collection::BoundedVec, config::MAX_ARGS};

/// Byte width of each declared argument. Arguments past the capacity are
/// not tracked.
pub type ArgSizes = BoundedVec<usize, MAX_ARGS>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugInfo<'a> {
	pub file: &'a str,
	pub line: u32,
	pub function_name: &'a str,
	pub function_start_address: u64,
	pub arg_sizes: ArgSizes,
}

impl<'a> DebugInfo<'a> {
	pub fn arg_count(&self) -> usize {
		self.arg_sizes.len()
	}

	/// `None` when `addr` lies before the function start.
	pub fn offset_of(&self, addr: u64) -> Option<u64> {
		addr.checked_sub(self.function_start_address)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolNotFound;

impl fmt::Display for SymbolNotFound {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("symbol not found")
	}
}

/// Must be idempotent and free of side effects for the same address.
pub trait DebugInfoResolver {
	fn resolve(&self, addr: u64) -> Result<DebugInfo<'_>, SymbolNotFound>;
}

/// Resolver for a kernel booted without symbols.
pub struct NoSymbols;

impl DebugInfoResolver for NoSymbols {
	fn resolve(&self, _addr: u64) -> Result<DebugInfo<'_>, SymbolNotFound> {
		Err(SymbolNotFound)
	}
}
