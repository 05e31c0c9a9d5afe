use crate::config::WORD_SIZE;

use super::memory::{MemoryAccessError, StackMemory};

/// The type that holds informations of the stack frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackFrame {
	pub frame_base: u64,
	pub return_address: u64,
}

impl StackFrame {
	pub const fn new(frame_base: u64, return_address: u64) -> Self {
		StackFrame {
			frame_base,
			return_address,
		}
	}

	/// saved frame base of zero marks the outermost frame.
	pub fn is_terminal(&self) -> bool {
		self.frame_base == 0
	}

	/// Get the frame of the caller.
	///
	/// The return address is stored one word above the saved frame base.
	pub fn caller<M>(&self, memory: &M) -> Result<StackFrame, MemoryAccessError>
	where
		M: StackMemory + ?Sized,
	{
		let ret_slot = self
			.frame_base
			.checked_add(WORD_SIZE as u64)
			.ok_or(MemoryAccessError {
				addr: self.frame_base,
				size: WORD_SIZE,
			})?;

		let return_address = memory.read_u64(ret_slot)?;
		let frame_base = memory.read_u64(self.frame_base)?;

		Ok(StackFrame::new(frame_base, return_address))
	}
}
