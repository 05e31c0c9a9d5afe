use crate::config::MAX_FRAMES;

use super::{memory::StackMemory, stackframe::StackFrame, stackframe_iter::StackframeIter};

/// The type that holds the top most frame of the generated context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackDump {
	begin: StackFrame,
}

impl StackDump {
	/// Capture the frame of the caller.
	#[cfg(target_arch = "x86_64")]
	#[inline(always)]
	pub fn new() -> StackDump {
		let rbp = crate::register!("rbp");
		let rip = super::register::read_rip();

		StackDump {
			begin: StackFrame::new(rbp, rip),
		}
	}

	pub const fn from_frame(begin: StackFrame) -> StackDump {
		StackDump { begin }
	}

	pub fn top(&self) -> StackFrame {
		self.begin
	}

	pub fn iter<'m, M>(&self, memory: &'m M) -> StackframeIter<'m, M>
	where
		M: StackMemory + ?Sized,
	{
		StackframeIter::new(memory, self.begin, MAX_FRAMES)
	}
}
