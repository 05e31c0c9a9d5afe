use core::mem;

use super::{
	memory::{MemoryAccessError, StackMemory},
	stackframe::StackFrame,
};

enum State {
	Start(StackFrame),
	Yielded(StackFrame),
	Done,
}

/// Lazy walk over the saved frame base chain.
///
/// Yields one `Err` when a read faults, then nothing.
pub struct StackframeIter<'m, M: ?Sized> {
	memory: &'m M,
	state: State,
	remain: usize,
	truncated: bool,
}

impl<'m, M: StackMemory + ?Sized> StackframeIter<'m, M> {
	pub(super) fn new(memory: &'m M, begin: StackFrame, max_frames: usize) -> Self {
		StackframeIter {
			memory,
			state: State::Start(begin),
			remain: max_frames,
			truncated: false,
		}
	}

	pub fn max_frames(mut self, max_frames: usize) -> Self {
		self.remain = max_frames;
		self
	}

	/// true if the walk stopped at the frame limit with frames left.
	pub fn truncated(&self) -> bool {
		self.truncated
	}
}

impl<'m, M: StackMemory + ?Sized> Iterator for StackframeIter<'m, M> {
	type Item = Result<StackFrame, MemoryAccessError>;

	fn next(&mut self) -> Option<Self::Item> {
		let frame = match mem::replace(&mut self.state, State::Done) {
			State::Start(frame) => frame,
			State::Yielded(prev) => match prev.caller(self.memory) {
				Ok(frame) => frame,
				Err(e) => return Some(Err(e)),
			},
			State::Done => return None,
		};

		if frame.is_terminal() {
			return None;
		}

		if self.remain == 0 {
			self.truncated = true;
			return None;
		}

		self.remain -= 1;
		self.state = State::Yielded(frame);

		Some(Ok(frame))
	}
}
