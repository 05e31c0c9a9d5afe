use core::{fmt, mem::size_of};

use crate::{collection::BoundedVec, config::MAX_ARGS};

use super::memory::{MemoryAccessError, StackMemory};

pub type ArgValues = BoundedVec<u64, MAX_ARGS>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgError {
	MemoryAccess(MemoryAccessError),
	/// argument width other than 4 or 8 bytes.
	MalformedSize { index: usize, size: usize },
}

impl From<MemoryAccessError> for ArgError {
	fn from(e: MemoryAccessError) -> Self {
		ArgError::MemoryAccess(e)
	}
}

impl fmt::Display for ArgError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ArgError::MemoryAccess(e) => write!(f, "{}", e),
			ArgError::MalformedSize { index, size } => {
				write!(f, "argument {} has unsupported size {}", index, size)
			}
		}
	}
}

/// Read the arguments of a frame back from its spill area below `frame_base`.
///
/// Values come out in declaration order. A 4-byte argument is read right
/// below the cursor, an 8-byte one at the cursor rounded down to 8 bytes.
pub fn extract_args<M>(memory: &M, frame_base: u64, sizes: &[usize]) -> Result<ArgValues, ArgError>
where
	M: StackMemory + ?Sized,
{
	let mut cursor = frame_base;

	// sizes past MAX_ARGS are never read, ArgValues holds exactly that many.
	sizes
		.iter()
		.enumerate()
		.take(MAX_ARGS)
		.map(|(index, &size)| {
			if size != size_of::<u32>() && size != size_of::<u64>() {
				return Err(ArgError::MalformedSize { index, size });
			}

			cursor = cursor
				.checked_sub(size as u64)
				.ok_or(MemoryAccessError { addr: cursor, size })?;

			if size == size_of::<u32>() {
				Ok(memory.read_u32(cursor)? as u64)
			} else {
				cursor &= !(size_of::<u64>() as u64 - 1);
				Ok(memory.read_u64(cursor)?)
			}
		})
		.collect()
}
