use core::fmt;

use bitflags::bitflags;
use enum_dispatch::enum_dispatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryAccessError {
	pub addr: u64,
	pub size: usize,
}

impl fmt::Display for MemoryAccessError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "invalid {}-byte read at {:#018x}", self.size, self.addr)
	}
}

/// Bounds checked little-endian reads of stack memory.
#[enum_dispatch]
pub trait StackMemory {
	fn read_u32(&self, addr: u64) -> Result<u32, MemoryAccessError>;
	fn read_u64(&self, addr: u64) -> Result<u64, MemoryAccessError>;
}

/// Where the walker reads the stack from.
#[enum_dispatch(StackMemory)]
pub enum StackSource<'a> {
	Live(LiveStack<'a>),
	Snapshot(StackSnapshot<'a>),
}

bitflags! {
	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	pub struct AreaFlag: u32 {
		const Readable = (1 << 0);
		const Writable = (1 << 1);
	}
}

/// memory area.
/// area is half-opened [start, end)
#[derive(Debug, Clone)]
pub struct Area {
	pub start: usize,
	pub end: usize,
	pub flags: AreaFlag,
}

impl Area {
	pub const fn new(start: usize, end: usize, flags: AreaFlag) -> Self {
		Self { start, end, flags }
	}

	pub fn contains(&self, addr: usize) -> bool {
		self.start <= addr && addr < self.end
	}

	pub fn contains_range(&self, addr: usize, len: usize) -> bool {
		match addr.checked_add(len) {
			Some(end) => self.start <= addr && end <= self.end,
			None => false,
		}
	}
}

/// Reads the memory of the running kernel, restricted to readable areas.
pub struct LiveStack<'a> {
	areas: &'a [Area],
}

impl<'a> LiveStack<'a> {
	/// # Safety
	///
	/// every `Readable` area must stay mapped while this value is alive.
	pub const unsafe fn new(areas: &'a [Area]) -> Self {
		Self { areas }
	}

	fn verify(&self, addr: u64, size: usize) -> Result<usize, MemoryAccessError> {
		let fault = MemoryAccessError { addr, size };
		let ptr = usize::try_from(addr).map_err(|_| fault)?;

		self.areas
			.iter()
			.filter(|area| area.flags.contains(AreaFlag::Readable))
			.any(|area| area.contains_range(ptr, size))
			.then_some(ptr)
			.ok_or(fault)
	}
}

impl StackMemory for LiveStack<'_> {
	fn read_u32(&self, addr: u64) -> Result<u32, MemoryAccessError> {
		let ptr = self.verify(addr, 4)? as *const u32;

		Ok(unsafe { ptr.read_unaligned() })
	}

	fn read_u64(&self, addr: u64) -> Result<u64, MemoryAccessError> {
		let ptr = self.verify(addr, 8)? as *const u64;

		Ok(unsafe { ptr.read_unaligned() })
	}
}

/// Copy of a stack region, `bytes[0]` lives at `base`.
#[derive(Clone, Copy)]
pub struct StackSnapshot<'a> {
	base: u64,
	bytes: &'a [u8],
}

impl<'a> StackSnapshot<'a> {
	pub const fn new(base: u64, bytes: &'a [u8]) -> Self {
		Self { base, bytes }
	}

	fn window<const N: usize>(&self, addr: u64) -> Result<[u8; N], MemoryAccessError> {
		let fault = MemoryAccessError { addr, size: N };

		let start = addr
			.checked_sub(self.base)
			.and_then(|off| usize::try_from(off).ok())
			.ok_or(fault)?;

		self.bytes
			.get(start..start.checked_add(N).ok_or(fault)?)
			.and_then(|bytes| bytes.try_into().ok())
			.ok_or(fault)
	}
}

impl StackMemory for StackSnapshot<'_> {
	fn read_u32(&self, addr: u64) -> Result<u32, MemoryAccessError> {
		self.window(addr).map(u32::from_le_bytes)
	}

	fn read_u64(&self, addr: u64) -> Result<u64, MemoryAccessError> {
		self.window(addr).map(u64::from_le_bytes)
	}
}
