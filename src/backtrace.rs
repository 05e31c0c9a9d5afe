//! Backtrace

mod args;
mod format;
mod memory;
#[cfg(target_arch = "x86_64")]
mod register;
mod stack_dump;
mod stackframe;
mod stackframe_iter;

use core::fmt::{self, Write};

use crate::{
	config::MAX_FRAMES,
	debuginfo::DebugInfoResolver,
	pr_warn, trace_feature,
};

pub use args::{extract_args, ArgError, ArgValues};
pub use format::{FrameRecord, Symbolized};
pub use memory::{
	Area, AreaFlag, LiveStack, MemoryAccessError, StackMemory, StackSnapshot, StackSource,
};
pub use stack_dump::StackDump;
pub use stackframe::StackFrame;
pub use stackframe_iter::StackframeIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
	MemoryAccess(MemoryAccessError),
	Format(fmt::Error),
}

impl From<MemoryAccessError> for Error {
	fn from(e: MemoryAccessError) -> Self {
		Error::MemoryAccess(e)
	}
}

impl From<fmt::Error> for Error {
	fn from(e: fmt::Error) -> Self {
		Error::Format(e)
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::MemoryAccess(e) => write!(f, "{}", e),
			Error::Format(_) => f.write_str("output sink failed"),
		}
	}
}

pub struct Backtrace<'a, M: ?Sized, R: ?Sized> {
	stack: StackDump,
	memory: &'a M,
	resolver: &'a R,
	max_frames: usize,
	demangle: bool,
}

impl<'a, M, R> Backtrace<'a, M, R>
where
	M: StackMemory + ?Sized,
	R: DebugInfoResolver + ?Sized,
{
	pub fn new(stack: StackDump, memory: &'a M, resolver: &'a R) -> Self {
		Backtrace {
			stack,
			memory,
			resolver,
			max_frames: MAX_FRAMES,
			demangle: false,
		}
	}

	pub fn max_frames(mut self, max_frames: usize) -> Self {
		self.max_frames = max_frames;
		self
	}

	pub fn demangle(mut self, demangle: bool) -> Self {
		self.demangle = demangle;
		self
	}

	/// Resolve one frame and read its arguments.
	pub fn symbolize(&self, frame: StackFrame) -> FrameRecord<'a> {
		let resolver: &'a R = self.resolver;

		let symbol = resolver.resolve(frame.return_address).ok().and_then(|info| {
			let args = extract_args(self.memory, frame.frame_base, &info.arg_sizes);
			Symbolized::new(&frame, info, args)
		});

		FrameRecord { frame, symbol }
	}

	/// Print call stack trace of the dump.
	///
	/// Frames before a faulting read are printed, then the fault is returned
	/// for the caller to report.
	pub fn print_trace<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), Error> {
		let mut frames = self.stack.iter(self.memory).max_frames(self.max_frames);

		for frame in frames.by_ref() {
			let frame = frame?;
			trace_feature!("backtrace", "{:x?}", frame);

			let record = self.symbolize(frame);
			match self.demangle {
				true => write!(out, "{:#}", record)?,
				false => write!(out, "{}", record)?,
			}
		}

		if frames.truncated() {
			pr_warn!("backtrace: stopped after {} frames", self.max_frames);
		}

		Ok(())
	}
}

/// Print call stack trace in current context.
#[cfg(target_arch = "x86_64")]
#[macro_export]
macro_rules! print_stacktrace {
	($out:expr, $memory:expr) => {{
		let dump = $crate::backtrace::StackDump::new();
		match $crate::boot::ksyms() {
			Some(ksyms) => $crate::backtrace::Backtrace::new(dump, $memory, ksyms)
				.demangle(true)
				.print_trace($out),
			None => $crate::backtrace::Backtrace::new(dump, $memory, &$crate::debuginfo::NoSymbols)
				.print_trace($out),
		}
	}};
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		debuginfo::NoSymbols,
		test::{StackImage, TableResolver},
	};

	fn two_frame_stack() -> StackImage {
		let mut image = StackImage::new(0x8000, 0x100);
		image.put_u32(0x807c, 5);
		image.put_u64(0x8080, 0x80c0);
		image.put_u64(0x8088, 0x9999);
		image
	}

	#[test]
	fn resolved_then_unresolved_frame() {
		let image = two_frame_stack();
		let snap = image.snapshot();
		let resolver = TableResolver::default().with(0x1000..0x1100, "a.c", 10, "foo", &[4]);
		let dump = StackDump::from_frame(StackFrame::new(0x8080, 0x1010));

		let mut out = String::new();
		Backtrace::new(dump, &snap, &resolver).print_trace(&mut out).unwrap();

		assert_eq!(
			out,
			concat!(
				"  rbp 0000000000008080  rip 0000000000001010\n",
				"       a.c:10: foo+0000000000000010  args:1  0000000000000005\n",
				"  rbp 00000000000080c0  rip 0000000000009999\n",
			)
		);
	}

	#[test]
	fn resolution_is_idempotent() {
		let resolver = TableResolver::default().with(0x1000..0x1100, "a.c", 10, "foo", &[4, 8]);

		assert_eq!(resolver.resolve(0x1010), resolver.resolve(0x1010));
		assert_eq!(resolver.resolve(0x2000), Err(crate::debuginfo::SymbolNotFound));
	}

	#[test]
	fn empty_chain_prints_nothing() {
		let image = StackImage::new(0x8000, 0x10);
		let snap = image.snapshot();
		let dump = StackDump::from_frame(StackFrame::new(0, 0x1010));

		let mut out = String::new();
		assert_eq!(Backtrace::new(dump, &snap, &NoSymbols).print_trace(&mut out), Ok(()));
		assert!(out.is_empty());
	}

	#[test]
	fn fault_is_fatal_after_printed_frames() {
		let mut image = StackImage::new(0x8000, 0x100);
		image.put_u64(0x8080, 0x5000);
		image.put_u64(0x8088, 0x2222);

		let snap = image.snapshot();
		let dump = StackDump::from_frame(StackFrame::new(0x8080, 0x1111));

		let mut out = String::new();
		let result = Backtrace::new(dump, &snap, &NoSymbols).print_trace(&mut out);

		assert_eq!(
			result,
			Err(Error::MemoryAccess(MemoryAccessError { addr: 0x5008, size: 8 }))
		);
		assert_eq!(out.lines().count(), 2);
		assert!(out.ends_with("  rbp 0000000000005000  rip 0000000000002222\n"));
	}

	#[test]
	fn fault_is_left_to_the_caller() {
		let _guard = crate::test::CONSOLE_LOCK.lock();
		let log = crate::test::capture_console();

		let mut image = StackImage::new(0x8000, 0x40);
		image.put_u64(0x8010, 0x6000);

		let snap = image.snapshot();
		let dump = StackDump::from_frame(StackFrame::new(0x8010, 0x1));

		let mut out = String::new();
		let result = Backtrace::new(dump, &snap, &NoSymbols).print_trace(&mut out);
		crate::printk::take_console();

		assert!(result.is_err());
		assert!(!out.contains("0x0000000000006008"));
		assert!(!log.lock().contains("0x0000000000006008"));
	}

	#[test]
	fn bad_arguments_do_not_stop_the_walk() {
		let image = two_frame_stack();
		let snap = image.snapshot();
		let resolver = TableResolver::default()
			.with(0x1000..0x1100, "a.c", 10, "foo", &[4, 1])
			.with(0x9900..0x9a00, "b.c", 3, "bar", &[8]);
		let dump = StackDump::from_frame(StackFrame::new(0x8080, 0x1010));

		let mut out = String::new();
		Backtrace::new(dump, &snap, &resolver).print_trace(&mut out).unwrap();

		let lines: Vec<_> = out.lines().collect();
		assert_eq!(lines.len(), 4);
		assert!(lines[1].ends_with("args:2  <argument 1 has unsupported size 1>"));
		assert_eq!(
			lines[3],
			"       b.c:3: bar+0000000000000099  args:1  0000000000000000"
		);
	}

	#[test]
	fn frame_limit_keeps_output_bounded() {
		let mut image = StackImage::new(0x8000, 0x40);
		image.put_u64(0x8020, 0x8020);
		image.put_u64(0x8028, 0x3333);

		let snap = image.snapshot();
		let dump = StackDump::from_frame(StackFrame::new(0x8020, 0x3333));

		let mut out = String::new();
		Backtrace::new(dump, &snap, &NoSymbols)
			.max_frames(4)
			.print_trace(&mut out)
			.unwrap();

		assert_eq!(out.lines().count(), 4);
	}

	#[test]
	fn walk_live_memory() {
		let mut words = [0u64; 8];
		let base = words.as_ptr() as u64;
		words[2] = base + 6 * 8;
		words[3] = 0xabc;
		words[6] = 0;
		words[7] = 0xdef;

		let start = base as usize;
		let areas = [Area::new(start, start + 64, AreaFlag::Readable | AreaFlag::Writable)];
		let live: StackSource = unsafe { LiveStack::new(&areas) }.into();
		let dump = StackDump::from_frame(StackFrame::new(base + 2 * 8, 0x123));

		let frames: Vec<_> = dump.iter(&live).collect::<Result<_, _>>().unwrap();
		assert_eq!(
			frames,
			[
				StackFrame::new(base + 16, 0x123),
				StackFrame::new(base + 48, 0xabc),
			]
		);
	}
}
