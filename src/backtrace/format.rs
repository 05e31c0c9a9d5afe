use core::fmt;

use rustc_demangle::demangle;

use crate::debuginfo::DebugInfo;

use super::{
	args::{ArgError, ArgValues},
	stackframe::StackFrame,
};

/// Symbol line data of a resolved frame.
#[derive(Debug)]
pub struct Symbolized<'a> {
	info: DebugInfo<'a>,
	offset: u64,
	args: Result<ArgValues, ArgError>,
}

impl<'a> Symbolized<'a> {
	/// `None` if `info` does not start at or before the return address.
	pub fn new(frame: &StackFrame, info: DebugInfo<'a>, args: Result<ArgValues, ArgError>) -> Option<Self> {
		let offset = info.offset_of(frame.return_address)?;

		Some(Symbolized { info, offset, args })
	}

	pub fn info(&self) -> &DebugInfo<'a> {
		&self.info
	}

	pub fn args(&self) -> Result<&ArgValues, &ArgError> {
		self.args.as_ref()
	}
}

/// One frame of a trace, printed as
///
/// ```text
///   rbp 00000000f0117f80  rip 00000000f01000a4
///        kern/init.c:24: test_backtrace+0000000000000064  args:1  0000000000000005
/// ```
///
/// The second line only exists for resolved frames. `{:#}` demangles Rust
/// symbol names.
#[derive(Debug)]
pub struct FrameRecord<'a> {
	pub frame: StackFrame,
	pub symbol: Option<Symbolized<'a>>,
}

impl fmt::Display for FrameRecord<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(
			f,
			"{:>5} {:016x}{:>5} {:016x}",
			"rbp", self.frame.frame_base, "rip", self.frame.return_address
		)?;

		let Some(sym) = &self.symbol else {
			return Ok(());
		};
		let info = &sym.info;

		write!(f, "{:7}{}:{}: ", "", info.file, info.line)?;
		if f.alternate() {
			write!(f, "{:#}", demangle(info.function_name))?;
		} else {
			f.write_str(info.function_name)?;
		}
		write!(f, "+{:016x}  args:{} ", sym.offset, info.arg_count())?;

		match &sym.args {
			Ok(values) => {
				for value in values.iter() {
					write!(f, " {:016x}", value)?;
				}
			}
			Err(e) => write!(f, " <{}>", e)?,
		}

		writeln!(f)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::debuginfo::ArgSizes;

	fn info(name: &'static str, start: u64, sizes: &[usize]) -> DebugInfo<'static> {
		DebugInfo {
			file: "kern/init.c",
			line: 24,
			function_name: name,
			function_start_address: start,
			arg_sizes: sizes.iter().copied().collect::<ArgSizes>(),
		}
	}

	#[test]
	fn unresolved_frame_is_one_line() {
		let record = FrameRecord {
			frame: StackFrame::new(0xf011_7f80, 0xf010_00a4),
			symbol: None,
		};

		assert_eq!(
			record.to_string(),
			"  rbp 00000000f0117f80  rip 00000000f01000a4\n"
		);
	}

	#[test]
	fn resolved_frame_with_args() {
		let frame = StackFrame::new(0xf011_7f80, 0xf010_00a4);
		let args = [5, 0x1_0000_0000].into_iter().collect::<ArgValues>();
		let sym = Symbolized::new(&frame, info("test_backtrace", 0xf010_0040, &[4, 8]), Ok(args));
		let record = FrameRecord { frame, symbol: sym };

		assert_eq!(
			record.to_string(),
			"  rbp 00000000f0117f80  rip 00000000f01000a4\n       kern/init.c:24: test_backtrace+0000000000000064  args:2  0000000000000005 0000000100000000\n"
		);
	}

	#[test]
	fn failed_args_are_reported_inline() {
		let frame = StackFrame::new(0x8000, 0x1010);
		let err = ArgError::MalformedSize { index: 0, size: 3 };
		let sym = Symbolized::new(&frame, info("foo", 0x1000, &[3]), Err(err));
		let record = FrameRecord { frame, symbol: sym };

		let out = record.to_string();
		assert!(out.ends_with("foo+0000000000000010  args:1  <argument 0 has unsupported size 3>\n"));
	}

	#[test]
	fn function_after_return_address_is_rejected() {
		let frame = StackFrame::new(0x8000, 0x0fff);

		assert!(Symbolized::new(&frame, info("foo", 0x1000, &[]), Ok(ArgValues::new())).is_none());
	}

	#[test]
	fn alternate_demangles_rust_names() {
		let frame = StackFrame::new(0x8000, 0x1004);
		let sym = Symbolized::new(
			&frame,
			info("_ZN8kmonitor4main17h0123456789abcdefE", 0x1000, &[]),
			Ok(ArgValues::new()),
		);
		let record = FrameRecord { frame, symbol: sym };

		assert!(format!("{:#}", record).contains(" kmonitor::main+0000000000000004  args:0 \n"));
		assert!(record
			.to_string()
			.contains(" _ZN8kmonitor4main17h0123456789abcdefE+0000000000000004"));
	}
}
