use core::fmt::{self, Write};

use crate::backtrace::{Backtrace, StackDump};

use super::Monitor;

/// What the monitor does after a command returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
	Continue,
	Exit,
}

pub struct Command {
	pub name: &'static str,
	pub desc: &'static str,
	pub func: fn(&Monitor<'_>, &[&str], &mut dyn Write) -> Result<Flow, fmt::Error>,
}

pub static COMMANDS: [Command; 3] = [
	Command {
		name: "help",
		desc: "Display this list of commands",
		func: mon_help,
	},
	Command {
		name: "backtrace",
		desc: "Display a listing of function call frames",
		func: mon_backtrace,
	},
	Command {
		name: "exit",
		desc: "Leave the kernel monitor",
		func: mon_exit,
	},
];

fn mon_help(_mon: &Monitor<'_>, _argv: &[&str], out: &mut dyn Write) -> Result<Flow, fmt::Error> {
	for cmd in COMMANDS.iter() {
		writeln!(out, "{} - {}", cmd.name, cmd.desc)?;
	}

	Ok(Flow::Continue)
}

fn mon_backtrace(mon: &Monitor<'_>, _argv: &[&str], out: &mut dyn Write) -> Result<Flow, fmt::Error> {
	// captured here so the walk starts from a frame that is still live.
	let origin = match mon.origin {
		Some(dump) => Some(dump),
		None => current_context(),
	};

	let Some(dump) = origin else {
		writeln!(out, "backtrace: no stack context")?;
		return Ok(Flow::Continue);
	};

	writeln!(out, "Stack backtrace:")?;

	let result = Backtrace::new(dump, &mon.memory, mon.resolver)
		.max_frames(mon.max_frames)
		.demangle(true)
		.print_trace(out);

	if let Err(e) = result {
		writeln!(out, "backtrace: {}", e)?;
	}

	Ok(Flow::Continue)
}

fn mon_exit(_mon: &Monitor<'_>, _argv: &[&str], _out: &mut dyn Write) -> Result<Flow, fmt::Error> {
	Ok(Flow::Exit)
}

#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn current_context() -> Option<StackDump> {
	Some(StackDump::new())
}

#[cfg(not(target_arch = "x86_64"))]
fn current_context() -> Option<StackDump> {
	None
}

#[cfg(test)]
mod test {
	use super::*;

	#[cfg(target_arch = "x86_64")]
	#[test]
	fn live_context_is_the_callers_frame() {
		let rbp = crate::register!("rbp");
		let dump = current_context().unwrap();

		// a frame of its own would sit below the caller's.
		assert!(dump.top().frame_base >= rbp);
	}

	#[test]
	fn exit_stops_the_monitor() {
		let image = crate::test::StackImage::new(0x8000, 0x10);
		let monitor = Monitor::new(image.snapshot().into(), &crate::debuginfo::NoSymbols);

		let mut out = String::new();
		assert_eq!(mon_exit(&monitor, &["exit"], &mut out), Ok(Flow::Exit));
		assert!(out.is_empty());
	}
}
