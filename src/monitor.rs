//! Simple command-line kernel monitor useful for controlling the kernel and
//! exploring the system interactively.

mod command;

use core::fmt::{self, Write};

use crate::{
	backtrace::{StackDump, StackSource},
	collection::BoundedVec,
	config::{MAXARGS, MAX_FRAMES, PROMPT},
	debuginfo::DebugInfoResolver,
};

pub use command::{Command, Flow, COMMANDS};

pub struct Monitor<'a> {
	memory: StackSource<'a>,
	resolver: &'a dyn DebugInfoResolver,
	origin: Option<StackDump>,
	max_frames: usize,
}

impl<'a> Monitor<'a> {
	pub fn new(memory: StackSource<'a>, resolver: &'a dyn DebugInfoResolver) -> Self {
		Monitor {
			memory,
			resolver,
			origin: None,
			max_frames: MAX_FRAMES,
		}
	}

	/// Walk from a fixed frame instead of the live context.
	pub fn with_origin(mut self, origin: StackDump) -> Self {
		self.origin = Some(origin);
		self
	}

	pub fn max_frames(mut self, max_frames: usize) -> Self {
		self.max_frames = max_frames;
		self
	}

	/// Parse the line into whitespace-separated arguments, then lookup and
	/// invoke the command.
	pub fn run_cmd(&self, line: &str, out: &mut dyn Write) -> Result<Flow, fmt::Error> {
		let mut argv = BoundedVec::<&str, { MAXARGS - 1 }>::new();

		for arg in line.split_whitespace() {
			if argv.push(arg).is_err() {
				writeln!(out, "Too many arguments (max {})", MAXARGS)?;
				return Ok(Flow::Continue);
			}
		}

		let Some(name) = argv.first() else {
			return Ok(Flow::Continue);
		};

		match COMMANDS.iter().find(|cmd| cmd.name == *name) {
			Some(cmd) => (cmd.func)(self, &argv, out),
			None => {
				writeln!(out, "Unknown command '{}'", name)?;
				Ok(Flow::Continue)
			}
		}
	}

	/// Run lines until they run out or a command asks to leave.
	pub fn run<'l, I>(&self, lines: I, out: &mut dyn Write) -> fmt::Result
	where
		I: IntoIterator<Item = &'l str>,
	{
		writeln!(out, "Welcome to the kernel monitor!")?;
		writeln!(out, "Type 'help' for a list of commands.")?;

		for line in lines {
			out.write_str(PROMPT)?;
			if self.run_cmd(line, out)? == Flow::Exit {
				break;
			}
		}

		Ok(())
	}
}
