//! Kernel log output.
//!
//! Messages go to whatever console was installed with [`set_console`].
//! Before that, they are dropped.

mod fmt;
mod pr_log;

use core::fmt::{Arguments, Result, Write};

use spin::Mutex;

pub type Console = &'static mut (dyn Write + Send);

static CONSOLE: Mutex<Option<Console>> = Mutex::new(None);

pub fn set_console(console: Console) {
	*CONSOLE.lock() = Some(console);
}

pub fn take_console() -> Option<Console> {
	CONSOLE.lock().take()
}

pub fn __printk(arg: Arguments) -> Result {
	// the installed console must not log by itself, or this spins forever.
	match CONSOLE.lock().as_mut() {
		Some(out) => out.write_fmt(arg),
		None => Ok(()),
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn console_receives_log() {
		let _guard = crate::test::CONSOLE_LOCK.lock();
		let buf = crate::test::capture_console();

		crate::pr_info!("hello {}", 42);
		crate::pr_err!("oops");

		take_console();
		crate::pr_info!("dropped");

		let out = buf.lock();
		assert!(out.contains("hello 42\n"));
		assert!(out.contains("\x1b[41moops\x1b[49m\n"));
		assert!(!out.contains("dropped"));
	}
}
