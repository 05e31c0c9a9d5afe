#[macro_export]
macro_rules! register {
	($arg:literal) => {
		unsafe {
			let ret: u64;
			core::arch::asm!(
				concat!("mov {0}, ", $arg),
				out(reg) ret,
				options(nomem, nostack, preserves_flags)
			);
			ret
		}
	};
}

/// Address of the instruction right after this read.
#[inline(always)]
pub fn read_rip() -> u64 {
	let rip: u64;
	unsafe {
		core::arch::asm!(
			"lea {0}, [rip]",
			out(reg) rip,
			options(nomem, nostack, preserves_flags)
		);
	}
	rip
}
