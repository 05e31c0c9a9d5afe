pub const WORD_SIZE: usize = 8;

/// upper bound of frames printed by one walk.
pub const MAX_FRAMES: usize = 64;
/// capacity of the per-function argument size list.
pub const MAX_ARGS: usize = 10;

pub const VM_OFFSET: usize = 0x0080_0400_0000;

pub const MAXARGS: usize = 16;
pub const PROMPT: &str = "K> ";
