#![cfg_attr(not(test), no_std)]

pub mod backtrace;
pub mod boot;
pub mod collection;
pub mod config;
pub mod debuginfo;
pub mod monitor;
pub mod printk;

pub use backtrace::{Backtrace, StackDump, StackFrame};
pub use debuginfo::{DebugInfo, DebugInfoResolver, SymbolNotFound};
pub use monitor::Monitor;
