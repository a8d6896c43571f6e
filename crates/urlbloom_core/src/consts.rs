// crates/urlbloom_core/src/consts.rs

pub const DEFAULT_BITS: u64 = 10_000_000;
pub const DEFAULT_HASHES: u32 = 3;

pub const CMD_ADD: &str = "ADD";
pub const CMD_CONTAINS: &str = "CONTAINS";

pub const DEFAULT_INPUT: &str = "inputPS03.txt";
pub const DEFAULT_OUTPUT: &str = "outputPS03.txt";
