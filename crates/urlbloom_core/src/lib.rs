pub mod consts;
pub mod errors;
pub mod config;
pub mod filter;
pub mod shared;
pub mod processor;

pub use config::FilterConfig;
pub use errors::{BloomError, Result};
pub use filter::{theoretical_fp_rate, Bloom, InsertOutcome};
pub use processor::{parse_record, process_file, LineProcessor, ProcessStats, Record, Response};
pub use shared::SharedBloom;
