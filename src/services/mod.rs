// Service exports
pub mod mcsr;

pub use mcsr::{McsrClient, McsrError, PageQuery, DEFAULT_BASES, DEFAULT_TIMEOUT_SECS};
