//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod storage;
pub mod tool_server;

pub use storage::*;
pub use tool_server::*;
