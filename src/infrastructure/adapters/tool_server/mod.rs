//! Tool Server Adapter - 语音生成服务客户端实现

mod fake_tool_server;
mod http_tool_client;

pub use fake_tool_server::{FakeFailure, FakeToolServer};
pub use http_tool_client::*;
