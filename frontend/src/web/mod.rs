//! 原生 Web API 封装模块
//!
//! 对浏览器 API 的轻量级封装（fetch、localStorage、History、文件），
//! 替代 gloo-* 系列 crate 以减小 WASM 二进制体积。

mod file;
mod http;
pub mod router;
mod storage;

pub use file::{confirm, read_file, save_download};
pub use http::FetchClient;
pub use storage::BrowserStorage;
