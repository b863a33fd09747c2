//! 二进制文件字节模式扫描库
//!
//! 设计要点：
//! - 文件始终按不透明的原始字节处理，不解析任何结构化格式。
//! - 三种互斥模式：Basic（重复字节序列）、Regex（前缀 + 通配字节）、Custom（自定义序列计数）。
//! - Basic 流式读取，内存占用恒定；Regex / Custom 整读到内存，超大文件会整体驻留。
//! - 参数校验由调用方完成（见 [`validate`]），核心只负责扫描并返回结构化结果。

mod options;
mod types;
mod error;
mod pattern;
mod needles;
mod engine_runs;
mod engine_prefix;
mod engine_count;
mod progress;
mod mapper;
mod scan;
pub mod validate;

pub use error::{Result, ScanError};
pub use mapper::{load_mapper, parse_mapper_str};
pub use needles::decode_hex_key;
pub use options::{Mapper, ModeKind, RunCounting, ScanMode, ScanOptions, WILDCARD};
pub use pattern::{compile, MatchSpec, Prefix};
pub use progress::{NoProgress, ProgressObserver};
pub use scan::{scan_and_write, scan_basic, scan_custom, scan_file, scan_regex, write_report};
pub use types::{RunRecord, ScanReport};
pub use validate::ValidationError;
