//! 扫描错误类型
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 扫描期错误（均为致命错误，不做重试，也不返回部分结果）
#[derive(Debug, Error)]
pub enum ScanError {
    /// 原始模式串未通过预校验即到达编译器
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: &'static str },

    /// 映射表的键不是合法的十六进制串
    #[error("invalid hex key {key:?}")]
    InvalidHexKey { key: String },

    /// 序列自动机构建失败（超出 aho-corasick 的容量限制）
    #[error("failed to build sequence automaton")]
    Automaton(#[from] aho_corasick::BuildError),

    /// 打开或读取待扫描文件失败
    #[error("failed to read {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 映射文件加载或解析失败
    #[error("failed to load mapper from {path}: {reason}")]
    MapperLoad { path: PathBuf, reason: String },

    /// 写出结果失败
    #[error("failed to write report")]
    Output(#[from] serde_json::Error),
}

impl ScanError {
    pub(crate) fn file_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScanError::FileRead { path: path.into(), source }
    }
}

pub type Result<T, E = ScanError> = std::result::Result<T, E>;
