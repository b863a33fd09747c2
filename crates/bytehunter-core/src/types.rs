//! 公共类型（对外暴露的结果结构）
use indexmap::IndexMap;
use serde::Serialize;

use crate::options::ModeKind;

/// Basic 模式的单条结果
/// - range：`(起始偏移, 结束偏移)`，两端均包含，0 起始
/// - size：按所选计数口径得到的序列长度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunRecord {
    pub range: (u64, u64),
    pub size: u64,
    pub repeating_byte: u8,
}

/// 扫描结果，按模式区分；序列化为 `{"mode": ..., "results": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "results")]
pub enum ScanReport {
    #[serde(rename = "Basic mode")]
    Basic(Vec<RunRecord>),
    #[serde(rename = "Regex mode")]
    Regex(Vec<Vec<u8>>),
    #[serde(rename = "Custom mode")]
    Custom(IndexMap<String, u64>),
}

impl ScanReport {
    pub fn kind(&self) -> ModeKind {
        match self {
            ScanReport::Basic(_) => ModeKind::Basic,
            ScanReport::Regex(_) => ModeKind::Regex,
            ScanReport::Custom(_) => ModeKind::Custom,
        }
    }

    /// 结果条目数（Custom 模式为标签数）
    pub fn len(&self) -> usize {
        match self {
            ScanReport::Basic(v) => v.len(),
            ScanReport::Regex(v) => v.len(),
            ScanReport::Custom(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
