//! 扫描请求（模式 + 文件路径 + 该模式专属参数）
use indexmap::IndexMap;
use std::fmt;
use std::path::PathBuf;

/// 正则模式中的通配符
pub const WILDCARD: char = 'X';

/// 十六进制串 -> 标签 的有序映射（Custom 模式）
pub type Mapper = IndexMap<String, String>;

/// 连续字节的长度计数口径
/// - Transitions：统计“相邻相等”的次数，k 个相同字节记为 k-1（默认）
/// - Occurrences：统计字节出现次数，k 个相同字节记为 k
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunCounting {
    #[default]
    Transitions,
    Occurrences,
}

/// 扫描模式及其参数；三种模式互斥，参数与模式绑定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanMode {
    /// 查找长度不小于阈值的重复字节序列
    Basic { threshold: u64, counting: RunCounting },
    /// 按“前缀 + 通配符”结构截取字节序列
    Regex { pattern: String },
    /// 统计自定义十六进制序列的出现次数
    Custom { mapper: Mapper },
}

impl ScanMode {
    pub fn kind(&self) -> ModeKind {
        match self {
            ScanMode::Basic { .. } => ModeKind::Basic,
            ScanMode::Regex { .. } => ModeKind::Regex,
            ScanMode::Custom { .. } => ModeKind::Custom,
        }
    }
}

/// 模式标签（不含参数），用于日志与交互式选择
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Basic,
    Regex,
    Custom,
}

impl ModeKind {
    pub const ALL: [ModeKind; 3] = [ModeKind::Basic, ModeKind::Regex, ModeKind::Custom];

    /// 模式的简短说明
    pub fn explain(self) -> &'static str {
        match self {
            ModeKind::Basic => "Find repeating sequence against a threshold",
            ModeKind::Regex => "Get matching bytes by prefix and a structure",
            ModeKind::Custom => "Insert custom bytes json streams to locate",
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModeKind::Basic => "Basic mode",
            ModeKind::Regex => "Regex mode",
            ModeKind::Custom => "Custom mode",
        };
        f.write_str(s)
    }
}

/// 扫描选项（一次请求的完整描述，构造后不可变）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// 待扫描文件；存在且非空由调用方预先校验
    pub path: PathBuf,
    pub mode: ScanMode,
}

impl ScanOptions {
    pub fn basic(path: impl Into<PathBuf>, threshold: u64) -> Self {
        Self { path: path.into(), mode: ScanMode::Basic { threshold, counting: RunCounting::default() } }
    }

    pub fn regex(path: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self { path: path.into(), mode: ScanMode::Regex { pattern: pattern.into() } }
    }

    pub fn custom(path: impl Into<PathBuf>, mapper: Mapper) -> Self {
        Self { path: path.into(), mode: ScanMode::Custom { mapper } }
    }
}
