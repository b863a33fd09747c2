//! 自定义序列计划（Aho-Corasick）
//!
//! - 将映射表中的十六进制键解码为字节序列，相同序列只进自动机一次。
//! - 记录“映射条目 -> 序列索引”，扫描后按映射顺序回填计数。
use std::collections::HashMap;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};

use crate::error::{Result, ScanError};
use crate::options::Mapper;
use crate::pattern::nibble;

/// 计数计划（一次请求内构建，扫描结束即丢弃）
pub(crate) struct NeedlePlan {
    /// 全部去重序列的自动机（Standard 语义，支持重叠查找）
    pub(crate) ac: AhoCorasick,
    /// 去重后的字节序列（与 ac 模式索引一一对应）
    pub(crate) needles: Vec<Vec<u8>>,
    /// 映射条目下标 -> 序列索引
    pub(crate) key_to_needle: Vec<usize>,
}

/// 解码映射表的键
/// 与 `bytes.fromhex` 一样只容忍字节对之间的空白，拆开字节对的空白视为非法；
/// 空串视为非法（否则处处命中）
pub fn decode_hex_key(key: &str) -> Option<Vec<u8>> {
    let raw = key.as_bytes();
    let mut out = Vec::with_capacity(raw.len() / 2);
    let mut i = 0;
    while i < raw.len() {
        if raw[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }
        let hi = nibble(raw[i])?;
        let lo = nibble(*raw.get(i + 1)?)?;
        out.push((hi << 4) | lo);
        i += 2;
    }
    if out.is_empty() {
        return None;
    }
    Some(out)
}

/// 从映射表构建计数计划
pub(crate) fn build_needle_plan(mapper: &Mapper) -> Result<NeedlePlan> {
    let mut needles: Vec<Vec<u8>> = Vec::new();
    let mut index: HashMap<Vec<u8>, usize> = HashMap::new();
    let mut key_to_needle = Vec::with_capacity(mapper.len());

    for key in mapper.keys() {
        let bytes = decode_hex_key(key).ok_or_else(|| ScanError::InvalidHexKey { key: key.clone() })?;
        let id = match index.get(&bytes) {
            Some(id) => *id,
            None => {
                let id = needles.len();
                index.insert(bytes.clone(), id);
                needles.push(bytes);
                id
            }
        };
        key_to_needle.push(id);
    }

    let ac = AhoCorasickBuilder::new().match_kind(MatchKind::Standard).build(&needles)?;
    Ok(NeedlePlan { ac, needles, key_to_needle })
}
