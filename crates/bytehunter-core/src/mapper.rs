//! 映射表加载（内联 JSON 字符串 / TOML 或 JSON 文件）
use serde::Deserialize;
use std::path::Path;

use crate::error::{Result, ScanError};
use crate::options::Mapper;

/// TOML 映射文件结构：
///
/// ```toml
/// [mapper]
/// "41" = "A-byte"
/// "dead beef" = "marker"
/// ```
#[derive(Debug, Deserialize)]
struct MapperFile {
    #[serde(default)]
    mapper: Mapper,
}

/// 解析内联映射表字符串（JSON 对象；单引号按双引号处理）
pub fn parse_mapper_str(raw: &str) -> serde_json::Result<Mapper> {
    let normalized = raw.replace('\'', "\"");
    serde_json::from_str(&normalized)
}

/// 从文件加载映射表：`.toml` 按 TOML（`[mapper]` 表）解析，其余按 JSON 对象解析
pub fn load_mapper(path: &Path) -> Result<Mapper> {
    let txt = std::fs::read_to_string(path).map_err(|e| ScanError::file_read(path, e))?;
    let is_toml = path.extension().and_then(|e| e.to_str()).map_or(false, |e| e.eq_ignore_ascii_case("toml"));

    let parsed = if is_toml {
        toml::from_str::<MapperFile>(&txt).map(|f| f.mapper).map_err(|e| e.to_string())
    } else {
        serde_json::from_str::<Mapper>(&txt).map_err(|e| e.to_string())
    };
    let mapper = parsed.map_err(|reason| ScanError::MapperLoad { path: path.to_path_buf(), reason })?;
    tracing::debug!(?path, entries = mapper.len(), "mapper loaded");
    Ok(mapper)
}
