//! 参数校验（交由调用方在扫描前执行）
//!
//! 扫描核心假定参数已通过这里的校验；核心内部只做拆分/解码所需的最小检查。
use std::path::Path;
use thiserror::Error;

use crate::mapper::parse_mapper_str;
use crate::needles::decode_hex_key;
use crate::options::{Mapper, WILDCARD};

/// 参数校验失败的原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Could not find the following file path: {0}.")]
    MissingFile(String),
    #[error("This file is empty! Please provide a valid file.")]
    EmptyFile,
    #[error("The regex pattern's length must be at least 2!")]
    ShortPattern,
    #[error("Invalid suffix for the regex pattern! It must end with 'X'")]
    PatternSuffix,
    #[error("The regex pattern must contain some bytes prefix")]
    PatternNoPrefix,
    #[error("Invalid threshold! It must be a valid number")]
    Threshold,
    #[error("Invalid dictionary mapper! Although the input is received as a string, it must be a JSON object of strings.")]
    Mapper,
    #[error("The mapper must contain at least one key and value!")]
    EmptyMapper,
    #[error("The following keys are invalid hex expressions: {0:?}")]
    HexKeys(Vec<String>),
}

/// 文件必须存在、是普通文件且非空
pub fn validate_file_path(path: &Path) -> Result<(), ValidationError> {
    let md = match std::fs::metadata(path) {
        Ok(md) if md.is_file() => md,
        _ => return Err(ValidationError::MissingFile(path.display().to_string())),
    };
    if md.len() == 0 {
        return Err(ValidationError::EmptyFile);
    }
    Ok(())
}

/// 阈值必须是非负整数（仅数字）
pub fn validate_threshold(raw: &str) -> Result<u64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::Threshold);
    }
    raw.parse().map_err(|_| ValidationError::Threshold)
}

/// 模式串：长度 >= 2，以通配符结尾，且不全是通配符
pub fn validate_regex_pattern(raw: &str) -> Result<(), ValidationError> {
    if raw.chars().count() < 2 {
        return Err(ValidationError::ShortPattern);
    }
    if !raw.ends_with(WILDCARD) {
        return Err(ValidationError::PatternSuffix);
    }
    if raw.chars().all(|c| c == WILDCARD) {
        return Err(ValidationError::PatternNoPrefix);
    }
    Ok(())
}

/// 映射表：至少一项，且所有键都是合法的十六进制串
pub fn validate_mapper(mapper: &Mapper) -> Result<(), ValidationError> {
    if mapper.is_empty() {
        return Err(ValidationError::EmptyMapper);
    }
    let invalid: Vec<String> = mapper.keys().filter(|k| decode_hex_key(k).is_none()).cloned().collect();
    if !invalid.is_empty() {
        return Err(ValidationError::HexKeys(invalid));
    }
    Ok(())
}

/// 解析并校验交互/命令行输入的映射表字符串
pub fn validate_mapper_str(raw: &str) -> Result<Mapper, ValidationError> {
    let mapper = parse_mapper_str(raw).map_err(|_| ValidationError::Mapper)?;
    validate_mapper(&mapper)?;
    Ok(mapper)
}
