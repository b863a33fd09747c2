//! 正则模式编译：`<前缀><通配符…>` -> 匹配规格
//!
//! 模式串只有一条文本通道，无法区分“字符 `0`,`0`”与“字节 0x00”，
//! 因此按转义写法推断：以 `\x` 开头的前缀按十六进制文本比较，其余按原始字节比较。
//! 需要明确比较方式的调用方可直接构造 [`Prefix`]，绕过推断。
use std::borrow::Cow;

use crate::error::{Result, ScanError};
use crate::options::WILDCARD;

/// 十六进制转义标记
const HEX_ESCAPE: &str = "\\x";

/// 前缀及其比较方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prefix {
    /// 按字节逐一比较
    Literal(Vec<u8>),
    /// 以小写两位十六进制渲染候选字节后按文本比较（如 `"41"` 对应 0x41）
    HexText(String),
}

impl Prefix {
    /// 前缀对应的字节序列
    ///
    /// HexText 的文本比较与“把文本解码为字节后逐字节比较”等价：
    /// 渲染结果恒为偶数长度的小写十六进制，所以奇数长度、非法字符或空文本永远不会匹配，此时返回 None。
    pub fn needle(&self) -> Option<Cow<'_, [u8]>> {
        match self {
            Prefix::Literal(b) if b.is_empty() => None,
            Prefix::Literal(b) => Some(Cow::Borrowed(b.as_slice())),
            Prefix::HexText(t) if t.is_empty() => None,
            Prefix::HexText(t) => decode_hex(t).map(Cow::Owned),
        }
    }
}

/// 编译后的匹配规格：前缀 + 通配字节数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpec {
    pub prefix: Prefix,
    pub wildcards: usize,
}

impl MatchSpec {
    pub fn new(prefix: Prefix, wildcards: usize) -> Self {
        Self { prefix, wildcards }
    }
}

/// 将原始模式串拆分为前缀与通配符个数
///
/// 从尾部向前寻找最后一个非通配字符，其之前（含）为前缀，之后全部为通配符。
/// 只做拆分所需的最小检查；完整校验见 [`crate::validate::validate_regex_pattern`]。
pub fn compile(raw: &str) -> Result<MatchSpec> {
    let (idx, ch) = raw
        .char_indices()
        .rev()
        .find(|&(_, c)| c != WILDCARD)
        .ok_or_else(|| invalid(raw, "pattern must contain some bytes prefix"))?;
    let split = idx + ch.len_utf8();
    let wildcards = raw.len() - split;
    if wildcards == 0 {
        return Err(invalid(raw, "pattern must end with the wildcard symbol"));
    }

    let prefix = &raw[..split];
    let prefix = if prefix.starts_with(HEX_ESCAPE) {
        Prefix::HexText(prefix.replace(HEX_ESCAPE, "").to_ascii_lowercase())
    } else {
        Prefix::Literal(prefix.as_bytes().to_vec())
    };
    tracing::debug!(?prefix, wildcards, "compiled regex pattern");
    Ok(MatchSpec { prefix, wildcards })
}

fn invalid(raw: &str, reason: &'static str) -> ScanError {
    ScanError::InvalidPattern { pattern: raw.to_string(), reason }
}

/// 严格解码十六进制文本（偶数长度，仅 0-9a-fA-F）
pub(crate) fn decode_hex(text: &str) -> Option<Vec<u8>> {
    let raw = text.as_bytes();
    if raw.len() % 2 != 0 {
        return None;
    }
    raw.chunks_exact(2)
        .map(|pair| Some((nibble(pair[0])? << 4) | nibble(pair[1])?))
        .collect()
}

pub(crate) fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_escape_prefix_becomes_hex_text() {
        let spec = compile(r"\x41XX").unwrap();
        assert_eq!(spec.prefix, Prefix::HexText("41".into()));
        assert_eq!(spec.wildcards, 2);
        assert_eq!(spec.prefix.needle().as_deref(), Some(&[0x41u8][..]));
    }

    #[test]
    fn hex_text_is_lowercased() {
        let spec = compile(r"\x4AX").unwrap();
        assert_eq!(spec.prefix, Prefix::HexText("4a".into()));
        assert_eq!(spec.prefix.needle().as_deref(), Some(&[0x4au8][..]));
    }

    #[test]
    fn plain_prefix_is_literal() {
        let spec = compile("C123XX").unwrap();
        assert_eq!(spec.prefix, Prefix::Literal(b"C123".to_vec()));
        assert_eq!(spec.wildcards, 2);
    }

    #[test]
    fn inner_wildcard_belongs_to_prefix() {
        let spec = compile("AXBXXX").unwrap();
        assert_eq!(spec.prefix, Prefix::Literal(b"AXB".to_vec()));
        assert_eq!(spec.wildcards, 3);
    }

    #[test]
    fn rejects_missing_prefix_or_suffix() {
        assert!(matches!(compile("XXX"), Err(ScanError::InvalidPattern { .. })));
        assert!(matches!(compile(""), Err(ScanError::InvalidPattern { .. })));
        assert!(matches!(compile("AB"), Err(ScanError::InvalidPattern { .. })));
    }

    #[test]
    fn odd_hex_text_never_matches() {
        let spec = compile(r"\x4XX").unwrap();
        assert_eq!(spec.prefix, Prefix::HexText("4".into()));
        assert!(spec.prefix.needle().is_none());
        assert!(Prefix::HexText(String::new()).needle().is_none());
    }

    #[test]
    fn decode_hex_strict() {
        assert_eq!(decode_hex("00ff7A"), Some(vec![0x00, 0xff, 0x7a]));
        assert_eq!(decode_hex("0"), None);
        assert_eq!(decode_hex("zz"), None);
        assert_eq!(decode_hex(""), Some(vec![]));
    }
}
