//! Regex 模式：按“前缀 + 通配字节”截取序列（整读）
use memchr::memmem;

use crate::pattern::MatchSpec;
use crate::progress::{ProgressObserver, Ticker};

/// 在整块缓冲区上查找所有以前缀开头的位置，截取 `前缀长度 + 通配数` 个字节
/// - 起点范围为 `0..len-1`，最后一个字节不作为起点
/// - 相邻、重叠的命中全部保留，不去重
/// - 尾部不足时截断到文件末尾
pub(crate) fn scan_prefixed(buf: &[u8], spec: &MatchSpec, observer: &mut dyn ProgressObserver) -> Vec<Vec<u8>> {
    let mut results = Vec::new();
    let mut ticker = Ticker::new(observer, buf.len() as u64);

    let needle = match spec.prefix.needle() {
        Some(n) => n,
        None => {
            tracing::debug!(prefix = ?spec.prefix, "prefix can never match");
            ticker.finish();
            return results;
        }
    };
    let width = needle.len() + spec.wildcards;
    let start_limit = buf.len().saturating_sub(1);
    let finder = memmem::Finder::new(&needle[..]);

    let mut at = 0usize;
    while at < start_limit {
        let i = match finder.find(&buf[at..]) {
            Some(off) => at + off,
            None => break,
        };
        if i >= start_limit {
            break;
        }
        let end = (i + width).min(buf.len());
        results.push(buf[i..end].to_vec());
        ticker.tick(i as u64);
        // 从命中起点 +1 继续，允许重叠
        at = i + 1;
    }

    ticker.finish();
    tracing::debug!(matches = results.len(), width, "regex scan finished");
    results
}
