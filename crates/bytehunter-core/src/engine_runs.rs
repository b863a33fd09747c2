//! Basic 模式：重复字节序列扫描（流式，一字节前瞻）
use std::io::{self, BufReader, Read};

use crate::options::RunCounting;
use crate::progress::{ProgressObserver, Ticker};
use crate::types::RunRecord;

/// 顺序扫描字节流，输出长度不小于 `threshold` 的重复字节序列（按文件顺序）
///
/// 长度口径：
/// - `Transitions`：k 个相同字节记为 k-1，阈值与 k-1 比较
/// - `Occurrences`：k 个相同字节记为 k
///
/// 两种口径下 range 都是该序列首尾字节的偏移（0 起始，两端包含）。
/// 仅持有当前字节与当前序列长度，内存占用与文件大小无关。
pub(crate) fn scan_runs<R: Read>(
    reader: R,
    total: u64,
    threshold: u64,
    counting: RunCounting,
    observer: &mut dyn ProgressObserver,
) -> io::Result<Vec<RunRecord>> {
    let mut results = Vec::new();
    let mut ticker = Ticker::new(observer, total);
    let mut bytes = BufReader::new(reader).bytes();

    let mut prev = match bytes.next().transpose()? {
        Some(b) => b,
        None => return Ok(results),
    };
    // run_len 统计相邻相等的次数；pos 为下一个读入字节的偏移
    let mut run_len: u64 = 0;
    let mut pos: u64 = 1;

    loop {
        let next = bytes.next().transpose()?;
        if next == Some(prev) {
            run_len += 1;
        } else {
            // 不匹配（含流结束）：上一序列结束于 pos-1
            let size = match counting {
                RunCounting::Transitions => run_len,
                RunCounting::Occurrences => run_len + 1,
            };
            if size >= threshold {
                let end = pos - 1;
                results.push(RunRecord { range: (end - run_len, end), size, repeating_byte: prev });
            }
            run_len = 0;
            match next {
                Some(b) => prev = b,
                None => break,
            }
        }
        pos += 1;
        ticker.tick(pos);
    }

    ticker.finish();
    tracing::debug!(runs = results.len(), threshold, "basic scan finished");
    Ok(results)
}
