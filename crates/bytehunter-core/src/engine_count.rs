//! Custom 模式：自定义十六进制序列计数（整读）
use indexmap::IndexMap;

use crate::error::Result;
use crate::needles::build_needle_plan;
use crate::options::Mapper;
use crate::progress::{ProgressObserver, Ticker};

/// 统计映射表中每个序列在缓冲区中的出现次数，返回 `标签 -> 次数`
/// - 允许重叠：等价于“每次从上一命中起点 +1 处继续查找”
/// - 从偏移 0 开始计数
/// - 结果顺序与映射表一致；多个键共用同一标签时，后者覆盖前者的计数
pub(crate) fn scan_occurrences(
    buf: &[u8],
    mapper: &Mapper,
    observer: &mut dyn ProgressObserver,
) -> Result<IndexMap<String, u64>> {
    let plan = build_needle_plan(mapper)?;
    let mut ticker = Ticker::new(observer, buf.len() as u64);

    // 一次重叠扫描覆盖所有序列
    let mut hits = vec![0u64; plan.needles.len()];
    for m in plan.ac.find_overlapping_iter(buf) {
        hits[m.pattern().as_usize()] += 1;
        ticker.tick(m.end() as u64);
    }
    ticker.finish();

    let mut results = IndexMap::with_capacity(mapper.len());
    for (label, &id) in mapper.values().zip(plan.key_to_needle.iter()) {
        results.insert(label.clone(), hits[id]);
    }
    tracing::debug!(keys = mapper.len(), needles = plan.needles.len(), "custom scan finished");
    Ok(results)
}
