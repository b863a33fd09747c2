//! 扫描进度回调（可选，不影响结果）

/// 进度观察者：`done` 为已处理字节数，`total` 为总字节数
pub trait ProgressObserver {
    fn on_progress(&mut self, done: u64, total: u64);
}

/// 空观察者
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _done: u64, _total: u64) {}
}

impl<F: FnMut(u64, u64)> ProgressObserver for F {
    fn on_progress(&mut self, done: u64, total: u64) {
        self(done, total)
    }
}

/// 上报粒度：约 100 次/扫描
const STEPS: u64 = 100;

/// 按固定步长节流上报，避免逐字节回调
pub(crate) struct Ticker<'a> {
    observer: &'a mut dyn ProgressObserver,
    total: u64,
    step: u64,
    next: u64,
}

impl<'a> Ticker<'a> {
    pub(crate) fn new(observer: &'a mut dyn ProgressObserver, total: u64) -> Self {
        let step = (total / STEPS).max(1);
        Self { observer, total, step, next: step }
    }

    #[inline]
    pub(crate) fn tick(&mut self, done: u64) {
        if done >= self.next {
            self.observer.on_progress(done.min(self.total), self.total);
            self.next = done + self.step;
        }
    }

    pub(crate) fn finish(&mut self) {
        self.observer.on_progress(self.total, self.total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_throttles_and_finishes() {
        let mut seen: Vec<(u64, u64)> = Vec::new();
        let mut obs = |d: u64, t: u64| seen.push((d, t));
        {
            let mut t = Ticker::new(&mut obs, 1000);
            for i in 0..1000 {
                t.tick(i);
            }
            t.finish();
        }
        assert!(seen.len() <= 101);
        assert_eq!(seen.last(), Some(&(1000, 1000)));
        assert!(seen.windows(2).all(|w| w[0].0 <= w[1].0));
    }
}
