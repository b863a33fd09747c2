//! 扫描主流程：按模式分派，并可将结果写为 JSON
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::engine_count::scan_occurrences;
use crate::engine_prefix::scan_prefixed;
use crate::engine_runs::scan_runs;
use crate::error::{Result, ScanError};
use crate::options::{Mapper, RunCounting, ScanMode, ScanOptions};
use crate::pattern::{compile, MatchSpec};
use crate::progress::ProgressObserver;
use crate::types::ScanReport;

/// 执行一次扫描请求
/// - 任何 I/O 失败都会中止本次扫描，不返回部分结果
/// - Regex 模式先将模式串编译为匹配规格
pub fn scan_file(opts: &ScanOptions, observer: &mut dyn ProgressObserver) -> Result<ScanReport> {
    tracing::info!(path = ?opts.path, mode = %opts.mode.kind(), "starting scan");
    let report = match &opts.mode {
        ScanMode::Basic { threshold, counting } => scan_basic(&opts.path, *threshold, *counting, observer)?,
        ScanMode::Regex { pattern } => scan_regex(&opts.path, &compile(pattern)?, observer)?,
        ScanMode::Custom { mapper } => scan_custom(&opts.path, mapper, observer)?,
    };
    tracing::info!(results = report.len(), "scan finished");
    Ok(report)
}

/// Basic 模式（流式读取）
pub fn scan_basic(
    path: &Path,
    threshold: u64,
    counting: RunCounting,
    observer: &mut dyn ProgressObserver,
) -> Result<ScanReport> {
    let file = File::open(path).map_err(|e| ScanError::file_read(path, e))?;
    let total = file.metadata().map_err(|e| ScanError::file_read(path, e))?.len();
    let runs = scan_runs(file, total, threshold, counting, observer).map_err(|e| ScanError::file_read(path, e))?;
    Ok(ScanReport::Basic(runs))
}

/// Regex 模式（整读）
pub fn scan_regex(path: &Path, spec: &MatchSpec, observer: &mut dyn ProgressObserver) -> Result<ScanReport> {
    let buf = read_all(path)?;
    Ok(ScanReport::Regex(scan_prefixed(&buf, spec, observer)))
}

/// Custom 模式（整读）
pub fn scan_custom(path: &Path, mapper: &Mapper, observer: &mut dyn ProgressObserver) -> Result<ScanReport> {
    let buf = read_all(path)?;
    Ok(ScanReport::Custom(scan_occurrences(&buf, mapper, observer)?))
}

/// 扫描并将结果以 JSON（带缩进）写入 `out`
pub fn scan_and_write(opts: &ScanOptions, out: &mut dyn Write, observer: &mut dyn ProgressObserver) -> Result<ScanReport> {
    let report = scan_file(opts, observer)?;
    write_report(&report, out)?;
    Ok(report)
}

/// 将结果以 JSON 写入 `out`，末尾追加换行
pub fn write_report(report: &ScanReport, out: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out).map_err(serde_json::Error::io)?;
    Ok(())
}

fn read_all(path: &Path) -> Result<Vec<u8>> {
    let buf = std::fs::read(path).map_err(|e| ScanError::file_read(path, e))?;
    tracing::debug!(?path, bytes = buf.len(), "file loaded");
    Ok(buf)
}
