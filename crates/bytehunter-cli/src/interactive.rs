//! 交互式参数收集
//!
//! 参数分两组收集：公共参数（模式 + 文件路径）与模式专属参数。
//! 每组各有独立的尝试次数，成功后下一组重新计数；输入 `help` 查看说明，不计入失败次数。
use anyhow::{bail, Result};
use bytehunter_core::validate::{validate_file_path, validate_mapper_str, validate_regex_pattern, validate_threshold};
use bytehunter_core::{ModeKind, RunCounting, ScanMode, ScanOptions, WILDCARD};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// 每组参数允许的尝试次数
pub(crate) const ATTEMPTS_PER_GROUP: u32 = 3;

const HELP_KEYWORD: &str = "help";

/// 一组参数的剩余尝试次数；按组创建并显式传递
#[derive(Debug)]
pub(crate) struct AttemptBudget {
    remaining: u32,
}

impl AttemptBudget {
    pub(crate) fn new(attempts: u32) -> Self {
        Self { remaining: attempts }
    }

    /// 记一次失败
    pub(crate) fn spend(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// 单次尝试的结果：成功、失败（附提示）或查看帮助
enum Attempt<T> {
    Done(T),
    Invalid(String),
    Help,
}

/// 逐组提示并校验，尝试次数耗尽时返回 None
pub(crate) fn collect_options<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<ScanOptions>> {
    let mut budget = AttemptBudget::new(ATTEMPTS_PER_GROUP);
    let (kind, path) = match run_group(&mut budget, input, out, mandatory_group)? {
        Some(v) => v,
        None => return give_up(out),
    };

    let mut budget = AttemptBudget::new(ATTEMPTS_PER_GROUP);
    let mode = match kind {
        ModeKind::Basic => run_group(&mut budget, input, out, basic_group)?,
        ModeKind::Regex => run_group(&mut budget, input, out, regex_group)?,
        ModeKind::Custom => run_group(&mut budget, input, out, custom_group)?,
    };
    match mode {
        Some(mode) => {
            writeln!(out, "Calculating....")?;
            Ok(Some(ScanOptions { path, mode }))
        }
        None => give_up(out),
    }
}

fn give_up<W: Write>(out: &mut W) -> Result<Option<ScanOptions>> {
    writeln!(out, "There were too many failed attempts. Exiting...")?;
    Ok(None)
}

fn run_group<R, W, T, F>(budget: &mut AttemptBudget, input: &mut R, out: &mut W, mut step: F) -> Result<Option<T>>
where
    R: BufRead,
    W: Write,
    F: FnMut(&mut R, &mut W) -> Result<Attempt<T>>,
{
    while !budget.is_exhausted() {
        match step(input, out)? {
            Attempt::Done(v) => return Ok(Some(v)),
            Attempt::Invalid(msg) => {
                writeln!(out, "{msg}")?;
                budget.spend();
            }
            Attempt::Help => print_help(out)?,
        }
    }
    Ok(None)
}

fn mandatory_group<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Attempt<(ModeKind, PathBuf)>> {
    writeln!(out, "Please choose a mode\n")?;
    for (i, kind) in ModeKind::ALL.iter().enumerate() {
        writeln!(out, "\t{}. {}   ({})", i + 1, kind, kind.explain())?;
    }
    let choice = prompt(input, out, &format!("Please select one of the following options (1-{})", ModeKind::ALL.len()))?;
    if is_help(&choice) {
        return Ok(Attempt::Help);
    }
    let kind = match choice.parse::<usize>() {
        Ok(n) if (1..=ModeKind::ALL.len()).contains(&n) => ModeKind::ALL[n - 1],
        _ => {
            return Ok(Attempt::Invalid(format!(
                "Invalid input! The input must be a number between 1 and {}.",
                ModeKind::ALL.len()
            )))
        }
    };

    let raw = prompt(input, out, "Please insert a file path")?;
    if is_help(&raw) {
        return Ok(Attempt::Help);
    }
    let path = PathBuf::from(raw);
    Ok(match validate_file_path(&path) {
        Ok(()) => Attempt::Done((kind, path)),
        Err(e) => Attempt::Invalid(e.to_string()),
    })
}

fn basic_group<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Attempt<ScanMode>> {
    let raw = prompt(input, out, "Please insert a threshold")?;
    if is_help(&raw) {
        return Ok(Attempt::Help);
    }
    Ok(match validate_threshold(&raw) {
        Ok(threshold) => Attempt::Done(ScanMode::Basic { threshold, counting: RunCounting::Transitions }),
        Err(e) => Attempt::Invalid(e.to_string()),
    })
}

fn regex_group<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Attempt<ScanMode>> {
    let raw = prompt(input, out, "Please insert a bytes regex pattern")?;
    if is_help(&raw) {
        return Ok(Attempt::Help);
    }
    Ok(match validate_regex_pattern(&raw) {
        Ok(()) => Attempt::Done(ScanMode::Regex { pattern: raw }),
        Err(e) => Attempt::Invalid(e.to_string()),
    })
}

fn custom_group<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Attempt<ScanMode>> {
    let raw = prompt(input, out, "Please insert a dictionary mapper (without new line between records)")?;
    if is_help(&raw) {
        return Ok(Attempt::Help);
    }
    Ok(match validate_mapper_str(&raw) {
        Ok(mapper) => Attempt::Done(ScanMode::Custom { mapper }),
        Err(e) => Attempt::Invalid(e.to_string()),
    })
}

/// 输出提示并读取一行（去掉首尾空白）；输入流结束视为错误
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, title: &str) -> Result<String> {
    write!(out, "\n{title}: ")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input closed before all arguments were provided");
    }
    Ok(line.trim().to_string())
}

fn is_help(raw: &str) -> bool {
    raw.eq_ignore_ascii_case(HELP_KEYWORD)
}

fn print_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "\nModes:")?;
    for kind in ModeKind::ALL {
        writeln!(out, "\t{kind}: {}", kind.explain())?;
    }
    writeln!(out, "\nBasic mode threshold: a non-negative number; k equal bytes in a row count as k-1.")?;
    writeln!(
        out,
        "Regex mode pattern: a prefix followed by '{WILDCARD}' symbols, e.g. \\x01XX (hex byte) or C1XX (literal)."
    )?;
    writeln!(out, "Custom mode mapper: a JSON object of hex strings to labels, e.g. {{\"41\": \"A-byte\"}}.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn fixture() -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&[1, 1, 1, 2]).unwrap();
        f
    }

    fn run(script: &str) -> (Result<Option<ScanOptions>>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let res = collect_options(&mut input, &mut out);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn budget_counts_down() {
        let mut b = AttemptBudget::new(2);
        assert!(!b.is_exhausted());
        b.spend();
        b.spend();
        assert!(b.is_exhausted());
        b.spend();
        assert!(b.is_exhausted());
    }

    #[test]
    fn collects_basic_mode() {
        let f = fixture();
        let (res, _) = run(&format!("1\n{}\n3\n", f.path().display()));
        let opts = res.unwrap().unwrap();
        assert_eq!(opts.path, f.path());
        assert_eq!(opts.mode, ScanMode::Basic { threshold: 3, counting: RunCounting::Transitions });
    }

    #[test]
    fn retries_within_budget_and_resets_per_group() {
        let f = fixture();
        // 公共参数失败两次后成功；模式参数重新获得 3 次机会
        let script = format!("9\n2\n/no/such/file\n2\n{}\nXX\nAB\n\\x41XX\n", f.path().display());
        let (res, text) = run(&script);
        let opts = res.unwrap().unwrap();
        assert_eq!(opts.mode, ScanMode::Regex { pattern: r"\x41XX".into() });
        assert!(text.contains("must end with 'X'"));
    }

    #[test]
    fn help_does_not_spend_attempts() {
        let f = fixture();
        let script = format!("help\nhelp\nhelp\n3\n{}\n{{'41': 'A'}}\n", f.path().display());
        let (res, text) = run(&script);
        assert!(matches!(res.unwrap().unwrap().mode, ScanMode::Custom { .. }));
        assert!(text.contains("Modes:"));
    }

    #[test]
    fn gives_up_after_three_failures() {
        let (res, text) = run("0\nfoo\n4\n");
        assert!(res.unwrap().is_none());
        assert!(text.contains("too many failed attempts"));
    }

    #[test]
    fn closed_input_is_an_error() {
        let (res, _) = run("1\n");
        assert!(res.is_err());
    }
}
