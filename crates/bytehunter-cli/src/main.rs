use anyhow::{Context, Result};
use bytehunter_core::validate::{validate_file_path, validate_mapper, validate_mapper_str, validate_regex_pattern, validate_threshold};
use bytehunter_core::{load_mapper, scan_file, write_report, NoProgress, ProgressObserver, RunCounting, ScanMode, ScanOptions};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{error, info};

mod interactive;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "bytehunter", version, about = "Scan binary files for byte-level patterns")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 输出文件（JSON）；缺省写到标准输出
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// 不显示进度条
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 查找长度不小于阈值的重复字节序列
    Basic {
        /// 待扫描的二进制文件
        #[arg(long)]
        file: PathBuf,

        /// 最小序列长度（非负整数）
        #[arg(long, value_parser = parse_threshold)]
        threshold: u64,

        /// 按字节出现次数计长度（默认按相邻相等次数，即 k 个字节记为 k-1）
        #[arg(long)]
        count_occurrences: bool,
    },
    /// 截取“前缀 + 通配字节”结构的序列，例如 '\x01XX'
    Regex {
        #[arg(long)]
        file: PathBuf,

        /// 模式串：前缀后跟若干个 'X'
        #[arg(long)]
        pattern: String,
    },
    /// 统计自定义十六进制序列的出现次数
    Custom {
        #[arg(long)]
        file: PathBuf,

        /// 内联映射表（JSON 对象），例如 '{"41": "A-byte"}'
        #[arg(long, conflicts_with = "mapper_file", required_unless_present = "mapper_file")]
        mapper: Option<String>,

        /// 映射表文件（.toml 使用 [mapper] 表，其余按 JSON 解析）
        #[arg(long)]
        mapper_file: Option<PathBuf>,
    },
    /// 交互式逐项输入参数
    Interactive,
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    let opts = match options_from_args(cli.command)? {
        Some(opts) => opts,
        None => {
            error!("too many failed attempts, exiting");
            std::process::exit(2);
        }
    };
    info!(path = ?opts.path, mode = %opts.mode.kind(), "request validated");

    let report = if cli.no_progress {
        scan_file(&opts, &mut NoProgress)
    } else {
        let mut bar = BarObserver::new();
        let res = scan_file(&opts, &mut bar);
        bar.0.finish_and_clear();
        res
    }
    .context("scan failed")?;
    info!(mode = %report.kind(), results = report.len(), "scan complete");

    match &cli.output {
        Some(path) => {
            // 以缓冲方式打开输出文件
            let mut out = BufWriter::new(File::create(path).context("create output file")?);
            write_report(&report, &mut out).context("write report")?;
            out.flush().context("flush output file")?;
            info!(?path, results = report.len(), "report written");
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_report(&report, &mut out).context("write report")?;
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写到 stderr，避免与 stdout 上的 JSON 结果混在一起
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).with_writer(io::stderr).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 解析阈值参数（沿用核心库的校验规则）
fn parse_threshold(s: &str) -> Result<u64, String> {
    validate_threshold(s).map_err(|e| e.to_string())
}

/// 校验命令行参数并组装扫描请求；交互模式下尝试次数耗尽时返回 None
fn options_from_args(command: Commands) -> Result<Option<ScanOptions>> {
    let (path, mode) = match command {
        Commands::Interactive => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            // 提示写到 stderr，stdout 只留给报告
            let mut prompt = io::stderr();
            return interactive::collect_options(&mut input, &mut prompt);
        }
        Commands::Basic { file, threshold, count_occurrences } => {
            let counting = if count_occurrences { RunCounting::Occurrences } else { RunCounting::Transitions };
            (file, ScanMode::Basic { threshold, counting })
        }
        Commands::Regex { file, pattern } => {
            validate_regex_pattern(&pattern)?;
            (file, ScanMode::Regex { pattern })
        }
        Commands::Custom { file, mapper, mapper_file } => {
            let mapper = match (mapper, mapper_file) {
                (Some(raw), _) => validate_mapper_str(&raw)?,
                (None, Some(p)) => {
                    let m = load_mapper(&p).context("load mapper file")?;
                    validate_mapper(&m)?;
                    m
                }
                (None, None) => anyhow::bail!("either --mapper or --mapper-file is required"),
            };
            (file, ScanMode::Custom { mapper })
        }
    };
    validate_file_path(&path)?;
    Ok(Some(ScanOptions { path, mode }))
}

/// 进度条观察者（indicatif，绘制到 stderr）
struct BarObserver(ProgressBar);

impl BarObserver {
    fn new() -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar().template("[{bar:50}] {percent}% {bytes}/{total_bytes}") {
            bar.set_style(style.progress_chars("=> "));
        }
        Self(bar)
    }
}

impl ProgressObserver for BarObserver {
    fn on_progress(&mut self, done: u64, total: u64) {
        self.0.set_length(total);
        self.0.set_position(done);
    }
}
