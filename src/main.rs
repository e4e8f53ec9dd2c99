// ==========================================
// 机加工产能看板系统 - CLI 主入口
// ==========================================
// 用法:
//   capacity-dashboard <工时文件.csv|.xlsx> [花名册.csv|.xlsx]
//                      [--month YYYY-MM] [--date YYYY-MM-DD]
//                      [--config 配置.json]
// 输出: 看板报表 JSON (呈现层自行渲染图表)
// ==========================================

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use capacity_dashboard::config::DashboardConfig;
use capacity_dashboard::repository::{
    FileRecordSource, FileRosterSource, InMemoryRosterSource, RecordSource, RosterSource,
};
use capacity_dashboard::{logging, DashboardApi, ReportQuery, YearMonth, APP_NAME, VERSION};

/// 解析后的命令行参数
struct CliArgs {
    records_path: String,
    roster_path: Option<String>,
    config_path: Option<String>,
    query: ReportQuery,
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut positional = Vec::new();
    let mut query = ReportQuery::default();
    let mut config_path = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--month" => {
                let value = iter.next().context("--month 缺少参数")?;
                let month: YearMonth = value.parse().map_err(|e| anyhow::anyhow!("{}", e))?;
                query.month = Some(month);
            }
            "--date" => {
                let value = iter.next().context("--date 缺少参数")?;
                let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .with_context(|| format!("日期格式错误: {}（期望 YYYY-MM-DD）", value))?;
                query.date = Some(date);
            }
            "--config" => {
                config_path = Some(iter.next().context("--config 缺少参数")?.clone());
            }
            other if other.starts_with("--") => bail!("未知参数: {}", other),
            other => positional.push(other.to_string()),
        }
    }

    if positional.is_empty() || positional.len() > 2 {
        bail!(
            "用法: capacity-dashboard <工时文件> [花名册] [--month YYYY-MM] [--date YYYY-MM-DD] [--config 配置.json]"
        );
    }

    let mut positional = positional.into_iter();
    Ok(CliArgs {
        records_path: positional.next().unwrap_or_default(),
        roster_path: positional.next(),
        config_path,
        query,
    })
}

fn run(args: CliArgs) -> Result<()> {
    // 加载配置
    let config = match &args.config_path {
        Some(path) => DashboardConfig::load_from_file(std::path::Path::new(path))
            .map_err(|e| anyhow::anyhow!("配置加载失败: {}", e))?,
        None => DashboardConfig::load_or_default(),
    };

    // 构建数据源
    let record_source: Arc<dyn RecordSource> = Arc::new(FileRecordSource::new(&args.records_path));
    let roster_source: Arc<dyn RosterSource> = match &args.roster_path {
        Some(path) => Arc::new(FileRosterSource::new(path)),
        None => Arc::new(InMemoryRosterSource::empty()),
    };

    let api = DashboardApi::new(record_source, roster_source, config);

    // 组装报表并输出 JSON
    let report = api.compose_report(&args.query)?;
    let json = serde_json::to_string_pretty(report.as_ref())?;
    println!("{}", json);

    Ok(())
}

fn main() -> ExitCode {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 决策支持系统", APP_NAME);
    tracing::info!("系统版本: {}", VERSION);
    tracing::info!("==================================================");

    let raw_args: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&raw_args) {
        Ok(args) => args,
        Err(e) => {
            tracing::error!("参数错误: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("运行失败: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
