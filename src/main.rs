// ==========================================
// 入库批次汇总引擎 - 命令行入口
// ==========================================
// 用法:
//   batch-summary <batch.json> [filter.json] [config_db]
//
// 汇总 JSON 输出到 stdout, 日志输出到 stderr
// 环境变量 BATCH_SUMMARY_LOG_FORMAT=json 切换 JSON 日志
// ==========================================

use anyhow::{bail, Context, Result};
use batch_summary::db::default_db_path;
use batch_summary::{logging, ConfigManager, GlobalSettings, SummaryApi};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    match std::env::var("BATCH_SUMMARY_LOG_FORMAT").as_deref() {
        Ok("json") => logging::init_json(),
        _ => logging::init(),
    }

    let mut args = std::env::args().skip(1);
    let batch_path = match args.next() {
        Some(path) => PathBuf::from(path),
        None => bail!("用法: batch-summary <batch.json> [filter.json] [config_db]"),
    };
    let filter_path = args
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != "-")
        .map(PathBuf::from);
    let db_path = args.next().map(PathBuf::from).unwrap_or_else(default_db_path);

    tracing::info!("{} v{}", batch_summary::APP_NAME, batch_summary::VERSION);

    let settings = load_settings(&db_path)?;
    let api = SummaryApi::new(settings);

    let batch_json = std::fs::read_to_string(&batch_path)
        .with_context(|| format!("读取批次文件失败: {}", batch_path.display()))?;
    let filter_json = match &filter_path {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("读取过滤配置失败: {}", path.display()))?,
        ),
        None => None,
    };

    let summary = api
        .summarize_json(&batch_json, filter_json.as_deref())
        .context("批次汇总失败")?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// 加载全局设置; 配置库不存在时使用默认值
fn load_settings(db_path: &Path) -> Result<GlobalSettings> {
    if !db_path.exists() {
        tracing::info!("配置库不存在, 使用默认设置: {}", db_path.display());
        return Ok(GlobalSettings::default());
    }

    let db_path_str = db_path
        .to_str()
        .with_context(|| format!("配置库路径不是合法 UTF-8: {}", db_path.display()))?;

    tracing::info!("使用配置库: {}", db_path_str);
    let config = ConfigManager::new(db_path_str).context("打开配置库失败")?;
    config.ensure_schema().context("初始化配置表失败")?;
    Ok(config.get_global_settings()?)
}
