// ==========================================
// 入库批次汇总引擎 - 汇总 API
// ==========================================
// 职责: 组装 全局设置 + 批次归一化 + 汇总引擎
// 架构: API 层 → Importer (BatchNormalizer) → Engine (BatchSummaryEngine)
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::batch::BatchSnapshot;
use crate::domain::filter::FilterConfiguration;
use crate::domain::settings::GlobalSettings;
use crate::domain::summary::BatchSummary;
use crate::engine::{BatchSummaryEngine, CasePackedPredicate, StoredCasePacked};
use crate::importer::BatchNormalizer;
use serde::Serialize;
use tracing::info;

/// 被排除条目及原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemExclusion {
    pub index: usize,
    pub item_id: Option<String>,
    pub reason_code: String,
    pub reason: String,
}

// ==========================================
// SummaryApi - 汇总 API
// ==========================================
pub struct SummaryApi {
    settings: GlobalSettings,
    engine: BatchSummaryEngine,
}

impl SummaryApi {
    /// 使用显式设置创建
    pub fn new(settings: GlobalSettings) -> Self {
        Self {
            settings,
            engine: BatchSummaryEngine::new(),
        }
    }

    /// 从配置库加载全局设置后创建
    pub fn from_config(config: &ConfigManager) -> ApiResult<Self> {
        Ok(Self::new(config.get_global_settings()?))
    }

    pub fn settings(&self) -> &GlobalSettings {
        &self.settings
    }

    // ==========================================
    // 汇总
    // ==========================================

    /// 汇总批次 (整箱判定读取 loader 预计算值)
    pub fn summarize(&self, batch: &BatchSnapshot, filter: &FilterConfiguration) -> BatchSummary {
        self.summarize_with(batch, filter, &StoredCasePacked)
    }

    /// 汇总批次 (使用调用方提供的整箱判定)
    pub fn summarize_with<P>(
        &self,
        batch: &BatchSnapshot,
        filter: &FilterConfiguration,
        case_packed: &P,
    ) -> BatchSummary
    where
        P: CasePackedPredicate + ?Sized,
    {
        self.engine.summarize(batch, filter, &self.settings, case_packed)
    }

    /// 从 JSON 汇总
    ///
    /// # 参数
    /// - `batch_json`: loader 输出的批次 JSON
    /// - `filter_json`: 过滤配置 JSON (None 表示不过滤)
    pub fn summarize_json(
        &self,
        batch_json: &str,
        filter_json: Option<&str>,
    ) -> ApiResult<BatchSummary> {
        let batch = BatchNormalizer::from_json(batch_json)?;
        let filter = parse_filter(filter_json)?;

        let summary = self.summarize(&batch, &filter);
        info!(
            total_count = summary.total_count,
            items_count = batch.items.len(),
            "批次汇总完成"
        );
        Ok(summary)
    }

    /// 列出被排除的条目及原因 (未加载批次返回空列表)
    pub fn list_exclusions(
        &self,
        batch: &BatchSnapshot,
        filter: &FilterConfiguration,
    ) -> Vec<ItemExclusion> {
        if !batch.loaded {
            return Vec::new();
        }

        batch
            .items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                self.engine
                    .classify(item, filter, &self.settings, &StoredCasePacked)
                    .err()
                    .map(|reason| ItemExclusion {
                        index,
                        item_id: item.id.clone(),
                        reason_code: reason.code().to_string(),
                        reason: reason.to_string(),
                    })
            })
            .collect()
    }
}

fn parse_filter(filter_json: Option<&str>) -> ApiResult<FilterConfiguration> {
    match filter_json {
        Some(json) if !json.trim().is_empty() => serde_json::from_str(json)
            .map_err(|e| ApiError::InvalidInput(format!("过滤配置解析失败: {}", e))),
        _ => Ok(FilterConfiguration::default()),
    }
}
