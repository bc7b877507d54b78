// ==========================================
// 入库批次汇总引擎 - 汇总结果
// ==========================================
// 用途: 批次头部汇总展示 (SKU 数 / 成本 / 回款 / 排名 / 体积 / 重量)
// ==========================================

use crate::domain::batch::PresetTotals;
use serde::{Deserialize, Serialize};

// ==========================================
// BatchSummary - 批次汇总
// ==========================================
// avg_rank 为 None 表示 total_quantity = 0 (序列化为 null)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_count: u64,
    pub total_quantity: u64,
    pub total_ordered: u64,
    pub total_cost: f64,
    pub total_payout: f64,         // 净回款 = 回款 - 成本
    pub avg_rank: Option<f64>,
    pub total_rank: f64,
    pub total_volume: f64,
    pub total_weight: f64,
}

impl BatchSummary {
    /// 由预置汇总构造 (未加载批次透传)
    pub fn from_preset(preset: &PresetTotals) -> Self {
        Self {
            total_count: preset.total_count.unwrap_or(0),
            total_quantity: preset.total_quantity.unwrap_or(0),
            total_ordered: preset.total_ordered.unwrap_or(0),
            total_cost: preset.total_cost.unwrap_or(0.0),
            total_payout: preset.total_payout.unwrap_or(0.0),
            avg_rank: preset.avg_rank,
            total_rank: 0.0,
            total_volume: preset.total_volume.unwrap_or(0.0),
            total_weight: preset.total_weight.unwrap_or(0.0),
        }
    }
}
