// ==========================================
// 入库批次汇总引擎 - loader 原始记录
// ==========================================
// 用途: 与 loader JSON 一一对应的中间结构 (所有字段可缺省)
// 生命周期: 仅在导入流程内, 归一化后丢弃
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ==========================================
// RawBatch - 原始批次
// ==========================================
// 未加载时仅携带批次列表接口返回的部分汇总
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawBatch {
    pub loaded: Option<bool>,
    pub items: Option<Vec<RawBatchItem>>,

    // 预置汇总
    pub total_count: Option<u64>,
    pub total_quantity: Option<u64>,
    pub total_ordered: Option<u64>,
    pub total_cost: Option<f64>,
    pub total_payout: Option<f64>,
    pub total_volume: Option<f64>,
    pub total_weight: Option<f64>,
    pub avg_rank: Option<f64>,
}

// ==========================================
// RawBatchItem - 原始批次条目
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawBatchItem {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub deleted: Option<bool>,

    pub quantity: Option<u32>,
    pub ordered: Option<u32>,
    pub damaged: Option<u32>,

    pub buylist: Option<Vec<RawBuylistLot>>,
    pub inventory: Option<RawInventory>,

    pub shipments: Option<Vec<Value>>,
    pub plans: Option<RawPlanSet>,

    // feed 可能为 "error" / 任意值 / 缺省
    pub product_feed: Option<Value>,
    pub inventory_feed: Option<Value>,
    pub dimensions_feed: Option<Value>,
    pub errors: Option<Vec<Value>>,

    pub case_packed: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawBuylistLot {
    pub cost: Option<f64>,
    pub quantity: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInventory {
    pub payout: Option<f64>,
    pub product: Option<RawProduct>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawProduct {
    pub rank: Option<f64>,
    pub misc: Option<RawMisc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMisc {
    pub dim: Option<RawDimensions>,
}

/// 百分位整数存储的尺寸
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDimensions {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPlanSet {
    pub plans: Option<Vec<RawPlan>>,
    pub errors: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPlan {
    pub id: Option<String>,
    pub fcid: Option<String>,
    pub prep: Option<String>,
}
