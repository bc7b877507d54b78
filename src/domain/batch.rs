// ==========================================
// 入库批次汇总引擎 - 批次领域模型
// ==========================================
// 职责: 归一化之后的严格批次实体
// 红线: 所有数值字段非空 (缺省值在 importer 边界处理一次)
// ==========================================

use crate::domain::types::FeedState;
use serde::{Deserialize, Serialize};

// ==========================================
// BatchSnapshot - 批次快照
// ==========================================
// 用途: 引擎的唯一数据输入 (只读)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSnapshot {
    pub loaded: bool,              // 条目是否已加载完成
    pub items: Vec<BatchItem>,     // 批次条目 (保持输入顺序)
    pub preset: PresetTotals,      // 未加载时携带的部分汇总
}

impl BatchSnapshot {
    /// 已加载的快照
    pub fn loaded(items: Vec<BatchItem>) -> Self {
        Self {
            loaded: true,
            items,
            preset: PresetTotals::default(),
        }
    }

    /// 未加载的快照 (仅携带部分汇总)
    pub fn pending(preset: PresetTotals) -> Self {
        Self {
            loaded: false,
            items: Vec::new(),
            preset,
        }
    }
}

// ==========================================
// PresetTotals - 预置汇总
// ==========================================
// 批次列表接口返回的汇总字段, 在条目加载前直接透传
// 注意: total_rank 不参与透传
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetTotals {
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
// BatchItem - 批次条目 (一个 SKU 行)
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchItem {
    // ===== 标识 =====
    pub id: Option<String>,        // 条目ID (仅用于日志)
    pub deleted: bool,             // 软删除标志

    // ===== 数量 =====
    pub quantity: u32,             // 已收数量
    pub ordered: u32,              // 目标数量
    pub damaged: u32,              // 破损数量

    // ===== 成本 / 商品 =====
    pub buylist: Vec<BuylistLot>,  // 采购批次成本
    pub inventory: Inventory,      // 库存/定价数据

    // ===== 货件 =====
    pub shipments: Vec<serde_json::Value>, // 已关联货件
    pub plans: PlanSet,            // 货件计划候选

    // ===== 上游数据源状态 =====
    pub product_feed: FeedState,
    pub inventory_feed: FeedState,
    pub dimensions_feed: FeedState,
    pub errors: Vec<String>,       // 条目级错误

    // ===== 装箱 =====
    pub case_packed: Option<bool>, // loader 预先计算的整箱标志
}

impl BatchItem {
    /// 采购成本合计: Σ cost × quantity
    pub fn buylist_cost(&self) -> f64 {
        self.buylist
            .iter()
            .map(|lot| lot.cost * f64::from(lot.quantity))
            .sum()
    }

    /// 是否有任何货件计划
    pub fn has_plans(&self) -> bool {
        !self.plans.plans.is_empty()
    }

    /// 是否已关联货件
    pub fn in_shipment(&self) -> bool {
        !self.shipments.is_empty()
    }
}

/// 采购批次 (成本 × 数量)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuylistLot {
    pub cost: f64,
    pub quantity: u32,
}

/// 库存记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub payout: f64,               // 单条目预计回款
    pub product: Product,
}

/// 商品记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub rank: f64,                 // 销售排名
    pub dimensions: Dimensions,    // misc.dim
}

// ==========================================
// Dimensions - 原始尺寸
// ==========================================
// 存储为百分位整数 (raw / 100 = 目录原生单位)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
}

/// 货件计划集合
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanSet {
    pub plans: Vec<ShipmentPlan>,
    pub errors: Vec<String>,
}

/// 货件计划候选
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentPlan {
    pub id: Option<String>,        // 货件ID
    pub fcid: Option<String>,      // 仓库 (fulfillment center)
    pub prep: Option<String>,      // 预处理要求
}
