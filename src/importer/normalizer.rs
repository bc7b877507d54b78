// ==========================================
// 入库批次汇总引擎 - 批次归一化
// ==========================================
// 职责: RawBatch -> BatchSnapshot
// - 缺省数值 -> 0, 缺省列表 -> 空
// - feed 值按真值语义归一为 FeedState
// - 校验 loader 前置条件 (未删除条目必须带库存/商品)
// ==========================================

use crate::domain::batch::{
    BatchItem, BatchSnapshot, BuylistLot, Dimensions, Inventory, PlanSet, PresetTotals, Product,
    ShipmentPlan,
};
use crate::domain::types::FeedState;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::raw::{RawBatch, RawBatchItem, RawDimensions, RawInventory};
use serde_json::Value;
use tracing::{debug, error, instrument};

// ==========================================
// BatchNormalizer - 批次归一化器
// ==========================================
pub struct BatchNormalizer;

impl BatchNormalizer {
    /// 解析 loader JSON 并归一化
    pub fn from_json(json: &str) -> ImportResult<BatchSnapshot> {
        let raw: RawBatch = serde_json::from_str(json)?;
        Self::normalize(raw)
    }

    /// 归一化原始批次
    ///
    /// 未加载批次只保留预置汇总, 条目不做前置条件校验
    #[instrument(skip_all, fields(
        loaded = raw.loaded.unwrap_or(false),
        items_count = raw.items.as_ref().map_or(0, Vec::len)
    ))]
    pub fn normalize(raw: RawBatch) -> ImportResult<BatchSnapshot> {
        let loaded = raw.loaded.unwrap_or(false);

        let preset = PresetTotals {
            total_count: raw.total_count,
            total_quantity: raw.total_quantity,
            total_ordered: raw.total_ordered,
            total_cost: raw.total_cost,
            total_payout: raw.total_payout,
            total_volume: raw.total_volume,
            total_weight: raw.total_weight,
            avg_rank: raw.avg_rank,
        };

        let items = raw
            .items
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, item)| Self::normalize_item(index, item, loaded))
            .collect::<ImportResult<Vec<_>>>()?;

        debug!(items = items.len(), "批次归一化完成");

        Ok(BatchSnapshot {
            loaded,
            items,
            preset,
        })
    }

    /// 归一化单个条目
    ///
    /// # 参数
    /// - `index`: 条目序号 (用于错误定位)
    /// - `raw`: 原始条目
    /// - `strict`: 是否校验库存/商品前置条件
    fn normalize_item(index: usize, raw: RawBatchItem, strict: bool) -> ImportResult<BatchItem> {
        let deleted = raw.deleted.unwrap_or(false);
        let item_id = raw.id.clone().unwrap_or_else(|| "-".to_string());

        // 已删除条目永远不会进入累计, 允许缺少库存数据
        let inventory = match raw.inventory {
            Some(inventory) => Self::normalize_inventory(index, &item_id, inventory, strict && !deleted)?,
            None if strict && !deleted => {
                error!(index, item_id = %item_id, "loader 前置条件违反: 条目缺少库存数据");
                return Err(ImportError::MissingInventory { index, item_id });
            }
            None => Inventory::default(),
        };

        let buylist = raw
            .buylist
            .unwrap_or_default()
            .into_iter()
            .map(|lot| BuylistLot {
                cost: lot.cost.unwrap_or(0.0),
                quantity: lot.quantity.unwrap_or(0),
            })
            .collect();

        let plans = raw
            .plans
            .map(|set| PlanSet {
                plans: set
                    .plans
                    .unwrap_or_default()
                    .into_iter()
                    .map(|plan| ShipmentPlan {
                        id: plan.id,
                        fcid: plan.fcid,
                        prep: plan.prep,
                    })
                    .collect(),
                errors: Self::error_messages(set.errors),
            })
            .unwrap_or_default();

        Ok(BatchItem {
            id: raw.id,
            deleted,
            quantity: raw.quantity.unwrap_or(0),
            ordered: raw.ordered.unwrap_or(0),
            damaged: raw.damaged.unwrap_or(0),
            buylist,
            inventory,
            shipments: raw.shipments.unwrap_or_default(),
            plans,
            product_feed: feed_state(raw.product_feed.as_ref()),
            inventory_feed: feed_state(raw.inventory_feed.as_ref()),
            dimensions_feed: feed_state(raw.dimensions_feed.as_ref()),
            errors: Self::error_messages(raw.errors),
            case_packed: raw.case_packed,
        })
    }

    fn normalize_inventory(
        index: usize,
        item_id: &str,
        raw: RawInventory,
        strict: bool,
    ) -> ImportResult<Inventory> {
        let product = match raw.product {
            Some(product) => Product {
                rank: product.rank.unwrap_or(0.0),
                dimensions: product
                    .misc
                    .and_then(|misc| misc.dim)
                    .map(normalize_dimensions)
                    .unwrap_or_default(),
            },
            None if strict => {
                error!(index, item_id = %item_id, "loader 前置条件违反: 条目缺少商品数据");
                return Err(ImportError::MissingProduct {
                    index,
                    item_id: item_id.to_string(),
                });
            }
            None => Product::default(),
        };

        Ok(Inventory {
            payout: raw.payout.unwrap_or(0.0),
            product,
        })
    }

    /// 错误列表转文本 (非字符串值保留其 JSON 表示)
    fn error_messages(errors: Option<Vec<Value>>) -> Vec<String> {
        errors
            .unwrap_or_default()
            .into_iter()
            .map(|value| match value {
                Value::String(message) => message,
                other => other.to_string(),
            })
            .collect()
    }
}

fn normalize_dimensions(raw: RawDimensions) -> Dimensions {
    Dimensions {
        length: raw.length.unwrap_or(0.0),
        width: raw.width.unwrap_or(0.0),
        height: raw.height.unwrap_or(0.0),
        weight: raw.weight.unwrap_or(0.0),
    }
}

/// feed 值归一化
///
/// 假值 (缺省 / null / false / "" / 0) -> Missing, "error" -> Error, 其余 -> Present
pub fn feed_state(value: Option<&Value>) -> FeedState {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => FeedState::Missing,
        Some(Value::String(s)) if s.is_empty() => FeedState::Missing,
        Some(Value::String(s)) if s == "error" => FeedState::Error,
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => FeedState::Missing,
        Some(_) => FeedState::Present,
    }
}
