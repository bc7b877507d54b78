// ==========================================
// 入库批次汇总引擎 - 条目过滤规则
// ==========================================
// 职责: 错误过滤 / 货件计划过滤 / 结构过滤 的纯函数实现
// 红线: 每个排除都必须给出 reason
// ==========================================

use crate::domain::batch::BatchItem;
use crate::domain::filter::{FilterConfiguration, SelectionDescriptor};
use crate::domain::settings::CasePackFlags;
use crate::engine::case_pack::CasePackedPredicate;
use std::fmt;

// ==========================================
// ExclusionReason - 排除原因
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExclusionReason {
    NoErrors,          // 错误过滤开启, 条目无任何错误
    NoMatchingPlan,    // 货件过滤开启, 无匹配计划
    Deleted,           // 已软删除
    FullyReceived,     // 已收齐
    InShipment,        // 已关联货件
    MissingDimensions, // 缺少尺寸数据源
}

impl ExclusionReason {
    /// 稳定的原因代码 (日志/前端使用)
    pub fn code(self) -> &'static str {
        match self {
            ExclusionReason::NoErrors => "NO_ERRORS",
            ExclusionReason::NoMatchingPlan => "NO_MATCHING_PLAN",
            ExclusionReason::Deleted => "DELETED",
            ExclusionReason::FullyReceived => "FULLY_RECEIVED",
            ExclusionReason::InShipment => "IN_SHIPMENT",
            ExclusionReason::MissingDimensions => "MISSING_DIMENSIONS",
        }
    }
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            ExclusionReason::NoErrors => "条目无 feed 错误或计划错误",
            ExclusionReason::NoMatchingPlan => "无与所选货件匹配的计划",
            ExclusionReason::Deleted => "条目已删除",
            ExclusionReason::FullyReceived => "已收数量 + 破损数量 >= 目标数量",
            ExclusionReason::InShipment => "条目已关联货件",
            ExclusionReason::MissingDimensions => "缺少尺寸数据源",
        };
        write!(f, "{}: {}", self.code(), reason)
    }
}

// ==========================================
// 错误过滤
// ==========================================

/// 条目是否存在任何错误
///
/// 任一 feed 为 "error", 或条目错误 / 计划错误非空
pub fn has_errors(item: &BatchItem) -> bool {
    item.product_feed.is_error()
        || item.inventory_feed.is_error()
        || item.dimensions_feed.is_error()
        || !item.errors.is_empty()
        || !item.plans.errors.is_empty()
}

// ==========================================
// 货件计划过滤
// ==========================================

/// 展平所有货件的选择描述 (任一列表, 任一描述)
pub fn flatten_selection(filter: &FilterConfiguration) -> Vec<&SelectionDescriptor> {
    filter.batch_items_filter.values().flatten().collect()
}

/// 条目是否有计划与任一描述在四个字段上完全匹配
///
/// 整箱判定只在前三个字段匹配时计算, 且每个条目最多计算一次
pub fn matches_selection<P>(
    item: &BatchItem,
    descriptors: &[&SelectionDescriptor],
    flags: CasePackFlags,
    case_packed: &P,
) -> bool
where
    P: CasePackedPredicate + ?Sized,
{
    let mut cp: Option<bool> = None;

    item.plans.plans.iter().any(|plan| {
        descriptors.iter().any(|descriptor| {
            descriptor.fcid == plan.fcid
                && descriptor.prep == plan.prep
                && descriptor.shipment_id == plan.id
                && descriptor.cp
                    == *cp.get_or_insert_with(|| case_packed.is_case_packed(item, flags))
        })
    })
}

// ==========================================
// 结构过滤
// ==========================================

/// 已收齐: quantity + damaged >= ordered
pub fn is_fully_received(item: &BatchItem) -> bool {
    u64::from(item.quantity) + u64::from(item.damaged) >= u64::from(item.ordered)
}

/// 结构过滤, 返回第一个命中的排除原因
pub fn structural_rejection(
    item: &BatchItem,
    filter: &FilterConfiguration,
) -> Option<ExclusionReason> {
    if item.deleted {
        return Some(ExclusionReason::Deleted);
    }
    if filter.filter_items_to_receive && is_fully_received(item) {
        return Some(ExclusionReason::FullyReceived);
    }
    if filter.exclude_items_in_shipments && item.in_shipment() {
        return Some(ExclusionReason::InShipment);
    }
    if filter.filter_items_missing_dimensions && !item.dimensions_feed.is_present() {
        return Some(ExclusionReason::MissingDimensions);
    }
    None
}
