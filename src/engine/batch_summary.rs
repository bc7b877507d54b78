// ==========================================
// 入库批次汇总引擎 - 批次汇总
// ==========================================
// 职责: 单次遍历批次条目, 过滤后累计汇总, 最后归一化
// 输入: 批次快照 + 过滤配置 + 全局设置 + 整箱判定
// 输出: BatchSummary
// ==========================================
// 过滤顺序 (首个拒绝即排除):
// 1) 错误过滤  2) 货件计划过滤  3) 结构过滤
// ==========================================

use crate::domain::batch::{BatchItem, BatchSnapshot};
use crate::domain::filter::{FilterConfiguration, SelectionDescriptor};
use crate::domain::settings::GlobalSettings;
use crate::domain::summary::BatchSummary;
use crate::engine::case_pack::CasePackedPredicate;
use crate::engine::item_filter::{
    flatten_selection, has_errors, matches_selection, structural_rejection, ExclusionReason,
};
use tracing::{debug, instrument, trace};

// ==========================================
// BatchSummaryEngine - 批次汇总引擎
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数,不修改输入
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchSummaryEngine;

impl BatchSummaryEngine {
    /// 创建新的批次汇总引擎
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 汇总批次
    ///
    /// # 参数
    /// - `batch`: 批次快照 (未加载时直接透传预置汇总)
    /// - `filter`: 过滤配置
    /// - `settings`: 全局设置 (单位制、整箱开关)
    /// - `case_packed`: 外部整箱判定, 仅货件计划过滤使用
    ///
    /// # 返回
    /// 批次汇总; total_payout 为扣除成本后的净回款
    #[instrument(skip_all, fields(
        loaded = batch.loaded,
        items_count = batch.items.len(),
        unit_system = %settings.unit_system()
    ))]
    pub fn summarize<P>(
        &self,
        batch: &BatchSnapshot,
        filter: &FilterConfiguration,
        settings: &GlobalSettings,
        case_packed: &P,
    ) -> BatchSummary
    where
        P: CasePackedPredicate + ?Sized,
    {
        if !batch.loaded {
            debug!("批次未加载, 透传预置汇总");
            return BatchSummary::from_preset(&batch.preset);
        }

        let descriptors = flatten_selection(filter);
        let (len_mult, mass_mult) = settings.multipliers();
        let mut summary = BatchSummary::default();

        for (index, item) in batch.items.iter().enumerate() {
            if let Err(reason) = self.classify_with(item, filter, &descriptors, settings, case_packed)
            {
                trace!(index, item_id = ?item.id, %reason, "条目被排除");
                continue;
            }

            Self::accumulate(&mut summary, item, len_mult, mass_mult);
        }

        Self::normalize(&mut summary);

        debug!(
            total_count = summary.total_count,
            total_quantity = summary.total_quantity,
            total_cost = summary.total_cost,
            total_payout = summary.total_payout,
            "批次汇总完成"
        );

        summary
    }

    /// 判定单个条目是否计入汇总
    ///
    /// # 返回
    /// - `Ok(())`: 计入
    /// - `Err(reason)`: 第一个拒绝该条目的过滤阶段
    pub fn classify<P>(
        &self,
        item: &BatchItem,
        filter: &FilterConfiguration,
        settings: &GlobalSettings,
        case_packed: &P,
    ) -> Result<(), ExclusionReason>
    where
        P: CasePackedPredicate + ?Sized,
    {
        let descriptors = flatten_selection(filter);
        self.classify_with(item, filter, &descriptors, settings, case_packed)
    }

    /// 计入汇总的条目 (保持输入顺序)
    ///
    /// 与 summarize 使用同一套过滤规则, 列表与汇总保持一致; 未加载批次返回空列表
    pub fn included_items<'a, P>(
        &self,
        batch: &'a BatchSnapshot,
        filter: &FilterConfiguration,
        settings: &GlobalSettings,
        case_packed: &P,
    ) -> Vec<&'a BatchItem>
    where
        P: CasePackedPredicate + ?Sized,
    {
        if !batch.loaded {
            return Vec::new();
        }

        let descriptors = flatten_selection(filter);
        batch
            .items
            .iter()
            .filter(|item| {
                self.classify_with(item, filter, &descriptors, settings, case_packed)
                    .is_ok()
            })
            .collect()
    }

    // ==========================================
    // 过滤
    // ==========================================

    fn classify_with<P>(
        &self,
        item: &BatchItem,
        filter: &FilterConfiguration,
        descriptors: &[&SelectionDescriptor],
        settings: &GlobalSettings,
        case_packed: &P,
    ) -> Result<(), ExclusionReason>
    where
        P: CasePackedPredicate + ?Sized,
    {
        // 1. 错误过滤
        if filter.filter_items_with_errors && !has_errors(item) {
            return Err(ExclusionReason::NoErrors);
        }

        // 2. 货件计划过滤 (有键即启用, 即使列表为空)
        if filter.has_shipment_filter()
            && !matches_selection(item, descriptors, settings.case_pack_flags(), case_packed)
        {
            return Err(ExclusionReason::NoMatchingPlan);
        }

        // 3. 结构过滤
        match structural_rejection(item, filter) {
            Some(reason) => Err(reason),
            None => Ok(()),
        }
    }

    // ==========================================
    // 累计与归一化
    // ==========================================

    fn accumulate(summary: &mut BatchSummary, item: &BatchItem, len_mult: f64, mass_mult: f64) {
        let quantity = f64::from(item.quantity);
        let product = &item.inventory.product;

        summary.total_count += 1;
        summary.total_quantity += u64::from(item.quantity);
        summary.total_ordered += u64::from(item.ordered);
        summary.total_cost += item.buylist_cost();
        summary.total_payout += item.inventory.payout;
        summary.total_rank += product.rank * quantity;

        // 原始尺寸为百分位整数
        let dim = product.dimensions;
        let length = dim.length / 100.0 * len_mult;
        let width = dim.width / 100.0 * len_mult;
        let height = dim.height / 100.0 * len_mult;
        let weight = dim.weight / 100.0 * mass_mult;

        // 体积只统计已有货件计划的条目
        if item.has_plans() {
            summary.total_volume += length * width * height * quantity;
        }
        summary.total_weight += weight * quantity;
    }

    fn normalize(summary: &mut BatchSummary) {
        if summary.total_quantity > 0 {
            summary.avg_rank = Some((summary.total_rank / summary.total_quantity as f64).floor());
        }
        summary.total_payout -= summary.total_cost;
    }
}
