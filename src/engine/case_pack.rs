// ==========================================
// 入库批次汇总引擎 - 整箱判定接口
// ==========================================
// 职责: 货件计划过滤时需要的外部整箱判定
// 红线: 判定必须是纯函数, 引擎只调用不定义其规则
// ==========================================

use crate::domain::batch::BatchItem;
use crate::domain::settings::CasePackFlags;

// ==========================================
// Trait: CasePackedPredicate
// ==========================================
pub trait CasePackedPredicate {
    /// 判断条目是否按整箱 (箱数 × 每箱数量) 入库
    fn is_case_packed(&self, item: &BatchItem, flags: CasePackFlags) -> bool;
}

impl<F> CasePackedPredicate for F
where
    F: Fn(&BatchItem, CasePackFlags) -> bool,
{
    fn is_case_packed(&self, item: &BatchItem, flags: CasePackFlags) -> bool {
        self(item, flags)
    }
}

// ==========================================
// StoredCasePacked - 读取 loader 预计算结果
// ==========================================
// 缺省视为非整箱
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredCasePacked;

impl CasePackedPredicate for StoredCasePacked {
    fn is_case_packed(&self, item: &BatchItem, _flags: CasePackFlags) -> bool {
        item.case_packed.unwrap_or(false)
    }
}
