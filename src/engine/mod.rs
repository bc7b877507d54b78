// ==========================================
// 入库批次汇总引擎 - 引擎层
// ==========================================
// 职责: 过滤 + 累计 + 归一化的纯函数引擎
// 红线: 引擎不做 I/O, 不修改输入, 所有排除必须输出 reason
// ==========================================

pub mod batch_summary;
pub mod case_pack;
pub mod item_filter;

// 重导出核心引擎
pub use batch_summary::BatchSummaryEngine;
pub use case_pack::{CasePackedPredicate, StoredCasePacked};
pub use item_filter::ExclusionReason;
