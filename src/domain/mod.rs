// ==========================================
// 入库批次汇总引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、值对象、枚举
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod batch;
pub mod filter;
pub mod settings;
pub mod summary;
pub mod types;

// 重导出核心类型
pub use batch::{
    BatchItem, BatchSnapshot, BuylistLot, Dimensions, Inventory, PlanSet, PresetTotals, Product,
    ShipmentPlan,
};
pub use filter::{FilterConfiguration, SelectionDescriptor};
pub use settings::{CasePackFlags, GlobalSettings, UnitTable, CM, KG};
pub use summary::BatchSummary;
pub use types::{FeedState, UnitSystem};
