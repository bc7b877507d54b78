// ==========================================
// 入库批次汇总引擎 - API 层
// ==========================================
// 职责: JSON 输入 -> 汇总输出, 组装配置/导入/引擎
// ==========================================

pub mod error;
pub mod summary_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use summary_api::{ItemExclusion, SummaryApi};
