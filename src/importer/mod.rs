// ==========================================
// 入库批次汇总引擎 - 导入层
// ==========================================
// 职责: loader 原始记录 -> 严格领域模型
// 红线: 缺省值只在此处处理一次, 引擎内不再做空值兜底
// ==========================================

pub mod error;
pub mod normalizer;
pub mod raw;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use normalizer::BatchNormalizer;
pub use raw::{RawBatch, RawBatchItem};
