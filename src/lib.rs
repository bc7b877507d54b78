// ==========================================
// 入库批次汇总引擎 - 核心库
// ==========================================
// 职责: 批次条目过滤 + 汇总统计 (数量/成本/回款/排名/体积/重量)
// 系统定位: 纯计算核心, 由展示层消费汇总结果
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - loader 原始记录归一化
pub mod importer;

// 引擎层 - 过滤与汇总
pub mod engine;

// 配置层 - 全局设置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 对外接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    BatchItem, BatchSnapshot, BatchSummary, CasePackFlags, FeedState, FilterConfiguration,
    GlobalSettings, SelectionDescriptor, UnitSystem, UnitTable,
};

// 引擎
pub use engine::{BatchSummaryEngine, CasePackedPredicate, ExclusionReason, StoredCasePacked};

// 导入
pub use importer::{BatchNormalizer, ImportError};

// 配置
pub use config::ConfigManager;

// API
pub use api::{ApiError, SummaryApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "入库批次汇总引擎";
