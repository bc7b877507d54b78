// ==========================================
// 入库批次汇总引擎 - 配置层
// ==========================================
// 职责: 全局设置加载 (单位制 / 整箱开关 / 换算表)
// 存储: config_kv 表 (scope_id='global')
// ==========================================

pub mod config_manager;
pub mod error;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
