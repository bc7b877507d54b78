// ==========================================
// 入库批次汇总引擎 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 解析错误 =====
    #[error("批次 JSON 解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    // ===== loader 前置条件违反 =====
    // 未删除条目必须已解析出库存与商品数据
    #[error("条目缺少库存数据 (序号 {index}, 条目 {item_id})")]
    MissingInventory { index: usize, item_id: String },

    #[error("条目缺少商品数据 (序号 {index}, 条目 {item_id})")]
    MissingProduct { index: usize, item_id: String },
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
