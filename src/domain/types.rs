// ==========================================
// 入库批次汇总引擎 - 领域类型定义
// ==========================================
// 职责: 单位制、数据源 (feed) 状态等枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 单位制 (Unit System)
// ==========================================
// US: 英制 (英寸/磅) - 产品目录原生存储单位
// SI: 公制 (厘米/千克) - 需乘换算系数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Us,
    Si,
}

impl UnitSystem {
    /// 由 metric 开关得到单位制
    pub fn from_metric(metric: bool) -> Self {
        if metric {
            UnitSystem::Si
        } else {
            UnitSystem::Us
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Us => write!(f, "us"),
            UnitSystem::Si => write!(f, "si"),
        }
    }
}

// ==========================================
// 数据源状态 (Feed State)
// ==========================================
// 上游 product / inventory / dimensions feed 的归一化结果
// - Missing: 未提供或为假值 (null / false / "" / 0)
// - Error:   字面量 "error"
// - Present: 其他任意值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedState {
    #[default]
    Missing,
    Error,
    Present,
}

impl FeedState {
    pub fn is_error(self) -> bool {
        self == FeedState::Error
    }

    /// 是否为"真值" (Error 与 Present 都算提供了值)
    pub fn is_present(self) -> bool {
        self != FeedState::Missing
    }
}

impl fmt::Display for FeedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedState::Missing => write!(f, "MISSING"),
            FeedState::Error => write!(f, "ERROR"),
            FeedState::Present => write!(f, "PRESENT"),
        }
    }
}
