// ==========================================
// 入库批次汇总引擎 - 全局设置
// ==========================================
// 职责: 显式传入引擎的全局设置 (单位制 / 装箱开关 / 换算表)
// 红线: 引擎不读取任何环境或全局状态
// ==========================================

use crate::domain::types::UnitSystem;
use serde::{Deserialize, Serialize};

/// 英寸 -> 厘米
pub const CM: f64 = 2.54;

/// 磅 -> 千克
pub const KG: f64 = 0.453_592_37;

// ==========================================
// UnitTable - 单位换算表
// ==========================================
// 目录原生单位为英制; 公制显示时乘以下列系数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitTable {
    pub length_multiplier: f64,
    pub mass_multiplier: f64,
}

impl Default for UnitTable {
    fn default() -> Self {
        Self {
            length_multiplier: CM,
            mass_multiplier: KG,
        }
    }
}

impl UnitTable {
    /// 返回 (长度系数, 质量系数)
    pub fn multipliers(&self, unit_system: UnitSystem) -> (f64, f64) {
        match unit_system {
            UnitSystem::Si => (self.length_multiplier, self.mass_multiplier),
            UnitSystem::Us => (1.0, 1.0),
        }
    }
}

/// 整箱判定使用的开关
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasePackFlags {
    pub fudge_case_packed: bool,
    pub multipack_calculate_shipment_quantity: bool,
}

// ==========================================
// GlobalSettings - 全局设置
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    pub metric: bool,
    pub fudge_case_packed: bool,
    pub multipack_calculate_shipment_quantity: bool,
    #[serde(default)]
    pub units: UnitTable,
}

impl GlobalSettings {
    pub fn unit_system(&self) -> UnitSystem {
        UnitSystem::from_metric(self.metric)
    }

    pub fn case_pack_flags(&self) -> CasePackFlags {
        CasePackFlags {
            fudge_case_packed: self.fudge_case_packed,
            multipack_calculate_shipment_quantity: self.multipack_calculate_shipment_quantity,
        }
    }

    /// 当前单位制下的 (长度系数, 质量系数)
    pub fn multipliers(&self) -> (f64, f64) {
        self.units.multipliers(self.unit_system())
    }
}
