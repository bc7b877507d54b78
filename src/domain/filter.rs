// ==========================================
// 入库批次汇总引擎 - 过滤配置
// ==========================================
// 职责: 用户可选的纳入/排除过滤条件
// 序列化格式: camelCase (与前端状态一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// FilterConfiguration - 过滤配置
// ==========================================
// 所有开关默认关闭 (关闭 = 不生效)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterConfiguration {
    /// 仅保留存在 feed 错误或条目/计划错误的条目
    pub filter_items_with_errors: bool,
    /// 剔除已收齐的条目 (quantity + damaged >= ordered)
    pub filter_items_to_receive: bool,
    /// 剔除已关联货件的条目
    pub exclude_items_in_shipments: bool,
    /// 剔除缺少尺寸数据源的条目
    pub filter_items_missing_dimensions: bool,
    /// 货件ID -> 选择描述列表
    pub batch_items_filter: BTreeMap<String, Vec<SelectionDescriptor>>,
}

impl FilterConfiguration {
    /// 货件计划过滤是否启用 (至少一个键)
    pub fn has_shipment_filter(&self) -> bool {
        !self.batch_items_filter.is_empty()
    }

    /// 添加一条货件选择
    pub fn select_shipment(mut self, descriptor: SelectionDescriptor) -> Self {
        let key = descriptor.shipment_id.clone().unwrap_or_default();
        self.batch_items_filter.entry(key).or_default().push(descriptor);
        self
    }
}

// ==========================================
// SelectionDescriptor - 货件选择描述
// ==========================================
// 四个字段全部相等才算匹配: fcid / prep / shipmentId / cp
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionDescriptor {
    #[serde(default)]
    pub fcid: Option<String>,
    #[serde(default)]
    pub prep: Option<String>,
    #[serde(default)]
    pub shipment_id: Option<String>,
    #[serde(default)]
    pub cp: bool,                  // 是否整箱
}

impl SelectionDescriptor {
    pub fn new(fcid: &str, prep: &str, shipment_id: &str, cp: bool) -> Self {
        Self {
            fcid: Some(fcid.to_string()),
            prep: Some(prep.to_string()),
            shipment_id: Some(shipment_id.to_string()),
            cp,
        }
    }
}
