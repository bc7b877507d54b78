// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use batch_summary::domain::batch::{
    BatchItem, BuylistLot, Dimensions, Inventory, PlanSet, Product, ShipmentPlan,
};
use batch_summary::domain::types::FeedState;

// ==========================================
// BatchItem 构建器
// ==========================================

pub struct BatchItemBuilder {
    item: BatchItem,
}

impl BatchItemBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            item: BatchItem {
                id: Some(id.to_string()),
                ..Default::default()
            },
        }
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.item.quantity = quantity;
        self
    }

    pub fn ordered(mut self, ordered: u32) -> Self {
        self.item.ordered = ordered;
        self
    }

    pub fn damaged(mut self, damaged: u32) -> Self {
        self.item.damaged = damaged;
        self
    }

    pub fn deleted(mut self) -> Self {
        self.item.deleted = true;
        self
    }

    pub fn buylist(mut self, cost: f64, quantity: u32) -> Self {
        self.item.buylist.push(BuylistLot { cost, quantity });
        self
    }

    pub fn payout(mut self, payout: f64) -> Self {
        self.item.inventory.payout = payout;
        self
    }

    pub fn rank(mut self, rank: f64) -> Self {
        self.item.inventory.product.rank = rank;
        self
    }

    /// 原始尺寸 (百分位整数)
    pub fn dimensions(mut self, length: f64, width: f64, height: f64, weight: f64) -> Self {
        self.item.inventory.product.dimensions = Dimensions {
            length,
            width,
            height,
            weight,
        };
        self
    }

    pub fn plan(mut self, id: &str, fcid: &str, prep: &str) -> Self {
        self.item.plans.plans.push(ShipmentPlan {
            id: Some(id.to_string()),
            fcid: Some(fcid.to_string()),
            prep: Some(prep.to_string()),
        });
        self
    }

    pub fn plan_error(mut self, message: &str) -> Self {
        self.item.plans.errors.push(message.to_string());
        self
    }

    pub fn shipment(mut self, shipment_id: &str) -> Self {
        self.item.shipments.push(serde_json::json!(shipment_id));
        self
    }

    pub fn error(mut self, message: &str) -> Self {
        self.item.errors.push(message.to_string());
        self
    }

    pub fn product_feed(mut self, state: FeedState) -> Self {
        self.item.product_feed = state;
        self
    }

    pub fn inventory_feed(mut self, state: FeedState) -> Self {
        self.item.inventory_feed = state;
        self
    }

    pub fn dimensions_feed(mut self, state: FeedState) -> Self {
        self.item.dimensions_feed = state;
        self
    }

    pub fn case_packed(mut self, case_packed: bool) -> Self {
        self.item.case_packed = Some(case_packed);
        self
    }

    pub fn build(self) -> BatchItem {
        self.item
    }
}

/// 空计划集合的条目 (只带库存数据)
pub fn plain_item(id: &str, quantity: u32, ordered: u32) -> BatchItem {
    BatchItem {
        id: Some(id.to_string()),
        quantity,
        ordered,
        inventory: Inventory {
            payout: 0.0,
            product: Product::default(),
        },
        plans: PlanSet::default(),
        ..Default::default()
    }
}
