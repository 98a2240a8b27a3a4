//! Order Records

use jiff::Timestamp;

use crate::{
    domain::{orders::status::OrderStatus, products::records::ProductUuid, users::records::UserUuid},
    money::{self, Discount, line_price},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
///
/// Customer and shipping fields are fixed at checkout. Prices are derived from the
/// current product prices whenever the order is read.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub building: String,
    pub apartment: Option<String>,
    pub floor: Option<i16>,
    pub discount: Option<Discount>,
    pub status: OrderStatus,
    pub items: Vec<OrderItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderRecord {
    /// Sum of item prices before discount.
    #[must_use]
    pub fn price(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |total, item| total.saturating_add(item.price()))
    }

    #[must_use]
    pub fn discount_amount(&self) -> u64 {
        money::discount_amount(self.price(), self.discount)
    }

    #[must_use]
    pub fn total_price(&self) -> u64 {
        money::total_price(self.price(), self.discount)
    }

    #[must_use]
    pub fn is_owned_by(&self, user: UserUuid) -> bool {
        self.user_uuid == user
    }
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Item Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub created_at: Timestamp,
}

impl OrderItemRecord {
    #[must_use]
    pub fn price(&self) -> u64 {
        line_price(self.unit_price, self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(discount: Option<Discount>, prices: &[(u64, u32)]) -> OrderRecord {
        let uuid = OrderUuid::new();

        OrderRecord {
            uuid,
            user_uuid: UserUuid::new(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            phone: "1234567890".to_string(),
            street: "Main".to_string(),
            building: "1".to_string(),
            apartment: None,
            floor: None,
            discount,
            status: OrderStatus::Pending,
            items: prices
                .iter()
                .map(|&(unit_price, quantity)| OrderItemRecord {
                    uuid: OrderItemUuid::new(),
                    order_uuid: uuid,
                    product_uuid: ProductUuid::new(),
                    product_name: "Widget".to_string(),
                    unit_price,
                    quantity,
                    created_at: Timestamp::UNIX_EPOCH,
                })
                .collect(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn total_without_discount_equals_price() {
        let order = order(None, &[(10_00, 2), (5_00, 1)]);

        assert_eq!(order.price(), 25_00);
        assert_eq!(order.discount_amount(), 0);
        assert_eq!(order.total_price(), 25_00);
    }

    #[test]
    fn twenty_percent_off_one_hundred() -> Result<(), money::DiscountOutOfRange> {
        let order = order(Some(Discount::new(20)?), &[(100_00, 1)]);

        assert_eq!(order.discount_amount(), 20_00);
        assert_eq!(order.total_price(), 80_00);

        Ok(())
    }

    #[test]
    fn empty_order_costs_nothing() {
        let order = order(None, &[]);

        assert_eq!(order.total_price(), 0);
    }
}
