use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::primitives::*;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StockCategoryValues {
    pub id: StockCategoryId,
    pub version: u32,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SupplierValues {
    pub id: SupplierId,
    pub version: u32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StockItemValues {
    pub id: StockItemId,
    pub version: u32,
    pub name: String,
    pub sku: String,
    pub category_id: StockCategoryId,
    pub supplier_id: Option<SupplierId>,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub alert_threshold: i64,
}

impl StockItemValues {
    /// An item is flagged for restocking once its quantity drops to the
    /// alert threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.alert_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(quantity: i64, alert_threshold: i64) -> StockItemValues {
        StockItemValues {
            id: StockItemId::new(),
            version: 1,
            name: "A4 paper".to_string(),
            sku: "PAP-A4".to_string(),
            category_id: StockCategoryId::new(),
            supplier_id: None,
            quantity,
            unit_price: dec!(350.00),
            alert_threshold,
        }
    }

    #[test]
    fn low_stock_at_or_below_threshold() {
        assert!(item(5, 10).is_low_stock());
        assert!(item(10, 10).is_low_stock());
        assert!(!item(11, 10).is_low_stock());
    }
}
