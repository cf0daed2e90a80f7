use derive_builder::Builder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entity::*;
use tasyir_types::primitives::{StockCategoryId, SupplierId};
pub use tasyir_types::{primitives::StockItemId, stock::StockItemValues};

use super::error::StockItemError;

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StockItemEvent {
    Initialized {
        values: StockItemValues,
    },
    Updated {
        values: StockItemValues,
        fields: Vec<String>,
    },
    QuantityAdjusted {
        values: StockItemValues,
        delta: i64,
    },
}

impl EntityEvent for StockItemEvent {
    type EntityId = StockItemId;
    fn event_table_name() -> &'static str {
        "tasyir_stock_item_events"
    }
}

#[derive(Builder)]
#[builder(pattern = "owned", build_fn(error = "EntityError"))]
pub struct StockItem {
    values: StockItemValues,
    pub(super) events: EntityEvents<StockItemEvent>,
}

impl Entity for StockItem {
    type Event = StockItemEvent;
}

impl StockItem {
    pub fn id(&self) -> StockItemId {
        self.values.id
    }

    pub fn values(&self) -> &StockItemValues {
        &self.values
    }

    pub fn into_values(self) -> StockItemValues {
        self.values
    }

    pub fn is_low_stock(&self) -> bool {
        self.values.is_low_stock()
    }

    /// Applies a relative stock movement. The quantity can never go
    /// negative.
    pub fn adjust_quantity(&mut self, delta: i64) -> Result<(), StockItemError> {
        let new_quantity = self.values.quantity + delta;
        if new_quantity < 0 {
            return Err(StockItemError::InsufficientQuantity {
                id: self.id(),
                quantity: self.values.quantity,
                delta,
            });
        }
        self.values.quantity = new_quantity;
        self.values.version += 1;
        self.events.push(StockItemEvent::QuantityAdjusted {
            values: self.values.clone(),
            delta,
        });
        Ok(())
    }

    pub fn update(&mut self, builder: StockItemUpdate) {
        let StockItemUpdateValues {
            name,
            category_id,
            supplier_id,
            unit_price,
            alert_threshold,
        } = builder.build().expect("StockItemUpdateValues always exist");
        let mut updated_fields = Vec::new();

        if let Some(name) = name {
            if name != self.values.name {
                self.values.name = name;
                updated_fields.push("name".to_string());
            }
        }
        if let Some(category_id) = category_id {
            if category_id != self.values.category_id {
                self.values.category_id = category_id;
                updated_fields.push("category_id".to_string());
            }
        }
        if supplier_id.is_some() && supplier_id != Some(self.values.supplier_id) {
            self.values.supplier_id = supplier_id.expect("checked above");
            updated_fields.push("supplier_id".to_string());
        }
        if let Some(unit_price) = unit_price {
            if unit_price != self.values.unit_price {
                self.values.unit_price = unit_price;
                updated_fields.push("unit_price".to_string());
            }
        }
        if let Some(alert_threshold) = alert_threshold {
            if alert_threshold != self.values.alert_threshold {
                self.values.alert_threshold = alert_threshold;
                updated_fields.push("alert_threshold".to_string());
            }
        }

        if !updated_fields.is_empty() {
            self.values.version += 1;
            self.events.push(StockItemEvent::Updated {
                values: self.values.clone(),
                fields: updated_fields,
            });
        }
    }

    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.events
            .entity_first_persisted_at
            .expect("No events for stock item")
    }
}

#[derive(Builder, Debug, Default)]
#[builder(name = "StockItemUpdate", default)]
pub struct StockItemUpdateValues {
    #[builder(setter(into, strip_option))]
    pub name: Option<String>,
    #[builder(setter(strip_option))]
    pub category_id: Option<StockCategoryId>,
    #[builder(setter(strip_option))]
    pub supplier_id: Option<Option<SupplierId>>,
    #[builder(setter(strip_option))]
    pub unit_price: Option<Decimal>,
    #[builder(setter(strip_option))]
    pub alert_threshold: Option<i64>,
}

impl TryFrom<EntityEvents<StockItemEvent>> for StockItem {
    type Error = EntityError;

    fn try_from(events: EntityEvents<StockItemEvent>) -> Result<Self, Self::Error> {
        let mut builder = StockItemBuilder::default();
        for event in events.iter() {
            match event {
                StockItemEvent::Initialized { values } => {
                    builder = builder.values(values.clone());
                }
                StockItemEvent::Updated { values, .. } => {
                    builder = builder.values(values.clone());
                }
                StockItemEvent::QuantityAdjusted { values, .. } => {
                    builder = builder.values(values.clone());
                }
            }
        }
        builder.events(events).build()
    }
}

#[derive(Debug, Builder)]
pub struct NewStockItem {
    #[builder(setter(into))]
    pub id: StockItemId,
    #[builder(setter(into))]
    pub(super) name: String,
    #[builder(setter(into))]
    pub(super) sku: String,
    pub category_id: StockCategoryId,
    #[builder(setter(strip_option), default)]
    pub supplier_id: Option<SupplierId>,
    #[builder(default)]
    pub(super) quantity: i64,
    pub(super) unit_price: Decimal,
    #[builder(default)]
    pub(super) alert_threshold: i64,
}

impl NewStockItem {
    pub fn builder() -> NewStockItemBuilder {
        NewStockItemBuilder::default()
    }

    pub(super) fn initial_events(self) -> EntityEvents<StockItemEvent> {
        EntityEvents::init(
            self.id,
            [StockItemEvent::Initialized {
                values: StockItemValues {
                    id: self.id,
                    version: 1,
                    name: self.name,
                    sku: self.sku,
                    category_id: self.category_id,
                    supplier_id: self.supplier_id,
                    quantity: self.quantity,
                    unit_price: self.unit_price,
                    alert_threshold: self.alert_threshold,
                },
            }],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item() -> StockItem {
        let new_item = NewStockItem::builder()
            .id(StockItemId::new())
            .name("Ramette A4")
            .sku("PAP-A4-80")
            .category_id(StockCategoryId::new())
            .quantity(20)
            .unit_price(dec!(350.00))
            .alert_threshold(5)
            .build()
            .unwrap();
        StockItem::try_from(new_item.initial_events()).unwrap()
    }

    #[test]
    fn it_builds() {
        let item = item();
        assert_eq!(item.values().quantity, 20);
        assert!(!item.is_low_stock());
    }

    #[test]
    fn fails_when_mandatory_fields_are_missing() {
        let new_item = NewStockItem::builder().build();
        assert!(new_item.is_err());
    }

    #[test]
    fn adjustment_below_zero_is_rejected() {
        let mut item = item();
        item.adjust_quantity(-15).unwrap();
        assert_eq!(item.values().quantity, 5);
        assert!(item.is_low_stock());
        assert!(matches!(
            item.adjust_quantity(-6),
            Err(StockItemError::InsufficientQuantity { .. })
        ));
        assert_eq!(item.values().quantity, 5);
    }
}
