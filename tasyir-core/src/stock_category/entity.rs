use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::entity::*;
pub use tasyir_types::{primitives::StockCategoryId, stock::StockCategoryValues};

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StockCategoryEvent {
    Initialized {
        values: StockCategoryValues,
    },
    Updated {
        values: StockCategoryValues,
        fields: Vec<String>,
    },
}

impl EntityEvent for StockCategoryEvent {
    type EntityId = StockCategoryId;
    fn event_table_name() -> &'static str {
        "tasyir_stock_category_events"
    }
}

#[derive(Builder)]
#[builder(pattern = "owned", build_fn(error = "EntityError"))]
pub struct StockCategory {
    values: StockCategoryValues,
    pub(super) events: EntityEvents<StockCategoryEvent>,
}

impl Entity for StockCategory {
    type Event = StockCategoryEvent;
}

impl StockCategory {
    pub fn id(&self) -> StockCategoryId {
        self.values.id
    }

    pub fn values(&self) -> &StockCategoryValues {
        &self.values
    }

    pub fn into_values(self) -> StockCategoryValues {
        self.values
    }

    pub fn update(&mut self, builder: StockCategoryUpdate) {
        let StockCategoryUpdateValues { name } = builder
            .build()
            .expect("StockCategoryUpdateValues always exist");
        if let Some(name) = name {
            if name != self.values.name {
                self.values.name = name;
                self.values.version += 1;
                self.events.push(StockCategoryEvent::Updated {
                    values: self.values.clone(),
                    fields: vec!["name".to_string()],
                });
            }
        }
    }
}

#[derive(Builder, Debug, Default)]
#[builder(name = "StockCategoryUpdate", default)]
pub struct StockCategoryUpdateValues {
    #[builder(setter(into, strip_option))]
    pub name: Option<String>,
}

impl TryFrom<EntityEvents<StockCategoryEvent>> for StockCategory {
    type Error = EntityError;

    fn try_from(events: EntityEvents<StockCategoryEvent>) -> Result<Self, Self::Error> {
        let mut builder = StockCategoryBuilder::default();
        for event in events.iter() {
            match event {
                StockCategoryEvent::Initialized { values } => {
                    builder = builder.values(values.clone());
                }
                StockCategoryEvent::Updated { values, .. } => {
                    builder = builder.values(values.clone());
                }
            }
        }
        builder.events(events).build()
    }
}

#[derive(Debug, Builder)]
pub struct NewStockCategory {
    #[builder(setter(into))]
    pub id: StockCategoryId,
    #[builder(setter(into))]
    pub(super) name: String,
}

impl NewStockCategory {
    pub fn builder() -> NewStockCategoryBuilder {
        NewStockCategoryBuilder::default()
    }

    pub(super) fn initial_events(self) -> EntityEvents<StockCategoryEvent> {
        EntityEvents::init(
            self.id,
            [StockCategoryEvent::Initialized {
                values: StockCategoryValues {
                    id: self.id,
                    version: 1,
                    name: self.name,
                },
            }],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_builds() {
        let new_category = NewStockCategory::builder()
            .id(StockCategoryId::new())
            .name("Fournitures de bureau")
            .build()
            .unwrap();
        assert_eq!(new_category.name, "Fournitures de bureau");
    }

    #[test]
    fn fails_when_mandatory_fields_are_missing() {
        let new_category = NewStockCategory::builder().build();
        assert!(new_category.is_err());
    }
}
