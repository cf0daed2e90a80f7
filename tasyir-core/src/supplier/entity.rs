use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::entity::*;
pub use tasyir_types::{primitives::SupplierId, stock::SupplierValues};

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SupplierEvent {
    Initialized {
        values: SupplierValues,
    },
    Updated {
        values: SupplierValues,
        fields: Vec<String>,
    },
}

impl EntityEvent for SupplierEvent {
    type EntityId = SupplierId;
    fn event_table_name() -> &'static str {
        "tasyir_supplier_events"
    }
}

#[derive(Builder)]
#[builder(pattern = "owned", build_fn(error = "EntityError"))]
pub struct Supplier {
    values: SupplierValues,
    pub(super) events: EntityEvents<SupplierEvent>,
}

impl Entity for Supplier {
    type Event = SupplierEvent;
}

impl Supplier {
    pub fn id(&self) -> SupplierId {
        self.values.id
    }

    pub fn values(&self) -> &SupplierValues {
        &self.values
    }

    pub fn into_values(self) -> SupplierValues {
        self.values
    }

    pub fn update(&mut self, builder: SupplierUpdate) {
        let SupplierUpdateValues { name, email, phone } =
            builder.build().expect("SupplierUpdateValues always exist");
        let mut updated_fields = Vec::new();

        if let Some(name) = name {
            if name != self.values.name {
                self.values.name = name;
                updated_fields.push("name".to_string());
            }
        }
        if email.is_some() && email != self.values.email {
            self.values.email = email;
            updated_fields.push("email".to_string());
        }
        if phone.is_some() && phone != self.values.phone {
            self.values.phone = phone;
            updated_fields.push("phone".to_string());
        }

        if !updated_fields.is_empty() {
            self.values.version += 1;
            self.events.push(SupplierEvent::Updated {
                values: self.values.clone(),
                fields: updated_fields,
            });
        }
    }
}

#[derive(Builder, Debug, Default)]
#[builder(name = "SupplierUpdate", default)]
pub struct SupplierUpdateValues {
    #[builder(setter(into, strip_option))]
    pub name: Option<String>,
    #[builder(setter(into, strip_option))]
    pub email: Option<String>,
    #[builder(setter(into, strip_option))]
    pub phone: Option<String>,
}

impl TryFrom<EntityEvents<SupplierEvent>> for Supplier {
    type Error = EntityError;

    fn try_from(events: EntityEvents<SupplierEvent>) -> Result<Self, Self::Error> {
        let mut builder = SupplierBuilder::default();
        for event in events.iter() {
            match event {
                SupplierEvent::Initialized { values } => {
                    builder = builder.values(values.clone());
                }
                SupplierEvent::Updated { values, .. } => {
                    builder = builder.values(values.clone());
                }
            }
        }
        builder.events(events).build()
    }
}

#[derive(Debug, Builder)]
pub struct NewSupplier {
    #[builder(setter(into))]
    pub id: SupplierId,
    #[builder(setter(into))]
    pub(super) name: String,
    #[builder(setter(strip_option, into), default)]
    pub(super) email: Option<String>,
    #[builder(setter(strip_option, into), default)]
    pub(super) phone: Option<String>,
}

impl NewSupplier {
    pub fn builder() -> NewSupplierBuilder {
        NewSupplierBuilder::default()
    }

    pub(super) fn initial_events(self) -> EntityEvents<SupplierEvent> {
        EntityEvents::init(
            self.id,
            [SupplierEvent::Initialized {
                values: SupplierValues {
                    id: self.id,
                    version: 1,
                    name: self.name,
                    email: self.email,
                    phone: self.phone,
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
        let new_supplier = NewSupplier::builder()
            .id(SupplierId::new())
            .name("Papeterie El Djazair")
            .build()
            .unwrap();
        assert_eq!(new_supplier.name, "Papeterie El Djazair");
        assert_eq!(new_supplier.email, None);
    }

    #[test]
    fn fails_when_mandatory_fields_are_missing() {
        let new_supplier = NewSupplier::builder().build();
        assert!(new_supplier.is_err());
    }
}
