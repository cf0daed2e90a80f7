use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::entity::*;
pub use tasyir_types::{department::*, primitives::DepartmentId};

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DepartmentEvent {
    Initialized {
        values: DepartmentValues,
    },
    Updated {
        values: DepartmentValues,
        fields: Vec<String>,
    },
}

impl EntityEvent for DepartmentEvent {
    type EntityId = DepartmentId;
    fn event_table_name() -> &'static str {
        "tasyir_department_events"
    }
}

#[derive(Builder)]
#[builder(pattern = "owned", build_fn(error = "EntityError"))]
pub struct Department {
    values: DepartmentValues,
    pub(super) events: EntityEvents<DepartmentEvent>,
}

impl Entity for Department {
    type Event = DepartmentEvent;
}

impl Department {
    pub fn id(&self) -> DepartmentId {
        self.values.id
    }

    pub fn values(&self) -> &DepartmentValues {
        &self.values
    }

    pub fn into_values(self) -> DepartmentValues {
        self.values
    }

    pub fn update(&mut self, builder: DepartmentUpdate) {
        let DepartmentUpdateValues { name, description } = builder
            .build()
            .expect("DepartmentUpdateValues always exist");
        let mut updated_fields = Vec::new();

        if let Some(name) = name {
            if name != self.values.name {
                self.values.name = name;
                updated_fields.push("name".to_string());
            }
        }
        if let Some(description) = description {
            if description != self.values.description {
                self.values.description = description;
                updated_fields.push("description".to_string());
            }
        }

        if !updated_fields.is_empty() {
            self.values.version += 1;
            self.events.push(DepartmentEvent::Updated {
                values: self.values.clone(),
                fields: updated_fields,
            });
        }
    }

    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.events
            .entity_first_persisted_at
            .expect("No events for department")
    }
}

#[derive(Builder, Debug, Default)]
#[builder(name = "DepartmentUpdate", default)]
pub struct DepartmentUpdateValues {
    #[builder(setter(into, strip_option))]
    pub name: Option<String>,
    #[builder(setter(into, strip_option))]
    pub description: Option<Option<String>>,
}

impl TryFrom<EntityEvents<DepartmentEvent>> for Department {
    type Error = EntityError;

    fn try_from(events: EntityEvents<DepartmentEvent>) -> Result<Self, Self::Error> {
        let mut builder = DepartmentBuilder::default();
        for event in events.iter() {
            match event {
                DepartmentEvent::Initialized { values } => {
                    builder = builder.values(values.clone());
                }
                DepartmentEvent::Updated { values, .. } => {
                    builder = builder.values(values.clone());
                }
            }
        }
        builder.events(events).build()
    }
}

#[derive(Debug, Builder)]
pub struct NewDepartment {
    #[builder(setter(into))]
    pub id: DepartmentId,
    #[builder(setter(into))]
    pub(super) name: String,
    #[builder(setter(strip_option, into), default)]
    pub(super) description: Option<String>,
}

impl NewDepartment {
    pub fn builder() -> NewDepartmentBuilder {
        NewDepartmentBuilder::default()
    }

    pub(super) fn initial_events(self) -> EntityEvents<DepartmentEvent> {
        EntityEvents::init(
            self.id,
            [DepartmentEvent::Initialized {
                values: DepartmentValues {
                    id: self.id,
                    version: 1,
                    name: self.name,
                    description: self.description,
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
        let new_department = NewDepartment::builder()
            .id(DepartmentId::new())
            .name("Comptabilité")
            .build()
            .unwrap();
        assert_eq!(new_department.name, "Comptabilité");
        assert_eq!(new_department.description, None);
    }

    #[test]
    fn fails_when_mandatory_fields_are_missing() {
        let new_department = NewDepartment::builder().build();
        assert!(new_department.is_err());
    }
}
