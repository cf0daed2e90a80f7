use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::entity::*;
use tasyir_types::primitives::DepartmentId;
pub use tasyir_types::{position::*, primitives::PositionId};

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PositionEvent {
    Initialized {
        values: PositionValues,
    },
    Updated {
        values: PositionValues,
        fields: Vec<String>,
    },
}

impl EntityEvent for PositionEvent {
    type EntityId = PositionId;
    fn event_table_name() -> &'static str {
        "tasyir_position_events"
    }
}

#[derive(Builder)]
#[builder(pattern = "owned", build_fn(error = "EntityError"))]
pub struct Position {
    values: PositionValues,
    pub(super) events: EntityEvents<PositionEvent>,
}

impl Entity for Position {
    type Event = PositionEvent;
}

impl Position {
    pub fn id(&self) -> PositionId {
        self.values.id
    }

    pub fn values(&self) -> &PositionValues {
        &self.values
    }

    pub fn into_values(self) -> PositionValues {
        self.values
    }

    pub fn update(&mut self, builder: PositionUpdate) {
        let PositionUpdateValues {
            title,
            department_id,
        } = builder.build().expect("PositionUpdateValues always exist");
        let mut updated_fields = Vec::new();

        if let Some(title) = title {
            if title != self.values.title {
                self.values.title = title;
                updated_fields.push("title".to_string());
            }
        }
        if department_id.is_some() && department_id != Some(self.values.department_id) {
            self.values.department_id = department_id.expect("checked above");
            updated_fields.push("department_id".to_string());
        }

        if !updated_fields.is_empty() {
            self.values.version += 1;
            self.events.push(PositionEvent::Updated {
                values: self.values.clone(),
                fields: updated_fields,
            });
        }
    }

    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.events
            .entity_first_persisted_at
            .expect("No events for position")
    }
}

#[derive(Builder, Debug, Default)]
#[builder(name = "PositionUpdate", default)]
pub struct PositionUpdateValues {
    #[builder(setter(into, strip_option))]
    pub title: Option<String>,
    #[builder(setter(strip_option))]
    pub department_id: Option<Option<DepartmentId>>,
}

impl TryFrom<EntityEvents<PositionEvent>> for Position {
    type Error = EntityError;

    fn try_from(events: EntityEvents<PositionEvent>) -> Result<Self, Self::Error> {
        let mut builder = PositionBuilder::default();
        for event in events.iter() {
            match event {
                PositionEvent::Initialized { values } => {
                    builder = builder.values(values.clone());
                }
                PositionEvent::Updated { values, .. } => {
                    builder = builder.values(values.clone());
                }
            }
        }
        builder.events(events).build()
    }
}

#[derive(Debug, Builder)]
pub struct NewPosition {
    #[builder(setter(into))]
    pub id: PositionId,
    #[builder(setter(into))]
    pub(super) title: String,
    #[builder(setter(strip_option, into), default)]
    pub department_id: Option<DepartmentId>,
}

impl NewPosition {
    pub fn builder() -> NewPositionBuilder {
        NewPositionBuilder::default()
    }

    pub(super) fn initial_events(self) -> EntityEvents<PositionEvent> {
        EntityEvents::init(
            self.id,
            [PositionEvent::Initialized {
                values: PositionValues {
                    id: self.id,
                    version: 1,
                    title: self.title,
                    department_id: self.department_id,
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
        let new_position = NewPosition::builder()
            .id(PositionId::new())
            .title("Comptable senior")
            .build()
            .unwrap();
        assert_eq!(new_position.title, "Comptable senior");
        assert_eq!(new_position.department_id, None);
    }

    #[test]
    fn fails_when_mandatory_fields_are_missing() {
        let new_position = NewPosition::builder().build();
        assert!(new_position.is_err());
    }
}
