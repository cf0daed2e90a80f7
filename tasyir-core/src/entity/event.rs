use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

pub trait Entity: TryFrom<EntityEvents<<Self as Entity>::Event>, Error = EntityError> {
    type Event: EntityEvent;
}

pub trait EntityEvent: DeserializeOwned + Serialize {
    type EntityId: Into<uuid::Uuid> + Copy;

    fn event_table_name() -> &'static str
    where
        Self: Sized;
}

use super::error::EntityError;

/// A raw event row as stored in an `<entity>_events` table.
#[derive(Debug, sqlx::FromRow)]
pub struct GenericEvent {
    pub id: uuid::Uuid,
    pub sequence: i32,
    pub event: serde_json::Value,
    pub recorded_at: DateTime<Utc>,
}

pub struct EntityEvents<T: EntityEvent> {
    entity_id: <T as EntityEvent>::EntityId,
    persisted_events: Vec<T>,
    new_events: Vec<T>,
    pub entity_first_persisted_at: Option<DateTime<Utc>>,
    pub latest_event_persisted_at: Option<DateTime<Utc>>,
}

impl<T> EntityEvents<T>
where
    T: EntityEvent + 'static,
{
    pub fn init(
        id: <T as EntityEvent>::EntityId,
        initial_events: impl IntoIterator<Item = T>,
    ) -> Self {
        Self {
            entity_id: id,
            persisted_events: Vec::new(),
            new_events: initial_events.into_iter().collect(),
            entity_first_persisted_at: None,
            latest_event_persisted_at: None,
        }
    }

    pub fn entity_id(&self) -> <T as EntityEvent>::EntityId {
        self.entity_id
    }

    pub fn push(&mut self, event: T) {
        self.new_events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.persisted_events.iter().chain(self.new_events.iter())
    }

    pub fn n_persisted(&self) -> usize {
        self.persisted_events.len()
    }

    /// Append the new events to the entity's event table. Returns the number
    /// of events written.
    pub async fn persist(
        &mut self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<usize, sqlx::Error> {
        if self.new_events.is_empty() {
            return Ok(0);
        }
        let uuid: uuid::Uuid = self.entity_id.into();
        let mut events = Vec::new();
        std::mem::swap(&mut events, &mut self.new_events);
        let mut query_builder = sqlx::QueryBuilder::new(format!(
            "INSERT INTO {} (id, sequence, event_type, event)",
            <T as EntityEvent>::event_table_name(),
        ));
        let sequence = self.persisted_events.len() + 1;
        query_builder.push_values(events.iter().enumerate(), |mut builder, (offset, event)| {
            let event_json = serde_json::to_value(event).expect("Could not serialize event");
            let event_type = event_json
                .get("type")
                .and_then(serde_json::Value::as_str)
                .expect("Could not get type")
                .to_owned();
            builder.push_bind(uuid);
            builder.push_bind((sequence + offset) as i32);
            builder.push_bind(event_type);
            builder.push_bind(event_json);
        });
        query_builder.push(" RETURNING recorded_at");

        let query = query_builder.build_query_scalar::<DateTime<Utc>>();
        let recorded_at = query.fetch_all(&mut **tx).await?;

        let n_persisted = events.len();
        self.persisted_events.append(&mut events);
        if self.entity_first_persisted_at.is_none() {
            self.entity_first_persisted_at = recorded_at.first().copied();
        }
        self.latest_event_persisted_at = recorded_at.last().copied();
        Ok(n_persisted)
    }

    /// Rebuild an event stream from rows of a single entity, ordered by
    /// sequence.
    pub fn load(rows: Vec<GenericEvent>) -> Result<Self, EntityError>
    where
        <T as EntityEvent>::EntityId: From<uuid::Uuid>,
    {
        let first = rows.first().ok_or(EntityError::NoEvents)?;
        let entity_id = <T as EntityEvent>::EntityId::from(first.id);
        let entity_first_persisted_at = Some(first.recorded_at);
        let latest_event_persisted_at = rows.last().map(|r| r.recorded_at);
        let persisted_events = rows
            .into_iter()
            .map(|row| serde_json::from_value(row.event))
            .collect::<Result<Vec<T>, _>>()?;
        Ok(Self {
            entity_id,
            persisted_events,
            new_events: Vec::new(),
            entity_first_persisted_at,
            latest_event_persisted_at,
        })
    }

    /// Rebuild many entities from rows ordered by (id, sequence).
    pub fn load_grouped(rows: Vec<GenericEvent>) -> Result<Vec<Self>, EntityError>
    where
        <T as EntityEvent>::EntityId: From<uuid::Uuid>,
    {
        let mut all = Vec::new();
        let mut current: Vec<GenericEvent> = Vec::new();
        for row in rows {
            if let Some(last) = current.last() {
                if last.id != row.id {
                    let mut group = Vec::new();
                    std::mem::swap(&mut group, &mut current);
                    all.push(Self::load(group)?);
                }
            }
            current.push(row);
        }
        if !current.is_empty() {
            all.push(Self::load(current)?);
        }
        Ok(all)
    }
}
