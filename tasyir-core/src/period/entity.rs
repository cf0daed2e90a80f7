use chrono::NaiveDate;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::entity::*;
pub use tasyir_types::{period::*, primitives::PeriodId};
use tasyir_types::primitives::PeriodStatus;

use super::error::PeriodError;

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PeriodEvent {
    Initialized { values: PeriodValues },
    Closed { values: PeriodValues },
}

impl EntityEvent for PeriodEvent {
    type EntityId = PeriodId;
    fn event_table_name() -> &'static str {
        "tasyir_period_events"
    }
}

#[derive(Builder)]
#[builder(pattern = "owned", build_fn(error = "EntityError"))]
pub struct Period {
    values: PeriodValues,
    pub(super) events: EntityEvents<PeriodEvent>,
}

impl Entity for Period {
    type Event = PeriodEvent;
}

impl Period {
    pub fn id(&self) -> PeriodId {
        self.values.id
    }

    pub fn values(&self) -> &PeriodValues {
        &self.values
    }

    pub fn into_values(self) -> PeriodValues {
        self.values
    }

    pub fn is_open(&self) -> bool {
        self.values.is_open()
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.values.contains_date(date)
    }

    pub fn close(&mut self) -> Result<(), PeriodError> {
        if !self.is_open() {
            return Err(PeriodError::AlreadyClosed(self.id()));
        }
        self.values.status = PeriodStatus::Closed;
        self.values.version += 1;
        self.events.push(PeriodEvent::Closed {
            values: self.values.clone(),
        });
        Ok(())
    }

    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.events
            .entity_first_persisted_at
            .expect("No events for period")
    }

    pub fn modified_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.events
            .latest_event_persisted_at
            .expect("No events for period")
    }
}

impl TryFrom<EntityEvents<PeriodEvent>> for Period {
    type Error = EntityError;

    fn try_from(events: EntityEvents<PeriodEvent>) -> Result<Self, Self::Error> {
        let mut builder = PeriodBuilder::default();
        for event in events.iter() {
            match event {
                PeriodEvent::Initialized { values } => {
                    builder = builder.values(values.clone());
                }
                PeriodEvent::Closed { values } => {
                    builder = builder.values(values.clone());
                }
            }
        }
        builder.events(events).build()
    }
}

/// Representation of a new accounting period with required properties
/// and a builder.
#[derive(Debug, Builder)]
pub struct NewPeriod {
    #[builder(setter(into))]
    pub id: PeriodId,
    #[builder(setter(into))]
    pub(super) name: String,
    pub(super) start_date: NaiveDate,
    pub(super) end_date: NaiveDate,
}

impl NewPeriod {
    pub fn builder() -> NewPeriodBuilder {
        NewPeriodBuilder::default()
    }

    pub(super) fn initial_events(self) -> EntityEvents<PeriodEvent> {
        EntityEvents::init(
            self.id,
            [PeriodEvent::Initialized {
                values: PeriodValues {
                    id: self.id,
                    version: 1,
                    name: self.name,
                    start_date: self.start_date,
                    end_date: self.end_date,
                    status: PeriodStatus::Open,
                },
            }],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn build_period(start: &str, end: &str) -> Period {
        let new_period = NewPeriod::builder()
            .id(PeriodId::new())
            .name("2024-06")
            .start_date(date(start))
            .end_date(date(end))
            .build()
            .unwrap();
        Period::try_from(new_period.initial_events()).unwrap()
    }

    #[test]
    fn it_builds() {
        let new_period = NewPeriod::builder()
            .id(PeriodId::new())
            .name("2024-06")
            .start_date(date("2024-06-01"))
            .end_date(date("2024-06-30"))
            .build()
            .unwrap();
        assert_eq!(new_period.name, "2024-06");
    }

    #[test]
    fn fails_when_mandatory_fields_are_missing() {
        let new_period = NewPeriod::builder().build();
        assert!(new_period.is_err());
    }

    #[test]
    fn contains_date_is_inclusive() {
        let period = build_period("2024-06-01", "2024-06-30");
        assert!(period.contains_date(date("2024-06-01")));
        assert!(period.contains_date(date("2024-06-30")));
        assert!(!period.contains_date(date("2024-07-01")));
    }

    #[test]
    fn close_is_rejected_once_closed() {
        let mut period = build_period("2024-06-01", "2024-06-30");
        assert!(period.is_open());
        period.close().unwrap();
        assert!(!period.is_open());
        assert!(matches!(
            period.close(),
            Err(PeriodError::AlreadyClosed(_))
        ));
    }
}
