use chrono::NaiveDate;
use derive_builder::Builder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entity::*;
pub use tasyir_types::{journal_entry::*, primitives::JournalEntryId};
use tasyir_types::primitives::PeriodId;

use super::validation::{self, JournalEntryDraft, ValidationErrors};

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JournalEntryEvent {
    Initialized {
        values: JournalEntryValues,
    },
    Updated {
        values: JournalEntryValues,
        fields: Vec<String>,
    },
}

impl EntityEvent for JournalEntryEvent {
    type EntityId = JournalEntryId;
    fn event_table_name() -> &'static str {
        "tasyir_journal_entry_events"
    }
}

#[derive(Builder)]
#[builder(pattern = "owned", build_fn(error = "EntityError"))]
pub struct JournalEntry {
    values: JournalEntryValues,
    pub(super) events: EntityEvents<JournalEntryEvent>,
}

impl Entity for JournalEntry {
    type Event = JournalEntryEvent;
}

impl JournalEntry {
    pub fn id(&self) -> JournalEntryId {
        self.values.id
    }

    pub fn period_id(&self) -> PeriodId {
        self.values.period_id
    }

    pub fn values(&self) -> &JournalEntryValues {
        &self.values
    }

    pub fn into_values(self) -> JournalEntryValues {
        self.values
    }

    /// Replaces the entry with the updated form contents. The caller has
    /// already validated the update and checked the owning period(s).
    pub fn update(&mut self, update: JournalEntryUpdate) {
        let mut updated_fields = Vec::new();

        if update.reference != self.values.reference {
            self.values.reference.clone_from(&update.reference);
            updated_fields.push("reference".to_string());
        }
        if update.entry_date != self.values.entry_date {
            self.values.entry_date = update.entry_date;
            updated_fields.push("entry_date".to_string());
        }
        if update.description != self.values.description {
            self.values.description.clone_from(&update.description);
            updated_fields.push("description".to_string());
        }
        if update.period_id != self.values.period_id {
            self.values.period_id = update.period_id;
            updated_fields.push("period_id".to_string());
        }
        if update.lines != self.values.lines {
            self.values.lines.clone_from(&update.lines);
            updated_fields.push("lines".to_string());
        }

        if !updated_fields.is_empty() {
            let (total_debit, total_credit) = line_totals(&self.values.lines);
            self.values.total_debit = total_debit;
            self.values.total_credit = total_credit;
            self.values.is_balanced =
                (total_debit - total_credit).abs() < validation::balance_tolerance();
            self.values.version += 1;
            self.events.push(JournalEntryEvent::Updated {
                values: self.values.clone(),
                fields: updated_fields,
            });
        }
    }

    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.events
            .entity_first_persisted_at
            .expect("No events for journal entry")
    }

    pub fn modified_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.events
            .latest_event_persisted_at
            .expect("No events for journal entry")
    }
}

fn line_totals(lines: &[JournalEntryLine]) -> (Decimal, Decimal) {
    lines.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(debit, credit), line| (debit + line.debit, credit + line.credit),
    )
}

impl TryFrom<EntityEvents<JournalEntryEvent>> for JournalEntry {
    type Error = EntityError;

    fn try_from(events: EntityEvents<JournalEntryEvent>) -> Result<Self, Self::Error> {
        let mut builder = JournalEntryBuilder::default();
        for event in events.iter() {
            match event {
                JournalEntryEvent::Initialized { values } => {
                    builder = builder.values(values.clone());
                }
                JournalEntryEvent::Updated { values, .. } => {
                    builder = builder.values(values.clone());
                }
            }
        }
        builder.events(events).build()
    }
}

/// A validated, ready-to-post journal entry.
#[derive(Debug, Builder)]
pub struct NewJournalEntry {
    #[builder(setter(into))]
    pub id: JournalEntryId,
    #[builder(setter(into))]
    pub(super) reference: String,
    pub(super) entry_date: NaiveDate,
    #[builder(setter(into))]
    pub(super) description: String,
    #[builder(setter(into))]
    pub period_id: PeriodId,
    pub lines: Vec<JournalEntryLine>,
}

impl NewJournalEntry {
    pub fn builder() -> NewJournalEntryBuilder {
        NewJournalEntryBuilder::default()
    }

    /// Runs the full draft validation and lifts the draft into a postable
    /// entry.
    pub fn from_draft(
        id: JournalEntryId,
        draft: JournalEntryDraft,
    ) -> Result<Self, ValidationErrors> {
        validation::validate_draft(&draft)?;
        Ok(Self {
            id,
            reference: draft.reference,
            entry_date: draft.entry_date.expect("validated draft"),
            description: draft.description,
            period_id: draft.period_id.expect("validated draft"),
            lines: draft.lines.into_iter().map(line_from_draft).collect(),
        })
    }

    pub(super) fn initial_events(self) -> EntityEvents<JournalEntryEvent> {
        let (total_debit, total_credit) = line_totals(&self.lines);
        let is_balanced = (total_debit - total_credit).abs() < validation::balance_tolerance();
        EntityEvents::init(
            self.id,
            [JournalEntryEvent::Initialized {
                values: JournalEntryValues {
                    id: self.id,
                    version: 1,
                    reference: self.reference,
                    entry_date: self.entry_date,
                    description: self.description,
                    period_id: self.period_id,
                    lines: self.lines,
                    total_debit,
                    total_credit,
                    is_balanced,
                },
            }],
        )
    }
}

/// Replacement contents for an existing entry, produced from a validated
/// draft.
#[derive(Debug)]
pub struct JournalEntryUpdate {
    pub reference: String,
    pub entry_date: NaiveDate,
    pub description: String,
    pub period_id: PeriodId,
    pub lines: Vec<JournalEntryLine>,
}

impl JournalEntryUpdate {
    pub fn from_draft(draft: JournalEntryDraft) -> Result<Self, ValidationErrors> {
        validation::validate_draft(&draft)?;
        Ok(Self {
            reference: draft.reference,
            entry_date: draft.entry_date.expect("validated draft"),
            description: draft.description,
            period_id: draft.period_id.expect("validated draft"),
            lines: draft.lines.into_iter().map(line_from_draft).collect(),
        })
    }
}

fn line_from_draft(line: super::validation::JournalEntryLineDraft) -> JournalEntryLine {
    JournalEntryLine {
        account_id: line.account_id.expect("validated draft"),
        description: line.description,
        debit: line.debit,
        credit: line.credit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tasyir_types::primitives::AccountId;

    fn lines() -> Vec<JournalEntryLine> {
        vec![
            JournalEntryLine {
                account_id: AccountId::new(),
                description: "Fournitures".to_string(),
                debit: dec!(1200),
                credit: dec!(0),
            },
            JournalEntryLine {
                account_id: AccountId::new(),
                description: "Banque".to_string(),
                debit: dec!(0),
                credit: dec!(1200),
            },
        ]
    }

    fn new_entry() -> NewJournalEntry {
        NewJournalEntry::builder()
            .id(JournalEntryId::new())
            .reference("JE-2024-001")
            .entry_date("2024-06-15".parse::<NaiveDate>().unwrap())
            .description("Office supplies")
            .period_id(PeriodId::new())
            .lines(lines())
            .build()
            .unwrap()
    }

    #[test]
    fn it_builds() {
        let new_entry = new_entry();
        assert_eq!(new_entry.reference, "JE-2024-001");
        assert_eq!(new_entry.lines.len(), 2);
    }

    #[test]
    fn fails_when_mandatory_fields_are_missing() {
        let new_entry = NewJournalEntry::builder().build();
        assert!(new_entry.is_err());
    }

    #[test]
    fn initialized_values_carry_totals_and_balance() {
        let entry = JournalEntry::try_from(new_entry().initial_events()).unwrap();
        assert_eq!(entry.values().total_debit, dec!(1200));
        assert_eq!(entry.values().total_credit, dec!(1200));
        assert!(entry.values().is_balanced);
    }

    #[test]
    fn update_recomputes_totals_and_bumps_version() {
        let mut entry = JournalEntry::try_from(new_entry().initial_events()).unwrap();
        let mut new_lines = entry.values().lines.clone();
        new_lines[0].debit = dec!(1500);
        new_lines[1].credit = dec!(1500);
        entry.update(JournalEntryUpdate {
            reference: entry.values().reference.clone(),
            entry_date: entry.values().entry_date,
            description: entry.values().description.clone(),
            period_id: entry.values().period_id,
            lines: new_lines,
        });
        assert_eq!(entry.values().version, 2);
        assert_eq!(entry.values().total_debit, dec!(1500));
        assert!(entry.values().is_balanced);
    }

    #[test]
    fn noop_update_pushes_no_event() {
        let mut entry = JournalEntry::try_from(new_entry().initial_events()).unwrap();
        entry.update(JournalEntryUpdate {
            reference: entry.values().reference.clone(),
            entry_date: entry.values().entry_date,
            description: entry.values().description.clone(),
            period_id: entry.values().period_id,
            lines: entry.values().lines.clone(),
        });
        assert_eq!(entry.values().version, 1);
    }
}
