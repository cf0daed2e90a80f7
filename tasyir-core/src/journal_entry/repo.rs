use sqlx::{PgPool, Postgres, Transaction};

use super::{cursor::JournalEntryByEntryDateCursor, entity::*, error::*};
use crate::{entity::*, query::*};
use tasyir_types::primitives::PeriodId;

#[derive(Debug, Clone)]
pub(super) struct JournalEntryRepo {
    pool: PgPool,
}

impl JournalEntryRepo {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }

    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        new_entry: NewJournalEntry,
    ) -> Result<JournalEntry, JournalEntryError> {
        let mut events = new_entry.initial_events();
        {
            let values = match events.iter().next() {
                Some(JournalEntryEvent::Initialized { values }) => values.clone(),
                _ => unreachable!("initial_events always starts with Initialized"),
            };
            sqlx::query(
                r#"INSERT INTO tasyir_journal_entries
                (id, reference, entry_date, period_id, total_debit, total_credit)
                VALUES ($1, $2, $3, $4, $5, $6)"#,
            )
            .bind(values.id)
            .bind(&values.reference)
            .bind(values.entry_date)
            .bind(values.period_id)
            .bind(values.total_debit)
            .bind(values.total_credit)
            .execute(&mut **tx)
            .await?;
        }
        events.persist(tx).await?;
        let entry = JournalEntry::try_from(events)?;
        Ok(entry)
    }

    pub async fn persist_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entry: &mut JournalEntry,
    ) -> Result<(), JournalEntryError> {
        let values = entry.values();
        sqlx::query(
            r#"UPDATE tasyir_journal_entries
            SET reference = $2, entry_date = $3, period_id = $4,
                total_debit = $5, total_credit = $6
            WHERE id = $1"#,
        )
        .bind(values.id)
        .bind(&values.reference)
        .bind(values.entry_date)
        .bind(values.period_id)
        .bind(values.total_debit)
        .bind(values.total_credit)
        .execute(&mut **tx)
        .await?;
        entry.events.persist(tx).await?;
        Ok(())
    }

    pub async fn find_by_id(
        &self,
        entry_id: JournalEntryId,
    ) -> Result<JournalEntry, JournalEntryError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT id, sequence, event, recorded_at
            FROM tasyir_journal_entry_events
            WHERE id = $1
            ORDER BY sequence"#,
        )
        .bind(entry_id)
        .fetch_all(&self.pool)
        .await?;
        if rows.is_empty() {
            return Err(JournalEntryError::NotFound(entry_id));
        }
        let entry = JournalEntry::try_from(EntityEvents::load(rows)?)?;
        Ok(entry)
    }

    /// Keyset-paginated listing, newest entry date first. Fetches one
    /// entity past `first` to learn whether a next page exists.
    pub async fn list(
        &self,
        query: PaginatedQueryArgs<JournalEntryByEntryDateCursor>,
        period_id: Option<PeriodId>,
    ) -> Result<PaginatedQueryRet<JournalEntry, JournalEntryByEntryDateCursor>, JournalEntryError>
    {
        let (after_date, after_id) = match query.after {
            Some(cursor) => (Some(cursor.entry_date), Some(uuid::Uuid::from(cursor.id))),
            None => (None, None),
        };
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"WITH entries AS (
                SELECT id, entry_date
                FROM tasyir_journal_entries
                WHERE ($2::uuid IS NULL OR period_id = $2)
                  AND ($3::date IS NULL OR (entry_date, id) < ($3, $4::uuid))
                ORDER BY entry_date DESC, id DESC
                LIMIT $1
            )
            SELECT e.id, e.sequence, e.event, e.recorded_at
            FROM entries j
            JOIN tasyir_journal_entry_events e ON e.id = j.id
            ORDER BY j.entry_date DESC, j.id DESC, e.sequence"#,
        )
        .bind(query.first as i64 + 1)
        .bind(period_id.map(uuid::Uuid::from))
        .bind(after_date)
        .bind(after_id)
        .fetch_all(&self.pool)
        .await?;
        let entries = EntityEvents::load_grouped(rows)?
            .into_iter()
            .map(|events| JournalEntry::try_from(events).map_err(JournalEntryError::from))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(paginate(entries, query.first))
    }
}

fn paginate(
    entries: Vec<JournalEntry>,
    first: usize,
) -> PaginatedQueryRet<JournalEntry, JournalEntryByEntryDateCursor> {
    let has_next_page = entries.len() > first;
    let mut entities = entries;
    entities.truncate(first);
    let end_cursor = entities
        .last()
        .map(|entry| JournalEntryByEntryDateCursor::from(entry.values()));
    PaginatedQueryRet {
        entities,
        has_next_page,
        end_cursor,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;
    use tasyir_types::primitives::AccountId;

    fn entry(entry_date: NaiveDate) -> JournalEntry {
        let new_entry = NewJournalEntry::builder()
            .id(JournalEntryId::new())
            .reference("PC-001")
            .entry_date(entry_date)
            .description("Achat fournitures")
            .period_id(tasyir_types::primitives::PeriodId::new())
            .lines(vec![
                JournalEntryLine {
                    account_id: AccountId::new(),
                    description: "".to_string(),
                    debit: dec!(100),
                    credit: dec!(0),
                },
                JournalEntryLine {
                    account_id: AccountId::new(),
                    description: "".to_string(),
                    debit: dec!(0),
                    credit: dec!(100),
                },
            ])
            .build()
            .unwrap();
        JournalEntry::try_from(new_entry.initial_events()).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    #[test]
    fn paginate_truncates_and_reports_next_page() {
        let entries = vec![entry(date(3)), entry(date(2)), entry(date(1))];
        let second_id = entries[1].id();
        let ret = paginate(entries, 2);
        assert_eq!(ret.entities.len(), 2);
        assert!(ret.has_next_page);
        let cursor = ret.end_cursor.unwrap();
        assert_eq!(cursor.id, second_id);
        assert_eq!(cursor.entry_date, date(2));
    }

    #[test]
    fn paginate_on_final_page() {
        let entries = vec![entry(date(1))];
        let ret = paginate(entries, 2);
        assert_eq!(ret.entities.len(), 1);
        assert!(!ret.has_next_page);
        assert!(ret.end_cursor.is_some());
    }

    #[test]
    fn paginate_empty() {
        let ret = paginate(Vec::new(), 2);
        assert!(ret.entities.is_empty());
        assert!(!ret.has_next_page);
        assert!(ret.end_cursor.is_none());
    }
}
