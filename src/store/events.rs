//! Event table operations: batch insert, ranked retrieval, counting, purge

use chrono::{NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};
use tracing::debug;

use super::EventStore;
use crate::error::{CacheError, CacheResult};
use crate::types::{Demand, EventQuery, EventRecord, EventSource, NewEvent};

const EVENT_COLUMNS: &str = "id, date, name, location, address, lat, lng, start_time, end_time, \
     capacity, event_type, demand, description, is_small_venue, ingested_at, source";

/// Small venues first, then demand rank (unknown last), then start time
/// with missing times last; `id` makes the order total.
const RANKING: &str = " ORDER BY is_small_venue DESC, \
     CASE demand WHEN 'high' THEN 1 WHEN 'medium' THEN 2 WHEN 'low' THEN 3 ELSE 4 END ASC, \
     start_time IS NULL ASC, start_time ASC, id ASC";

impl EventStore {
    /// Append all records in one transaction
    ///
    /// Either every record is stored or none is; a constraint violation on
    /// any row rolls back the whole batch. An empty batch is a no-op.
    /// Returns the stored records with their assigned ids.
    pub async fn insert_batch(
        &self,
        records: Vec<NewEvent>,
        source: EventSource,
    ) -> CacheResult<Vec<EventRecord>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let ingested_at = Utc::now();
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| CacheError::store("failed to begin insert transaction", e))?;

        let statement = format!(
            "INSERT INTO events (date, name, location, address, lat, lng, start_time, end_time, \
             capacity, event_type, demand, description, is_small_venue, ingested_at, source) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {}",
            EVENT_COLUMNS
        );

        let mut stored = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let row = sqlx::query(&statement)
                .bind(record.date)
                .bind(record.name)
                .bind(record.location)
                .bind(record.address)
                .bind(record.lat)
                .bind(record.lng)
                .bind(record.start_time)
                .bind(record.end_time)
                .bind(record.capacity)
                .bind(record.event_type)
                .bind(record.demand.as_str())
                .bind(record.description)
                .bind(record.size_class)
                .bind(ingested_at)
                .bind(source.as_str())
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| CacheError::store(format!("insert failed at batch index {}", index), e))?;
            stored.push(row_to_record(&row)?);
        }

        tx.commit()
            .await
            .map_err(|e| CacheError::store("failed to commit insert batch", e))?;

        debug!(count = stored.len(), source = %source, "event batch stored");
        Ok(stored)
    }

    /// Filtered records in ranking order
    pub async fn query_events(&self, query: &EventQuery) -> CacheResult<Vec<EventRecord>> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM events WHERE 1=1", EVENT_COLUMNS));

        if let Some(date) = query.date {
            builder.push(" AND date = ").push_bind(date);
        }

        // Single-sided: the window end is not enforced.
        if let Some(start) = &query.window_start {
            builder
                .push(" AND (start_time >= ")
                .push_bind(start.clone())
                .push(" OR end_time >= ")
                .push_bind(start.clone())
                .push(")");
        }

        if query.small_only {
            builder.push(" AND is_small_venue = 1");
        }

        builder.push(RANKING);

        let rows = builder
            .build()
            .fetch_all(self.pool())
            .await
            .map_err(|e| CacheError::store("event query failed", e))?;

        rows.iter().map(row_to_record).collect()
    }

    /// Records with `start <= date <= end`, in ranking order
    pub async fn events_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> CacheResult<Vec<EventRecord>> {
        let statement = format!(
            "SELECT {} FROM events WHERE date >= ? AND date <= ?{}",
            EVENT_COLUMNS, RANKING
        );
        let rows = sqlx::query(&statement)
            .bind(start)
            .bind(end)
            .fetch_all(self.pool())
            .await
            .map_err(|e| CacheError::store("range query failed", e))?;

        rows.iter().map(row_to_record).collect()
    }

    /// Number of records dated `date`
    pub async fn count_for_date(&self, date: NaiveDate) -> CacheResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM events WHERE date = ?")
            .bind(date)
            .fetch_one(self.pool())
            .await
            .map_err(|e| CacheError::store("count query failed", e))?;

        row.try_get("count")
            .map_err(|e| CacheError::store("failed to read count", e))
    }

    /// Delete every record dated strictly before `date`
    pub async fn delete_older_than(&self, date: NaiveDate) -> CacheResult<u64> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| CacheError::store("failed to begin delete transaction", e))?;

        let result = sqlx::query("DELETE FROM events WHERE date < ?")
            .bind(date)
            .execute(&mut *tx)
            .await
            .map_err(|e| CacheError::store("delete failed", e))?;

        tx.commit()
            .await
            .map_err(|e| CacheError::store("failed to commit delete", e))?;

        Ok(result.rows_affected())
    }
}

fn row_to_record(row: &SqliteRow) -> CacheResult<EventRecord> {
    let read = |e: sqlx::Error| CacheError::store("failed to decode event row", e);

    let source_label: String = row.try_get("source").map_err(read)?;
    let source = EventSource::from_label(&source_label).ok_or_else(|| CacheError::Store {
        message: format!("unknown source tag '{}'", source_label),
        source: None,
    })?;
    let demand: String = row.try_get("demand").map_err(read)?;

    Ok(EventRecord {
        id: row.try_get("id").map_err(read)?,
        date: row.try_get("date").map_err(read)?,
        name: row.try_get("name").map_err(read)?,
        location: row.try_get("location").map_err(read)?,
        address: row.try_get("address").map_err(read)?,
        lat: row.try_get("lat").map_err(read)?,
        lng: row.try_get("lng").map_err(read)?,
        start_time: row.try_get("start_time").map_err(read)?,
        end_time: row.try_get("end_time").map_err(read)?,
        capacity: row.try_get("capacity").map_err(read)?,
        event_type: row.try_get("event_type").map_err(read)?,
        demand: Demand::from_label(&demand),
        description: row.try_get("description").map_err(read)?,
        size_class: row.try_get("is_small_venue").map_err(read)?,
        ingested_at: row.try_get("ingested_at").map_err(read)?,
        source,
    })
}
