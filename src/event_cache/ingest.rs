//! Ingestion pipeline: candidate → classified record → store

use chrono::NaiveDate;
use tracing::info;

use super::EventCache;
use crate::classifier::classify;
use crate::error::{CacheError, CacheResult};
use crate::types::{Demand, EventRecord, EventSource, NewEvent, RawCandidate};

/// Classify one candidate and fill defaults
///
/// A missing `name` or `date` is passed through and rejected by the store.
/// A `date` that is present but not `YYYY-MM-DD` is rejected here with the
/// same store error, since retention and freshness compare dates as text.
pub fn to_new_event(candidate: RawCandidate) -> CacheResult<NewEvent> {
    let date = candidate
        .date
        .as_deref()
        .map(|raw| {
            NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|e| CacheError::store(format!("invalid event date '{}'", raw), e))
        })
        .transpose()?;

    Ok(NewEvent {
        date,
        name: candidate.name,
        location: candidate.location,
        address: candidate.address.unwrap_or_default(),
        lat: candidate.lat,
        lng: candidate.lng,
        start_time: candidate.time,
        end_time: candidate.end_time,
        size_class: classify(candidate.capacity),
        capacity: candidate.capacity,
        event_type: candidate.event_type,
        demand: candidate
            .demand
            .as_deref()
            .map(Demand::from_label)
            .unwrap_or_default(),
        description: candidate.description.unwrap_or_default(),
    })
}

impl EventCache {
    /// Classify and store a batch of candidates atomically
    ///
    /// No deduplication: ingesting the same candidates twice stores them
    /// twice. On any error nothing from the batch is persisted, so the
    /// whole call can be retried.
    pub async fn ingest(
        &self,
        candidates: Vec<RawCandidate>,
        source: EventSource,
    ) -> CacheResult<Vec<EventRecord>> {
        let records = candidates
            .into_iter()
            .map(to_new_event)
            .collect::<CacheResult<Vec<_>>>()?;

        let stored = self.store.insert_batch(records, source).await?;
        info!(count = stored.len(), source = %source, "ingested events");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_classification() {
        let candidate = RawCandidate::new("Pub Quiz", "2025-06-01").with_capacity(80);
        let record = to_new_event(candidate).unwrap();

        assert!(record.size_class);
        assert_eq!(record.address, "");
        assert_eq!(record.description, "");
        assert_eq!(record.demand, Demand::Unknown);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 6, 1));
    }

    #[test]
    fn test_unknown_capacity_not_small() {
        let record = to_new_event(RawCandidate::new("Messe", "2025-06-01")).unwrap();
        assert!(!record.size_class);
    }

    #[test]
    fn test_time_maps_to_start_time() {
        let candidate = RawCandidate::new("Konzert", "2025-06-01")
            .with_time("20:00")
            .with_end_time("22:30");
        let record = to_new_event(candidate).unwrap();
        assert_eq!(record.start_time.as_deref(), Some("20:00"));
        assert_eq!(record.end_time.as_deref(), Some("22:30"));
    }

    #[test]
    fn test_malformed_date_is_store_error() {
        let err = to_new_event(RawCandidate::new("X", "01.06.2025")).unwrap_err();
        assert!(matches!(err, CacheError::Store { .. }));
    }

    #[test]
    fn test_demand_label_mapping() {
        let high = to_new_event(RawCandidate::new("A", "2025-06-01").with_demand(Demand::High)).unwrap();
        assert_eq!(high.demand, Demand::High);

        let odd = RawCandidate {
            demand: Some("extreme".to_string()),
            ..RawCandidate::new("B", "2025-06-01")
        };
        assert_eq!(to_new_event(odd).unwrap().demand, Demand::Unknown);
    }

    #[test]
    fn test_missing_name_passes_through() {
        let candidate = RawCandidate {
            date: Some("2025-06-01".to_string()),
            ..Default::default()
        };
        let record = to_new_event(candidate).unwrap();
        assert!(record.name.is_none());
    }
}
