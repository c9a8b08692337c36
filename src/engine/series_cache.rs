use poll_promise::Promise;
use std::collections::HashMap;
use std::time::Duration;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::SeriesResult;
use crate::domain::{ChartSeries, SeriesKey};
use crate::engine::refresh_state::{QueryView, RefreshState};
use crate::utils::app_time::AppInstant;

struct InFlight {
    request_id: u64,
    promise: Promise<SeriesResult>,
}

/// Cached state for one `SeriesKey`.
pub struct SeriesEntry {
    state: RefreshState<ChartSeries>,
    /// Most recent successful series. Outlives a failed refresh.
    last_ready: Option<ChartSeries>,
    in_flight: Option<InFlight>,
    /// Id of the most recent request issued for this key. Only its completion may land.
    latest_request_id: u64,
    last_updated: Option<AppInstant>,
    last_used: AppInstant,
}

impl SeriesEntry {
    fn new(now: AppInstant) -> Self {
        Self {
            state: RefreshState::Pending,
            last_ready: None,
            in_flight: None,
            latest_request_id: 0,
            last_updated: None,
            last_used: now,
        }
    }

    pub fn state(&self) -> &RefreshState<ChartSeries> {
        &self.state
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Like `state().view(..)`, but a failed refresh still carries the last
    /// good series so the chart can stay on screen next to the error.
    pub fn view(&self) -> QueryView<'_, ChartSeries> {
        let mut view = self.state.view(self.is_fetching());
        if view.data.is_none() {
            view.data = self.last_ready.as_ref();
        }
        view
    }

    pub fn last_updated(&self) -> Option<AppInstant> {
        self.last_updated
    }
}

/// Chart series keyed by (asset, timeframe), with last-request-wins completion.
pub struct SeriesCache {
    entries: HashMap<SeriesKey, SeriesEntry>,
    next_request_id: u64,
    inactive_ttl: Duration,
}

impl SeriesCache {
    pub fn new(inactive_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            next_request_id: 1,
            inactive_ttl,
        }
    }

    pub fn get(&self, key: &SeriesKey) -> Option<&SeriesEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_fetching(&self, key: &SeriesKey) -> bool {
        self.entries.get(key).is_some_and(SeriesEntry::is_fetching)
    }

    /// Marks `key` as used at `now`, creating a pending entry if needed.
    pub fn touch(&mut self, key: &SeriesKey, now: AppInstant) {
        self.entries
            .entry(key.clone())
            .or_insert_with(|| SeriesEntry::new(now))
            .last_used = now;
    }

    /// Registers a new request for `key`. Any request already in flight for
    /// the same key is dropped and can no longer complete.
    pub fn begin_request(
        &mut self,
        key: &SeriesKey,
        promise: Promise<SeriesResult>,
        now: AppInstant,
    ) -> u64 {
        let request_id = self.next_request_id;
        self.next_request_id += 1;

        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| SeriesEntry::new(now));
        entry.latest_request_id = request_id;
        entry.in_flight = Some(InFlight {
            request_id,
            promise,
        });
        entry.last_used = now;
        request_id
    }

    /// Drops the in-flight request for `key`, if any.
    pub fn cancel_request(&mut self, key: &SeriesKey) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.in_flight = None;
        }
    }

    pub fn cancel_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.in_flight = None;
        }
    }

    /// Applies every request that has finished. Returns true if any entry changed.
    pub fn poll_completions(&mut self, now: AppInstant) -> bool {
        let mut finished = Vec::new();
        for (key, entry) in self.entries.iter_mut() {
            let Some(in_flight) = entry.in_flight.take() else {
                continue;
            };
            match in_flight.promise.try_take() {
                Ok(result) => finished.push((key.clone(), in_flight.request_id, result)),
                Err(promise) => {
                    entry.in_flight = Some(InFlight {
                        request_id: in_flight.request_id,
                        promise,
                    })
                }
            }
        }

        let mut changed = false;
        for (key, request_id, result) in finished {
            changed |= self.apply_completion(&key, request_id, result, now);
        }
        changed
    }

    /// Stores `result` under `key` unless it is stale: the request was
    /// superseded, or the series belongs to a different key.
    pub fn apply_completion(
        &mut self,
        key: &SeriesKey,
        request_id: u64,
        result: SeriesResult,
        now: AppInstant,
    ) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            return false;
        };

        let mismatched_key = matches!(&result, Ok(series) if series.key != *key);
        if request_id != entry.latest_request_id || mismatched_key {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_stale_discards {
                log::info!(
                    "[chart] discarded stale response for {} (request {}, latest {})",
                    key,
                    request_id,
                    entry.latest_request_id
                );
            }
            return false;
        }

        if let Some(in_flight) = &entry.in_flight {
            if in_flight.request_id == request_id {
                entry.in_flight = None;
            }
        }
        match &result {
            Ok(series) => entry.last_ready = Some(series.clone()),
            Err(e) => log::warn!("Chart refresh for {} failed: {:?}", key, e),
        }
        entry.state.apply(result);
        entry.last_updated = Some(now);
        entry.last_used = now;
        true
    }

    /// Removes idle entries other than `active`. Returns how many were removed.
    pub fn evict_inactive(&mut self, active: &SeriesKey, now: AppInstant) -> usize {
        let ttl = self.inactive_ttl;
        let before = self.entries.len();
        self.entries.retain(|key, entry| {
            key == active
                || entry.is_fetching()
                || now.saturating_duration_since(entry.last_used) < ttl
        });
        let evicted = before - self.entries.len();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_cache_events && evicted > 0 {
            log::info!("[chart] evicted {} inactive series", evicted);
        }
        evicted
    }
}
