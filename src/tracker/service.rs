use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use tracing::{error, info, instrument, warn};

use super::detector::MatchEvent;
use super::{aggregator, alerts, detector};
use crate::notify::Notifier;
use crate::render;
use crate::roster::Roster;
use crate::snapshot::MatchDataSource;
use crate::state::{PlayerState, StateRepository, StateStore};

/// Counters for one polling cycle, mostly for logging and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    pub players_checked: usize,
    pub snapshots_received: usize,
    pub starts: usize,
    pub ends: usize,
    pub alerts: usize,
}

/// Orchestrates one polling cycle across the roster and exposes the
/// read-only query surface for the chat frontend.
pub struct TrackerService {
    roster: Roster,
    store: StateStore,
    source: Arc<dyn MatchDataSource>,
    notifier: Arc<dyn Notifier>,
    repository: Arc<dyn StateRepository>,
    chat_id: i64,
}

impl TrackerService {
    pub fn new(
        roster: Roster,
        store: StateStore,
        source: Arc<dyn MatchDataSource>,
        notifier: Arc<dyn Notifier>,
        repository: Arc<dyn StateRepository>,
        chat_id: i64,
    ) -> Self {
        Self {
            roster,
            store,
            source,
            notifier,
            repository,
            chat_id,
        }
    }

    /// One polling cycle: fetch every player's latest match, detect
    /// transitions, update statistics, send notifications, persist.
    ///
    /// Fetches run concurrently, but all state mutation happens afterwards
    /// under a single write guard so the store only ever has one writer.
    /// Nothing in here aborts the tick: fetch failures become `None`
    /// snapshots and delivery or persistence failures are logged.
    #[instrument(skip(self))]
    pub async fn run_tick(&self) -> TickSummary {
        let mut summary = TickSummary::default();

        let fetches = join_all(self.roster.entries().iter().map(|entry| async move {
            (entry, self.source.fetch_last_match(entry.id).await)
        }))
        .await;

        let mut mutated = false;
        {
            let mut states = self.store.write().await;

            for (entry, snapshot) in fetches {
                summary.players_checked += 1;
                if snapshot.is_some() {
                    summary.snapshots_received += 1;
                }

                let Some(state) = states.get_mut(&entry.name) else {
                    continue;
                };

                let rating_seen = state.last_known_rating;
                let event = detector::detect(state, entry.id, snapshot.as_ref());
                if state.last_known_rating != rating_seen {
                    mutated = true;
                }

                match (event, snapshot.as_ref()) {
                    (MatchEvent::Started, Some(snapshot)) => {
                        mutated = true;
                        summary.starts += 1;
                        info!(
                            player = %entry.name,
                            match_id = ?snapshot.match_id,
                            "Detected match start"
                        );
                        let text = render::match_start(
                            &entry.name,
                            snapshot,
                            entry.id,
                            state.rating_before_current_match,
                        );
                        self.deliver(&text).await;
                    }
                    (
                        MatchEvent::Ended {
                            rating_before,
                            rating_after,
                            outcome,
                        },
                        Some(snapshot),
                    ) => {
                        mutated = true;
                        summary.ends += 1;
                        let record = aggregator::record_match_end(
                            state,
                            entry.id,
                            snapshot,
                            outcome,
                            rating_before,
                            rating_after,
                            Utc::now(),
                        );
                        let extra = alerts::evaluate(state, &entry.name, rating_after);
                        summary.alerts += extra.len();
                        info!(
                            player = %entry.name,
                            outcome = %record.outcome,
                            delta = ?record.rating_delta,
                            "Detected match end"
                        );
                        let text = render::match_end(&entry.name, snapshot, &record);
                        self.deliver(&text).await;
                        for alert in extra {
                            self.deliver(&alert).await;
                        }
                    }
                    _ => {}
                }
            }
        }

        if mutated {
            let all = self.store.all().await;
            if let Err(e) = self.repository.save(&all).await {
                warn!(error = %e, "Failed to persist state after tick, continuing in memory");
            }
        }

        summary
    }

    async fn deliver(&self, text: &str) {
        if let Err(e) = self.notifier.notify(self.chat_id, text).await {
            error!(error = %e, "Failed to deliver notification");
        }
    }

    // ----- query surface (read-only, consumed by the chat frontend) -----

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub async fn player_state(&self, name: &str) -> Option<PlayerState> {
        self.store.get(name).await
    }

    pub async fn live_status(&self, name: &str) -> Option<String> {
        let id = self.roster.id_for(name)?;
        let profile_url = self.roster.profile_url(name)?;
        let snapshot = self.source.fetch_last_match(id).await;
        Some(render::live_status(name, snapshot.as_ref(), id, &profile_url))
    }

    pub async fn basic_stats(&self, name: &str) -> Option<String> {
        let id = self.roster.id_for(name)?;
        let profile_url = self.roster.profile_url(name)?;
        let state = self.store.get(name).await?;
        let last_match = self.source.fetch_last_match(id).await;
        Some(render::basic_stats(
            name,
            &state,
            last_match.as_ref(),
            id,
            &profile_url,
        ))
    }

    pub async fn history(&self, name: &str, limit: usize) -> Option<String> {
        let id = self.roster.id_for(name)?;
        let profile_url = self.roster.profile_url(name)?;
        let matches = self.source.fetch_recent_matches(id, limit).await;
        Some(render::history(name, &matches, id, &profile_url))
    }

    pub async fn leaderboard(&self) -> String {
        let states = self.store.all().await;
        let rows: Vec<(String, Option<i32>)> = self
            .roster
            .entries()
            .iter()
            .map(|entry| {
                (
                    entry.name.clone(),
                    states
                        .get(&entry.name)
                        .and_then(|state| state.last_known_rating),
                )
            })
            .collect();
        render::leaderboard(&rows)
    }
}
