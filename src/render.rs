//! Text rendering for notifications and on-demand summaries.
//!
//! All texts are plain strings for the notification port; the chat frontend
//! decides how to present them. When the API has no data the summaries fall
//! back to a short notice plus the player's direct profile link instead of
//! pretending to know anything.

use crate::roster::PlayerId;
use crate::snapshot::MatchSnapshot;
use crate::state::{MatchOutcome, MatchRecord, PlayerState};

fn outcome_label(outcome: MatchOutcome) -> &'static str {
    match outcome {
        MatchOutcome::Win => "Win",
        MatchOutcome::Loss => "Loss",
        MatchOutcome::Unknown => "Unentschieden / Ergebnis unbekannt",
    }
}

pub fn match_start(
    name: &str,
    snapshot: &MatchSnapshot,
    player: PlayerId,
    rating_before: Option<i32>,
) -> String {
    let mut lines = vec![
        format!("🎮 {name} hat ein neues Match gestartet!"),
        format!(
            "📋 Ladder: {}",
            snapshot.leaderboard.as_deref().unwrap_or("Unbekannt")
        ),
        format!(
            "🗺 Karte: {}",
            snapshot.map_name.as_deref().unwrap_or("Unbekannt")
        ),
    ];
    if let Some(civ) = snapshot.civilization_for(player) {
        lines.push(format!("🧬 Civ: {civ}"));
    }
    if let Some(rating) = rating_before {
        lines.push(format!("⭐ Elo vor Start: {rating}"));
    }
    if let Some(started) = &snapshot.started_at {
        lines.push(format!("⏱ Start: {started}"));
    }
    if let Some(id) = &snapshot.match_id {
        lines.push(format!("🆔 Match-ID: {id}"));
    }
    lines.join("\n")
}

pub fn match_end(name: &str, snapshot: &MatchSnapshot, record: &MatchRecord) -> String {
    let mut lines = vec![
        format!("🏁 Match beendet für {name}"),
        format!(
            "📋 Ladder: {}",
            snapshot.leaderboard.as_deref().unwrap_or("Unbekannt")
        ),
        format!(
            "🗺 Karte: {}",
            record.map_name.as_deref().unwrap_or("Unbekannt")
        ),
        format!("🏆 Ergebnis: {}", outcome_label(record.outcome)),
    ];
    if let Some(civ) = &record.civilization {
        lines.push(format!("🧬 Civ: {civ}"));
    }
    if let Some(diff_text) = rating_diff_line(record) {
        lines.push(diff_text);
    }
    if let Some(id) = &record.match_id {
        lines.push(format!("🆔 Match-ID: {id}"));
    }
    lines.join("\n")
}

fn rating_diff_line(record: &MatchRecord) -> Option<String> {
    match (record.rating_delta, record.rating_after) {
        (Some(diff), Some(after)) if diff > 0 => Some(format!("🔺 +{diff} Elo (jetzt {after})")),
        (Some(diff), Some(after)) if diff < 0 => Some(format!("🔻 {diff} Elo (jetzt {after})")),
        (Some(_), Some(after)) => Some(format!("➖ Elo unverändert ({after})")),
        (None, Some(after)) => Some(format!("⭐ Elo jetzt: {after}")),
        _ => None,
    }
}

pub fn live_status(
    name: &str,
    snapshot: Option<&MatchSnapshot>,
    player: PlayerId,
    profile_url: &str,
) -> String {
    let Some(snapshot) = snapshot else {
        return format!(
            "📡 Live-Status für {name}\n\
             Zurzeit konnten keine Matchdaten vom API geladen werden.\n\
             Entweder existiert noch kein Match oder der Dienst ist nicht erreichbar.\n\n\
             🔗 Direktes Profil: {profile_url}"
        );
    };

    let mut lines = vec![
        format!("📡 Live-Status für {name}"),
        format!(
            "📋 Ladder: {}",
            snapshot.leaderboard.as_deref().unwrap_or("Unbekannt")
        ),
        format!(
            "🗺 Karte: {}",
            snapshot.map_name.as_deref().unwrap_or("Unbekannt")
        ),
        format!("🔁 Läuft: {}", if snapshot.ongoing { "Ja" } else { "Nein" }),
    ];
    if let Some(civ) = snapshot.civilization_for(player) {
        lines.push(format!("🧬 Civ: {civ}"));
    }
    if let Some(rating) = snapshot.rating_for(player) {
        lines.push(format!("⭐ Aktuelles Elo (Matchdaten): {rating}"));
    }
    if let Some(started) = &snapshot.started_at {
        lines.push(format!("⏱ Start: {started}"));
    }
    lines.push(format!("🔗 Profil: {profile_url}"));
    lines.join("\n")
}

pub fn basic_stats(
    name: &str,
    state: &PlayerState,
    last_match: Option<&MatchSnapshot>,
    player: PlayerId,
    profile_url: &str,
) -> String {
    let rating_text = state
        .last_known_rating
        .or_else(|| last_match.and_then(|m| m.rating_for(player)))
        .map(|r| r.to_string())
        .unwrap_or_else(|| "unbekannt".to_string());

    let streak_text = match state.streak {
        s if s > 0 => format!("🔥 {s} Wins in Folge"),
        s if s < 0 => format!("⚠️ {} Losses in Folge", s.abs()),
        _ => "keine Serie aktuell".to_string(),
    };

    let mut lines = vec![
        format!("📊 Basic Stats für {name}"),
        format!("⭐ Elo (zuletzt bekannt): {rating_text}"),
    ];

    if let Some(m) = last_match {
        lines.push(format!(
            "🗺 Letzte Map: {}",
            m.map_name.as_deref().unwrap_or("Unbekannt")
        ));
        if let Some(civ) = m.civilization_for(player) {
            lines.push(format!("🧬 Letzte Civ: {civ}"));
        }
        if let Some(started) = &m.started_at {
            lines.push(format!("⏱ Letztes Match: {started}"));
        }
    } else {
        lines.push(
            "ℹ️ Es konnten keine Matchdaten geladen werden (API liefert keine Daten oder der Dienst ist nicht erreichbar)."
                .to_string(),
        );
    }

    if !state.civ_stats.is_empty() {
        let mut civs: Vec<_> = state.civ_stats.iter().collect();
        civs.sort_by(|a, b| {
            (b.1.wins + b.1.losses)
                .cmp(&(a.1.wins + a.1.losses))
                .then(a.0.cmp(b.0))
        });
        let top: Vec<String> = civs
            .into_iter()
            .take(3)
            .map(|(civ, tally)| format!("{civ} {}W/{}L", tally.wins, tally.losses))
            .collect();
        lines.push(format!("🧬 Top Civs: {}", top.join(", ")));
    }

    lines.push(format!("📈 Streak: {streak_text}"));
    lines.push(format!("🔗 Profil: {profile_url}"));
    lines.join("\n")
}

pub fn history(
    name: &str,
    matches: &[MatchSnapshot],
    player: PlayerId,
    profile_url: &str,
) -> String {
    if matches.is_empty() {
        return format!(
            "📜 Match-History – {name}\n\n\
             Zurzeit konnten keine Matchdaten vom API geladen werden (leere Antwort oder Fehler).\n\n\
             🔗 Schau direkt im Profil nach:\n{profile_url}"
        );
    }

    let mut lines = vec![format!("📜 Letzte Matches – {name}")];
    for m in matches {
        let mut parts = vec![m.map_name.clone().unwrap_or_else(|| "Unbekannt".to_string())];
        if let Some(civ) = m.civilization_for(player) {
            parts.push(format!("Civ: {civ}"));
        }
        if let Some(rating) = m.rating_for(player) {
            parts.push(format!("Elo: {rating}"));
        }
        if let Some(started) = &m.started_at {
            parts.push(started.clone());
        }
        lines.push(format!("• {}", parts.join(" – ")));
    }
    lines.push(format!("\n🔗 Mehr Details: {profile_url}"));
    lines.join("\n")
}

/// Leaderboard over the last known ratings. Players the tracker has never
/// seen a rating for sort below everyone else.
pub fn leaderboard(rows: &[(String, Option<i32>)]) -> String {
    let mut sorted: Vec<&(String, Option<i32>)> = rows.iter().collect();
    sorted.sort_by(|a, b| b.1.unwrap_or(i32::MIN).cmp(&a.1.unwrap_or(i32::MIN)));

    let mut lines = vec!["🏆 Gruppen-Leaderboard (letzte bekannte Elo):".to_string()];
    for (name, rating) in sorted {
        let rating_text = rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| "unbekannt".to_string());
        lines.push(format!("• {name}: {rating_text}"));
    }
    lines.join("\n")
}
