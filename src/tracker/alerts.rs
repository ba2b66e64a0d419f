/// Supplementary alerting, evaluated after the aggregator on every match end.
///
/// Streak alerts are deliberately debounced by resetting the counter when
/// they fire: without the reset, every loss beyond the threshold would
/// trigger the tilt warning again. Rating-threshold alerts are one-shot for
/// the process lifetime, even if the rating later drops below and climbs
/// back over the line.
use crate::state::PlayerState;

/// Wins in a row before the celebration message fires.
pub const WIN_STREAK_THRESHOLD: i32 = 3;

pub fn evaluate(state: &mut PlayerState, name: &str, rating_after: Option<i32>) -> Vec<String> {
    let mut alerts = Vec::new();

    if state.streak <= -state.tilt_threshold {
        alerts.push(format!(
            "⚠️ Tilt-Warnung: {name} hat {} Niederlagen in Folge! Zeit für eine Pause?",
            state.streak.abs()
        ));
        state.streak = 0;
    } else if state.streak >= WIN_STREAK_THRESHOLD {
        alerts.push(format!(
            "🔥 {name} ist on fire: {} Siege in Folge!",
            state.streak
        ));
        state.streak = 0;
    }

    if let Some(rating) = rating_after {
        let newly_reached: Vec<i32> = state
            .elo_alert_thresholds
            .iter()
            .copied()
            .filter(|threshold| {
                rating >= *threshold && !state.triggered_elo_alerts.contains(threshold)
            })
            .collect();
        for threshold in newly_reached {
            alerts.push(format!(
                "🏅 {name} hat die {threshold}-Elo-Marke erreicht (aktuell {rating})!"
            ));
            state.triggered_elo_alerts.insert(threshold);
        }
    }

    alerts
}
