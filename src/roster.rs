use serde::{Deserialize, Serialize};

/// External numeric profile id on the stats site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One tracked player: display name plus their external profile id.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub name: String,
    pub id: PlayerId,
}

/// The fixed set of tracked players.
///
/// Iteration order is the declaration order and stays stable for the process
/// lifetime; the polling tick and the leaderboard both rely on it as the
/// source of truth for who exists.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn new(entries: Vec<(String, u64)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, id)| RosterEntry {
                    name,
                    id: PlayerId(id),
                })
                .collect(),
        }
    }

    /// The friend group this deployment watches.
    pub fn default_friends() -> Self {
        Self::new(vec![
            ("EDM7101".to_string(), 10770866),
            ("JustForFun".to_string(), 10769949),
            ("rollthedice".to_string(), 10775508),
        ])
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn id_for(&self, name: &str) -> Option<PlayerId> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.id)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.id_for(name).is_some()
    }

    /// Direct profile link, shown as a fallback whenever the API has no data.
    pub fn profile_url(&self, name: &str) -> Option<String> {
        self.id_for(name)
            .map(|id| format!("https://www.aoe2insights.com/user/{id}/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_preserves_declaration_order() {
        let roster = Roster::new(vec![
            ("Charlie".to_string(), 3),
            ("Alice".to_string(), 1),
            ("Bob".to_string(), 2),
        ]);

        let names: Vec<&str> = roster.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Charlie", "Alice", "Bob"]);
    }

    #[test]
    fn resolves_ids_and_profile_urls() {
        let roster = Roster::new(vec![("Alice".to_string(), 42)]);

        assert_eq!(roster.id_for("Alice"), Some(PlayerId(42)));
        assert_eq!(roster.id_for("Nobody"), None);
        assert_eq!(
            roster.profile_url("Alice").as_deref(),
            Some("https://www.aoe2insights.com/user/42/")
        );
        assert!(roster.profile_url("Nobody").is_none());
    }
}
