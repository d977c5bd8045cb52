use std::collections::HashMap;

use crate::model::team::Team;

/// Id → abbreviation lookup built from one fetched team list.
///
/// The schedule handler builds a fresh directory per request; whether to
/// cache one is a decision for the caller, not this type.
#[derive(Debug, Default)]
pub struct TeamDirectory {
    abbreviations: HashMap<i64, String>,
}

impl TeamDirectory {
    pub fn from_teams(teams: &[Team]) -> Self {
        let abbreviations = teams
            .iter()
            .map(|t| (t.id, t.abbreviation.clone()))
            .collect();
        Self { abbreviations }
    }

    pub fn lookup(&self, id: i64) -> Option<&str> {
        self.abbreviations.get(&id).map(|s| s.as_str())
    }
}
