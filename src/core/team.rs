use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a team in a division.
///
/// Names are unique within a division and are what verdicts and
/// certificates report, so results never depend on row order.
///
/// # Examples
///
/// ```
/// use division_elimination::core::team::TeamName;
///
/// let atlanta = TeamName::new("Atlanta");
/// let montreal = TeamName::new("Montreal");
/// assert_ne!(atlanta, montreal);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamName(String);

impl TeamName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TeamName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Standing of a single team: its record so far and the games it still
/// has to play against every team of the division (indexed by team).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    name: TeamName,
    wins: u32,
    losses: u32,
    games_remaining: u32,
    /// `games_against[j]` is the number of games left against team `j`.
    games_against: Vec<u32>,
}

impl TeamRecord {
    pub fn new(
        name: impl Into<TeamName>,
        wins: u32,
        losses: u32,
        games_remaining: u32,
        games_against: Vec<u32>,
    ) -> Self {
        Self {
            name: name.into(),
            wins,
            losses,
            games_remaining,
            games_against,
        }
    }

    // --- Accessors ---

    pub fn name(&self) -> &TeamName {
        &self.name
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    pub fn games_remaining(&self) -> u32 {
        self.games_remaining
    }

    pub fn games_against(&self) -> &[u32] {
        &self.games_against
    }

    /// Games left against the team at `other`, zero when out of range.
    pub fn games_against_team(&self, other: usize) -> u32 {
        self.games_against.get(other).copied().unwrap_or(0)
    }

    /// Best final win total: every remaining game won. Saturates at
    /// `u32::MAX`; [`Division`](crate::core::division::Division) rejects
    /// records where that would happen.
    pub fn max_possible_wins(&self) -> u32 {
        self.wins.saturating_add(self.games_remaining)
    }

    /// Sum of the per-opponent schedule.
    pub fn scheduled_games(&self) -> u64 {
        self.games_against.iter().map(|&g| u64::from(g)).sum()
    }
}

impl From<String> for TeamName {
    fn from(s: String) -> Self {
        Self(s)
    }
}
