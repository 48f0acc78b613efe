use crate::core::division::Division;
use crate::core::team::TeamName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Proof that a team is eliminated: a subset R of the other teams whose
/// current wins plus the games left among themselves exceed what |R|
/// teams can absorb while each stays at or below the target's best total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    /// Team names in division order.
    pub teams: Vec<TeamName>,
    /// Sum of current wins over R.
    pub total_wins: u64,
    /// Games left between members of R, each game counted once.
    pub games_among: u64,
}

impl Certificate {
    /// Collect the certificate numbers for the given team indices.
    pub fn from_indices(division: &Division, indices: &[usize]) -> Self {
        let total_wins = indices.iter().map(|&i| u64::from(division.wins(i))).sum();

        let mut games_among = 0u64;
        for (pos, &i) in indices.iter().enumerate() {
            for &j in &indices[pos + 1..] {
                games_among += u64::from(division.games_between(i, j));
            }
        }

        Self {
            teams: indices.iter().map(|&i| division.name(i).clone()).collect(),
            total_wins,
            games_among,
        }
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.teams.iter().any(|t| t.as_str() == name)
    }

    /// Average final wins forced on the members of R.
    pub fn average_wins(&self) -> f64 {
        if self.teams.is_empty() {
            return 0.0;
        }
        (self.total_wins + self.games_among) as f64 / self.teams.len() as f64
    }

    /// Whether R really forces some member above `max_possible_wins`:
    /// `(wins(R) + games(R)) / |R| > max_possible_wins`, checked exactly.
    pub fn is_sound(&self, max_possible_wins: u32) -> bool {
        !self.teams.is_empty()
            && self.total_wins + self.games_among
                > u64::from(max_possible_wins) * self.teams.len() as u64
    }
}

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.teams.iter().map(|t| t.as_str()).collect();
        write!(f, "{{ {} }}", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn classic() -> Division {
        Division::parse(
            "4
Atlanta       83 71  8  0 1 6 1
Philadelphia  80 79  3  1 0 0 2
NewYork       78 78  6  6 0 0 0
Montreal      77 82  3  1 2 0 0
",
        )
        .unwrap()
    }

    #[test]
    fn test_certificate_numbers() {
        let division = classic();
        let cert = Certificate::from_indices(&division, &[0, 2]);
        assert_eq!(cert.total_wins, 161);
        assert_eq!(cert.games_among, 6);
        assert_relative_eq!(cert.average_wins(), 83.5);
        assert!(cert.is_sound(83));
        assert!(!cert.is_sound(84));
        assert!(cert.contains("NewYork"));
        assert_eq!(cert.to_string(), "{ Atlanta, NewYork }");
    }

    #[test]
    fn test_empty_certificate_is_not_sound() {
        let division = classic();
        let cert = Certificate::from_indices(&division, &[]);
        assert!(cert.is_empty());
        assert!(!cert.is_sound(0));
        assert_relative_eq!(cert.average_wins(), 0.0);
    }
}
