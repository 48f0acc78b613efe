use crate::core::team::{TeamName, TeamRecord};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while loading or validating a division.
#[derive(Debug, Error)]
pub enum DivisionError {
    #[error("cannot read division file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("the input is empty")]
    Empty,
    #[error("line 1: expected a team count, got '{0}'")]
    InvalidTeamCount(String),
    #[error("at least two teams are required, got {0}")]
    TooFewTeams(usize),
    #[error("line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
    #[error("expected {expected} teams, found {found}")]
    TeamCountMismatch { expected: usize, found: usize },
    #[error("team {team} lists {found} schedule entries, expected {expected}")]
    ScheduleLength {
        team: TeamName,
        expected: usize,
        found: usize,
    },
    #[error("team {team} has {expected} games remaining but its schedule sums to {found}")]
    GamesSumMismatch {
        team: TeamName,
        expected: u32,
        found: u64,
    },
    #[error("team {team} cannot finish with {wins} + {remaining} wins without overflowing")]
    WinsOverflow {
        team: TeamName,
        wins: u32,
        remaining: u32,
    },
    #[error("team {0} is scheduled to play against itself")]
    SelfGames(TeamName),
    #[error("schedule is not symmetric: {a} has {a_vs_b} games against {b}, {b} has {b_vs_a} against {a}")]
    AsymmetricSchedule {
        a: TeamName,
        b: TeamName,
        a_vs_b: u32,
        b_vs_a: u32,
    },
    #[error("team {0} appears more than once")]
    DuplicateTeam(TeamName),
}

/// A validated table of team records.
///
/// Construction is the only place the schedule is checked: every row has
/// one entry per team, nobody plays themselves, rows sum to the remaining
/// games, and the matrix is symmetric. Once built a division is immutable
/// and can be shared read-only by any number of analyses.
///
/// # Examples
///
/// ```
/// use division_elimination::core::division::Division;
///
/// let division: Division = "2\nAlpha 10 5 1 0 1\nBeta 9 6 1 1 0\n".parse().unwrap();
/// assert_eq!(division.len(), 2);
/// assert_eq!(division.max_possible_wins(0), 11);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Division {
    teams: Vec<TeamRecord>,
}

impl Division {
    /// Build a division from records, validating the schedule.
    pub fn new(teams: Vec<TeamRecord>) -> Result<Self, DivisionError> {
        if teams.len() < 2 {
            return Err(DivisionError::TooFewTeams(teams.len()));
        }
        let n = teams.len();

        let mut seen = HashSet::new();
        for team in &teams {
            if !seen.insert(team.name()) {
                return Err(DivisionError::DuplicateTeam(team.name().clone()));
            }
            if team.games_against().len() != n {
                return Err(DivisionError::ScheduleLength {
                    team: team.name().clone(),
                    expected: n,
                    found: team.games_against().len(),
                });
            }
        }

        for (i, team) in teams.iter().enumerate() {
            if team.games_against_team(i) != 0 {
                return Err(DivisionError::SelfGames(team.name().clone()));
            }
            if team.wins().checked_add(team.games_remaining()).is_none() {
                return Err(DivisionError::WinsOverflow {
                    team: team.name().clone(),
                    wins: team.wins(),
                    remaining: team.games_remaining(),
                });
            }
            let scheduled = team.scheduled_games();
            if scheduled != u64::from(team.games_remaining()) {
                return Err(DivisionError::GamesSumMismatch {
                    team: team.name().clone(),
                    expected: team.games_remaining(),
                    found: scheduled,
                });
            }
        }

        for i in 0..n {
            for j in (i + 1)..n {
                let a_vs_b = teams[i].games_against_team(j);
                let b_vs_a = teams[j].games_against_team(i);
                if a_vs_b != b_vs_a {
                    return Err(DivisionError::AsymmetricSchedule {
                        a: teams[i].name().clone(),
                        b: teams[j].name().clone(),
                        a_vs_b,
                        b_vs_a,
                    });
                }
            }
        }

        Ok(Self { teams })
    }

    /// Parse the line-oriented text format.
    ///
    /// The first line holds the team count; each following non-empty line is
    /// `name wins losses remaining g_0 .. g_{n-1}`.
    pub fn parse(input: &str) -> Result<Self, DivisionError> {
        let mut lines = input.lines().enumerate();

        let (_, header) = lines
            .by_ref()
            .find(|(_, line)| !line.trim().is_empty())
            .ok_or(DivisionError::Empty)?;
        let expected: usize = header
            .trim()
            .parse()
            .map_err(|_| DivisionError::InvalidTeamCount(header.trim().to_string()))?;
        if expected < 2 {
            return Err(DivisionError::TooFewTeams(expected));
        }

        let mut teams = Vec::new();
        for (idx, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            teams.push(parse_team_line(line, idx + 1, expected)?);
        }

        if teams.len() != expected {
            return Err(DivisionError::TeamCountMismatch {
                expected,
                found: teams.len(),
            });
        }

        Self::new(teams)
    }

    /// Read and parse a division file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DivisionError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DivisionError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn teams(&self) -> &[TeamRecord] {
        &self.teams
    }

    pub fn team(&self, index: usize) -> Option<&TeamRecord> {
        self.teams.get(index)
    }

    /// Position of the team with the given name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.teams.iter().position(|t| t.name().as_str() == name)
    }

    /// Name of the team at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn name(&self, index: usize) -> &TeamName {
        self.teams[index].name()
    }

    /// Wins of the team at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn wins(&self, index: usize) -> u32 {
        self.teams[index].wins()
    }

    /// Games left between teams `i` and `j`.
    pub fn games_between(&self, i: usize, j: usize) -> u32 {
        self.teams.get(i).map_or(0, |t| t.games_against_team(j))
    }

    /// Current wins plus every remaining game of the team at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn max_possible_wins(&self, index: usize) -> u32 {
        self.teams[index].max_possible_wins()
    }

    /// Games still to be played in the whole division, each counted once.
    pub fn total_games_remaining(&self) -> u64 {
        let doubled: u64 = self.teams.iter().map(|t| u64::from(t.games_remaining())).sum();
        doubled / 2
    }
}

fn parse_team_line(line: &str, line_no: usize, team_count: usize) -> Result<TeamRecord, DivisionError> {
    let malformed = |reason: String| DivisionError::MalformedLine {
        line: line_no,
        reason,
    };

    let mut fields = line.split_whitespace();
    let name = fields
        .next()
        .ok_or_else(|| malformed("missing team name".to_string()))?;

    let mut numbers = Vec::new();
    for field in fields {
        let value = u32::from_str(field)
            .map_err(|_| malformed(format!("'{}' is not a non-negative integer", field)))?;
        numbers.push(value);
    }

    if numbers.len() < 3 {
        return Err(malformed(format!(
            "expected wins, losses and remaining games for team {}",
            name
        )));
    }
    let schedule = &numbers[3..];
    if schedule.len() != team_count {
        return Err(malformed(format!(
            "team {} lists {} schedule entries, expected {}",
            name,
            schedule.len(),
            team_count
        )));
    }

    Ok(TeamRecord::new(
        name,
        numbers[0],
        numbers[1],
        numbers[2],
        schedule.to_vec(),
    ))
}

impl FromStr for Division {
    type Err = DivisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Writes the same text format that [`Division::parse`] reads.
impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.teams.len())?;
        for team in &self.teams {
            write!(
                f,
                "{} {} {} {}",
                team.name(),
                team.wins(),
                team.losses(),
                team.games_remaining()
            )?;
            for games in team.games_against() {
                write!(f, " {}", games)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
