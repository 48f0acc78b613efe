//! Generates random, internally consistent divisions to exercise the
//! analyzer on inputs larger than hand-written fixtures.

use crate::core::division::{Division, DivisionError};
use crate::core::team::TeamRecord;
use rand::Rng;

/// Configuration for generating a random division.
#[derive(Debug, Clone)]
pub struct RandomDivisionConfig {
    /// Number of teams in the division.
    pub team_count: usize,
    /// Upper bound (inclusive) on games left between any two teams.
    pub max_games_per_pair: u32,
    /// Upper bound (inclusive) on current wins of any team.
    pub max_wins: u32,
}

impl Default for RandomDivisionConfig {
    fn default() -> Self {
        Self {
            team_count: 5,
            max_games_per_pair: 6,
            max_wins: 90,
        }
    }
}

/// Generate a random division with a symmetric schedule.
pub fn generate_random_division(config: &RandomDivisionConfig) -> Result<Division, DivisionError> {
    generate_with_rng(config, &mut rand::thread_rng())
}

/// Same as [`generate_random_division`] with a caller-supplied RNG, so
/// benchmarks and tests can seed it.
pub fn generate_with_rng<R: Rng>(
    config: &RandomDivisionConfig,
    rng: &mut R,
) -> Result<Division, DivisionError> {
    let n = config.team_count;
    let mut schedule = vec![vec![0u32; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let games = rng.gen_range(0..=config.max_games_per_pair);
            schedule[i][j] = games;
            schedule[j][i] = games;
        }
    }

    let teams = schedule
        .into_iter()
        .enumerate()
        .map(|(i, games_against)| {
            let wins = rng.gen_range(0..=config.max_wins);
            let losses = rng.gen_range(0..=config.max_wins);
            let remaining = games_against.iter().sum();
            TeamRecord::new(format!("TEAM-{:02}", i), wins, losses, remaining, games_against)
        })
        .collect();

    Division::new(teams)
}
