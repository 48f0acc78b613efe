//! The classic four-team division.
//!
//! Shows a team that is only eliminated by a combination of rivals, and how
//! the certificate proves it.

use division_elimination::core::division::Division;
use division_elimination::elimination::analyzer::{AnalyzerConfig, EliminationAnalyzer, Verdict};

const DIVISION: &str = "4
Atlanta       83 71  8  0 1 6 1
Philadelphia  80 79  3  1 0 0 2
NewYork       78 78  6  6 0 0 0
Montreal      77 82  3  1 2 0 0
";

fn main() {
    let division: Division = match DIVISION.parse() {
        Ok(division) => division,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("━━━ Standings ━━━\n");
    for team in division.teams() {
        println!(
            "  {:<14} {:>3} wins {:>3} losses {:>2} left (best case {})",
            team.name(),
            team.wins(),
            team.losses(),
            team.games_remaining(),
            team.max_possible_wins()
        );
    }
    println!();

    let analyzer = EliminationAnalyzer::new(&division).with_config(AnalyzerConfig { verbose: true });
    let report = match analyzer.analyze_all() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("━━━ Verdicts ━━━\n");
    print!("{}", report);

    println!("━━━ Certificates ━━━\n");
    for analysis in &report.teams {
        if let Verdict::Eliminated { certificate } = &analysis.verdict {
            println!(
                "  {} can reach {} wins, but {} must average {:.2} wins among themselves",
                analysis.team,
                analysis.max_possible_wins,
                certificate,
                certificate.average_wins()
            );
        }
    }
}
