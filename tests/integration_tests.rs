use division_elimination::core::division::{Division, DivisionError};
use division_elimination::core::team::{TeamName, TeamRecord};
use division_elimination::elimination::analyzer::{
    AnalyzerConfig, EliminationAnalyzer, Verdict,
};
use division_elimination::elimination::network::EliminationNetwork;
use division_elimination::elimination::observer::{AnalysisObserver, LogObserver};
use division_elimination::elimination::certificate::Certificate;
use division_elimination::graph::max_flow::MaxFlowSolver;
use std::cell::RefCell;

const CLASSIC_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/division4.txt");
const FIVE_TEAM_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/division5.txt");

fn names(teams: &[TeamName]) -> Vec<&str> {
    teams.iter().map(|t| t.as_str()).collect()
}

/// Full pipeline test: file → division → networks → max flow → verdicts.
#[test]
fn full_pipeline_classic_division() {
    let division = Division::from_file(CLASSIC_PATH).unwrap();
    assert_eq!(division.len(), 4);

    let analyzer = EliminationAnalyzer::new(&division).with_observer(LogObserver);
    let report = analyzer.analyze_all().unwrap();

    assert_eq!(report.get("Atlanta").unwrap().verdict, Verdict::NotEliminated);
    assert_eq!(report.get("NewYork").unwrap().verdict, Verdict::NotEliminated);

    match &report.get("Philadelphia").unwrap().verdict {
        Verdict::Eliminated { certificate } => {
            assert_eq!(names(&certificate.teams), vec!["Atlanta", "NewYork"]);
            assert!(certificate.is_sound(83));
        }
        other => panic!("Philadelphia should be eliminated, got {:?}", other),
    }

    match &report.get("Montreal").unwrap().verdict {
        Verdict::TriviallyEliminated { by } => assert_eq!(names(by), vec!["Atlanta"]),
        other => panic!("Montreal should be trivially eliminated, got {:?}", other),
    }
}

/// The max flow for Philadelphia leaves one Atlanta–NewYork game unplaced.
#[test]
fn philadelphia_flow_numbers() {
    let division = Division::from_file(CLASSIC_PATH).unwrap();
    let network = EliminationNetwork::build(&division, 1).unwrap();
    let mut solver = MaxFlowSolver::new(network.graph(), network.source(), network.sink()).unwrap();

    assert_eq!(solver.compute_max_flow(), 6);
    assert_eq!(network.total_remaining_games(), 7);

    let cut = solver.min_cut();
    assert_eq!(cut.capacity(), 6);
    assert!(cut.contains(network.team_node(0).unwrap()));
    assert!(cut.contains(network.team_node(2).unwrap()));
    assert!(!cut.contains(network.team_node(3).unwrap()));
}

/// A team that has finished its season on top can still be passed by two
/// rivals who play each other often enough.
#[test]
fn finished_leader_can_be_overtaken() {
    let division = Division::new(vec![
        TeamRecord::new("Leader", 10, 4, 0, vec![0, 0, 0]),
        TeamRecord::new("Rival", 9, 2, 3, vec![0, 0, 3]),
        TeamRecord::new("Other", 9, 2, 3, vec![0, 3, 0]),
    ])
    .unwrap();
    let analysis = EliminationAnalyzer::new(&division).analyze_team(0).unwrap();

    match analysis.verdict {
        Verdict::Eliminated { certificate } => {
            assert_eq!(names(&certificate.teams), vec!["Rival", "Other"]);
            assert_eq!(certificate.total_wins, 18);
            assert_eq!(certificate.games_among, 3);
        }
        other => panic!("expected elimination, got {:?}", other),
    }

    // With one game fewer the leader survives on a tie
    let division = Division::new(vec![
        TeamRecord::new("Leader", 10, 4, 0, vec![0, 0, 0]),
        TeamRecord::new("Rival", 9, 2, 2, vec![0, 0, 2]),
        TeamRecord::new("Other", 9, 2, 2, vec![0, 2, 0]),
    ])
    .unwrap();
    let analysis = EliminationAnalyzer::new(&division).analyze_team(0).unwrap();
    assert_eq!(analysis.verdict, Verdict::NotEliminated);
}

/// Detroit can still pass each rival on its own, but the four of them
/// together must win more than 75 games on average.
#[test]
fn five_team_division_whole_group_certificate() {
    let division = Division::from_file(FIVE_TEAM_PATH).unwrap();
    assert_eq!(division.len(), 5);
    let detroit = division.index_of("Detroit").unwrap();
    assert_eq!(division.max_possible_wins(detroit), 75);

    let network = EliminationNetwork::build(&division, detroit).unwrap();
    let mut solver = MaxFlowSolver::new(network.graph(), network.source(), network.sink()).unwrap();
    assert_eq!(solver.compute_max_flow(), 22);
    assert_eq!(network.total_remaining_games(), 27);

    let report = EliminationAnalyzer::new(&division).analyze_all().unwrap();
    match &report.get("Detroit").unwrap().verdict {
        Verdict::Eliminated { certificate } => {
            assert_eq!(
                names(&certificate.teams),
                vec!["NewYork", "Baltimore", "Boston", "Toronto"]
            );
            assert_eq!(certificate.total_wins, 278);
            assert_eq!(certificate.games_among, 27);
            assert!(certificate.is_sound(75));
        }
        other => panic!("Detroit should be eliminated, got {:?}", other),
    }
    assert_eq!(report.get("NewYork").unwrap().verdict, Verdict::NotEliminated);
    assert_eq!(report.get("Baltimore").unwrap().verdict, Verdict::NotEliminated);
}

/// Observer sees the non-trivial path in order and nothing for trivial ones.
#[test]
fn observer_event_order() {
    #[derive(Default)]
    struct Trace(RefCell<Vec<&'static str>>);

    impl AnalysisObserver for Trace {
        fn on_trivial_elimination(&self, _team: &TeamName, _by: &[TeamName]) {
            self.0.borrow_mut().push("trivial");
        }
        fn on_network_built(&self, _team: &TeamName, _network: &EliminationNetwork) {
            self.0.borrow_mut().push("network");
        }
        fn on_flow_computed(&self, _team: &TeamName, _network: &EliminationNetwork, _solver: &MaxFlowSolver) {
            self.0.borrow_mut().push("flow");
        }
        fn on_certificate(&self, _team: &TeamName, _certificate: &Certificate) {
            self.0.borrow_mut().push("certificate");
        }
    }

    let division = Division::from_file(CLASSIC_PATH).unwrap();
    let trace = Trace::default();
    {
        let analyzer = EliminationAnalyzer::new(&division).with_observer(&trace);
        analyzer.analyze_team(1).unwrap();
        analyzer.analyze_team(3).unwrap();
    }
    assert_eq!(
        *trace.0.borrow(),
        vec!["network", "flow", "certificate", "trivial"]
    );
}

/// Loader errors are surfaced before any analysis.
#[test]
fn loader_rejects_bad_files() {
    assert!(matches!(
        Division::from_file("/no/such/division.txt"),
        Err(DivisionError::Io { .. })
    ));

    let path = std::env::temp_dir().join("division-elimination-empty.txt");
    std::fs::write(&path, "").unwrap();
    assert!(matches!(Division::from_file(&path), Err(DivisionError::Empty)));
    let _ = std::fs::remove_file(&path);

    let mismatch = "2\nAlpha 5 5 3 0 2\nBeta 5 5 2 2 0\n";
    let err = Division::parse(mismatch).unwrap_err();
    assert!(err.to_string().contains("Alpha"));
}

/// Generated divisions survive a save/load round trip through the text format.
#[test]
fn generated_division_file_round_trip() {
    use division_elimination::simulation::random_division::{
        generate_random_division, RandomDivisionConfig,
    };

    let division = generate_random_division(&RandomDivisionConfig {
        team_count: 6,
        ..Default::default()
    })
    .unwrap();
    let path = std::env::temp_dir().join("division-elimination-generated.txt");
    std::fs::write(&path, division.to_string()).unwrap();
    let reloaded = Division::from_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(division, reloaded);
}

/// Test JSON serialization of a verbose report.
#[test]
fn report_serializes_to_json() {
    let division = Division::from_file(CLASSIC_PATH).unwrap();
    let report = EliminationAnalyzer::new(&division)
        .with_config(AnalyzerConfig { verbose: true })
        .analyze_all()
        .unwrap();

    let json = serde_json::to_string_pretty(&report).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let teams = parsed["teams"].as_array().unwrap();
    assert_eq!(teams.len(), 4);

    assert_eq!(teams[0]["team"], "Atlanta");
    assert_eq!(teams[0]["verdict"]["status"], "not_eliminated");
    assert_eq!(teams[0]["diagnostics"]["max_flow"], 2);

    assert_eq!(teams[1]["verdict"]["status"], "eliminated");
    assert_eq!(
        teams[1]["verdict"]["certificate"]["teams"],
        serde_json::json!(["Atlanta", "NewYork"])
    );

    assert_eq!(teams[3]["verdict"]["status"], "trivially_eliminated");
    assert_eq!(teams[3]["verdict"]["by"], serde_json::json!(["Atlanta"]));
    assert!(teams[3].get("diagnostics").is_none());
}
