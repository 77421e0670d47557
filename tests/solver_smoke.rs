mod fixtures;

use collection_planner::config::PlannerConfig;
use collection_planner::features::District;
use collection_planner::solver::solve;
use collection_planner::topology::Topology;

#[test]
fn solves_two_adjacent_districts() {
    let districts = vec![District::new("A", 4.0, false), District::new("B", 3.0, true)];
    let topology = Topology::from_edges(vec![("A".to_string(), "B".to_string())]).unwrap();

    let result = solve(&districts, &topology, &fixtures::fast_config(7)).expect("solve");

    assert_eq!(result.schedule().len(), 2);
    assert_eq!(result.pattern_for(&"B".to_string()).unwrap().frequency(), 3);
    assert!(result.cost() <= result.initial_cost);
    assert!(result.daily_trucks().iter().any(|&t| t > 0));
}

#[test]
fn solves_with_default_configuration() {
    let (districts, topology) = fixtures::line(4, 12.0);
    let result = solve(&districts, &topology, &PlannerConfig::default()).expect("solve");

    assert_eq!(result.label, "seed-42");
    assert_eq!(result.chains.len(), 1);
    assert!(result.stats.iterations > 0);
}

#[test]
fn report_renders_every_district() {
    let (districts, topology) = fixtures::line(3, 9.0);
    let result = solve(&districts, &topology, &fixtures::fast_config(1)).expect("solve");
    let text = result.report().to_string();

    for district in &districts {
        assert!(text.contains(&district.id));
    }
    assert!(text.contains("Trucks (shared)"));
}
