mod common;

use common::{GridBuilder, ScriptedUnit};
use gatelife_core::grid::MoveOutcome;
use gatelife_core::topology::PopStructure;
use gatelife_data::CellId;

#[test]
fn test_move_into_occupied_neighbor_is_noop() {
    // In a 2x1 grid the only neighbour of each cell is the other one.
    let mut grid = GridBuilder::new()
        .with_size(2, 1)
        .with_organism(0, ScriptedUnit::idle(), 3.0)
        .with_organism(1, ScriptedUnit::idle(), 7.0)
        .build();
    let before: Vec<_> = grid
        .organisms()
        .map(|(c, o)| (c, o.lineage.clone(), o.points()))
        .collect();

    assert_eq!(grid.move_organism(CellId(0)), MoveOutcome::Blocked);

    let after: Vec<_> = grid
        .organisms()
        .map(|(c, o)| (c, o.lineage.clone(), o.points()))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_move_into_empty_neighbor_transfers() {
    let mut grid = GridBuilder::new()
        .with_size(2, 1)
        .with_organism(0, ScriptedUnit::scripted(&[1.0], &[]), 3.0)
        .build();
    let original = grid.organism(CellId(0)).cloned().unwrap();

    assert_eq!(grid.move_organism(CellId(0)), MoveOutcome::Moved(CellId(1)));

    assert_vacant!(grid, 0);
    let moved = grid.organism(CellId(1)).unwrap();
    assert_eq!(moved.lineage, original.lineage);
    assert_eq!(moved.state, original.state);
    assert_eq!(moved.unit, original.unit);
    // Position is only refreshed when the organism is next processed.
    assert!(moved.position().is_none());
}

#[test]
fn test_vacant_move_draws_no_randomness() {
    let mut a = GridBuilder::new().with_seed(11).build();
    let mut b = GridBuilder::new().with_seed(11).build();

    assert_eq!(a.move_organism(CellId(3)), MoveOutcome::Vacant);

    let org_a = common::idle_organism(&mut a, 0.0);
    let org_b = common::idle_organism(&mut b, 0.0);
    assert_eq!(org_a.lineage.id, org_b.lineage.id);
    assert_eq!(a.inject(org_a), b.inject(org_b));
}

#[test]
fn test_lone_cell_is_blocked() {
    let mut grid = GridBuilder::new()
        .with_size(1, 1)
        .with_organism(0, ScriptedUnit::idle(), 0.0)
        .build();
    assert_eq!(grid.move_organism(CellId(0)), MoveOutcome::Blocked);
    assert_population!(grid, 1);
}

#[test]
fn test_move_all_conserves_population() {
    let mut builder = GridBuilder::new().with_size(6, 6);
    for cell in (0..36).step_by(3) {
        builder = builder.with_organism(cell, ScriptedUnit::idle(), cell as f64);
    }
    let mut grid = builder.build();
    let mut before: Vec<f64> = grid.organisms().map(|(_, o)| o.points()).collect();

    for _ in 0..5 {
        grid.move_all_organisms();
    }

    assert_population!(grid, 12);
    let mut after: Vec<f64> = grid.organisms().map(|(_, o)| o.points()).collect();
    before.sort_by(f64::total_cmp);
    after.sort_by(f64::total_cmp);
    assert_eq!(before, after);
}

#[test]
fn test_well_mixed_moves_anywhere() {
    let mut grid = GridBuilder::new()
        .with_size(5, 5)
        .with_structure(PopStructure::WellMixed)
        .with_organism(0, ScriptedUnit::idle(), 0.0)
        .build();
    let mut reached_far_cell = false;
    for _ in 0..50 {
        let from = grid.organisms().map(|(c, _)| c).next().unwrap();
        if let MoveOutcome::Moved(dest) = grid.move_organism(from) {
            let (fx, fy) = grid.topology().coords(from);
            let (dx, dy) = grid.topology().coords(dest);
            if fx.abs_diff(dx) > 1 && fx.abs_diff(dx) < 4 || fy.abs_diff(dy) > 1 && fy.abs_diff(dy) < 4 {
                reached_far_cell = true;
            }
        }
    }
    assert!(reached_far_cell);
    assert_population!(grid, 1);
}
