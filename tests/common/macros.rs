/// Asserts that the grid holds exactly `count` organisms.
#[macro_export]
macro_rules! assert_population {
    ($grid:expr, $count:expr) => {
        assert_eq!(
            $grid.num_organisms(),
            $count,
            "Population count mismatch"
        );
    };
}

/// Asserts the points of the organism at `cell`.
#[macro_export]
macro_rules! assert_points {
    ($grid:expr, $cell:expr, $points:expr) => {
        let org = $grid
            .organism(gatelife_data::CellId($cell))
            .expect("cell should be occupied");
        assert_eq!(
            org.points(),
            $points,
            "Organism at #{} has {} points, expected {}",
            $cell,
            org.points(),
            $points
        );
    };
}

/// Asserts that no organism lives at `cell`.
#[macro_export]
macro_rules! assert_vacant {
    ($grid:expr, $cell:expr) => {
        assert!(
            !$grid.is_occupied(gatelife_data::CellId($cell)),
            "Cell #{} should be empty",
            $cell
        );
    };
}
