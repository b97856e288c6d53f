//! Nearest-neighbor visiting order.

use tracing::debug;

use crate::matrix::{OriginIndex, StopIndex, TravelCostMatrix};

/// Builds a visiting order by always stepping to the closest unvisited stop.
///
/// Starts at the start location. Ties go to the lowest stop index.
/// Unreachable cells are never chosen; if no unvisited stop is reachable from
/// the current position the order ends early and holds only the stops
/// visited so far.
pub fn nearest_neighbor_order(matrix: &TravelCostMatrix) -> Vec<StopIndex> {
    let stop_count = matrix.stop_count();
    let mut visited = vec![false; stop_count];
    let mut order = Vec::with_capacity(stop_count);
    let mut current = OriginIndex::START;

    while order.len() < stop_count {
        let mut best: Option<(StopIndex, f64)> = None;

        for (index, _) in visited.iter().enumerate().filter(|(_, seen)| !**seen) {
            let candidate = StopIndex(index);
            let Some(distance) = matrix.reachable_distance(current, candidate) else {
                continue;
            };
            // Strict comparison keeps the lower index on ties.
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((candidate, distance));
            }
        }

        let Some((next, _)) = best else {
            debug!(
                visited = order.len(),
                total = stop_count,
                "no reachable unvisited stop, ending route early"
            );
            break;
        };

        visited[next.0] = true;
        order.push(next);
        current = OriginIndex::of_stop(next);
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::MatrixCell;

    fn km(value: f64) -> MatrixCell {
        MatrixCell::ok(value * 1000.0, value * 60.0)
    }

    fn blocked() -> MatrixCell {
        MatrixCell::unreachable("ZERO_RESULTS")
    }

    #[test]
    fn test_visits_closest_first() {
        // start -> 0: 5, 1: 1, 2: 3
        let matrix = TravelCostMatrix::from_rows(
            3,
            vec![
                vec![km(5.0), km(1.0), km(3.0)],
                vec![km(0.0), km(5.0), km(2.0)],
                vec![km(4.0), km(0.0), km(1.0)],
                vec![km(2.0), km(1.0), km(0.0)],
            ],
        );

        let order = nearest_neighbor_order(&matrix);
        assert_eq!(order, vec![StopIndex(1), StopIndex(2), StopIndex(0)]);
    }

    #[test]
    fn test_tie_prefers_lower_index() {
        // Stops 1 and 2 are equidistant from start; stop 0 is farther.
        let matrix = TravelCostMatrix::from_rows(
            3,
            vec![
                vec![km(9.0), km(4.0), km(4.0)],
                vec![km(0.0), km(1.0), km(1.0)],
                vec![km(1.0), km(0.0), km(7.0)],
                vec![km(1.0), km(7.0), km(0.0)],
            ],
        );

        let order = nearest_neighbor_order(&matrix);
        assert_eq!(order[0], StopIndex(1));
        assert_eq!(order, vec![StopIndex(1), StopIndex(0), StopIndex(2)]);
    }

    #[test]
    fn test_unreachable_cells_are_never_selected() {
        // Cell to stop 0 is unreachable from start even though stop 1 is far.
        let matrix = TravelCostMatrix::from_rows(
            2,
            vec![
                vec![blocked(), km(50.0)],
                vec![km(0.0), km(3.0)],
                vec![km(3.0), km(0.0)],
            ],
        );

        let order = nearest_neighbor_order(&matrix);
        assert_eq!(order, vec![StopIndex(1), StopIndex(0)]);
    }

    #[test]
    fn test_disconnected_matrix_ends_early() {
        let matrix = TravelCostMatrix::from_rows(
            3,
            vec![
                vec![km(1.0), blocked(), blocked()],
                vec![km(0.0), blocked(), blocked()],
                vec![blocked(), km(0.0), km(1.0)],
                vec![blocked(), km(1.0), km(0.0)],
            ],
        );

        let order = nearest_neighbor_order(&matrix);
        assert_eq!(order, vec![StopIndex(0)]);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let matrix = TravelCostMatrix::from_rows(
            4,
            vec![
                vec![km(2.0), km(2.0), km(3.0), km(1.0)],
                vec![km(0.0), km(1.0), km(1.0), km(4.0)],
                vec![km(1.0), km(0.0), km(2.0), km(2.0)],
                vec![km(1.0), km(2.0), km(0.0), km(2.0)],
                vec![km(2.0), km(2.0), km(2.0), km(0.0)],
            ],
        );

        let first = nearest_neighbor_order(&matrix);
        for _ in 0..10 {
            assert_eq!(nearest_neighbor_order(&matrix), first);
        }
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn test_empty_matrix_yields_empty_order() {
        let matrix = TravelCostMatrix::from_rows(0, vec![vec![]]);
        assert!(nearest_neighbor_order(&matrix).is_empty());
    }
}
