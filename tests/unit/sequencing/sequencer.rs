//! Tests for start selection and greedy neighbor-aware ordering

#[cfg(test)]
mod tests {
    use chromagrid::LayoutError;
    use chromagrid::color::model::Color;
    use chromagrid::color::palette::{Palette, palette_distance};
    use chromagrid::sequencing::distances::DistanceMatrix;
    use chromagrid::sequencing::grid::Neighbors;
    use chromagrid::sequencing::sequencer::{
        GridSequencer, NeighborWeights, select_start, start_score,
    };

    fn solid(r: u8, g: u8, b: u8) -> Palette {
        Palette::new(vec![Color::from_rgb(r, g, b)]).unwrap()
    }

    fn mixed() -> Vec<Palette> {
        vec![
            solid(0, 0, 255),
            solid(255, 0, 0),
            solid(60, 60, 60),
            solid(250, 40, 0),
            solid(0, 40, 250),
            solid(0, 200, 0),
            solid(220, 220, 220),
        ]
    }

    // Tests start score rewards saturation at mid lightness
    // Verified by dropping the lightness penalty
    #[test]
    fn test_start_score() {
        assert!((start_score(&solid(255, 0, 0)) - 10_000.0).abs() < 1e-9);
        assert!(start_score(&solid(128, 128, 128)).abs() < 1e-9);
        assert!(start_score(&solid(255, 0, 0)) > start_score(&solid(128, 0, 0)));
    }

    // Tests start selection takes the most vivid palette
    // Verified by selecting the minimum score
    #[test]
    fn test_select_start() {
        let palettes = vec![solid(90, 90, 90), solid(0, 200, 0), solid(128, 0, 0)];
        assert_eq!(select_start(&palettes), Some(1));
        assert_eq!(select_start(&Vec::new()), None);
    }

    // Tests equal start scores resolve to the first palette
    // Verified by using >= when comparing scores
    #[test]
    fn test_select_start_tie() {
        let palettes = vec![solid(10, 10, 10), solid(255, 0, 0), solid(0, 0, 255)];
        assert_eq!(select_start(&palettes), Some(1));
    }

    // Tests zero columns are rejected
    // Verified by accepting zero columns
    #[test]
    fn test_zero_columns_rejected() {
        assert!(matches!(
            GridSequencer::new(0),
            Err(LayoutError::InvalidParameter {
                parameter: "columns",
                ..
            })
        ));
    }

    // Tests default weights
    // Verified by swapping left and top weights
    #[test]
    fn test_default_weights() {
        let sequencer = GridSequencer::new(3).unwrap();
        assert_eq!(sequencer.columns(), 3);
        let w = sequencer.weights();
        assert!((w.left - 1.2).abs() < 1e-12);
        assert!((w.top - 1.0).abs() < 1e-12);
        assert!((w.wrap - 0.5).abs() < 1e-12);
        assert!((w.wrap_share - 0.5).abs() < 1e-12);
    }

    // Tests left and top references are averaged with their weights
    // Verified by dividing by the sum of weights
    #[test]
    fn test_candidate_score_left_and_top() {
        let palettes = mixed();
        let matrix = DistanceMatrix::from_palettes(&palettes);
        let sequencer = GridSequencer::new(2).unwrap();

        // Position 3 in a two column grid: left is position 2, top is position 1
        let placed = [0, 1, 2];
        let score = sequencer.candidate_score(&matrix, 5, &Neighbors::of(3, 2), &placed);
        let expected = 1.2f64.mul_add(matrix.get(5, 2), matrix.get(5, 1)) / 2.0;
        assert!((score - expected).abs() < 1e-9);
    }

    // Tests the wrap reference counts as half a neighbor
    // Verified by counting wrap as a full neighbor
    #[test]
    fn test_candidate_score_wrap() {
        let palettes = mixed();
        let matrix = DistanceMatrix::from_palettes(&palettes);
        let sequencer = GridSequencer::new(2).unwrap();

        // Position 2 in a two column grid: top is position 0, wrap is position 1
        let placed = [4, 6];
        let score = sequencer.candidate_score(&matrix, 3, &Neighbors::of(2, 2), &placed);
        let expected = 0.5f64.mul_add(matrix.get(3, 6), matrix.get(3, 4)) / 1.5;
        assert!((score - expected).abs() < 1e-9);
    }

    // Tests custom weights change the score
    // Verified by ignoring configured weights
    #[test]
    fn test_custom_weights() {
        let palettes = mixed();
        let matrix = DistanceMatrix::from_palettes(&palettes);
        let sequencer = GridSequencer::new(3).unwrap().with_weights(NeighborWeights {
            left: 2.0,
            top: 1.0,
            wrap: 0.0,
            wrap_share: 0.0,
        });
        let score = sequencer.candidate_score(&matrix, 2, &Neighbors::of(1, 3), &[0]);
        assert!((score - 2.0 * matrix.get(2, 0)).abs() < 1e-9);
    }

    // Tests a similar red is placed next to the red start before a blue
    // Verified by choosing the farthest candidate
    #[test]
    fn test_neighbor_weighting_scenario() {
        let a = solid(255, 0, 0);
        let b = solid(255, 40, 0);
        let c = solid(0, 0, 255);
        assert!(palette_distance(&a, &b) < palette_distance(&a, &c));

        let sequencer = GridSequencer::new(2).unwrap();
        let entries = vec![("A", a), ("C", c), ("B", b)];
        let ordered = sequencer.sequence_from(entries, 0).unwrap();
        let ids: Vec<&str> = ordered.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    // Tests the output is a permutation of the input
    // Verified by allowing candidates to be placed twice
    #[test]
    fn test_order_is_permutation() {
        let palettes = mixed();
        for columns in 1..=4 {
            let sequencer = GridSequencer::new(columns).unwrap();
            let mut order = sequencer.order(&palettes);
            assert_eq!(order.first().copied(), select_start(&palettes));
            order.sort_unstable();
            assert_eq!(order, (0..palettes.len()).collect::<Vec<_>>());
        }
    }

    // Tests ordering is repeatable for the same input order
    // Verified by iterating the pool in hash order
    #[test]
    fn test_order_deterministic() {
        let palettes = mixed();
        let sequencer = GridSequencer::new(3).unwrap();
        assert_eq!(sequencer.order(&palettes), sequencer.order(&palettes));
    }

    // Tests identical palettes keep their input order
    // Verified by picking the last of equal candidates
    #[test]
    fn test_ties_keep_input_order() {
        let sequencer = GridSequencer::new(2).unwrap();
        let entries: Vec<(usize, Palette)> = (0..5).map(|i| (i, solid(255, 0, 0))).collect();
        let ids: Vec<usize> = sequencer
            .sequence(entries)
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    // Tests empty and single-entry inputs are returned unchanged
    // Verified by running selection on empty input
    #[test]
    fn test_trivial_inputs() {
        let sequencer = GridSequencer::new(3).unwrap();
        assert!(sequencer.sequence(Vec::<(u8, Palette)>::new()).is_empty());
        assert!(sequencer.order(&[]).is_empty());

        let single = sequencer.sequence(vec![("x", Palette::fallback())]);
        assert_eq!(single.len(), 1);
        assert_eq!(single.first().map(|(id, _)| *id), Some("x"));
    }

    // Tests an out-of-range start is rejected
    // Verified by clamping the start index
    #[test]
    fn test_start_out_of_range() {
        let sequencer = GridSequencer::new(2).unwrap();
        let result = sequencer.order_from(&mixed(), 7);
        assert!(matches!(
            result,
            Err(LayoutError::InvalidParameter {
                parameter: "start",
                ..
            })
        ));
    }
}
