//! Tests for the pairwise palette distance matrix

#[cfg(test)]
mod tests {
    use chromagrid::color::model::Color;
    use chromagrid::color::palette::{Palette, palette_distance};
    use chromagrid::sequencing::distances::DistanceMatrix;

    fn palettes() -> Vec<Palette> {
        [[255, 0, 0], [0, 255, 0], [0, 0, 255]]
            .into_iter()
            .map(|rgb| Palette::new(vec![Color::from_channels(rgb)]).unwrap())
            .collect()
    }

    // Tests entries match the palette distance and mirror
    // Verified by filling only the upper triangle
    #[test]
    fn test_matrix_symmetric() {
        let p = palettes();
        let matrix = DistanceMatrix::from_palettes(&p);
        assert_eq!(matrix.len(), 3);
        for i in 0..3 {
            assert!(matrix.get(i, i).abs() < 1e-12);
            for j in 0..3 {
                assert_eq!(matrix.get(i, j).to_bits(), matrix.get(j, i).to_bits());
            }
        }
        let (Some(first), Some(last)) = (p.first(), p.last()) else {
            unreachable!("three palettes");
        };
        let expected = palette_distance(first, last);
        assert!((matrix.get(0, 2) - expected).abs() < 1e-12);
    }

    // Tests out-of-range lookups are infinitely far
    // Verified by returning zero for missing entries
    #[test]
    fn test_out_of_range() {
        let matrix = DistanceMatrix::from_palettes(&palettes());
        assert!(matrix.get(0, 3).is_infinite());
        assert!(matrix.get(7, 1).is_infinite());
    }

    // Tests an empty matrix
    // Verified by allocating a 1x1 matrix for no palettes
    #[test]
    fn test_empty() {
        let matrix = DistanceMatrix::from_palettes(&Vec::new());
        assert!(matrix.is_empty());
        assert_eq!(matrix.len(), 0);
    }
}
