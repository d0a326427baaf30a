use crate::constants::FULL_TURN_DEGREES;
use crate::numeric::mean;
use lidarseg_data::AngularSegment;

/// Averages consecutive samples into bins of `segment_size_degrees`.
///
/// Sample `i` of `N` is assumed to lie at `i * 360 / N` degrees. Each window
/// holds `N / (360 / segment_size_degrees)` samples; a trailing partial window
/// is kept. Windows crossing 0/360 are not treated specially.
///
/// Returns an empty vector when there are no samples, or fewer samples than
/// segments, instead of dividing by zero.
pub fn segment_distances(distances: &[f64], segment_size_degrees: u32) -> Vec<AngularSegment> {
    let n_samples = distances.len();
    if n_samples == 0 || segment_size_degrees == 0 || segment_size_degrees > FULL_TURN_DEGREES {
        return Vec::new();
    }

    let n_segments = (FULL_TURN_DEGREES / segment_size_degrees) as usize;
    let points_per_segment = n_samples / n_segments;
    if points_per_segment == 0 {
        return Vec::new();
    }

    let degrees_per_sample = (FULL_TURN_DEGREES as f64) / (n_samples as f64);
    distances
        .chunks(points_per_segment)
        .enumerate()
        .filter_map(|(k, window)| {
            let start = k * points_per_segment;
            let center = (start + points_per_segment / 2) as f64 * degrees_per_sample;
            mean(window).map(|d| AngularSegment::new(center, d))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_one_sample_per_segment() {
        let distances = vec![1.0; 90];
        let segments = segment_distances(&distances, 4);
        assert_eq!(segments.len(), 90);
        for (k, segment) in segments.iter().enumerate() {
            assert!(f64::abs(segment.center_angle_deg - (k as f64) * 4.) < 1e-9);
            assert_eq!(segment.mean_distance_m, 1.0);
        }
    }

    #[test]
    fn test_two_samples_per_segment() {
        let distances: Vec<f64> = (0..180).map(|i| i as f64).collect();
        let segments = segment_distances(&distances, 4);
        assert_eq!(segments.len(), 90);
        // Window [0, 1] centered on sample 1, 2 degrees per sample
        assert_eq!(segments[0], AngularSegment::new(2.0, 0.5));
        assert_eq!(segments[1], AngularSegment::new(6.0, 2.5));
        assert_eq!(segments[89], AngularSegment::new(358.0, 178.5));
    }

    #[test]
    fn test_trailing_partial_window() {
        // 10 samples, 3 segments of 120 degrees, 3 samples each plus one left over
        let distances = vec![1., 2., 3., 4., 5., 6., 7., 8., 9., 10.];
        let segments = segment_distances(&distances, 120);
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0], AngularSegment::new(36.0, 2.0));
        assert_eq!(segments[1], AngularSegment::new(144.0, 5.0));
        assert_eq!(segments[2], AngularSegment::new(252.0, 8.0));
        assert_eq!(segments[3], AngularSegment::new(360.0, 10.0));
    }

    #[test]
    fn test_empty_input() {
        assert!(segment_distances(&[], 4).is_empty());
        assert!(segment_distances(&[], 360).is_empty());
    }

    #[test]
    fn test_fewer_samples_than_segments() {
        assert!(segment_distances(&[1.0], 4).is_empty());
        assert!(segment_distances(&vec![1.0; 89], 4).is_empty());
    }

    #[test]
    fn test_degenerate_segment_size() {
        assert!(segment_distances(&[1.0, 2.0], 0).is_empty());
        assert!(segment_distances(&[1.0, 2.0], 361).is_empty());
    }

    #[test]
    fn test_whole_turn_segment() {
        let segments = segment_distances(&[1.0, 2.0, 3.0, 6.0], 360);
        assert_eq!(segments, vec![AngularSegment::new(180.0, 3.0)]);
    }

    proptest! {
        #[test]
        fn segments_are_bounded_by_their_window(
            distances in proptest::collection::vec(0.0f64..100.0, 1..2000),
            size in prop::sample::select(vec![1u32, 2, 3, 4, 5, 6, 8, 10, 12, 15, 20, 30, 45, 90, 180, 360]),
        ) {
            let segments = segment_distances(&distances, size);
            let n_segments = (360 / size) as usize;
            let pps = distances.len() / n_segments;
            if pps == 0 {
                prop_assert!(segments.is_empty());
            } else {
                prop_assert!(segments.len() <= distances.len().div_ceil(pps));
                for (segment, window) in segments.iter().zip(distances.chunks(pps)) {
                    let lo = window.iter().cloned().fold(f64::INFINITY, f64::min);
                    let hi = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                    prop_assert!(segment.mean_distance_m >= lo - 1e-9);
                    prop_assert!(segment.mean_distance_m <= hi + 1e-9);
                }
            }
        }
    }
}
