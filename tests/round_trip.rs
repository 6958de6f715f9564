// Lossless round trips through the public entry points.

mod common;

#[cfg(test)]
mod jpegls_round_trip {
    use super::common;
    use jpegls16::{compress, decompress, decompress_into};

    fn assert_round_trip(samples: &[u16], width: usize, height: usize, depth: usize) -> usize {
        let encoded = compress(samples, width, height, depth).expect("compress");
        let decoded = decompress(&encoded, width, height, depth).expect("decompress");
        assert_eq!(decoded, samples, "{width}x{height}x{depth}");
        encoded.len()
    }

    #[test]
    fn test_single_sample() {
        for value in [0, 1, 1000, 32767, 32768, 65534, 65535] {
            assert_round_trip(&[value], 1, 1, 1);
        }
    }

    #[test]
    fn test_constant_images() {
        for value in [0, 1000, 65535] {
            assert_round_trip(&common::constant(64, 64, value), 64, 64, 1);
        }
    }

    #[test]
    fn test_gradient() {
        assert_round_trip(&common::gradient(128, 96), 128, 96, 1);
    }

    #[test]
    fn test_noise() {
        assert_round_trip(&common::noise(100, 70, 7), 100, 70, 1);
    }

    #[test]
    fn test_smooth_image_compresses() {
        let samples = common::smooth_with_noise(256, 256, 42);
        let size = assert_round_trip(&samples, 256, 256, 1);
        assert!(size < samples.len() * 2, "{size} bytes");
    }

    #[test]
    fn test_hard_edges_and_extremes() {
        assert_round_trip(&common::blocks(61, 47), 61, 47, 1);
        assert_round_trip(&common::checkerboard(33, 17), 33, 17, 1);
    }

    #[test]
    fn test_single_row_and_single_column() {
        assert_round_trip(&common::noise(1000, 1, 3), 1000, 1, 1);
        assert_round_trip(&common::noise(1, 1000, 4), 1, 1000, 1);
        assert_round_trip(&common::blocks(1, 300), 1, 300, 1);
    }

    #[test]
    fn test_long_runs_reach_maximum_run_index() {
        // Rows of 40000 equal samples drive the run index to its maximum, and the
        // interruption in the middle row brings it back down.
        let width = 40000;
        let mut samples = common::constant(width, 3, 12345);
        samples[width + width / 2] = 54321;
        assert_round_trip(&samples, width, 3, 1);
    }

    #[test]
    fn test_volume_of_planes() {
        let width = 32;
        let height = 24;
        let depth = 5;
        let samples: Vec<u16> = (0..depth)
            .flat_map(|plane| common::smooth_with_noise(width, height, plane as u64))
            .collect();
        assert_round_trip(&samples, width, height, depth);
    }

    #[test]
    fn test_maximum_width() {
        assert_round_trip(&common::gradient(65535, 2), 65535, 2, 1);
    }

    #[test]
    fn test_decompress_into_caller_buffer() {
        let samples = common::gradient(20, 10);
        let encoded = compress(&samples, 20, 5, 2).unwrap();
        let mut image = vec![0xAAAA; 200];
        decompress_into(&encoded, &mut image, 20, 5, 2).unwrap();
        assert_eq!(image, samples);
    }

    #[test]
    fn test_negated_image_round_trips_with_same_size_class() {
        let samples = common::smooth_with_noise(64, 64, 9);
        let negated: Vec<u16> = samples.iter().map(|&s| 65535 - s).collect();
        let size = assert_round_trip(&samples, 64, 64, 1);
        let negated_size = assert_round_trip(&negated, 64, 64, 1);
        // Contexts mirror, but the zero borders of the first row do not.
        let difference = size.abs_diff(negated_size);
        assert!(difference * 10 < size, "{size} vs {negated_size}");
    }
}
