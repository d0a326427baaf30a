use crate::numeric::hex_to_meters;

/// Extracts distances in meters from a raw sensor response.
///
/// Non-ASCII bytes are dropped. Every line containing `marker` is split on
/// whitespace and the ASCII separators `\x1c`..`\x1f`, and each token that
/// parses as base-16 becomes `value / 1000`.
/// Anything else is skipped silently, so this never fails; garbage input only
/// shows up as missing samples. Order of appearance is preserved.
pub fn decode_distances(raw: &[u8], marker: &str) -> Vec<f64> {
    let text = to_ascii_lossy(raw);
    text.split('\n')
        .filter(|line| line.contains(marker))
        .flat_map(|line| line.split(is_separator).filter(|token| !token.is_empty()))
        .filter_map(hex_to_meters)
        .collect()
}

/// Whitespace plus the ASCII file, group, record and unit separators.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

fn to_ascii_lossy(raw: &[u8]) -> String {
    raw.iter()
        .filter(|b| b.is_ascii())
        .map(|&b| b as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_distance_line() {
        let raw = b"sRA LMDscandata 1 0\nDIST 03E8 07D0 zz\n\x03";
        assert_eq!(decode_distances(raw, "DIST"), vec![1.0, 2.0]);
    }

    #[test]
    fn test_decode_ignores_lines_without_marker() {
        let raw = b"03E8 07D0\nRSSI 0BB8\nDIST 0FA0\n";
        assert_eq!(decode_distances(raw, "DIST"), vec![4.0]);
    }

    #[test]
    fn test_decode_preserves_order_across_lines() {
        let raw = b"DIST 0BB8 03E8\r\nnoise\nDIST1 07D0\n";
        // "DIST1" is not hex, "\r" is trimmed as whitespace
        assert_eq!(decode_distances(raw, "DIST"), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_decode_drops_non_ascii_bytes() {
        // Dropped bytes do not split tokens: "03\xFFE8" becomes "03E8"
        let raw = b"DIST 03\xFFE8 \xC3\xA907D0\n";
        assert_eq!(decode_distances(raw, "DIST"), vec![1.0, 2.0]);
    }

    #[test]
    fn test_decode_prefixed_and_grouped_tokens() {
        let raw = b"DIST 0x03E8 03_E8\n";
        assert_eq!(decode_distances(raw, "DIST"), vec![1.0, 1.0]);
    }

    #[test]
    fn test_decode_token_wider_than_u64() {
        let distances = decode_distances(b"DIST 1FFFFFFFFFFFFFFFF\n", "DIST");
        assert_eq!(distances.len(), 1);
        assert!(f64::abs(distances[0] / 3.6893488147419103e16 - 1.) < 1e-12);
    }

    #[test]
    fn test_decode_ascii_separators() {
        let raw = b"DIST\x1f03E8\x1c07D0\x0b0BB8\n";
        assert_eq!(decode_distances(raw, "DIST"), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_decode_custom_marker() {
        let raw = b"DIST 03E8\nRANGE 07D0\n";
        assert_eq!(decode_distances(raw, "RANGE"), vec![2.0]);
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode_distances(b"", "DIST").is_empty());
        assert!(decode_distances(b"DIST\n", "DIST").is_empty());
        assert!(decode_distances(b"no marker here", "DIST").is_empty());
    }

    #[test]
    fn test_decode_is_repeatable() {
        let raw = b"DIST 03E8 07D0 0BB8\nDIST 0FA0\n";
        assert_eq!(
            decode_distances(raw, "DIST"),
            decode_distances(raw, "DIST")
        );
    }

    proptest! {
        #[test]
        fn decode_never_panics(raw in proptest::collection::vec(any::<u8>(), 0..4096)) {
            let distances = decode_distances(&raw, "DIST");
            prop_assert!(distances.iter().all(|d| d.is_finite() && *d >= 0.0));
        }

        #[test]
        fn decode_recovers_written_values(values in proptest::collection::vec(0u32..0x00FF_FFFF, 0..64)) {
            let line = values
                .iter()
                .map(|v| format!("{v:X}"))
                .collect::<Vec<_>>()
                .join(" ");
            let raw = format!("header\nDIST {line}\n");
            let expected: Vec<f64> = values.iter().map(|v| (*v as f64) / 1000.).collect();
            prop_assert_eq!(decode_distances(raw.as_bytes(), "DIST"), expected);
        }
    }
}
