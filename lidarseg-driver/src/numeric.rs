use crate::constants::MILLIMETERS_PER_METER;

/// Parses one base-16 token into meters. `None` if the token is not hex.
///
/// Accepts an optional `+` sign, an optional `0x`/`0X` prefix and single `_`
/// separators between digits. Tokens too wide for `u64` are accumulated as
/// `f64`; a value that overflows to infinity is rejected.
pub(crate) fn hex_to_meters(token: &str) -> Option<f64> {
    let unsigned = token.strip_prefix('+').unwrap_or(token);
    let digits = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        // One separator is allowed right after the prefix
        Some(rest) => rest.strip_prefix('_').unwrap_or(rest),
        None => unsigned,
    };
    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') || digits.contains("__")
    {
        return None;
    }

    let mut exact: Option<u64> = Some(0);
    let mut approx = 0f64;
    for c in digits.chars().filter(|&c| c != '_') {
        let digit = c.to_digit(16)?;
        exact = exact
            .and_then(|v| v.checked_mul(16))
            .and_then(|v| v.checked_add(u64::from(digit)));
        approx = approx * 16. + f64::from(digit);
    }
    let millimeters = match exact {
        Some(v) => v as f64,
        None => approx,
    };
    let meters = millimeters / MILLIMETERS_PER_METER;
    meters.is_finite().then_some(meters)
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / (values.len() as f64))
}

/// Renders `\x02`-style escapes for non-printable bytes.
pub(crate) fn escape_bytes(data: &[u8]) -> String {
    data.iter()
        .map(|&b| match b {
            b'\\' => "\\\\".to_string(),
            0x20..=0x7E => (b as char).to_string(),
            _ => format!("\\x{:02X}", b),
        })
        .collect()
}

/// Inverse of [`escape_bytes`]. Returns `None` on a dangling or malformed escape.
pub(crate) fn unescape_bytes(text: &str) -> Option<Vec<u8>> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        match bytes.get(i + 1) {
            Some(b'\\') => {
                out.push(b'\\');
                i += 2;
            }
            Some(b'x') => {
                let hex = bytes.get(i + 2..i + 4)?;
                if !hex.iter().all(u8::is_ascii_hexdigit) {
                    return None;
                }
                let hex = std::str::from_utf8(hex).ok()?;
                out.push(u8::from_str_radix(hex, 16).ok()?);
                i += 4;
            }
            _ => return None,
        }
    }
    Some(out)
}
