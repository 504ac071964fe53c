//! Constant-time string comparison.

/// Compare two strings without short-circuiting on the first difference.
///
/// Walks `max(len(a), len(b))` UTF-16 code units, XOR-accumulating both
/// sides with out-of-range positions read as `0`. Equal only when the
/// accumulator stays zero and the lengths match. Length is treated as
/// secret too: no early return on length mismatch.
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    let a: Vec<u16> = a.encode_utf16().collect();
    let b: Vec<u16> = b.encode_utf16().collect();
    let len = core::cmp::max(a.len(), b.len());

    let mut diff: u16 = 0;
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        diff |= x ^ y;
    }

    let lengths_match = a.len() == b.len();
    std::hint::black_box(diff) == 0 && lengths_match
}
