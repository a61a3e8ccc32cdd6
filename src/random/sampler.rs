//! Weighted discrete sampling over a 24-bit probability space.

use super::pool::DrawBits;

/// Bits drawn per sample.
pub const WEIGHT_BITS: u32 = 24;

/// Required sum of weights in every table (2^24).
pub const TOTAL_WEIGHT: u32 = 1 << WEIGHT_BITS;

/// One alternative in a weighted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedLiteral {
    /// Text appended to the output when this literal is chosen.
    pub text: &'static str,
    /// Whether the literal may be doubled ("ee", "rr" but not "uu").
    pub can_dup: bool,
    /// Share of the 2^24 probability space.
    pub weight: u32,
}

impl WeightedLiteral {
    pub const fn new(text: &'static str, can_dup: bool, weight: u32) -> Self {
        Self {
            text,
            can_dup,
            weight,
        }
    }
}

/// Sum of all weights in `table`.
pub const fn table_weight(table: &[WeightedLiteral]) -> u64 {
    let mut sum = 0u64;
    let mut i = 0;
    while i < table.len() {
        sum += table[i].weight as u64;
        i += 1;
    }
    sum
}

/// Draw one literal proportionally to its weight.
///
/// Returns `None` when the entropy draw fails or when the table sums to
/// less than 2^24 and the draw lands past its end.  Callers treat `None`
/// as "stop generating here".
pub fn pick<'t, P: DrawBits + ?Sized>(
    pool: &mut P,
    table: &'t [WeightedLiteral],
) -> Option<&'t WeightedLiteral> {
    let mut t = pool.draw(WEIGHT_BITS).ok()?;

    for literal in table {
        if literal.weight > t {
            return Some(literal);
        }
        t -= literal.weight;
    }

    tracing::debug!(draw = t, "weighted draw fell past the end of its table");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::pool::testing::ScriptedSource;
    use crate::random::pool::EntropyPool;

    const HALVES: [WeightedLiteral; 2] = [
        WeightedLiteral::new("a", false, TOTAL_WEIGHT / 2),
        WeightedLiteral::new("b", false, TOTAL_WEIGHT / 2),
    ];

    const SKEWED: [WeightedLiteral; 3] = [
        WeightedLiteral::new("x", false, TOTAL_WEIGHT / 8),
        WeightedLiteral::new("y", false, TOTAL_WEIGHT / 8 * 3),
        WeightedLiteral::new("z", false, TOTAL_WEIGHT / 2),
    ];

    #[test]
    fn draw_selects_by_cumulative_weight() {
        // 24-bit draws: 0x000000, 0x7FFFFF, 0x800000, 0xFFFFFF
        let mut pool = ScriptedSource::pool_from_words(&[0x0000_007F, 0xFFFF_8000, 0x00FF_FFFF]);
        assert_eq!(pick(&mut pool, &HALVES).unwrap().text, "a");
        assert_eq!(pick(&mut pool, &HALVES).unwrap().text, "a");
        assert_eq!(pick(&mut pool, &HALVES).unwrap().text, "b");
        assert_eq!(pick(&mut pool, &HALVES).unwrap().text, "b");
    }

    #[test]
    fn short_table_can_return_none() {
        let short = [WeightedLiteral::new("only", false, 16)];
        // Top 24 bits are all ones, far past a weight of 16.
        let mut pool = ScriptedSource::pool_from_words(&[0xFFFF_FF00]);
        assert!(pick(&mut pool, &short).is_none());
    }

    #[test]
    fn failed_entropy_returns_none() {
        let mut pool = EntropyPool::with_source(ScriptedSource::new(Vec::new()));
        assert!(pick(&mut pool, &HALVES).is_none());
    }

    #[test]
    fn table_weight_sums_entries() {
        assert_eq!(table_weight(&SKEWED), u64::from(TOTAL_WEIGHT));
        assert_eq!(table_weight(&[]), 0);
    }

    #[test]
    fn empirical_distribution_converges() {
        let mut pool = EntropyPool::new();
        let draws = 80_000;
        let mut counts = [0usize; 3];

        for _ in 0..draws {
            let literal = pick(&mut pool, &SKEWED).unwrap();
            let index = SKEWED.iter().position(|l| l == literal).unwrap();
            counts[index] += 1;
        }

        let expected = [0.125, 0.375, 0.5];
        for (count, p) in counts.iter().zip(expected) {
            let observed = *count as f64 / draws as f64;
            assert!(
                (observed - p).abs() < 0.01,
                "observed {observed:.4}, expected {p}"
            );
        }
    }
}
