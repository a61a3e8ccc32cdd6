//! Pronounceable name synthesis.
//!
//! A name is a run of syllables followed by a word ending:
//! - syllable structure is `<consonant> [consonant] <vowel>`
//! - the syllable count is `min` plus one coin flip per unit of range,
//!   so lengths cluster around the middle of the range
//! - the leading consonant of the first syllable is dropped in 1/4 of cases
//! - consonants and vowels that allow it are doubled in 1/16 of cases,
//!   but the first letter of a word is never doubled
//! - letter frequencies follow English text; word endings have their own
//!   table and do not count as a syllable

use super::pool::DrawBits;
use super::sampler::{pick, table_weight, WeightedLiteral, TOTAL_WEIGHT};
use super::Generated;

const fn lit(text: &'static str, can_dup: bool, weight: u32) -> WeightedLiteral {
    WeightedLiteral::new(text, can_dup, weight)
}

pub const VOWELS: [WeightedLiteral; 6] = [
    lit("e", true, 5_040_273),
    lit("a", false, 3_406_646),
    lit("o", true, 3_221_018),
    lit("i", false, 3_063_451),
    lit("u", false, 1_159_547),
    lit("y", false, 886_281),
];

pub const CONSONANTS: [WeightedLiteral; 24] = [
    lit("n", true, 1_965_342),
    lit("r", true, 1_703_266),
    lit("t", false, 1_674_560),
    lit("s", true, 1_466_326),
    lit("d", true, 1_221_783),
    lit("l", true, 1_125_424),
    lit("", false, 1_048_588),
    lit("th", false, 899_191),
    lit("c", true, 766_989),
    lit("m", true, 738_749),
    lit("f", true, 651_700),
    lit("w", false, 592_582),
    lit("g", true, 573_031),
    lit("p", false, 514_533),
    lit("b", false, 421_277),
    lit("v", false, 313_281),
    lit("sh", false, 310_333),
    lit("h", false, 263_783),
    lit("ch", false, 201_716),
    lit("k", false, 195_044),
    lit("x", false, 48_877),
    lit("qu", false, 31_809),
    lit("j", false, 29_171),
    lit("z", false, 19_861),
];

pub const WORD_ENDINGS: [WeightedLiteral; 18] = [
    lit("", false, 4_194_304),
    lit("t", false, 1_331_525),
    lit("s", false, 1_249_585),
    lit("r", false, 1_167_645),
    lit("ck", false, 1_085_706),
    lit("y", false, 1_029_371),
    lit("k", false, 1_003_765),
    lit("x", false, 921_825),
    lit("n", false, 839_885),
    lit("th", false, 757_945),
    lit("v", false, 676_005),
    lit("sh", false, 594_065),
    lit("p", false, 512_125),
    lit("b", false, 430_185),
    lit("l", false, 348_245),
    lit("z", false, 266_305),
    lit("ty", false, 221_238),
    lit("cy", false, 147_492),
];

const _: () = assert!(table_weight(&VOWELS) == TOTAL_WEIGHT as u64);
const _: () = assert!(table_weight(&CONSONANTS) == TOTAL_WEIGHT as u64);
const _: () = assert!(table_weight(&WORD_ENDINGS) == TOTAL_WEIGHT as u64);

/// Build a name of `min_syllables..=max_syllables` syllables.
///
/// A failed draw stops generation and yields what was built so far as
/// `Generated::Partial`.
pub fn make_name<P: DrawBits + ?Sized>(
    pool: &mut P,
    min_syllables: u32,
    max_syllables: u32,
) -> Generated<String> {
    let mut name = String::new();

    let mut syllables = min_syllables;
    for _ in 0..max_syllables.saturating_sub(min_syllables) {
        match pool.draw(1) {
            Ok(bit) => syllables += bit,
            Err(_) => return Generated::Partial(name),
        }
    }

    for index in 0..syllables {
        if push_syllable(pool, &mut name, index == 0).is_none() {
            return Generated::Partial(name);
        }
    }

    match pick(pool, &WORD_ENDINGS) {
        Some(ending) => {
            name.push_str(ending.text);
            Generated::Complete(name)
        }
        None => Generated::Partial(name),
    }
}

fn push_syllable<P: DrawBits + ?Sized>(pool: &mut P, name: &mut String, first: bool) -> Option<()> {
    let consonant = pick(pool, &CONSONANTS)?;
    let t = pool.draw(4).ok()?;

    if !first || t >= 4 {
        name.push_str(consonant.text);
    }

    if t == 0 && consonant.can_dup && !first {
        name.push_str(consonant.text);
    } else if t >= 12 {
        // The second consonant is drawn but never written out. Existing
        // names depend on this exact draw sequence, so keep both draws.
        pick(pool, &CONSONANTS)?;
        pool.draw(4).ok()?;
    }

    let vowel = pick(pool, &VOWELS)?;
    let t = pool.draw(4).ok()?;

    name.push_str(vowel.text);
    if t == 0 && vowel.can_dup && name.len() > 1 {
        name.push_str(vowel.text);
    }

    Some(())
}
