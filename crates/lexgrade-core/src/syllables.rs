//! Heuristic syllable counting.
//!
//! Counts vowel groups with a silent-e correction. There is no dictionary
//! and no exception list, so words like "recipe" come out one short.

const fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Estimate the syllable count of a single word. Always at least 1.
///
/// Each run of vowels (`aeiouy`) counts as one nucleus. A trailing `e`
/// removes one, except after `l` (`table`, `little`).
pub fn count_syllables(word: &str) -> usize {
    let lowered = word.to_lowercase();
    let mut count: isize = 0;
    let mut prev_vowel = false;

    for c in lowered.chars() {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }

    if lowered.ends_with('e') && !lowered.ends_with("le") {
        count -= 1;
    }

    count.max(1) as usize
}

/// Sum of syllable estimates over all tokens.
pub fn total_syllables(tokens: &[String]) -> usize {
    tokens.iter().map(|t| count_syllables(t)).sum()
}

/// Number of tokens with three or more syllables.
///
/// This is both the Gunning Fog "complex word" count (more than two
/// syllables) and the SMOG polysyllable count (at least three).
pub fn polysyllable_count(tokens: &[String]) -> usize {
    tokens.iter().filter(|t| count_syllables(t) >= 3).count()
}
