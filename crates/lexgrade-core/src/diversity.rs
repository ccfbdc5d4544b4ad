//! Lexical diversity: Type-Token Ratio and MTLD.

use std::collections::HashSet;

/// TTR at or below which an MTLD factor closes.
pub const MTLD_THRESHOLD: f64 = 0.72;

/// Distinct tokens divided by total tokens; `0.0` for no tokens.
pub fn type_token_ratio(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let distinct: HashSet<&str> = tokens.iter().map(String::as_str).collect();
    distinct.len() as f64 / tokens.len() as f64
}

/// Measure of Textual Lexical Diversity, single forward pass.
///
/// Tokens accumulate into a window. After each token, the window's TTR is
/// checked; once it falls to [`MTLD_THRESHOLD`] or below, the window closes
/// as a factor and a new one starts empty. The result is the mean factor
/// length. If no factor ever closes, the whole text is one incomplete factor
/// and the result is the token count. Any partial window left at the end is
/// not counted.
#[tracing::instrument(skip_all, fields(tokens = tokens.len()))]
pub fn mtld(tokens: &[String]) -> f64 {
    let mut window: HashSet<&str> = HashSet::new();
    let mut window_len = 0usize;
    let mut factors = 0usize;
    let mut factor_total = 0usize;

    for token in tokens {
        window.insert(token.as_str());
        window_len += 1;

        let ttr = window.len() as f64 / window_len as f64;
        if ttr <= MTLD_THRESHOLD {
            factors += 1;
            factor_total += window_len;
            window.clear();
            window_len = 0;
        }
    }

    tracing::debug!(factors, "mtld factors closed");

    if factors == 0 {
        tokens.len() as f64
    } else {
        factor_total as f64 / factors as f64
    }
}
