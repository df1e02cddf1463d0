//! Flesch reading-ease estimate

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y', 'ä', 'ö', 'ü'];

/// Estimates how easy `text` is to read, in `[0, 100]`
///
/// Uses `206.835 - 1.015 * words/sentences - 84.6 * syllables/words`.
/// Sentences are the segments left after splitting on runs of `.`, `!` and
/// `?`, empty ones included, so `"Hello world!"` counts two. Words are
/// whitespace-separated tokens. Text with no words scores 0.
pub fn readability(text: &str) -> f64 {
    let words = text.split_whitespace().count();
    if words == 0 {
        return 0.0;
    }

    let sentences = count_sentences(text);

    let syllables = count_syllables(text);
    let words_per_sentence = words as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words as f64;

    let score = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
    score.clamp(0.0, 100.0)
}

/// Number of segments produced by splitting on runs of terminators
///
/// Always at least 1; each maximal run of `.`, `!` or `?` adds one.
fn count_sentences(text: &str) -> usize {
    let mut count = 1;
    let mut in_terminator_run = false;
    for c in text.chars() {
        let is_terminator = matches!(c, '.' | '!' | '?');
        if is_terminator && !in_terminator_run {
            count += 1;
        }
        in_terminator_run = is_terminator;
    }
    count
}

/// Approximates syllables as the number of maximal vowel runs
///
/// Vowels are `a e i o u y ä ö ü`, compared after lowercasing.
pub fn count_syllables(text: &str) -> usize {
    let mut count = 0;
    let mut in_vowel_run = false;
    for c in text.chars().flat_map(char::to_lowercase) {
        let is_vowel = VOWELS.contains(&c);
        if is_vowel && !in_vowel_run {
            count += 1;
        }
        in_vowel_run = is_vowel;
    }
    count
}
