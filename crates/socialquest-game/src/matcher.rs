//! Fatigue keyword detection.
//!
//! The keyword set mixes kanji, hiragana/katakana readings with optional
//! conjugation endings, and romanized spellings in both half-width and
//! full-width Latin. Matches are counted leftmost-first and never overlap.

use regex::Regex;

use crate::error::GameError;

/// Alternation of every fatigue keyword, in priority order.
const FATIGUE_PATTERN: &str = concat!(
    "疲|苦|眠|怠|突|痛",
    "|つかれ[たてす]?|ひろう|だる[いくす]?|つら[いくす]?|ねむ[いくす]?",
    "|しんど[いくす]?|くるし[いくす]?|いた[いくす]",
    "|tukare|ｔｕｋａｒｅ|tsukare|ｔｓｕｋａｒｅ|tire|ｔｉｒｅ|tiring|ｔｉｒｉｎｇ",
    "|ちれ|たいや|タイヤ|たれかつ|タレかつ|タレカツ|たれカツ",
);

/// Counts fatigue keywords in message text.
#[derive(Debug, Clone)]
pub struct FatigueMatcher {
    pattern: Regex,
}

impl FatigueMatcher {
    /// Compile the keyword set.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Pattern`] if the pattern fails to compile.
    pub fn new() -> Result<Self, GameError> {
        Ok(Self {
            pattern: Regex::new(FATIGUE_PATTERN)?,
        })
    }

    /// Number of non-overlapping keyword matches in `text`.
    pub fn count(&self, text: &str) -> u32 {
        let n = self.pattern.find_iter(text).count();
        u32::try_from(n).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn matcher() -> FatigueMatcher {
        FatigueMatcher::new().unwrap()
    }

    #[test]
    fn plain_text_has_no_matches() {
        let m = matcher();
        assert_eq!(m.count(""), 0);
        assert_eq!(m.count("おはようございます"), 0);
        assert_eq!(m.count("good morning"), 0);
    }

    #[test]
    fn single_kanji_and_kana_keywords() {
        let m = matcher();
        assert_eq!(m.count("疲れた"), 1);
        assert_eq!(m.count("ねむい"), 1);
        assert_eq!(m.count("しんどす"), 1);
        assert_eq!(m.count("頭がいたい"), 1);
    }

    #[test]
    fn conjugation_suffix_is_consumed_once() {
        let m = matcher();
        assert_eq!(m.count("つかれた"), 1);
        assert_eq!(m.count("つかれ"), 1);
        assert_eq!(m.count("つらいつらい"), 2);
    }

    #[test]
    fn romanized_spellings_in_both_widths() {
        let m = matcher();
        assert_eq!(m.count("so tired"), 1);
        assert_eq!(m.count("tsukare"), 1);
        assert_eq!(m.count("ｔｓｕｋａｒｅ"), 1);
        assert_eq!(m.count("ｔｉｒｉｎｇ day"), 1);
    }

    #[test]
    fn matches_do_not_overlap() {
        let m = matcher();
        // "いたい" is consumed whole, so its trailing "い" cannot start
        // another match.
        assert_eq!(m.count("いたいたい"), 1);
        assert_eq!(m.count("tiring"), 1);
    }

    #[test]
    fn combo_counts_every_occurrence() {
        let m = matcher();
        assert_eq!(m.count("疲れた眠い痛い"), 3);
        assert_eq!(m.count("タイヤとタレカツ"), 2);
    }
}
