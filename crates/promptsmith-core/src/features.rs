//! Lexical and structural feature extraction.
//!
//! Pure functions of the input text; every other component consumes
//! these signals instead of re-deriving them.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::types::Complexity;

lazy_static! {
    static ref SENTENCE_SPLIT: Regex = Regex::new(r"[.!?]+").unwrap();
    static ref ASCII_WORD: Regex = Regex::new(r"\b[a-zA-Z]+\b").unwrap();
}

/// Keywords signalling conditional branches.
const CONDITION_MARKERS: [&str; 5] = ["만약", "경우", "조건", "if", "when"];

/// Markers signalling list formatting.
const LIST_MARKERS: [&str; 5] = ["1.", "2.", "-", "•", "*"];

/// Keywords signalling deliberate structure.
const STRUCTURE_MARKERS: [&str; 4] = ["단계", "순서", "단락", "파트"];

/// Hangul syllables count fractionally; Latin words count slightly more
/// than one token each. Matches the original estimator.
const HANGUL_CHARS_PER_TOKEN: f64 = 1.5;
const LATIN_TOKENS_PER_WORD: f64 = 1.3;

/// Lexical/structural signals extracted from raw text.
#[derive(Debug, Clone, Serialize)]
pub struct TextFeatures {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_words_per_sentence: f64,
    pub has_questions: bool,
    pub has_conditions: bool,
    pub has_lists: bool,
    pub has_structure: bool,
    pub estimated_tokens: usize,
}

/// Extract all features from raw text.
pub fn extract(text: &str) -> TextFeatures {
    let word_count = text.split_whitespace().count();
    // Split keeps empty trailing fields, so "a. b." counts as 3 segments.
    let sentence_count = SENTENCE_SPLIT.split(text).count();
    let avg_words_per_sentence = word_count as f64 / sentence_count.max(1) as f64;

    TextFeatures {
        word_count,
        sentence_count,
        avg_words_per_sentence,
        has_questions: text.contains('?'),
        has_conditions: CONDITION_MARKERS.iter().any(|m| text.contains(m)),
        has_lists: LIST_MARKERS.iter().any(|m| text.contains(m)),
        has_structure: STRUCTURE_MARKERS.iter().any(|m| text.contains(m)),
        estimated_tokens: estimate_tokens(text),
    }
}

/// Rough token count: Hangul characters at 1 token per 1.5 chars plus
/// ASCII words at 1.3 tokens each, truncated.
pub fn estimate_tokens(text: &str) -> usize {
    let hangul_chars = text.chars().filter(|c| ('가'..='힣').contains(c)).count();
    let ascii_words = ASCII_WORD.find_iter(text).count();

    let tokens =
        hangul_chars as f64 / HANGUL_CHARS_PER_TOKEN + ascii_words as f64 * LATIN_TOKENS_PER_WORD;
    tokens as usize
}

/// Derive the discrete complexity tier from extracted features.
pub fn complexity(features: &TextFeatures) -> Complexity {
    let mut score = 0u32;

    // Length
    if features.word_count > 50 {
        score += 2;
    } else if features.word_count > 20 {
        score += 1;
    }

    // Structure
    if features.has_conditions {
        score += 2;
    }
    if features.has_questions {
        score += 1;
    }
    if features.has_lists || features.has_structure {
        score += 1;
    }

    // Sentence length
    if features.avg_words_per_sentence > 15.0 {
        score += 1;
    }

    if score >= 5 {
        Complexity::High
    } else if score >= 3 {
        Complexity::Medium
    } else {
        Complexity::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_korean_prompt_is_low_complexity() {
        let features = extract("코드 리뷰를 부탁드립니다");
        assert_eq!(features.word_count, 3);
        assert!(!features.has_lists);
        assert!(!features.has_conditions);
        assert_eq!(complexity(&features), Complexity::Low);
    }

    #[test]
    fn test_token_estimate_mixes_scripts() {
        // 10 Hangul chars -> 6 tokens, 2 ASCII words -> 2.6 tokens, truncated.
        let text = "가나다라마바사아자차 hello world";
        assert_eq!(estimate_tokens(text), 9);
    }

    #[test]
    fn test_token_estimate_empty() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn test_conditions_and_lists_raise_complexity() {
        let text = "만약 오류가 발생하는 경우 다음 단계를 따르세요: 1. 로그 확인 2. 재시작 \
                    3. 보고서 작성. 각 단계는 순서대로 진행해야 합니다. 추가로 필요한 경우 \
                    담당자에게 문의하세요. 이 작업은 매우 중요합니다.";
        let features = extract(text);
        assert!(features.has_conditions);
        assert!(features.has_lists);
        assert!(features.has_structure);
        assert!(complexity(&features) >= Complexity::Medium);
    }

    #[test]
    fn test_sentence_split_counts_trailing_segment() {
        let features = extract("First sentence. Second sentence.");
        assert_eq!(features.sentence_count, 3);
    }
}
