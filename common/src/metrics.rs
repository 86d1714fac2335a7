//! 派生統計の計算
//!
//! 入力テキストとサービス応答から読みやすさの指標を計算する。
//! 純粋関数で、結果はキャッシュしない（毎回再計算する）。

use crate::types::ScoreResult;

/// 読みやすさ推定の定数
///
/// Flesch Reading Easeに似たヒューリスティック。本来の式は音節数/語を使うが、
/// ここでは文字数/語を5で割ったものを代わりに使うため係数は 84.6/5 = 16.92 になる。
pub const READABILITY_BASE: f64 = 206.835;
pub const SENTENCE_LENGTH_WEIGHT: f64 = 1.015;
pub const WORD_LENGTH_WEIGHT: f64 = 84.6 / 5.0;

/// 派生統計（永続化しない）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedStats {
    pub word_count: usize,
    pub avg_words_per_sentence: f64,
    pub avg_chars_per_word: f64,
    /// 0-100にクランプ済み
    pub readability_estimate: f64,
}

impl DerivedStats {
    /// 表示用（小数1桁）
    pub fn display_words_per_sentence(&self) -> f64 {
        round1(self.avg_words_per_sentence)
    }

    pub fn display_chars_per_word(&self) -> f64 {
        round1(self.avg_chars_per_word)
    }

    pub fn display_readability(&self) -> f64 {
        round1(self.readability_estimate)
    }
}

/// 派生統計を計算
///
/// テキストか結果のどちらかが無ければ `None`（部分的なデータから統計を作らない）。
/// 履歴から復元した結果もメタデータがゼロ埋めなので `None`。
/// 文数はサービスの値を信頼し、クライアント側で再分割しない。
///
/// # Examples
/// ```
/// use traceneuro_common::{derive_stats, ScoreResult};
///
/// assert!(derive_stats(Some("some text here"), None).is_none());
///
/// let mut result = ScoreResult::default();
/// result.metadata.sentence_count = 2;
/// let stats = derive_stats(Some("one two three four"), Some(&result)).unwrap();
/// assert_eq!(stats.avg_words_per_sentence, 2.0);
/// ```
pub fn derive_stats(raw_text: Option<&str>, result: Option<&ScoreResult>) -> Option<DerivedStats> {
    let text = raw_text.filter(|t| !t.is_empty())?;
    let result = result.filter(|r| !r.reconstructed)?;

    let word_count = text.split_whitespace().count();
    let sentence_count = result.metadata.sentence_count as usize;

    let avg_words_per_sentence = ratio(word_count, sentence_count);
    let avg_chars_per_word = ratio(text.chars().count(), word_count);

    let readability_estimate = (READABILITY_BASE
        - SENTENCE_LENGTH_WEIGHT * avg_words_per_sentence
        - WORD_LENGTH_WEIGHT * avg_chars_per_word)
        .clamp(0.0, 100.0);

    Some(DerivedStats {
        word_count,
        avg_words_per_sentence,
        avg_chars_per_word,
        readability_estimate,
    })
}

/// 0除算は0
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// 小数1桁に丸める
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
