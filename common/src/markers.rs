//! 認知マーカーのカタログ
//!
//! サービスが返す内訳キーと表示ラベルの対応。
//! 未知のキーはそのまま表示する（前方互換）。

use crate::types::Breakdown;

/// 既知マーカーの定義
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerInfo {
    pub key: &'static str,
    pub label: &'static str,
    /// サービス側の融合重み（参考表示用）
    pub weight: f64,
}

/// 既知マーカー（表示順）
pub const KNOWN_MARKERS: &[MarkerInfo] = &[
    MarkerInfo { key: "drift", label: "Semantic Drift", weight: 0.20 },
    MarkerInfo { key: "cadence", label: "Cadence Variability", weight: 0.15 },
    MarkerInfo { key: "hedging", label: "Hedging Patterns", weight: 0.15 },
    MarkerInfo { key: "metaphor", label: "Metaphor Density", weight: 0.10 },
    MarkerInfo { key: "coherence", label: "Coherence", weight: 0.20 },
    MarkerInfo { key: "stylometry", label: "Stylometric Signature", weight: 0.20 },
];

pub fn find_marker(key: &str) -> Option<&'static MarkerInfo> {
    KNOWN_MARKERS.iter().find(|m| m.key == key)
}

/// 表示ラベル（未知キーは生のキー）
pub fn display_label(key: &str) -> &str {
    find_marker(key).map(|m| m.label).unwrap_or(key)
}

/// 内訳を表示順に並べる
///
/// 既知マーカーをカタログ順に、その後に未知キーをキー順に並べる。
pub fn ordered_breakdown(breakdown: &Breakdown) -> Vec<(&str, f64)> {
    let known = KNOWN_MARKERS
        .iter()
        .filter_map(|m| breakdown.get(m.key).map(|v| (m.key, *v)));

    let unknown = breakdown
        .iter()
        .filter(|(k, _)| find_marker(k).is_none())
        .map(|(k, v)| (k.as_str(), *v));

    known.chain(unknown).collect()
}
