//! Response Model Definition

use serde::Serialize;

use yomi::models::AnalysisResult;

/// Analysis Response
///
/// Joined forms plus their per-token segmentations, formatted gloss
/// lines, and the selective transliteration over the configured top-N
/// kanji.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
  /// Tokenized form (surfaces joined with spaces)
  pub tokenized: String,
  /// Per-token surface forms
  pub tokenized_parts: Vec<String>,
  /// Kana reading
  pub kana: String,
  /// Per-token kana readings
  pub kana_parts: Vec<String>,
  /// Romanized form
  pub roman: String,
  /// Per-token romanized forms
  pub roman_parts: Vec<String>,
  /// Text with rare kanji replaced by kana
  pub selective_translit: String,
  /// Per-token selective transliteration
  pub selective_translit_parts: Vec<String>,
  /// Formatted gloss lines
  pub gloss_parts: Vec<String>,
}

impl AnalyzeResponse {
  /// Builds the response representation from an engine analysis
  #[must_use]
  pub fn from_analysis(result: &AnalysisResult, translit_limit: usize) -> Self {
    Self {
      tokenized: result.tokenized(),
      tokenized_parts: result.tokenized_parts(),
      kana: result.kana(),
      kana_parts: result.kana_parts(),
      roman: result.roman(),
      roman_parts: result.roman_parts(),
      selective_translit: result.selective_translit(translit_limit),
      selective_translit_parts: result.selective_translit_parts(translit_limit),
      gloss_parts: result.gloss_parts(),
    }
  }
}
