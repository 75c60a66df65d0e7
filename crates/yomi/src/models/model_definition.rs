//! Analysis Result Data Model
//!
//! Defines the token sequence produced by the ichiran engine and the
//! decoder for its JSON segmentation output.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::errors::{EngineError, EngineResult};

/// A single gloss (dictionary sense) attached to a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gloss {
  /// Part-of-speech tag as emitted by the engine (e.g. `[n]`)
  pub pos: String,

  /// English gloss text
  pub gloss: String,
}

/// A single analysis token
///
/// Lexical tokens carry kana reading, romanization and glosses.
/// Non-lexical tokens (punctuation, non-Japanese runs) only carry the
/// surface form, mirrored into `kana` and `romaji` so that the joined
/// forms stay aligned with the original text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisToken {
  /// Surface form (string appearing in the original text)
  pub surface: String,

  /// Whether the engine recognized this token as a lexical word
  pub is_lexical: bool,

  /// Kana reading (surface form for non-lexical tokens)
  pub kana: String,

  /// Romanized form (surface form for non-lexical tokens)
  pub romaji: String,

  /// Segmentation score reported by the engine (0 for non-lexical tokens)
  pub score: i64,

  /// Dictionary senses (empty for non-lexical tokens)
  #[serde(default)]
  pub gloss: Vec<Gloss>,
}

impl AnalysisToken {
  /// Creates a non-lexical token from a raw text run
  #[must_use]
  pub fn non_lexical(surface: impl Into<String>) -> Self {
    let surface = surface.into();
    Self {
      kana: surface.clone(),
      romaji: surface.clone(),
      surface,
      is_lexical: false,
      score: 0,
      gloss: Vec::new(),
    }
  }
}

/// Complete analysis of one input text
///
/// Immutable once produced; owned by the request that triggered the
/// analysis and discarded after the response is written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
  /// Ordered token sequence
  pub tokens: Vec<AnalysisToken>,
}

impl AnalysisResult {
  /// Surface forms of all tokens, in order
  #[must_use]
  pub fn tokenized_parts(&self) -> Vec<String> {
    self.tokens.iter().map(|t| t.surface.clone()).collect()
  }

  /// Surface forms joined with a single space
  #[must_use]
  pub fn tokenized(&self) -> String {
    self.tokenized_parts().join(" ")
  }

  /// Kana readings of all tokens, in order
  #[must_use]
  pub fn kana_parts(&self) -> Vec<String> {
    self.tokens.iter().map(|t| t.kana.clone()).collect()
  }

  /// Kana readings joined with a single space
  #[must_use]
  pub fn kana(&self) -> String {
    self.kana_parts().join(" ")
  }

  /// Romanized forms of all tokens, in order
  #[must_use]
  pub fn roman_parts(&self) -> Vec<String> {
    self.tokens.iter().map(|t| t.romaji.clone()).collect()
  }

  /// Romanized forms joined with a single space
  #[must_use]
  pub fn roman(&self) -> String {
    self.roman_parts().join(" ")
  }

  /// One formatted gloss line per lexical token that has senses
  ///
  /// Format: `surface (kana): 1. [pos] gloss 2. [pos] gloss ...`
  #[must_use]
  pub fn gloss_parts(&self) -> Vec<String> {
    self
      .tokens
      .iter()
      .filter(|t| t.is_lexical && !t.gloss.is_empty())
      .map(|t| {
        let senses: Vec<String> = t
          .gloss
          .iter()
          .enumerate()
          .map(|(i, g)| format!("{}. {} {}", i + 1, g.pos, g.gloss))
          .collect();
        format!("{} ({}): {}", t.surface, t.kana, senses.join(" "))
      })
      .collect()
  }

  /// Decodes the JSON segmentation output of `ichiran-cli -f`
  ///
  /// The root is an array of segments. A segment is either a plain JSON
  /// string (non-lexical run) or a nested array of scored segmentations,
  /// of which only the best (first) word list is taken. Each word entry
  /// is `[romaji, info, ...]` with kana/text/score/gloss in `info`.
  ///
  /// # Errors
  /// Returns [`EngineError::Parse`] if the root is not an array or a
  /// lexical segment contains no recognizable word list.
  pub fn from_ichiran_json(raw: &str) -> EngineResult<Self> {
    let root: JsonValue = serde_json::from_str(raw)?;
    let segments = root
      .as_array()
      .ok_or_else(|| EngineError::parse("ルートが配列ではありません"))?;

    let mut tokens = Vec::new();
    for segment in segments {
      match segment {
        JsonValue::String(text) => {
          let trimmed = text.trim();
          if !trimmed.is_empty() {
            tokens.push(AnalysisToken::non_lexical(trimmed));
          }
        }
        JsonValue::Array(_) => {
          let words = find_word_list(segment).ok_or_else(|| {
            EngineError::parse("セグメント内に語リストが見つかりません")
          })?;
          for word in words {
            if let Some(token) = decode_word(word) {
              tokens.push(token);
            }
          }
        }
        other => {
          return Err(EngineError::parse(format!(
            "不正なセグメント型です: {other}"
          )));
        }
      }
    }

    Ok(Self { tokens })
  }
}

/// Depth-first search for the first array whose elements are all word
/// entries (`[string, object, ...]`).
///
/// The engine wraps the best segmentation in several levels of nesting
/// (alternatives and scores); searching by shape keeps the decoder
/// stable across those levels.
fn find_word_list(value: &JsonValue) -> Option<&Vec<JsonValue>> {
  let array = value.as_array()?;
  if !array.is_empty() && array.iter().all(is_word_entry) {
    return Some(array);
  }
  array.iter().find_map(find_word_list)
}

/// A word entry starts with the romanized form and carries an info object
fn is_word_entry(value: &JsonValue) -> bool {
  value
    .as_array()
    .is_some_and(|entry| entry.len() >= 2 && entry[0].is_string() && entry[1].is_object())
}

/// Decodes a single `[romaji, info, ...]` word entry
fn decode_word(word: &JsonValue) -> Option<AnalysisToken> {
  let entry = word.as_array()?;
  let romaji = entry.first()?.as_str()?.to_string();
  let info = entry.get(1)?.as_object()?;

  // Words without a direct reading delegate to their first alternative
  let info = match info.get("alternative").and_then(JsonValue::as_array) {
    Some(alternatives) => alternatives.first().and_then(JsonValue::as_object).unwrap_or(info),
    None => info,
  };

  let surface = info.get("text").and_then(JsonValue::as_str)?.to_string();
  let kana = info
    .get("kana")
    .and_then(JsonValue::as_str)
    .unwrap_or(surface.as_str())
    .to_string();
  let score = info.get("score").and_then(JsonValue::as_i64).unwrap_or(0);

  let mut gloss = decode_gloss_array(info.get("gloss"));
  if gloss.is_empty() {
    // Conjugated words carry their senses under conj[].gloss
    if let Some(conjugations) = info.get("conj").and_then(JsonValue::as_array) {
      for conjugation in conjugations {
        gloss.extend(decode_gloss_array(conjugation.get("gloss")));
      }
    }
  }

  Some(AnalysisToken { surface, is_lexical: true, kana, romaji, score, gloss })
}

/// Decodes a `gloss` array of `{pos, gloss}` objects, skipping malformed entries
fn decode_gloss_array(value: Option<&JsonValue>) -> Vec<Gloss> {
  value
    .and_then(JsonValue::as_array)
    .map(|entries| {
      entries
        .iter()
        .filter_map(|entry| {
          let object = entry.as_object()?;
          Some(Gloss {
            pos: object.get("pos").and_then(JsonValue::as_str).unwrap_or_default().to_string(),
            gloss: object.get("gloss").and_then(JsonValue::as_str)?.to_string(),
          })
        })
        .collect()
    })
    .unwrap_or_default()
}
