//! Run configuration: feature toggles, keyword thresholds, stopwords and
//! custom-tag rules.
//!
//! A [`Config`] is an immutable snapshot loaded once per run. User overrides
//! from a JSON file are merged onto the built-in defaults:
//!
//! | Section | Merge rule |
//! |---------|------------|
//! | `features`, `keyword_settings` | key-by-key, unspecified keys keep their defaults |
//! | `custom_tags` | key-by-key, a user tag replaces the same-named default tag |
//! | `stopwords` | per category union, user words extend the defaults |
//! | `user_name`, `user_email` | replaced |
//! | any other key | copied verbatim into [`Config::extra`] |
//!
//! No range validation is performed. A negative `min_frequency` is accepted
//! and simply disables the frequency floor. Numeric settings may be written
//! as `5` or `5.0`; a fractional value such as `2.5` is a type error.
//!
//! # Example
//!
//! ```rust
//! use chatmd::Config;
//!
//! let config = Config::from_json_str(r#"{
//!     "user_name": "alice",
//!     "keyword_settings": {"min_frequency": 1},
//!     "stopwords": {"english": ["foo"]}
//! }"#)?;
//!
//! assert_eq!(config.user_name, "alice");
//! assert_eq!(config.keyword_settings.min_frequency, 1);
//! // Unspecified keys keep their defaults
//! assert_eq!(config.keyword_settings.max_keywords, 5);
//! // User stopwords extend the default category
//! assert!(config.stopwords["english"].contains("foo"));
//! assert!(config.stopwords["english"].contains("the"));
//! # Ok::<(), chatmd::ChatmdError>(())
//! ```

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use crate::error::{ChatmdError, Result};

/// Default file name looked up when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Complete configuration for one conversion run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    /// Name printed in the `**User:**` metadata line.
    pub user_name: String,

    /// Optional e-mail printed next to the user name (empty = omitted).
    pub user_email: String,

    /// Rendering and tagging toggles.
    pub features: Features,

    /// Thresholds for the keyword extractor.
    pub keyword_settings: KeywordSettings,

    /// Tag name → trigger phrases (case-insensitive substring match).
    pub custom_tags: BTreeMap<String, Vec<String>>,

    /// Category (`english`, `japanese`, `domain`, ...) → stopwords.
    pub stopwords: BTreeMap<String, BTreeSet<String>>,

    /// Unrecognized top-level keys, kept verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Rendering and tagging feature toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    pub show_statistics: bool,
    pub show_code_blocks: bool,
    pub show_links: bool,
    pub show_toc: bool,
    /// Minimum message count before a table of contents is emitted.
    #[serde(deserialize_with = "integral")]
    pub toc_threshold: i64,
    pub show_message_metadata: bool,
    pub show_timestamps: bool,
    pub show_message_length: bool,
    pub show_tags: bool,
    pub use_language_tags: bool,
    pub use_keyword_tags: bool,
    pub use_custom_tags: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            show_statistics: true,
            show_code_blocks: true,
            show_links: true,
            show_toc: true,
            toc_threshold: 5,
            show_message_metadata: true,
            show_timestamps: true,
            show_message_length: true,
            show_tags: true,
            use_language_tags: true,
            use_keyword_tags: true,
            use_custom_tags: true,
        }
    }
}

/// How a candidate term is matched against the conversation title for the
/// title boost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleMatch {
    /// Raw substring containment. Short terms can match inside longer title words.
    #[default]
    Substring,
    /// The term must equal a whole token or Latin word of the title.
    Token,
}

/// Keyword extraction thresholds.
///
/// Values are signed on purpose: out-of-range settings are accepted and
/// degrade extraction instead of failing the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordSettings {
    /// Minimum (boosted) occurrence count for a candidate.
    #[serde(deserialize_with = "integral")]
    pub min_frequency: i64,
    /// Per-namespace cap applied after ranking (negative counts as zero).
    #[serde(deserialize_with = "integral")]
    pub max_keywords: i64,
    /// Minimum candidate length in characters.
    #[serde(deserialize_with = "integral")]
    pub min_length: i64,
    /// Candidate pool size. Accepted for compatibility, not used by the ranking.
    #[serde(rename = "topK", deserialize_with = "integral")]
    pub top_k: i64,
    /// Title-boost matching strictness.
    pub title_match: TitleMatch,
}

impl Default for KeywordSettings {
    fn default() -> Self {
        Self {
            min_frequency: 3,
            max_keywords: 5,
            min_length: 2,
            top_k: 50,
            title_match: TitleMatch::Substring,
        }
    }
}

/// Reads a JSON number with no fractional part, so `5` and `5.0` both give `5`.
fn integral<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i64, D::Error> {
    let number = Number::deserialize(deserializer)?;
    if let Some(n) = number.as_i64() {
        return Ok(n);
    }
    match number.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e18 => Ok(f as i64),
        _ => Err(D::Error::custom(format!("expected an integer, found {number}"))),
    }
}

const DEFAULT_USER_NAME: &str = "mr.774";

const DEFAULT_CUSTOM_TAGS: &[(&str, &[&str])] = &[
    ("programming", &["code", "function", "class", "variable"]),
    ("error", &["error", "exception", "warning"]),
    ("question", &["how", "what", "why", "when", "where", "?"]),
    ("solution", &["solution", "answer", "fix", "resolve"]),
];

const ENGLISH_STOPWORDS: &[&str] = &[
    "the", "and", "is", "are", "was", "were", "be", "to", "of", "in", "on", "for", "with", "as",
    "by", "at", "an", "a", "it", "this", "that", "from", "or", "but", "not", "can", "will",
    "would", "should", "could", "has", "have", "had", "do", "does", "did", "so", "if", "then",
    "than", "which", "who", "whom", "what", "when", "where", "why", "how", "all", "any", "each",
    "few", "more", "most", "other", "some", "such", "no", "nor", "only", "own", "same", "too",
    "very",
];

const JAPANESE_STOPWORDS: &[&str] = &[
    "です", "ます", "こと", "それ", "これ", "あれ", "ため", "よう", "もの", "あと", "から",
    "まで", "ので", "でも", "また", "など", "その", "この", "あの", "そして", "しかし",
    "または", "なら", "ならば", "けど", "けれど", "けれども", "が", "に", "を", "で", "と",
    "や", "へ", "の", "も", "ね", "よ", "な", "か", "は", "より",
];

const DOMAIN_STOPWORDS: &[&str] = &[
    "質問", "回答", "会話", "内容", "例", "場合", "方法", "対応", "部分", "全体", "今回",
    "以上", "以下", "必要", "可能", "利用", "使用", "追加", "削除", "設定", "確認", "実行",
    "作成", "編集", "保存", "表示", "選択", "入力", "出力", "取得", "変更", "指定", "開始",
    "終了", "更新", "作業", "操作", "説明", "参考", "情報", "詳細", "注意", "結果", "理由",
    "目的", "手順", "注意点", "注意事項", "概要", "特徴",
];

fn word_set(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        let custom_tags = DEFAULT_CUSTOM_TAGS
            .iter()
            .map(|(tag, triggers)| {
                (
                    (*tag).to_string(),
                    triggers.iter().map(|t| (*t).to_string()).collect(),
                )
            })
            .collect();

        let stopwords = BTreeMap::from([
            ("english".to_string(), word_set(ENGLISH_STOPWORDS)),
            ("japanese".to_string(), word_set(JAPANESE_STOPWORDS)),
            ("domain".to_string(), word_set(DOMAIN_STOPWORDS)),
        ]);

        Self {
            user_name: DEFAULT_USER_NAME.to_string(),
            user_email: String::new(),
            features: Features::default(),
            keyword_settings: KeywordSettings::default(),
            custom_tags,
            stopwords,
            extra: BTreeMap::new(),
        }
    }
}

/// Shape of a user config file. Every section is optional.
#[derive(Debug, Deserialize)]
struct ConfigOverrides {
    user_name: Option<String>,
    user_email: Option<String>,
    features: Option<Features>,
    keyword_settings: Option<KeywordSettings>,
    custom_tags: Option<BTreeMap<String, Vec<String>>>,
    stopwords: Option<BTreeMap<String, Vec<String>>>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl Config {
    /// Creates the built-in default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration file, falling back to defaults on any problem.
    ///
    /// Never fails: a missing file, an unreadable file or a parse error is
    /// logged as a warning and the built-in defaults are returned.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "config file not found, using default configuration"
            );
            return Self::default();
        }

        let loaded = fs::read_to_string(path)
            .map_err(ChatmdError::from)
            .and_then(|content| Self::from_json_str(&content));

        match loaded {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded configuration");
                config
            }
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "could not load config file, using default configuration"
                );
                Self::default()
            }
        }
    }

    /// Parses a JSON config document and merges it onto the defaults.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let overrides: ConfigOverrides = serde_json::from_str(content)?;
        let mut config = Self::default();
        config.merge(overrides);
        Ok(config)
    }

    fn merge(&mut self, overrides: ConfigOverrides) {
        if let Some(user_name) = overrides.user_name {
            self.user_name = user_name;
        }
        if let Some(user_email) = overrides.user_email {
            self.user_email = user_email;
        }
        if let Some(features) = overrides.features {
            self.features = features;
        }
        if let Some(keyword_settings) = overrides.keyword_settings {
            self.keyword_settings = keyword_settings;
        }
        if let Some(custom_tags) = overrides.custom_tags {
            self.custom_tags.extend(custom_tags);
        }
        if let Some(stopwords) = overrides.stopwords {
            for (category, words) in stopwords {
                self.stopwords.entry(category).or_default().extend(words);
            }
        }
        self.extra.extend(overrides.extra);
    }

    /// Returns every stopword of every category, lowercased.
    pub fn stopword_set(&self) -> HashSet<String> {
        self.stopwords
            .values()
            .flatten()
            .map(|word| word.to_lowercase())
            .collect()
    }

    /// Sets the user name.
    #[must_use]
    pub fn with_user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = name.into();
        self
    }

    /// Sets the user e-mail.
    #[must_use]
    pub fn with_user_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = email.into();
        self
    }

    /// Replaces the feature toggles.
    #[must_use]
    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    /// Replaces the keyword settings.
    #[must_use]
    pub fn with_keyword_settings(mut self, settings: KeywordSettings) -> Self {
        self.keyword_settings = settings;
        self
    }

    /// Sets the minimum keyword frequency.
    #[must_use]
    pub fn with_min_frequency(mut self, min_frequency: i64) -> Self {
        self.keyword_settings.min_frequency = min_frequency;
        self
    }

    /// Adds (or replaces) a custom tag rule.
    #[must_use]
    pub fn with_custom_tag<I, S>(mut self, tag: impl Into<String>, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_tags
            .insert(tag.into(), triggers.into_iter().map(Into::into).collect());
        self
    }

    /// Adds stopwords to a category, creating it if needed.
    #[must_use]
    pub fn with_stopwords<I, S>(mut self, category: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords
            .entry(category.into())
            .or_default()
            .extend(words.into_iter().map(Into::into));
        self
    }
}
