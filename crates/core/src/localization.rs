//! # Localization
//!
//! Language negotiation and lookup of translated fields. The set of supported
//! languages and the fallback language live in a [`LocalizationConfig`] value
//! that callers construct once and pass around.

use std::collections::BTreeMap;

use crate::errors::{ScheduleError, ScheduleResult};
use crate::models::schedule::DayOfWeek;

/// Translations of one field, keyed by lowercase language code.
pub type LocalizedText = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizationConfig {
    supported_languages: Vec<String>,
    default_language: String,
}

impl LocalizationConfig {
    /// Builds a config from language codes such as `en`, `fr` or `ar-SA`.
    ///
    /// Codes are reduced to their lowercase primary subtag and de-duplicated.
    ///
    /// # Errors
    ///
    /// * `ScheduleError::Validation` - the list is empty, or the default
    ///   language is not one of the supported languages
    pub fn new<I, S>(supported_languages: I, default_language: &str) -> ScheduleResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut supported = Vec::new();
        for language in supported_languages {
            if let Some(code) = primary_subtag(language.as_ref()) {
                if !supported.contains(&code) {
                    supported.push(code);
                }
            }
        }

        if supported.is_empty() {
            return Err(ScheduleError::Validation(
                "At least one supported language is required".to_string(),
            ));
        }

        let default_language = primary_subtag(default_language).ok_or_else(|| {
            ScheduleError::Validation("Default language must not be empty".to_string())
        })?;

        if !supported.contains(&default_language) {
            return Err(ScheduleError::Validation(format!(
                "Default language '{}' is not in the supported languages",
                default_language
            )));
        }

        Ok(Self {
            supported_languages: supported,
            default_language,
        })
    }

    pub fn supported_languages(&self) -> &[String] {
        &self.supported_languages
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn is_supported(&self, language: &str) -> bool {
        primary_subtag(language).is_some_and(|code| self.supported_languages.contains(&code))
    }

    /// Picks the best supported language for a request.
    ///
    /// `requested` may be a single tag (`fr`, `fr-CA`) or a full
    /// `Accept-Language` value (`fr-CA,fr;q=0.9,en;q=0.8`). Entries are tried
    /// by descending quality, ties keeping header order. Falls back to the
    /// default language.
    pub fn negotiate(&self, requested: Option<&str>) -> &str {
        let Some(requested) = requested else {
            return &self.default_language;
        };

        let mut candidates: Vec<(String, f32)> = requested
            .split(',')
            .filter_map(|entry| {
                let mut parts = entry.split(';');
                let tag = primary_subtag(parts.next()?)?;
                let quality = parts
                    .filter_map(|param| param.trim().strip_prefix("q="))
                    .find_map(|q| q.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);
                (quality > 0.0).then_some((tag, quality))
            })
            .collect();

        // sort_by is stable, so equal weights keep header order
        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

        candidates
            .iter()
            .find_map(|(tag, _)| {
                self.supported_languages
                    .iter()
                    .find(|supported| *supported == tag)
            })
            .map(String::as_str)
            .unwrap_or(&self.default_language)
    }
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            supported_languages: vec!["en".to_string(), "fr".to_string(), "ar".to_string()],
            default_language: "en".to_string(),
        }
    }
}

/// Returns the translation for `language`, then the default language's, then
/// any non-empty translation.
pub fn resolve_localized_field<'a>(
    field: &'a LocalizedText,
    language: &str,
    config: &LocalizationConfig,
) -> Option<&'a str> {
    let non_empty = |code: &str| {
        field
            .get(code)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    };

    primary_subtag(language)
        .and_then(|code| non_empty(&code))
        .or_else(|| non_empty(config.default_language()))
        .or_else(|| field.values().map(String::as_str).find(|value| !value.is_empty()))
}

/// Weekday names in the languages the platform ships with.
pub fn weekday_labels(day: DayOfWeek) -> LocalizedText {
    let (en, fr, ar) = match day {
        DayOfWeek::Monday => ("Monday", "lundi", "الاثنين"),
        DayOfWeek::Tuesday => ("Tuesday", "mardi", "الثلاثاء"),
        DayOfWeek::Wednesday => ("Wednesday", "mercredi", "الأربعاء"),
        DayOfWeek::Thursday => ("Thursday", "jeudi", "الخميس"),
        DayOfWeek::Friday => ("Friday", "vendredi", "الجمعة"),
        DayOfWeek::Saturday => ("Saturday", "samedi", "السبت"),
        DayOfWeek::Sunday => ("Sunday", "dimanche", "الأحد"),
    };

    [("en", en), ("fr", fr), ("ar", ar)]
        .into_iter()
        .map(|(code, label)| (code.to_string(), label.to_string()))
        .collect()
}

fn primary_subtag(tag: &str) -> Option<String> {
    let code = tag.trim().split(['-', '_']).next()?.trim();
    if code.is_empty() || code == "*" {
        return None;
    }
    Some(code.to_ascii_lowercase())
}
