//! Typed library settings
//!
//! Settings are an explicit value handed to every core call. Stored files are
//! never trusted: each field is defaulted on its own and clamped into its
//! valid range when loaded. Interactive edits are validated instead, so an
//! out-of-range value is rejected with the range it must fall in.

use crate::MINUTE_MS;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

pub const SESSION_GAP_MINUTES_RANGE: RangeInclusive<u32> = 1..=60;
pub const MAX_PHOTOS_RANGE: RangeInclusive<u32> = 100..=5000;
pub const MAX_STORAGE_MB_RANGE: RangeInclusive<u32> = 100..=2000;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Errors produced while loading or editing settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("unknown settings key: {0}")]
    UnknownKey(String),

    #[error("invalid value for {key}: {value:?} ({expected})")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("{key} = {value} is out of range ({min}-{max})")]
    OutOfRange {
        key: &'static str,
        value: i64,
        min: u32,
        max: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub session: SessionSettings,
    pub retention: RetentionSettings,
    pub gallery: GallerySettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Largest gap between consecutive photos of one session
    pub gap_minutes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionSettings {
    pub max_photos: u32,
    pub max_storage_mb: u32,
    /// Enforce limits automatically after every capture
    pub auto_enforce: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GallerySettings {
    /// Ask before deleting a single photo
    pub confirm_delete: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            session: SessionSettings { gap_minutes: 10 },
            retention: RetentionSettings {
                max_photos: 1000,
                max_storage_mb: 500,
                auto_enforce: true,
            },
            gallery: GallerySettings {
                confirm_delete: false,
            },
        }
    }
}

/// On-disk shape: every field optional so partial files still load
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    #[serde(default)]
    session: RawSession,
    #[serde(default)]
    retention: RawRetention,
    #[serde(default)]
    gallery: RawGallery,
}

#[derive(Debug, Default, Deserialize)]
struct RawSession {
    gap_minutes: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRetention {
    max_photos: Option<i64>,
    max_storage_mb: Option<i64>,
    auto_enforce: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct RawGallery {
    confirm_delete: Option<bool>,
}

impl Settings {
    /// Every key accepted by [`Settings::get`] and [`Settings::set`]
    pub const KEYS: [&'static str; 5] = [
        "session.gap_minutes",
        "retention.max_photos",
        "retention.max_storage_mb",
        "retention.auto_enforce",
        "gallery.confirm_delete",
    ];

    /// Parse a settings file, defaulting missing fields and clamping the rest
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let raw: RawSettings = toml::from_str(content)?;
        let defaults = Self::default();

        Ok(Self {
            session: SessionSettings {
                gap_minutes: clamp_or(
                    raw.session.gap_minutes,
                    defaults.session.gap_minutes,
                    SESSION_GAP_MINUTES_RANGE,
                ),
            },
            retention: RetentionSettings {
                max_photos: clamp_or(
                    raw.retention.max_photos,
                    defaults.retention.max_photos,
                    MAX_PHOTOS_RANGE,
                ),
                max_storage_mb: clamp_or(
                    raw.retention.max_storage_mb,
                    defaults.retention.max_storage_mb,
                    MAX_STORAGE_MB_RANGE,
                ),
                auto_enforce: raw
                    .retention
                    .auto_enforce
                    .unwrap_or(defaults.retention.auto_enforce),
            },
            gallery: GallerySettings {
                confirm_delete: raw
                    .gallery
                    .confirm_delete
                    .unwrap_or(defaults.gallery.confirm_delete),
            },
        })
    }

    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every numeric field against its valid range
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_range(
            "session.gap_minutes",
            self.session.gap_minutes,
            SESSION_GAP_MINUTES_RANGE,
        )?;
        check_range(
            "retention.max_photos",
            self.retention.max_photos,
            MAX_PHOTOS_RANGE,
        )?;
        check_range(
            "retention.max_storage_mb",
            self.retention.max_storage_mb,
            MAX_STORAGE_MB_RANGE,
        )?;
        Ok(())
    }

    pub fn session_gap_ms(&self) -> u64 {
        u64::from(self.session.gap_minutes) * MINUTE_MS
    }

    pub fn max_photos(&self) -> usize {
        self.retention.max_photos as usize
    }

    pub fn max_bytes(&self) -> u64 {
        u64::from(self.retention.max_storage_mb) * BYTES_PER_MB
    }

    /// Read a value by dotted key
    pub fn get(&self, key: &str) -> Result<String, SettingsError> {
        let value = match key {
            "session.gap_minutes" => self.session.gap_minutes.to_string(),
            "retention.max_photos" => self.retention.max_photos.to_string(),
            "retention.max_storage_mb" => self.retention.max_storage_mb.to_string(),
            "retention.auto_enforce" => self.retention.auto_enforce.to_string(),
            "gallery.confirm_delete" => self.gallery.confirm_delete.to_string(),
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        };
        Ok(value)
    }

    /// Set a value by dotted key, rejecting out-of-range numbers
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        match key {
            "session.gap_minutes" => {
                self.session.gap_minutes =
                    parse_in_range("session.gap_minutes", value, SESSION_GAP_MINUTES_RANGE)?;
            }
            "retention.max_photos" => {
                self.retention.max_photos =
                    parse_in_range("retention.max_photos", value, MAX_PHOTOS_RANGE)?;
            }
            "retention.max_storage_mb" => {
                self.retention.max_storage_mb =
                    parse_in_range("retention.max_storage_mb", value, MAX_STORAGE_MB_RANGE)?;
            }
            "retention.auto_enforce" => {
                self.retention.auto_enforce = parse_bool(key, value)?;
            }
            "gallery.confirm_delete" => {
                self.gallery.confirm_delete = parse_bool(key, value)?;
            }
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn clamp_or(value: Option<i64>, default: u32, range: RangeInclusive<u32>) -> u32 {
    match value {
        Some(v) => v.clamp(i64::from(*range.start()), i64::from(*range.end())) as u32,
        None => default,
    }
}

fn check_range(
    key: &'static str,
    value: u32,
    range: RangeInclusive<u32>,
) -> Result<(), SettingsError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange {
            key,
            value: i64::from(value),
            min: *range.start(),
            max: *range.end(),
        })
    }
}

fn parse_in_range(
    key: &'static str,
    value: &str,
    range: RangeInclusive<u32>,
) -> Result<u32, SettingsError> {
    let parsed: i64 = value
        .trim()
        .parse()
        .map_err(|_| SettingsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected: "an integer",
        })?;

    if parsed < i64::from(*range.start()) || parsed > i64::from(*range.end()) {
        return Err(SettingsError::OutOfRange {
            key,
            value: parsed,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(parsed as u32)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, SettingsError> {
    value
        .trim()
        .parse()
        .map_err(|_| SettingsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected: "'true' or 'false'",
        })
}
