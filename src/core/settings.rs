//! Persisted per-view user settings.
//!
//! Each view stores its size mode, its fixed size and its recent size list
//! as a small JSON tree. Loading is lenient: missing or invalid entries are
//! skipped rather than reported.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::recent_sizes::RecentSizeHistory;
use super::size_input::clamp_size;
use super::size_mode::{SizeMode, SizeModeKind};
use crate::error::{Result, ViewportError};
use crate::math::Size;

const SPECIAL_RENDER_SIZE: &str = "SpecialRenderSize";
const RENDER_SIZE: &str = "RenderSize";
const RECENT_RENDER_SIZES: &str = "RecentRenderSizes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct SizeRecord {
    #[serde(rename = "X")]
    x: i64,
    #[serde(rename = "Y")]
    y: i64,
}

impl From<Size> for SizeRecord {
    fn from(size: Size) -> Self {
        Self {
            x: size.width as i64,
            y: size.height as i64,
        }
    }
}

#[derive(Debug, Serialize)]
struct ViewRecord {
    #[serde(rename = "SpecialRenderSize", skip_serializing_if = "Option::is_none")]
    special_render_size: Option<&'static str>,
    #[serde(rename = "RenderSize", skip_serializing_if = "Option::is_none")]
    render_size: Option<SizeRecord>,
    #[serde(rename = "RecentRenderSizes")]
    recent_render_sizes: Vec<SizeRecord>,
}

/// The persisted part of a view's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedView {
    pub mode: SizeMode,
    pub target_size: Size,
    pub recent: RecentSizeHistory,
}

impl PersistedView {
    /// Encode as a settings tree
    pub fn save(&self) -> Result<Value> {
        let recent_render_sizes = self.recent.iter().map(|&s| s.into()).collect();
        let record = match self.mode {
            SizeMode::Fixed(size) => ViewRecord {
                special_render_size: None,
                render_size: Some(size.into()),
                recent_render_sizes,
            },
            other => ViewRecord {
                special_render_size: Some(other.kind().as_str()),
                render_size: None,
                recent_render_sizes,
            },
        };

        Ok(serde_json::to_value(record)?)
    }

    /// Apply a settings tree on top of the current state
    ///
    /// A non-fixed `SpecialRenderSize` wins and leaves the size alone.
    /// Otherwise a `RenderSize` switches to fixed mode, each missing axis
    /// keeping its current value.
    pub fn load(&mut self, node: &Value) {
        let special = node
            .get(SPECIAL_RENDER_SIZE)
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<SizeModeKind>().ok());

        match (special, node.get(RENDER_SIZE)) {
            (Some(SizeModeKind::CamView), _) => self.mode = SizeMode::MatchDisplayArea,
            (Some(SizeModeKind::GameTarget), _) => self.mode = SizeMode::MatchExternalTarget,
            (_, Some(render_size)) => {
                let x = int_field(render_size, "X").unwrap_or(self.target_size.width as i64);
                let y = int_field(render_size, "Y").unwrap_or(self.target_size.height as i64);
                let size = clamp_size(x, y);
                self.mode = SizeMode::Fixed(size);
                self.target_size = size;
            }
            _ => {}
        }

        if let Some(entries) = node.get(RECENT_RENDER_SIZES).and_then(Value::as_array) {
            let sizes = entries.iter().filter_map(|entry| {
                let x = int_field(entry, "X").unwrap_or(0);
                let y = int_field(entry, "Y").unwrap_or(0);
                if x <= 0 || y <= 0 {
                    debug!("Skipping invalid recent size entry {}", entry);
                    return None;
                }
                Some(Size::new(
                    u32::try_from(x).unwrap_or(u32::MAX),
                    u32::try_from(y).unwrap_or(u32::MAX),
                ))
            });
            self.recent = RecentSizeHistory::from_sizes(sizes);
        }
    }
}

fn int_field(node: &Value, key: &str) -> Option<i64> {
    match node.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Settings file holding one record per named view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub views: BTreeMap<String, Value>,
}

impl SettingsFile {
    /// Read settings; a missing file yields empty settings
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ViewportError::SettingsIo {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Ok(serde_json::from_str(&text)?)
    }

    /// Write settings as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        let io_err = |source: std::io::Error| ViewportError::SettingsIo {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(io_err)
    }

    pub fn view(&self, name: &str) -> Option<&Value> {
        self.views.get(name)
    }

    pub fn set_view(&mut self, name: &str, node: Value) {
        if node.is_null() {
            warn!("Refusing to store empty settings for view '{}'", name);
            return;
        }
        self.views.insert(name.to_string(), node);
    }
}
