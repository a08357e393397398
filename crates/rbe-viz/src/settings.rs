//! Typed view/compute configuration.
//!
//! Process-wide state with no lifecycle beyond "load defaults, accept user
//! edits, persist until changed". Loaded from JSON with validation up
//! front; string edits from the host settings dialog go through
//! [`Settings::apply_edits`], which keeps the previous value on any key or
//! parse failure instead of crashing.

use serde::{Deserialize, Serialize};

use rbe_types::Color;

/// Errors from settings loading and validation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to parse settings: {0}")]
    ParseError(String),

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Visibility {
    pub assembly_vertices: bool,
    pub assembly_edges: bool,
    pub block_vertices: bool,
    pub block_edges: bool,
    pub block_faces: bool,
    pub block_selfweight: bool,
    pub interfaces: bool,
    pub interface_forces: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            assembly_vertices: false,
            assembly_edges: false,
            block_vertices: false,
            block_edges: true,
            block_faces: false,
            block_selfweight: false,
            interfaces: true,
            interface_forces: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Colors {
    pub assembly_vertex: Color,
    pub assembly_edge: Color,
    pub support: Color,
    pub block_vertex: Color,
    pub block_edge: Color,
    pub block_face: Color,
    pub interface: Color,
    pub compression: Color,
    pub tension: Color,
    pub selfweight: Color,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            assembly_vertex: Color::BLACK,
            assembly_edge: Color::BLACK,
            support: Color::RED,
            block_vertex: Color::GREEN,
            block_edge: Color::WHITE,
            block_face: Color::new(200, 200, 200),
            interface: Color::WHITE,
            compression: Color::BLUE,
            tension: Color::RED,
            selfweight: Color::GREEN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scales {
    pub interface_forces: f64,
    pub selfweight: f64,
}

impl Default for Scales {
    fn default() -> Self {
        Self {
            interface_forces: 1.0,
            selfweight: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    pub interface_forces: f64,
    pub selfweight: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            interface_forces: 1e-3,
            selfweight: 1e-3,
        }
    }
}

/// Options forwarded to the force-equilibrium solver call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputeSettings {
    pub verbose: bool,
    pub max_iters: u32,
}

impl Default for ComputeSettings {
    fn default() -> Self {
        Self {
            verbose: true,
            max_iters: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub visibility: Visibility,
    pub color: Colors,
    pub scale: Scales,
    pub eps: Tolerances,
    pub compute: ComputeSettings,
}

impl Settings {
    /// Load from JSON, validating numeric ranges before use.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| SettingsError::ParseError(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        for (key, value) in [
            ("scale.interfaces.forces", self.scale.interface_forces),
            ("scale.selfweight", self.scale.selfweight),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::InvalidValue {
                    key: key.to_string(),
                    reason: format!("scale must be a positive number, got {value}"),
                });
            }
        }
        for (key, value) in [
            ("eps.interfaces.forces", self.eps.interface_forces),
            ("eps.selfweight", self.eps.selfweight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::InvalidValue {
                    key: key.to_string(),
                    reason: format!("tolerance must be non-negative, got {value}"),
                });
            }
        }
        if self.compute.max_iters == 0 {
            return Err(SettingsError::InvalidValue {
                key: "compute_interface_forces.max_iters".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Apply string key/value edits from the host settings dialog.
    ///
    /// Lenient: an unknown key, unparsable value, or out-of-range value
    /// leaves the previous typed value in place and is returned as a
    /// warning. Valid edits stick.
    pub fn apply_edits<'a, I>(&mut self, edits: I) -> Vec<String>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut warnings = Vec::new();
        for (key, value) in edits {
            if let Err(e) = self.apply_edit(key, value) {
                warnings.push(e.to_string());
            }
        }
        warnings
    }

    fn apply_edit(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        match key {
            "visibility.assembly.vertices" => {
                self.visibility.assembly_vertices = parse_bool(key, value)?
            }
            "visibility.assembly.edges" => self.visibility.assembly_edges = parse_bool(key, value)?,
            "visibility.blocks.vertices" => self.visibility.block_vertices = parse_bool(key, value)?,
            "visibility.blocks.edges" => self.visibility.block_edges = parse_bool(key, value)?,
            "visibility.blocks.faces" => self.visibility.block_faces = parse_bool(key, value)?,
            "visibility.blocks.selfweight" => {
                self.visibility.block_selfweight = parse_bool(key, value)?
            }
            "visibility.interfaces" => self.visibility.interfaces = parse_bool(key, value)?,
            "visibility.interfaces.forces" => {
                self.visibility.interface_forces = parse_bool(key, value)?
            }

            "color.assembly.vertex" => self.color.assembly_vertex = parse_color(key, value)?,
            "color.assembly.edge" => self.color.assembly_edge = parse_color(key, value)?,
            "color.support" => self.color.support = parse_color(key, value)?,
            "color.block.vertex" => self.color.block_vertex = parse_color(key, value)?,
            "color.block.edge" => self.color.block_edge = parse_color(key, value)?,
            "color.block.face" => self.color.block_face = parse_color(key, value)?,
            "color.interface" => self.color.interface = parse_color(key, value)?,
            "color.compression" => self.color.compression = parse_color(key, value)?,
            "color.tension" => self.color.tension = parse_color(key, value)?,
            "color.selfweight" => self.color.selfweight = parse_color(key, value)?,

            "scale.interfaces.forces" => {
                self.scale.interface_forces = parse_scale(key, value)?;
            }
            "scale.selfweight" => {
                self.scale.selfweight = parse_scale(key, value)?;
            }
            "eps.interfaces.forces" => {
                self.eps.interface_forces = parse_tolerance(key, value)?;
            }
            "eps.selfweight" => {
                self.eps.selfweight = parse_tolerance(key, value)?;
            }

            "compute_interface_forces.verbose" => self.compute.verbose = parse_bool(key, value)?,
            "compute_interface_forces.max_iters" => {
                let iters: u32 = value.trim().parse().map_err(|_| invalid(key, value))?;
                if iters == 0 {
                    return Err(SettingsError::InvalidValue {
                        key: key.to_string(),
                        reason: "must be at least 1".to_string(),
                    });
                }
                self.compute.max_iters = iters;
            }

            _ => {
                return Err(SettingsError::InvalidValue {
                    key: key.to_string(),
                    reason: "unknown setting".to_string(),
                })
            }
        }
        Ok(())
    }
}

fn invalid(key: &str, value: &str) -> SettingsError {
    SettingsError::InvalidValue {
        key: key.to_string(),
        reason: format!("cannot parse {value:?}"),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn parse_scale(key: &str, value: &str) -> Result<f64, SettingsError> {
    let parsed: f64 = value.trim().parse().map_err(|_| invalid(key, value))?;
    if !parsed.is_finite() || parsed <= 0.0 {
        return Err(SettingsError::InvalidValue {
            key: key.to_string(),
            reason: format!("scale must be a positive number, got {parsed}"),
        });
    }
    Ok(parsed)
}

fn parse_tolerance(key: &str, value: &str) -> Result<f64, SettingsError> {
    let parsed: f64 = value.trim().parse().map_err(|_| invalid(key, value))?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(SettingsError::InvalidValue {
            key: key.to_string(),
            reason: format!("tolerance must be non-negative, got {parsed}"),
        });
    }
    Ok(parsed)
}

/// Accept `"(r, g, b)"`, `"[r, g, b]"` or `"r, g, b"`.
fn parse_color(key: &str, value: &str) -> Result<Color, SettingsError> {
    let trimmed = value
        .trim()
        .trim_start_matches(['(', '['])
        .trim_end_matches([')', ']']);
    let channels: Vec<&str> = trimmed.split(',').map(str::trim).collect();
    if channels.len() != 3 {
        return Err(invalid(key, value));
    }
    let mut rgb = [0u8; 3];
    for (slot, channel) in rgb.iter_mut().zip(&channels) {
        *slot = channel.parse().map_err(|_| invalid(key, value))?;
    }
    Ok(Color::new(rgb[0], rgb[1], rgb[2]))
}
