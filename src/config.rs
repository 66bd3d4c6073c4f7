use crate::domain::axis::{Axis, AxisError};
use crate::interpolation::{FlowDirection, Scheme};

use json::{object, JsonValue};
use std::fs::read_to_string;
use thiserror::Error;
use tracing::debug;

/// Interpolation settings for a flow channel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct InterpolationConfig {
    pub scheme: Scheme,
    pub flow_direction: FlowDirection,
}

impl InterpolationConfig {
    /// Load interpolation settings from a JSON file
    ///
    /// Both keys are optional; missing keys take their default (upwind, forward).
    ///
    /// ```text
    /// {
    ///     "scheme": "central",
    ///     "flow_direction": "reverse"
    /// }
    /// ```
    pub fn from_file(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        let contents = read_to_string(path.as_ref())?;
        let config = Self::from_json(&json::parse(&contents)?)?;

        debug!(path = path.as_ref(), scheme = %config.scheme, flow = %config.flow_direction, "loaded interpolation config");
        Ok(config)
    }

    pub fn from_json(config_json: &JsonValue) -> Result<Self, ConfigError> {
        if !config_json.is_object() {
            return Err(ConfigError::BadValue("interpolation config must be an object"));
        }

        let scheme = match &config_json["scheme"] {
            JsonValue::Null => Scheme::default(),
            value => {
                let name = value.as_str().ok_or(ConfigError::BadValue("scheme must be a string"))?;
                Scheme::from_name(name).ok_or_else(|| ConfigError::UnknownScheme(name.to_string()))?
            }
        };

        let flow_direction = match &config_json["flow_direction"] {
            JsonValue::Null => FlowDirection::default(),
            value => {
                let name = value
                    .as_str()
                    .ok_or(ConfigError::BadValue("flow_direction must be a string"))?;
                FlowDirection::from_name(name)
                    .ok_or_else(|| ConfigError::UnknownFlowDirection(name.to_string()))?
            }
        };

        Ok(Self {
            scheme,
            flow_direction,
        })
    }

    pub fn to_json(&self) -> JsonValue {
        object! {
            "scheme": self.scheme.name(),
            "flow_direction": self.flow_direction.name(),
        }
    }
}

/// Load an [Axis] from a JSON file
///
/// The file either lists the face coordinates, or asks for a number of equally sized control volumes:
///
/// ```text
/// { "faces": [0.0, 0.1, 0.3, 0.6, 1.0] }
/// { "uniform_nodes": 8 }
/// ```
pub fn axis_from_file(path: impl AsRef<str>) -> Result<Axis, ConfigError> {
    let contents = read_to_string(path.as_ref())?;
    let axis = axis_from_json(&json::parse(&contents)?)?;

    debug!(path = path.as_ref(), num_nodes = axis.num_nodes(), "loaded axis");
    Ok(axis)
}

pub fn axis_from_json(axis_json: &JsonValue) -> Result<Axis, ConfigError> {
    if axis_json["faces"].is_array() {
        let faces = axis_json["faces"]
            .members()
            .map(|face| face.as_f64().ok_or(ConfigError::BadValue("faces must be numerical values")))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Axis::new(faces)?)
    } else if !axis_json["uniform_nodes"].is_null() {
        let num_nodes = axis_json["uniform_nodes"]
            .as_usize()
            .ok_or(ConfigError::BadValue("uniform_nodes must be a non-negative integer"))?;
        Ok(Axis::uniform(num_nodes)?)
    } else {
        Err(ConfigError::MissingKey("faces"))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unable to parse config file as JSON: {0}")]
    Parse(#[from] json::Error),
    #[error("Config is missing the '{0}' key; Cannot load config!")]
    MissingKey(&'static str),
    #[error("Invalid config value: {0}; Cannot load config!")]
    BadValue(&'static str),
    #[error("Unknown interpolation scheme '{0}'; Cannot load config!")]
    UnknownScheme(String),
    #[error("Unknown flow direction '{0}'; Cannot load config!")]
    UnknownFlowDirection(String),
    #[error(transparent)]
    Axis(#[from] AxisError),
}
