//! JSON node configuration.
//!
//! A config file names one node kind and its settings, e.g.
//! `{"node": "bounce", "width": 160, "height": 120, "speed": 3}`. Omitted settings take their
//! defaults.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{CanvasError, CanvasResult};
use crate::nodes::bounce::{BounceConfig, BounceNode};
use crate::nodes::clock::{ClockConfig, ClockNode};
use crate::nodes::credits::{CreditsConfig, CreditsNode};
use crate::nodes::house::{HouseConfig, HouseNode};
use crate::nodes::quadrants::QuadrantsNode;
use crate::pipeline::node::FrameNode;

/// Settings for one built-in node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum NodeConfig {
    /// [`ClockNode`].
    Clock(ClockConfig),
    /// [`CreditsNode`].
    Credits(CreditsConfig),
    /// [`BounceNode`].
    Bounce(BounceConfig),
    /// [`HouseNode`].
    House(HouseConfig),
    /// [`QuadrantsNode`].
    Quadrants,
}

impl NodeConfig {
    /// Parse a node config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CanvasResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CanvasError::validation(format!("parse node config JSON: {e}")))
    }

    /// Parse a node config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CanvasError::validation(format!("open node config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Default settings for the node called `kind`.
    pub fn default_for(kind: &str) -> CanvasResult<Self> {
        match kind {
            "clock" => Ok(Self::Clock(ClockConfig::default())),
            "credits" => Ok(Self::Credits(CreditsConfig::default())),
            "bounce" => Ok(Self::Bounce(BounceConfig::default())),
            "house" => Ok(Self::House(HouseConfig::default())),
            "quadrants" => Ok(Self::Quadrants),
            other => Err(CanvasError::validation(format!("unknown node \"{other}\""))),
        }
    }

    /// Node kind as spelled in JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Clock(_) => "clock",
            Self::Credits(_) => "credits",
            Self::Bounce(_) => "bounce",
            Self::House(_) => "house",
            Self::Quadrants => "quadrants",
        }
    }

    /// Number of pads the configured node declares.
    pub fn pad_count(&self) -> usize {
        match self {
            Self::Bounce(_) => 2,
            _ => 1,
        }
    }

    /// Construct the configured node.
    pub fn build(self) -> CanvasResult<Box<dyn FrameNode>> {
        Ok(match self {
            Self::Clock(cfg) => Box::new(ClockNode::new(cfg)),
            Self::Credits(cfg) => Box::new(CreditsNode::new(cfg)?),
            Self::Bounce(cfg) => Box::new(BounceNode::new(cfg)?),
            Self::House(cfg) => Box::new(HouseNode::new(cfg)),
            Self::Quadrants => Box::new(QuadrantsNode),
        })
    }
}
