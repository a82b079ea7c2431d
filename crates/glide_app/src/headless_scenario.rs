//! Scenario definition for headless scroll viewer runs.

use anyhow::{Context, Result};
use glide_core::{Axis, Vec3};
use glide_layout::widgets::{FlexContent, ScrollMode, SizedBox, StackPanel};
use glide_layout::Element;
use serde::Deserialize;
use std::path::Path;

fn default_viewport() -> Vec3 {
    Vec3::new(100.0, 100.0, 0.0)
}

fn default_true() -> bool {
    true
}

fn default_tolerance() -> f32 {
    1e-3
}

/// Content, viewport and steps of a scripted run.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessScenario {
    /// Size the viewer is laid out with.
    #[serde(default = "default_viewport")]
    pub viewport: Vec3,
    pub content: ContentSpec,
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&raw)
    }
}

/// Element placed inside the viewer.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentSpec {
    /// Leaf with a fixed size.
    Sized { size: Vec3 },
    /// Virtualizing stack scrolling itself along `orientation`.
    Stack {
        orientation: Axis,
        count: usize,
        item_size: Vec3,
        #[serde(default = "default_true")]
        anchors: bool,
    },
    /// Flex run of fixed-size items.
    Flex {
        direction: FlexDirectionSpec,
        items: Vec<[f32; 2]>,
        #[serde(default)]
        gap: f32,
    },
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexDirectionSpec {
    Row,
    Column,
}

impl ContentSpec {
    /// Build the described element.
    pub fn build(&self) -> Result<Box<dyn Element>> {
        let content: Box<dyn Element> = match self {
            ContentSpec::Sized { size } => Box::new(SizedBox::new(*size)),
            ContentSpec::Stack {
                orientation,
                count,
                item_size,
                anchors,
            } => Box::new(
                StackPanel::new(*orientation, *count, *item_size).with_item_anchors(*anchors),
            ),
            ContentSpec::Flex {
                direction,
                items,
                gap,
            } => {
                let items: Vec<(f32, f32)> = items.iter().map(|[w, h]| (*w, *h)).collect();
                let content = match direction {
                    FlexDirectionSpec::Row => FlexContent::row(&items, *gap),
                    FlexDirectionSpec::Column => FlexContent::column(&items, *gap),
                }
                .context("failed to build flex content")?;
                Box::new(content)
            }
        };
        Ok(content)
    }
}

/// One scripted action or check.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Measure and arrange the viewer with the scenario viewport.
    Layout,
    /// Advance this many frames.
    Tick { frames: u32 },
    TouchDown,
    /// Finger moved by `translation` (world units) since the last move.
    TouchMove { translation: Vec3 },
    TouchUp,
    Wheel { delta: f32 },
    ScrollOf {
        translation: Vec3,
        #[serde(default = "default_true")]
        stop: bool,
    },
    ScrollTo {
        position: Vec3,
        #[serde(default = "default_true")]
        stop: bool,
    },
    ScrollToEnd {
        axis: Axis,
        #[serde(default = "default_true")]
        stop: bool,
    },
    ScrollToBeginning {
        axis: Axis,
        #[serde(default = "default_true")]
        stop: bool,
    },
    SetMode { mode: ScrollMode },
    AssertOffset {
        expected: Vec3,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
    AssertSpeed {
        expected: Vec3,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
    /// Check the translation applied to the content's visual.
    AssertContentOffset {
        expected: Vec3,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
}

impl ScenarioStep {
    /// Whether the step checks the viewer rather than driving it.
    pub fn is_assertion(&self) -> bool {
        matches!(
            self,
            ScenarioStep::AssertOffset { .. }
                | ScenarioStep::AssertSpeed { .. }
                | ScenarioStep::AssertContentOffset { .. }
        )
    }
}
