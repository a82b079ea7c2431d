//! Glide Headless Runner
//!
//! Replays JSON scenarios against a scroll viewer without any window or GPU:
//! each step feeds touch, wheel or programmatic input to the viewer, advances
//! fixed-length frames, or checks the resulting offsets and speed.
//!
//! # Example
//!
//! ```rust
//! use glide_app::{run_scenario, HeadlessRunConfig};
//! use glide_layout::ScrollViewerConfig;
//!
//! let scenario = r#"{
//!     "content": { "type": "sized", "size": [300.0, 100.0, 0.0] },
//!     "steps": [
//!         { "type": "layout" },
//!         { "type": "scroll_of", "translation": [50.0, 0.0, 0.0] },
//!         { "type": "assert_offset", "expected": [-50.0, 0.0, 0.0] }
//!     ]
//! }"#;
//!
//! let outcome = run_scenario(
//!     scenario,
//!     &ScrollViewerConfig::default(),
//!     HeadlessRunConfig::default(),
//! )
//! .unwrap();
//! assert!(!outcome.is_failed());
//! ```

pub mod headless_report;
pub mod headless_runner;
pub mod headless_scenario;

pub use headless_report::{HeadlessReport, ReportStatus};
pub use headless_runner::{run_loaded_scenario, run_scenario, HeadlessRunConfig, RunOutcome};
pub use headless_scenario::{ContentSpec, FlexDirectionSpec, HeadlessScenario, ScenarioStep};
