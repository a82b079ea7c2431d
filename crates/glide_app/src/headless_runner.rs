//! Scenario runner that drives a scroll viewer frame by frame.

use crate::headless_report::HeadlessReport;
use crate::headless_scenario::{HeadlessScenario, ScenarioStep};
use anyhow::{bail, Result};
use glide_core::{FrameTime, TouchEvent, Vec3, WheelEvent};
use glide_layout::widgets::ScrollViewer;
use glide_layout::{Element, ScrollViewerConfig};

/// Configuration for deterministic headless frame execution.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessRunConfig {
    /// Logical milliseconds between frames.
    pub tick_ms: u64,
    /// Upper bound on the frames a whole scenario may advance.
    pub max_frames: u64,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            max_frames: 100_000,
        }
    }
}

impl HeadlessRunConfig {
    fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            bail!("headless tick_ms must be > 0");
        }
        if self.max_frames == 0 {
            bail!("headless max_frames must be > 0");
        }
        Ok(())
    }
}

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: HeadlessReport },
    Failed { report: HeadlessReport },
}

impl RunOutcome {
    pub fn report(&self) -> &HeadlessReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Execute scenario JSON against a viewer built from `viewer_cfg`.
pub fn run_scenario(
    input: &str,
    viewer_cfg: &ScrollViewerConfig,
    runtime_cfg: HeadlessRunConfig,
) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    run_loaded_scenario(&scenario, viewer_cfg, runtime_cfg)
}

/// Execute a pre-loaded scenario.
pub fn run_loaded_scenario(
    scenario: &HeadlessScenario,
    viewer_cfg: &ScrollViewerConfig,
    runtime_cfg: HeadlessRunConfig,
) -> Result<RunOutcome> {
    runtime_cfg.validate()?;
    viewer_cfg.validate()?;

    let mut viewer = ScrollViewer::with_config(viewer_cfg.clone()).named("headless");
    viewer.set_content(Some(scenario.content.build()?));

    let frame = FrameTime::from_secs(runtime_cfg.tick_ms as f32 / 1000.0);
    let mut elapsed_frames: u64 = 0;
    let mut elapsed_ms: u64 = 0;

    for (step_index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!(step_index, ?step, "scenario step");

        match step {
            ScenarioStep::Layout => {
                viewer.measure(scenario.viewport);
                viewer.arrange(scenario.viewport, false);
            }
            ScenarioStep::Tick { frames } => {
                let frames = u64::from(*frames);
                if elapsed_frames.saturating_add(frames) > runtime_cfg.max_frames {
                    bail!(
                        "scenario exceeds the frame budget of {} frames",
                        runtime_cfg.max_frames
                    );
                }
                for _ in 0..frames {
                    viewer.update(&frame);
                    elapsed_frames += 1;
                    elapsed_ms = elapsed_ms.saturating_add(runtime_cfg.tick_ms);
                }
            }
            ScenarioStep::TouchDown => viewer.on_preview_touch_down(&mut TouchEvent::down()),
            ScenarioStep::TouchMove { translation } => {
                viewer.on_preview_touch_move(&mut TouchEvent::moved(*translation))
            }
            ScenarioStep::TouchUp => viewer.on_preview_touch_up(&mut TouchEvent::up()),
            ScenarioStep::Wheel { delta } => viewer.on_mouse_wheel(&mut WheelEvent::new(*delta)),
            ScenarioStep::ScrollOf { translation, stop } => viewer.scroll_of(*translation, *stop),
            ScenarioStep::ScrollTo { position, stop } => viewer.scroll_to(*position, *stop),
            ScenarioStep::ScrollToEnd { axis, stop } => viewer.scroll_to_end(*axis, *stop),
            ScenarioStep::ScrollToBeginning { axis, stop } => {
                viewer.scroll_to_beginning(*axis, *stop)
            }
            ScenarioStep::SetMode { mode } => viewer.set_scroll_mode(*mode),
            ScenarioStep::AssertOffset {
                expected,
                tolerance,
            } => {
                if let Some(message) =
                    compare("offset", viewer.scroll_offsets(), *expected, *tolerance)
                {
                    return Ok(failed(
                        &viewer,
                        "assert_offset",
                        step_index,
                        message,
                        elapsed_frames,
                        elapsed_ms,
                    ));
                }
            }
            ScenarioStep::AssertSpeed {
                expected,
                tolerance,
            } => {
                if let Some(message) = compare(
                    "speed",
                    viewer.current_scrolling_speed(),
                    *expected,
                    *tolerance,
                ) {
                    return Ok(failed(
                        &viewer,
                        "assert_speed",
                        step_index,
                        message,
                        elapsed_frames,
                        elapsed_ms,
                    ));
                }
            }
            ScenarioStep::AssertContentOffset {
                expected,
                tolerance,
            } => {
                if let Some(message) = compare(
                    "content offset",
                    viewer.content_render_offset(),
                    *expected,
                    *tolerance,
                ) {
                    return Ok(failed(
                        &viewer,
                        "assert_content_offset",
                        step_index,
                        message,
                        elapsed_frames,
                        elapsed_ms,
                    ));
                }
            }
        }
    }

    Ok(RunOutcome::Passed {
        report: HeadlessReport::passed(
            elapsed_frames,
            elapsed_ms,
            viewer.scroll_offsets(),
            viewer.current_scrolling_speed(),
        ),
    })
}

fn failed(
    viewer: &ScrollViewer,
    assertion: &str,
    step_index: usize,
    message: String,
    elapsed_frames: u64,
    elapsed_ms: u64,
) -> RunOutcome {
    tracing::debug!(step_index, %message, "scenario assertion failed");
    RunOutcome::Failed {
        report: HeadlessReport::failed(
            assertion,
            step_index,
            message,
            elapsed_frames,
            elapsed_ms,
            viewer.scroll_offsets(),
            viewer.current_scrolling_speed(),
        ),
    }
}

/// Mismatch description when `actual` is further than `tolerance` from `expected`
fn compare(what: &str, actual: Vec3, expected: Vec3, tolerance: f32) -> Option<String> {
    let off = (0..3).any(|i| (actual[i] - expected[i]).abs() > tolerance);
    off.then(|| format!("{what}: expected {expected:?}, got {actual:?} (tolerance {tolerance})"))
}
