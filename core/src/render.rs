//! Render boundary.
//!
//! The animator never holds a drawing surface. It calls whatever
//! RenderSink the host hands it for the current frame, so the main canvas
//! and the zoomed canvas are just two sinks.

use crate::{
    geometry::segment_angular_width,
    types::Radians,
};
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, rc::Rc};

/// Longest label drawn on a segment, in characters.
pub const MAX_LABEL_CHARS: usize = 15;

/// Draws the wheel. Must not block; drawing failures stay inside the sink.
pub trait RenderSink {
    fn render(&mut self, participants: &[String], angle: Radians);
}

/// One segment as a renderer should draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentLayout {
    pub index: usize,
    pub label: String,
    pub start: Radians,
    pub end:   Radians,
    /// HSL hue in degrees.
    pub hue:   f64,
}

/// Logical wheel at `angle`. Empty for zero participants, in which case
/// renderers draw the empty placeholder ring.
pub fn wheel_layout(participants: &[String], angle: Radians) -> Vec<SegmentLayout> {
    let n = participants.len();
    let Ok(width) = segment_angular_width(n) else {
        return Vec::new();
    };
    participants
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let start = angle + i as f64 * width;
            SegmentLayout {
                index: i,
                label: name.chars().take(MAX_LABEL_CHARS).collect(),
                start,
                end: start + width,
                hue: i as f64 * 360.0 / n as f64,
            }
        })
        .collect()
}

/// Discards frames.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render(&mut self, _participants: &[String], _angle: Radians) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub participants: Vec<String>,
    pub angle:        Radians,
}

/// Records every frame. Clones share one log, so a caller can keep a
/// handle while the app owns the sink.
#[derive(Debug, Default, Clone)]
pub struct FrameLog {
    frames: Rc<RefCell<Vec<RecordedFrame>>>,
}

impl FrameLog {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.borrow().is_empty()
    }

    pub fn angles(&self) -> Vec<Radians> {
        self.frames.borrow().iter().map(|f| f.angle).collect()
    }

    pub fn last(&self) -> Option<RecordedFrame> {
        self.frames.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.frames.borrow_mut().clear();
    }
}

impl RenderSink for FrameLog {
    fn render(&mut self, participants: &[String], angle: Radians) {
        self.frames.borrow_mut().push(RecordedFrame {
            participants: participants.to_vec(),
            angle,
        });
    }
}
