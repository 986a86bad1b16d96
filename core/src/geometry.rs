//! Wheel geometry: segment layout and winner resolution.
//!
//! CONVENTION (render and resolve must agree):
//!   - Segment i covers [angle + i*w, angle + (i+1)*w), w = 2π/n.
//!   - Angles grow in the canvas direction (clockwise on screen, y down).
//!   - The pointer sits at POINTER_ANGLE = 1.5π, the top of the wheel.
//!   - A pointer exactly on a boundary belongs to the segment starting there.

use crate::{
    error::{PartyError, PartyResult},
    types::{Radians, TAU},
};

/// Fixed pointer position in the wheel's frame.
pub const POINTER_ANGLE: Radians = 1.5 * std::f64::consts::PI;

/// Angular width of one segment for `n` participants.
pub fn segment_angular_width(n: usize) -> PartyResult<Radians> {
    if n == 0 {
        return Err(PartyError::invalid("segment width needs at least one participant"));
    }
    Ok(TAU / n as f64)
}

/// Wrap any angle, negative included, into [0, 2π).
pub fn normalize_angle(angle: Radians) -> Radians {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Index of the participant whose segment lies under the pointer when the
/// wheel rests at `final_angle`.
pub fn resolve_winner_index(final_angle: Radians, n: usize) -> PartyResult<usize> {
    let width = segment_angular_width(n)?;
    let offset = normalize_angle(POINTER_ANGLE - final_angle);
    let index = (offset / width).floor() as usize;
    Ok(index.min(n - 1))
}

/// Half-open bounds `[start, end)` of segment `index`, unwrapped.
pub fn segment_bounds(angle: Radians, index: usize, n: usize) -> PartyResult<(Radians, Radians)> {
    let width = segment_angular_width(n)?;
    if index >= n {
        return Err(PartyError::invalid(format!("segment {index} out of range for {n} participants")));
    }
    let start = angle + index as f64 * width;
    Ok((start, start + width))
}

/// True when `point` falls inside the arc `[start, end)` modulo 2π.
pub fn arc_contains(start: Radians, end: Radians, point: Radians) -> bool {
    normalize_angle(point - start) < (end - start)
}
