//! Typed coordinate spaces
//!
//! - **Image space**: pixel buffer coordinates, origin top-left, unaffected by zoom/pan
//! - **Screen space**: device pixels, origin at the viewport's top-left corner
//! - **Workspace space**: screen space with the pan offset removed; only used to
//!   track a pan drag
//!
//! Converting between spaces always goes through the viewport transform.

use glam::Vec2;
use std::ops::{Add, Sub};

/// Position in image (pixel buffer) space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImagePoint(pub Vec2);

/// Offset between two image-space positions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImageDelta(pub Vec2);

/// Position in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint(pub Vec2);

/// Offset in screen pixels. The viewport pan is one of these.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenDelta(pub Vec2);

/// Screen position before the pan translation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorkspacePoint(pub Vec2);

// === ImagePoint ===

impl ImagePoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }
}

impl Add<ImageDelta> for ImagePoint {
    type Output = ImagePoint;

    fn add(self, delta: ImageDelta) -> Self::Output {
        ImagePoint(self.0 + delta.0)
    }
}

impl Sub<ImageDelta> for ImagePoint {
    type Output = ImagePoint;

    fn sub(self, delta: ImageDelta) -> Self::Output {
        ImagePoint(self.0 - delta.0)
    }
}

impl Sub for ImagePoint {
    type Output = ImageDelta;

    /// Subtracting two points gives a delta.
    fn sub(self, other: ImagePoint) -> Self::Output {
        ImageDelta(self.0 - other.0)
    }
}

// === ImageDelta ===

impl ImageDelta {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self(Vec2::new(dx, dy))
    }

    pub fn dx(&self) -> f32 {
        self.0.x
    }

    pub fn dy(&self) -> f32 {
        self.0.y
    }
}

// === ScreenPoint ===

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }

    /// Remove the pan translation (start of a pan drag)
    pub fn to_workspace(self, pan: ScreenDelta) -> WorkspacePoint {
        WorkspacePoint(self.0 - pan.0)
    }
}

impl Sub for ScreenPoint {
    type Output = ScreenDelta;

    fn sub(self, other: ScreenPoint) -> Self::Output {
        ScreenDelta(self.0 - other.0)
    }
}

impl Add<ScreenDelta> for ScreenPoint {
    type Output = ScreenPoint;

    fn add(self, delta: ScreenDelta) -> Self::Output {
        ScreenPoint(self.0 + delta.0)
    }
}

// === ScreenDelta ===

impl ScreenDelta {
    pub const ZERO: ScreenDelta = ScreenDelta(Vec2::ZERO);

    pub fn new(dx: f32, dy: f32) -> Self {
        Self(Vec2::new(dx, dy))
    }

    pub fn dx(&self) -> f32 {
        self.0.x
    }

    pub fn dy(&self) -> f32 {
        self.0.y
    }
}

// === WorkspacePoint ===

impl WorkspacePoint {
    /// Pan that puts this workspace point under `screen`
    pub fn pan_to(self, screen: ScreenPoint) -> ScreenDelta {
        ScreenDelta(screen.0 - self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_point_sub_gives_delta() {
        let delta = ImagePoint::new(65.0, 60.0) - ImagePoint::new(60.0, 60.0);
        assert_eq!(delta.dx(), 5.0);
        assert_eq!(delta.dy(), 0.0);
    }

    #[test]
    fn test_image_point_add_delta() {
        let moved = ImagePoint::new(20.0, 20.0) + ImageDelta::new(5.0, -3.0);
        assert_eq!(moved, ImagePoint::new(25.0, 17.0));
    }

    #[test]
    fn test_workspace_round_trip() {
        let pan = ScreenDelta::new(30.0, -12.0);
        let anchor = ScreenPoint::new(400.0, 300.0).to_workspace(pan);

        // Dragging without moving keeps the pan
        assert_eq!(anchor.pan_to(ScreenPoint::new(400.0, 300.0)), pan);

        // Dragging moves the pan by the pointer delta
        let moved = anchor.pan_to(ScreenPoint::new(410.0, 295.0));
        assert_eq!(moved, ScreenDelta::new(40.0, -17.0));
    }
}
