// SPDX-License-Identifier: GPL-3.0-only

//! Widget geometry: points, rects and the fixed control layout

use crate::constants::ui;
use serde::{Deserialize, Serialize};

/// A point in widget coordinates (origin top-left, y grows downwards)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Rect of `size` whose center is `center`
    pub fn centered_at(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width * 0.5,
            center.y - size.height * 0.5,
            size.width,
            size.height,
        )
    }

    pub fn x(&self) -> f64 {
        self.origin.x
    }

    pub fn y(&self) -> f64 {
        self.origin.y
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width * 0.5,
            self.origin.y + self.size.height * 0.5,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.max_x()
            && point.y >= self.origin.y
            && point.y <= self.max_y()
    }

    /// Shrink by `amount` on every side
    pub fn inset(&self, amount: f64) -> Self {
        Self::new(
            self.origin.x + amount,
            self.origin.y + amount,
            (self.size.width - 2.0 * amount).max(0.0),
            (self.size.height - 2.0 * amount).max(0.0),
        )
    }

    pub fn with_x(&self, x: f64) -> Self {
        Self::new(x, self.origin.y, self.size.width, self.size.height)
    }

    /// Same center, dimensions multiplied by `scale`
    pub fn scaled(&self, scale: f64) -> Self {
        Self::centered_at(
            self.center(),
            Size {
                width: self.size.width * scale,
                height: self.size.height * scale,
            },
        )
    }
}

/// Circular progress ring drawn over the shutter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    /// Center in widget coordinates
    pub center: Point,
    pub radius: f64,
    pub stroke_width: f64,
}

impl Ring {
    /// Points along the filled part of the ring, starting at 12 o'clock and
    /// running clockwise. Returns nothing for an empty ring.
    pub fn arc(&self, fraction: f64, segments: usize) -> Vec<Point> {
        let fraction = fraction.clamp(0.0, 1.0);
        if fraction == 0.0 || segments == 0 {
            return Vec::new();
        }

        let start = -std::f64::consts::FRAC_PI_2;
        let sweep = std::f64::consts::TAU * fraction;
        (0..=segments)
            .map(|i| {
                let angle = start + sweep * (i as f64 / segments as f64);
                // y grows downwards, so a growing angle runs clockwise on screen
                Point::new(
                    self.center.x + self.radius * angle.cos(),
                    self.center.y + self.radius * angle.sin(),
                )
            })
            .collect()
    }
}

/// Fixed layout of every element of the capture control
///
/// Computed once at construction from the widget frame and the shutter
/// diameter. Everything is in widget-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub bounds: Rect,
    pub shutter: Rect,
    pub center_dot: Rect,
    pub ring: Ring,
    pub switch_camera: Rect,
    pub exit: Rect,
    /// Where retake sits once revealed
    pub retake_revealed_x: f64,
    /// Where confirm sits once revealed
    pub confirm_revealed_x: f64,
}

impl Layout {
    pub fn new(frame: Rect, button_width: f64) -> Self {
        let bounds = Rect::new(0.0, 0.0, frame.width(), frame.height());
        let shutter = Rect::centered_at(
            bounds.center(),
            Size {
                width: button_width,
                height: button_width,
            },
        );

        let half = button_width * 0.5;
        let ring = Ring {
            center: shutter.center(),
            radius: half - ui::RING_INSET,
            stroke_width: ui::RING_STROKE_WIDTH,
        };

        let side_y = bounds.height() * 0.5 - ui::SIDE_BUTTON_SIZE * 0.5;
        let switch_camera = Rect::new(
            ui::SIDE_BUTTON_INSET,
            side_y,
            ui::SIDE_BUTTON_SIZE,
            ui::SIDE_BUTTON_SIZE,
        );
        let exit = Rect::new(
            bounds.width() - ui::SIDE_BUTTON_INSET - ui::SIDE_BUTTON_SIZE,
            side_y,
            ui::SIDE_BUTTON_SIZE,
            ui::SIDE_BUTTON_SIZE,
        );

        Self {
            bounds,
            shutter,
            center_dot: shutter.inset(ui::CENTER_DOT_INSET),
            ring,
            switch_camera,
            exit,
            retake_revealed_x: ui::POST_CAPTURE_INSET,
            confirm_revealed_x: bounds.width() - button_width - ui::POST_CAPTURE_INSET,
        }
    }

    /// Resting frame of the retake and confirm buttons (hidden behind the shutter)
    pub fn post_capture_rest(&self) -> Rect {
        self.shutter
    }

    /// Convert a widget-space point into the shutter's own coordinates
    ///
    /// `scale` is the shutter's current scale transform about its center, so
    /// the result matches what a recognizer attached to the shutter reports:
    /// the unscaled top edge is always `y == 0`.
    pub fn shutter_local(&self, point: Point, scale: f64) -> Point {
        let scale = if scale > 0.0 { scale } else { 1.0 };
        let center = self.shutter.center();
        let half = self.shutter.width() * 0.5;
        Point::new(
            (point.x - center.x) / scale + half,
            (point.y - center.y) / scale + half,
        )
    }
}
