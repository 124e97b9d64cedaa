// SPDX-License-Identifier: GPL-3.0-only

//! On-screen key geometry.
//!
//! The engine only needs three measurements: where a key is, where the
//! keyboard container is, and how wide the viewport is. All of them are in
//! viewport coordinates. A renderer implements [`KeyGeometry`] from its own
//! layout pass; [`GridGeometry`] lays the skin rows out as a uniform grid for
//! headless use.

use std::collections::HashMap;

use crate::app_settings;
use crate::input::Point;
use crate::layout::{LayoutMode, Skin};

/// A simple rectangle for bounds calculations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectangle {
    /// X coordinate of the top-left corner.
    pub x: f32,
    /// Y coordinate of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rectangle {
    /// Creates a new rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the X coordinate of the right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the Y coordinate of the bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the center X coordinate.
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Returns the center Y coordinate.
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Returns the center point.
    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    /// Returns `true` if the point lies inside (edges included on the
    /// top/left, excluded on the bottom/right).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// Source of on-screen measurements.
pub trait KeyGeometry: Send {
    /// Bounds of a key on the given layout, if it is currently laid out.
    fn key_bounds(&self, layout: LayoutMode, key: &str) -> Option<Rectangle>;

    /// Bounds of the keyboard container, if known.
    fn container_bounds(&self) -> Option<Rectangle>;

    /// Width of the viewport the popup must stay inside.
    fn viewport_width(&self) -> f32;
}

/// Uniform grid layout of a skin's rows.
///
/// Every row of a layout gets the same height; keys in a row share the width
/// of the widest row's keys and the row is centered horizontally.
#[derive(Debug, Clone)]
pub struct GridGeometry {
    container: Rectangle,
    viewport_width: f32,
    keys: HashMap<LayoutMode, Vec<(String, Rectangle)>>,
}

impl GridGeometry {
    /// Lays out all three layouts of a skin inside `container`.
    pub fn for_skin(skin: &Skin, container: Rectangle, viewport_width: f32) -> Self {
        let keys = LayoutMode::ALL
            .iter()
            .map(|mode| (*mode, Self::layout_rows(&skin.layout.keys(*mode), container)))
            .collect();

        Self {
            container,
            viewport_width,
            keys,
        }
    }

    /// Lays out a skin at the default keyboard size, filling the viewport
    /// width.
    pub fn with_default_size(skin: &Skin) -> Self {
        let container = Rectangle::new(
            0.0,
            0.0,
            app_settings::DEFAULT_KEYBOARD_WIDTH,
            app_settings::DEFAULT_KEYBOARD_HEIGHT,
        );
        Self::for_skin(skin, container, app_settings::DEFAULT_KEYBOARD_WIDTH)
    }

    fn layout_rows(rows: &[Vec<&str>], container: Rectangle) -> Vec<(String, Rectangle)> {
        let widest = rows.iter().map(Vec::len).max().unwrap_or(0);
        if rows.is_empty() || widest == 0 {
            return Vec::new();
        }

        let key_width = container.width / widest as f32;
        let key_height = container.height / rows.len() as f32;

        let mut keys = Vec::new();
        for (row_idx, row) in rows.iter().enumerate() {
            let row_offset = (container.width - key_width * row.len() as f32) / 2.0;
            let y = container.y + key_height * row_idx as f32;
            for (col_idx, key) in row.iter().enumerate() {
                let x = container.x + row_offset + key_width * col_idx as f32;
                keys.push((key.to_string(), Rectangle::new(x, y, key_width, key_height)));
            }
        }
        keys
    }

    /// Returns the key under a point, if any.
    pub fn key_at(&self, layout: LayoutMode, point: Point) -> Option<&str> {
        self.keys
            .get(&layout)?
            .iter()
            .find(|(_, bounds)| bounds.contains(point))
            .map(|(key, _)| key.as_str())
    }
}

impl KeyGeometry for GridGeometry {
    fn key_bounds(&self, layout: LayoutMode, key: &str) -> Option<Rectangle> {
        self.keys
            .get(&layout)?
            .iter()
            .find(|(id, _)| id == key)
            .map(|(_, bounds)| *bounds)
    }

    fn container_bounds(&self) -> Option<Rectangle> {
        Some(self.container)
    }

    fn viewport_width(&self) -> f32 {
        self.viewport_width
    }
}
