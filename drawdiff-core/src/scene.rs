//! Retained drawing commands and the surface they are drawn into.
//!
//! Coordinates are surface units with the origin at the top-left: pixels for
//! exported SVG, character cells in the terminal.

use crate::scale::Rgb;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Rgb,
    /// Position of the bin this bar draws.
    pub index: usize,
    pub x0: f64,
    pub x1: f64,
    pub members: usize,
    pub mean_count: Option<f64>,
}

impl Bar {
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrient {
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub orient: AxisOrient,
    /// y of a bottom axis, x of a left axis.
    pub offset: f64,
    /// Start and end of the axis line along its own direction.
    pub range: (f64, f64),
    pub ticks: Vec<Tick>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub x: f64,
    pub y: f64,
    pub anchor: Anchor,
    pub font_size: f64,
    pub bold: bool,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Bar(Bar),
    Axis(Axis),
    Text(Text),
}

/// Anything a chart can draw into.
pub trait DrawingSurface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    /// Drop every shape drawn so far.
    fn clear(&mut self);
    fn draw(&mut self, shape: Shape);
}

/// In-memory surface; hosts paint it in whatever medium they own.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, shapes: Vec::new() }
    }

    /// Changes the size without touching drawn content.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn bars(&self) -> impl Iterator<Item = &Bar> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Bar(b) => Some(b),
            _ => None,
        })
    }

    pub fn axes(&self) -> impl Iterator<Item = &Axis> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Axis(a) => Some(a),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Text(t) => Some(t),
            _ => None,
        })
    }

    /// Topmost bar under the point.
    pub fn bar_at(&self, x: f64, y: f64) -> Option<&Bar> {
        self.bars().filter(|b| b.contains(x, y)).last()
    }
}

impl DrawingSurface for Scene {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.shapes.clear();
    }

    fn draw(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }
}
