//! Overlay geometry.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// An element's viewport-relative box plus the page state it was taken in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub rect: Rect,
    pub scroll: Point,
    pub viewport: Viewport,
}

impl Measurement {
    /// Document-relative box of the element (viewport box offset by scroll).
    pub fn document_box(&self) -> Rect {
        Rect {
            x: self.rect.x + self.scroll.x,
            y: self.rect.y + self.scroll.y,
            ..self.rect
        }
    }
}

/// Translation applied after scaling by `scale` about the element center so
/// that the element moves toward the viewport center.
///
/// `(viewportCenter - elementCenter) * (scale - 1) / scale`
pub fn zoom_offset(viewport: Viewport, element: Rect, scale: f64) -> Point {
    let center = element.center();
    let factor = (scale - 1.0) / scale;
    Point {
        x: (viewport.width / 2.0 - center.x) * factor,
        y: (viewport.height / 2.0 - center.y) * factor,
    }
}
