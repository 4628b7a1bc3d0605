//! Declarative requests for the rendering surface.
//!
//! The core never draws. Tools queue [`RenderRequest`]s and the host applies
//! them to whatever surface it owns.

use crate::geom::Vector;
use kurbo::{Line, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifies a highlight marker for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerId(pub u64);

/// Role of a highlight marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    /// Handle of a selected shape.
    Selected,
    /// Handle of a shape inside the live marquee.
    MarqueePreview,
    /// Handle of the shape nearest the pointer.
    Nearest,
    /// Draggable handle under the pointer.
    HoverHandle,
}

/// Visual style of a marker square.
#[derive(Debug, Clone, Copy)]
pub struct MarkerStyle {
    /// Side length in surface pixels.
    pub size: f64,
    pub fill: Option<Color>,
    pub outline: Option<Color>,
}

impl MarkerKind {
    pub fn style(self) -> MarkerStyle {
        let black = Color::from_rgba8(0, 0, 0, 255);
        match self {
            MarkerKind::Selected => MarkerStyle {
                size: 4.0,
                fill: Some(black),
                outline: None,
            },
            MarkerKind::MarqueePreview => MarkerStyle {
                size: 4.0,
                fill: Some(Color::from_rgba8(128, 128, 128, 255)),
                outline: None,
            },
            MarkerKind::Nearest => MarkerStyle {
                size: 6.0,
                fill: None,
                outline: Some(black),
            },
            MarkerKind::HoverHandle => MarkerStyle {
                size: 8.0,
                fill: None,
                outline: Some(Color::from_rgba8(0, 120, 215, 255)),
            },
        }
    }
}

/// Cursor shown over the drawing region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorStyle {
    #[default]
    Arrow,
    Crosshair,
    Text,
}

/// A single drawing instruction for the surface.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderRequest {
    /// Show a marker square centered on a grid point.
    Highlight {
        marker: MarkerId,
        at: Vector,
        kind: MarkerKind,
    },
    Unhighlight {
        marker: MarkerId,
    },
    /// Marquee rectangle in surface coordinates.
    DrawMarquee {
        rect: Rect,
    },
    UpdateMarquee {
        rect: Rect,
    },
    RemoveMarquee,
    /// Rubber-band guide for a shape being placed, in surface coordinates.
    DrawGuide {
        line: Line,
    },
    RemoveGuide,
    SetCursor(CursorStyle),
    SetGridVisible(bool),
}

/// Buffer of pending requests that also hands out marker ids.
#[derive(Debug, Default)]
pub struct RenderQueue {
    next_marker: u64,
    pending: Vec<RenderRequest>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlight(&mut self, at: Vector, kind: MarkerKind) -> MarkerId {
        let marker = MarkerId(self.next_marker);
        self.next_marker += 1;
        self.pending.push(RenderRequest::Highlight { marker, at, kind });
        marker
    }

    pub fn unhighlight(&mut self, marker: MarkerId) {
        self.pending.push(RenderRequest::Unhighlight { marker });
    }

    /// Remove every marker in `markers`, leaving it empty.
    pub fn unhighlight_all(&mut self, markers: &mut Vec<MarkerId>) {
        for marker in markers.drain(..) {
            self.unhighlight(marker);
        }
    }

    pub fn push(&mut self, request: RenderRequest) {
        self.pending.push(request);
    }

    pub fn pending(&self) -> &[RenderRequest] {
        &self.pending
    }

    pub fn take(&mut self) -> Vec<RenderRequest> {
        std::mem::take(&mut self.pending)
    }
}

/// Consumer of render requests.
pub trait RenderSurface {
    fn apply(&mut self, request: &RenderRequest);
}

/// In-memory surface that tracks what would currently be on screen.
#[derive(Debug, Default)]
pub struct SurfaceState {
    markers: HashMap<MarkerId, (Vector, MarkerKind)>,
    pub marquee: Option<Rect>,
    pub guide: Option<Line>,
    pub cursor: CursorStyle,
    pub grid_visible: bool,
}

impl SurfaceState {
    pub fn new() -> Self {
        Self {
            grid_visible: true,
            ..Self::default()
        }
    }

    /// Live marker positions of one kind, sorted for comparison.
    pub fn markers(&self, kind: MarkerKind) -> Vec<Vector> {
        let mut points: Vec<Vector> = self
            .markers
            .values()
            .filter(|(_, k)| *k == kind)
            .map(|(p, _)| *p)
            .collect();
        points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        points
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }
}

impl RenderSurface for SurfaceState {
    fn apply(&mut self, request: &RenderRequest) {
        match request {
            RenderRequest::Highlight { marker, at, kind } => {
                self.markers.insert(*marker, (*at, *kind));
            }
            RenderRequest::Unhighlight { marker } => {
                if self.markers.remove(marker).is_none() {
                    log::warn!("Unhighlight of unknown marker {marker:?}");
                }
            }
            RenderRequest::DrawMarquee { rect } | RenderRequest::UpdateMarquee { rect } => {
                self.marquee = Some(*rect);
            }
            RenderRequest::RemoveMarquee => self.marquee = None,
            RenderRequest::DrawGuide { line } => self.guide = Some(*line),
            RenderRequest::RemoveGuide => self.guide = None,
            RenderRequest::SetCursor(cursor) => self.cursor = *cursor,
            RenderRequest::SetGridVisible(visible) => self.grid_visible = *visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_ids_are_unique() {
        let mut queue = RenderQueue::new();
        let a = queue.highlight(Vector::new(1.0, 1.0), MarkerKind::Selected);
        let b = queue.highlight(Vector::new(1.0, 1.0), MarkerKind::Selected);
        assert_ne!(a, b);
        assert_eq!(queue.pending().len(), 2);
    }

    #[test]
    fn test_surface_tracks_markers() {
        let mut queue = RenderQueue::new();
        let mut markers = vec![
            queue.highlight(Vector::new(2.0, 0.0), MarkerKind::Nearest),
            queue.highlight(Vector::new(1.0, 0.0), MarkerKind::Nearest),
        ];
        queue.highlight(Vector::new(5.0, 5.0), MarkerKind::Selected);

        let mut surface = SurfaceState::new();
        for request in queue.take() {
            surface.apply(&request);
        }
        assert_eq!(
            surface.markers(MarkerKind::Nearest),
            vec![Vector::new(1.0, 0.0), Vector::new(2.0, 0.0)]
        );

        queue.unhighlight_all(&mut markers);
        assert!(markers.is_empty());
        for request in queue.take() {
            surface.apply(&request);
        }
        assert!(surface.markers(MarkerKind::Nearest).is_empty());
        assert_eq!(surface.marker_count(), 1);
    }

    #[test]
    fn test_surface_marquee_and_cursor() {
        let mut surface = SurfaceState::new();
        assert!(surface.grid_visible);
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        surface.apply(&RenderRequest::DrawMarquee { rect });
        assert_eq!(surface.marquee, Some(rect));
        surface.apply(&RenderRequest::RemoveMarquee);
        assert_eq!(surface.marquee, None);
        surface.apply(&RenderRequest::SetCursor(CursorStyle::Crosshair));
        assert_eq!(surface.cursor, CursorStyle::Crosshair);
    }

    #[test]
    fn test_marker_styles() {
        assert!(MarkerKind::Selected.style().fill.is_some());
        assert!(MarkerKind::Nearest.style().fill.is_none());
        assert!(MarkerKind::Nearest.style().size > MarkerKind::Selected.style().size);
    }
}
