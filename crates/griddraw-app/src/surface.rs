//! Headless render surface and document listener.

use griddraw_core::{DocumentEvent, DocumentListener, RenderRequest, RenderSurface, SurfaceState};
use kurbo::Rect;
use peniko::Color;
use std::io::Write;

/// Tracks the surface in memory and logs every request it receives.
#[derive(Debug)]
pub struct LoggingSurface {
    state: SurfaceState,
}

impl LoggingSurface {
    pub fn new() -> Self {
        Self {
            state: SurfaceState::new(),
        }
    }

    pub fn state(&self) -> &SurfaceState {
        &self.state
    }
}

impl Default for LoggingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for LoggingSurface {
    fn apply(&mut self, request: &RenderRequest) {
        match request {
            RenderRequest::Highlight { marker, at, kind } => {
                let style = kind.style();
                log::debug!(
                    "Highlight {:?} {kind:?} at ({}, {}) size {} fill {} outline {}",
                    marker,
                    at.x,
                    at.y,
                    style.size,
                    describe_color(style.fill),
                    describe_color(style.outline)
                );
            }
            RenderRequest::Unhighlight { marker } => log::debug!("Unhighlight {marker:?}"),
            RenderRequest::DrawMarquee { rect } => {
                log::debug!("Draw marquee {}", describe_rect(rect));
            }
            RenderRequest::UpdateMarquee { rect } => {
                log::debug!("Update marquee {}", describe_rect(rect));
            }
            RenderRequest::RemoveMarquee => log::debug!("Remove marquee"),
            RenderRequest::DrawGuide { line } => log::debug!(
                "Draw guide ({}, {}) -> ({}, {})",
                line.p0.x,
                line.p0.y,
                line.p1.x,
                line.p1.y
            ),
            RenderRequest::RemoveGuide => log::debug!("Remove guide"),
            RenderRequest::SetCursor(cursor) => log::debug!("Cursor {cursor:?}"),
            RenderRequest::SetGridVisible(visible) => log::info!("Grid visible: {visible}"),
        }
        self.state.apply(request);
    }
}

fn describe_rect(rect: &Rect) -> String {
    format!("[{}, {}, {}, {}]", rect.x0, rect.y0, rect.x1, rect.y1)
}

/// `#rrggbbaa`, or `none`.
fn describe_color(color: Option<Color>) -> String {
    match color {
        Some(color) => {
            let c = color.to_rgba8();
            format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
        }
        None => "none".to_string(),
    }
}

/// Writes each document notification as one line of JSON.
pub struct JsonListener<W: Write> {
    out: W,
}

impl<W: Write> JsonListener<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DocumentListener for JsonListener<W> {
    fn on_event(&mut self, event: &DocumentEvent) {
        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                log::error!("Failed to serialize document event: {e}");
                return;
            }
        };
        if let Err(e) = writeln!(self.out, "{line}") {
            log::error!("Failed to write document event: {e}");
        }
    }
}
