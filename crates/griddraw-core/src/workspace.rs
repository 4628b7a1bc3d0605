//! Application state and the event dispatch loop.
//!
//! Surface events are queued and dispatched one at a time. Each handler runs
//! to completion before its render requests and document notifications are
//! flushed, so consumers always observe them in order.

use crate::config::CanvasConfig;
use crate::coords::GridMapper;
use crate::document::{Document, DocumentListener};
use crate::geom::Vector;
use crate::input::{Key, PointerPoint, SurfaceEvent};
use crate::render::{RenderRequest, RenderSurface};
use crate::shapes::{Inspector, Shape, ShapeId, ShapeTrait, TextMetrics};
use crate::tools::{LineTool, SelectionTool, TextTool, Tool, ToolContext, ToolKind};
use kurbo::Point;
use std::collections::VecDeque;

/// Everything the canvas needs between events.
pub struct Workspace {
    cx: ToolContext,
    select: SelectionTool,
    line: LineTool,
    text: TextTool,
    active: ToolKind,
    queue: VecDeque<SurfaceEvent>,
    /// Largest visible grid point, known once the surface reports its size.
    extent: Option<Vector>,
    grid_visible: bool,
}

impl Workspace {
    pub fn new(config: CanvasConfig) -> Self {
        Self::from_context(ToolContext::from_config(config))
    }

    pub fn with_metrics(config: CanvasConfig, metrics: Box<dyn TextMetrics>) -> Self {
        Self::from_context(ToolContext::new(config, metrics))
    }

    fn from_context(cx: ToolContext) -> Self {
        Self {
            cx,
            select: SelectionTool::new(),
            line: LineTool::new(),
            text: TextTool::new(),
            active: ToolKind::default(),
            queue: VecDeque::new(),
            extent: None,
            grid_visible: true,
        }
    }

    pub fn document(&self) -> &Document {
        &self.cx.document
    }

    pub fn mapper(&self) -> &GridMapper {
        &self.cx.mapper
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.cx.config
    }

    pub fn selection_tool(&self) -> &SelectionTool {
        &self.select
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active
    }

    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    /// Queue an event for the next [`Workspace::run_pending`].
    pub fn push_event(&mut self, event: SurfaceEvent) {
        self.queue.push_back(event);
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Dispatch every queued event in FIFO order, flushing after each one.
    /// Returns the number of events handled.
    pub fn run_pending(
        &mut self,
        surface: &mut dyn RenderSurface,
        listener: &mut dyn DocumentListener,
    ) -> usize {
        let mut handled = 0;
        while let Some(event) = self.queue.pop_front() {
            self.dispatch(event);
            self.flush(surface, listener);
            handled += 1;
        }
        handled
    }

    /// Hand buffered render requests and notifications to their consumers.
    pub fn flush(&mut self, surface: &mut dyn RenderSurface, listener: &mut dyn DocumentListener) {
        for request in self.cx.render.take() {
            surface.apply(&request);
        }
        for event in self.cx.document.take_events() {
            listener.on_event(&event);
        }
    }

    /// Run the handler for one event to completion.
    pub fn dispatch(&mut self, event: SurfaceEvent) {
        log::trace!("Dispatching {event:?}");
        match event {
            SurfaceEvent::PointerDown {
                position,
                modifiers,
            } => {
                let p = self.pointer(position);
                self.with_active(|tool, cx| tool.pointer_down(cx, p, modifiers));
            }
            SurfaceEvent::PointerUp { position } => {
                let p = self.pointer(position);
                self.with_active(|tool, cx| tool.pointer_up(cx, p));
            }
            SurfaceEvent::PointerMoved { position } => {
                let p = self.pointer(position);
                self.with_active(|tool, cx| tool.pointer_moved(cx, p));
            }
            SurfaceEvent::PointerEntered { position } => {
                let p = self.pointer(position);
                self.with_active(|tool, cx| tool.canvas_entered(cx, p));
            }
            SurfaceEvent::PointerExited => self.with_active(|tool, cx| tool.canvas_exited(cx)),
            SurfaceEvent::KeyPressed { key, modifiers } => match key {
                Key::Char('g' | 'G') => self.toggle_grid(),
                key => self.with_active(|tool, cx| tool.key_pressed(cx, key, modifiers)),
            },
            SurfaceEvent::Resized { width, height } => {
                let extent = self.cx.mapper.grid_extent(width, height);
                log::debug!(
                    "Surface resized to {width}x{height}, grid extent ({}, {})",
                    extent.x,
                    extent.y
                );
                self.extent = Some(extent);
            }
            SurfaceEvent::AppActivated => self.with_active(|tool, cx| tool.app_activated(cx)),
            SurfaceEvent::AppDeactivated => self.with_active(|tool, cx| tool.app_deactivated(cx)),
            SurfaceEvent::SelectTool { tool } => self.select_tool(tool),
        }
    }

    pub fn select_tool(&mut self, kind: ToolKind) {
        if kind == self.active {
            return;
        }
        log::info!("Switching tool: {:?} -> {:?}", self.active, kind);
        self.with_active(|tool, cx| tool.tool_deselected(cx));
        self.active = kind;
        self.with_active(|tool, cx| tool.tool_selected(cx));
    }

    pub fn add_shape(&mut self, shape: impl Into<Shape>) -> ShapeId {
        self.cx.document.add_shape(shape)
    }

    /// Replace the content of a text shape. Returns false if `id` is not text.
    pub fn set_text(&mut self, id: ShapeId, content: &str) -> bool {
        let ToolContext {
            document,
            metrics,
            mapper,
            ..
        } = &mut self.cx;
        let Some(text) = document.get_mut(id).and_then(Shape::as_text_mut) else {
            return false;
        };
        text.set_text(content, &**metrics, mapper);
        self.each_tool(|tool, cx| tool.shapes_changed(cx, &[id]));
        true
    }

    /// Remove shapes and drop every tool reference to them.
    pub fn delete_shapes(&mut self, ids: &[ShapeId]) -> Vec<Shape> {
        let removed = self.cx.document.remove_shapes(ids);
        if !removed.is_empty() {
            let gone: Vec<ShapeId> = removed.iter().map(ShapeTrait::id).collect();
            self.each_tool(|tool, cx| tool.shapes_deleted(cx, &gone));
        }
        removed
    }

    pub fn inspector(&self, id: ShapeId) -> Option<Inspector> {
        self.cx.document.get(id).and_then(ShapeTrait::inspector)
    }

    fn toggle_grid(&mut self) {
        self.grid_visible = !self.grid_visible;
        self.cx
            .render
            .push(RenderRequest::SetGridVisible(self.grid_visible));
    }

    /// Map a surface position to grid space, clamped to the visible grid.
    fn pointer(&self, position: Point) -> PointerPoint {
        let mapper = &self.cx.mapper;
        let grid = mapper.surface_point_to_grid_round(position);
        let fine = mapper.surface_point_to_grid_float(position);
        match self.extent {
            Some(extent) => PointerPoint::new(clamp(grid, extent), clamp(fine, extent)),
            None => PointerPoint::new(grid, fine),
        }
    }

    fn with_active<R>(&mut self, f: impl FnOnce(&mut dyn Tool, &mut ToolContext) -> R) -> R {
        let tool: &mut dyn Tool = match self.active {
            ToolKind::Select => &mut self.select,
            ToolKind::Line => &mut self.line,
            ToolKind::Text => &mut self.text,
        };
        f(tool, &mut self.cx)
    }

    fn each_tool(&mut self, mut f: impl FnMut(&mut dyn Tool, &mut ToolContext)) {
        let Self {
            cx,
            select,
            line,
            text,
            ..
        } = self;
        let tools: [&mut dyn Tool; 3] = [select, line, text];
        for tool in tools {
            f(tool, cx);
        }
    }
}

fn clamp(v: Vector, extent: Vector) -> Vector {
    Vector::new(
        v.x.clamp(0.0, extent.x.max(0.0)),
        v.y.clamp(0.0, extent.y.max(0.0)),
    )
}
