use crate::{Color, Rect};

/// Immediate-mode graphics calls the draw traversal issues.
///
/// Coordinates are surface pixels with a top-left origin. GL backends can
/// convert scissor rects with [`Rect::to_gl_scissor`].
pub trait DrawBackend {
    /// Enters a 2D orthographic space of the given size.
    fn push_2d(&mut self, width: f32, height: f32);
    fn pop_2d(&mut self);
    fn clear(&mut self, color: Color);
    fn set_scissor_enabled(&mut self, enabled: bool);
    fn scissor(&mut self, rect: Rect);
    fn push_matrix(&mut self);
    fn pop_matrix(&mut self);
    fn identity(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Push2d { width: f32, height: f32 },
    Pop2d,
    Clear(Color),
    ScissorEnabled(bool),
    Scissor(Rect),
    PushMatrix,
    PopMatrix,
    Identity,
    Translate { x: f32, y: f32 },
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, color: Color, width: f32 },
}

/// Headless backend that records every call.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub calls: Vec<DrawCall>,
    matrix_depth: usize,
    max_matrix_depth: usize,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scissors(&self) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Scissor(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    /// Matrices pushed and not yet popped.
    pub fn matrix_depth(&self) -> usize {
        self.matrix_depth
    }

    pub fn max_matrix_depth(&self) -> usize {
        self.max_matrix_depth
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl DrawBackend for Recorder {
    fn push_2d(&mut self, width: f32, height: f32) {
        self.calls.push(DrawCall::Push2d { width, height });
    }

    fn pop_2d(&mut self) {
        self.calls.push(DrawCall::Pop2d);
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn set_scissor_enabled(&mut self, enabled: bool) {
        self.calls.push(DrawCall::ScissorEnabled(enabled));
    }

    fn scissor(&mut self, rect: Rect) {
        self.calls.push(DrawCall::Scissor(rect));
    }

    fn push_matrix(&mut self) {
        self.matrix_depth += 1;
        self.max_matrix_depth = self.max_matrix_depth.max(self.matrix_depth);
        self.calls.push(DrawCall::PushMatrix);
    }

    fn pop_matrix(&mut self) {
        if self.matrix_depth == 0 {
            log::warn!("pop_matrix with empty stack");
        } else {
            self.matrix_depth -= 1;
        }
        self.calls.push(DrawCall::PopMatrix);
    }

    fn identity(&mut self) {
        self.calls.push(DrawCall::Identity);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.calls.push(DrawCall::Translate { x, y });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.calls.push(DrawCall::StrokeRect { rect, color, width });
    }
}
