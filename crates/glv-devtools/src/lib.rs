use std::fmt::Write as _;

use web_time::Instant;

use glv_core::prelude::*;

pub struct Hud {
    pub inspector_enabled: bool,
    frame_count: u64,
    last_frame: Option<Instant>,
    fps_smooth: f32,
    pub metrics: Option<Metrics>,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

impl Hud {
    pub fn new() -> Self {
        Self {
            inspector_enabled: false,
            frame_count: 0,
            last_frame: None,
            fps_smooth: 0.0,
            metrics: None,
        }
    }

    pub fn toggle_inspector(&mut self) {
        self.inspector_enabled = !self.inspector_enabled;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Counts a frame and folds its timing into the smoothed FPS.
    pub fn tick(&mut self, stats: DrawStats, draw_ms: f32) {
        self.frame_count += 1;
        let now = Instant::now();
        if let Some(prev) = self.last_frame.replace(now) {
            let dt = (now - prev).as_secs_f32();
            if dt > 0.0 {
                let fps = 1.0 / dt;
                // simple EMA
                let a = 0.2;
                self.fps_smooth = if self.fps_smooth == 0.0 {
                    fps
                } else {
                    (1.0 - a) * self.fps_smooth + a * fps
                };
            }
        }
        self.metrics = Some(Metrics { draw_ms, stats });
    }

    pub fn status_line(&self) -> String {
        let mut lines = vec![
            format!("frame: {}", self.frame_count),
            format!("fps: {:.1}", self.fps_smooth),
        ];
        if let Some(m) = &self.metrics {
            lines.push(format!("draw: {:.2} ms", m.draw_ms));
            lines.push(format!("views: {}/{}", m.stats.drawn, m.stats.visited));
            lines.push(format!("depth: {}", m.stats.max_level));
        }
        lines.join("  |  ")
    }

    /// Outlines the focused view on top of a finished frame.
    pub fn overlay(&self, glv: &Glv, backend: &mut dyn DrawBackend, width: u32, height: u32) {
        let Some(r) = glv.tree().abs_rect(glv.focused()) else {
            return;
        };
        let (w, h) = (width as f32, height as f32);
        backend.push_2d(w, h);
        backend.scissor(Rect::sized(w, h));
        backend.identity();
        backend.stroke_rect(r, Color::from_hex("#44AAFF"), 2.0);
        backend.pop_2d();
    }
}

#[derive(Clone, Debug, Default)]
pub struct Metrics {
    pub draw_ms: f32,
    pub stats: DrawStats,
}

pub struct Inspector {
    pub hud: Hud,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new()
    }
}

impl Inspector {
    pub fn new() -> Self {
        Self { hud: Hud::new() }
    }

    /// Draws a frame through `glv`, timing it and overlaying the HUD when
    /// the inspector is on.
    pub fn frame(
        &mut self,
        glv: &mut Glv,
        backend: &mut dyn DrawBackend,
        width: u32,
        height: u32,
    ) -> DrawStats {
        let start = Instant::now();
        let stats = glv.draw_glv(backend, width, height);
        let draw_ms = start.elapsed().as_secs_f32() * 1000.0;
        self.hud.tick(stats, draw_ms);
        if self.hud.inspector_enabled {
            self.hud.overlay(glv, backend, width, height);
            log::debug!("{}", self.hud.status_line());
        }
        stats
    }
}

/// One line per view, indented by depth, in traversal order.
///
/// The focused view is marked with `*`, hidden views with `(hidden)`.
pub fn dump_tree(glv: &Glv) -> String {
    let tree = glv.tree();
    let mut out = String::new();
    let mut line = |id: ViewId, level: usize| {
        let n = &tree[id];
        let r = n.rect;
        let _ = write!(
            out,
            "{:indent$}{} ({}, {}, {}, {})",
            "",
            n.class_name(),
            r.x,
            r.y,
            r.w,
            r.h,
            indent = level * 2
        );
        if !n.visible() {
            out.push_str(" (hidden)");
        }
        if id == glv.focused() {
            out.push_str(" *");
        }
        out.push('\n');
    };

    line(tree.root(), 0);
    let mut walk = Walker::new(tree.root());
    while walk.advance(tree, Descend::Always) {
        line(walk.current(), walk.level());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl Widget for Named {
        fn class_name(&self) -> &'static str {
            self.0
        }
    }

    fn sample() -> (Glv, ViewId) {
        let mut glv = Glv::new(200.0, 100.0);
        let root = glv.root();
        let panel = glv
            .tree_mut()
            .push_child(
                root,
                ViewNode::new(Rect::new(10.0, 10.0, 80.0, 40.0)).with_widget(Named("Panel")),
            )
            .unwrap();
        let label = glv
            .tree_mut()
            .push_child(
                panel,
                ViewNode::new(Rect::new(2.0, 2.0, 20.0, 10.0)).with_widget(Named("Label")),
            )
            .unwrap();
        glv.tree_mut()
            .push_child(root, ViewNode::new(Rect::new(100.0, 0.0, 5.0, 5.0)))
            .unwrap();
        glv.set_focus(label).unwrap();
        (glv, panel)
    }

    #[test]
    fn dump_is_indented_preorder() {
        let (mut glv, panel) = sample();
        glv.tree_mut()[panel].disable(Property::VISIBLE);
        assert_eq!(
            dump_tree(&glv),
            "View (0, 0, 200, 100)\n\
             \x20 Panel (10, 10, 80, 40) (hidden)\n\
             \x20   Label (2, 2, 20, 10) *\n\
             \x20 View (100, 0, 5, 5)\n"
        );
    }

    #[test]
    fn inspector_tracks_frames_and_outlines_focus() {
        let (mut glv, _) = sample();
        let mut inspector = Inspector::new();
        inspector.hud.toggle_inspector();
        let mut rec = Recorder::new();
        let stats = inspector.frame(&mut glv, &mut rec, 200, 100);
        assert_eq!(stats.drawn, 3);
        assert_eq!(inspector.hud.frame_count(), 1);
        assert!(inspector.hud.status_line().contains("views: 3/3"));
        assert_eq!(
            rec.calls.iter().rev().nth(1),
            Some(&DrawCall::StrokeRect {
                rect: Rect::new(12.0, 12.0, 20.0, 10.0),
                color: Color::from_hex("#44AAFF"),
                width: 2.0,
            })
        );
    }
}
