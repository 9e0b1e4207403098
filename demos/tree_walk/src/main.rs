use std::cell::Cell;
use std::rc::Rc;

use glv_core::prelude::*;
use glv_devtools::{Inspector, dump_tree};

/// Value dragged up and down with the mouse, nudged with +/- keys.
struct Dialer {
    value: Rc<Cell<f32>>,
}

impl Widget for Dialer {
    fn class_name(&self) -> &'static str {
        "Dialer"
    }

    fn on_draw(&mut self, ctx: &mut DrawContext<'_>) {
        let b = ctx.bounds();
        let fill = Rect::new(0.0, 0.0, b.w * self.value.get(), b.h);
        let color = ctx.style().colors.fore;
        ctx.fill_rect(fill, color);
    }

    fn on_event(&mut self, _view: ViewId, kind: EventKind, glv: &mut Glv) -> bool {
        let step = match kind {
            EventKind::MouseDrag => -glv.mouse().dy() * 0.01,
            EventKind::KeyDown => match glv.keyboard().key_char() {
                Some('+') => 0.1,
                Some('-') => -0.1,
                _ => return true,
            },
            _ => return true,
        };
        self.value.set((self.value.get() + step).clamp(0.0, 1.0));
        false
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut glv = Glv::new(320.0, 200.0);
    let root = glv.root();

    let panel = glv
        .tree_mut()
        .push_child(root, ViewNode::new(Rect::new(10.0, 10.0, 200.0, 120.0)))?;
    glv.tree_mut()[panel].enable(Property::CROP_CHILDREN);

    let clicks = Rc::new(Cell::new(0));
    let button = glv
        .tree_mut()
        .push_child(panel, ViewNode::new(Rect::new(10.0, 10.0, 80.0, 24.0)))?;
    {
        let clicks = clicks.clone();
        glv.tree_mut()
            .add_callback(button, EventKind::MouseDown, move |_, _| {
                clicks.set(clicks.get() + 1);
                false
            })?;
    }

    let value = Rc::new(Cell::new(0.5));
    let dialer = glv.tree_mut().push_child(
        panel,
        ViewNode::new(Rect::new(10.0, 50.0, 250.0, 24.0)).with_widget(Dialer {
            value: value.clone(),
        }),
    )?;

    let resized = Rc::new(Cell::new(0));
    for v in [root, panel, button, dialer] {
        let resized = resized.clone();
        glv.tree_mut()
            .add_callback(v, EventKind::WindowResize, move |_, _| {
                resized.set(resized.get() + 1);
                true
            })?;
    }

    // Scripted input, one event at a time.
    glv.set_mouse_down(30.0, 30.0, MouseButton::Left, 1);
    let consumed = glv.propagate_event();
    log::info!("button press consumed: {consumed}, clicks: {}", clicks.get());

    glv.set_mouse_down(40.0, 70.0, MouseButton::Left, 1);
    glv.propagate_event();
    for y in [65.0, 55.0, 40.0] {
        glv.set_mouse_drag(40.0, y);
        glv.propagate_event();
    }
    glv.set_mouse_up(40.0, 40.0, MouseButton::Left, 1);
    glv.propagate_event();
    glv.set_key_down('+' as i32);
    glv.propagate_event();
    log::info!("dialer value: {:.2}", value.get());

    let reached = glv.broadcast_event(EventKind::WindowResize);
    log::info!("resize reached {reached} views, {} callbacks ran", resized.get());

    let mut inspector = Inspector::new();
    inspector.hud.toggle_inspector();
    let mut backend = Recorder::new();
    let stats = inspector.frame(&mut glv, &mut backend, 320, 200);
    log::info!("{}", inspector.hud.status_line());
    log::info!(
        "{} draw calls, {} scissor changes",
        backend.calls.len(),
        backend.scissors().len()
    );

    print!("{}", dump_tree(&glv));
    println!("drawn {} of {} views", stats.drawn, stats.visited);
    Ok(())
}
