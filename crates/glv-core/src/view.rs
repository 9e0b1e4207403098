use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::draw::DrawContext;
use crate::{EventKind, Glv, Property, Rect, Style, default_style};

slotmap::new_key_type! {
    /// Stable handle of a view inside its tree's arena.
    pub struct ViewId;
}

/// Callback registered on a view for one event kind.
///
/// Returns whether the event should keep bubbling.
pub type EventCallback = Rc<dyn Fn(ViewId, &mut Glv) -> bool>;

pub(crate) type CallbackList = SmallVec<[EventCallback; 2]>;

/// Per-view hooks invoked by the core.
pub trait Widget {
    fn class_name(&self) -> &'static str {
        "View"
    }

    /// Draws the view in its local coordinate space.
    fn on_draw(&mut self, _ctx: &mut DrawContext<'_>) {}

    /// Handles `kind`; the return value says whether the event keeps bubbling.
    fn on_event(&mut self, _view: ViewId, _kind: EventKind, _glv: &mut Glv) -> bool {
        true
    }
}

/// A view with no behavior of its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct Plain;

impl Widget for Plain {}

/// Wraps a draw closure as a widget.
pub struct DrawFn<F>(F);

impl<F> DrawFn<F>
where
    F: FnMut(&mut DrawContext<'_>),
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Widget for DrawFn<F>
where
    F: FnMut(&mut DrawContext<'_>),
{
    fn on_draw(&mut self, ctx: &mut DrawContext<'_>) {
        (self.0)(ctx)
    }
}

/// A node of the view tree.
///
/// `rect` is relative to the parent. Links are handles into the same arena:
/// the first-child chain owns the subtree, parent and sibling are back links.
pub struct ViewNode {
    pub rect: Rect,
    pub style: Rc<Style>,
    pub(crate) props: Property,
    pub(crate) parent: Option<ViewId>,
    pub(crate) child: Option<ViewId>,
    pub(crate) sibling: Option<ViewId>,
    pub(crate) focused: bool,
    pub(crate) widget: Option<Box<dyn Widget>>,
    pub(crate) callbacks: HashMap<EventKind, CallbackList>,
}

impl ViewNode {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            style: default_style(),
            props: Property::default(),
            parent: None,
            child: None,
            sibling: None,
            focused: false,
            widget: Some(Box::new(Plain)),
            callbacks: HashMap::new(),
        }
    }

    pub fn with_widget(mut self, widget: impl Widget + 'static) -> Self {
        self.widget = Some(Box::new(widget));
        self
    }

    pub fn with_props(mut self, props: Property) -> Self {
        self.props = props;
        self
    }

    pub fn with_style(mut self, style: Rc<Style>) -> Self {
        self.style = style;
        self
    }

    pub fn enable(&mut self, p: Property) -> &mut Self {
        self.props.insert(p);
        self
    }

    pub fn disable(&mut self, p: Property) -> &mut Self {
        self.props.remove(p);
        self
    }

    pub fn set_property(&mut self, p: Property, on: bool) -> &mut Self {
        self.props.set(p, on);
        self
    }

    pub fn props(&self) -> Property {
        self.props
    }

    /// True when every bit of `p` is set.
    pub fn enabled(&self, p: Property) -> bool {
        self.props.contains(p)
    }

    pub fn visible(&self) -> bool {
        self.enabled(Property::VISIBLE)
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn parent(&self) -> Option<ViewId> {
        self.parent
    }

    pub fn child(&self) -> Option<ViewId> {
        self.child
    }

    pub fn sibling(&self) -> Option<ViewId> {
        self.sibling
    }

    pub fn class_name(&self) -> &'static str {
        self.widget.as_ref().map_or("View", |w| w.class_name())
    }

    pub fn callback_count(&self, kind: EventKind) -> usize {
        self.callbacks.get(&kind).map_or(0, |l| l.len())
    }

    pub fn has_callbacks(&self, kind: EventKind) -> bool {
        self.callback_count(kind) > 0
    }
}

impl fmt::Debug for ViewNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewNode")
            .field("class", &self.class_name())
            .field("rect", &self.rect)
            .field("props", &self.props)
            .field("parent", &self.parent)
            .field("child", &self.child)
            .field("sibling", &self.sibling)
            .field("focused", &self.focused)
            .field("callbacks", &self.callbacks.keys().collect::<Vec<_>>())
            .finish()
    }
}
