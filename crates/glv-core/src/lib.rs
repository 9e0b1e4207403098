//! # GLV core
//!
//! A retained tree of rectangular views drawn through an immediate-mode
//! backend, with synthetic mouse/keyboard/focus events routed to a focused
//! view and bubbled toward the root.
//!
//! ## Views and the tree
//!
//! Views live in a [`ViewTree`] arena and are addressed by [`ViewId`]. Each
//! view links to its parent, first child and next sibling; the sibling order
//! is the draw order. Geometry is relative to the parent.
//!
//! ```rust
//! use glv_core::*;
//!
//! let mut glv = Glv::new(320.0, 240.0);
//! let root = glv.root();
//! let panel = glv
//!     .tree_mut()
//!     .push_child(root, ViewNode::new(Rect::new(10.0, 10.0, 100.0, 80.0)))
//!     .unwrap();
//! glv.tree_mut()[panel].enable(Property::CROP_CHILDREN);
//! assert_eq!(glv.tree().abs_origin(panel), Some(Vec2::new(10.0, 10.0)));
//! ```
//!
//! ## Drawing
//!
//! [`Glv::draw_all`] walks the tree without recursion, keeping one clip
//! rect per level, and calls each visible view's [`Widget::on_draw`] inside
//! a scissor region. Any [`DrawBackend`] will do; [`Recorder`] records calls
//! for tests and headless use.
//!
//! ## Events
//!
//! Platform code injects input (`set_mouse_down`, `set_key_down`, ...) and
//! then calls [`Glv::propagate_event`]. The focused view's
//! [`Widget::on_event`] and its registered callbacks decide whether the event
//! continues to the parent:
//!
//! ```rust
//! use glv_core::*;
//!
//! let mut glv = Glv::new(320.0, 240.0);
//! let root = glv.root();
//! let button = glv
//!     .tree_mut()
//!     .push_child(root, ViewNode::new(Rect::new(0.0, 0.0, 50.0, 20.0)))
//!     .unwrap();
//! glv.tree_mut()
//!     .add_callback(button, EventKind::MouseDown, |_, _| false)
//!     .unwrap();
//!
//! glv.set_mouse_down(5.0, 5.0, MouseButton::Left, 1);
//! assert_eq!(glv.focused(), button);
//! assert!(glv.propagate_event()); // consumed by the button
//! ```
//!
//! Everything here is single-threaded. The instance registry behind
//! [`Glv::is_valid`] is the only state shared across threads.

pub mod clip;
pub mod dispatch;
pub mod draw;
pub mod error;
pub mod event;
pub mod flags;
pub mod geometry;
pub mod glv;
pub mod prelude;
pub mod registry;
pub mod render_api;
pub mod style;
pub mod tree;
pub mod view;

pub use draw::*;
pub use error::*;
pub use event::*;
pub use flags::*;
pub use geometry::*;
pub use glv::*;
pub use registry::GlvId;
pub use render_api::*;
pub use style::*;
pub use tree::ViewTree;
pub use view::*;
