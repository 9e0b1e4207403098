pub use crate::draw::{DrawContext, DrawStats};
pub use crate::error::{Error, Result};
pub use crate::event::{EventKind, Keyboard, Modifiers, Mouse, MouseButton};
pub use crate::flags::Property;
pub use crate::geometry::{Rect, Size, Vec2};
pub use crate::glv::{Glv, GlvConfig};
pub use crate::registry::GlvId;
pub use crate::render_api::{DrawBackend, DrawCall, Recorder};
pub use crate::style::{Color, Colors, Style};
pub use crate::tree::{Descend, ViewTree, Walker};
pub use crate::view::{DrawFn, EventCallback, Plain, ViewId, ViewNode, Widget};
