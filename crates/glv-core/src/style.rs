//! Colors handed through to the backend when drawing backgrounds, borders and
//! the focus highlight. The core never interprets them beyond that.

use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const TRANSPARENT: Color = Color(0, 0, 0, 0);
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(r, g, b, 255)
    }

    pub fn from_hex(hex: &str) -> Self {
        let s = hex.trim_start_matches('#');
        let byte = |i: usize, default: u8| {
            s.get(i..i + 2)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .unwrap_or(default)
        };
        match s.len() {
            6 => Color(byte(0, 0), byte(2, 0), byte(4, 0), 255),
            8 => Color(byte(0, 0), byte(2, 0), byte(4, 0), byte(6, 255)),
            _ => Color::BLACK,
        }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Color(self.0, self.1, self.2, a)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Colors {
    pub back: Color,
    pub border: Color,
    pub fore: Color,
    pub selection: Color,
    pub text: Color,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            back: Color::from_hex("#000000"),
            border: Color::from_hex("#808080"),
            fore: Color::from_hex("#C0C0C0"),
            selection: Color::from_hex("#4080FF"),
            text: Color::WHITE,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    pub colors: Colors,
}

thread_local! {
    static DEFAULT_STYLE: Rc<Style> = Rc::new(Style::default());
}

/// Style shared by every view that was not given its own.
pub fn default_style() -> Rc<Style> {
    DEFAULT_STYLE.with(Rc::clone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_from_hex() {
        assert_eq!(Color::from_hex("#FF5733"), Color(255, 87, 51, 255));
        assert_eq!(Color::from_hex("#FF5733AA"), Color(255, 87, 51, 170));
        assert_eq!(Color::from_hex("oops"), Color::BLACK);
    }

    #[test]
    fn default_style_is_shared() {
        assert!(Rc::ptr_eq(&default_style(), &default_style()));
    }
}
