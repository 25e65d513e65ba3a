//! The small styling vocabulary proposal slides need.

use serde::{Deserialize, Serialize};

/// 24-bit RGB.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

/// Run styling. Sizes are points, already scaled for the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size_pt: u32,
    #[serde(default)]
    pub bold: bool,
    pub color: Color,
}

impl TextStyle {
    pub fn plain(size_pt: u32) -> Self {
        TextStyle { size_pt, bold: false, color: Color::BLACK }
    }

    pub fn bold(size_pt: u32, color: Color) -> Self {
        TextStyle { size_pt, bold: true, color }
    }

    pub fn colored(size_pt: u32, color: Color) -> Self {
        TextStyle { size_pt, bold: false, color }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Border {
    pub width_pt: u32,
    pub color: Color,
}

impl Border {
    pub fn thin() -> Self {
        Border { width_pt: 1, color: Color::BLACK }
    }
}
