use colored::Color;

pub const PRIMARY: Color = Color::BrightBlue;
pub const ACCENT: Color = Color::BrightCyan;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const FOREIGN_ADDR: Color = Color::BrightMagenta;
pub const NATIVE_ADDR: Color = Color::BrightYellow;
