use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::BrightYellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const HANDLE: Color = Color::BrightCyan;
pub const DETECTED: Color = Color::BrightRed;
pub const CLEAN: Color = Color::Green;
