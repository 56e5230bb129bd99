use ratatui::style::Color;

// Primary brand colors
pub const ACCENT: Color = Color::Rgb(249, 115, 22); // warm saffron
pub const ACCENT_DIM: Color = Color::Rgb(194, 90, 18);
pub const GENERATED: Color = Color::Rgb(134, 188, 111); // soft green for cached sections
pub const EXTERNAL: Color = Color::Rgb(147, 197, 253); // link blue

// Text colors
pub const TEXT: Color = Color::Rgb(240, 240, 240);
pub const TEXT_SECONDARY: Color = Color::Rgb(180, 180, 180);
pub const TEXT_MUTED: Color = Color::Rgb(144, 144, 144);

// Background colors
pub const BG_BASE: Color = Color::Rgb(24, 24, 27);
pub const BG_SIDEBAR: Color = Color::Rgb(45, 27, 78); // deep purple, blackboard chrome
pub const BG_INPUT: Color = Color::Rgb(39, 39, 42);

// Border colors
pub const BORDER: Color = Color::Rgb(63, 63, 70);
pub const BORDER_FOCUS: Color = Color::Rgb(249, 115, 22);

// Quiz feedback
pub const CORRECT: Color = Color::Rgb(134, 188, 111);
pub const WRONG: Color = Color::Rgb(248, 113, 113);
