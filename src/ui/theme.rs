use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub number: Color,
    pub operator: Color,
    pub token_kind: Color, // Cyan for TK_* names
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub focus_node: Color, // Pink for the node the current step is about
    pub pending: Color,    // Muted yellow for unattached right operands
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    number: Color::Rgb(250, 179, 135),         // Orange for integer literals
    operator: Color::Rgb(249, 226, 175),       // Yellow for + and -
    token_kind: Color::Rgb(148, 226, 213),     // Cyan/teal for token kinds
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current row
    focus_node: Color::Rgb(245, 194, 231),
    pending: Color::Rgb(180, 165, 120),
};
