/// Colors handed out to new widgets, one per label index, in this order.
pub const PALETTE: [&str; 19] = [
    "#FA8072", "#008080", "#ff6384", "#FFD700", "#008000", "#800080", "#FFA500", "#ADFF2F",
    "#800000", "#0000FF", "#00FFFF", "#FFFF00", "#36a2eb", "#cc65fe", "#f7c242", "#66cc99",
    "#e66000", "#93c572", "#5984e0",
];

/// Exactly `count` colors, wrapping around the palette.
pub fn colors_for(count: usize) -> Vec<String> {
    PALETTE
        .iter()
        .cycle()
        .take(count)
        .map(|c| c.to_string())
        .collect()
}

/// Parse `#RRGGBB` or `#RGB` into an RGB triple.
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some((digit(0)?, digit(1)?, digit(2)?))
        }
        _ => None,
    }
}
