//! ANSI rendering of legacy codes through `console::Style`.
//!
//! Palette colors map onto the sixteen terminal colors: the dark half
//! (`0`-`7`) to the base colors, the light half (`8`-`f`) to their bright
//! variants. A palette color starts a fresh style, so it clears any
//! decoration set before it. Decorations stack on the current style.

use console::{Color, Style};

use crate::code::{ColorCode, Segment, Segments};

/// Styles built here always emit escapes, whatever the attached terminal.
fn base_style() -> Style {
    Style::new().force_styling(true)
}

fn palette_style(code: ColorCode) -> Option<Style> {
    let (color, bright) = match code {
        ColorCode::Black => (Color::Black, false),
        ColorCode::DarkBlue => (Color::Blue, false),
        ColorCode::DarkGreen => (Color::Green, false),
        ColorCode::DarkAqua => (Color::Cyan, false),
        ColorCode::DarkRed => (Color::Red, false),
        ColorCode::DarkPurple => (Color::Magenta, false),
        ColorCode::Gold => (Color::Yellow, false),
        ColorCode::Gray => (Color::White, false),
        ColorCode::DarkGray => (Color::Black, true),
        ColorCode::Blue => (Color::Blue, true),
        ColorCode::Green => (Color::Green, true),
        ColorCode::Aqua => (Color::Cyan, true),
        ColorCode::Red => (Color::Red, true),
        ColorCode::LightPurple => (Color::Magenta, true),
        ColorCode::Yellow => (Color::Yellow, true),
        ColorCode::White => (Color::White, true),
        _ => return None,
    };
    let style = base_style().fg(color);
    Some(if bright { style.bright() } else { style })
}

fn decorate(style: Style, code: ColorCode) -> Style {
    match code {
        ColorCode::Obfuscated => style.blink(),
        ColorCode::Bold => style.bold(),
        ColorCode::Strikethrough => style.strikethrough(),
        ColorCode::Underline => style.underlined(),
        ColorCode::Italic => style.italic(),
        _ => style,
    }
}

/// Maps an RGB triple onto the 6x6x6 cube of the 256-color palette.
pub(crate) fn rgb_to_palette_index(r: u8, g: u8, b: u8) -> u8 {
    let level = |c: u8| ((c as f64 / 255.0) * 5.0).round() as u16;
    (16 + 36 * level(r) + 6 * level(g) + level(b)) as u8
}

/// Reads the six digit codes following `&x`. Consumes them only when all six
/// are present.
fn take_hex(segments: &mut Segments<'_>) -> Option<u8> {
    let mut lookahead = segments.clone();
    let mut digits = [0u8; 6];
    for digit in digits.iter_mut() {
        match lookahead.next() {
            Some(Segment::Code(code)) => *digit = code.hex_value()?,
            _ => return None,
        }
    }
    *segments = lookahead;

    let r = (digits[0] << 4) | digits[1];
    let g = (digits[2] << 4) | digits[3];
    let b = (digits[4] << 4) | digits[5];
    Some(rgb_to_palette_index(r, g, b))
}

fn push_styled(out: &mut String, text: &str, style: Option<&Style>) {
    match style {
        Some(style) => out.push_str(&style.apply_to(text).to_string()),
        None => out.push_str(text),
    }
}

/// Renders `input` with every recognized code turned into SGR sequences.
/// A malformed `&x` sequence is dropped.
pub(crate) fn render(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 16);
    let mut style: Option<Style> = None;
    let mut segments = Segments::new(input);

    while let Some(segment) = segments.next() {
        match segment {
            Segment::Text(text) => push_styled(&mut out, text, style.as_ref()),
            Segment::Code(ColorCode::Reset) => style = None,
            Segment::Code(ColorCode::Hex) => {
                if let Some(index) = take_hex(&mut segments) {
                    style = Some(base_style().color256(index));
                }
            }
            Segment::Code(code) if code.is_format() => {
                style = Some(decorate(style.take().unwrap_or_else(base_style), code));
            }
            Segment::Code(code) => {
                if let Some(palette) = palette_style(code) {
                    style = Some(palette);
                }
            }
        }
    }

    out
}
