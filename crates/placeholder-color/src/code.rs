//! Legacy formatting codes.

/// Character that introduces a code in authored text (`&a`, `&l`).
pub const ALT_COLOR_CHAR: char = '&';

/// The native formatting escape (`§a`, `§l`).
pub const SECTION_SIGN: char = '§';

/// A legacy formatting code: the sixteen palette colors, five text
/// decorations, reset, and the hex-color introducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorCode {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
    Obfuscated,
    Bold,
    Strikethrough,
    Underline,
    Italic,
    Reset,
    /// Introduces six hex digit codes: `&x&f&f&0&0&0&0`.
    Hex,
}

impl ColorCode {
    /// Parses a code character, ignoring case.
    pub fn from_char(c: char) -> Option<Self> {
        let code = match c.to_ascii_lowercase() {
            '0' => ColorCode::Black,
            '1' => ColorCode::DarkBlue,
            '2' => ColorCode::DarkGreen,
            '3' => ColorCode::DarkAqua,
            '4' => ColorCode::DarkRed,
            '5' => ColorCode::DarkPurple,
            '6' => ColorCode::Gold,
            '7' => ColorCode::Gray,
            '8' => ColorCode::DarkGray,
            '9' => ColorCode::Blue,
            'a' => ColorCode::Green,
            'b' => ColorCode::Aqua,
            'c' => ColorCode::Red,
            'd' => ColorCode::LightPurple,
            'e' => ColorCode::Yellow,
            'f' => ColorCode::White,
            'k' => ColorCode::Obfuscated,
            'l' => ColorCode::Bold,
            'm' => ColorCode::Strikethrough,
            'n' => ColorCode::Underline,
            'o' => ColorCode::Italic,
            'r' => ColorCode::Reset,
            'x' => ColorCode::Hex,
            _ => return None,
        };
        Some(code)
    }

    /// The lowercase code character.
    pub const fn as_char(self) -> char {
        match self {
            ColorCode::Black => '0',
            ColorCode::DarkBlue => '1',
            ColorCode::DarkGreen => '2',
            ColorCode::DarkAqua => '3',
            ColorCode::DarkRed => '4',
            ColorCode::DarkPurple => '5',
            ColorCode::Gold => '6',
            ColorCode::Gray => '7',
            ColorCode::DarkGray => '8',
            ColorCode::Blue => '9',
            ColorCode::Green => 'a',
            ColorCode::Aqua => 'b',
            ColorCode::Red => 'c',
            ColorCode::LightPurple => 'd',
            ColorCode::Yellow => 'e',
            ColorCode::White => 'f',
            ColorCode::Obfuscated => 'k',
            ColorCode::Bold => 'l',
            ColorCode::Strikethrough => 'm',
            ColorCode::Underline => 'n',
            ColorCode::Italic => 'o',
            ColorCode::Reset => 'r',
            ColorCode::Hex => 'x',
        }
    }

    /// `true` for the sixteen palette colors.
    pub const fn is_color(self) -> bool {
        self.hex_value().is_some()
    }

    /// `true` for the text decorations `k` through `o`.
    pub const fn is_format(self) -> bool {
        matches!(
            self,
            ColorCode::Obfuscated
                | ColorCode::Bold
                | ColorCode::Strikethrough
                | ColorCode::Underline
                | ColorCode::Italic
        )
    }

    /// Palette colors double as hex digits inside a `&x` sequence.
    pub const fn hex_value(self) -> Option<u8> {
        let value = match self {
            ColorCode::Black => 0,
            ColorCode::DarkBlue => 1,
            ColorCode::DarkGreen => 2,
            ColorCode::DarkAqua => 3,
            ColorCode::DarkRed => 4,
            ColorCode::DarkPurple => 5,
            ColorCode::Gold => 6,
            ColorCode::Gray => 7,
            ColorCode::DarkGray => 8,
            ColorCode::Blue => 9,
            ColorCode::Green => 10,
            ColorCode::Aqua => 11,
            ColorCode::Red => 12,
            ColorCode::LightPurple => 13,
            ColorCode::Yellow => 14,
            ColorCode::White => 15,
            _ => return None,
        };
        Some(value)
    }
}

/// Text or code, in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Text(&'a str),
    Code(ColorCode),
}

/// Splits input into [`Segment`]s. Every `&` that is not followed by a code
/// character stays inside a text segment.
#[derive(Debug, Clone)]
pub(crate) struct Segments<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Segments<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        let remaining = &self.input[self.pos..];
        let skip = if let Some(after) = remaining.strip_prefix(ALT_COLOR_CHAR) {
            if let Some(c) = after.chars().next() {
                if let Some(code) = ColorCode::from_char(c) {
                    self.pos += ALT_COLOR_CHAR.len_utf8() + c.len_utf8();
                    return Some(Segment::Code(code));
                }
            }
            ALT_COLOR_CHAR.len_utf8()
        } else {
            0
        };

        let end = find_code(&remaining[skip..])
            .map(|idx| idx + skip)
            .unwrap_or(remaining.len());
        self.pos += end;
        Some(Segment::Text(&remaining[..end]))
    }
}

/// Byte offset of the first recognized `&` code.
pub(crate) fn find_code(input: &str) -> Option<usize> {
    let mut chars = input.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if c != ALT_COLOR_CHAR {
            continue;
        }
        if let Some(&(_, next)) = chars.peek() {
            if ColorCode::from_char(next).is_some() {
                return Some(idx);
            }
        }
    }
    None
}
