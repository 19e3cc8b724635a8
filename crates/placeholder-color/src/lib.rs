//! # placeholder-color
//!
//! The final pass over resolved text: translates authored `&` formatting
//! codes into an output escape.
//!
//! `&` immediately followed by one case-insensitive character from
//! `0-9 a-f k-o r x` is a code. Any other `&` passes through untouched.
//!
//! ```
//! use placeholder_color::{colorize, strip_codes};
//!
//! assert_eq!(colorize("&aReady &&go"), "§aReady &&go");
//! assert_eq!(strip_codes("&lBold &zkept"), "Bold &zkept");
//! ```
//!
//! ## Targets
//!
//! | Target    | `&a`                      |
//! |-----------|---------------------------|
//! | `Section` | `§a`                      |
//! | `Ansi`    | SGR escape via `console`  |
//! | `Strip`   | removed                   |
//!
//! Every pass borrows its input when it contains no code.

mod ansi;
mod code;

use std::borrow::Cow;

pub use code::{ColorCode, ALT_COLOR_CHAR, SECTION_SIGN};

use code::{find_code, Segment, Segments};

/// Which escape the color pass writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ColorTarget {
    /// Native `§` codes.
    #[default]
    Section,
    /// ANSI SGR escapes for terminals.
    Ansi,
    /// Codes removed, text kept.
    Strip,
}

/// Applies one [`ColorTarget`] to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Colorizer {
    target: ColorTarget,
}

impl Colorizer {
    pub const fn new(target: ColorTarget) -> Self {
        Self { target }
    }

    pub const fn target(&self) -> ColorTarget {
        self.target
    }

    /// Runs the pass once over `input`.
    pub fn process<'a>(&self, input: &'a str) -> Cow<'a, str> {
        let Some(first) = find_code(input) else {
            return Cow::Borrowed(input);
        };

        match self.target {
            ColorTarget::Section => Cow::Owned(translate(input, first)),
            ColorTarget::Strip => Cow::Owned(strip(input, first)),
            ColorTarget::Ansi => Cow::Owned(ansi::render(input)),
        }
    }
}

/// Translates `&` codes to `§` codes.
pub fn colorize(input: &str) -> Cow<'_, str> {
    Colorizer::new(ColorTarget::Section).process(input)
}

/// Removes every recognized `&` code.
pub fn strip_codes(input: &str) -> Cow<'_, str> {
    Colorizer::new(ColorTarget::Strip).process(input)
}

/// Whether `input` holds at least one recognized `&` code.
pub fn contains_codes(input: &str) -> bool {
    find_code(input).is_some()
}

fn translate(input: &str, first: usize) -> String {
    let mut out = String::with_capacity(input.len() + 8);
    out.push_str(&input[..first]);
    for segment in Segments::new(&input[first..]) {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Code(code) => {
                out.push(SECTION_SIGN);
                out.push(code.as_char());
            }
        }
    }
    out
}

fn strip(input: &str, first: usize) -> String {
    let mut out = String::with_capacity(input.len());
    out.push_str(&input[..first]);
    for segment in Segments::new(&input[first..]) {
        if let Segment::Text(text) = segment {
            out.push_str(text);
        }
    }
    out
}
