//! PICO-8 ascii cart (`.p8`) sections.
//!
//! A cart is plain text split into sections by marker lines such as
//! `__lua__` or `__gfx__`. Everything before the first marker (normally the
//! `pico-8 cartridge` banner and version line) is kept as a header section.
//!
//! # Example
//!
//! ```
//! use imgtool::cart::{Cart, Section};
//!
//! let cart = Cart::parse("pico-8 cartridge\n__lua__\nprint('hi')\n__gfx__\n0123\n");
//! assert_eq!(cart.section(Section::Lua).unwrap(), ["print('hi')"]);
//! assert_eq!(cart.section(Section::Gfx).unwrap(), ["0123"]);
//! ```

use std::fmt;
use std::io::{self, BufRead};

use crate::error::ToolError;
use crate::indexed::IndexedImage;
use crate::palette::Palette;
use crate::sprite::{SpriteFormat, SHEET_HEIGHT, SHEET_WIDTH};

/// A named cart section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Lines before the first marker
    Header,
    Lua,
    Gfx,
    Gfx8,
    Gff,
    Map,
    Sfx,
    Music,
    Label,
}

impl Section {
    /// Sections that start with a marker line, in cart order.
    pub const MARKED: [Section; 8] = [
        Section::Lua,
        Section::Gfx,
        Section::Gfx8,
        Section::Gff,
        Section::Map,
        Section::Sfx,
        Section::Music,
        Section::Label,
    ];

    /// Marker line for this section. The header has none and returns "".
    pub fn marker(self) -> &'static str {
        match self {
            Section::Header => "",
            Section::Lua => "__lua__",
            Section::Gfx => "__gfx__",
            Section::Gfx8 => "__gfx8__",
            Section::Gff => "__gff__",
            Section::Map => "__map__",
            Section::Sfx => "__sfx__",
            Section::Music => "__music__",
            Section::Label => "__label__",
        }
    }

    /// Section started by `line`, if it is exactly a recognized marker.
    pub fn from_marker(line: &str) -> Option<Section> {
        Self::MARKED.into_iter().find(|s| s.marker() == line)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Header => write!(f, "header"),
            other => write!(f, "{}", other.marker()),
        }
    }
}

/// Parsed cart: sections in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    sections: Vec<(Section, Vec<String>)>,
}

impl Cart {
    /// Split cart text into sections. Never fails: unknown lines simply belong
    /// to the current section.
    pub fn parse(text: &str) -> Cart {
        Self::from_lines(text.lines())
    }

    /// Read and split a cart from a buffered reader.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub fn read<R: BufRead>(reader: R) -> io::Result<Cart> {
        let lines = reader
            .split(b'\n')
            .map(|line| line.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
            .collect::<io::Result<Vec<String>>>()?;
        Ok(Self::from_lines(lines.iter().map(String::as_str)))
    }

    fn from_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Cart {
        let mut cart = Cart::default();
        let mut current = Section::Header;

        for line in lines {
            let text = line.strip_suffix('\r').unwrap_or(line);
            match Section::from_marker(text) {
                Some(section) => {
                    // A repeated marker continues the earlier section
                    cart.lines_mut(section);
                    current = section;
                }
                None => cart.lines_mut(current).push(text.to_string()),
            }
        }
        cart
    }

    fn lines_mut(&mut self, section: Section) -> &mut Vec<String> {
        let pos = match self.sections.iter().position(|(s, _)| *s == section) {
            Some(pos) => pos,
            None => {
                self.sections.push((section, Vec::new()));
                self.sections.len() - 1
            }
        };
        &mut self.sections[pos].1
    }

    /// Lines of a section, if present.
    pub fn section(&self, section: Section) -> Option<&[String]> {
        self.sections.iter().find(|(s, _)| *s == section).map(|(_, lines)| lines.as_slice())
    }

    /// Sections in order of first appearance.
    pub fn sections(&self) -> impl Iterator<Item = (Section, &[String])> {
        self.sections.iter().map(|(s, lines)| (*s, lines.as_slice()))
    }

    /// Number of sections, including the header if present.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Decode the `__gfx__` sprite sheet into a 128x128 image.
    ///
    /// A cart without `__gfx__` gives a blank (all index 0) sheet.
    pub fn sprite_sheet(&self, palette: &Palette) -> Result<IndexedImage, ToolError> {
        self.decode_sheet(SpriteFormat::Pico8, palette)
    }

    /// Decode the sheet stored in `format`'s section under `palette` (padded to
    /// 256 entries).
    pub fn decode_sheet(
        &self,
        format: SpriteFormat,
        palette: &Palette,
    ) -> Result<IndexedImage, ToolError> {
        let palette = palette.fill_to_full();
        match self.section(format.section()) {
            Some(lines) => format.decode(lines, palette),
            None => Ok(IndexedImage::new(SHEET_WIDTH, SHEET_HEIGHT, palette)),
        }
    }
}

/// Renders the cart back to `.p8` text.
impl fmt::Display for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (section, lines) in &self.sections {
            if *section != Section::Header {
                writeln!(f, "{}", section.marker())?;
            }
            for line in lines {
                writeln!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}
