//! Palette export as source code text.

use std::fmt::Write;

use crate::palette::Palette;

/// Text format for `xpal*` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// One `0xrrggbb` per line
    Hex,
    /// `uint32_t` array with a size constant
    C,
    /// Table of `{r, g, b}` triples
    Lua,
    /// `color.Palette` literal
    Go,
}

impl ExportFormat {
    /// Render `palette` entry by entry. Callers pass an already trimmed palette.
    pub fn render(self, palette: &Palette) -> String {
        match self {
            ExportFormat::Hex => to_hex_lines(palette),
            ExportFormat::C => to_c_array(palette),
            ExportFormat::Lua => to_lua_table(palette),
            ExportFormat::Go => to_go_palette(palette),
        }
    }
}

pub fn to_hex_lines(palette: &Palette) -> String {
    let mut out = String::new();
    for &color in palette.colors() {
        let _ = writeln!(out, "0x{:06x}", Palette::pack_rgb(color));
    }
    out
}

pub fn to_c_array(palette: &Palette) -> String {
    let entries: Vec<String> = palette
        .colors()
        .iter()
        .map(|&c| format!("\t0x{:06x}", Palette::pack_rgb(c)))
        .collect();
    format!(
        "const size_t palette_sz = {};\nuint32_t palette[palette_sz] = {{\n{}\n}};\n",
        palette.len(),
        entries.join(",\n")
    )
}

pub fn to_lua_table(palette: &Palette) -> String {
    let entries: Vec<String> = palette
        .colors()
        .iter()
        .map(|c| format!("\t{{{}, {}, {}}}", c[0], c[1], c[2]))
        .collect();
    format!("palette = {{\n{}\n}}\n", entries.join(",\n"))
}

pub fn to_go_palette(palette: &Palette) -> String {
    let mut out = String::from("var palette = color.Palette{\n");
    for c in palette.colors() {
        let _ = writeln!(out, "\tcolor.RGBA{{{}, {}, {}, 0xff}},", c[0], c[1], c[2]);
    }
    out.push_str("}\n");
    out
}
