use log::warn;

use crate::{traits::FontMetricsProvider, types::Error};

/// vertical metrics of a font at a concrete size, in page units
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct FontMetrics {
    pub ascent: f32,
    /// distance below the baseline, always non-negative
    pub descent: f32,
}

impl FontMetrics {
    /// scales font-unit metrics (1000 per em) to `font_size`
    pub fn from_units(ascender: i16, descender: i16, font_size: f32) -> Self {
        FontMetrics::scaled(ascender, descender, 1000, font_size)
    }

    /// scales metrics of a font with `units_per_em` units to `font_size`
    pub fn scaled(ascender: i16, descender: i16, units_per_em: u16, font_size: f32) -> Self {
        let scale = font_size / f32::from(units_per_em.max(1));

        FontMetrics {
            ascent: f32::from(ascender) * scale,
            descent: f32::from(descender).abs() * scale,
        }
    }
}

/// The base-14 Latin faces every PDF viewer provides without embedding.
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    TimesRoman,
    TimesBold,
    Courier,
    CourierBold,
}

impl StandardFont {
    pub const ALL: [StandardFont; 6] = [
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
        StandardFont::TimesRoman,
        StandardFont::TimesBold,
        StandardFont::Courier,
        StandardFont::CourierBold,
    ];

    /// PostScript name, also used as the `BaseFont` entry of the PDF font dictionary
    pub fn base_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        StandardFont::ALL.into_iter().find(|font| font.base_name() == name)
    }

    /// AFM `Ascender` / `Descender` in font units
    fn vertical_units(&self) -> (i16, i16) {
        match self {
            StandardFont::Helvetica | StandardFont::HelveticaBold => (718, -207),
            StandardFont::TimesRoman | StandardFont::TimesBold => (683, -217),
            StandardFont::Courier | StandardFont::CourierBold => (629, -157),
        }
    }

    /// advance widths for the printable ASCII range 0x20..=0x7E
    fn ascii_widths(&self) -> Option<&'static [u16; 95]> {
        match self {
            StandardFont::Helvetica => Some(&HELVETICA_WIDTHS),
            StandardFont::HelveticaBold => Some(&HELVETICA_BOLD_WIDTHS),
            StandardFont::TimesRoman => Some(&TIMES_ROMAN_WIDTHS),
            StandardFont::TimesBold => Some(&TIMES_BOLD_WIDTHS),
            // monospaced
            StandardFont::Courier | StandardFont::CourierBold => None,
        }
    }

    /// used for Latin-1 characters outside the ASCII table
    fn average_width(&self) -> u16 {
        match self {
            StandardFont::Helvetica | StandardFont::HelveticaBold => 556,
            StandardFont::TimesRoman | StandardFont::TimesBold => 500,
            StandardFont::Courier | StandardFont::CourierBold => 600,
        }
    }

    pub fn metrics(&self, font_size: f32) -> FontMetrics {
        let (ascender, descender) = self.vertical_units();
        FontMetrics::from_units(ascender, descender, font_size)
    }

    /// width of a single WinAnsi byte in font units
    fn byte_width(&self, byte: u8) -> u16 {
        match (self.ascii_widths(), byte) {
            (Some(table), 0x20..=0x7E) => table[usize::from(byte - 0x20)],
            _ => self.average_width(),
        }
    }

    /// width of `text` at `font_size` in page units, as it will be shown after encoding
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        self.encoded_width(&encode_win_ansi(text), font_size)
    }

    /// width of already encoded WinAnsi bytes at `font_size`
    pub fn encoded_width(&self, bytes: &[u8], font_size: f32) -> f32 {
        let units: u32 = bytes
            .iter()
            .map(|byte| u32::from(self.byte_width(*byte)))
            .sum();

        units as f32 * font_size / 1000.0
    }
}

/// Encodes `text` for a base-14 font with `WinAnsiEncoding`.
///
/// Latin-1 code points map to the same byte, the typographic characters WinAnsi places in
/// 0x80..=0x9F map to their slot. Anything else cannot be shown by these fonts and becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut replaced = 0usize;
    let bytes = text
        .chars()
        .map(|ch| match win_ansi_byte(ch) {
            Some(byte) => byte,
            None => {
                replaced += 1;
                b'?'
            }
        })
        .collect();

    if replaced > 0 {
        warn!("{replaced} character(s) in '{text}' have no glyph in the standard fonts, replaced with '?'");
    }

    bytes
}

fn win_ansi_byte(ch: char) -> Option<u8> {
    if let Some(byte) = WIN_ANSI_HIGH.iter().position(|&mapped| mapped != '\0' && mapped == ch) {
        return u8::try_from(0x80 + byte).ok();
    }

    match u8::try_from(u32::from(ch)) {
        Ok(byte) if byte >= 0x20 && byte != 0x7F && !(0x80..0xA0).contains(&byte) => Some(byte),
        _ => None,
    }
}

/// characters of WinAnsi bytes 0x80..=0x9F, `\0` marks an unused slot
const WIN_ANSI_HIGH: [char; 32] = [
    '\u{20AC}', '\0', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\0', '\u{017D}', '\0',
    '\0', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\0', '\u{017E}', '\u{0178}',
];

/// `FontMetricsProvider` backed by the built-in standard fonts, looked up by PostScript name
#[derive(Debug,Default,Clone,Copy)]
pub struct StandardFonts;

impl StandardFonts {
    pub fn resolve(&self, font_id: &str) -> Result<StandardFont, Error> {
        StandardFont::from_name(font_id).ok_or_else(|| Error::UnknownFont(font_id.to_string()))
    }
}

impl FontMetricsProvider for StandardFonts {
    fn metrics(&self, font_id: &str, font_size: f32) -> Result<FontMetrics, Error> {
        Ok(self.resolve(font_id)?.metrics(font_size))
    }
}

const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

const TIMES_BOLD_WIDTHS: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];
