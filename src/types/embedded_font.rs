use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use log::{debug, info, warn};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo, UnicodeCmap},
    Name, Pdf, Rect, Ref, Str,
};
use ttf_parser::{name_id, Face, GlyphId};

use crate::{
    traits::FontMetricsProvider,
    types::{Error, FontMetrics},
};

/// A TrueType/OpenType face loaded from disk.
///
/// Text is shown through glyph ids (`Identity-H`), so any script the face covers can be drawn.
/// Only the glyphs a document actually uses are embedded.
#[derive(Debug,Clone)]
pub struct EmbeddedFont {
    name: String,
    path: PathBuf,
    data: Arc<[u8]>,
    postscript_name: String,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    cap_height: i16,
    bbox: [i16; 4],
    /// CFF outlines go into `FontFile3`, TrueType outlines into `FontFile2`
    cff: bool,
}

/// glyph ids of a string together with the character each glyph shows
#[derive(Debug,Clone,PartialEq)]
pub struct GlyphRun {
    pub glyphs: Vec<(u16, char)>,
    /// advance width at the requested font size
    pub width: f32,
}

impl GlyphRun {
    /// two bytes per glyph, big endian, as `Identity-H` expects
    pub fn encoded(&self) -> Vec<u8> {
        self.glyphs.iter().flat_map(|(glyph, _)| glyph.to_be_bytes()).collect()
    }
}

impl EmbeddedFont {
    /// reads the face at `path`, the file stem becomes its font id
    pub fn load(path: &Path) -> Result<Self, Error> {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let data = std::fs::read(path)?;

        EmbeddedFont::from_data(name, path, data)
    }

    pub fn from_data(name: impl Into<String>, path: &Path, data: Vec<u8>) -> Result<Self, Error> {
        let name = name.into();
        let face = Face::parse(&data, 0).map_err(|e| Error::InvalidFont { name: name.clone(), reason: e.to_string() })?;

        let bbox = face.global_bounding_box();
        let postscript_name = face
            .names()
            .into_iter()
            .filter(|entry| entry.name_id == name_id::POST_SCRIPT_NAME)
            .find_map(|entry| entry.to_string())
            .map(|found| sanitize_name(&found))
            .filter(|found| !found.is_empty())
            .unwrap_or_else(|| sanitize_name(&name));

        let font = EmbeddedFont {
            postscript_name,
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
            cap_height: face.capital_height().unwrap_or(face.ascender()),
            bbox: [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max],
            cff: face.tables().cff.is_some(),
            name,
            path: path.to_path_buf(),
            data: Arc::from(data),
        };

        debug!("loaded font {} ({}) from {}", font.name, font.postscript_name, font.path.display());
        Ok(font)
    }

    /// font id used in configurations, the file stem
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn postscript_name(&self) -> &str {
        &self.postscript_name
    }

    pub fn metrics(&self, font_size: f32) -> FontMetrics {
        FontMetrics::scaled(self.ascender, self.descender, self.units_per_em, font_size)
    }

    fn face(&self) -> Result<Face<'_>, Error> {
        Face::parse(&self.data, 0).map_err(|e| Error::InvalidFont { name: self.name.clone(), reason: e.to_string() })
    }

    /// advance of `glyph` in PDF glyph space (1000 units per em)
    fn advance(&self, face: &Face<'_>, glyph: u16) -> f32 {
        let units = face.glyph_hor_advance(GlyphId(glyph)).unwrap_or(self.units_per_em / 2);
        f32::from(units) * 1000.0 / f32::from(self.units_per_em.max(1))
    }

    /// Maps `text` to glyph ids. Characters the face has no glyph for use `.notdef` (glyph 0).
    pub fn glyph_run(&self, text: &str, font_size: f32) -> Result<GlyphRun, Error> {
        let face = self.face()?;
        let mut missing = 0usize;

        let glyphs: Vec<(u16, char)> = text
            .chars()
            .map(|ch| match face.glyph_index(ch) {
                Some(GlyphId(glyph)) => (glyph, ch),
                None => {
                    missing += 1;
                    (0, ch)
                }
            })
            .collect();

        if missing > 0 {
            warn!("{missing} character(s) in '{text}' have no glyph in {}", self.name);
        }

        let units: f32 = glyphs.iter().map(|(glyph, _)| self.advance(&face, *glyph)).sum();

        Ok(GlyphRun { glyphs, width: units * font_size / 1000.0 })
    }

    /// Writes the font as a `Type0` font with one `CIDFont` descendant, embedding a subset that
    /// holds `glyphs` (plus `.notdef`). Indirect objects beyond `font_id` come from `alloc`.
    pub fn write_type0(&self, pdf: &mut Pdf, alloc: &mut Ref, font_id: Ref, glyphs: &BTreeMap<u16, char>) -> Result<(), Error> {
        let face = self.face()?;

        let cid_font_id = alloc.bump();
        let descriptor_id = alloc.bump();
        let font_file_id = alloc.bump();
        let to_unicode_id = alloc.bump();

        let mut subset_glyphs: Vec<u16> = glyphs.keys().copied().collect();
        if !glyphs.contains_key(&0) {
            subset_glyphs.insert(0, 0);
        }

        let subset = subsetter::subset(&self.data, 0, subsetter::Profile::pdf(&subset_glyphs))
            .map_err(|e| Error::InvalidFont { name: self.name.clone(), reason: e.to_string() })?;

        let base_font = format!("{}+{}", subset_tag(&subset_glyphs), self.postscript_name);
        let base_font = Name(base_font.as_bytes());
        let scale = 1000.0 / f32::from(self.units_per_em.max(1));

        pdf.type0_font(font_id)
            .base_font(base_font)
            .encoding_predefined(Name(b"Identity-H"))
            .descendant_font(cid_font_id)
            .to_unicode(to_unicode_id);

        {
            let mut cid_font = pdf.cid_font(cid_font_id);
            cid_font.subtype(if self.cff { CidFontType::Type0 } else { CidFontType::Type2 });
            cid_font.base_font(base_font);
            cid_font.system_info(SystemInfo {
                registry: Str(b"Adobe"),
                ordering: Str(b"Identity"),
                supplement: 0,
            });
            cid_font.font_descriptor(descriptor_id);
            cid_font.default_width(0.0);

            if !self.cff {
                cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
            }

            let mut widths = cid_font.widths();
            for glyph in &subset_glyphs {
                widths.consecutive(*glyph, [self.advance(&face, *glyph)]);
            }
        }

        {
            let [x_min, y_min, x_max, y_max] = self.bbox.map(|value| f32::from(value) * scale);
            let mut descriptor = pdf.font_descriptor(descriptor_id);
            descriptor
                .name(base_font)
                .flags(FontFlags::SYMBOLIC)
                .bbox(Rect::new(x_min, y_min, x_max, y_max))
                .italic_angle(0.0)
                .ascent(f32::from(self.ascender) * scale)
                .descent(f32::from(self.descender) * scale)
                .cap_height(f32::from(self.cap_height) * scale)
                .stem_v(80.0);

            if self.cff {
                descriptor.font_file3(font_file_id);
            } else {
                descriptor.font_file2(font_file_id);
            }
        }

        {
            let mut stream = pdf.stream(font_file_id, &subset);
            if self.cff {
                stream.pair(Name(b"Subtype"), Name(b"OpenType"));
            } else {
                stream.pair(Name(b"Length1"), subset.len() as i32);
            }
        }

        let mut cmap: UnicodeCmap = UnicodeCmap::new(
            Name(b"Custom"),
            SystemInfo {
                registry: Str(b"Adobe"),
                ordering: Str(b"UCS"),
                supplement: 0,
            },
        );
        for (glyph, ch) in glyphs.iter().filter(|(glyph, _)| **glyph != 0) {
            cmap.pair(*glyph, *ch);
        }
        pdf.stream(to_unicode_id, &cmap.finish());

        debug!("embedded {} glyph(s) of {} as {}", subset_glyphs.len(), self.name, font_id.get());
        Ok(())
    }
}

/// PostScript names allow no spaces or delimiters
fn sanitize_name(name: &str) -> String {
    name.chars().filter(|ch| ch.is_ascii_alphanumeric() || *ch == '-' || *ch == '_').collect()
}

/// six uppercase letters derived from the glyph set, prefixed to the name of a subset font
fn subset_tag(glyphs: &[u16]) -> String {
    let mut hash: u32 = 0x811c_9dc5;
    for glyph in glyphs {
        for byte in glyph.to_be_bytes() {
            hash = (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193);
        }
    }

    (0..6)
        .map(|_| {
            let letter = char::from(b'A' + (hash % 26) as u8);
            hash /= 26;
            letter
        })
        .collect()
}

/// Every TrueType/OpenType face found below a directory, keyed by file stem.
#[derive(Debug,Default,Clone)]
pub struct FontDirectory {
    fonts: BTreeMap<String, EmbeddedFont>,
}

impl FontDirectory {
    pub fn new() -> Self {
        FontDirectory::default()
    }

    /// Walks `dir` recursively for `*.ttf` / `*.otf` files.
    ///
    /// Files that fail to parse are skipped with a warning. When two files share a stem the first
    /// in path order wins.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        let mut paths = Vec::new();
        collect_font_files(dir, &mut paths)?;
        paths.sort();

        let mut directory = FontDirectory::new();

        for path in paths {
            match EmbeddedFont::load(&path) {
                Ok(font) if directory.get(font.name()).is_some() => {
                    warn!("font {} from {} is already registered, skipped", font.name(), path.display());
                },
                Ok(font) => directory.insert(font),
                Err(e) => warn!("skipping {}: {e}", path.display()),
            }
        }

        info!("{} font(s) registered from {}: {}", directory.len(), dir.display(), directory.names().collect::<Vec<_>>().join(", "));
        Ok(directory)
    }

    pub fn insert(&mut self, font: EmbeddedFont) {
        self.fonts.insert(font.name().to_string(), font);
    }

    pub fn get(&self, name: &str) -> Option<&EmbeddedFont> {
        self.fonts.get(name)
    }

    /// registered font ids in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

fn collect_font_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), Error> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            collect_font_files(&path, out)?;
        } else if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf"))
        {
            out.push(path);
        }
    }

    Ok(())
}

impl FontMetricsProvider for FontDirectory {
    fn metrics(&self, font_id: &str, font_size: f32) -> Result<FontMetrics, Error> {
        self.get(font_id)
            .map(|font| font.metrics(font_size))
            .ok_or_else(|| Error::UnknownFont(font_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_not_a_font() {
        let result = EmbeddedFont::from_data("Broken", Path::new("Broken.ttf"), b"not a font".to_vec());
        assert!(matches!(result, Err(Error::InvalidFont { name, .. }) if name == "Broken"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(FontDirectory::load(&dir.path().join("absent")), Err(Error::SaveError(_))));
    }

    #[test]
    fn unreadable_fonts_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("jp")).unwrap();
        std::fs::write(dir.path().join("jp").join("Broken-Regular.TTF"), b"nope").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"not a font either").unwrap();

        let directory = FontDirectory::load(dir.path()).unwrap();

        assert!(directory.is_empty());
        assert!(matches!(directory.metrics("Broken-Regular", 10.0), Err(Error::UnknownFont(_))));
    }

    #[test]
    fn font_files_are_found_recursively() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("a").join("b")).unwrap();
        for name in ["a/b/One.otf", "Two.ttf", "skip.woff", "a/Three.TtF"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let mut paths = Vec::new();
        collect_font_files(dir.path(), &mut paths).unwrap();

        let mut names: Vec<String> = paths
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, ["One.otf", "Three.TtF", "Two.ttf"]);
    }

    #[test]
    fn subset_tags_are_six_letters_and_stable() {
        let tag = subset_tag(&[0, 36, 72]);

        assert_eq!(tag.len(), 6);
        assert!(tag.chars().all(|ch| ch.is_ascii_uppercase()));
        assert_eq!(tag, subset_tag(&[0, 36, 72]));
        assert_ne!(tag, subset_tag(&[0, 36, 73]));
    }

    #[test]
    fn postscript_names_are_sanitized() {
        assert_eq!(sanitize_name("Noto Sans JP (Regular)"), "NotoSansJPRegular");
        assert_eq!(sanitize_name("IPAexGothic-Bold"), "IPAexGothic-Bold");
    }

    #[test]
    fn glyph_run_encodes_two_bytes_per_glyph() {
        let run = GlyphRun { glyphs: vec![(0x0102, 'a'), (7, 'b')], width: 0.0 };
        assert_eq!(run.encoded(), vec![0x01, 0x02, 0x00, 0x07]);
    }
}
