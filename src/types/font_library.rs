use crate::{
    traits::FontMetricsProvider,
    types::{EmbeddedFont, Error, FontDirectory, FontMetrics, StandardFont, StandardFonts},
};

/// a font id resolved against a `FontLibrary`
#[derive(Debug,Clone,Copy)]
pub enum ResolvedFont<'a> {
    Standard(StandardFont),
    Embedded(&'a EmbeddedFont),
}

/// Fonts a document can draw with: registered font files first, then the standard fonts.
#[derive(Debug,Default,Clone)]
pub struct FontLibrary {
    directory: FontDirectory,
}

impl FontLibrary {
    pub fn new() -> Self {
        FontLibrary::default()
    }

    pub fn with_directory(directory: FontDirectory) -> Self {
        FontLibrary { directory }
    }

    pub fn directory(&self) -> &FontDirectory {
        &self.directory
    }

    pub fn resolve(&self, font_id: &str) -> Result<ResolvedFont<'_>, Error> {
        match self.directory.get(font_id) {
            Some(font) => Ok(ResolvedFont::Embedded(font)),
            None => StandardFonts.resolve(font_id).map(ResolvedFont::Standard),
        }
    }

    /// an embedded font by id, standard fonts are not returned
    pub fn embedded(&self, font_id: &str) -> Result<&EmbeddedFont, Error> {
        self.directory.get(font_id).ok_or_else(|| Error::UnknownFont(font_id.to_string()))
    }
}

impl FontMetricsProvider for FontLibrary {
    fn metrics(&self, font_id: &str, font_size: f32) -> Result<FontMetrics, Error> {
        Ok(match self.resolve(font_id)? {
            ResolvedFont::Standard(font) => font.metrics(font_size),
            ResolvedFont::Embedded(font) => font.metrics(font_size),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_fonts_are_the_fallback() {
        let library = FontLibrary::new();

        assert!(matches!(library.resolve("Times-Bold"), Ok(ResolvedFont::Standard(StandardFont::TimesBold))));
        assert_eq!(library.metrics("Helvetica", 10.0).unwrap(), StandardFont::Helvetica.metrics(10.0));
    }

    #[test]
    fn unknown_everywhere_is_unknown() {
        let library = FontLibrary::new();

        assert!(matches!(library.metrics("NotoSansJP-Regular", 10.0), Err(Error::UnknownFont(name)) if name == "NotoSansJP-Regular"));
        assert!(matches!(library.embedded("Helvetica"), Err(Error::UnknownFont(_))));
    }
}
