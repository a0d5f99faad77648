use std::collections::BTreeMap;

use pdf_writer::{ Name, Ref };

use crate::types::StandardFont;

/// which face a registered font draws with
#[derive(Debug,Clone,PartialEq)]
pub enum FontFace {
    Standard(StandardFont),
    /// id of a font in the writer's `FontLibrary`
    Embedded(String),
}

impl FontFace {
    pub fn name(&self) -> &str {
        match self {
            FontFace::Standard(font) => font.base_name(),
            FontFace::Embedded(name) => name,
        }
    }
}

/// a font registered with the document, `label` is its key in page resources
#[derive(Debug)]
pub struct FontReference {
    pub id: Ref,
    pub face: FontFace,
    pub label: String,
    /// glyphs shown with an embedded face and the character each one stands for
    pub glyphs: BTreeMap<u16, char>,
}

impl FontReference {
    pub fn resource_name(&self) -> Name<'_> {
        Name(self.label.as_bytes())
    }
}
