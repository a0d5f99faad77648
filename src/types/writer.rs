use std::path::Path;

use chrono::{Datelike, Local, Timelike};
use log::{debug, info};
use pdf_writer::{ Content, Date, Name, Pdf, Rect, Ref, Str, TextStr };

use crate::{
    traits::{DrawingSink, Stroke},
    types::{
        encode_win_ansi,
        Error,
        FinishedPage,
        FontFace,
        FontLibrary,
        FontReference,
        Page,
        PageContent,
        ResolvedFont,
}};

/// the rendering engine behind `DrawingSink`
/// contains
/// - ref allocator
/// - fonts registered on first use
/// - finished pages, written out on `finalize`
pub struct PdfWriter {
    pub alloc: Ref,
    pub page_tree_id: Ref,
    pub font_refs: Vec<FontReference>,
    pub pages: Vec<FinishedPage>,
    pub current_page: Option<Page>,
    pub title: Option<String>,
    fonts: FontLibrary,
}

/// Instantiates the Ref Allocator and reserves the page tree reference
impl Default for PdfWriter {
    fn default() -> Self {
        let mut alloc = Ref::new(1);
        let page_tree_id = alloc.bump();

        PdfWriter {
            alloc,
            page_tree_id,
            font_refs: Vec::with_capacity(2),
            pages: Vec::new(),
            current_page: None,
            title: None,
            fonts: FontLibrary::default(),
        }
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        PdfWriter::default()
    }

    /// builder function setting the document info title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// builder function adding font files on top of the standard fonts
    pub fn with_fonts(mut self, fonts: FontLibrary) -> Self {
        self.fonts = fonts;
        self
    }

    /// get a new reference for indirect object
    pub fn bump(&mut self) -> Ref {
        self.alloc.bump()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn content(&mut self) -> Result<&mut Content, Error> {
        self.current_page
            .as_mut()
            .map(|page| &mut page.content.content)
            .ok_or(Error::NoOpenPage)
    }

    /// index into `font_refs`, registering the font the first time it is used
    fn font_index(&mut self, face: FontFace) -> usize {
        if let Some(index) = self.font_refs.iter().position(|font_ref| font_ref.face == face) {
            return index;
        }

        let id = self.bump();
        let label = format!("F{}", self.font_refs.len() + 1);
        debug!("registering {} as /{label}", face.name());

        self.font_refs.push(FontReference { id, face, label, glyphs: Default::default() });
        self.font_refs.len() - 1
    }

    /// Assembles the finished pages into a PDF file image.
    ///
    /// The writer is left untouched, so the same document can be produced again.
    pub fn finish_bytes(&self) -> Result<Vec<u8>, Error> {
        if self.current_page.is_some() {
            return Err(Error::PageAlreadyOpen);
        }

        let mut alloc = self.alloc;
        let catalog_id = alloc.bump();
        let info_id = alloc.bump();
        let mut pdf = Pdf::new();

        for font_ref in self.font_refs.iter() {
            match &font_ref.face {
                FontFace::Standard(font) => {
                    pdf.type1_font(font_ref.id)
                        .base_font(Name(font.base_name().as_bytes()))
                        .encoding_predefined(Name(b"WinAnsiEncoding"));
                },
                FontFace::Embedded(name) => {
                    self.fonts
                        .embedded(name)?
                        .write_type0(&mut pdf, &mut alloc, font_ref.id, &font_ref.glyphs)?;
                },
            }
        }

        let page_ids: Vec<Ref> = self.pages.iter().map(|page| page.page_id).collect();

        for page in self.pages.iter() {
            {
                let mut pdf_page = pdf.page(page.page_id);
                pdf_page.media_box(Rect::new(0.0, 0.0, page.width, page.height));
                pdf_page.parent(self.page_tree_id);
                pdf_page.contents(page.content_id);

                let mut resources = pdf_page.resources();
                let mut fonts = resources.fonts();

                for font_ref in self.font_refs.iter() {
                    fonts.pair(font_ref.resource_name(), font_ref.id);
                }
            }

            pdf.stream(page.content_id, &page.stream);
        }

        // Write the root of the page tree.
        pdf.pages(self.page_tree_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);

        // Write the document catalog.
        pdf.catalog(catalog_id).pages(self.page_tree_id);

        let now = Local::now();
        let created = Date::new(now.year() as u16)
            .month(now.month() as u8)
            .day(now.day() as u8)
            .hour(now.hour() as u8)
            .minute(now.minute() as u8)
            .second(now.second() as u8);

        {
            let mut info = pdf.document_info(info_id);
            info.creator(TextStr("bingo-maker"));
            info.creation_date(created);

            if let Some(title) = &self.title {
                info.title(TextStr(title.as_str()));
            }
        }

        Ok(pdf.finish())
    }
}

impl DrawingSink for PdfWriter {
    fn open_page(&mut self, width: f32, height: f32) -> Result<(), Error> {
        if self.current_page.is_some() {
            return Err(Error::PageAlreadyOpen);
        }

        let page_id = self.bump();
        let content_id = self.bump();

        self.current_page = Some(Page {
            page_id,
            width,
            height,
            content: PageContent {
                content_id,
                content: Content::new(),
            },
        });

        Ok(())
    }

    fn set_stroke(&mut self, stroke: Stroke) -> Result<(), Error> {
        let content = self.content()?;
        content.set_line_width(stroke.line_width);
        content.set_stroke_gray(stroke.gray);

        Ok(())
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<(), Error> {
        let content = self.content()?;
        content.move_to(x1, y1);
        content.line_to(x2, y2);
        content.stroke();

        Ok(())
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, filled: bool) -> Result<(), Error> {
        let content = self.content()?;
        content.rect(x, y, width, height);

        if filled {
            content.fill_nonzero();
        } else {
            content.stroke();
        }

        Ok(())
    }

    fn centered_string(&mut self, x: f32, y: f32, text: &str, font_id: &str, font_size: f32) -> Result<(), Error> {
        if self.current_page.is_none() {
            return Err(Error::NoOpenPage);
        }

        let (face, encoded, width, glyphs) = match self.fonts.resolve(font_id)? {
            ResolvedFont::Standard(font) => {
                let encoded = encode_win_ansi(text);
                let width = font.encoded_width(&encoded, font_size);
                (FontFace::Standard(font), encoded, width, Vec::new())
            },
            ResolvedFont::Embedded(font) => {
                let run = font.glyph_run(text, font_size)?;
                (FontFace::Embedded(font.name().to_string()), run.encoded(), run.width, run.glyphs)
            },
        };

        let index = self.font_index(face);
        self.font_refs[index].glyphs.extend(glyphs);
        let label = self.font_refs[index].label.clone();

        let target = self.content()?;
        target.begin_text();
        target.set_font(Name(label.as_bytes()), font_size);
        target.next_line(x - width / 2.0, y);
        target.show(Str(&encoded));
        target.end_text();

        Ok(())
    }

    fn close_page(&mut self) -> Result<(), Error> {
        let page = self.current_page.take().ok_or(Error::NoOpenPage)?;
        self.pages.push(page.finish());

        Ok(())
    }

    fn finalize(&mut self, destination: &Path) -> Result<(), Error> {
        let page_count = self.pages.len();
        let bytes = self.finish_bytes()?;

        // Finish and write the thing to a file.
        std::fs::write(destination, &bytes)?;
        info!("saved {page_count} page(s), {} bytes, to {}", bytes.len(), destination.display());

        Ok(())
    }
}
