use pdf_writer::{ Content, Ref };

/// container for pdf_writer page references, the page being drawn
pub struct Page {
    pub page_id: Ref,
    pub width: f32,
    pub height: f32,
    pub content: PageContent,
}

/// each page gets a single `Content` object
pub struct PageContent {
    pub content_id: Ref,
    pub content: Content
}

/// a closed page, its content stream already serialized
pub struct FinishedPage {
    pub page_id: Ref,
    pub content_id: Ref,
    pub width: f32,
    pub height: f32,
    pub stream: Vec<u8>,
}

impl Page {
    pub fn finish(self) -> FinishedPage {
        FinishedPage {
            page_id: self.page_id,
            content_id: self.content.content_id,
            width: self.width,
            height: self.height,
            stream: self.content.content.finish().to_vec(),
        }
    }
}
