//! Paginates layout blocks onto US Letter pages with lopdf

use lopdf::{content::Content, content::Operation, Dictionary, Document, Object, Stream};

use crate::error::ReportError;
use crate::layout::{Block, Table};

const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: i64 = 54;
const CONTENT_WIDTH: i64 = PAGE_WIDTH - 2 * MARGIN;

const REGULAR_FONT: &[u8] = b"F1";
const BOLD_FONT: &[u8] = b"F2";

const TITLE_SIZE: i64 = 18;
const HEADING_SIZE: i64 = 14;
const BODY_SIZE: i64 = 12;
const NOTE_SIZE: i64 = 11;
const TABLE_SIZE: i64 = 11;
const ROW_HEIGHT: i64 = 22;
const CELL_PADDING: i64 = 6;

/// First column of a two-column table takes 70% of the width
const FIRST_COLUMN_WIDTH: i64 = CONTENT_WIDTH * 7 / 10;

/// Helvetica averages a little over half an em per glyph
fn max_chars(width: i64, font_size: i64) -> usize {
    (width * 20 / (font_size * 11)).max(1) as usize
}

/// Greedy word wrap. A single word longer than `max` gets its own line.
pub fn wrap(text: &str, max: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Standard 14 fonts only cover WinAnsi; anything else prints as '?'
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u8::try_from(u32::from(c)) {
            Ok(byte) => byte,
            Err(_) => b'?',
        })
        .collect()
}

struct PageWriter {
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    cursor: i64,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
            cursor: PAGE_HEIGHT - MARGIN,
        }
    }

    fn new_page(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.pages.push(finished);
        self.cursor = PAGE_HEIGHT - MARGIN;
    }

    /// Start a new page unless `height` more points fit on this one.
    /// Returns true if a page break happened.
    fn reserve(&mut self, height: i64) -> bool {
        if self.cursor - height < MARGIN && !self.current.is_empty() {
            self.new_page();
            return true;
        }
        false
    }

    fn text(&mut self, x: i64, y: i64, font: &[u8], size: i64, text: &str) {
        self.current.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(font.to_vec()), Object::Integer(size)]),
            Operation::new("Td", vec![Object::Integer(x), Object::Integer(y)]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_text(text), lopdf::StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    fn hline(&mut self, x1: i64, x2: i64, y: i64) {
        self.current.extend([
            Operation::new("w", vec![Object::Real(0.5)]),
            Operation::new("m", vec![Object::Integer(x1), Object::Integer(y)]),
            Operation::new("l", vec![Object::Integer(x2), Object::Integer(y)]),
            Operation::new("S", vec![]),
        ]);
    }

    fn rect(&mut self, x: i64, y: i64, width: i64, height: i64) {
        self.current.extend([
            Operation::new("w", vec![Object::Real(0.5)]),
            Operation::new(
                "re",
                vec![
                    Object::Integer(x),
                    Object::Integer(y),
                    Object::Integer(width),
                    Object::Integer(height),
                ],
            ),
            Operation::new("S", vec![]),
        ]);
    }

    fn paragraph(&mut self, text: &str, font: &[u8], size: i64, leading: i64) {
        for line in wrap(text, max_chars(CONTENT_WIDTH, size)) {
            self.reserve(leading);
            self.cursor -= leading;
            self.text(MARGIN, self.cursor + (leading - size) / 2, font, size, &line);
        }
    }

    fn table_row(&mut self, cells: &[String], font: &[u8]) {
        let widths = [FIRST_COLUMN_WIDTH, CONTENT_WIDTH - FIRST_COLUMN_WIDTH];
        self.cursor -= ROW_HEIGHT;
        let mut x = MARGIN;
        for (cell, width) in cells.iter().zip(widths) {
            self.rect(x, self.cursor, width, ROW_HEIGHT);
            let limit = max_chars(width - 2 * CELL_PADDING, TABLE_SIZE);
            let shown: String = cell.chars().take(limit).collect();
            self.text(x + CELL_PADDING, self.cursor + 7, font, TABLE_SIZE, &shown);
            x += width;
        }
    }

    fn table(&mut self, table: &Table) {
        self.reserve(ROW_HEIGHT * 2);
        self.table_row(&table.header, BOLD_FONT);
        for row in &table.rows {
            if self.reserve(ROW_HEIGHT) {
                self.table_row(&table.header, BOLD_FONT);
            }
            self.table_row(row, REGULAR_FONT);
        }
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Title(text) => self.paragraph(text, BOLD_FONT, TITLE_SIZE, 26),
            Block::Rule => {
                self.reserve(12);
                self.cursor -= 6;
                self.hline(MARGIN, PAGE_WIDTH - MARGIN, self.cursor);
                self.cursor -= 6;
            }
            Block::Heading(text) => self.paragraph(text, BOLD_FONT, HEADING_SIZE, 22),
            Block::Line(text) => self.paragraph(text, REGULAR_FONT, BODY_SIZE, 18),
            Block::Table(table) => self.table(table),
            Block::Gap(height) => self.cursor -= height,
            Block::Note(text) => self.paragraph(text, REGULAR_FONT, NOTE_SIZE, 15),
        }
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.new_page();
        }
        self.pages
    }
}

fn font(base: &str) -> Dictionary {
    Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(base.as_bytes().to_vec())),
        ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
    ])
}

/// Lay blocks out on pages and serialize the document
pub fn write_pdf(blocks: &[Block], title: &str) -> Result<Vec<u8>, ReportError> {
    let mut writer = PageWriter::new();
    for block in blocks {
        writer.block(block);
    }
    let pages = writer.finish();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font("Helvetica"));
    let bold_id = doc.add_object(font("Helvetica-Bold"));
    let resources_id = doc.add_object(Dictionary::from_iter(vec![(
        "Font",
        Object::Dictionary(Dictionary::from_iter(vec![
            (REGULAR_FONT, Object::Reference(regular_id)),
            (BOLD_FONT, Object::Reference(bold_id)),
        ])),
    )]));

    let mut page_ids = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let encoded = content.encode()?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(PAGE_WIDTH),
                    Object::Integer(PAGE_HEIGHT),
                ]),
            ),
            ("Resources", Object::Reference(resources_id)),
            ("Contents", Object::Reference(content_id)),
        ]);
        page_ids.push(doc.add_object(page));
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(page_ids.len() as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = doc.add_object(catalog);

    let info = Dictionary::from_iter(vec![
        (
            "Title",
            Object::String(encode_text(title), lopdf::StringFormat::Literal),
        ),
        (
            "Producer",
            Object::String(
                format!("scorecard-pdf {}", env!("CARGO_PKG_VERSION")).into_bytes(),
                lopdf::StringFormat::Literal,
            ),
        ),
    ]);
    let info_id = doc.add_object(info);

    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.trailer.set("Info", Object::Reference(info_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ReportError::Serialize(e.to_string()))?;
    Ok(buffer)
}
