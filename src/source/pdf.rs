//! PDF line source backed by lopdf.
//!
//! Walks each page's content stream, turns text-showing operators into spans
//! with an effective font size and baseline position, then groups spans that
//! share a baseline into visual lines.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::Span;

use super::LineSource;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
/// Magic plus a "1.7"-style version.
const HEADER_LEN: usize = PDF_MAGIC.len() + 3;
/// Kerning beyond this many thousandths of an em reads as a word space.
const TJ_SPACE_THRESHOLD: f32 = 200.0;
/// Rough glyph advance as a fraction of the font size.
const AVG_CHAR_WIDTH_RATIO: f32 = 0.5;
/// Text narrower than this is never split into columns.
const MIN_COLUMN_LAYOUT_WIDTH: f32 = 250.0;
/// Width of the vertical slices used to find an empty gutter.
const COLUMN_SLICE_WIDTH: f32 = 3.0;
const MIN_GUTTER_WIDTH: f32 = 12.0;
const MIN_COLUMN_WIDTH: f32 = 80.0;

/// Line source over a PDF document.
pub struct PdfLineSource {
    doc: LopdfDocument,
    /// Page number to page object, resolved once at load.
    pages: BTreeMap<u32, ObjectId>,
}

impl PdfLineSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut header = Vec::with_capacity(HEADER_LEN);
        std::fs::File::open(path)?
            .take(HEADER_LEN as u64)
            .read_to_end(&mut header)?;
        check_header(&header)?;

        let doc = LopdfDocument::load(path)?;
        Ok(Self::from_document(doc))
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        check_header(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self::from_document(doc))
    }

    /// Load a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn from_document(doc: LopdfDocument) -> Self {
        // Decryption failures surface from load as Error::Encrypted.
        if doc.is_encrypted() {
            log::warn!("Document is encrypted; text may not decode");
        }
        let pages = doc.get_pages();
        log::debug!("Opened PDF {} with {} pages", doc.version, pages.len());
        Self { doc, pages }
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn page_id(&self, page: u32) -> Result<ObjectId> {
        self.pages
            .get(&page)
            .copied()
            .ok_or(Error::PageOutOfRange(page, self.page_count()))
    }

    /// Decompressed content stream of a page; empty for pages without one.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self.doc.get_dictionary(page_id)?;
        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            Err(_) => return Ok(Vec::new()),
        };

        let references: Vec<ObjectId> = match contents {
            Object::Reference(r) => vec![*r],
            Object::Array(arr) => arr.iter().filter_map(|o| o.as_reference().ok()).collect(),
            _ => return Err(Error::PdfParse("Invalid content stream".to_string())),
        };

        let mut content = Vec::new();
        for r in references {
            match self.doc.get_object(r)? {
                Object::Stream(stream) => {
                    let data = stream
                        .decompressed_content()
                        .unwrap_or_else(|_| stream.content.clone());
                    content.extend_from_slice(&data);
                    content.push(b'\n');
                }
                _ => log::warn!("Skipping non-stream content object {:?}", r),
            }
        }
        Ok(content)
    }

    /// Extract positioned spans from a page.
    fn page_spans(&self, page_id: ObjectId) -> Result<Vec<PlacedSpan>> {
        let fonts: BTreeMap<Vec<u8>, &Dictionary> = self.doc.get_page_fonts(page_id)?;
        let content = self.page_content(page_id)?;
        let content = lopdf::content::Content::decode(&content)?;

        let mut state = TextState::default();
        let mut font_name: Vec<u8> = Vec::new();
        let mut spans = Vec::new();

        for op in &content.operations {
            let operands = &op.operands;
            match op.operator.as_str() {
                "BT" => state.begin(),
                "Tf" => {
                    if let [Object::Name(name), size, ..] = operands.as_slice() {
                        font_name = name.clone();
                        state.font_size = number(size).unwrap_or(state.font_size);
                    }
                }
                "TL" => {
                    if let Some(leading) = operands.first().and_then(number) {
                        state.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if let [tx, ty, ..] = operands.as_slice() {
                        let (tx, ty) = (number(tx).unwrap_or(0.0), number(ty).unwrap_or(0.0));
                        if op.operator == "TD" {
                            state.leading = -ty;
                        }
                        state.move_line(tx, ty);
                    }
                }
                "Tm" => {
                    if operands.len() >= 6 {
                        let m: Vec<f32> = operands
                            .iter()
                            .take(6)
                            .map(|o| number(o).unwrap_or(0.0))
                            .collect();
                        state.set_matrix([m[0], m[1], m[2], m[3], m[4], m[5]]);
                    }
                }
                "T*" => state.next_line(),
                "Tj" | "'" | "\"" => {
                    if op.operator != "Tj" {
                        state.next_line();
                    }
                    let index = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(Object::String(bytes, _)) = operands.get(index) {
                        let text = self.decode(&fonts, &font_name, bytes);
                        state.show(text, &mut spans);
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(items)) = operands.first() {
                        let text = self.decode_array(&fonts, &font_name, items);
                        state.show(text, &mut spans);
                    }
                }
                _ => {}
            }
        }

        Ok(spans)
    }

    fn decode(&self, fonts: &BTreeMap<Vec<u8>, &Dictionary>, font: &[u8], bytes: &[u8]) -> String {
        if let Some(dict) = fonts.get(font) {
            if let Ok(encoding) = dict.get_font_encoding(&self.doc) {
                if let Ok(text) = LopdfDocument::decode_text(&encoding, bytes) {
                    return text;
                }
            }
        }
        decode_text_simple(bytes)
    }

    /// Decode a TJ array; large negative adjustments become spaces.
    fn decode_array(
        &self,
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
        font: &[u8],
        items: &[Object],
    ) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode(fonts, font, bytes)),
                other => {
                    let advance = number(other).map(|n| -n).unwrap_or(0.0);
                    let ends_open = combined
                        .chars()
                        .last()
                        .is_some_and(|c| !c.is_whitespace() && !is_spaceless_script_char(c));
                    if advance > TJ_SPACE_THRESHOLD && ends_open {
                        combined.push(' ');
                    }
                }
            }
        }
        combined
    }
}

impl LineSource for PdfLineSource {
    fn pages(&self) -> Vec<u32> {
        self.pages.keys().copied().collect()
    }

    fn page_lines(&self, page: u32) -> Result<Vec<Vec<Span>>> {
        let page_id = self.page_id(page)?;
        let spans = self.page_spans(page_id)?;
        Ok(group_into_lines(spans)
            .into_iter()
            .map(|line| join_line(&line))
            .collect())
    }
}

/// Validate the `%PDF-x.y` header.
fn check_header(data: &[u8]) -> Result<()> {
    if data.len() < HEADER_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version = &data[PDF_MAGIC.len()..HEADER_LEN];
    match version {
        [major @ (b'1' | b'2'), b'.', minor] if minor.is_ascii_digit() => {
            if *major == b'2' && *minor != b'0' {
                return Err(Error::UnsupportedVersion(
                    String::from_utf8_lossy(version).to_string(),
                ));
            }
            Ok(())
        }
        _ => Err(Error::UnsupportedVersion(
            String::from_utf8_lossy(version).to_string(),
        )),
    }
}

/// A decoded span with its position on the page.
#[derive(Debug, Clone)]
struct PlacedSpan {
    text: String,
    x: f32,
    y: f32,
    width: f32,
    size: f32,
}

impl PlacedSpan {
    fn center(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Text object state: text matrix, line matrix, font size, leading.
#[derive(Debug, Clone)]
struct TextState {
    matrix: [f32; 6],
    line_matrix: [f32; 6],
    font_size: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: IDENTITY,
            line_matrix: IDENTITY,
            font_size: 12.0,
            leading: 0.0,
        }
    }
}

const IDENTITY: [f32; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

impl TextState {
    fn begin(&mut self) {
        self.matrix = IDENTITY;
        self.line_matrix = IDENTITY;
    }

    fn set_matrix(&mut self, m: [f32; 6]) {
        self.matrix = m;
        self.line_matrix = m;
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        let [a, b, c, d, e, f] = self.line_matrix;
        self.line_matrix = [a, b, c, d, e + tx * a + ty * c, f + tx * b + ty * d];
        self.matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        // Without a TL operator, fall back to single spacing.
        let leading = if self.leading != 0.0 {
            self.leading
        } else {
            self.font_size * 1.2
        };
        self.move_line(0.0, -leading);
    }

    /// Vertical scale of the text matrix.
    fn scale(&self) -> f32 {
        let [_, _, c, d, _, _] = self.matrix;
        (c * c + d * d).sqrt()
    }

    /// Record a shown string and advance past it.
    fn show(&mut self, text: String, spans: &mut Vec<PlacedSpan>) {
        let text: String = text.nfc().collect();
        let advance = text.chars().count() as f32 * self.font_size * AVG_CHAR_WIDTH_RATIO;
        let [a, b, _, _, e, f] = self.matrix;
        let size = self.font_size * self.scale();

        if !text.trim().is_empty() {
            spans.push(PlacedSpan {
                text,
                x: e,
                y: f,
                width: advance * a,
                size,
            });
        }

        self.matrix[4] = e + advance * a;
        self.matrix[5] = f + advance * b;
    }
}

/// Group spans into visual lines. A two-column page is read column by
/// column, so spans on the same baseline in different columns stay apart.
fn group_into_lines(spans: Vec<PlacedSpan>) -> Vec<Vec<PlacedSpan>> {
    let Some(gutter) = find_gutter(&spans) else {
        return group_column_lines(spans);
    };
    log::debug!("Two columns split at x={:.1}", gutter);

    let (left, right): (Vec<_>, Vec<_>) = spans
        .into_iter()
        .partition(|span| span.center() < gutter);
    let mut lines = group_column_lines(left);
    lines.extend(group_column_lines(right));
    lines
}

/// X position of an empty vertical band separating two text columns.
///
/// The page is cut into thin vertical slices; the widest run of empty slices
/// in the middle of the text area is the gutter candidate. It must be wide
/// enough, leave both columns wide enough, and have text on both sides.
fn find_gutter(spans: &[PlacedSpan]) -> Option<f32> {
    if spans.len() < 2 {
        return None;
    }

    let min_x = spans.iter().map(|s| s.x).fold(f32::MAX, f32::min);
    let max_x = spans.iter().map(|s| s.x + s.width).fold(f32::MIN, f32::max);
    let text_width = max_x - min_x;
    if text_width < MIN_COLUMN_LAYOUT_WIDTH {
        return None;
    }

    let num_slices = (text_width / COLUMN_SLICE_WIDTH) as usize + 1;
    let mut occupied = vec![false; num_slices];
    for span in spans {
        let start = ((span.x - min_x) / COLUMN_SLICE_WIDTH) as usize;
        let end = ((span.x + span.width - min_x) / COLUMN_SLICE_WIDTH) as usize;
        for slot in occupied
            .iter_mut()
            .take(end.min(num_slices - 1) + 1)
            .skip(start)
        {
            *slot = true;
        }
    }

    // Gutters hug neither margin.
    let search_start = num_slices * 15 / 100;
    let search_end = num_slices * 85 / 100;
    let middle = num_slices as f32 / 2.0;

    let mut best: Option<(usize, usize)> = None;
    let mut run_start = None;
    for i in search_start..=search_end {
        let empty = i < search_end && !occupied[i];
        match (empty, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                let len = i - start;
                let better = match best {
                    None => true,
                    Some((best_start, best_len)) => {
                        let dist = (start as f32 + len as f32 / 2.0 - middle).abs();
                        let best_dist =
                            (best_start as f32 + best_len as f32 / 2.0 - middle).abs();
                        len > best_len || (len == best_len && dist < best_dist)
                    }
                };
                if better {
                    best = Some((start, len));
                }
                run_start = None;
            }
            _ => {}
        }
    }

    let (start, len) = best?;
    if len as f32 * COLUMN_SLICE_WIDTH < MIN_GUTTER_WIDTH {
        return None;
    }
    let gutter = min_x + (start as f32 + len as f32 / 2.0) * COLUMN_SLICE_WIDTH;
    if gutter - min_x < MIN_COLUMN_WIDTH || max_x - gutter < MIN_COLUMN_WIDTH {
        return None;
    }

    let min_spans = (spans.len() / 10).max(1);
    let left = spans.iter().filter(|s| s.center() < gutter).count();
    let right = spans.len() - left;
    if left < min_spans || right < min_spans {
        return None;
    }
    Some(gutter)
}

/// Group spans of one column sharing a baseline, top first, left to right.
fn group_column_lines(mut spans: Vec<PlacedSpan>) -> Vec<Vec<PlacedSpan>> {
    spans.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut lines: Vec<Vec<PlacedSpan>> = Vec::new();
    let mut current: Vec<PlacedSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let tolerance = span.size * 0.3;
        match current_y {
            Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
            _ => {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    for line in &mut lines {
        line.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
    }
    lines
}

/// Convert one visual line into spans, carrying word gaps as leading spaces.
fn join_line(line: &[PlacedSpan]) -> Vec<Span> {
    let mut spans = Vec::with_capacity(line.len());

    for (i, span) in line.iter().enumerate() {
        let mut text = span.text.clone();
        if let Some(prev) = i.checked_sub(1).map(|j| &line[j]) {
            let gap = span.x - (prev.x + prev.width);
            let threshold = span.size * AVG_CHAR_WIDTH_RATIO * 0.2;
            let prev_last = prev.text.chars().last();
            let curr_first = span.text.chars().next();
            let already_spaced = prev_last.is_some_and(char::is_whitespace)
                || curr_first.is_some_and(char::is_whitespace);
            let both_spaceless = prev_last.is_some_and(is_spaceless_script_char)
                && curr_first.is_some_and(is_spaceless_script_char);

            if gap > threshold && !already_spaced && !both_spaceless {
                text.insert(0, ' ');
            }
        }
        spans.push(Span::new(text, span.size));
    }
    spans
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Scripts written without spaces between words (Chinese, Japanese kana).
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF
        | 0x3400..=0x4DBF
        | 0x20000..=0x2EBEF
        | 0x3040..=0x30FF
        | 0x3000..=0x303F)
}

/// Decoding fallback when the font has no usable encoding.
fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
