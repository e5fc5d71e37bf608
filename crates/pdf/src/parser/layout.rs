//! Text extraction and line assembly.
//!
//! ```text
//! content ops  ->  TextSpan[]  ->  PlacedSpan[]  ->  SpanRow[]  ->  TextLine
//!   (per page)     extract_page_spans  place     group_into_rows  assemble
//! ```
//!
//! [`TextSpan`]s live in PDF user space (origin bottom-left, Y up).
//! [`PlacedSpan`]s, [`SpanRow`]s and [`TextLine`]s use page space as
//! printed: origin at the top-left corner of the MediaBox, Y growing
//! downwards.
//!
//! Rows are formed over the whole page before any crop, so a printed line
//! mixing font sizes always stays in one piece.

use super::backend::{BackendFontInfo, ContentOp, PageId, PdfBackend, PdfValue};
use crate::PdfError;

/// A run of text shown by one text operator, at its baseline origin.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub font_size: f32,
}

/// A span with its bounding box in page space.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedSpan {
    pub text: String,
    pub x0: f32,
    pub x1: f32,
    pub top: f32,
    pub bottom: f32,
}

impl PlacedSpan {
    /// Page-space box of a user-space span on a page with the given MediaBox.
    pub fn place(span: &TextSpan, media_box: [f32; 4]) -> Self {
        let [llx, _, _, ury] = media_box;
        let x0 = span.x - llx;
        let ascent = span.font_size * ASCENT_RATIO;
        let descent = span.font_size * (1.0 - ASCENT_RATIO);
        PlacedSpan {
            text: span.text.clone(),
            x0,
            x1: x0 + span.width,
            top: ury - (span.y + ascent),
            bottom: ury - (span.y - descent),
        }
    }

    fn baseline(&self) -> f32 {
        self.bottom - (self.bottom - self.top) * (1.0 - ASCENT_RATIO)
    }
}

/// One printed line: spans sharing a baseline, left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x0: f32,
    pub x1: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Spans whose baselines differ by at most this many points share a line.
const BASELINE_TOLERANCE: f32 = 1.5;

/// Glyph width as a fraction of the font size; no glyph metrics are read.
const APPROX_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Part of the font size above the baseline.
const ASCENT_RATIO: f32 = 0.8;

/// Horizontal gap (points) between two spans that becomes a space.
const MIN_WORD_GAP: f32 = 1.0;

/// The identity 2x3 text matrix: [a, b, c, d, tx, ty].
const IDENTITY_MATRIX: [f32; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

// ---------------------------------------------------------------------------
// Text state machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct TextState {
    font_key: Vec<u8>,
    font_size: f32,
    text_matrix: [f32; 6],
    line_matrix: [f32; 6],
    horiz_scale: f32,
    char_spacing: f32,
    word_spacing: f32,
    text_rise: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font_key: Vec::new(),
            font_size: 0.0,
            text_matrix: IDENTITY_MATRIX,
            line_matrix: IDENTITY_MATRIX,
            horiz_scale: 1.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            text_rise: 0.0,
            leading: 0.0,
        }
    }
}

impl TextState {
    fn origin(&self) -> (f32, f32) {
        (self.text_matrix[4], self.text_matrix[5] + self.text_rise)
    }

    /// Rendered size: `font_size * sqrt(b^2 + d^2)`.
    fn effective_font_size(&self) -> f32 {
        let scale = self.text_matrix[1].hypot(self.text_matrix[3]);
        (self.font_size * scale).abs()
    }

    fn glyph_width(&self) -> f32 {
        self.font_size * APPROX_CHAR_WIDTH_RATIO * self.horiz_scale
    }

    fn advance(&mut self, dx: f32) {
        self.text_matrix[4] += dx * self.text_matrix[0];
        self.text_matrix[5] += dx * self.text_matrix[1];
    }

    /// Advance past `text`.
    fn advance_over(&mut self, text: &str) {
        let dx: f32 = text
            .chars()
            .map(|c| {
                let word = if c == ' ' { self.word_spacing } else { 0.0 };
                self.glyph_width() + self.char_spacing + word
            })
            .sum();
        self.advance(dx);
    }

    /// Translate the line matrix by `(tx, ty)` and restart the text matrix
    /// there (Td, TD, T*).
    fn next_line(&mut self, tx: f32, ty: f32) {
        let m = self.line_matrix;
        self.line_matrix[4] = m[0] * tx + m[2] * ty + m[4];
        self.line_matrix[5] = m[1] * tx + m[3] * ty + m[5];
        self.text_matrix = self.line_matrix;
    }

    fn set_matrix(&mut self, op: &ContentOp) {
        let values: Vec<f32> = (0..6).filter_map(|i| op.number(i)).collect();
        if let [a, b, c, d, e, f] = values[..] {
            self.text_matrix = [a, b, c, d, e, f];
            self.line_matrix = self.text_matrix;
        }
    }

    fn set_font(&mut self, op: &ContentOp) {
        let key = match op.operands.first() {
            Some(PdfValue::Name(n)) | Some(PdfValue::Str(n)) => n.clone(),
            _ => return,
        };
        self.font_key = key;
        self.font_size = op.number(1).unwrap_or(0.0);
    }
}

/// Per-page decoding context.
struct SpanSink<'a> {
    backend: &'a dyn PdfBackend,
    fonts: Vec<BackendFontInfo>,
    spans: Vec<TextSpan>,
}

impl SpanSink<'_> {
    fn select_font(&self, state: &TextState) {
        match resolve_font(&state.font_key, &self.fonts) {
            Some(info) => log::trace!(
                "font {} ({}) at {}pt",
                String::from_utf8_lossy(&info.name),
                info.base_font.as_deref().unwrap_or("unknown"),
                state.font_size
            ),
            None => log::trace!(
                "font {} is not in the page resources",
                String::from_utf8_lossy(&state.font_key)
            ),
        }
    }

    fn decode(&self, value: &PdfValue, state: &TextState) -> String {
        match value {
            PdfValue::Str(bytes) => {
                let font = resolve_font(&state.font_key, &self.fonts);
                let decoded = self.backend.decode_text(font, bytes);
                if decoded.is_empty() {
                    super::backend::decode_text_simple(bytes)
                } else {
                    decoded
                }
            }
            _ => String::new(),
        }
    }

    fn push(&mut self, text: &str, x: f32, y: f32, width: f32, state: &TextState) {
        let text = text.trim_end();
        if text.trim().is_empty() {
            return;
        }
        self.spans.push(TextSpan {
            text: text.to_string(),
            x,
            y,
            width,
            font_size: state.effective_font_size(),
        });
    }

    /// `Tj`, `'` and `"`: one string at the current position.
    fn show(&mut self, value: &PdfValue, state: &mut TextState) {
        let text = self.decode(value, state);
        if text.is_empty() {
            return;
        }
        let (x, y) = state.origin();
        state.advance_over(&text);
        // Width in user space, whatever the text matrix scale.
        let width = state.origin().0 - x;
        self.push(&text, x, y, width, state);
    }

    /// `TJ`: strings interleaved with kerning adjustments in thousandths of
    /// a text-space unit. A large enough negative adjustment is read as a
    /// word gap and becomes a space.
    fn show_array(&mut self, items: &[PdfValue], state: &mut TextState) {
        let (x, y) = state.origin();
        let mut text = String::new();

        for item in items {
            if let PdfValue::Str(_) = item {
                let fragment = self.decode(item, state);
                state.advance_over(&fragment);
                text.push_str(&fragment);
            } else if let Some(adjust) = item.as_number() {
                let dx = -adjust / 1000.0 * state.font_size * state.horiz_scale;
                if dx > state.glyph_width() * 0.3 && !text.is_empty() && !text.ends_with(' ') {
                    text.push(' ');
                }
                state.advance(dx);
            }
        }

        let width = state.origin().0 - x;
        self.push(&text, x, y, width, state);
    }
}

/// Walk a page's content stream and collect every shown string with its
/// position.
///
/// | Operator | Action |
/// |----------|--------|
/// | `BT`     | reset text and line matrices |
/// | `Tf`     | font and size |
/// | `Tm`     | set text matrix |
/// | `Td` `TD` `T*` | move to a new line (`TD` also sets leading) |
/// | `TL` `Tc` `Tw` `Tz` `Ts` | leading, spacing, scaling, rise |
/// | `Tj` `TJ` `'` `"` | show text |
pub fn extract_page_spans(
    backend: &dyn PdfBackend,
    page: PageId,
) -> Result<Vec<TextSpan>, PdfError> {
    let raw = backend.page_content(page)?;
    let ops = backend.decode_content(&raw)?;

    let mut state = TextState::default();
    let mut sink = SpanSink {
        backend,
        fonts: backend.page_fonts(page).unwrap_or_default(),
        spans: Vec::new(),
    };

    for op in &ops {
        match op.operator.as_str() {
            "BT" => {
                state.text_matrix = IDENTITY_MATRIX;
                state.line_matrix = IDENTITY_MATRIX;
            }
            "Tf" => {
                state.set_font(op);
                sink.select_font(&state);
            }
            "Tm" => state.set_matrix(op),
            "Td" | "TD" => {
                if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                    if op.operator == "TD" {
                        state.leading = -ty;
                    }
                    state.next_line(tx, ty);
                }
            }
            "T*" => state.next_line(0.0, -state.leading),
            "TL" => state.leading = op.number(0).unwrap_or(state.leading),
            "Tc" => state.char_spacing = op.number(0).unwrap_or(state.char_spacing),
            "Tw" => state.word_spacing = op.number(0).unwrap_or(state.word_spacing),
            "Tz" => state.horiz_scale = op.number(0).map_or(state.horiz_scale, |v| v / 100.0),
            "Ts" => state.text_rise = op.number(0).unwrap_or(state.text_rise),
            "Tj" => {
                if let Some(value) = op.operands.first() {
                    sink.show(value, &mut state);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    sink.show_array(items, &mut state);
                }
            }
            "'" => {
                state.next_line(0.0, -state.leading);
                if let Some(value) = op.operands.first() {
                    sink.show(value, &mut state);
                }
            }
            "\"" => {
                if let (Some(aw), Some(ac), Some(value)) =
                    (op.number(0), op.number(1), op.operands.get(2))
                {
                    state.word_spacing = aw;
                    state.char_spacing = ac;
                    state.next_line(0.0, -state.leading);
                    sink.show(value, &mut state);
                }
            }
            _ => {}
        }
    }

    Ok(sink.spans)
}

/// The page font registered under `key`, if any.
pub fn resolve_font<'a>(key: &[u8], fonts: &'a [BackendFontInfo]) -> Option<&'a BackendFontInfo> {
    fonts.iter().find(|info| info.name == key)
}

// ---------------------------------------------------------------------------
// Line assembly
// ---------------------------------------------------------------------------

/// Spans sharing a baseline, left to right.
///
/// `top` and `bottom` cover every span of the row, so the row has a single
/// vertical centre however its spans are later filtered.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanRow {
    pub spans: Vec<PlacedSpan>,
    pub top: f32,
    pub bottom: f32,
}

impl SpanRow {
    fn new(mut spans: Vec<PlacedSpan>) -> Self {
        spans.sort_by(|a, b| a.x0.total_cmp(&b.x0));
        let top = spans.iter().map(|s| s.top).fold(f32::INFINITY, f32::min);
        let bottom = spans.iter().map(|s| s.bottom).fold(f32::NEG_INFINITY, f32::max);
        SpanRow { spans, top, bottom }
    }

    pub fn centre_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    /// Join the spans accepted by `keep` into a line, with a single space
    /// wherever two spans are separated by a visible gap. `None` when no
    /// span is kept.
    pub fn assemble(&self, keep: impl Fn(&PlacedSpan) -> bool) -> Option<TextLine> {
        let kept: Vec<&PlacedSpan> = self.spans.iter().filter(|s| keep(s)).collect();
        if kept.is_empty() {
            return None;
        }

        let mut text = String::new();
        let mut previous_end: Option<f32> = None;
        for span in &kept {
            if let Some(end) = previous_end {
                if span.x0 - end >= MIN_WORD_GAP && !text.ends_with(' ') {
                    text.push(' ');
                }
            }
            text.push_str(&span.text);
            previous_end = Some(previous_end.map_or(span.x1, |end| end.max(span.x1)));
        }

        Some(TextLine {
            text,
            x0: kept.iter().map(|s| s.x0).fold(f32::INFINITY, f32::min),
            x1: kept.iter().map(|s| s.x1).fold(f32::NEG_INFINITY, f32::max),
            top: kept.iter().map(|s| s.top).fold(f32::INFINITY, f32::min),
            bottom: kept.iter().map(|s| s.bottom).fold(f32::NEG_INFINITY, f32::max),
        })
    }
}

/// Group a page's spans into rows, top of the page first.
///
/// Spans whose baselines are within [`BASELINE_TOLERANCE`] of the first
/// span of a row join that row.
pub fn group_into_rows(mut spans: Vec<PlacedSpan>) -> Vec<SpanRow> {
    spans.sort_by(|a, b| {
        a.baseline()
            .total_cmp(&b.baseline())
            .then(a.x0.total_cmp(&b.x0))
    });

    let mut groups: Vec<Vec<PlacedSpan>> = Vec::new();
    for span in spans {
        match groups.last_mut() {
            Some(group)
                if (span.baseline() - group[0].baseline()).abs() <= BASELINE_TOLERANCE =>
            {
                group.push(span)
            }
            _ => groups.push(vec![span]),
        }
    }

    groups.into_iter().map(SpanRow::new).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    const LANDSCAPE: [f32; 4] = [0.0, 0.0, 792.0, 612.0];

    /// Backend that serves one page of scripted operations.
    struct ScriptedBackend {
        ops: Vec<ContentOp>,
        fonts: Vec<BackendFontInfo>,
    }

    impl PdfBackend for ScriptedBackend {
        fn pages(&self) -> BTreeMap<u32, PageId> {
            BTreeMap::from([(1, (1, 0))])
        }

        fn page_box(&self, _page: PageId) -> Result<[f32; 4], PdfError> {
            Ok(LANDSCAPE)
        }

        fn page_fonts(&self, _page: PageId) -> Result<Vec<BackendFontInfo>, PdfError> {
            Ok(self.fonts.clone())
        }

        fn page_content(&self, _page: PageId) -> Result<Vec<u8>, PdfError> {
            Ok(Vec::new())
        }

        fn decode_content(&self, _data: &[u8]) -> Result<Vec<ContentOp>, PdfError> {
            Ok(self.ops.clone())
        }

        fn decode_text(&self, font: Option<&BackendFontInfo>, bytes: &[u8]) -> String {
            super::super::backend::decode_with_font(font, bytes)
        }
    }

    fn op(operator: &str, operands: Vec<PdfValue>) -> ContentOp {
        ContentOp::new(operator, operands)
    }

    fn num(v: f32) -> PdfValue {
        PdfValue::Real(v)
    }

    fn text(s: &str) -> PdfValue {
        PdfValue::Str(s.as_bytes().to_vec())
    }

    fn font(size: f32) -> ContentOp {
        op("Tf", vec![PdfValue::Name(b"F1".to_vec()), num(size)])
    }

    fn spans_of(ops: Vec<ContentOp>) -> Vec<TextSpan> {
        extract_page_spans(
            &ScriptedBackend {
                ops,
                fonts: Vec::new(),
            },
            (1, 0),
        )
        .unwrap()
    }

    fn lines_of(spans: Vec<PlacedSpan>) -> Vec<TextLine> {
        group_into_rows(spans)
            .iter()
            .filter_map(|row| row.assemble(|_| true))
            .collect()
    }

    fn placed(text: &str, x0: f32, top: f32) -> PlacedSpan {
        PlacedSpan {
            text: text.to_string(),
            x0,
            x1: x0 + text.len() as f32 * 5.0,
            top,
            bottom: top + 10.0,
        }
    }

    // -- extract_page_spans ---------------------------------------------------

    #[test]
    fn tj_span_at_td_position() {
        let spans = spans_of(vec![
            op("BT", vec![]),
            font(10.0),
            op("Td", vec![num(20.0), num(400.0)]),
            op("Tj", vec![text("001")]),
            op("ET", vec![]),
        ]);

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "001");
        assert_eq!(spans[0].x, 20.0);
        assert_eq!(spans[0].y, 400.0);
        assert_eq!(spans[0].font_size, 10.0);
        assert_eq!(spans[0].width, 15.0);
    }

    #[test]
    fn consecutive_tj_advance_horizontally() {
        let spans = spans_of(vec![
            op("BT", vec![]),
            font(10.0),
            op("Td", vec![num(20.0), num(400.0)]),
            op("Tj", vec![text("ab")]),
            op("Tj", vec![text("cd")]),
        ]);

        assert_eq!(spans[1].x, 30.0);
    }

    #[test]
    fn tm_sets_position_and_scale() {
        let spans = spans_of(vec![
            op("BT", vec![]),
            font(1.0),
            op(
                "Tm",
                vec![num(9.0), num(0.0), num(0.0), num(9.0), num(50.0), num(300.0)],
            ),
            op("Tj", vec![text("Example")]),
        ]);

        assert_eq!(spans[0].x, 50.0);
        assert_eq!(spans[0].y, 300.0);
        assert_eq!(spans[0].font_size, 9.0);
    }

    #[test]
    fn width_follows_text_matrix_scale() {
        let spans = spans_of(vec![
            op("BT", vec![]),
            font(1.0),
            op(
                "Tm",
                vec![num(9.0), num(0.0), num(0.0), num(9.0), num(50.0), num(400.0)],
            ),
            op("Tj", vec![text("12")]),
            op("Tj", vec![text("0")]),
        ]);

        assert_eq!(spans[0].width, 9.0);
        assert_eq!(spans[1].x, 59.0);

        let placed = spans.iter().map(|s| PlacedSpan::place(s, LANDSCAPE)).collect();
        let lines = lines_of(placed);
        assert_eq!(lines[0].text, "120");
    }

    #[test]
    fn strings_decode_with_the_selected_font() {
        let identity = BackendFontInfo {
            name: b"F2".to_vec(),
            base_font: Some("Arial".to_string()),
            encoding: Some("Identity-H".to_string()),
        };
        let ops = vec![
            op("BT", vec![]),
            font(10.0),
            op("Tj", vec![PdfValue::Str(b"4YR".to_vec())]),
            op("Tf", vec![PdfValue::Name(b"F2".to_vec()), num(10.0)]),
            op("Td", vec![num(0.0), num(-20.0)]),
            op("Tj", vec![PdfValue::Str(vec![0x00, 0x32, 0x00, 0x59, 0x00, 0x52])]),
        ];

        let spans = extract_page_spans(
            &ScriptedBackend {
                ops,
                fonts: vec![identity],
            },
            (1, 0),
        )
        .unwrap();

        assert_eq!(spans[0].text, "4YR");
        assert_eq!(spans[1].text, "2YR");
    }

    #[test]
    fn t_star_moves_down_by_leading() {
        let spans = spans_of(vec![
            op("BT", vec![]),
            font(10.0),
            op("TL", vec![num(12.0)]),
            op("Td", vec![num(20.0), num(400.0)]),
            op("Tj", vec![text("first")]),
            op("T*", vec![]),
            op("Tj", vec![text("second")]),
        ]);

        assert_eq!(spans[1].x, 20.0);
        assert_eq!(spans[1].y, 388.0);
    }

    #[test]
    fn td_uppercase_sets_leading() {
        let spans = spans_of(vec![
            op("BT", vec![]),
            font(10.0),
            op("Td", vec![num(0.0), num(500.0)]),
            op("TD", vec![num(0.0), num(-14.0)]),
            op("Tj", vec![text("a")]),
            op("'", vec![text("b")]),
        ]);

        assert_eq!(spans[0].y, 486.0);
        assert_eq!(spans[1].y, 472.0);
    }

    #[test]
    fn tj_array_inserts_space_on_wide_kerning() {
        let spans = spans_of(vec![
            op("BT", vec![]),
            font(10.0),
            op("Td", vec![num(20.0), num(400.0)]),
            op(
                "TJ",
                vec![PdfValue::Array(vec![
                    text("120"),
                    PdfValue::Integer(-2000),
                    text("5"),
                    PdfValue::Integer(-20),
                    text("0"),
                ])],
            ),
        ]);

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "120 50");
    }

    #[test]
    fn blank_strings_produce_no_span() {
        let spans = spans_of(vec![
            op("BT", vec![]),
            font(10.0),
            op("Tj", vec![text("   ")]),
            op("Tj", vec![text("")]),
        ]);
        assert!(spans.is_empty());
    }

    #[test]
    fn bt_resets_position() {
        let spans = spans_of(vec![
            op("BT", vec![]),
            font(10.0),
            op("Td", vec![num(100.0), num(100.0)]),
            op("ET", vec![]),
            op("BT", vec![]),
            op("Tj", vec![text("x")]),
        ]);
        assert_eq!((spans[0].x, spans[0].y), (0.0, 0.0));
    }

    // -- placement ----------------------------------------------------------

    #[test]
    fn place_flips_y_axis() {
        let span = TextSpan {
            text: "001".to_string(),
            x: 20.0,
            y: 400.0,
            width: 15.0,
            font_size: 10.0,
        };

        let placed = PlacedSpan::place(&span, LANDSCAPE);

        assert_eq!(placed.x0, 20.0);
        assert_eq!(placed.x1, 35.0);
        assert_eq!(placed.top, 204.0);
        assert_eq!(placed.bottom, 214.0);
    }

    #[test]
    fn place_honours_media_box_origin() {
        let span = TextSpan {
            text: "x".to_string(),
            x: 30.0,
            y: 100.0,
            width: 5.0,
            font_size: 10.0,
        };

        let placed = PlacedSpan::place(&span, [10.0, 50.0, 802.0, 662.0]);

        assert_eq!(placed.x0, 20.0);
        assert_eq!(placed.top, 554.0);
    }

    // -- group_into_rows --------------------------------------------------------

    #[test]
    fn spans_on_same_baseline_form_one_line() {
        let lines = lines_of(vec![
            placed("120", 300.0, 100.0),
            placed("001", 20.0, 100.0),
            placed("Example", 50.0, 100.5),
        ]);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "001 Example 120");
        assert_eq!(lines[0].x0, 20.0);
        assert_eq!(lines[0].x1, 315.0);
    }

    #[test]
    fn lines_are_ordered_top_to_bottom() {
        let lines = lines_of(vec![
            placed("second", 20.0, 120.0),
            placed("first", 20.0, 100.0),
        ]);

        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(lines[0].top, 100.0);
        assert_eq!(lines[0].bottom, 110.0);
    }

    #[test]
    fn touching_spans_are_concatenated() {
        let lines = lines_of(vec![placed("--Enr", 20.0, 100.0), placed("olled", 45.0, 100.0)]);
        assert_eq!(lines[0].text, "--Enrolled");
    }

    #[test]
    fn no_spans_no_lines() {
        assert!(group_into_rows(Vec::new()).is_empty());
    }

    #[test]
    fn row_spans_every_font_size() {
        let mut small = placed("Example", 40.0, 101.6);
        small.bottom = 109.6;
        let rows = group_into_rows(vec![small, placed("001", 20.0, 100.0)]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].top, 100.0);
        assert_eq!(rows[0].bottom, 110.0);
        assert_eq!(rows[0].centre_y(), 105.0);
    }

    #[test]
    fn assemble_keeps_only_accepted_spans() {
        let rows = group_into_rows(vec![placed("m", 0.0, 100.0), placed("body", 100.0, 100.0)]);

        let line = rows[0].assemble(|s| s.x0 >= 13.0).unwrap();
        assert_eq!(line.text, "body");
        assert_eq!(line.x0, 100.0);
        assert!(rows[0].assemble(|_| false).is_none());
    }

    #[test]
    fn resolve_font_by_key() {
        let fonts = vec![BackendFontInfo {
            name: b"F1".to_vec(),
            base_font: Some("Helvetica".to_string()),
            encoding: None,
        }];
        assert!(resolve_font(b"F1", &fonts).is_some());
        assert!(resolve_font(b"F2", &fonts).is_none());
    }
}
