use std::collections::BTreeMap;

use lopdf::{self, content::Content};

use crate::PdfError;

/// Parents followed when looking for an inherited MediaBox.
const MAX_PAGE_TREE_DEPTH: usize = 64;

/// A page identifier mirroring `lopdf::ObjectId`: (object number, generation number).
pub type PageId = (u32, u16);

/// The font entries of a page's resource dictionary that text decoding needs.
#[derive(Debug, Clone)]
pub struct BackendFontInfo {
    /// Resource key used by `Tf` (e.g. `b"F1"`).
    pub name: Vec<u8>,
    pub base_font: Option<String>,
    pub encoding: Option<String>,
}

/// Operand values of a content-stream operation, detached from `lopdf`.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Dict(Vec<(Vec<u8>, PdfValue)>),
    Reference(PageId),
}

impl PdfValue {
    /// Numeric value of an `Integer` or `Real`.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            PdfValue::Integer(i) => Some(*i as f32),
            PdfValue::Real(f) => Some(*f),
            _ => None,
        }
    }
}

/// A single content-stream operation (operator + operands).
#[derive(Debug, Clone)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    pub fn new(operator: &str, operands: Vec<PdfValue>) -> Self {
        ContentOp {
            operator: operator.to_string(),
            operands,
        }
    }

    /// The `index`-th operand as a number.
    pub fn number(&self, index: usize) -> Option<f32> {
        self.operands.get(index).and_then(PdfValue::as_number)
    }
}

/// Convert a `lopdf::Object` into a [`PdfValue`].
///
/// Streams keep their dictionary only; content bytes go through
/// [`PdfBackend::page_content`].
pub fn convert_object(obj: &lopdf::Object) -> PdfValue {
    let convert_dict = |dict: &lopdf::Dictionary| {
        PdfValue::Dict(
            dict.iter()
                .map(|(k, v)| (k.clone(), convert_object(v)))
                .collect(),
        )
    };

    match obj {
        lopdf::Object::Null => PdfValue::Null,
        lopdf::Object::Boolean(b) => PdfValue::Bool(*b),
        lopdf::Object::Integer(i) => PdfValue::Integer(*i),
        lopdf::Object::Real(f) => PdfValue::Real(*f),
        lopdf::Object::Name(n) => PdfValue::Name(n.clone()),
        lopdf::Object::String(s, _) => PdfValue::Str(s.clone()),
        lopdf::Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        lopdf::Object::Dictionary(dict) => convert_dict(dict),
        lopdf::Object::Stream(stream) => convert_dict(&stream.dict),
        lopdf::Object::Reference(id) => PdfValue::Reference(*id),
    }
}

/// Decode PDF string bytes without font information.
///
/// UTF-16BE with a byte-order mark first, then UTF-8, then Latin-1 as the
/// last resort (every byte maps to a code point, so it never fails).
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(payload) = bytes.strip_prefix(b"\xFE\xFF") {
        return decode_utf16be(payload);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Decode string bytes shown with `font`.
///
/// Identity-H/V fonts carry 2-byte codes that are usually Unicode; anything
/// else, or a missing font, goes through [`decode_text_simple`].
pub fn decode_with_font(font: Option<&BackendFontInfo>, bytes: &[u8]) -> String {
    let identity = font
        .and_then(|f| f.encoding.as_deref())
        .is_some_and(|enc| enc.contains("Identity"));

    if identity && bytes.len() >= 2 && bytes.len() % 2 == 0 {
        let decoded = decode_utf16be(bytes);
        if !decoded.chars().all(|c| c == '\u{FFFD}' || c == '\0') {
            return decoded;
        }
    }

    decode_text_simple(bytes)
}

/// Decode big-endian UTF-16 code units; a trailing odd byte is dropped.
fn decode_utf16be(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

/// Abstraction over the PDF parser.
///
/// The layout pipeline only talks to this trait so it can be exercised with
/// a scripted backend in tests.
pub trait PdfBackend {
    /// Mapping from 1-based page number to [`PageId`].
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// The page's MediaBox as `[llx, lly, urx, ury]`.
    fn page_box(&self, page: PageId) -> Result<[f32; 4], PdfError>;

    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>, PdfError>;

    /// Raw (decompressed) content stream bytes of a page.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>, PdfError>;

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>, PdfError>;

    /// Decode the bytes of a text-showing operand. `font` is the page
    /// resource selected by the last `Tf`, when there is one.
    fn decode_text(&self, font: Option<&BackendFontInfo>, bytes: &[u8]) -> String;
}

/// [`PdfBackend`] backed by [`lopdf::Document`].
pub struct LopdfBackend {
    doc: lopdf::Document,
}

impl LopdfBackend {
    pub fn load_bytes(data: &[u8]) -> Result<Self, PdfError> {
        let doc = lopdf::Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            return Err(PdfError::Encrypted);
        }

        Ok(Self { doc })
    }

    /// Find the MediaBox on the page or, since it is inheritable, on one of
    /// its ancestors in the page tree. Gives up after
    /// [`MAX_PAGE_TREE_DEPTH`] parents, which also stops on cyclic trees.
    fn inherited_media_box(
        &self,
        dict: &lopdf::Dictionary,
        depth: usize,
    ) -> Option<Vec<lopdf::Object>> {
        let own = dict.get(b"MediaBox").ok().and_then(|obj| match obj {
            lopdf::Object::Array(arr) => Some(arr.clone()),
            lopdf::Object::Reference(id) => self
                .doc
                .get_object(*id)
                .and_then(|o| o.as_array())
                .ok()
                .cloned(),
            _ => None,
        });
        if own.is_some() {
            return own;
        }

        if depth >= MAX_PAGE_TREE_DEPTH {
            log::warn!("page tree deeper than {} levels, no MediaBox", MAX_PAGE_TREE_DEPTH);
            return None;
        }
        let parent_id = dict.get(b"Parent").and_then(|p| p.as_reference()).ok()?;
        let parent = self.doc.get_object(parent_id).and_then(|o| o.as_dict()).ok()?;
        self.inherited_media_box(parent, depth + 1)
    }

    fn resolve_number(&self, obj: &lopdf::Object) -> Result<f32, PdfError> {
        let resolved = match obj {
            lopdf::Object::Reference(id) => self
                .doc
                .get_object(*id)
                .map_err(|e| PdfError::Parse(e.to_string()))?,
            other => other,
        };
        match resolved {
            lopdf::Object::Integer(i) => Ok(*i as f32),
            lopdf::Object::Real(f) => Ok(*f),
            other => Err(PdfError::Parse(format!(
                "expected number in MediaBox, got {:?}",
                other
            ))),
        }
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_box(&self, page: PageId) -> Result<[f32; 4], PdfError> {
        let page_dict = self
            .doc
            .get_object(page)
            .and_then(|o| o.as_dict())
            .map_err(|e| PdfError::Parse(format!("cannot read page dictionary: {}", e)))?;

        let media_box = self
            .inherited_media_box(page_dict, 0)
            .ok_or_else(|| PdfError::Parse("MediaBox not found for page".into()))?;

        if media_box.len() < 4 {
            return Err(PdfError::Parse(format!(
                "MediaBox has {} elements, expected 4",
                media_box.len()
            )));
        }

        Ok([
            self.resolve_number(&media_box[0])?,
            self.resolve_number(&media_box[1])?,
            self.resolve_number(&media_box[2])?,
            self.resolve_number(&media_box[3])?,
        ])
    }

    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>, PdfError> {
        let fonts = self
            .doc
            .get_page_fonts(page)
            .map_err(|e| PdfError::Parse(format!("cannot get page fonts: {}", e)))?;

        fn name_of(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
            dict.get(key)
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).into_owned())
        }

        Ok(fonts
            .iter()
            .map(|(name, dict)| BackendFontInfo {
                name: name.clone(),
                base_font: name_of(dict, b"BaseFont"),
                encoding: name_of(dict, b"Encoding"),
            })
            .collect())
    }

    fn page_content(&self, page: PageId) -> Result<Vec<u8>, PdfError> {
        self.doc
            .get_page_content(page)
            .map_err(|e| PdfError::Parse(format!("cannot get page content: {}", e)))
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>, PdfError> {
        let content = Content::decode(data)
            .map_err(|e| PdfError::Parse(format!("content stream decode error: {}", e)))?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operands: op.operands.iter().map(convert_object).collect(),
                operator: op.operator,
            })
            .collect())
    }

    fn decode_text(&self, font: Option<&BackendFontInfo>, bytes: &[u8]) -> String {
        decode_with_font(font, bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_text_simple_utf8() {
        assert_eq!(decode_text_simple("Lincoln High".as_bytes()), "Lincoln High");
    }

    #[test]
    fn decode_text_simple_latin1() {
        // 0xE9 is U+00E9 in Latin-1 but not valid standalone UTF-8.
        let input: &[u8] = &[0x4A, 0x6F, 0x73, 0xE9];
        assert_eq!(decode_text_simple(input), "Jos\u{00E9}");
    }

    #[test]
    fn decode_text_simple_utf16be() {
        let input: &[u8] = &[0xFE, 0xFF, 0x00, 0x32, 0x00, 0x59, 0x00, 0x52];
        assert_eq!(decode_text_simple(input), "2YR");
    }

    #[test]
    fn decode_text_simple_utf16be_odd_trailing_byte() {
        let input: &[u8] = &[0xFE, 0xFF, 0x00, 0x41, 0x00];
        assert_eq!(decode_text_simple(input), "A");
    }

    #[test]
    fn decode_text_simple_empty() {
        assert_eq!(decode_text_simple(&[]), "");
    }

    #[test]
    fn value_as_number() {
        assert_eq!(PdfValue::Integer(42).as_number(), Some(42.0));
        assert_eq!(PdfValue::Real(2.5).as_number(), Some(2.5));
        assert_eq!(PdfValue::Name(b"F1".to_vec()).as_number(), None);
        assert_eq!(PdfValue::Null.as_number(), None);
    }

    #[test]
    fn content_op_number() {
        let op = ContentOp::new(
            "Td",
            vec![PdfValue::Integer(10), PdfValue::Name(b"x".to_vec())],
        );
        assert_eq!(op.number(0), Some(10.0));
        assert_eq!(op.number(1), None);
        assert_eq!(op.number(2), None);
    }

    #[test]
    fn convert_scalars() {
        assert_eq!(convert_object(&lopdf::Object::Null), PdfValue::Null);
        assert_eq!(
            convert_object(&lopdf::Object::Integer(99)),
            PdfValue::Integer(99)
        );
        assert_eq!(
            convert_object(&lopdf::Object::String(
                b"001".to_vec(),
                lopdf::StringFormat::Literal,
            )),
            PdfValue::Str(b"001".to_vec())
        );
        assert_eq!(
            convert_object(&lopdf::Object::Reference((7, 0))),
            PdfValue::Reference((7, 0))
        );
    }

    #[test]
    fn convert_tj_array() {
        let arr = lopdf::Object::Array(vec![
            lopdf::Object::String(b"12".to_vec(), lopdf::StringFormat::Literal),
            lopdf::Object::Integer(-250),
            lopdf::Object::String(b"5".to_vec(), lopdf::StringFormat::Literal),
        ]);
        assert_eq!(
            convert_object(&arr),
            PdfValue::Array(vec![
                PdfValue::Str(b"12".to_vec()),
                PdfValue::Integer(-250),
                PdfValue::Str(b"5".to_vec()),
            ])
        );
    }

    #[test]
    fn convert_stream_uses_dict() {
        let mut dict = lopdf::Dictionary::new();
        dict.set("Length", lopdf::Object::Integer(0));
        let obj = lopdf::Object::Stream(lopdf::Stream::new(dict, vec![]));

        match convert_object(&obj) {
            PdfValue::Dict(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].0, b"Length");
            }
            other => panic!("expected Dict for stream, got {:?}", other),
        }
    }

    fn identity_font() -> BackendFontInfo {
        BackendFontInfo {
            name: b"F1".to_vec(),
            base_font: Some("Arial".to_string()),
            encoding: Some("Identity-H".to_string()),
        }
    }

    #[test]
    fn identity_font_decodes_two_byte_codes() {
        let backend = LopdfBackend {
            doc: lopdf::Document::new(),
        };
        let bytes: &[u8] = &[0x00, 0x32, 0x00, 0x59, 0x00, 0x52];

        assert_eq!(backend.decode_text(Some(&identity_font()), bytes), "2YR");
    }

    #[test]
    fn simple_font_or_no_font_decodes_bytes() {
        let backend = LopdfBackend {
            doc: lopdf::Document::new(),
        };
        let winansi = BackendFontInfo {
            encoding: Some("WinAnsiEncoding".to_string()),
            ..identity_font()
        };

        assert_eq!(backend.decode_text(Some(&winansi), b"4YR"), "4YR");
        assert_eq!(backend.decode_text(None, b"4YR"), "4YR");
    }

    #[test]
    fn identity_font_with_odd_length_falls_back() {
        assert_eq!(decode_with_font(Some(&identity_font()), b"001"), "001");
    }

    #[test]
    fn cyclic_page_tree_has_no_media_box() {
        use lopdf::{dictionary, Object};

        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => Object::Integer(1),
                "Parent" => pages_id,
            }),
        );
        let backend = LopdfBackend { doc };

        assert!(matches!(
            backend.page_box(page_id),
            Err(PdfError::Parse(msg)) if msg.contains("MediaBox")
        ));
    }

    #[test]
    fn load_bytes_rejects_garbage() {
        assert!(matches!(
            LopdfBackend::load_bytes(b"not a pdf"),
            Err(PdfError::Parse(_))
        ));
    }
}
