//! Synthetic PDFs for integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use lessonpack::{DocumentLoader, SourceDocument};

/// Content stream bytes that page `n` of a fixture carries.
pub fn page_text(n: u32) -> Vec<u8> {
    Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(12)]),
            Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
            Operation::new(
                "Tj",
                vec![Object::String(
                    format!("Page {}", n).into_bytes(),
                    StringFormat::Literal,
                )],
            ),
            Operation::new("ET", vec![]),
        ],
    }
    .encode()
    .unwrap()
}

fn media_box(width: i64, height: i64) -> Object {
    Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(width),
        Object::Integer(height),
    ])
}

fn add_page(doc: &mut Document, parent: ObjectId, n: u32, own_box: bool) -> ObjectId {
    let content_id = doc.add_object(Stream::new(Dictionary::new(), page_text(n)));
    let mut page = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(parent)),
        ("Contents", Object::Reference(content_id)),
    ]);
    if own_box {
        page.set("MediaBox", media_box(612, 792));
    }
    doc.add_object(page)
}

fn finish(mut doc: Document, pages_id: ObjectId, pages: Dictionary) -> Vec<u8> {
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// A Letter-sized PDF with `num_pages` pages; page `n` draws "Page n".
pub fn pdf_bytes(num_pages: u32) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (1..=num_pages)
        .map(|n| Object::Reference(add_page(&mut doc, pages_id, n, true)))
        .collect();

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        ("Kids", Object::Array(kids)),
    ]);
    finish(doc, pages_id, pages)
}

/// A PDF whose pages inherit an A4 landscape-rotated MediaBox from the page tree.
pub fn pdf_bytes_inherited(num_pages: u32) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (1..=num_pages)
        .map(|n| Object::Reference(add_page(&mut doc, pages_id, n, false)))
        .collect();

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        ("Kids", Object::Array(kids)),
        ("MediaBox", media_box(595, 842)),
        ("Rotate", Object::Integer(90)),
    ]);
    finish(doc, pages_id, pages)
}

/// A PDF whose pages all inherit a `width` x `height` MediaBox.
pub fn pdf_bytes_with_box(num_pages: u32, width: i64, height: i64) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (1..=num_pages)
        .map(|n| Object::Reference(add_page(&mut doc, pages_id, n, false)))
        .collect();

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        ("Kids", Object::Array(kids)),
        ("MediaBox", media_box(width, height)),
    ]);
    finish(doc, pages_id, pages)
}

/// Load a fixture with `num_pages` pages.
pub fn source(num_pages: u32) -> SourceDocument {
    DocumentLoader::new().load_bytes(pdf_bytes(num_pages)).unwrap()
}

/// Load PDF bytes produced by the splitter.
pub fn reload(bytes: &[u8]) -> SourceDocument {
    DocumentLoader::new().load_bytes(bytes).unwrap()
}
