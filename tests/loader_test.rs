//! Integration tests for the document loader and thumbnails.

mod common;

use std::io::Cursor;

use lessonpack::{
    render_thumbnails, DocumentLoader, Error, LessonPack, LoadOptions, PlaceholderRenderer,
    Result, SourceDocument, Thumbnail, ThumbnailRenderer,
};

/// Renderer that fails on one page.
struct FailingRenderer {
    bad_page: u32,
}

impl ThumbnailRenderer for FailingRenderer {
    fn render(&self, doc: &SourceDocument, page: u32, scale: f32) -> Result<Thumbnail> {
        if page == self.bad_page {
            return Err(Error::Other(format!("cannot rasterize page {}", page)));
        }
        PlaceholderRenderer::default().render(doc, page, scale)
    }
}

#[test]
fn test_load_counts_pages() {
    let doc = common::source(6);
    assert_eq!(doc.page_count(), 6);
    assert_eq!(doc.version(), "1.7");
    assert!(doc.contains(1));
    assert!(doc.contains(6));
    assert!(!doc.contains(0));
    assert!(!doc.contains(7));
    assert!(doc.name().is_none());
}

#[test]
fn test_load_from_reader_and_file() {
    let bytes = common::pdf_bytes(2);
    let doc = DocumentLoader::new().load_reader(Cursor::new(bytes.clone())).unwrap();
    assert_eq!(doc.page_count(), 2);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("worksheet.pdf");
    std::fs::write(&path, &bytes).unwrap();
    let doc = lessonpack::load_file(&path).unwrap();
    assert_eq!(doc.name(), Some("worksheet.pdf"));
    assert_eq!(doc.bytes(), bytes.as_slice());
}

#[test]
fn test_load_rejects_non_pdf_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "just some notes").unwrap();
    assert!(matches!(
        lessonpack::load_file(&path),
        Err(Error::UnknownFormat)
    ));
}

#[test]
fn test_page_geometry_and_content() {
    let doc = common::source(3);
    let geometry = doc.page_geometry(2).unwrap();
    assert_eq!(geometry.width, 612.0);
    assert_eq!(geometry.height, 792.0);
    assert_eq!(geometry.rotation, 0);
    assert!(!geometry.is_landscape());

    assert_eq!(doc.page_content(3).unwrap(), common::page_text(3));
    assert!(matches!(
        doc.page_geometry(4),
        Err(Error::InvalidPageIndex {
            page: 4,
            page_count: 3
        })
    ));
}

#[test]
fn test_inherited_media_box_and_rotation() {
    let doc = lessonpack::load_bytes(&common::pdf_bytes_inherited(2)).unwrap();
    let geometry = doc.page_geometry(1).unwrap();
    assert_eq!(geometry.width, 595.0);
    assert_eq!(geometry.height, 842.0);
    assert_eq!(geometry.rotation, 90);
    assert!(geometry.is_landscape());
}

#[test]
fn test_surfaces_are_lazy_and_ordered() {
    let doc = common::source(4);
    let surfaces = doc.surfaces();
    assert_eq!(surfaces.len(), 4);

    let indices: Vec<u32> = surfaces.map(|s| s.index()).collect();
    assert_eq!(indices, vec![1, 2, 3, 4]);

    let third = doc.surfaces().nth(2).unwrap();
    let thumb = third.render(&PlaceholderRenderer::default(), 0.5).unwrap();
    assert_eq!(thumb.page, 3);
    assert_eq!((thumb.width, thumb.height), (306, 396));
}

#[test]
fn test_thumbnails_default_scale() {
    let doc = common::source(5);
    let thumbs =
        render_thumbnails(&doc, &PlaceholderRenderer::default(), &LoadOptions::default()).unwrap();

    assert_eq!(thumbs.len(), 5);
    let pages: Vec<u32> = thumbs.iter().map(|t| t.page).collect();
    assert_eq!(pages, vec![1, 2, 3, 4, 5]);
    assert!(thumbs.iter().all(|t| t.width == 122 && t.height == 158));
    assert_eq!(thumbs[0].size(), 122 * 158);
}

#[test]
fn test_thumbnails_rotated_pages_swap_dimensions() {
    let doc = lessonpack::load_bytes(&common::pdf_bytes_inherited(1)).unwrap();
    let options = LoadOptions::new().with_thumbnail_scale(1.0).sequential();
    let thumbs = render_thumbnails(&doc, &PlaceholderRenderer::default(), &options).unwrap();
    assert_eq!((thumbs[0].width, thumbs[0].height), (842, 595));
}

#[test]
fn test_thumbnails_strict_fails() {
    let doc = common::source(3);
    let result = render_thumbnails(&doc, &FailingRenderer { bad_page: 2 }, &LoadOptions::new());
    assert!(matches!(result, Err(Error::Other(_))));
}

#[test]
fn test_thumbnails_lenient_skips_failed_page() {
    let doc = common::source(3);
    let options = LoadOptions::new().lenient();
    let thumbs = render_thumbnails(&doc, &FailingRenderer { bad_page: 2 }, &options).unwrap();
    let pages: Vec<u32> = thumbs.iter().map(|t| t.page).collect();
    assert_eq!(pages, vec![1, 3]);
}

#[test]
fn test_thumbnail_of_oversized_page_is_an_error() {
    let doc = lessonpack::load_bytes(&common::pdf_bytes_with_box(1, 1_000_000, 1_000_000)).unwrap();
    let result = PlaceholderRenderer::default().render(&doc, 1, 0.2);
    assert!(matches!(result, Err(Error::Other(_))));

    let strict = render_thumbnails(&doc, &PlaceholderRenderer::default(), &LoadOptions::new());
    assert!(strict.is_err());

    let lenient = render_thumbnails(
        &doc,
        &PlaceholderRenderer::default(),
        &LoadOptions::new().lenient(),
    )
    .unwrap();
    assert!(lenient.is_empty());
}

#[test]
fn test_builder_thumbnails() {
    let builder = LessonPack::new().sequential().with_thumbnail_scale(0.1);
    let session = builder.open_bytes(common::pdf_bytes(2)).unwrap();
    let thumbs = builder
        .thumbnails(session.source(), &PlaceholderRenderer { background: 0 })
        .unwrap();
    assert_eq!(thumbs.len(), 2);
    assert!(thumbs[1].pixels.iter().all(|&p| p == 0));
}
