//! Integration tests for the document splitter.

mod common;

use lessonpack::{Bucket, DocumentSplitter, Error, PageList, SplitOptions};

#[test]
fn test_split_keeps_ascending_order() {
    let source = common::source(10);
    let derived = DocumentSplitter::new().split(&source, &[5, 2, 8]).unwrap();

    assert_eq!(derived.pages, vec![2, 5, 8]);
    assert_eq!(derived.page_count(), 3);
    assert_eq!(derived.source_page(1), Some(2));
    assert_eq!(derived.source_page(3), Some(8));
    assert_eq!(derived.source_page(4), None);

    let reloaded = common::reload(&derived.bytes);
    assert_eq!(reloaded.page_count(), 3);
    for (output, original) in [(1, 2), (2, 5), (3, 8)] {
        assert_eq!(
            reloaded.page_content(output).unwrap(),
            common::page_text(original),
            "output page {} should carry source page {}",
            output,
            original
        );
    }
}

#[test]
fn test_split_round_trip_matches_source_content() {
    let source = common::source(10);
    let derived = DocumentSplitter::new().split(&source, &[2, 5, 8]).unwrap();
    let reloaded = common::reload(&derived.bytes);

    assert_eq!(
        reloaded.page_content(1).unwrap(),
        source.page_content(2).unwrap()
    );
    assert_eq!(
        reloaded.page_geometry(1).unwrap(),
        source.page_geometry(2).unwrap()
    );
}

#[test]
fn test_split_duplicates_collapse() {
    let source = common::source(4);
    let derived = DocumentSplitter::new().split(&source, &[3, 3, 1, 3]).unwrap();
    assert_eq!(derived.pages, vec![1, 3]);
    assert_eq!(common::reload(&derived.bytes).page_count(), 2);
}

#[test]
fn test_split_out_of_range() {
    let source = common::source(5);
    let splitter = DocumentSplitter::new();

    assert!(matches!(
        splitter.split(&source, &[1, 6]),
        Err(Error::PageRange {
            page: 6,
            page_count: 5
        })
    ));
    assert!(matches!(
        splitter.split(&source, &[0]),
        Err(Error::PageRange { page: 0, .. })
    ));
}

#[test]
fn test_split_empty_list() {
    let source = common::source(3);
    assert!(matches!(
        DocumentSplitter::new().split(&source, &[]),
        Err(Error::EmptySplit)
    ));
}

#[test]
fn test_split_leaves_source_untouched() {
    let source = common::source(6);
    let before = source.bytes().to_vec();

    DocumentSplitter::new().split(&source, &[1, 2]).unwrap();
    DocumentSplitter::new().split(&source, &[3, 4, 5, 6]).unwrap();

    assert_eq!(source.bytes(), before.as_slice());
    assert_eq!(source.page_count(), 6);
    assert_eq!(source.page_content(6).unwrap(), common::page_text(6));
}

#[test]
fn test_split_all_pages() {
    let source = common::source(3);
    let derived = DocumentSplitter::new().split(&source, &[1, 2, 3]).unwrap();
    let reloaded = common::reload(&derived.bytes);
    assert_eq!(reloaded.page_count(), 3);
    assert_eq!(reloaded.page_content(3).unwrap(), common::page_text(3));
}

#[test]
fn test_split_inherited_geometry_survives() {
    let source = lessonpack::load_bytes(&common::pdf_bytes_inherited(4)).unwrap();
    let derived = DocumentSplitter::new().split(&source, &[4]).unwrap();
    let reloaded = common::reload(&derived.bytes);

    let geometry = reloaded.page_geometry(1).unwrap();
    assert_eq!(geometry.width, 595.0);
    assert_eq!(geometry.height, 842.0);
    assert_eq!(geometry.rotation, 90);
}

#[test]
fn test_split_with_compression() {
    let source = common::source(4);
    let splitter = DocumentSplitter::with_options(SplitOptions::new().with_compress(true));
    let derived = splitter.split(&source, &[2, 3]).unwrap();

    let reloaded = common::reload(&derived.bytes);
    assert_eq!(reloaded.page_count(), 2);
    assert_eq!(reloaded.page_content(1).unwrap(), common::page_text(2));
}

#[test]
fn test_split_bucket_tags_output() {
    let source = common::source(4);
    let derived = DocumentSplitter::new()
        .split_bucket(&source, Bucket::Teaching, &[1])
        .unwrap();
    assert_eq!(derived.bucket, Some(Bucket::Teaching));
    assert_eq!(derived.mime_type(), "application/pdf");
}

#[test]
fn test_split_from_page_list() {
    let source = common::source(10);
    let pages = PageList::parse("1,3,5-7").unwrap();
    let derived = DocumentSplitter::new()
        .split(&source, pages.as_slice())
        .unwrap();
    assert_eq!(derived.pages, vec![1, 3, 5, 6, 7]);
}
