//! Benchmarks for loading, sorting and splitting.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat};

use lessonpack::{AssignmentStore, Bucket, DocumentLoader, DocumentSplitter};

/// Creates a synthetic PDF with the given number of pages.
fn create_test_pdf(page_count: u32) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for i in 1..=page_count {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(12)]),
                Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        format!("Page {} - worksheet benchmark content", i).into_bytes(),
                        StringFormat::Literal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            content.encode().unwrap_or_default(),
        ));
        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(
                    [0, 0, 612, 792].into_iter().map(Object::Integer).collect(),
                ),
            ),
            ("Contents", Object::Reference(content_id)),
        ]);
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(page_count as i64)),
        ("Kids", Object::Array(kids)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("serialize benchmark PDF");
    buffer
}

/// Benchmark loading at various sizes.
fn bench_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for page_count in [1, 10, 100] {
        let data = create_test_pdf(page_count);
        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| DocumentLoader::new().load_bytes(black_box(data.as_slice())).unwrap());
        });
    }

    group.finish();
}

/// Benchmark splitting half of a document.
fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split");
    let splitter = DocumentSplitter::new();

    for page_count in [10, 100] {
        let source = DocumentLoader::new()
            .load_bytes(create_test_pdf(page_count))
            .unwrap();
        let odd: Vec<u32> = (1..=page_count).step_by(2).collect();

        group.bench_function(format!("odd_of_{}", page_count), |b| {
            b.iter(|| splitter.split(&source, black_box(&odd)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark batch moves in the assignment store.
fn bench_batch_moves(c: &mut Criterion) {
    let pages: Vec<u32> = (1..=500).collect();

    c.bench_function("move_500_pages", |b| {
        b.iter(|| {
            let mut store = AssignmentStore::new(500);
            store
                .move_pages(black_box(&pages[..250]), Bucket::Teaching)
                .unwrap();
            store
                .move_pages(black_box(&pages[250..]), Bucket::Exercise)
                .unwrap();
            store.is_ready()
        });
    });
}

criterion_group!(benches, bench_loading, bench_split, bench_batch_moves);
criterion_main!(benches);
