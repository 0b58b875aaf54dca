//! End-to-end PDF extraction tests against documents built with lopdf.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use resume_tailor::error::ErrorClass;
use resume_tailor::parser::{LoaderChain, ParseOptions};
use resume_tailor::{extract_bytes, Error, PdfExtractor, Role};

/// Build a PDF with one page per entry, each run placed at an absolute
/// `(x, y)`. A page with no runs gets no content stream at all.
fn build_pdf<S: AsRef<str>>(pages: &[Vec<(i64, i64, S)>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for runs in pages {
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
        };

        if !runs.is_empty() {
            let mut operations = Vec::new();
            for (x, y, text) in runs {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec!["F1".into(), 11.into()]));
                operations.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(text.as_ref())],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            page.set("Contents", content_id);
        }

        kids.push(doc.add_object(page).into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn resume_page() -> Vec<(i64, i64, &'static str)> {
    vec![
        (72, 720, "JANE DOE"),
        (72, 700, "jane@example.com"),
        (72, 660, "EXPERIENCE"),
        // Same visual line, split into two runs with a slight baseline shift
        (260, 642, "| Acme | 2021"),
        (72, 640, "Engineer"),
        (90, 620, "- Shipped the billing rewrite"),
    ]
}

fn numbered_pages(count: u32) -> Vec<Vec<(i64, i64, String)>> {
    (1..=count)
        .map(|n| vec![(72, 700, format!("Page {:02} summary line", n))])
        .collect()
}

#[test]
fn test_extracts_lines_in_reading_order() {
    let pdf = build_pdf(&[resume_page()]);
    let doc = extract_bytes("resume.pdf", "application/pdf", pdf).unwrap();

    let lines: Vec<&str> = doc.lines().collect();
    assert_eq!(
        lines,
        vec![
            "JANE DOE",
            "jane@example.com",
            "EXPERIENCE",
            "Engineer | Acme | 2021",
            "- Shipped the billing rewrite",
        ]
    );

    let meta = doc.metadata();
    assert_eq!(meta.page_count, Some(1));
    assert_eq!(meta.pages_extracted, 1);
    assert!(!meta.truncated);
    assert_eq!(meta.pdf_version.as_deref(), Some("1.5"));
}

#[test]
fn test_pdf_lines_classify() {
    let pdf = build_pdf(&[resume_page()]);
    let doc = extract_bytes("resume.pdf", "", pdf).unwrap();
    let lines = resume_tailor::Classifier::default().classify_document(&doc);

    let roles: Vec<Role> = lines.iter().map(|l| l.role).collect();
    assert_eq!(
        roles,
        vec![
            Role::Heading,
            Role::Contact,
            Role::Heading,
            Role::Subheading,
            Role::Bullet,
        ]
    );
    assert_eq!(lines[4].content, "Shipped the billing rewrite");
}

#[test]
fn test_page_cap() {
    let pdf = build_pdf(&numbered_pages(20));
    let doc = extract_bytes("long.pdf", "application/pdf", pdf).unwrap();

    let meta = doc.metadata();
    assert_eq!(meta.page_count, Some(20));
    assert_eq!(meta.pages_extracted, 15);
    assert!(meta.truncated);
    assert!(doc.text().contains("Page 15 summary line"));
    assert!(!doc.text().contains("Page 16"));
}

#[test]
fn test_custom_page_cap() {
    let pdf = build_pdf(&numbered_pages(5));
    let extractor = PdfExtractor::with_options(ParseOptions::new().with_max_pages(2));
    let doc = extractor.extract_bytes("short.pdf", &pdf).unwrap();
    assert_eq!(doc.line_count(), 2);
    assert!(doc.metadata().truncated);
}

#[test]
fn test_parallel_matches_sequential() {
    let pdf = build_pdf(&numbered_pages(12));
    let sequential = PdfExtractor::with_options(ParseOptions::new())
        .extract_bytes("a.pdf", &pdf)
        .unwrap();
    let parallel = PdfExtractor::with_options(ParseOptions::new().with_parallel(true))
        .extract_bytes("a.pdf", &pdf)
        .unwrap();
    assert_eq!(sequential.text(), parallel.text());
}

#[test]
fn test_blank_page_skipped() {
    let pdf = build_pdf(&[
        vec![(72, 700, "SUMMARY")],
        Vec::new(),
        vec![(72, 700, "Builds reliable systems")],
    ]);
    let doc = extract_bytes("gap.pdf", "application/pdf", pdf).unwrap();
    assert_eq!(doc.text(), "SUMMARY\n\nBuilds reliable systems");
    assert!(doc.metadata().pages_failed.is_empty());
}

#[test]
fn test_too_little_text() {
    let pdf = build_pdf(&[vec![(72, 700, "Hi")]]);
    let result = extract_bytes("tiny.pdf", "application/pdf", pdf);
    match result {
        Err(Error::NoTextExtracted { chars }) => assert_eq!(chars, 2),
        other => panic!("expected NoTextExtracted, got {:?}", other.map(|d| d.into_text())),
    }
}

#[test]
fn test_image_only_pdf_has_no_text() {
    let pdf = build_pdf::<&str>(&[Vec::new(), Vec::new()]);
    let err = extract_bytes("scan.pdf", "application/pdf", pdf).unwrap_err();
    assert_eq!(err.class(), Some(ErrorClass::NoText));
}

#[test]
fn test_not_a_pdf() {
    let err = extract_bytes("resume.pdf", "application/pdf", b"PK\x03\x04 not a pdf".to_vec())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidFormat(_)));
    assert_eq!(err.class(), Some(ErrorClass::UnsupportedFormat));
}

#[test]
fn test_corrupt_pdf() {
    let err = extract_bytes(
        "broken.pdf",
        "application/pdf",
        b"%PDF-1.4\n1 0 obj << /Type /Catalog".to_vec(),
    )
    .unwrap_err();
    assert!(matches!(
        err.class(),
        Some(ErrorClass::CorruptOrProtected) | Some(ErrorClass::Unavailable)
    ));
    assert!(!err.user_message().is_empty());
}

#[test]
fn test_trailing_garbage_recovers() {
    let mut pdf = build_pdf(&[resume_page()]);
    pdf.extend_from_slice(b"\n<html>upload proxy banner</html>\n");

    let doc = extract_bytes("resume.pdf", "application/pdf", pdf).unwrap();
    assert!(doc.text().starts_with("JANE DOE"));
}

#[test]
fn test_empty_loader_chain() {
    let pdf = build_pdf(&[resume_page()]);
    let extractor = PdfExtractor::new().with_chain(LoaderChain::new(Default::default()));
    let err = extractor.extract_bytes("resume.pdf", &pdf).unwrap_err();
    assert!(matches!(err, Error::BackendUnavailable(_)));
}
