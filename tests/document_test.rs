//! Integration tests over synthesized PDF and DOCX documents.

use std::io::{Cursor, Write};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use unresume::{
    detect_format_from_bytes, extract_lines, parse, parse_file, DocumentFormat, Error,
    ParseOptions, ResumeParser,
};

/// One positioned run of text: (text, x, y).
type Run = (&'static str, i64, i64);

const RESUME_RUNS: &[Run] = &[
    ("Jane Doe", 72, 740),
    ("jane@doe.dev | 555-123-4567", 72, 726),
    ("EDUCATION", 72, 712),
    ("State University", 72, 698),
    ("Bachelor of Arts in Computer Science", 72, 684),
    ("Aug 2018 - May 2021", 400, 684),
    ("EXPERIENCE", 72, 670),
    ("Software Engineer at Acme Corp", 72, 656),
    ("Jun 2021 - Present", 400, 656),
    ("- Built a pipeline", 72, 642),
    ("SKILLS", 72, 628),
    ("Languages: Rust, Go", 72, 614),
];

/// Build a one-page PDF showing each run at its absolute position.
fn build_pdf(runs: &[Run]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 11.into()]),
    ];
    for (text, x, y) in runs {
        operations.push(Operation::new(
            "Tm",
            vec![1.into(), 0.into(), 0.into(), 1.into(), (*x).into(), (*y).into()],
        ));
        operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        },
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Build a DOCX container whose body holds `paragraphs`, one run each.
fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    let mut body = String::new();
    for paragraph in paragraphs {
        body.push_str("<w:p><w:r><w:t xml:space=\"preserve\">");
        body.push_str(&paragraph.replace('&', "&amp;"));
        body.push_str("</w:t></w:r></w:p>");
    }
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{}</w:body></w:document>",
        body
    );

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(b"<?xml version=\"1.0\"?><Types/>").unwrap();
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

const DOCX_PARAGRAPHS: &[&str] = &[
    "Jake Ryan",
    "123-456-7890 | jake@su.edu | linkedin.com/in/jake",
    "Education",
    "Southwestern University",
    "Bachelor of Arts in Computer Science",
    "Georgetown, TX",
    "Aug 2018 – May 2021",
    "",
    "Experience",
    "Software Engineer — Acme Corp",
    "Jun 2021 - Present",
    "• Built a pipeline",
    "Technical Skills",
    "Languages: Python, Java, C++",
];

#[test]
fn test_pdf_lines_are_rebuilt_by_position() {
    let pdf = build_pdf(RESUME_RUNS);
    let lines = extract_lines(&pdf, DocumentFormat::PageBased, &ParseOptions::default()).unwrap();
    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();

    assert_eq!(texts.len(), 10);
    assert_eq!(texts[0], "Jane Doe");
    assert_eq!(texts[4], "Bachelor of Arts in Computer Science Aug 2018 - May 2021");
    assert_eq!(texts[6], "Software Engineer at Acme Corp Jun 2021 - Present");
    assert!(lines.iter().enumerate().all(|(i, l)| l.index == i));
}

#[test]
fn test_pdf_parses_into_record() {
    let record = parse(&build_pdf(RESUME_RUNS), DocumentFormat::PageBased).unwrap();

    assert_eq!(record.personal.name, "Jane Doe");
    assert_eq!(record.personal.email, "jane@doe.dev");

    assert_eq!(record.education.len(), 1);
    assert_eq!(record.education[0].school, "State University");
    assert_eq!(record.education[0].degree, "Bachelor of Arts in Computer Science");
    assert_eq!(record.education[0].dates, "Aug 2018 - May 2021");

    assert_eq!(record.experience.len(), 1);
    assert_eq!(record.experience[0].title, "Software Engineer");
    assert_eq!(record.experience[0].company, "Acme Corp");
    assert_eq!(record.experience[0].dates, "Jun 2021 - Present");
    assert_eq!(record.experience[0].bullets, vec!["Built a pipeline"]);

    assert_eq!(record.skills[0].category, "Languages");
    assert_eq!(record.skills[0].items, "Rust, Go");
    assert!(record.is_fully_covered());
}

#[test]
fn test_pdf_with_leading_junk_parses_with_fallback() {
    let mut data = b"HTTP/1.1 200 OK\r\nContent-Type: application/pdf\r\n\r\n".to_vec();
    data.extend_from_slice(&build_pdf(RESUME_RUNS));

    let record = parse(&data, DocumentFormat::PageBased).unwrap();
    assert_eq!(record.personal.name, "Jane Doe");
}

#[test]
fn test_docx_paragraphs_become_lines() {
    let docx = build_docx(DOCX_PARAGRAPHS);
    let lines = extract_lines(&docx, DocumentFormat::FlowText, &ParseOptions::default()).unwrap();

    // The empty paragraph is dropped
    assert_eq!(lines.len(), DOCX_PARAGRAPHS.len() - 1);
    assert_eq!(lines[1].text, "123-456-7890 | jake@su.edu | linkedin.com/in/jake");
    assert_eq!(lines[7].text, "Experience");
    assert_eq!(lines[7].index, 7);
}

#[test]
fn test_docx_parses_into_record() {
    let record = parse(&build_docx(DOCX_PARAGRAPHS), DocumentFormat::FlowText).unwrap();

    assert_eq!(record.personal.name, "Jake Ryan");
    assert_eq!(record.personal.phone, "123-456-7890");
    assert_eq!(record.personal.linkedin, "linkedin.com/in/jake");

    assert_eq!(record.education[0].school, "Southwestern University");
    assert_eq!(record.education[0].location, "Georgetown, TX");
    assert_eq!(record.education[0].dates, "Aug 2018 – May 2021");

    assert_eq!(record.experience[0].title, "Software Engineer");
    assert_eq!(record.experience[0].company, "Acme Corp");

    assert_eq!(record.skills.len(), 1);
    assert_eq!(record.skills[0].items, "Python, Java, C++");
}

#[test]
fn test_format_sniffing() {
    assert_eq!(
        detect_format_from_bytes(&build_pdf(RESUME_RUNS)).unwrap(),
        DocumentFormat::PageBased
    );
    assert_eq!(
        detect_format_from_bytes(&build_docx(DOCX_PARAGRAPHS)).unwrap(),
        DocumentFormat::FlowText
    );
    assert!(matches!(
        detect_format_from_bytes(b"just text"),
        Err(Error::UnsupportedFormat(_))
    ));
}

#[test]
fn test_garbage_is_extraction_error() {
    for format in [DocumentFormat::PageBased, DocumentFormat::FlowText] {
        let err = parse(b"definitely not a document", format).unwrap_err();
        assert!(matches!(err, Error::Extraction(_)), "{:?}: {:?}", format, err);
        assert!(err.is_user_facing());
    }
}

#[test]
fn test_zip_without_body_is_extraction_error() {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    zip.start_file("readme.txt", options).unwrap();
    zip.write_all(b"hello").unwrap();
    let data = zip.finish().unwrap().into_inner();

    let err = parse(&data, DocumentFormat::FlowText).unwrap_err();
    assert!(matches!(err, Error::Extraction(_)));
}

#[test]
fn test_corrupt_docx_body_is_extraction_error() {
    let mut data = build_docx(DOCX_PARAGRAPHS);
    // Stored entries keep the text as-is; damage it so the CRC no longer matches
    let at = data
        .windows(b"Jake Ryan".len())
        .position(|w| w == b"Jake Ryan")
        .unwrap();
    data[at] = b'K';

    let err = parse(&data, DocumentFormat::FlowText).unwrap_err();
    assert!(matches!(err, Error::Extraction(_)), "{:?}", err);
    assert!(err.is_user_facing());
}

#[test]
fn test_short_document_is_insufficient_content() {
    let pdf = build_pdf(&[("Jane Doe", 72, 740)]);

    let err = parse(&pdf, DocumentFormat::PageBased).unwrap_err();
    match err {
        Error::InsufficientContent { found, required } => {
            assert_eq!(found, 8);
            assert_eq!(required, 50);
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let record = ResumeParser::new()
        .min_content_chars(0)
        .parse_bytes(&pdf, DocumentFormat::PageBased)
        .unwrap();
    assert_eq!(record.personal.name, "Jane Doe");
}

#[test]
fn test_empty_docx_is_insufficient_content() {
    let err = parse(&build_docx(&[]), DocumentFormat::FlowText).unwrap_err();
    assert!(matches!(err, Error::InsufficientContent { found: 0, .. }));
}

#[test]
fn test_parse_file_uses_extension() {
    let dir = tempfile::tempdir().unwrap();

    let pdf_path = dir.path().join("jane.pdf");
    std::fs::write(&pdf_path, build_pdf(RESUME_RUNS)).unwrap();
    assert_eq!(parse_file(&pdf_path).unwrap().personal.name, "Jane Doe");

    let docx_path = dir.path().join("jake.docx");
    std::fs::write(&docx_path, build_docx(DOCX_PARAGRAPHS)).unwrap();
    assert_eq!(parse_file(&docx_path).unwrap().personal.name, "Jake Ryan");

    let txt_path = dir.path().join("notes.txt");
    std::fs::write(&txt_path, "Jane Doe").unwrap();
    assert!(matches!(
        parse_file(&txt_path),
        Err(Error::UnsupportedFormat(_))
    ));
}
