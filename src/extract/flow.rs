//! Flow-text (DOCX) extraction.
//!
//! The body part of the container is streamed with quick-xml; every
//! paragraph becomes one line, with explicit breaks splitting it further.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader as XmlReader;
use zip::ZipArchive;

use crate::detect::DOCX_BODY;
use crate::error::{Error, Result};

/// Extract the paragraph lines of a DOCX buffer, untrimmed, in document order.
pub fn extract_paragraphs(data: &[u8]) -> Result<Vec<String>> {
    let xml = read_body(data)?;
    parse_body_xml(&xml)
}

fn read_body(data: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;
    let mut entry = archive
        .by_name(DOCX_BODY)
        .map_err(|_| Error::Extraction(format!("container has no {}", DOCX_BODY)))?;
    let mut buffer = Vec::new();
    // CRC and inflate failures surface as io errors
    entry
        .read_to_end(&mut buffer)
        .map_err(|e| Error::Extraction(format!("corrupt {}: {}", DOCX_BODY, e)))?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Walk `word/document.xml` and collect one string per paragraph or line break.
pub(crate) fn parse_body_xml(xml: &str) -> Result<Vec<String>> {
    let mut reader = XmlReader::from_str(xml);
    reader.trim_text(false);
    let mut buf = Vec::new();

    let mut lines = Vec::new();
    let mut current = String::new();
    // Paragraphs nest inside text boxes
    let mut depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"p" => {
                    if depth > 0 && !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                    }
                    depth += 1;
                }
                b"t" => in_text = depth > 0,
                b"tab" if depth > 0 => current.push(' '),
                b"br" | b"cr" if depth > 0 => lines.push(std::mem::take(&mut current)),
                _ => {}
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"tab" if depth > 0 => current.push(' '),
                b"br" | b"cr" if depth > 0 => lines.push(std::mem::take(&mut current)),
                // <w:p/> is an empty paragraph
                _ => {}
            },
            Event::Text(t) => {
                if in_text {
                    let text = t
                        .unescape()
                        .unwrap_or_else(|_| String::from_utf8_lossy(t.as_ref()));
                    current.push_str(&text);
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" if depth > 0 => {
                    depth -= 1;
                    lines.push(std::mem::take(&mut current));
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    log::debug!("Flow-text body yielded {} raw lines", lines.len());
    Ok(lines)
}
