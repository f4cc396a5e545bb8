use lopdf::{dictionary, Document, Object, Stream};

use crate::error::PipelineError;

const PAGE_WIDTH: i64 = 600;
const MIN_PAGE_HEIGHT: i64 = 400;
const MARGIN: i64 = 50;
const TITLE_SIZE: i64 = 16;
const BODY_SIZE: i64 = 12;
const LEADING: i64 = 14;
const WRAP_COLUMNS: usize = 80;

/// Lays out a title and body lines on one Helvetica page.
///
/// The page keeps its width and grows in height until every wrapped line
/// fits. Characters WinAnsi cannot encode are printed as `?`.
pub fn render_text_pdf(title: &str, lines: &[String]) -> Result<Vec<u8>, PipelineError> {
    let wrapped: Vec<String> = lines
        .iter()
        .flat_map(|line| wrap_line(line, WRAP_COLUMNS))
        .collect();
    let text_height = TITLE_SIZE + LEADING + LEADING * wrapped.len() as i64;
    let page_height = MIN_PAGE_HEIGHT.max(text_height + 2 * MARGIN);

    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let font_id = doc.new_object_id();
    let resources_id = doc.new_object_id();
    let content_id = doc.new_object_id();
    let page_id = doc.new_object_id();

    doc.objects.insert(
        font_id,
        Object::Dictionary(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        }),
    );
    doc.objects.insert(
        resources_id,
        Object::Dictionary(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        }),
    );

    let content = content_stream(title, &wrapped, page_height - MARGIN);
    doc.objects.insert(
        content_id,
        Object::Stream(Stream::new(dictionary! {}, content)),
    );

    doc.objects.insert(
        page_id,
        Object::Dictionary(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), page_height.into()],
            "Resources" => resources_id,
            "Contents" => content_id,
        }),
    );
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|error| PipelineError::Render(error.to_string()))?;
    Ok(buffer)
}

fn content_stream(title: &str, lines: &[String], top: i64) -> Vec<u8> {
    let mut content = Vec::new();
    content.extend_from_slice(b"BT\n");
    content.extend_from_slice(format!("/F1 {TITLE_SIZE} Tf\n{MARGIN} {top} Td\n").as_bytes());
    content.extend_from_slice(format!("{LEADING} TL\n").as_bytes());
    push_text_operand(&mut content, title);
    content.extend_from_slice(b" Tj T* T*\n");
    content.extend_from_slice(format!("/F1 {BODY_SIZE} Tf\n").as_bytes());
    for line in lines {
        push_text_operand(&mut content, line);
        content.extend_from_slice(b" Tj T*\n");
    }
    content.extend_from_slice(b"ET\n");
    content
}

/// Writes `text` as a PDF literal string in WinAnsi bytes.
fn push_text_operand(content: &mut Vec<u8>, text: &str) {
    content.push(b'(');
    for character in text.chars() {
        match character {
            '(' | ')' | '\\' => {
                content.push(b'\\');
                content.push(character as u8);
            }
            ' '..='~' => content.push(character as u8),
            '\t' => content.push(b' '),
            _ if character.is_control() => {}
            _ => match win_ansi_byte(character) {
                Some(byte) => content.extend_from_slice(format!("\\{byte:03o}").as_bytes()),
                None => content.push(b'?'),
            },
        }
    }
    content.push(b')');
}

/// WinAnsiEncoding byte for characters above ASCII.
fn win_ansi_byte(character: char) -> Option<u8> {
    let byte = match character {
        '\u{a0}'..='\u{ff}' => character as u8,
        '\u{20ac}' => 0x80,
        '\u{201a}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201e}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02c6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8a,
        '\u{2039}' => 0x8b,
        '\u{0152}' => 0x8c,
        '\u{017d}' => 0x8e,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02dc}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9a,
        '\u{203a}' => 0x9b,
        '\u{0153}' => 0x9c,
        '\u{017e}' => 0x9e,
        '\u{0178}' => 0x9f,
        _ => return None,
    };
    Some(byte)
}

fn wrap_line(line: &str, columns: usize) -> Vec<String> {
    let mut wrapped = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let mut word = word.to_string();
        while word.chars().count() > columns {
            if !current.is_empty() {
                wrapped.push(std::mem::take(&mut current));
            }
            let split_at = word
                .char_indices()
                .nth(columns)
                .map(|(index, _)| index)
                .unwrap_or(word.len());
            wrapped.push(word[..split_at].to_string());
            word = word[split_at..].to_string();
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > columns && !current.is_empty() {
            wrapped.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || wrapped.is_empty() {
        wrapped.push(current);
    }
    wrapped
}
