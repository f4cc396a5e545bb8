use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::extract::body_text;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Description,
}

fn field_for(name: &[u8]) -> Option<Field> {
    match name {
        b"title" => Some(Field::Title),
        b"link" => Some(Field::Link),
        b"description" | b"summary" => Some(Field::Description),
        _ => None,
    }
}

fn is_item(name: &[u8]) -> bool {
    matches!(name, b"item" | b"entry")
}

/// Reads RSS `item` (and Atom `entry`) elements; channel-level fields are
/// ignored.
pub fn parse_rss_items(xml: &str) -> Result<Vec<FeedItem>, PipelineError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut current: Option<FeedItem> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let local_name = e.local_name();
                if is_item(local_name.as_ref()) {
                    current = Some(FeedItem::default());
                    field = None;
                } else if let Some(item) = current.as_mut() {
                    field = field_for(local_name.as_ref());
                    if field == Some(Field::Link) {
                        apply_href(item, e)?;
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                if let Some(item) = current.as_mut() {
                    if e.local_name().as_ref() == b"link" {
                        apply_href(item, e)?;
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                if is_item(e.local_name().as_ref()) {
                    if let Some(item) = current.take() {
                        items.push(finish(item));
                    }
                }
                field = None;
            }
            Ok(Event::Text(e)) => {
                if let (Some(item), Some(target)) = (current.as_mut(), field) {
                    let text = e
                        .unescape()
                        .map_err(|error| PipelineError::Feed(error.to_string()))?;
                    append(item, target, &text);
                }
            }
            Ok(Event::CData(e)) => {
                if let (Some(item), Some(target)) = (current.as_mut(), field) {
                    let bytes = e.into_inner();
                    append(item, target, &String::from_utf8_lossy(&bytes));
                }
            }
            Ok(Event::Eof) => break,
            Err(error) => {
                return Err(PipelineError::Feed(format!(
                    "error at position {}: {error}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }

    Ok(items)
}

fn apply_href(item: &mut FeedItem, element: &BytesStart<'_>) -> Result<(), PipelineError> {
    let href = element
        .try_get_attribute("href")
        .map_err(|error| PipelineError::Feed(error.to_string()))?;
    if let Some(attribute) = href {
        let value = attribute
            .unescape_value()
            .map_err(|error| PipelineError::Feed(error.to_string()))?;
        item.link = value.into_owned();
    }
    Ok(())
}

fn append(item: &mut FeedItem, field: Field, text: &str) {
    let target = match field {
        Field::Title => &mut item.title,
        Field::Link => &mut item.link,
        Field::Description => &mut item.description,
    };
    target.push_str(text);
}

fn finish(mut item: FeedItem) -> FeedItem {
    item.title = item.title.trim().to_string();
    item.link = item.link.trim().to_string();
    item.description = body_text(&item.description);
    item
}

/// Keeps items whose title or description mentions any keyword,
/// ignoring case. An empty keyword list keeps everything.
pub fn filter_by_keywords(items: Vec<FeedItem>, keywords: &[String]) -> Vec<FeedItem> {
    let needles: Vec<String> = keywords
        .iter()
        .map(|keyword| keyword.trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect();
    if needles.is_empty() {
        return items;
    }

    items
        .into_iter()
        .filter(|item| {
            let title = item.title.to_lowercase();
            let description = item.description.to_lowercase();
            needles
                .iter()
                .any(|needle| title.contains(needle) || description.contains(needle))
        })
        .collect()
}

pub fn news_summary(items: &[FeedItem]) -> String {
    items
        .iter()
        .map(|item| format!("Title: {}\nLink: {}", item.title, item.link))
        .collect::<Vec<_>>()
        .join("\n\n")
}
