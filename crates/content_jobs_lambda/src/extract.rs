//! Text extraction from fetched HTML.
//!
//! Flat text and link scraping work on the raw markup with regexes; the site
//! profile walks a parsed DOM.

use content_jobs_core::text::{collapse_whitespace, truncate_chars};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

static HIDDEN_BLOCKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)<!--.*?-->|<script\b.*?</script\s*>|<style\b.*?</style\s*>|<noscript\b.*?</noscript\s*>|<template\b.*?</template\s*>",
    )
    .expect("valid regex")
});
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));
static LINE_BREAK_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(?:p|div|h[1-6]|li|tr|section|article)\s*>")
        .expect("valid regex")
});
static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});").expect("valid regex")
});
static LANDMARKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("nav, header, footer").expect("valid selector"));
const HIDDEN_ELEMENTS: [&str; 5] = ["head", "script", "style", "noscript", "template"];

static RESULT_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)href\s*=\s*"(/url\?[^"]*)""#).expect("valid regex"));

/// Visible text of a page with whitespace collapsed.
pub fn body_text(html: &str) -> String {
    let visible = HIDDEN_BLOCKS.replace_all(html, " ");
    let stripped = TAG.replace_all(&visible, " ");
    collapse_whitespace(&decode_entities(&stripped))
}

/// Brand summary of a website: the full text of every `nav`, `header` and
/// `footer` element in document order, then the innermost elements whose
/// text names contact details.
pub fn site_profile_text(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);
    let mut sections: Vec<String> = Vec::new();

    for landmark in document.select(&LANDMARKS) {
        push_unique(&mut sections, element_text(landmark));
    }

    let mut contact_blocks = Vec::new();
    collect_contact_blocks(document.root_element(), &mut contact_blocks);
    for block in contact_blocks {
        push_unique(&mut sections, block);
    }

    truncate_chars(&sections.join(" "), max_chars)
}

/// Splits an HTML fragment into trimmed, non-empty text lines.
pub fn html_to_lines(html: &str) -> Vec<String> {
    let with_breaks = LINE_BREAK_TAG.replace_all(html, "\n");
    let stripped = TAG.replace_all(&with_breaks, "");
    decode_entities(&stripped)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Target URLs of `/url?q=` result anchors, in page order.
pub fn search_result_links(html: &str, limit: usize) -> Vec<String> {
    let Ok(base) = Url::parse("https://www.google.com/") else {
        return Vec::new();
    };

    let mut links: Vec<String> = Vec::new();
    for captures in RESULT_LINK.captures_iter(html) {
        if links.len() == limit {
            break;
        }
        let href = decode_entities(&captures[1]);
        let Ok(url) = base.join(&href) else {
            continue;
        };
        let target = url
            .query_pairs()
            .find(|(name, _)| name == "q")
            .map(|(_, value)| value.into_owned());
        if let Some(target) = target {
            if (target.starts_with("http://") || target.starts_with("https://"))
                && !links.contains(&target)
            {
                links.push(target);
            }
        }
    }
    links
}

pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |captures: &Captures<'_>| {
            let name = &captures[1];
            let decoded = if let Some(hex) = name
                .strip_prefix("#x")
                .or_else(|| name.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(decimal) = name.strip_prefix('#') {
                decimal.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                named_entity(name)
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| captures[0].to_string())
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "rsquo" => '\u{2019}',
        "lsquo" => '\u{2018}',
        "rdquo" => '\u{201d}',
        "ldquo" => '\u{201c}',
        _ => return None,
    })
}

fn push_unique(sections: &mut Vec<String>, text: String) {
    if !text.is_empty() && !sections.contains(&text) {
        sections.push(text);
    }
}

fn is_hidden(element: ElementRef<'_>) -> bool {
    HIDDEN_ELEMENTS.contains(&element.value().name())
}

/// Visible text below `element`, whitespace collapsed.
fn element_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    append_visible_text(element, &mut text);
    collapse_whitespace(&text)
}

fn append_visible_text(element: ElementRef<'_>, text: &mut String) {
    for child in element.children() {
        if let Some(fragment) = child.value().as_text() {
            text.push_str(fragment);
            text.push(' ');
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !is_hidden(child_element) {
                append_visible_text(child_element, text);
            }
        }
    }
}

/// Returns whether `element` or a descendant named contact details.
fn collect_contact_blocks(element: ElementRef<'_>, blocks: &mut Vec<String>) -> bool {
    let mut found_inside = false;
    for child in element.children().filter_map(ElementRef::wrap) {
        if !is_hidden(child) {
            found_inside |= collect_contact_blocks(child, blocks);
        }
    }
    if found_inside {
        return true;
    }

    let text = element_text(element);
    if mentions_contact_details(&text) {
        blocks.push(text);
        return true;
    }
    false
}

fn mentions_contact_details(text: &str) -> bool {
    let lowered = text.to_lowercase();
    lowered.contains("contact")
        && ["phone", "email", "address"]
            .iter()
            .any(|marker| lowered.contains(marker))
}
