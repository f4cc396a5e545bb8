//! HTML fragments posted to the status callback.

use pulldown_cmark::{html, Event, Options, Parser};

use crate::text::decode_unicode_escapes;

const PANEL_STYLE: &str = "padding: 20px; background-color: #f0f0f0; border-radius: 5px;";
const ERROR_STYLE: &str =
    "padding: 20px; color: #ff3333; background-color: #fec4c4; border-radius: 5px;";

const WORKOUT_CAUTION: &str = "Please consult with a healthcare professional before starting any new exercise program. Stay hydrated and listen to your body.";

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Failure snippet embedding the error message as-is.
pub fn error_html(message: &str) -> String {
    format!("<div style=\"{ERROR_STYLE}\"><p><strong>Error: </strong> {message}</p></div>")
}

pub fn blog_ready_html(product_label: &str) -> String {
    format!(
        "<div>Your blog post is ready! The post is created in markdown format to be compatible with most blog platforms.</div><div>{product_label} at your service.</div>"
    )
}

pub fn workout_ready_html() -> String {
    format!(
        "<div style=\"{PANEL_STYLE}\"><h2>Your program is ready!</h2><h3>Word of Caution</h3><p>{WORKOUT_CAUTION}</p></div>"
    )
}

/// Document body rendered into the workout PDF.
pub fn workout_document_html(goal: &str, plan: &str) -> String {
    format!(
        "<div style=\"{PANEL_STYLE}\"><h2>Personalized Workout Plan</h2><p><strong>Goal:</strong> {goal}</p><div>{plan}</div><h3>Word of Caution</h3><p>{WORKOUT_CAUTION}</p></div>"
    )
}

pub fn logo_ready_html(logo_url: &str) -> String {
    format!(
        "<div style=\"{PANEL_STYLE}\"><h2>Your logo is ready!</h2><img src=\"{logo_url}\" alt=\"Generated Logo\"><h3>Download your logo</h3><p>Your new logo is ready for use in print and digital media.</p></div>"
    )
}

pub fn instagram_ready_html(
    execution_id: &str,
    user_id: i64,
    product_id: i64,
    caption: &str,
) -> String {
    format!(
        "<div style=\"{PANEL_STYLE}\"><h2>Instagram Post Creation Result</h2>{ids}<p><strong>Caption:</strong><br>{caption}</p></div>",
        ids = identity_rows(execution_id, user_id, product_id),
        caption = chat_text_to_html(caption),
    )
}

pub fn linkedin_ready_html(
    execution_id: &str,
    user_id: i64,
    product_id: i64,
    post: &str,
) -> String {
    format!(
        "<div style=\"{PANEL_STYLE}\"><h2>Task Execution Result</h2>{ids}<strong>Response:</strong><br><div>{post}</div></div>",
        ids = identity_rows(execution_id, user_id, product_id),
        post = chat_text_to_html(post),
    )
}

pub fn story_ready_html(audio_urls: &[String]) -> String {
    let items: String = audio_urls
        .iter()
        .enumerate()
        .map(|(index, url)| format!("<li><a href=\"{url}\">Part {}</a></li>", index + 1))
        .collect();
    format!(
        "<div style=\"{PANEL_STYLE}\"><h2>Your story is ready!</h2><p>The story and audio parts are ready and have been uploaded.</p><ul>{items}</ul></div>"
    )
}

fn identity_rows(execution_id: &str, user_id: i64, product_id: i64) -> String {
    format!(
        "<p><strong>Execution ID:</strong> {}</p><p><strong>User ID:</strong> {user_id}</p><p><strong>Product ID:</strong> {product_id}</p>",
        escape_html(execution_id)
    )
}

/// Renders generated chat text as Markdown.
///
/// Literal `\uXXXX` escapes are decoded first. Raw HTML in the text is
/// escaped rather than passed through.
pub fn chat_text_to_html(text: &str) -> String {
    let decoded = decode_unicode_escapes(text);
    let parser = Parser::new_ext(&decoded, Options::ENABLE_STRIKETHROUGH).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut rendered = String::with_capacity(decoded.len() * 3 / 2);
    html::push_html(&mut rendered, parser);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_snippet_embeds_message() {
        let html = error_html("completion backend returned status code 500");
        assert!(html
            .contains("<strong>Error: </strong> completion backend returned status code 500"));
        assert!(html.contains("#fec4c4"));
    }

    #[test]
    fn chat_text_renders_markdown_blocks() {
        let html = chat_text_to_html("# Launch\n\n**Big news** today\n- first point\n- second point");

        assert!(html.contains("<h1>Launch</h1>"));
        assert!(html.contains("<p><strong>Big news</strong> today</p>"));
        assert!(html.contains("<ul>\n<li>first point</li>\n<li>second point</li>\n</ul>"));
        assert!(!html.contains("**"));
    }

    #[test]
    fn chat_text_escapes_raw_html_and_decodes_unicode() {
        let html = chat_text_to_html(r"Caf\u00e9 <script>alert(1)</script> & friends");

        assert!(html.contains("Café"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&amp; friends"));
    }

    #[test]
    fn story_html_links_every_part() {
        let html = story_ready_html(&[
            "https://b/1.mp3".to_string(),
            "https://b/2.mp3".to_string(),
        ]);
        assert!(html.contains("<a href=\"https://b/1.mp3\">Part 1</a>"));
        assert!(html.contains("<a href=\"https://b/2.mp3\">Part 2</a>"));
    }

    #[test]
    fn workout_document_keeps_goal_and_plan() {
        let html = workout_document_html("endurance", "Day 1: run");
        assert!(html.contains("<strong>Goal:</strong> endurance"));
        assert!(html.contains("<div>Day 1: run</div>"));
    }
}
