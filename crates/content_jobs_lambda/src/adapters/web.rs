use content_jobs_core::text::truncate_chars;
use reqwest::Url;
use tracing::warn;

use crate::error::PipelineError;
use crate::extract::{body_text, search_result_links};

pub const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search";
pub const SEARCH_RESULT_LIMIT: usize = 3;
pub const ARTICLE_TEXT_BUDGET: usize = 12_000;

pub trait PageFetcher {
    fn fetch_text(&self, url: &str) -> Result<String, PipelineError>;
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, PipelineError>;
}

impl<T: PageFetcher + ?Sized> PageFetcher for &T {
    fn fetch_text(&self, url: &str) -> Result<String, PipelineError> {
        (**self).fetch_text(url)
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, PipelineError> {
        (**self).fetch_bytes(url)
    }
}

pub trait SearchProvider {
    fn search(&self, query: &str) -> Result<Vec<String>, PipelineError>;
}

/// Scrapes the first organic result links from a Google results page.
///
/// Markup changes on Google's side break this silently; callers treat an
/// empty result list as "nothing found".
pub struct GoogleResultScraper<F> {
    fetcher: F,
}

impl<F: PageFetcher> GoogleResultScraper<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }
}

impl<F: PageFetcher> SearchProvider for GoogleResultScraper<F> {
    fn search(&self, query: &str) -> Result<Vec<String>, PipelineError> {
        let url = Url::parse_with_params(GOOGLE_SEARCH_URL, &[("q", query)])
            .map_err(|error| PipelineError::Search(error.to_string()))?;
        let page = self.fetcher.fetch_text(url.as_str())?;
        Ok(search_result_links(&page, SEARCH_RESULT_LIMIT))
    }
}

/// Concatenates the visible text of every page that could be fetched.
///
/// Failed pages are skipped; the result is empty only when every fetch
/// failed or every page was blank.
pub fn gather_article_text(fetcher: &dyn PageFetcher, urls: &[String], budget: usize) -> String {
    let mut sections = Vec::with_capacity(urls.len());
    for url in urls {
        match fetcher.fetch_text(url) {
            Ok(page) => {
                let text = body_text(&page);
                if !text.is_empty() {
                    sections.push(text);
                }
            }
            Err(error) => warn!(
                component = "web",
                event = "page_fetch_failed",
                url = %url,
                error = %error,
                "skipping article that could not be fetched"
            ),
        }
    }
    truncate_chars(&sections.join("\n\n"), budget)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct MapFetcher {
        pages: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl MapFetcher {
        fn with_page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }
    }

    impl PageFetcher for MapFetcher {
        fn fetch_text(&self, url: &str) -> Result<String, PipelineError> {
            self.requested
                .lock()
                .expect("lock should not be poisoned")
                .push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| PipelineError::Fetch {
                    url: url.to_string(),
                    reason: "status 404".to_string(),
                })
        }

        fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, PipelineError> {
            self.fetch_text(url).map(String::into_bytes)
        }
    }

    #[test]
    fn one_failed_fetch_still_yields_content() {
        let fetcher = MapFetcher::default()
            .with_page("https://a.example", "<html><body><p>First article</p></body></html>")
            .with_page("https://c.example", "<p>Third   article</p>");
        let urls = vec![
            "https://a.example".to_string(),
            "https://b.example".to_string(),
            "https://c.example".to_string(),
        ];

        let text = gather_article_text(&fetcher, &urls, ARTICLE_TEXT_BUDGET);

        assert_eq!(text, "First article\n\nThird article");
        assert_eq!(
            fetcher
                .requested
                .lock()
                .expect("lock should not be poisoned")
                .len(),
            3
        );
    }

    #[test]
    fn article_text_respects_budget() {
        let fetcher = MapFetcher::default().with_page("https://a.example", "<p>abcdefghij</p>");
        let text = gather_article_text(&fetcher, &["https://a.example".to_string()], 4);
        assert_eq!(text, "abcd");
    }

    #[test]
    fn scraper_queries_google_and_keeps_first_three_links() {
        let results = r#"
            <a href="/url?q=https://one.example/a&amp;sa=U">1</a>
            <a href="/search?q=related">skip</a>
            <a href="/url?q=https://two.example/b%3Fx%3D1&sa=U">2</a>
            <a href="/url?q=https://three.example/c&sa=U">3</a>
            <a href="/url?q=https://four.example/d&sa=U">4</a>
        "#;
        let fetcher = MapFetcher::default().with_page(
            "https://www.google.com/search?q=rust+serverless",
            results,
        );

        let links = GoogleResultScraper::new(&fetcher)
            .search("rust serverless")
            .expect("search should succeed");

        assert_eq!(
            links,
            vec![
                "https://one.example/a",
                "https://two.example/b?x=1",
                "https://three.example/c"
            ]
        );
    }
}
