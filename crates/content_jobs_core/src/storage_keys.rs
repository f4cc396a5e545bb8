pub const BLOG_POST_FILE: &str = "blog_post.txt";
pub const WORKOUT_PROGRAM_FILE: &str = "program.pdf";
pub const LOGO_FILE: &str = "logo.png";
pub const RESULT_JSON_FILE: &str = "result.json";

pub const TEXT_PLAIN: &str = "text/plain";
pub const APPLICATION_PDF: &str = "application/pdf";
pub const APPLICATION_JSON: &str = "application/json";
pub const IMAGE_PNG: &str = "image/png";
pub const AUDIO_MPEG: &str = "audio/mpeg";

pub fn object_key(root: &str, execution_id: &str, file_name: &str) -> String {
    let trimmed = root.trim_matches('/');
    if trimmed.is_empty() {
        format!("{execution_id}/{file_name}")
    } else {
        format!("{trimmed}/{execution_id}/{file_name}")
    }
}

/// `<results-root>/<execution-id>/<file-name>`
pub fn result_object_key(results_root: &str, execution_id: &str, file_name: &str) -> String {
    object_key(results_root, execution_id, file_name)
}

/// Staging location the speech service writes generated audio to.
pub fn internal_object_key(internal_root: &str, execution_id: &str, file_name: &str) -> String {
    object_key(internal_root, execution_id, file_name)
}

pub fn public_object_url(bucket: &str, key: &str) -> String {
    format!("https://{bucket}.s3.amazonaws.com/{key}")
}

/// Last path segment of `url` without its query string or fragment.
///
/// A URL without a path has no file name; its host is never returned.
pub fn file_name_from_url(url: &str) -> Option<String> {
    let base = url.split(['?', '#']).next().unwrap_or(url);
    let path = match base.split_once("://") {
        Some((_, rest)) => rest.split_once('/')?.1,
        None => base,
    };
    let name = path.trim_end_matches('/').rsplit('/').next()?;
    if name.is_empty() || name.contains(':') {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_result_key_under_execution_folder() {
        let key = result_object_key("results/", "exec-1", BLOG_POST_FILE);
        assert_eq!(key, "results/exec-1/blog_post.txt");
    }

    #[test]
    fn trims_nested_root_slashes() {
        let key = internal_object_key("/pi/internal/", "exec-2", "part-0.mp3");
        assert_eq!(key, "pi/internal/exec-2/part-0.mp3");
    }

    #[test]
    fn empty_root_keeps_execution_prefix() {
        assert_eq!(result_object_key("", "exec-3", LOGO_FILE), "exec-3/logo.png");
    }

    #[test]
    fn builds_public_url() {
        assert_eq!(
            public_object_url("bucket", "results/e/logo.png"),
            "https://bucket.s3.amazonaws.com/results/e/logo.png"
        );
    }

    #[test]
    fn extracts_file_name_from_signed_url() {
        assert_eq!(
            file_name_from_url("https://cdn.example.com/img/abc-123.png?se=2024&sig=x%2F"),
            Some("abc-123.png".to_string())
        );
        assert_eq!(file_name_from_url("https:"), None);
    }

    #[test]
    fn host_only_url_has_no_file_name() {
        assert_eq!(file_name_from_url("https://cdn.example.com"), None);
        assert_eq!(file_name_from_url("https://cdn.example.com/"), None);
        assert_eq!(file_name_from_url("https://cdn.example.com?sig=abc"), None);
        assert_eq!(
            file_name_from_url("https://cdn.example.com/logo.png/"),
            Some("logo.png".to_string())
        );
    }
}
