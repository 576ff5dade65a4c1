//! External image reference normalization.
//!
//! Spreadsheet rows reference banner images by share links from file-hosting
//! services. Share links render an HTML viewer page, not the image bytes, so
//! they are rewritten into each service's direct-content form. Matching is
//! on the URL host only; a share-link-shaped substring elsewhere in a URL
//! must not trigger a rewrite.

/// Rewrite a known share link into its direct-content form.
///
/// Handles the two Google Drive single-file shapes
/// (`/file/d/{id}/...` and `/open?id={id}`) and Dropbox preview links
/// (`?dl=0`). Anything else is returned unchanged.
pub fn normalize_image_url(url: &str) -> String {
    let Some((host, rest)) = split_authority(url) else {
        return url.to_string();
    };

    if host == "drive.google.com" {
        if let Some(id) = drive_file_id(rest) {
            return format!("https://drive.google.com/uc?export=view&id={id}");
        }
        return url.to_string();
    }

    if matches!(host, "www.dropbox.com" | "dropbox.com") && has_query_param(rest, "dl", "0") {
        let forced = rewrite_query_param(rest, "dl", "1");
        return format!("https://dl.dropboxusercontent.com{forced}");
    }

    url.to_string()
}

/// Whether a URL points at one of the known external file-hosting services
/// (by host only). Used to select records for the optional re-hosting pass.
pub fn is_external_storage_url(url: &str) -> bool {
    match split_authority(url) {
        Some((host, _)) => matches!(
            host,
            "drive.google.com" | "www.dropbox.com" | "dropbox.com" | "dl.dropboxusercontent.com"
        ),
        None => false,
    }
}

/// Split a URL into (host, everything after the authority). The host is
/// lowercased with any userinfo and port stripped. Returns `None` for
/// anything without a scheme.
fn split_authority(url: &str) -> Option<(&str, &str)> {
    let (_, after_scheme) = url.split_once("://")?;
    let end = after_scheme
        .find(['/', '?', '#'])
        .unwrap_or(after_scheme.len());
    let (authority, rest) = after_scheme.split_at(end);

    let host = match authority.rsplit_once('@') {
        Some((_, h)) => h,
        None => authority,
    };
    let host = match host.split_once(':') {
        Some((h, _)) => h,
        None => host,
    };

    if host.is_empty() { None } else { Some((host, rest)) }
}

/// Extract the file ID from either Drive share-link shape.
fn drive_file_id(rest: &str) -> Option<&str> {
    if let Some(after) = rest.strip_prefix("/file/d/") {
        let end = after.find(['/', '?', '#']).unwrap_or(after.len());
        let id = &after[..end];
        return (!id.is_empty()).then_some(id);
    }

    if rest.starts_with("/open") {
        let query = rest.split_once('?')?.1;
        for pair in query.split('&') {
            if let Some(id) = pair.strip_prefix("id=") {
                return (!id.is_empty()).then_some(id);
            }
        }
    }

    None
}

fn has_query_param(rest: &str, key: &str, value: &str) -> bool {
    let Some((_, query)) = rest.split_once('?') else {
        return false;
    };
    let query = query.split('#').next().unwrap_or(query);
    query
        .split('&')
        .any(|pair| pair == format!("{key}={value}"))
}

/// Replace the value of one query parameter, leaving path and other
/// parameters untouched.
fn rewrite_query_param(rest: &str, key: &str, new_value: &str) -> String {
    let Some((path, query)) = rest.split_once('?') else {
        return rest.to_string();
    };
    let prefix = format!("{key}=");
    let rewritten = query
        .split('&')
        .map(|pair| {
            if pair.starts_with(&prefix) {
                format!("{key}={new_value}")
            } else {
                pair.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{rewritten}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_view_link_rewrites_to_direct_form() {
        assert_eq!(
            normalize_image_url("https://drive.google.com/file/d/ABC123/view?usp=sharing"),
            "https://drive.google.com/uc?export=view&id=ABC123"
        );
    }

    #[test]
    fn drive_open_link_rewrites_to_direct_form() {
        assert_eq!(
            normalize_image_url("https://drive.google.com/open?id=XYZ789"),
            "https://drive.google.com/uc?export=view&id=XYZ789"
        );
    }

    #[test]
    fn drive_direct_form_is_left_alone() {
        let direct = "https://drive.google.com/uc?export=view&id=ABC123";
        assert_eq!(normalize_image_url(direct), direct);
    }

    #[test]
    fn dropbox_preview_link_forces_direct_download() {
        assert_eq!(
            normalize_image_url("https://www.dropbox.com/s/abc/banner.png?dl=0"),
            "https://dl.dropboxusercontent.com/s/abc/banner.png?dl=1"
        );
    }

    #[test]
    fn dropbox_rewrite_preserves_other_params() {
        assert_eq!(
            normalize_image_url("https://www.dropbox.com/scl/fi/abc/x.png?rlkey=k&dl=0"),
            "https://dl.dropboxusercontent.com/scl/fi/abc/x.png?rlkey=k&dl=1"
        );
    }

    #[test]
    fn unrelated_urls_pass_through() {
        let url = "https://example.com/banner.png";
        assert_eq!(normalize_image_url(url), url);
    }

    #[test]
    fn lookalike_substrings_do_not_rewrite() {
        let url = "https://example.com/drive.google.com/file/d/ABC123/view";
        assert_eq!(normalize_image_url(url), url);
        assert!(!is_external_storage_url(url));
        assert!(!is_external_storage_url(
            "https://evil.example/?next=https://drive.google.com/file/d/A/view"
        ));
    }

    #[test]
    fn external_storage_predicate_matches_on_host() {
        assert!(is_external_storage_url(
            "https://drive.google.com/uc?export=view&id=A"
        ));
        assert!(is_external_storage_url(
            "https://www.dropbox.com/s/abc/x.png?dl=0"
        ));
        assert!(!is_external_storage_url("https://example.com/banner.png"));
        assert!(!is_external_storage_url("not a url"));
    }
}
