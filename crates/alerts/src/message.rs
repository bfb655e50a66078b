use domain::AlertDetails;

/// 通知正文：状态大写 + 项目标识 + 提交信息 + 7 位短哈希。
pub fn format_notification(project_identifier: &str, details: &AlertDetails) -> String {
    let short_hash = details
        .commit_hash
        .get(..7)
        .unwrap_or(&details.commit_hash);

    let mut text = format!(
        "{} {}: {} ({})",
        details.status.to_uppercase(),
        project_identifier,
        details.commit_message,
        short_hash
    );
    if let Some(author) = details.author.as_deref() {
        text.push_str(&format!(" by {}", author));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(status: &str, hash: &str) -> AlertDetails {
        AlertDetails {
            commit_message: "fix: rollback handling".into(),
            commit_hash: hash.into(),
            status: status.into(),
            author: None,
        }
    }

    #[test]
    fn failed_event_formats_with_short_hash() {
        let text = format_notification("storefront", &details("failed", "abcdef1234567"));
        assert!(text.contains("FAILED"));
        assert!(text.contains("storefront"));
        assert!(text.contains("abcdef1"));
        assert!(!text.contains("abcdef12"));
        assert!(text.contains("fix: rollback handling"));
    }

    #[test]
    fn short_hashes_are_kept_whole() {
        let text = format_notification("storefront", &details("success", "ab12"));
        assert!(text.contains("(ab12)"));
    }

    #[test]
    fn author_is_appended_when_present() {
        let mut d = details("success", "abcdef1234567");
        d.author = Some("mingwei".into());
        let text = format_notification("storefront", &d);
        assert!(text.ends_with("by mingwei"));
    }
}
