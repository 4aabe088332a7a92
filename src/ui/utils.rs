use chrono::{DateTime, Utc};

/// "5m ago", "3h ago", "2d ago". Missing dates render as an empty string.
pub fn format_relative_time(published: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(published) = published else {
        return String::new();
    };
    let minutes = (now - published).num_minutes().max(0);
    if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / 1440)
    }
}

/// Cut to `max` characters, marking the cut with an ellipsis.
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

pub fn keyword_tags(keywords: &[String], limit: usize) -> String {
    keywords
        .iter()
        .take(limit)
        .map(|k| format!("#{}", k))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn relative_time_buckets() {
        let now = Utc::now();
        assert_eq!(format_relative_time(None, now), "");
        assert_eq!(format_relative_time(Some(now - Duration::minutes(5)), now), "5m ago");
        assert_eq!(format_relative_time(Some(now - Duration::minutes(59)), now), "59m ago");
        assert_eq!(format_relative_time(Some(now - Duration::minutes(60)), now), "1h ago");
        assert_eq!(format_relative_time(Some(now - Duration::minutes(1439)), now), "23h ago");
        assert_eq!(format_relative_time(Some(now - Duration::days(3)), now), "3d ago");
        assert_eq!(format_relative_time(Some(now + Duration::minutes(10)), now), "0m ago");
    }

    #[test]
    fn truncation_counts_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello world", 6), "hello…");
        assert_eq!(truncate_chars("héllo", 2), "h…");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn tags_limited() {
        let keywords = vec!["one".to_string(), "two".to_string(), "three".to_string()];
        assert_eq!(keyword_tags(&keywords, 2), "#one #two");
    }
}
