//! Metadata formatting.

use rescope_core::ResourceMetaData;
use rescope_transfer::length_text;

/// Label/value rows describing `meta`, skipping unknown fields.
pub fn metadata_rows(meta: &ResourceMetaData) -> Vec<(&'static str, String)> {
    let mut rows = vec![("Location", meta.location.to_string())];
    if let Some(length) = meta.content_length {
        rows.push(("Size", format!("{} ({length} bytes)", length_text(length))));
    }
    if let Some(modified) = meta.last_modified {
        rows.push(("Modified", modified.format("%Y-%m-%d %H:%M:%S UTC").to_string()));
    }
    let optional = [
        ("Type", &meta.content_type),
        ("ETag", &meta.etag),
        ("SHA-1", &meta.sha1),
        ("Filename", &meta.filename),
    ];
    rows.extend(
        optional
            .into_iter()
            .filter_map(|(label, value)| value.clone().map(|v| (label, v))),
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use url::Url;

    #[test]
    fn test_rows_skip_unknown_fields() {
        let meta = ResourceMetaData::new(Url::parse("file:///srv/a.jar").unwrap())
            .with_content_length(2048)
            .with_filename("a.jar");

        let rows = metadata_rows(&meta);

        assert_eq!(
            rows,
            vec![
                ("Location", "file:///srv/a.jar".to_string()),
                ("Size", "2 KB (2048 bytes)".to_string()),
                ("Filename", "a.jar".to_string()),
            ]
        );
    }

    #[test]
    fn test_modified_time_is_formatted() {
        let when = chrono::Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let meta =
            ResourceMetaData::new(Url::parse("file:///srv/a.jar").unwrap()).with_last_modified(when);

        let rows = metadata_rows(&meta);

        assert!(rows.contains(&("Modified", "2024-03-01 12:30:00 UTC".to_string())));
    }
}
