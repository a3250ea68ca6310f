use crate::domain::model::{find_entry, FileEntry, HealthStatus, CONFIG_FILE_NAME};

/// 判斷資料夾清單是否為可用的簡報來源
///
/// 目前只檢查 presentation.json 是否存在，不驗證其結構。
pub fn evaluate(listing: &[FileEntry]) -> HealthStatus {
    if find_entry(listing, CONFIG_FILE_NAME).is_none() {
        return HealthStatus::missing_config();
    }
    HealthStatus::healthy()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> FileEntry {
        FileEntry::new(name, format!("https://raw.example/{}", name))
    }

    #[test]
    fn test_listing_with_config_is_healthy() {
        let status = evaluate(&[entry("slides.md"), entry("presentation.json")]);
        assert_eq!(status, HealthStatus::healthy());
        assert_eq!(status.message, "presentation ok");
    }

    #[test]
    fn test_listing_without_config_is_unhealthy() {
        let status = evaluate(&[entry("slides.md"), entry("template")]);
        assert!(!status.ok);
        assert!(status.code.is_none());
        assert_eq!(
            status.message,
            "presentation source missing required configuration document"
        );
    }

    #[test]
    fn test_name_match_is_case_sensitive() {
        assert!(!evaluate(&[entry("Presentation.JSON")]).ok);
        assert!(!evaluate(&[]).ok);
    }
}
