use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Link value used by seed data when a project has nowhere to go yet.
pub const PLACEHOLDER_LINK: &str = "#";

/// Declared project category. Serialized names are snake_case
/// (`website`, `mobile_web_app`) to match the host page's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Website,
    MobileWebApp,
}

/// The two presenter variants. Resolved once per project so no
/// type-string comparison leaks into the presenters themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Laptop,
    Phone,
}

impl DeviceType {
    /// Websites are shown on the laptop, everything else on the phone.
    pub fn kind(self) -> DeviceKind {
        match self {
            DeviceType::Website => DeviceKind::Laptop,
            DeviceType::MobileWebApp => DeviceKind::Phone,
        }
    }
}

/// One immutable portfolio entry. Constructed once at startup and never
/// mutated; the registry owns these for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: u32,
    pub title: String,
    pub video_src: String,
    pub device_type: DeviceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_link: Option<String>,
}

impl ProjectRecord {
    /// Click-through target for the lit screen: repository first, live
    /// deployment second. The `"#"` placeholder counts as undefined.
    pub fn project_link(&self) -> Option<&str> {
        self.repo_link
            .as_deref()
            .or(self.live_link.as_deref())
            .filter(|link| !link.is_empty() && *link != PLACEHOLDER_LINK)
    }
}

/// Ordered, immutable project list.
///
/// Precondition: non-empty. The carousel index contract is undefined for
/// an empty registry, so this is asserted at construction rather than
/// checked at every read.
#[derive(Resource)]
pub struct ProjectRegistry {
    records: Vec<ProjectRecord>,
}

impl ProjectRegistry {
    pub fn new(records: Vec<ProjectRecord>) -> Self {
        debug_assert!(
            !records.is_empty(),
            "project registry must contain at least one record"
        );
        Self { records }
    }

    /// Compiled-in seed data.
    pub fn builtin() -> Self {
        Self::new(vec![
            ProjectRecord {
                id: 1,
                title: "A WhatsApp Message Viewer".to_string(),
                video_src: "videos/WhatsappViewerApp.mp4".to_string(),
                device_type: DeviceType::Website,
                description: None,
                tech_stack: Vec::new(),
                repo_link: Some(
                    "https://github.com/AQUIDHEAD/message-viewer-whatsapp".to_string(),
                ),
                live_link: None,
            },
            ProjectRecord {
                id: 2,
                title: "Task Manager Mobile App".to_string(),
                video_src: "videos/RunnerWalkerAppMobile.mp4".to_string(),
                device_type: DeviceType::MobileWebApp,
                description: Some("An App to track your running and walking.".to_string()),
                tech_stack: vec![
                    "React".to_string(),
                    "Firebase".to_string(),
                    "Expo".to_string(),
                ],
                repo_link: Some("https://gitlab.com/EGO1508/runner_walker_app_v1".to_string()),
                live_link: None,
            },
        ])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`. Callers hold the carousel invariant that the
    /// index is in range.
    pub fn get(&self, index: usize) -> &ProjectRecord {
        &self.records[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_is_non_empty() {
        let registry = ProjectRegistry::builtin();
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn device_types_resolve_to_expected_kinds() {
        assert_eq!(DeviceType::Website.kind(), DeviceKind::Laptop);
        assert_eq!(DeviceType::MobileWebApp.kind(), DeviceKind::Phone);
    }

    #[test]
    fn builtin_ids_are_unique_and_stable() {
        let registry = ProjectRegistry::builtin();
        let mut ids: Vec<u32> = (0..registry.len()).map(|i| registry.get(i).id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), registry.len());
    }

    #[test]
    fn project_link_prefers_repo_and_rejects_placeholder() {
        let mut record = ProjectRegistry::builtin().get(0).clone();
        record.repo_link = Some("https://example.com/repo".to_string());
        record.live_link = Some("https://example.com/live".to_string());
        assert_eq!(record.project_link(), Some("https://example.com/repo"));

        record.repo_link = None;
        assert_eq!(record.project_link(), Some("https://example.com/live"));

        record.live_link = Some(PLACEHOLDER_LINK.to_string());
        assert_eq!(record.project_link(), None);

        record.live_link = None;
        assert_eq!(record.project_link(), None);
    }

    #[test]
    fn device_type_serializes_snake_case() {
        let json = serde_json::to_string(&DeviceType::MobileWebApp).unwrap();
        assert_eq!(json, "\"mobile_web_app\"");
        let parsed: DeviceType = serde_json::from_str("\"website\"").unwrap();
        assert_eq!(parsed, DeviceType::Website);
    }
}
