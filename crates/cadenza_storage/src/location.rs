//! Artifact addressing.

/// Addressing record for a new artifact.
///
/// Mirrors the host file API: artifacts belong to a context, are owned by a
/// component, live in a named file area, and sit at a path + filename
/// within it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactLocation {
    /// Owning context identity.
    pub context_id: i64,
    /// Component that owns the file area.
    pub component: String,
    /// File area name, e.g. `generatedaudio` or `draft`.
    pub file_area: String,
    /// Item id within the area.
    pub item_id: i64,
    /// Directory path within the area. Always starts and ends with `/`.
    pub file_path: String,
    /// Filename within the path.
    pub filename: String,
}

impl ArtifactLocation {
    /// Create a location record.
    pub fn new(
        context_id: i64,
        component: impl Into<String>,
        file_area: impl Into<String>,
        item_id: i64,
        file_path: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            context_id,
            component: component.into(),
            file_area: file_area.into(),
            item_id,
            file_path: file_path.into(),
            filename: filename.into(),
        }
    }
}
