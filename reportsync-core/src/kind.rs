/// Closed classification of catalog item content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Unknown,
    Component,
    DataSource,
    Model,
    LinkedReport,
    Report,
    Resource,
    DataSet,
    Folder,
}

// One row per known kind: (kind, server type name, file extension, display name).
// Both mapping directions consult this table; `Unknown` is the default branch
// everywhere and has no row.
const KIND_TABLE: &[(ResourceKind, &str, &str, &str)] = &[
    (ResourceKind::Component, "Component", ".rdc", "Component"),
    (ResourceKind::DataSource, "DataSource", ".rds", "DataSource"),
    (ResourceKind::Model, "Model", ".rdm", "Model"),
    (ResourceKind::LinkedReport, "LinkedReport", ".rdr", "LinkedReport"),
    (ResourceKind::Report, "Report", ".rdl", "Report"),
    (ResourceKind::Resource, "Resource", ".rdx", "Resource"),
    (ResourceKind::DataSet, "DataSet", ".rsd", "DataSet"),
    (ResourceKind::Folder, "Folder", "", "Folder"),
];

impl ResourceKind {
    /// Maps a server-reported type name to a kind. Case-sensitive.
    pub fn from_type_name(name: &str) -> Self {
        KIND_TABLE
            .iter()
            .find(|(_, type_name, _, _)| *type_name == name)
            .map(|(kind, _, _, _)| *kind)
            .unwrap_or(ResourceKind::Unknown)
    }

    /// Maps a dotted file extension (".rdl") to a kind. Case-insensitive.
    pub fn from_extension(extension: &str) -> Self {
        let normalized = extension.to_ascii_lowercase();
        KIND_TABLE
            .iter()
            .find(|(_, _, ext, _)| !ext.is_empty() && *ext == normalized)
            .map(|(kind, _, _, _)| *kind)
            .unwrap_or(ResourceKind::Unknown)
    }

    /// The dotted file extension for this kind; empty for `Unknown` and `Folder`.
    pub fn extension(self) -> &'static str {
        KIND_TABLE
            .iter()
            .find(|(kind, _, _, _)| *kind == self)
            .map(|(_, _, ext, _)| *ext)
            .unwrap_or("")
    }

    /// Canonical label. Unknown kinds display as "Resource", matching the
    /// server's own listing behavior.
    pub fn display_name(self) -> &'static str {
        KIND_TABLE
            .iter()
            .find(|(kind, _, _, _)| *kind == self)
            .map(|(_, _, _, display)| *display)
            .unwrap_or("Resource")
    }

    pub fn is_downloadable(self) -> bool {
        !matches!(self, ResourceKind::Unknown | ResourceKind::Folder)
    }

    /// Kinds whose content is a textual definition document rather than an
    /// opaque payload.
    pub fn is_report_like(self) -> bool {
        matches!(
            self,
            ResourceKind::Report
                | ResourceKind::LinkedReport
                | ResourceKind::DataSet
                | ResourceKind::DataSource
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_row_round_trips_both_directions() {
        for (kind, type_name, extension, display) in KIND_TABLE {
            assert_eq!(ResourceKind::from_type_name(type_name), *kind);
            assert_eq!(kind.display_name(), *display);
            if extension.is_empty() {
                assert_eq!(kind.extension(), "");
            } else {
                assert_eq!(ResourceKind::from_extension(extension), *kind);
                assert_eq!(kind.extension(), *extension);
                assert_eq!(
                    ResourceKind::from_extension(kind.extension()),
                    *kind
                );
            }
        }
    }

    #[test]
    fn extension_lookup_is_case_insensitive() {
        assert_eq!(ResourceKind::from_extension(".RDL"), ResourceKind::Report);
        assert_eq!(ResourceKind::from_extension(".Rds"), ResourceKind::DataSource);
    }

    #[test]
    fn type_name_lookup_is_case_sensitive() {
        assert_eq!(ResourceKind::from_type_name("report"), ResourceKind::Unknown);
        assert_eq!(ResourceKind::from_type_name("Report"), ResourceKind::Report);
    }

    #[test]
    fn unmapped_values_fall_back_to_unknown() {
        assert_eq!(ResourceKind::from_extension(".txt"), ResourceKind::Unknown);
        assert_eq!(ResourceKind::from_extension(""), ResourceKind::Unknown);
        assert_eq!(ResourceKind::from_type_name("Unknown"), ResourceKind::Unknown);
    }

    #[test]
    fn unknown_displays_as_resource_and_has_no_extension() {
        assert_eq!(ResourceKind::Unknown.display_name(), "Resource");
        assert_eq!(ResourceKind::Unknown.extension(), "");
        assert_eq!(ResourceKind::Folder.extension(), "");
    }

    #[test]
    fn downloadable_excludes_unknown_and_folder() {
        assert!(!ResourceKind::Unknown.is_downloadable());
        assert!(!ResourceKind::Folder.is_downloadable());
        for kind in [
            ResourceKind::Component,
            ResourceKind::DataSource,
            ResourceKind::Model,
            ResourceKind::LinkedReport,
            ResourceKind::Report,
            ResourceKind::Resource,
            ResourceKind::DataSet,
        ] {
            assert!(kind.is_downloadable());
        }
    }

    #[test]
    fn report_like_set_covers_definition_kinds() {
        assert!(ResourceKind::Report.is_report_like());
        assert!(ResourceKind::LinkedReport.is_report_like());
        assert!(ResourceKind::DataSet.is_report_like());
        assert!(ResourceKind::DataSource.is_report_like());
        assert!(!ResourceKind::Resource.is_report_like());
        assert!(!ResourceKind::Component.is_report_like());
        assert!(!ResourceKind::Model.is_report_like());
    }
}
