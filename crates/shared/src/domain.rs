use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExhibitionStatus {
    Open,
    Closed,
    Confirmed,
    #[default]
    #[serde(other)]
    Other,
}

/// One exhibition as returned by the remote search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhibitionRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub gallery_title: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "status_or_other")]
    pub status: ExhibitionStatus,
}

/// A `null` status is shown like any other unmarked row.
fn status_or_other<'de, D>(deserializer: D) -> Result<ExhibitionStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ExhibitionStatus>::deserialize(deserializer)?.unwrap_or_default())
}

/// Field names requested from the index, in column order.
pub const EXHIBITION_FIELDS: [&str; 6] = [
    "title",
    "is_featured",
    "description",
    "gallery_title",
    "type",
    "status",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Title,
    Description,
    GalleryTitle,
    IsFeatured,
    #[serde(rename = "type")]
    Kind,
}

impl SortField {
    pub fn wire_name(self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Description => "description",
            SortField::GalleryTitle => "gallery_title",
            SortField::IsFeatured => "is_featured",
            SortField::Kind => "type",
        }
    }

    /// Sub-field the index can actually sort on.
    pub fn sortable_name(self) -> String {
        match self {
            SortField::Title => format!("{}.keyword", self.wire_name()),
            SortField::Description => format!("{}.text", self.wire_name()),
            _ => self.wire_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Table columns a user can click to sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnId {
    Title,
    Description,
    Gallery,
    Featured,
    Kind,
}

impl ColumnId {
    pub const ALL: [ColumnId; 5] = [
        ColumnId::Title,
        ColumnId::Description,
        ColumnId::Gallery,
        ColumnId::Featured,
        ColumnId::Kind,
    ];

    pub fn heading(self) -> &'static str {
        match self {
            ColumnId::Title => "Title",
            ColumnId::Description => "Description",
            ColumnId::Gallery => "Gallery",
            ColumnId::Featured => "Featured",
            ColumnId::Kind => "Type of Exhibition",
        }
    }

    pub fn from_heading(heading: &str) -> Option<Self> {
        let wanted = heading.trim();
        Self::ALL
            .into_iter()
            .find(|column| column.heading().eq_ignore_ascii_case(wanted))
    }

    /// Field the column is sorted by. Description and gallery have no
    /// sortable backing field and borrow title and type respectively.
    pub fn sort_field(self) -> SortField {
        match self {
            ColumnId::Title | ColumnId::Description => SortField::Title,
            ColumnId::Gallery | ColumnId::Kind => SortField::Kind,
            ColumnId::Featured => SortField::IsFeatured,
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_record_with_nulls_and_unknown_status() {
        let record: ExhibitionRecord = serde_json::from_str(
            r#"{"title":null,"is_featured":true,"description":null,
                "gallery_title":"Gallery 182","type":"AIC Only","status":"Postponed"}"#,
        )
        .expect("decode");

        assert_eq!(record.title, None);
        assert!(record.is_featured);
        assert_eq!(record.gallery_title.as_deref(), Some("Gallery 182"));
        assert_eq!(record.kind.as_deref(), Some("AIC Only"));
        assert_eq!(record.status, ExhibitionStatus::Other);
    }

    #[test]
    fn null_status_decodes_as_other() {
        let record: ExhibitionRecord = serde_json::from_str(
            r#"{"title":"Monet","is_featured":false,"description":null,
                "gallery_title":null,"type":null,"status":null}"#,
        )
        .expect("decode");
        assert_eq!(record.status, ExhibitionStatus::Other);

        let missing: ExhibitionRecord =
            serde_json::from_str(r#"{"title":"Monet"}"#).expect("decode");
        assert_eq!(missing.status, ExhibitionStatus::Other);

        let closed: ExhibitionRecord =
            serde_json::from_str(r#"{"status":"Closed"}"#).expect("decode");
        assert_eq!(closed.status, ExhibitionStatus::Closed);
    }

    #[test]
    fn sortable_names_use_index_sub_fields() {
        assert_eq!(SortField::Title.sortable_name(), "title.keyword");
        assert_eq!(SortField::Description.sortable_name(), "description.text");
        assert_eq!(SortField::IsFeatured.sortable_name(), "is_featured");
        assert_eq!(SortField::Kind.sortable_name(), "type");
    }

    #[test]
    fn unsortable_columns_fall_back() {
        assert_eq!(ColumnId::Description.sort_field(), SortField::Title);
        assert_eq!(ColumnId::Gallery.sort_field(), SortField::Kind);
        assert_eq!(ColumnId::Featured.sort_field(), SortField::IsFeatured);
    }

    #[test]
    fn headings_resolve_case_insensitively() {
        assert_eq!(
            ColumnId::from_heading("type of exhibition"),
            Some(ColumnId::Kind)
        );
        assert_eq!(ColumnId::from_heading(" Gallery "), Some(ColumnId::Gallery));
        assert_eq!(ColumnId::from_heading("status"), None);
    }
}
