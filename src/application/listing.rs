use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::file_record::FileRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Size,
    Status,
    #[default]
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// A requested view over a fetched snapshot: case-insensitive substring search
/// against title or file name, plus one sort field and direction. The default
/// view is newest first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileQuery {
    pub search: Option<String>,
    #[serde(default)]
    pub sort: SortField,
    #[serde(default)]
    pub order: SortOrder,
}

impl FileQuery {
    /// Derives the filtered, sorted view. The snapshot itself is never
    /// mutated; records are cloned into the view in display order.
    pub fn apply(&self, records: &[FileRecord]) -> Vec<FileRecord> {
        let mut view: Vec<FileRecord> = match self.search.as_deref() {
            Some(term) if !term.trim().is_empty() => {
                let needle = term.trim().to_lowercase();
                records
                    .iter()
                    .filter(|r| {
                        r.file_name.to_lowercase().contains(&needle)
                            || r.title
                                .as_deref()
                                .is_some_and(|t| t.to_lowercase().contains(&needle))
                    })
                    .cloned()
                    .collect()
            }
            _ => records.to_vec(),
        };

        view.sort_by(|a, b| {
            let ordering = compare(a, b, self.sort);
            match self.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        view
    }

    /// Clicking a column header: same field flips the direction, a new field
    /// starts ascending.
    pub fn toggle(&mut self, field: SortField) {
        if self.sort == field {
            self.order = self.order.flipped();
        } else {
            self.sort = field;
            self.order = SortOrder::Asc;
        }
    }
}

fn compare(a: &FileRecord, b: &FileRecord, field: SortField) -> Ordering {
    match field {
        SortField::Name => a
            .file_name
            .to_lowercase()
            .cmp(&b.file_name.to_lowercase()),
        SortField::Size => a.byte_size.cmp(&b.byte_size),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

/// Events that move the local list state forward. Only successful remote
/// outcomes produce an event; a failed remote call produces none, which is
/// exactly how "leave local state unchanged on failure" falls out.
#[derive(Debug, Clone)]
pub enum FileListEvent {
    Loaded(Vec<FileRecord>),
    Uploaded(FileRecord),
    Removed(Vec<Uuid>),
    Renamed { id: Uuid, title: String },
    ToggleSelected(Uuid),
    SelectAllFiltered(FileQuery),
    ClearSelection,
}

/// The fetched snapshot plus the selection set, advanced one event at a time.
///
/// Selection is independent of whatever view is currently derived, except that
/// select-all deliberately covers only the filtered view it was issued
/// against.
#[derive(Debug, Clone, Default)]
pub struct FileListState {
    pub files: Vec<FileRecord>,
    pub selected: HashSet<Uuid>,
}

impl FileListState {
    pub fn apply(&mut self, event: FileListEvent) {
        match event {
            FileListEvent::Loaded(files) => {
                self.files = files;
                self.selected.retain(|id| self.files.iter().any(|f| f.id == *id));
            }
            FileListEvent::Uploaded(record) => {
                self.files.insert(0, record);
            }
            FileListEvent::Removed(ids) => {
                self.files.retain(|f| !ids.contains(&f.id));
                for id in &ids {
                    self.selected.remove(id);
                }
            }
            FileListEvent::Renamed { id, title } => {
                if let Some(record) = self.files.iter_mut().find(|f| f.id == id) {
                    record.title = Some(title);
                }
            }
            FileListEvent::ToggleSelected(id) => {
                if !self.selected.remove(&id) {
                    self.selected.insert(id);
                }
            }
            FileListEvent::SelectAllFiltered(query) => {
                let visible: HashSet<Uuid> =
                    query.apply(&self.files).iter().map(|f| f.id).collect();
                if self.selected == visible {
                    self.selected.clear();
                } else {
                    self.selected = visible;
                }
            }
            FileListEvent::ClearSelection => self.selected.clear(),
        }
    }
}
