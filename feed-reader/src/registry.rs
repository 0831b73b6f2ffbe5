use crate::types::{CategoryGroup, FeedRecord, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const FIELD_DELIMITER: char = '|';

/// A store line that did not decode to exactly three fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_number: usize,
    pub content: String,
    pub field_count: usize,
}

/// Feed subscriptions backed by a `url|description|category` text file.
///
/// Every mutation rewrites the whole file.
pub struct FeedRegistry {
    path: PathBuf,
    records: Vec<FeedRecord>,
    skipped: Vec<SkippedLine>,
}

impl FeedRegistry {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let (records, skipped) = read_store(&path)?;

        info!("Loaded {} feed records from {}", records.len(), path.display());

        Ok(Self { path, records, skipped })
    }

    /// Read the records persisted at `path`. Lines that don't have exactly three
    /// fields, legacy `url|description` lines included, are skipped and logged.
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<FeedRecord>> {
        read_store(path.as_ref()).map(|(records, _)| records)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[FeedRecord] {
        &self.records
    }

    /// Lines skipped by the last load.
    pub fn skipped(&self) -> &[SkippedLine] {
        &self.skipped
    }

    pub fn find_by_url(&self, url: &str) -> Option<&FeedRecord> {
        self.records.iter().find(|r| !r.is_placeholder() && r.url == url)
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.records.iter().any(|r| r.category == name)
    }

    /// Group records by category, categories in first-seen order.
    pub fn categories(&self) -> Vec<CategoryGroup> {
        let mut groups: Vec<CategoryGroup> = Vec::new();

        for record in &self.records {
            let index = match groups.iter().position(|g| g.name == record.category) {
                Some(index) => index,
                None => {
                    groups.push(CategoryGroup {
                        name: record.category.clone(),
                        feeds: Vec::new(),
                    });
                    groups.len() - 1
                }
            };

            if !record.is_placeholder() {
                groups[index].feeds.push(record.clone());
            }
        }

        groups
    }

    /// Overwrite the store with the in-memory records.
    pub fn save(&self) -> Result<()> {
        let mut contents = String::new();
        for record in &self.records {
            contents.push_str(&record.url);
            contents.push(FIELD_DELIMITER);
            contents.push_str(&record.description);
            contents.push(FIELD_DELIMITER);
            contents.push_str(&record.category);
            contents.push('\n');
        }

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &self.path)?;

        debug!("Saved {} feed records to {}", self.records.len(), self.path.display());
        Ok(())
    }

    pub fn add_feed(&mut self, url: &str, description: &str, category: &str) -> Result<()> {
        // A real feed makes the placeholder redundant
        self.records.retain(|r| !(r.is_placeholder() && r.category == category));
        self.records.push(FeedRecord::new(url, description, category));
        info!("Added feed {} to category {}", url, category);
        self.save()
    }

    /// Rewrite url and description of every record matching `old_url`.
    pub fn edit_feed(&mut self, old_url: &str, new_url: &str, new_description: &str) -> Result<usize> {
        let mut updated = 0;
        for record in self.records.iter_mut().filter(|r| !r.is_placeholder() && r.url == old_url) {
            record.url = new_url.to_string();
            record.description = new_description.to_string();
            updated += 1;
        }

        if updated == 0 {
            warn!("No feed with url {} to edit", old_url);
        }
        self.save()?;
        Ok(updated)
    }

    pub fn remove_feed(&mut self, url: &str) -> Result<usize> {
        let before = self.records.len();
        self.records.retain(|r| r.is_placeholder() || r.url != url);
        let removed = before - self.records.len();

        info!("Removed {} record(s) for feed {}", removed, url);
        self.save()?;
        Ok(removed)
    }

    /// Returns false when the category already exists or the name is blank.
    pub fn add_category(&mut self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() || self.has_category(name) {
            debug!("Category {:?} not added", name);
            return Ok(false);
        }

        self.records.push(FeedRecord::placeholder(name));
        info!("Added category {}", name);
        self.save()?;
        Ok(true)
    }

    pub fn rename_category(&mut self, old: &str, new: &str) -> Result<usize> {
        let new = new.trim();
        if new.is_empty() || new == old {
            return Ok(0);
        }

        let mut renamed = 0;
        for record in self.records.iter_mut().filter(|r| r.category == old) {
            record.category = new.to_string();
            renamed += 1;
        }

        info!("Renamed category {} to {} ({} records)", old, new, renamed);
        self.save()?;
        Ok(renamed)
    }

    pub fn remove_category(&mut self, name: &str) -> Result<usize> {
        let before = self.records.len();
        self.records.retain(|r| r.category != name);
        let removed = before - self.records.len();

        info!("Removed category {} ({} records)", name, removed);
        self.save()?;
        Ok(removed)
    }
}

fn read_store(path: &Path) -> Result<(Vec<FeedRecord>, Vec<SkippedLine>)> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No feed store at {}, starting empty", path.display());
            return Ok((Vec::new(), Vec::new()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        match fields.as_slice() {
            [url, description, category] => records.push(FeedRecord::new(*url, *description, *category)),
            _ => {
                warn!(
                    "Skipping malformed line {} in {}: expected 3 fields, found {}",
                    index + 1,
                    path.display(),
                    fields.len()
                );
                skipped.push(SkippedLine {
                    line_number: index + 1,
                    content: line.to_string(),
                    field_count: fields.len(),
                });
            }
        }
    }

    Ok((records, skipped))
}
