mod common;

use common::init_tracing;
use feed_reader::{FeedRecord, FeedRegistry, Result};
use std::fs;
use tempfile::TempDir;
use tracing::info;

fn store_in(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("feed_urls.txt")
}

#[test]
fn test_missing_store_loads_empty() -> Result<()> {
    init_tracing();
    let dir = TempDir::new()?;

    let registry = FeedRegistry::open(store_in(&dir))?;
    assert!(registry.records().is_empty());
    assert!(registry.skipped().is_empty());
    assert!(FeedRegistry::load(store_in(&dir))?.is_empty());
    Ok(())
}

#[test]
fn test_save_load_round_trip() -> Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    let path = store_in(&dir);

    let mut registry = FeedRegistry::open(&path)?;
    registry.add_feed("https://news.example.com/rss", "Example News", "News")?;
    registry.add_feed("https://blog.example.org/atom.xml", "A Blog", "Tech")?;
    registry.add_feed("https://news.example.com/rss", "Example News again", "Tech")?;
    registry.add_category("Empty")?;

    let loaded = FeedRegistry::load(&path)?;
    info!("Reloaded {} records", loaded.len());
    assert_eq!(loaded, registry.records(), "round trip must keep records and order");
    assert_eq!(
        fs::read_to_string(&path)?,
        "https://news.example.com/rss|Example News|News\n\
         https://blog.example.org/atom.xml|A Blog|Tech\n\
         https://news.example.com/rss|Example News again|Tech\n\
         ||Empty\n"
    );
    Ok(())
}

#[test]
fn test_malformed_lines_are_skipped() -> Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    let path = store_in(&dir);
    fs::write(
        &path,
        "https://a.example/rss|A|News\n\
         https://legacy.example/rss|Legacy feed\n\
         \n\
         https://b.example/rss|B|Tech|extra\n\
         https://c.example/rss|C|Tech\n",
    )?;

    let registry = FeedRegistry::open(&path)?;

    assert_eq!(
        registry.records(),
        &[
            FeedRecord::new("https://a.example/rss", "A", "News"),
            FeedRecord::new("https://c.example/rss", "C", "Tech"),
        ]
    );
    let skipped: Vec<(usize, usize)> = registry.skipped().iter().map(|s| (s.line_number, s.field_count)).collect();
    assert_eq!(skipped, vec![(2, 2), (4, 4)]);
    Ok(())
}

#[test]
fn test_remove_category_empties_store() -> Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    let path = store_in(&dir);

    let mut registry = FeedRegistry::open(&path)?;
    registry.add_feed("http://a", "A", "News")?;
    let removed = registry.remove_category("News")?;

    assert_eq!(removed, 1);
    assert!(registry.records().is_empty());
    assert_eq!(fs::read_to_string(&path)?, "", "persisted store must be an empty file");
    Ok(())
}

#[test]
fn test_add_category_is_idempotent() -> Result<()> {
    let dir = TempDir::new()?;
    let mut registry = FeedRegistry::open(store_in(&dir))?;

    assert!(registry.add_category("Sports")?);
    assert!(!registry.add_category("Sports")?, "existing category is a no-op");
    assert!(!registry.add_category("   ")?, "blank name is ignored");
    assert!(registry.add_category("sports")?, "category match is case-sensitive");

    let groups = registry.categories();
    assert_eq!(groups.len(), 2);
    assert!(groups.iter().all(|g| g.feeds.is_empty()), "placeholders are not listed as feeds");
    Ok(())
}

#[test]
fn test_adding_feed_replaces_placeholder() -> Result<()> {
    let dir = TempDir::new()?;
    let mut registry = FeedRegistry::open(store_in(&dir))?;

    registry.add_category("World")?;
    registry.add_feed("https://world.example/rss", "World Desk", "World")?;

    assert_eq!(registry.records(), &[FeedRecord::new("https://world.example/rss", "World Desk", "World")]);
    Ok(())
}

#[test]
fn test_edit_and_remove_feed() -> Result<()> {
    let dir = TempDir::new()?;
    let path = store_in(&dir);
    let mut registry = FeedRegistry::open(&path)?;

    registry.add_feed("https://old.example/rss", "Old", "News")?;
    registry.add_feed("https://other.example/rss", "Other", "News")?;

    let updated = registry.edit_feed("https://old.example/rss", "https://new.example/rss", "New")?;
    assert_eq!(updated, 1);
    assert_eq!(
        registry.find_by_url("https://new.example/rss"),
        Some(&FeedRecord::new("https://new.example/rss", "New", "News")),
        "edit keeps the category"
    );
    assert!(registry.find_by_url("https://old.example/rss").is_none());
    assert_eq!(registry.edit_feed("https://missing.example/rss", "x", "y")?, 0);

    assert_eq!(registry.remove_feed("https://other.example/rss")?, 1);
    assert_eq!(FeedRegistry::load(&path)?, vec![FeedRecord::new("https://new.example/rss", "New", "News")]);
    Ok(())
}

#[test]
fn test_rename_category() -> Result<()> {
    let dir = TempDir::new()?;
    let mut registry = FeedRegistry::open(store_in(&dir))?;

    registry.add_feed("https://a.example/rss", "A", "Tech")?;
    registry.add_feed("https://b.example/rss", "B", "News")?;
    registry.add_feed("https://c.example/rss", "C", "Tech")?;

    assert_eq!(registry.rename_category("Tech", " Technology ")?, 2);
    assert_eq!(registry.rename_category("News", "")?, 0, "empty name is ignored");
    assert_eq!(registry.rename_category("News", "News")?, 0, "same name is ignored");

    let names: Vec<String> = registry.categories().into_iter().map(|g| g.name).collect();
    assert_eq!(names, vec!["Technology", "News"]);
    Ok(())
}

#[test]
fn test_categories_group_in_first_seen_order() -> Result<()> {
    let dir = TempDir::new()?;
    let mut registry = FeedRegistry::open(store_in(&dir))?;

    registry.add_feed("https://1.example/rss", "One", "B")?;
    registry.add_feed("https://2.example/rss", "Two", "A")?;
    registry.add_feed("https://3.example/rss", "Three", "B")?;

    let groups = registry.categories();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].name, "B");
    assert_eq!(
        groups[0].feeds.iter().map(|f| f.description.as_str()).collect::<Vec<_>>(),
        vec!["One", "Three"]
    );
    assert_eq!(groups[1].name, "A");
    Ok(())
}
