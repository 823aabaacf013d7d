//! Performance benchmarks for NotepadPro core operations
//!
//! Run with: `cargo bench -p notepad-core`
//!
//! These benchmarks measure the paths a view hits on every keystroke or
//! refresh, over a 1000-note store:
//! - Keyword search (case-insensitive and case-sensitive)
//! - Category filtering
//! - Save and load of the whole data file

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use notepad_core::{CaseSensitivity, NoteManager, NoteUpdate, StoreConfig};
use tempfile::TempDir;

const NOTE_COUNT: usize = 1000;
const CATEGORY_COUNT: usize = 20;

/// Build a store with `NOTE_COUNT` notes spread over `CATEGORY_COUNT` categories
fn populated_manager() -> NoteManager {
    let mut manager = NoteManager::new(StoreConfig::default());
    let categories: Vec<String> = (0..CATEGORY_COUNT)
        .map(|i| {
            manager
                .create_category(Some(&format!("Category {}", i)))
                .id()
                .to_string()
        })
        .collect();

    for i in 0..NOTE_COUNT {
        let id = manager
            .create_note(Some(&format!("Note {}", i)))
            .id()
            .to_string();
        let content = format!(
            "<p>Paragraph {} with <b>formatted</b> text about topic {}.</p><p>Second line.</p>",
            i,
            i % 37
        );
        manager.update_note(
            &id,
            NoteUpdate::new()
                .with_content(content)
                .with_category_id(categories[i % CATEGORY_COUNT].clone()),
        );
    }
    manager
}

fn bench_search(c: &mut Criterion) {
    let manager = populated_manager();

    c.bench_function("search_notes_insensitive_1000", |b| {
        b.iter(|| black_box(manager.search_notes(black_box("TOPIC 12"))).len())
    });

    c.bench_function("search_notes_sensitive_1000", |b| {
        b.iter(|| {
            black_box(manager.search_notes_with(black_box("topic 12"), CaseSensitivity::Sensitive))
                .len()
        })
    });
}

fn bench_category_filter(c: &mut Criterion) {
    let manager = populated_manager();
    let category = manager.get_all_categories()[0].id().to_string();

    c.bench_function("get_notes_by_category_1000", |b| {
        b.iter(|| black_box(manager.get_notes_by_category(black_box(&category))).len())
    });
}

fn bench_persistence(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bench.json");
    let mut manager = populated_manager();

    c.bench_function("save_to_file_1000", |b| {
        b.iter(|| manager.save_to_file(Some(black_box(path.as_path()))).unwrap())
    });

    manager.save_to_file(Some(&path)).unwrap();
    let mut target = NoteManager::new(StoreConfig::default());

    c.bench_function("load_from_file_1000", |b| {
        b.iter(|| target.load_from_file(Some(black_box(path.as_path()))).unwrap())
    });
}

criterion_group!(
    benches,
    bench_search,
    bench_category_filter,
    bench_persistence
);
criterion_main!(benches);
