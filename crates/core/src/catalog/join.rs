//! Joins categories with their notes and groups.
//!
//! Both joins keep the category order exactly as given. Missing notes and
//! dangling group references are normal and produce `null`, never an error.

use std::collections::HashMap;

use super::types::{Category, CategoryGroup, EnrichedCategory, Note};

fn index_notes(notes: Vec<Note>) -> HashMap<String, Option<String>> {
    let mut by_owner = HashMap::with_capacity(notes.len());
    for note in notes {
        // First note for an owner wins.
        by_owner.entry(note.owner_id).or_insert(note.text);
    }
    by_owner
}

/// Attaches each category's note text (or `None`).
#[must_use]
pub fn join_notes(categories: Vec<Category>, notes: Vec<Note>) -> Vec<EnrichedCategory> {
    let notes = index_notes(notes);
    categories
        .into_iter()
        .map(|category| EnrichedCategory {
            note: notes.get(&category.id).cloned().flatten(),
            category,
            category_group: None,
        })
        .collect()
}

/// Attaches each category's note text and its group (`null` when dangling).
#[must_use]
pub fn join_notes_and_groups(
    categories: Vec<Category>,
    notes: Vec<Note>,
    groups: Vec<CategoryGroup>,
) -> Vec<EnrichedCategory> {
    let groups: HashMap<String, CategoryGroup> = groups
        .into_iter()
        .map(|group| (group.id.clone(), group))
        .collect();

    join_notes(categories, notes)
        .into_iter()
        .map(|mut enriched| {
            let group = enriched
                .category
                .group_id
                .as_ref()
                .and_then(|id| groups.get(id))
                .cloned();
            enriched.category_group = Some(group);
            enriched
        })
        .collect()
}
