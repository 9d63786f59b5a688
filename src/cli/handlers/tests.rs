use super::*;
use crate::cli::config::Config;
use crate::cli::{AddArgs, Cli, Command, ListArgs, UpdateArgs};
use crate::domain::{
    Bounds, NewNote, NoteFields, NoteUpdate, Ordering, PageRequest, SortField, TagDraft, TagId,
};
use crate::store::{NoteRepository, SqliteStore};
use clap::Parser;
use pretty_assertions::assert_eq;

// Test helpers
fn parse(argv: &[&str]) -> Command {
    let mut full = vec!["tango"];
    full.extend_from_slice(argv);
    Cli::try_parse_from(full).unwrap().command
}

fn list_args(argv: &[&str]) -> ListArgs {
    let mut full = vec!["ls"];
    full.extend_from_slice(argv);
    match parse(&full) {
        Command::List(args) => args,
        other => panic!("expected ls, got {:?}", other),
    }
}

fn add_args(argv: &[&str]) -> AddArgs {
    let mut full = vec!["add"];
    full.extend_from_slice(argv);
    match parse(&full) {
        Command::Add(args) => args,
        other => panic!("expected add, got {:?}", other),
    }
}

fn update_args(argv: &[&str]) -> UpdateArgs {
    let mut full = vec!["update"];
    full.extend_from_slice(argv);
    match parse(&full) {
        Command::Update(args) => args,
        other => panic!("expected update, got {:?}", other),
    }
}

fn store_with(words: &[(&str, &[&str])]) -> SqliteStore {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let notes = words
        .iter()
        .map(|(english, tags)| {
            let mut note = NewNote::new(NoteFields::new(*english, "語"));
            for tag in *tags {
                note = note.tag(*tag);
            }
            note
        })
        .collect();
    store.add_notes(notes).unwrap();
    store
}

// ===========================================
// build_query tests
// ===========================================

#[test]
fn build_query_without_flags_is_empty_criteria() {
    let (criteria, page) = build_query(&list_args(&[]), &Config::default()).unwrap();
    assert_eq!(criteria, crate::domain::Criteria::new());
    assert_eq!(page, PageRequest::default());
}

#[test]
fn build_query_maps_filters() {
    let args = list_args(&[
        "-s",
        "猫",
        "-t",
        "noun",
        "-t",
        "n5",
        "--played-from",
        "2024-03-01",
        "--rate-below",
        "0.5",
    ]);
    let (criteria, _) = build_query(&args, &Config::default()).unwrap();

    assert_eq!(criteria.search.as_deref(), Some("猫"));
    assert_eq!(criteria.tags, vec!["noun", "n5"]);
    assert!(criteria.played.start.is_some());
    assert!(criteria.played.end.is_none());
    assert_eq!(criteria.rate, Bounds::until(0.5));
}

#[test]
fn build_query_resolves_ordering() {
    let args = list_args(&["--sort", "played", "--desc"]);
    let (criteria, _) = build_query(&args, &Config::default()).unwrap();
    assert_eq!(criteria.ordering, Ordering::desc(SortField::Played));

    let args = list_args(&["--sort", "english", "--random"]);
    let (criteria, _) = build_query(&args, &Config::default()).unwrap();
    assert_eq!(criteria.ordering, Ordering::Random);

    let args = list_args(&["--sort", "difficulty"]);
    let (criteria, _) = build_query(&args, &Config::default()).unwrap();
    assert_eq!(criteria.ordering, Ordering::Unordered);
}

#[test]
fn build_query_rejects_bad_dates() {
    let err = build_query(&list_args(&["--played-until", "soon"]), &Config::default())
        .unwrap_err();
    assert!(err.to_string().contains("--played-until"));
}

#[test]
fn build_query_page_size_precedence() {
    let config = Config {
        database: None,
        page_size: Some(50),
    };

    let (_, page) = build_query(&list_args(&[]), &config).unwrap();
    assert_eq!(page.size(), 50);

    let (_, page) = build_query(&list_args(&["-n", "10", "-p", "2"]), &config).unwrap();
    assert_eq!((page.page(), page.size()), (2, 10));

    let (_, page) = build_query(&list_args(&["-n", "lots", "-p", "-3"]), &config).unwrap();
    assert_eq!((page.page(), page.size()), (1, 30));
}

// ===========================================
// add / update argument tests
// ===========================================

#[test]
fn new_note_from_args_fills_fields_and_tags() {
    let args = add_args(&["-e", "cat", "-j", "猫", "-D", "animal", "-t", " noun "]);
    let note = new_note_from_args(&args);
    assert_eq!(note.fields, NoteFields::new("cat", "猫").description("animal"));
    assert_eq!(note.tags, vec!["noun"]);
}

#[test]
fn update_from_args_replaces_tags_by_default() {
    let mut store = store_with(&[("cat", &["noun", "n5"])]);
    let current = store.read_notes(&Default::default(), PageRequest::default()).unwrap().items[0].clone();
    let keep = current.tags()[0].id();
    let renamed = format!("{}:animal", keep);

    let args = update_args(&["x", "-e", "kitty", "--tag-id", renamed.as_str(), "-t", "cute"]);
    let update = update_from_args(&args, &current);

    assert_eq!(update.fields, NoteFields::new("kitty", ""));
    assert_eq!(update.tags.len(), 2);
    assert_eq!(update.tags[0].id, Some(keep));
    assert_eq!(update.tags[0].name, "animal");
    assert_eq!(update.tags[1].id, None);

    let updated = store.update_notes(vec![update]).unwrap().remove(0);
    let names: Vec<&str> = updated.tag_names();
    assert_eq!(names, vec!["animal", "cute"]);
    assert_eq!(updated.tags()[0].id(), keep);
}

#[test]
fn update_from_args_keep_tags_carries_current_tags() {
    let store = store_with(&[("cat", &["noun"])]);
    let current = store.read_notes(&Default::default(), PageRequest::default()).unwrap().items[0].clone();

    let args = update_args(&["x", "-e", "cat", "--keep-tags", "-t", "n5"]);
    let update = update_from_args(&args, &current);

    let ids: Vec<Option<TagId>> = update.tags.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![Some(current.tags()[0].id()), None]);
}

#[test]
fn add_and_update_read_tag_names_the_same_way() {
    let add = add_args(&["-e", "meeting", "-j", "会議", "-t", "10:30", "-t", "jlpt:n3"]);
    let note = new_note_from_args(&add);
    assert_eq!(note.tags, vec!["10:30", "jlpt:n3"]);

    let mut store = SqliteStore::open_in_memory().unwrap();
    let current = store.add_notes(vec![note]).unwrap().remove(0);

    let args = update_args(&["x", "-e", "meeting", "-t", "10:30"]);
    let update = update_from_args(&args, &current);
    assert_eq!(update.tags, vec![TagDraft::new("10:30")]);

    let updated = store.update_notes(vec![update]).unwrap().remove(0);
    assert_eq!(updated.tag_names(), vec!["10:30"]);
}

#[test]
fn add_rejects_empty_tag_name() {
    let argv = ["tango", "add", "-e", "cat", "-j", "猫", "-t", "  "];
    let err = Cli::try_parse_from(argv).unwrap_err();
    assert!(err.to_string().contains("tag name cannot be empty"));
}

#[test]
fn update_tag_id_with_colon_in_name() {
    let store = store_with(&[("cat", &["time"])]);
    let current = store.read_notes(&Default::default(), PageRequest::default()).unwrap().items[0].clone();
    let id = current.tags()[0].id();
    let arg = format!("{}:10:30", id);

    let update = update_from_args(&update_args(&["x", "--tag-id", arg.as_str()]), &current);
    assert_eq!(update.tags, vec![TagDraft::existing(id, "10:30")]);
}

// ===========================================
// resolve_note tests
// ===========================================

#[test]
fn resolve_by_full_id_and_prefix() {
    let store = store_with(&[("cat", &[])]);
    let note = store.read_notes(&Default::default(), PageRequest::default()).unwrap().items[0].clone();

    match resolve_note(&store, &note.id().to_string()).unwrap() {
        ResolveResult::Unique(found) => assert_eq!(found.id(), note.id()),
        other => panic!("expected unique, got {:?}", other),
    }
    match resolve_note(&store, &note.id().short().to_lowercase()).unwrap() {
        ResolveResult::Unique(found) => assert_eq!(found.id(), note.id()),
        other => panic!("expected unique, got {:?}", other),
    }
}

#[test]
fn resolve_unknown_or_short_identifier_is_not_found() {
    let store = store_with(&[("cat", &[])]);
    let missing = crate::domain::NoteId::new();

    assert!(matches!(
        resolve_note(&store, &missing.to_string()).unwrap(),
        ResolveResult::NotFound
    ));
    assert!(matches!(
        resolve_note(&store, "01").unwrap(),
        ResolveResult::NotFound
    ));
    assert!(matches!(
        resolve_note(&store, "not an id").unwrap(),
        ResolveResult::NotFound
    ));
}

#[test]
fn resolve_shared_prefix_is_ambiguous() {
    let store = store_with(&[("a", &[]), ("b", &[])]);
    let notes = store.read_notes(&Default::default(), PageRequest::default()).unwrap().items;
    let a = notes[0].id().to_string();
    let b = notes[1].id().to_string();

    let common = a
        .chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .count();
    if common >= 4 {
        let prefix = &a[..common];
        assert!(matches!(
            resolve_note(&store, prefix).unwrap(),
            ResolveResult::Ambiguous(found) if found.len() == 2
        ));
    }
}

// ===========================================
// input and formatting helpers
// ===========================================

#[test]
fn parse_json_input_reads_new_notes() {
    let notes: Vec<NewNote> = parse_json_input(
        r#"[{"english": "cat", "japanese": "猫", "tags": ["noun"]}, {"english": "dog"}]"#,
    )
    .unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].tags, vec!["noun"]);
    assert_eq!(notes[1].fields.japanese, "");
}

#[test]
fn parse_json_input_reads_updates_with_tag_ids() {
    let updates: Vec<NoteUpdate> = parse_json_input(
        r#"[{"id": "01HQ3K5M7NXJK4QZPW8V2R6T9Y", "english": "cat",
             "tags": [{"id": 4, "name": "noun"}, {"name": "n5"}]}]"#,
    )
    .unwrap();
    assert_eq!(updates[0].tags[0].id, Some(TagId::new(4)));
    assert_eq!(updates[0].tags[1].id, None);
}

#[test]
fn parse_json_input_rejects_objects() {
    assert!(parse_json_input::<NewNote>(r#"{"english": "cat"}"#).is_err());
}

#[test]
fn truncate_str_shortens_long_text() {
    assert_eq!(truncate_str("short", 10), "short");
    assert_eq!(truncate_str("abcdefghijkl", 5), "abcd…");
    assert_eq!(truncate_str("first\nsecond", 20), "first");
}
