use super::*;
use crate::kernel::services::adapters::{
    MemoryDocumentStore, MemorySettings, PromptCall, ScriptedPrompt,
};
use crate::kernel::services::ports::{
    DiskChangeChoice, FileError, OverwriteChoice, SaveChoice, SaveReason, SHELL_CONFIG,
};
use crate::kernel::{BatchResult, CloseResult, DiskState, ExitDecision, SaveResult};
use serde_json::json;

type TestShell = Shell<ScriptedPrompt, MemoryDocumentStore>;

fn shell_with(prompt: ScriptedPrompt, store: MemoryDocumentStore) -> TestShell {
    let mut shell = Shell::new(prompt, store, Box::new(MemorySettings::new()));
    shell.open_startup(&[], Path::new("/work")).unwrap();
    shell
}

fn shell_with_files(
    prompt: ScriptedPrompt,
    store: MemoryDocumentStore,
    files: &[&str],
) -> TestShell {
    let mut shell = Shell::new(prompt, store, Box::new(MemorySettings::new()));
    let paths: Vec<PathBuf> = files.iter().map(PathBuf::from).collect();
    shell.open_startup(&paths, Path::new("/work")).unwrap();
    shell
}

fn first_group(shell: &TestShell) -> GroupId {
    shell.views().group_at(0).unwrap().id
}

fn make_dirty(shell: &mut TestShell, group: GroupId, index: usize) {
    shell.insert_text(group, index, "edit").unwrap();
}

fn tab_titles(shell: &TestShell, group: GroupId) -> Vec<String> {
    shell
        .views()
        .group(group)
        .unwrap()
        .documents()
        .iter()
        .map(|doc| doc.title().to_string())
        .collect()
}

#[test]
fn clean_tab_closes_without_asking() {
    let store = MemoryDocumentStore::new()
        .with_file("/work/a.txt", "a")
        .with_file("/work/b.txt", "b");
    let mut shell = shell_with_files(ScriptedPrompt::new(), store, &["a.txt", "b.txt"]);
    let group = first_group(&shell);

    let result = shell.close_tab(group, 0, true, false).unwrap();

    assert_eq!(result, CloseResult::AlreadyClean);
    assert!(shell.prompt().calls().is_empty());
    assert_eq!(tab_titles(&shell, group), vec!["b.txt"]);
}

#[test]
fn cancel_leaves_dirty_tab_untouched() {
    let store = MemoryDocumentStore::new()
        .with_file("/work/a.txt", "a")
        .with_file("/work/b.txt", "b");
    let prompt = ScriptedPrompt::new().save_choice(SaveChoice::Cancel);
    let mut shell = shell_with_files(prompt, store, &["a.txt", "b.txt"]);
    let group = first_group(&shell);
    make_dirty(&mut shell, group, 0);

    let result = shell.close_tab(group, 0, true, false).unwrap();

    assert_eq!(result, CloseResult::Canceled);
    assert_eq!(tab_titles(&shell, group), vec!["a.txt", "b.txt"]);
    assert!(!shell.document(group, 0).unwrap().is_clean());
    assert!(shell.document(group, 1).unwrap().is_clean());
    assert_eq!(
        shell.prompt().calls(),
        &[PromptCall::SaveChoice {
            name: "a.txt".to_string(),
            reason: SaveReason::TabClosing,
        }]
    );
    assert!(shell.store().writes().is_empty());
}

#[test]
fn closing_dirty_tab_focuses_it_before_asking() {
    let store = MemoryDocumentStore::new()
        .with_file("/work/a.txt", "a")
        .with_file("/work/b.txt", "b");
    let prompt = ScriptedPrompt::new().save_choice(SaveChoice::Cancel);
    let mut shell = shell_with_files(prompt, store, &["a.txt", "b.txt"]);
    let group = first_group(&shell);
    make_dirty(&mut shell, group, 0);
    assert_eq!(shell.current(), Some((group, 1)));

    shell.close_tab(group, 0, true, false).unwrap();

    assert_eq!(shell.current(), Some((group, 0)));
}

#[test]
fn pristine_last_tab_is_kept() {
    let mut shell = shell_with(ScriptedPrompt::new(), MemoryDocumentStore::new());
    let group = first_group(&shell);
    let before = shell.document(group, 0).unwrap().id;

    let result = shell.close_tab(group, 0, true, false).unwrap();

    assert_eq!(result, CloseResult::AlreadyClean);
    assert_eq!(shell.views().len(), 1);
    assert_eq!(shell.views().total_tabs(), 1);
    assert_eq!(shell.document(group, 0).unwrap().id, before);
    assert!(shell.prompt().calls().is_empty());
}

#[test]
fn discard_closes_without_writing() {
    let store = MemoryDocumentStore::new()
        .with_file("/work/a.txt", "a")
        .with_file("/work/b.txt", "b");
    let prompt = ScriptedPrompt::new().save_choice(SaveChoice::Discard);
    let mut shell = shell_with_files(prompt, store, &["a.txt", "b.txt"]);
    let group = first_group(&shell);
    make_dirty(&mut shell, group, 1);

    let result = shell.close_tab(group, 1, true, false).unwrap();

    assert_eq!(result, CloseResult::DiscardedThenClosed);
    assert_eq!(tab_titles(&shell, group), vec!["a.txt"]);
    assert!(shell.store().writes().is_empty());
    assert_eq!(shell.store().content(Path::new("/work/b.txt")), Some("b"));
}

#[test]
fn save_choice_writes_then_closes() {
    let store = MemoryDocumentStore::new()
        .with_file("/work/a.txt", "a")
        .with_file("/work/b.txt", "b");
    let prompt = ScriptedPrompt::new().save_choice(SaveChoice::Save);
    let mut shell = shell_with_files(prompt, store, &["a.txt", "b.txt"]);
    let group = first_group(&shell);
    make_dirty(&mut shell, group, 0);

    let result = shell.close_tab(group, 0, true, false).unwrap();

    assert_eq!(result, CloseResult::SavedThenClosed);
    assert_eq!(tab_titles(&shell, group), vec!["b.txt"]);
    assert_eq!(shell.store().content(Path::new("/work/a.txt")), Some("aedit"));
}

#[test]
fn validation_pass_decides_without_detaching() {
    let store = MemoryDocumentStore::new()
        .with_file("/work/a.txt", "a")
        .with_file("/work/b.txt", "b");
    let prompt = ScriptedPrompt::new().save_choice(SaveChoice::Discard);
    let mut shell = shell_with_files(prompt, store, &["a.txt", "b.txt"]);
    let group = first_group(&shell);
    make_dirty(&mut shell, group, 0);

    let result = shell.close_tab(group, 0, false, false).unwrap();

    assert_eq!(result, CloseResult::DiscardedThenClosed);
    assert_eq!(tab_titles(&shell, group), vec!["a.txt", "b.txt"]);
}

#[test]
fn force_discards_without_asking() {
    let store = MemoryDocumentStore::new()
        .with_file("/work/a.txt", "a")
        .with_file("/work/b.txt", "b");
    let mut shell = shell_with_files(ScriptedPrompt::new(), store, &["a.txt", "b.txt"]);
    let group = first_group(&shell);
    make_dirty(&mut shell, group, 0);

    let result = shell.close_tab(group, 0, true, true).unwrap();

    assert_eq!(result, CloseResult::DiscardedThenClosed);
    assert!(shell.prompt().calls().is_empty());
    assert_eq!(tab_titles(&shell, group), vec!["b.txt"]);
}

#[test]
fn untitled_save_with_dismissed_dialog_cancels_close() {
    let prompt = ScriptedPrompt::new()
        .save_choice(SaveChoice::Save)
        .save_path("");
    let mut shell = shell_with(prompt, MemoryDocumentStore::new());
    let group = first_group(&shell);
    make_dirty(&mut shell, group, 0);
    assert_eq!(shell.document(group, 0).unwrap().title(), "new 1");

    let result = shell.close_tab(group, 0, true, false).unwrap();

    assert_eq!(result, CloseResult::Canceled);
    assert_eq!(shell.views().total_tabs(), 1);
    assert!(!shell.document(group, 0).unwrap().is_clean());
    assert!(shell.store().writes().is_empty());
    assert!(shell.prompt().exhausted());
}

#[test]
fn closing_last_tab_of_last_group_opens_one_blank_document() {
    let store = MemoryDocumentStore::new().with_file("/work/a.txt", "a");
    let mut shell = shell_with_files(ScriptedPrompt::new(), store, &["a.txt"]);
    let group = first_group(&shell);
    let mut events = shell.subscribe();

    let result = shell.close_tab(group, 0, true, false).unwrap();

    assert_eq!(result, CloseResult::AlreadyClean);
    assert_eq!(shell.views().len(), 1);
    assert_eq!(shell.views().total_tabs(), 1);
    let blank = shell.document(group, 0).unwrap();
    assert!(blank.is_pristine());
    assert_eq!(blank.title(), "new 1");

    let added = events
        .drain()
        .into_iter()
        .filter(|event| matches!(event, ShellEvent::DocumentAdded { .. }))
        .count();
    assert_eq!(added, 1);
}

#[test]
fn closing_last_tab_of_other_group_removes_the_group() {
    let store = MemoryDocumentStore::new()
        .with_file("/work/a.txt", "a")
        .with_file("/work/b.txt", "b");
    let mut shell = shell_with_files(ScriptedPrompt::new(), store, &["a.txt", "b.txt"]);
    let first = first_group(&shell);
    let (second, _) = shell.move_to_other_view().unwrap();
    assert_eq!(shell.views().len(), 2);
    let mut events = shell.subscribe();

    let result = shell.close_tab(second, 0, true, false).unwrap();

    assert_eq!(result, CloseResult::AlreadyClean);
    assert_eq!(shell.views().len(), 1);
    assert!(shell.views().group(second).is_none());
    assert_eq!(shell.views().current_group_id(), Some(first));
    assert_eq!(tab_titles(&shell, first), vec!["a.txt"]);

    let events = events.drain();
    assert!(events.contains(&ShellEvent::GroupRemoved { group: second }));
    assert!(!events
        .iter()
        .any(|event| matches!(event, ShellEvent::DocumentAdded { .. })));
}

#[test]
fn close_current_targets_the_active_tab() {
    let store = MemoryDocumentStore::new()
        .with_file("/work/a.txt", "a")
        .with_file("/work/b.txt", "b");
    let mut shell = shell_with_files(ScriptedPrompt::new(), store, &["a.txt", "b.txt"]);
    let group = first_group(&shell);
    shell.focus(group, 0).unwrap();

    assert_eq!(shell.close_current().unwrap(), CloseResult::AlreadyClean);
    assert_eq!(tab_titles(&shell, group), vec!["b.txt"]);
}

#[test]
fn save_as_updates_path_title_and_last_dir() {
    let prompt = ScriptedPrompt::new().save_path("/docs/notes.md");
    let mut shell = shell_with(prompt, MemoryDocumentStore::new());
    let group = first_group(&shell);
    make_dirty(&mut shell, group, 0);

    let result = shell.save(group, 0).unwrap();

    assert!(result.is_saved());
    let doc = shell.document(group, 0).unwrap();
    assert_eq!(doc.path(), Some(Path::new("/docs/notes.md")));
    assert_eq!(doc.title(), "notes.md");
    assert_eq!(doc.language(), LanguageId::Markdown);
    assert!(doc.is_clean());
    assert_eq!(
        shell.store().content(Path::new("/docs/notes.md")),
        Some("edit")
    );
    assert_eq!(shell.settings().get(LAST_SELECTED_DIR), Some(json!("/docs")));
    assert_eq!(
        shell.prompt().calls(),
        &[PromptCall::SavePath {
            default: PathBuf::from(".").join("new 1"),
        }]
    );
}

#[test]
fn save_as_defaults_to_last_selected_dir() {
    let mut settings = MemorySettings::new();
    settings.set(LAST_SELECTED_DIR, json!("/projects")).unwrap();
    let prompt = ScriptedPrompt::new().dismiss_save_dialog();
    let mut shell = Shell::new(prompt, MemoryDocumentStore::new(), Box::new(settings));
    let (group, index) = shell.new_document();

    let result = shell.save_as(group, index, false).unwrap();

    assert!(matches!(result, SaveResult::Canceled));
    assert_eq!(
        shell.prompt().calls(),
        &[PromptCall::SavePath {
            default: PathBuf::from("/projects/new 1"),
        }]
    );
}

#[test]
fn copy_only_save_keeps_document_location() {
    let store = MemoryDocumentStore::new().with_file("/work/a.txt", "a");
    let prompt = ScriptedPrompt::new().save_path("/backup/a.txt");
    let mut shell = shell_with_files(prompt, store, &["a.txt"]);
    let group = first_group(&shell);
    make_dirty(&mut shell, group, 0);

    let result = shell.save_as(group, 0, true).unwrap();

    assert!(result.is_saved());
    let doc = shell.document(group, 0).unwrap();
    assert_eq!(doc.path(), Some(Path::new("/work/a.txt")));
    assert!(!doc.is_clean());
    assert_eq!(shell.store().content(Path::new("/backup/a.txt")), Some("aedit"));
    assert_eq!(shell.store().content(Path::new("/work/a.txt")), Some("a"));
}

#[test]
fn full_save_as_moves_document_location() {
    let store = MemoryDocumentStore::new().with_file("/work/a.txt", "a");
    let prompt = ScriptedPrompt::new().save_path("/work/renamed.rs");
    let mut shell = shell_with_files(prompt, store, &["a.txt"]);
    let group = first_group(&shell);
    let mut events = shell.subscribe();

    shell.save_as(group, 0, false).unwrap();

    let doc = shell.document(group, 0).unwrap();
    assert_eq!(doc.path(), Some(Path::new("/work/renamed.rs")));
    assert_eq!(doc.language(), LanguageId::Rust);
    assert!(events.drain().contains(&ShellEvent::DocumentSaved {
        document: doc.id,
        path: PathBuf::from("/work/renamed.rs"),
        copy_only: false,
    }));
}

#[test]
fn externally_modified_file_warns_before_overwrite() {
    let store = MemoryDocumentStore::new().with_file("/work/a.txt", "a");
    let prompt = ScriptedPrompt::new()
        .overwrite(OverwriteChoice::Cancel)
        .overwrite(OverwriteChoice::Save);
    let mut shell = shell_with_files(prompt, store, &["a.txt"]);
    let group = first_group(&shell);
    make_dirty(&mut shell, group, 0);
    shell
        .document_mut(group, 0)
        .unwrap()
        .set_disk_state(DiskState::ExternalModified);

    let first = shell.save(group, 0).unwrap();
    assert!(matches!(first, SaveResult::Canceled));
    assert!(shell.store().writes().is_empty());

    let second = shell.save(group, 0).unwrap();
    assert!(second.is_saved());
    let doc = shell.document(group, 0).unwrap();
    assert_eq!(doc.disk_state(), DiskState::InSync);
    assert!(doc.is_clean());
    assert_eq!(
        shell.prompt().calls(),
        &[
            PromptCall::Overwrite {
                name: "a.txt".to_string()
            },
            PromptCall::Overwrite {
                name: "a.txt".to_string()
            },
        ]
    );
}

#[test]
fn removed_file_is_rewritten_without_warning() {
    let store = MemoryDocumentStore::new().with_file("/work/a.txt", "a");
    let mut shell = shell_with_files(ScriptedPrompt::new(), store, &["a.txt"]);
    let group = first_group(&shell);
    shell.store_mut().remove(Path::new("/work/a.txt"));
    shell
        .document_mut(group, 0)
        .unwrap()
        .set_disk_state(DiskState::MissingOnDisk);

    let result = shell.save(group, 0).unwrap();

    assert!(result.is_saved());
    assert!(shell.prompt().calls().is_empty());
    assert_eq!(shell.store().content(Path::new("/work/a.txt")), Some("a"));
}

#[test]
fn failed_write_is_reported_and_keeps_tab_open() {
    let mut store = MemoryDocumentStore::new()
        .with_file("/work/a.txt", "a")
        .with_file("/work/b.txt", "b");
    store.deny_writes("/work/a.txt");
    let prompt = ScriptedPrompt::new().save_choice(SaveChoice::Save);
    let mut shell = shell_with_files(prompt, store, &["a.txt", "b.txt"]);
    let group = first_group(&shell);
    make_dirty(&mut shell, group, 0);

    let result = shell.save(group, 0).unwrap();
    assert!(matches!(
        result,
        SaveResult::Failed(FileError::PermissionDenied(ref path)) if path == Path::new("/work/a.txt")
    ));
    assert!(!shell.document(group, 0).unwrap().is_clean());
    assert_eq!(shell.prompt().errors().len(), 1);

    let closed = shell.close_tab(group, 0, true, false).unwrap();
    assert_eq!(closed, CloseResult::Canceled);
    assert_eq!(tab_titles(&shell, group), vec!["a.txt", "b.txt"]);
    assert_eq!(shell.prompt().errors().len(), 2);
}

#[test]
fn close_all_with_one_cancel_touches_nothing() {
    let store = MemoryDocumentStore::new()
        .with_file("/work/a.txt", "a")
        .with_file("/work/b.txt", "b")
        .with_file("/work/c.txt", "c");
    let prompt = ScriptedPrompt::new()
        .save_choice(SaveChoice::Discard)
        .save_choice(SaveChoice::Cancel);
    let mut shell = shell_with_files(prompt, store, &["a.txt", "b.txt", "c.txt"]);
    let group = first_group(&shell);
    make_dirty(&mut shell, group, 0);
    make_dirty(&mut shell, group, 2);

    let result = shell.close_all().unwrap();

    assert_eq!(result, BatchResult::Canceled);
    assert_eq!(tab_titles(&shell, group), vec!["a.txt", "b.txt", "c.txt"]);
    assert!(!shell.document(group, 0).unwrap().is_clean());
    assert!(!shell.document(group, 2).unwrap().is_clean());
    assert!(shell.store().writes().is_empty());
    assert_eq!(shell.prompt().questions(), 2);
}

#[test]
fn close_all_commits_after_every_tab_agrees() {
    let store = MemoryDocumentStore::new()
        .with_file("/work/a.txt", "a")
        .with_file("/work/b.txt", "b")
        .with_file("/work/c.txt", "c");
    let prompt = ScriptedPrompt::new()
        .save_choice(SaveChoice::Save)
        .save_choice(SaveChoice::Discard);
    let mut shell = shell_with_files(prompt, store, &["a.txt", "b.txt", "c.txt"]);
    let group = first_group(&shell);
    make_dirty(&mut shell, group, 0);
    make_dirty(&mut shell, group, 2);

    let result = shell.close_all().unwrap();

    assert_eq!(result, BatchResult::Closed);
    assert_eq!(shell.views().len(), 1);
    assert_eq!(shell.views().total_tabs(), 1);
    assert!(shell.current_document().unwrap().is_pristine());
    assert_eq!(shell.store().content(Path::new("/work/a.txt")), Some("aedit"));
    assert_eq!(shell.store().content(Path::new("/work/c.txt")), Some("c"));
    assert_eq!(shell.prompt().questions(), 2);
}

#[test]
fn close_all_collapses_every_group() {
    let store = MemoryDocumentStore::new()
        .with_file("/work/a.txt", "a")
        .with_file("/work/b.txt", "b")
        .with_file("/work/c.txt", "c");
    let mut shell = shell_with_files(ScriptedPrompt::new(), store, &["a.txt", "b.txt", "c.txt"]);
    shell.move_to_other_view().unwrap();
    assert_eq!(shell.views().len(), 2);

    assert_eq!(shell.close_all().unwrap(), BatchResult::Closed);

    assert_eq!(shell.views().len(), 1);
    assert_eq!(shell.views().total_tabs(), 1);
    assert!(shell.current_document().unwrap().is_pristine());
}

#[test]
fn close_all_on_pristine_window_terminates() {
    let mut shell = shell_with(ScriptedPrompt::new(), MemoryDocumentStore::new());

    assert_eq!(shell.close_all().unwrap(), BatchResult::Closed);
    assert_eq!(shell.views().total_tabs(), 1);
    assert!(shell.prompt().calls().is_empty());
}

#[test]
fn close_all_aborts_on_nested_overwrite_cancel() {
    let store = MemoryDocumentStore::new()
        .with_file("/work/a.txt", "a")
        .with_file("/work/b.txt", "b");
    let prompt = ScriptedPrompt::new()
        .save_choice(SaveChoice::Save)
        .overwrite(OverwriteChoice::Cancel);
    let mut shell = shell_with_files(prompt, store, &["a.txt", "b.txt"]);
    let first = first_group(&shell);
    let (second, _) = shell.move_to_other_view().unwrap();
    make_dirty(&mut shell, first, 0);
    shell
        .document_mut(first, 0)
        .unwrap()
        .set_disk_state(DiskState::ExternalModified);

    let result = shell.close_all().unwrap();

    assert_eq!(result, BatchResult::Canceled);
    assert_eq!(shell.views().len(), 2);
    assert_eq!(tab_titles(&shell, first), vec!["a.txt"]);
    assert_eq!(tab_titles(&shell, second), vec!["b.txt"]);
    assert!(!shell.document(first, 0).unwrap().is_clean());
    assert!(shell.store().writes().is_empty());
}

#[test]
fn exit_is_vetoed_by_cancel_and_proceeds_otherwise() {
    let store = MemoryDocumentStore::new().with_file("/work/a.txt", "a");
    let prompt = ScriptedPrompt::new()
        .save_choice(SaveChoice::Cancel)
        .save_choice(SaveChoice::Discard);
    let mut shell = shell_with_files(prompt, store, &["a.txt"]);
    let group = first_group(&shell);
    make_dirty(&mut shell, group, 0);

    assert_eq!(shell.request_exit().unwrap(), ExitDecision::Veto);
    assert_eq!(tab_titles(&shell, group), vec!["a.txt"]);

    assert_eq!(shell.request_exit().unwrap(), ExitDecision::Proceed);
    assert!(shell.store().writes().is_empty());
}

#[test]
fn open_replaces_lone_blank_tab_and_focuses_duplicates() {
    let store = MemoryDocumentStore::new()
        .with_file("/work/a.txt", "a")
        .with_file("/work/b.txt", "b");
    let mut shell = shell_with(ScriptedPrompt::new(), store);
    let group = first_group(&shell);

    let added = shell
        .open_documents(
            &[PathBuf::from("/work/a.txt"), PathBuf::from("/work/b.txt")],
            group,
            false,
        )
        .unwrap();
    assert_eq!(added, 2);
    assert_eq!(tab_titles(&shell, group), vec!["a.txt", "b.txt"]);

    let added = shell
        .open_documents(&[PathBuf::from("/work/a.txt")], group, false)
        .unwrap();
    assert_eq!(added, 0);
    assert_eq!(shell.views().total_tabs(), 2);
    assert_eq!(shell.current(), Some((group, 0)));
}

#[test]
fn open_reports_unreadable_paths() {
    let store = MemoryDocumentStore::new().with_file("/work/a.txt", "a");
    let mut shell = shell_with_files(ScriptedPrompt::new(), store, &["a.txt", "missing.txt"]);
    let group = first_group(&shell);

    assert_eq!(tab_titles(&shell, group), vec!["a.txt"]);
    assert_eq!(shell.prompt().errors().len(), 1);
    assert!(shell.prompt().errors()[0].contains("missing.txt"));
}

#[test]
fn startup_without_readable_files_still_shows_a_tab() {
    let mut shell = shell_with_files(ScriptedPrompt::new(), MemoryDocumentStore::new(), &["nope"]);
    let group = first_group(&shell);

    assert_eq!(tab_titles(&shell, group), vec!["new 1"]);
    assert_eq!(
        shell.close_tab(group, 0, true, false).unwrap(),
        CloseResult::AlreadyClean
    );
}

#[test]
fn open_dialog_starts_in_last_dir_and_remembers_choice() {
    let store = MemoryDocumentStore::new().with_file("/src/lib.rs", "fn main() {}");
    let prompt = ScriptedPrompt::new().open_paths(vec![PathBuf::from("/src/lib.rs")]);
    let mut shell = shell_with(prompt, store);

    assert_eq!(shell.open_with_dialog().unwrap(), 1);
    assert_eq!(
        shell.prompt().calls(),
        &[PromptCall::OpenPaths {
            start_dir: PathBuf::from("."),
        }]
    );
    assert_eq!(shell.settings().get(LAST_SELECTED_DIR), Some(json!("/src")));
    assert_eq!(shell.current_document().unwrap().language(), LanguageId::Rust);
}

#[test]
fn reload_on_external_modification() {
    let store = MemoryDocumentStore::new().with_file("/work/a.txt", "a");
    let prompt = ScriptedPrompt::new().disk_change(DiskChangeChoice::Yes);
    let mut shell = shell_with_files(prompt, store, &["a.txt"]);
    let group = first_group(&shell);
    make_dirty(&mut shell, group, 0);
    shell.store_mut().insert("/work/a.txt", "from elsewhere");

    let handled = shell
        .handle_disk_change(Path::new("/work/a.txt"), false)
        .unwrap();

    assert_eq!(handled, 1);
    let doc = shell.document(group, 0).unwrap();
    assert_eq!(doc.text(), "from elsewhere");
    assert!(doc.is_clean());
    assert_eq!(doc.disk_state(), DiskState::InSync);
}

#[test]
fn ignoring_modification_keeps_flag_for_next_save() {
    let store = MemoryDocumentStore::new().with_file("/work/a.txt", "a");
    let prompt = ScriptedPrompt::new()
        .disk_change(DiskChangeChoice::No)
        .overwrite(OverwriteChoice::Cancel);
    let mut shell = shell_with_files(prompt, store, &["a.txt"]);
    let group = first_group(&shell);

    shell.on_file_on_disk_changed(group, 0, false).unwrap();
    assert!(shell.document(group, 0).unwrap().externally_modified());

    assert!(matches!(shell.save(group, 0).unwrap(), SaveResult::Canceled));
    assert!(shell.prompt().exhausted());
}

#[test]
fn removed_file_can_be_saved_again_or_closed() {
    let store = MemoryDocumentStore::new()
        .with_file("/work/a.txt", "a")
        .with_file("/work/b.txt", "b");
    let prompt = ScriptedPrompt::new()
        .disk_change(DiskChangeChoice::Yes)
        .disk_change(DiskChangeChoice::Close);
    let mut shell = shell_with_files(prompt, store, &["a.txt", "b.txt"]);
    let group = first_group(&shell);

    shell.store_mut().remove(Path::new("/work/a.txt"));
    shell.on_file_on_disk_changed(group, 0, true).unwrap();
    assert_eq!(shell.store().content(Path::new("/work/a.txt")), Some("a"));
    assert_eq!(shell.document(group, 0).unwrap().disk_state(), DiskState::InSync);

    shell.store_mut().remove(Path::new("/work/b.txt"));
    shell
        .handle_disk_change(Path::new("/work/b.txt"), true)
        .unwrap();
    assert_eq!(tab_titles(&shell, group), vec!["a.txt"]);
}

#[test]
fn disk_change_for_unknown_path_is_ignored() {
    let mut shell = shell_with(ScriptedPrompt::new(), MemoryDocumentStore::new());

    let handled = shell
        .handle_disk_change(Path::new("/elsewhere.txt"), false)
        .unwrap();

    assert_eq!(handled, 0);
    assert!(shell.prompt().calls().is_empty());
}

#[test]
fn move_to_other_view_splits_then_merges_back() {
    let store = MemoryDocumentStore::new()
        .with_file("/work/a.txt", "a")
        .with_file("/work/b.txt", "b");
    let mut shell = shell_with_files(ScriptedPrompt::new(), store, &["a.txt", "b.txt"]);
    let first = first_group(&shell);

    let (second, index) = shell.move_to_other_view().unwrap();
    assert_ne!(second, first);
    assert_eq!(index, 0);
    assert_eq!(tab_titles(&shell, first), vec!["a.txt"]);
    assert_eq!(tab_titles(&shell, second), vec!["b.txt"]);
    assert_eq!(shell.current(), Some((second, 0)));

    let (back, _) = shell.move_to_other_view().unwrap();
    assert_eq!(back, first);
    assert_eq!(shell.views().len(), 1);
    assert_eq!(tab_titles(&shell, first), vec!["a.txt", "b.txt"]);
}

#[test]
fn language_override_emits_event_once() {
    let mut shell = shell_with(ScriptedPrompt::new(), MemoryDocumentStore::new());
    let mut events = shell.subscribe();
    let document = shell.current_document().unwrap().id;

    assert!(shell.set_current_language(LanguageId::Python));
    assert!(!shell.set_current_language(LanguageId::Python));

    assert_eq!(
        events.drain(),
        vec![ShellEvent::LanguageChanged {
            document,
            language: LanguageId::Python,
        }]
    );
}

#[test]
fn untitled_prefix_comes_from_settings() {
    let mut settings = MemorySettings::new();
    settings
        .set(SHELL_CONFIG, json!({ "untitled_prefix": "untitled" }))
        .unwrap();
    let mut shell = Shell::new(
        ScriptedPrompt::new(),
        MemoryDocumentStore::new(),
        Box::new(settings),
    );

    let (group, index) = shell.new_document();
    assert_eq!(shell.document(group, index).unwrap().title(), "untitled 1");
    let (group, index) = shell.new_document();
    assert_eq!(shell.document(group, index).unwrap().title(), "untitled 2");
    assert_eq!(shell.config().default_dir, PathBuf::from("."));
}

#[test]
fn bad_handles_are_errors() {
    let mut shell = shell_with(ScriptedPrompt::new(), MemoryDocumentStore::new());
    let group = first_group(&shell);

    assert_eq!(
        shell.close_tab(group, 5, true, false).unwrap_err(),
        ShellError::TabOutOfRange { group, index: 5 }
    );
    let unknown = GroupId::new(999);
    assert_eq!(
        shell.save(unknown, 0).unwrap_err(),
        ShellError::UnknownGroup(unknown)
    );
}
