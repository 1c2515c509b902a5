//! End-to-end CLI test suite.
//!
//! Each test runs the real binary against an isolated data file.

mod common;

use common::harness::TestEnv;
use predicates::prelude::*;
use serde_json::Value;

// ===========================================
// ls command tests
// ===========================================
mod ls_tests {
    use super::*;

    #[test]
    fn test_ls_empty_creates_data_file() {
        let env = TestEnv::new();

        env.cmd()
            .ls()
            .assert()
            .success()
            .stdout(predicate::str::contains("No notes found."));

        assert!(env.data_file().exists(), "data file should be initialised");
        assert_eq!(
            std::fs::read_to_string(env.data_file()).unwrap().trim(),
            "[]"
        );
    }

    #[test]
    fn test_ls_shows_notes_in_insertion_order() {
        let env = TestEnv::new();
        env.add_note("First Note", "");
        env.add_note("Second Note", "");

        let out = env.cmd().ls().output_success();
        let first = out.find("First Note").expect("first note listed");
        let second = out.find("Second Note").expect("second note listed");
        assert!(first < second);
        assert!(out.contains("Page 1 of 1 (2 note(s))"));
    }

    #[test]
    fn test_ls_search_json() {
        let env = TestEnv::new();
        env.add_note("Meeting Notes", "agenda");
        env.add_note("Groceries", "eggs");

        let json: Value = env
            .cmd()
            .ls()
            .args(["--search", "MEETING"])
            .format_json()
            .output_json();

        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        assert_eq!(json["data"][0]["title"], "Meeting Notes");
        assert_eq!(json["pagination"]["totalPages"], 1);
    }

    #[test]
    fn test_ls_pagination_json() {
        let env = TestEnv::new();
        for i in 1..=5 {
            env.add_note(&format!("Note {i}"), "");
        }

        let json: Value = env
            .cmd()
            .ls()
            .args(["--page", "3", "--limit", "2"])
            .format_json()
            .output_json();

        assert_eq!(json["data"][0]["title"], "Note 5");
        assert_eq!(
            json["pagination"],
            serde_json::json!({"page": 3, "limit": 2, "total": 5, "totalPages": 3})
        );
    }

    #[test]
    fn test_ls_invalid_limit_fails() {
        let env = TestEnv::new();
        env.cmd()
            .ls()
            .args(["--limit", "101"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("validation failed"))
            .stderr(predicate::str::contains("limit:"));
    }
}

// ===========================================
// new / show command tests
// ===========================================
mod new_show_tests {
    use super::*;

    #[test]
    fn test_new_persists_note() {
        let env = TestEnv::new();

        env.cmd()
            .new_note("Project Ideas")
            .args(["--content", "Brainstorming"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("Created: Project Ideas ["));

        let notes = env.notes();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title(), "Project Ideas");
        assert_eq!(notes[0].content(), "Brainstorming");
    }

    #[test]
    fn test_new_json_returns_record() {
        let env = TestEnv::new();
        let json: Value = env.cmd().new_note("Json Note").format_json().output_json();

        let stored = &env.notes()[0];
        assert_eq!(json["data"]["id"], stored.id().to_string());
        assert_eq!(json["data"]["content"], "");
    }

    #[test]
    fn test_new_title_too_short_fails() {
        let env = TestEnv::new();
        env.cmd()
            .new_note("ab")
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "title: Title must be between 3 and 100 characters",
            ));
        assert!(env.notes().is_empty());
    }

    #[test]
    fn test_show_displays_note() {
        let env = TestEnv::new();
        let note = env.add_note("Readable", "Some body");

        env.cmd()
            .show(&note.id().to_string())
            .assert()
            .success()
            .stdout(predicate::str::contains("# Readable"))
            .stdout(predicate::str::contains("Some body"));
    }

    #[test]
    fn test_show_unknown_id_fails() {
        let env = TestEnv::new();
        env.cmd()
            .show("3f2b8c1e-9d4a-4e6b-8f1a-2c3d4e5f6a7b")
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "Note with id 3f2b8c1e-9d4a-4e6b-8f1a-2c3d4e5f6a7b not found",
            ));
    }

    #[test]
    fn test_show_malformed_id_fails() {
        let env = TestEnv::new();
        env.cmd()
            .show("not-an-id")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid note ID format"));
    }
}

// ===========================================
// edit / rm command tests
// ===========================================
mod edit_rm_tests {
    use super::*;

    #[test]
    fn test_edit_title_keeps_content() {
        let env = TestEnv::new();
        let note = env.add_note("Project Ideas", "Brainstorming");

        env.cmd()
            .edit(&note.id().to_string())
            .args(["--title", "Updated"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Updated: Updated"));

        let stored = &env.notes()[0];
        assert_eq!(stored.title(), "Updated");
        assert_eq!(stored.content(), "Brainstorming");
        assert_eq!(stored.created_at(), note.created_at());
        assert!(stored.updated_at() >= note.updated_at());
    }

    #[test]
    fn test_edit_without_fields_fails() {
        let env = TestEnv::new();
        let note = env.add_note("Untouched", "");

        env.cmd()
            .edit(&note.id().to_string())
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "At least one field (title or content) must be provided",
            ));
    }

    #[test]
    fn test_rm_removes_exactly_one() {
        let env = TestEnv::new();
        let keep = env.add_note("Keep", "");
        let drop = env.add_note("Drop", "");

        let json: Value = env
            .cmd()
            .rm(&drop.id().to_string())
            .format_json()
            .output_json();
        assert_eq!(json["data"]["title"], "Drop");

        let notes = env.notes();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id(), keep.id());

        env.cmd().rm(&drop.id().to_string()).assert().failure();
    }
}

// ===========================================
// config / completions tests
// ===========================================
mod config_tests {
    use super::*;
    use common::harness::NotesCommand;

    #[test]
    fn test_data_file_from_config() {
        let env = TestEnv::new();
        let configured = env.config_file().with_file_name("configured.json");
        env.write_config(&format!("data_file = {:?}\n", configured.to_string_lossy()));

        NotesCommand::new()
            .config(env.config_file())
            .new_note("From Config")
            .assert()
            .success();

        let raw = std::fs::read_to_string(&configured).unwrap();
        assert!(raw.contains("From Config"));
    }

    #[test]
    fn test_invalid_config_fails() {
        let env = TestEnv::new();
        env.write_config("port = [");

        env.cmd()
            .ls()
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to parse config file"));
    }

    #[test]
    fn test_completions_bash() {
        NotesCommand::new()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("notes-api"));
    }
}
