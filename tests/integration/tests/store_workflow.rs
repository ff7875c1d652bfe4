//! Catalog, gpg client, and passphrase workflow wired together.
//!
//! A shell script stands in for gpg: it prints the file contents when the
//! passphrase on stdin is `hunter2` and fails otherwise.

#![cfg(unix)]

use passbar_core::presenter::{PassphraseResponse, PathPrompt, Presenter};
use passbar_core::recents::RecentsTracker;
use passbar_store::{catalog, GpgClient, Outcome, PassphraseWorkflow};
use std::collections::VecDeque;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[derive(Default)]
struct Scripted {
    responses: VecDeque<PassphraseResponse>,
    prompts: u32,
    clipboard: Option<String>,
    shown: Option<String>,
}

impl Presenter for Scripted {
    fn prompt_path(&mut self, _prompt: &PathPrompt) -> passbar_core::Result<Option<PathBuf>> {
        Ok(None)
    }

    fn prompt_passphrase(
        &mut self,
        _entry_label: &str,
        _attempt: u32,
        _max_attempts: u32,
    ) -> passbar_core::Result<PassphraseResponse> {
        self.prompts += 1;
        Ok(self
            .responses
            .pop_front()
            .unwrap_or_else(PassphraseResponse::cancel))
    }

    fn show_plaintext(&mut self, _title: &str, text: &str) -> passbar_core::Result<()> {
        self.shown = Some(text.to_string());
        Ok(())
    }

    fn show_message(&mut self, _text: &str, _title: &str) -> passbar_core::Result<()> {
        Ok(())
    }

    fn notify(&mut self, _title: &str, _subtitle: &str, _message: &str) -> passbar_core::Result<()> {
        Ok(())
    }

    fn copy_to_clipboard(&mut self, text: &str) -> passbar_core::Result<()> {
        self.clipboard = Some(text.to_string());
        Ok(())
    }
}

/// Store with `github.gpg`, `Email/work.gpg`, and a hidden directory.
fn store_fixture(tmp: &Path) -> PathBuf {
    let store = tmp.join("store");
    std::fs::create_dir_all(store.join("Email")).unwrap();
    std::fs::create_dir_all(store.join(".git")).unwrap();
    std::fs::write(store.join("github.gpg"), "ghp_token\nuser: me\n").unwrap();
    std::fs::write(store.join("Email/work.gpg"), "correcthorse extra metadata\n").unwrap();
    std::fs::write(store.join(".git/leak.gpg"), "should not be listed").unwrap();
    store
}

fn fake_gpg(tmp: &Path) -> GpgClient {
    let script = tmp.join("fake-gpg");
    std::fs::write(
        &script,
        "#!/bin/sh\n\
         for arg in \"$@\"; do file=\"$arg\"; done\n\
         read -r pass || pass=\"\"\n\
         if [ \"$pass\" = \"hunter2\" ]; then cat \"$file\"; else echo 'bad passphrase' >&2; exit 2; fi\n",
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    GpgClient::new(&script, tmp)
}

fn find(entries: &[passbar_core::StoreEntry], name: &str) -> passbar_core::StoreEntry {
    catalog::find(entries, name).cloned().unwrap()
}

#[tokio::test]
async fn test_workflow_against_fake_gpg() {
    // One test spawns the script so no other thread is writing an
    // executable while it is exec'd.
    let tmp = TempDir::new().unwrap();
    let store = store_fixture(tmp.path());
    let client = fake_gpg(tmp.path());
    let entries = catalog::build(&store);

    let names: Vec<String> = catalog::secrets(&entries)
        .iter()
        .map(|e| catalog::relative_name(&store, e))
        .collect();
    assert_eq!(names, vec!["github", "Email/work"]);

    let mut recents = RecentsTracker::new(2);
    let mut presenter = Scripted {
        responses: vec![
            PassphraseResponse::copy("wrong"),
            PassphraseResponse::copy("hunter2"),
        ]
        .into(),
        ..Default::default()
    };

    let work = find(&entries, "Email/work");
    let outcome = PassphraseWorkflow::new(&client, &mut presenter, &mut recents)
        .resolve(&work)
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Copied);
    assert_eq!(presenter.prompts, 2);
    assert_eq!(presenter.clipboard.as_deref(), Some("correcthorse"));
    assert_eq!(recents.labels(), vec!["work"]);

    // Reopen from recents and reveal
    let again = recents.get(0).unwrap().to_entry();
    let mut presenter = Scripted {
        responses: vec![PassphraseResponse::show("hunter2")].into(),
        ..Default::default()
    };
    let outcome = PassphraseWorkflow::new(&client, &mut presenter, &mut recents)
        .resolve(&again)
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Revealed);
    assert_eq!(
        presenter.shown.as_deref(),
        Some("correcthorse extra metadata\n")
    );

    // Three wrong passphrases end silently without a fourth prompt
    let github = find(&entries, "github");
    let mut presenter = Scripted {
        responses: vec![
            PassphraseResponse::copy("a"),
            PassphraseResponse::copy("b"),
            PassphraseResponse::copy("c"),
            PassphraseResponse::copy("hunter2"),
        ]
        .into(),
        ..Default::default()
    };
    let outcome = PassphraseWorkflow::new(&client, &mut presenter, &mut recents)
        .resolve(&github)
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Exhausted);
    assert_eq!(presenter.prompts, 3);
    assert!(presenter.clipboard.is_none());
    assert_eq!(recents.labels(), vec!["work"]);
}

#[test]
fn test_hidden_directories_not_listed() {
    let tmp = TempDir::new().unwrap();
    let store = store_fixture(tmp.path());
    let entries = catalog::build(&store);
    assert!(catalog::find(&entries, ".git/leak").is_none());
    assert!(catalog::secrets(&entries)
        .iter()
        .all(|e| !e.location.starts_with(store.join(".git"))));
}
