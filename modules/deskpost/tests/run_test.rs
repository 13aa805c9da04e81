//! Driver-loop tests — MOCKS → RUNNER → FILESYSTEM.
//!
//! MockPostSource and MockDesktop stand in for the network and the OS;
//! assertions run against the recorded action script and the scratch
//! output directory.

use std::sync::Arc;

use tempfile::TempDir;

use deskpost::document;
use deskpost::run::Runner;
use deskpost::testing::{post, posts, test_config, Action, MockDesktop, MockPostSource};
use desktop_automation::AutomationError;
use placeholder_client::{FetchError, Post};

fn runner(source: MockPostSource, desktop: Arc<MockDesktop>, dir: &TempDir) -> Runner {
    Runner::new(Arc::new(source), desktop, test_config(dir.path()))
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn types_and_saves_every_fetched_post() {
    let dir = TempDir::new().unwrap();
    let desktop = Arc::new(MockDesktop::new());
    let runner = runner(MockPostSource::with_posts(posts(12)), desktop.clone(), &dir);

    let stats = runner.run().await.unwrap();

    assert_eq!(stats.posts_fetched, 10);
    assert_eq!(stats.files_written, 10);
    for id in 1..=10 {
        let path = dir.path().join(format!("post-{id}.txt"));
        assert!(path.exists(), "missing {}", path.display());
    }
    assert!(!dir.path().join("post-11.txt").exists());
}

#[tokio::test]
async fn saved_file_is_named_after_the_post_and_holds_the_composed_document() {
    let dir = TempDir::new().unwrap();
    let seven = post(7);
    let desktop = Arc::new(MockDesktop::new());
    let runner = runner(
        MockPostSource::with_posts(vec![seven.clone()]),
        desktop,
        &dir,
    );

    runner.run().await.unwrap();

    let content = std::fs::read_to_string(dir.path().join("post-7.txt")).unwrap();
    assert_eq!(content, document::compose(&seven));
    assert!(content.starts_with("Post 7: "));
}

#[tokio::test]
async fn action_script_runs_launch_find_type_confirm_per_post() {
    let dir = TempDir::new().unwrap();
    let desktop = Arc::new(MockDesktop::new());
    let runner = runner(MockPostSource::with_posts(vec![post(4)]), desktop.clone(), &dir);

    runner.run().await.unwrap();

    let actions = desktop.actions();
    assert_eq!(actions.len(), 4);
    assert!(matches!(actions[0], Action::Launch(ref p) if p == "notepad.exe"));
    assert!(matches!(actions[1], Action::FindWindow(ref t) if t == "Notepad"));
    assert!(matches!(actions[2], Action::SendKeys { ref text, .. } if text.contains("Post 4: ")));
    assert!(matches!(actions[3], Action::ConfirmDialog { ref path, .. } if path.ends_with("post-4.txt")));
}

// ---------------------------------------------------------------------------
// Fetch failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_failure_surfaces_and_creates_no_files() {
    let dir = TempDir::new().unwrap();
    let desktop = Arc::new(MockDesktop::new());
    let runner = runner(MockPostSource::failing(), desktop.clone(), &dir);

    let err = runner.run().await.unwrap_err();

    assert!(err.chain().any(|c| c.downcast_ref::<FetchError>().is_some()));
    assert!(desktop.actions().is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

// ---------------------------------------------------------------------------
// Automation failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dialog_timeout_aborts_the_remaining_sequence() {
    let dir = TempDir::new().unwrap();
    let desktop = Arc::new(MockDesktop::new().fail_dialog_from(3));
    let runner = runner(MockPostSource::with_posts(posts(5)), desktop.clone(), &dir);

    let err = runner.run().await.unwrap_err();

    assert!(err.chain().any(|c| matches!(
        c.downcast_ref::<AutomationError>(),
        Some(AutomationError::DialogTimeout { .. })
    )));
    assert!(dir.path().join("post-1.txt").exists());
    assert!(dir.path().join("post-2.txt").exists());
    assert!(!dir.path().join("post-3.txt").exists());
    assert!(!dir.path().join("post-4.txt").exists());
}

#[tokio::test]
async fn missing_window_exhausts_launch_attempts_and_aborts() {
    let dir = TempDir::new().unwrap();
    let desktop = Arc::new(MockDesktop::new().never_find_window());
    let runner = runner(MockPostSource::with_posts(posts(3)), desktop.clone(), &dir);

    let err = runner.run().await.unwrap_err();

    assert!(err.chain().any(|c| matches!(
        c.downcast_ref::<AutomationError>(),
        Some(AutomationError::WindowTimeout { .. })
    )));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    let launches = desktop
        .actions()
        .iter()
        .filter(|a| matches!(a, Action::Launch(_)))
        .count();
    assert_eq!(launches, 3);
}

#[tokio::test]
async fn launch_retries_recover_from_transient_failures() {
    let dir = TempDir::new().unwrap();
    let desktop = Arc::new(MockDesktop::new().fail_first_launches(2));
    let runner = runner(MockPostSource::with_posts(vec![post(1)]), desktop.clone(), &dir);

    let stats = runner.run().await.unwrap();

    assert_eq!(stats.files_written, 1);
    let launches = desktop
        .actions()
        .iter()
        .filter(|a| matches!(a, Action::Launch(_)))
        .count();
    assert_eq!(launches, 3);
    assert!(dir.path().join("post-1.txt").exists());
}

// ---------------------------------------------------------------------------
// Reruns
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rerun_overwrites_files_from_the_previous_run() {
    let dir = TempDir::new().unwrap();
    let first = Post {
        user_id: 1,
        id: 1,
        title: "first run".to_string(),
        body: "old body".to_string(),
    };
    let second = Post {
        user_id: 1,
        id: 1,
        title: "second run".to_string(),
        body: "new body".to_string(),
    };

    for p in [first, second.clone()] {
        let runner = Runner::new(
            Arc::new(MockPostSource::with_posts(vec![p])),
            Arc::new(MockDesktop::new()),
            test_config(dir.path()),
        );
        runner.run().await.unwrap();
    }

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    let content = std::fs::read_to_string(dir.path().join("post-1.txt")).unwrap();
    assert_eq!(content, document::compose(&second));
}
