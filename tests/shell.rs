//! End-to-end scenarios driving the shell through its public API.

use foliosh::config::default_filesystem;
use foliosh::core::{CommandSpec, Plugin, Shell, TypingConfig, cancellation};
use foliosh::models::Category;
use foliosh::session::{FileStore, SessionStore};

fn shell() -> Shell {
    let mut shell = Shell::new(default_filesystem(), SessionStore::in_memory());
    shell.set_typing(TypingConfig::INSTANT);
    shell
}

async fn run(shell: &mut Shell, raw: &str) -> Vec<String> {
    let mut sink: Vec<String> = Vec::new();
    let (_handle, mut token) = cancellation();
    shell.run_line(raw, &mut sink, &mut token).await.unwrap();
    sink
}

#[tokio::test]
async fn long_listing_of_root() {
    let mut shell = shell();
    let out = run(&mut shell, "ls -la /").await;

    assert!(out[0].starts_with("total "));
    assert!(out[1].ends_with(" ./"));
    assert!(out[2].ends_with(" ../"));
    assert!(out.iter().any(|l| l.ends_with(" projects/")));
    assert!(out.iter().any(|l| l.ends_with(" about.md")));
    assert!(out.iter().any(|l| l.ends_with(" .profile")));
    // Every entry line carries synthetic permissions.
    for line in &out[1..] {
        assert!(line.starts_with("drwxr-xr-x") || line.starts_with("-rw-r--r--"));
    }
}

#[tokio::test]
async fn navigate_in_and_out() {
    let mut shell = shell();

    assert!(run(&mut shell, "cd projects").await.is_empty());
    assert_eq!(run(&mut shell, "pwd").await, vec!["/projects"]);
    assert_eq!(shell.prompt(), "guest@folio:/projects$ ");

    assert!(run(&mut shell, "cd ..").await.is_empty());
    assert_eq!(run(&mut shell, "pwd").await, vec!["/"]);
}

#[tokio::test]
async fn relative_paths_follow_cwd() {
    let mut shell = shell();
    run(&mut shell, "cd projects").await;

    let out = run(&mut shell, "cat terminal.md").await;
    assert!(!out[0].starts_with("cat:"), "unexpected error: {}", out[0]);

    // And the parent stays reachable.
    let out = run(&mut shell, "cat ../about.md").await;
    assert!(!out[0].starts_with("cat:"));
}

#[tokio::test]
async fn clear_wipes_previous_output() {
    let mut shell = shell();
    let mut sink: Vec<String> = Vec::new();
    let (_handle, mut token) = cancellation();

    shell.run_line("whoami", &mut sink, &mut token).await.unwrap();
    assert!(!sink.is_empty());

    shell.run_line("clear", &mut sink, &mut token).await.unwrap();
    assert!(sink.is_empty());

    // The sentinel itself is never rendered.
    shell.run_line("help", &mut sink, &mut token).await.unwrap();
    assert!(sink.iter().all(|l| !l.contains('\u{1b}')));
}

#[tokio::test]
async fn plugin_commands_come_and_go() {
    let mut shell = shell();

    let plugin = Plugin::new("demo", "demo plugin").with_command(CommandSpec::new(
        "greet",
        "say hello",
        Category::System,
        |_, _| Ok(vec!["hello from the plugin".to_string()]),
    ));
    shell.register_plugin(plugin).await.unwrap();

    assert_eq!(
        run(&mut shell, "greet").await,
        vec!["hello from the plugin"]
    );
    // The catalog snapshot follows registration, so help sees it too.
    let help = run(&mut shell, "help greet").await;
    assert!(help[0].starts_with("greet: "));

    shell.unregister_plugin("demo").await.unwrap();
    let out = run(&mut shell, "greet").await;
    assert!(out[0].starts_with("greet: command not found"));
}

#[tokio::test]
async fn completion_round_trip() {
    let mut shell = shell();

    let result = shell.complete("he", 2);
    assert_eq!(result.completed, "help ");

    run(&mut shell, "cd projects").await;
    let result = shell.complete("cat term", 8);
    assert_eq!(result.completed, "cat terminal.md");
}

#[tokio::test]
async fn validation_blocks_metacharacters() {
    let mut shell = shell();
    let out = run(&mut shell, "ls;whoami").await;
    assert_eq!(out[0], "invalid command:");
    assert!(out[1].contains("forbidden character"));
}

#[tokio::test]
async fn handler_faults_become_output() {
    let mut shell = shell();
    let out = run(&mut shell, "cat").await;
    assert_eq!(out[0], "command failed: cat");
    assert!(out[1].contains("missing operand"));
}

#[tokio::test]
async fn session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let session = SessionStore::new(Box::new(FileStore::open(dir.path())));
        let mut shell = Shell::new(default_filesystem(), session);
        shell.set_typing(TypingConfig::INSTANT);
        run(&mut shell, "ls").await;
        run(&mut shell, "cd projects").await;
    }

    let session = SessionStore::new(Box::new(FileStore::open(dir.path())));
    let mut shell = Shell::new(default_filesystem(), session);
    shell.set_typing(TypingConfig::INSTANT);

    // History is appended after dispatch, so the handler sees only the two
    // persisted entries from the first session.
    let out = run(&mut shell, "history").await;
    assert_eq!(out.len(), 2);
    assert!(out[0].ends_with("ls"));
    assert!(out[1].ends_with("cd projects"));
}

#[tokio::test]
async fn find_and_grep_over_site_content() {
    let mut shell = shell();

    let out = run(&mut shell, "find / -name *.md -type f").await;
    assert!(out.contains(&"/about.md".to_string()));
    assert!(out.contains(&"/projects/terminal.md".to_string()));
    assert!(out.iter().all(|l| l.ends_with(".md")));

    let out = run(&mut shell, "grep -i terminal projects/terminal.md").await;
    assert!(!out.is_empty());
}
