//! Application configuration.
//!
//! Centralizes the constants used throughout the shell core. Text assets are
//! loaded at compile time using `include_str!`.

use crate::core::VirtualFs;
use crate::models::FsNode;

// =============================================================================
// Text Assets (loaded at compile time)
// =============================================================================

/// ASCII welcome banner shown on first visit.
pub const WELCOME_BANNER: &str = include_str!("../assets/text/welcome.txt");

/// ASCII profile card for the `whoami` command.
pub const ASCII_PROFILE: &str = include_str!("../assets/text/profile.txt");

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the prompt.
pub const APP_NAME: &str = "foliosh";

/// Simulated user name.
pub const USER_NAME: &str = "guest";

/// Simulated host name for the prompt.
pub const HOST_NAME: &str = "folio";

// =============================================================================
// Shell Behavior
// =============================================================================

/// Reserved output line that tells the orchestrator to wipe the screen
/// instead of rendering. Must never collide with ordinary command output.
pub const CLEAR_SENTINEL: &str = "\u{1b}[foliosh:clear]";

/// Default preference values.
pub const DEFAULT_THEME: &str = "dark";
pub const DEFAULT_HISTORY_SIZE: usize = 100;

/// Fixed date stamp used in `ls -l` output. The filesystem is synthetic and
/// read-only, so every entry shares one timestamp.
pub const LIST_DATE_STAMP: &str = "Jan 15 12:00";

/// Column width target for tab-completion suggestion layout.
pub const SUGGESTION_COLUMNS_WIDTH: usize = 80;

// =============================================================================
// Default Filesystem
// =============================================================================

/// Build the simulated site filesystem.
///
/// Content files are bundled at compile time; the tree shape mirrors the
/// site's sections (about, projects, blog).
pub fn default_filesystem() -> VirtualFs {
    let root = FsNode::dir()
        .with("about.md", FsNode::file(include_str!("../assets/content/about.md")))
        .with("skills.md", FsNode::file(include_str!("../assets/content/skills.md")))
        .with(
            "contact.md",
            FsNode::file(include_str!("../assets/content/contact.md")),
        )
        .with(
            ".profile",
            FsNode::file("# ~/.profile\nexport THEME=dark\nexport SHELL=foliosh\n"),
        )
        .with(
            "projects",
            FsNode::dir()
                .with(
                    "terminal.md",
                    FsNode::file(include_str!("../assets/content/projects/terminal.md")),
                )
                .with(
                    "shortener.md",
                    FsNode::file(include_str!("../assets/content/projects/shortener.md")),
                ),
        )
        .with(
            "blog",
            FsNode::dir().with(
                "hello-world.md",
                FsNode::file(include_str!("../assets/content/blog/hello-world.md")),
            ),
        );

    VirtualFs::new(root)
}
