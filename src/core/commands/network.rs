//! Canned network demos: curl, ssh, ping, git, wget.
//!
//! None of these touch the network. Each command keys a fixed multi-line
//! transcript off recognized targets and falls back to a generic
//! unreachable/not-found message, so output is fully deterministic.

use crate::config::{HOST_NAME, USER_NAME};
use crate::core::error::CommandError;
use crate::core::registry::CommandSpec;
use crate::core::shell::ShellContext;
use crate::models::{Category, ParsedCommand};

pub fn commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("curl", "fetch a URL (simulated)", Category::System, curl)
            .with_usage("curl URL")
            .with_example("curl example.com"),
        CommandSpec::new("ssh", "open a remote session (simulated)", Category::System, ssh)
            .with_usage("ssh [user@]host"),
        CommandSpec::new("ping", "probe a host (simulated)", Category::System, ping)
            .with_usage("ping HOST")
            .with_example("ping example.com"),
        CommandSpec::new("git", "run a git subcommand (simulated)", Category::System, git)
            .with_usage("git SUBCOMMAND")
            .with_example("git status")
            .with_example("git log"),
        CommandSpec::new("wget", "download a file (simulated)", Category::System, wget)
            .with_usage("wget URL"),
    ]
}

/// Strip a scheme prefix and path so transcripts key off the bare host.
fn host_of(target: &str) -> &str {
    let rest = target
        .strip_prefix("https://")
        .or_else(|| target.strip_prefix("http://"))
        .unwrap_or(target);
    rest.split('/').next().unwrap_or(rest)
}

// ============================================================================
// curl
// ============================================================================

fn curl(cmd: &ParsedCommand, _ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    let Some(url) = cmd.args.first() else {
        return Ok(vec!["curl: no URL specified".to_string()]);
    };

    match host_of(url) {
        "example.com" | "www.example.com" => Ok(vec![
            "<!doctype html>".to_string(),
            "<html>".to_string(),
            "<head><title>Example Domain</title></head>".to_string(),
            "<body><h1>Example Domain</h1></body>".to_string(),
            "</html>".to_string(),
        ]),
        "ifconfig.me" | "icanhazip.com" => Ok(vec!["127.0.0.1".to_string()]),
        host => Ok(vec![format!("curl: (6) Could not resolve host: {host}")]),
    }
}

// ============================================================================
// ssh
// ============================================================================

fn ssh(cmd: &ParsedCommand, _ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    let Some(dest) = cmd.args.first() else {
        return Ok(vec![
            "usage: ssh [user@]host".to_string(),
        ]);
    };

    let host = dest.rsplit('@').next().unwrap_or(dest);
    if host == "localhost" || host == HOST_NAME {
        Ok(vec![
            format!("{USER_NAME}@{host}: Permission denied (publickey)."),
            "Nice try though.".to_string(),
        ])
    } else {
        Ok(vec![format!(
            "ssh: connect to host {host} port 22: Connection refused"
        )])
    }
}

// ============================================================================
// ping
// ============================================================================

fn ping(cmd: &ParsedCommand, _ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    let Some(target) = cmd.args.first() else {
        return Ok(vec!["ping: usage error: Destination address required".to_string()]);
    };
    let host = host_of(target);

    if host != "example.com" && host != "localhost" && host != HOST_NAME {
        return Ok(vec![format!("ping: {host}: Name or service not known")]);
    }

    // Fixed sequence of round-trip times: simulated, not measured.
    let times = [12.4, 11.8, 12.1, 11.9];
    let mut lines = vec![format!("PING {host} (93.184.216.34): 56 data bytes")];
    for (seq, time) in times.iter().enumerate() {
        lines.push(format!(
            "64 bytes from 93.184.216.34: icmp_seq={seq} ttl=56 time={time} ms"
        ));
    }
    lines.push(String::new());
    lines.push(format!("--- {host} ping statistics ---"));
    lines.push("4 packets transmitted, 4 packets received, 0.0% packet loss".to_string());
    lines.push("round-trip min/avg/max = 11.8/12.1/12.4 ms".to_string());
    Ok(lines)
}

// ============================================================================
// git
// ============================================================================

fn git(cmd: &ParsedCommand, _ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    match cmd.args.first().map(String::as_str) {
        None => Ok(vec![
            "usage: git SUBCOMMAND".to_string(),
            "supported here: status, log, remote".to_string(),
        ]),
        Some("status") => Ok(vec![
            "On branch main".to_string(),
            "Your branch is up to date with 'origin/main'.".to_string(),
            String::new(),
            "nothing to commit, working tree clean".to_string(),
        ]),
        Some("log") => Ok(vec![
            "a3f9c21 polish terminal typing animation".to_string(),
            "8d04e57 add tab completion for paths".to_string(),
            "51b6aa0 wire session persistence".to_string(),
            "02c7f3e initial commit".to_string(),
        ]),
        Some("remote") => Ok(vec!["origin".to_string()]),
        Some(other) => Ok(vec![format!(
            "git: '{other}' is not a git command. See 'git --help'."
        )]),
    }
}

// ============================================================================
// wget
// ============================================================================

fn wget(cmd: &ParsedCommand, _ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    let Some(url) = cmd.args.first() else {
        return Ok(vec!["wget: missing URL".to_string()]);
    };
    let host = host_of(url);

    if host == "example.com" || host == "www.example.com" {
        Ok(vec![
            format!("Resolving {host}... 93.184.216.34"),
            format!("Connecting to {host}|93.184.216.34|:443... connected."),
            "HTTP request sent, awaiting response... 200 OK".to_string(),
            "Length: 1256 (1.2K) [text/html]".to_string(),
            "wget: cannot write to a read-only filesystem".to_string(),
        ])
    } else {
        Ok(vec![format!(
            "Resolving {host}... failed: Name or service not known."
        )])
    }
}

// ============================================================================
// Tests
// ============================================================================
