//! External-command file preview.
//!
//! The preview is a synchronous function of `(path, width)`: it shells out
//! to a formatter and returns whatever came back as renderable text. All
//! failure modes (missing program, nonzero exit) are folded into the
//! returned string so the session never has to handle a preview error.

use std::io;
use std::process::{Command, Output};

/// Placeholder shown while nothing previewable is hovered.
pub const NO_SELECTION: &str = "No file selected";

/// Render preview text for `path` at the given terminal width.
///
/// A configured `command` is split on whitespace and invoked with the path
/// appended. Otherwise `bat` is used when available, falling back to `cat`.
pub fn render(path: &str, width: u16, command: Option<&str>) -> String {
    if path.is_empty() {
        return NO_SELECTION.to_string();
    }

    let output = match command {
        Some(cmd) => run_custom(cmd, path),
        None if find_in_path("bat") => Command::new("bat")
            .args(["--color=never", "--number", "--terminal-width"])
            .arg(width.to_string())
            .arg(path)
            .output(),
        None => Command::new("cat").arg(path).output(),
    };

    match output {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).into_owned(),
        Ok(out) => {
            let detail = if out.stderr.is_empty() {
                out.stdout
            } else {
                out.stderr
            };
            format!("ERROR: {}", String::from_utf8_lossy(&detail))
        }
        Err(e) => format!("ERROR: {e}"),
    }
}

fn run_custom(command: &str, path: &str) -> io::Result<Output> {
    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "empty preview command",
        ));
    };
    Command::new(program).args(parts).arg(path).output()
}

fn find_in_path(program: &str) -> bool {
    let Some(paths) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&paths).any(|dir| dir.join(program).is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_path_shows_placeholder() {
        assert_eq!(render("", 80, None), NO_SELECTION);
    }

    #[test]
    fn custom_command_receives_path() {
        let out = render("some/file.txt", 80, Some("echo -n"));
        assert_eq!(out, "some/file.txt");
    }

    #[test]
    fn custom_command_with_args_is_split() {
        let out = render("x", 80, Some("echo a b"));
        assert_eq!(out, "a b x\n");
    }

    #[test]
    fn missing_program_becomes_error_text() {
        let out = render("x", 80, Some("definitely-not-a-real-program-xyz"));
        assert!(out.starts_with("ERROR: "));
    }

    #[test]
    fn empty_command_becomes_error_text() {
        let out = render("x", 80, Some("  "));
        assert!(out.starts_with("ERROR: "));
    }

    #[test]
    fn failing_command_becomes_error_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "content").unwrap();
        // `cat` a nonexistent sibling path to force a nonzero exit.
        let out = render(
            &format!("{}-missing", file.path().display()),
            80,
            Some("cat"),
        );
        assert!(out.starts_with("ERROR: "));
    }

    #[test]
    fn readable_file_renders_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hello preview").unwrap();
        let out = render(&file.path().display().to_string(), 80, Some("cat"));
        assert_eq!(out, "hello preview\n");
    }
}
