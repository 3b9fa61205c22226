//! Launching URLs with the platform opener.

use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use url::Url;

/// URL schemes allowed to leave the application.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto", "file"];

/// Parse and check a URL before handing it to the OS shell.
pub fn validate_external_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("invalid url `{raw}`"))?;
    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        bail!("refusing to open `{}` url", url.scheme());
    }
    Ok(url)
}

/// Platform opener program and its leading arguments.
fn opener() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    }
}

/// Open `url` with the default application.
///
/// The platform openers hand the URL off and exit right away; their status
/// is collected so no child is left behind.
pub fn open_url(url: &Url) -> Result<()> {
    let (program, leading) = opener();
    let program = which::which(program).with_context(|| format!("`{program}` not found"))?;
    run_opener(&program, leading, url)
}

fn run_opener(program: &Path, leading: &[&str], url: &Url) -> Result<()> {
    let status = Command::new(program)
        .args(leading)
        .arg(url.as_str())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("failed to launch {}", program.display()))?;

    if !status.success() {
        bail!("{} exited with {}", program.display(), status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_external_url() {
        assert!(validate_external_url("https://example.com/docs").is_ok());
        assert!(validate_external_url("mailto:someone@example.com").is_ok());
        assert!(validate_external_url("javascript:alert(1)").is_err());
        assert!(validate_external_url("not a url").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_opener_status_is_reported() {
        let url = validate_external_url("https://example.com").unwrap();
        let ok = which::which("true").unwrap();
        let failing = which::which("false").unwrap();

        assert!(run_opener(&ok, &[], &url).is_ok());
        let err = run_opener(&failing, &[], &url).unwrap_err();
        assert!(err.to_string().contains("exited with"));
    }
}
