use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

use crate::application::ports::{CaptureError, CaptureRequest, Renderer, Screenshot};

use super::encoding::encode_screenshot;

const SCREENSHOT_FILE: &str = "capture.png";

/// Renders with a headless Chrome/Chromium process, one process per capture.
///
/// The child is spawned with `kill_on_drop`, so when the caller's timeout drops the
/// capture future the browser is killed with it.
pub struct ChromeRenderer {
    binary: PathBuf,
    extra_args: Vec<String>,
}

impl ChromeRenderer {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            extra_args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.extra_args.extend(args);
        self
    }
}

#[async_trait::async_trait]
impl Renderer for ChromeRenderer {
    async fn capture(&self, request: &CaptureRequest) -> Result<Screenshot, CaptureError> {
        let workdir = tempfile::TempDir::new()
            .map_err(|e| CaptureError::Render(format!("cannot create capture dir: {e}")))?;
        let output_path = workdir.path().join(SCREENSHOT_FILE);

        let output = Command::new(&self.binary)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--hide-scrollbars")
            .arg("--mute-audio")
            .arg(format!(
                "--user-data-dir={}",
                workdir.path().join("profile").display()
            ))
            .arg(format!(
                "--window-size={},{}",
                request.viewport.width, request.viewport.height
            ))
            .arg(format!("--timeout={}", request.timeout.as_millis()))
            .arg(format!("--screenshot={}", output_path.display()))
            .args(&self.extra_args)
            .arg(request.url.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                CaptureError::Render(format!(
                    "failed to launch {}: {e}",
                    self.binary.display()
                ))
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if let Some(code) = network_error_code(&stderr) {
            return Err(CaptureError::Network(code.to_string()));
        }

        if !output.status.success() {
            return Err(CaptureError::Render(format!(
                "browser exited with {}: {}",
                output.status,
                last_line(&stderr)
            )));
        }

        let png = tokio::fs::read(&output_path)
            .await
            .map_err(|e| CaptureError::Render(format!("browser produced no screenshot: {e}")))?;

        let format = request.format;
        tokio::task::spawn_blocking(move || encode_screenshot(&png, format))
            .await
            .map_err(|e| CaptureError::Render(format!("encoder task failed: {e}")))?
    }
}

/// Chrome logs navigation failures as `net::ERR_NAME_NOT_RESOLVED` and friends.
pub fn network_error_code(stderr: &str) -> Option<&str> {
    let start = stderr.find("net::ERR_")?;
    let code = &stderr[start..];
    let end = code
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == ':'))
        .unwrap_or(code.len());
    Some(&code[..end])
}

fn last_line(stderr: &str) -> &str {
    stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("no output")
}
