use std::{
    process::Stdio,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use color_eyre::{
    Result,
    eyre::{Context as _, ContextCompat as _, bail, eyre},
};
use tokio::{io::AsyncWriteExt as _, process::Command, runtime::Handle, task::JoinHandle};

use crate::{
    ui::notification::{Notifier, ToastKind},
    util::locale::Locale,
};

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// Texts shown after a copy attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardMessages {
    pub success: String,
    pub failure: String,
}
impl ClipboardMessages {
    pub fn for_locale(locale: Locale) -> Self {
        Self {
            success: locale.copied_to_clipboard().to_string(),
            failure: locale.could_not_copy().to_string(),
        }
    }
}
impl Default for ClipboardMessages {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

/// Writes `text` to the clipboard in the background and reports the outcome as a toast.
///
/// Must be called from within a tokio runtime. The returned handle only needs to be
/// awaited if the caller wants to know when the attempt is over; the outcome itself
/// is only surfaced through `notifier`.
pub fn copy_to_clipboard(
    clipboard: Arc<dyn Clipboard>,
    notifier: Arc<Notifier>,
    messages: ClipboardMessages,
    text: String,
) -> Result<JoinHandle<()>> {
    let runtime =
        Handle::try_current().context("Copying to the clipboard requires a tokio runtime")?;
    Ok(runtime.spawn(async move {
        match clipboard.write_text(&text).await {
            Ok(()) => notifier.show_toast(&messages.success, ToastKind::Success),
            Err(e) => {
                tracing::error!("Failed to copy: {e:?}");
                notifier.show_toast(&messages.failure, ToastKind::Error);
            }
        }
    }))
}

/// Clipboard held in memory; can be told to reject writes.
#[derive(Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    denied: bool,
}
impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that refuses every write, like a browser without permission.
    pub fn denied() -> Self {
        Self {
            contents: Mutex::new(None),
            denied: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }
}
#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        if self.denied {
            bail!("Clipboard write permission denied");
        }
        *self.contents.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

/// Pipes text into a system clipboard tool such as `wl-copy`, `xclip` or `pbcopy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}
impl CommandClipboard {
    /// Splits a command line on whitespace, e.g. `"xclip -selection clipboard"`.
    pub fn from_command_line(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().context("Clipboard command is empty")?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// The usual clipboard tool for the current platform.
    pub fn default_command_line() -> &'static str {
        if cfg!(target_os = "windows") {
            "clip"
        } else if cfg!(target_os = "macos") {
            "pbcopy"
        } else {
            "xclip -selection clipboard"
        }
    }
}
#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to launch {}", self.program))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| eyre!("{} has no stdin", self.program))?;
        stdin.write_all(text.as_bytes()).await?;
        drop(stdin);

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            bail!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}
