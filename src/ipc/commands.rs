//! Built-in privileged commands.
//!
//! | command          | args                      | reply                    |
//! |------------------|---------------------------|--------------------------|
//! | `showOpenDialog` | `OpenDialogOptions`       | `[path, ...]` or `null`  |
//! | `showSaveDialog` | `SaveDialogOptions`       | `path` or `null`         |
//! | `setTitle`       | `title`                   | `null`                   |
//! | `getPath`        | `kind`                    | absolute path            |
//! | `openExternal`   | `url`                     | `null`                   |

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::dialogs::Dialogs;
use super::main_process::CommandHandler;
use super::messages::{IpcFault, IpcReply};
use crate::host::dialog::{OPEN_DIALOG, SAVE_DIALOG};
use crate::log;
use crate::utils::open::{open_url, validate_external_url};

pub const SET_TITLE: &str = "setTitle";
pub const GET_PATH: &str = "getPath";
pub const OPEN_EXTERNAL: &str = "openExternal";

/// Shared view of the window title.
#[derive(Debug, Clone, Default)]
pub struct WindowHandle {
    title: Arc<RwLock<Option<String>>>,
}

impl WindowHandle {
    pub fn title(&self) -> Option<String> {
        self.title.read().clone()
    }

    fn set_title(&self, title: String) {
        *self.title.write() = Some(title);
    }
}

/// Handler for the built-in command set.
pub struct ShellCommands {
    app_name: String,
    dialogs: Box<dyn Dialogs>,
    window: WindowHandle,
}

impl ShellCommands {
    pub fn new(app_name: impl Into<String>, dialogs: impl Dialogs) -> Self {
        Self {
            app_name: app_name.into(),
            dialogs: Box::new(dialogs),
            window: WindowHandle::default(),
        }
    }

    /// Handle to the title state, readable after the handler is spawned.
    pub fn window(&self) -> WindowHandle {
        self.window.clone()
    }

    fn show_open_dialog(&self, args: &[Value]) -> IpcReply {
        let options = parse_arg(OPEN_DIALOG, args)?;
        Ok(match self.dialogs.show_open(&options) {
            Some(paths) => json!(paths),
            None => Value::Null,
        })
    }

    fn show_save_dialog(&self, args: &[Value]) -> IpcReply {
        let options = parse_arg(SAVE_DIALOG, args)?;
        Ok(match self.dialogs.show_save(&options) {
            Some(path) => json!(path),
            None => Value::Null,
        })
    }

    fn set_title(&self, args: &[Value]) -> IpcReply {
        let title: String = parse_arg(SET_TITLE, args)?;
        log!("main"; "title: {}", title);
        self.window.set_title(title);
        Ok(Value::Null)
    }

    fn get_path(&self, args: &[Value]) -> IpcReply {
        let kind: String = parse_arg(GET_PATH, args)?;
        let path = resolve_known_path(&kind, &self.app_name)?;
        Ok(json!(path.to_string_lossy()))
    }

    fn open_external(&self, args: &[Value]) -> IpcReply {
        let raw: String = parse_arg(OPEN_EXTERNAL, args)?;
        let url = validate_external_url(&raw).map_err(|e| IpcFault::malformed(format!("{e:#}")))?;
        open_url(&url).map_err(|e| IpcFault::other(format!("{e:#}")))?;
        log!("main"; "opened {}", url);
        Ok(Value::Null)
    }
}

impl CommandHandler for ShellCommands {
    fn handle(&self, command: &str, args: &[Value]) -> IpcReply {
        match command {
            OPEN_DIALOG => self.show_open_dialog(args),
            SAVE_DIALOG => self.show_save_dialog(args),
            SET_TITLE => self.set_title(args),
            GET_PATH => self.get_path(args),
            OPEN_EXTERNAL => self.open_external(args),
            _ => Err(IpcFault::not_found(format!("unknown command `{command}`"))),
        }
    }
}

/// Decode the first argument of `command`.
fn parse_arg<T: DeserializeOwned>(command: &str, args: &[Value]) -> Result<T, IpcFault> {
    let first = args
        .first()
        .ok_or_else(|| IpcFault::malformed(format!("`{command}` expects an argument")))?;
    T::deserialize(first).map_err(|e| IpcFault::malformed(format!("`{command}`: {e}")))
}

/// Well-known directory for `kind`.
///
/// `userData` is `appData` joined with the application name.
pub fn resolve_known_path(kind: &str, app_name: &str) -> Result<PathBuf, IpcFault> {
    let path = match kind {
        "home" => dirs::home_dir(),
        "appData" => dirs::config_dir(),
        "userData" => dirs::config_dir().map(|dir| dir.join(app_name)),
        "temp" => Some(std::env::temp_dir()),
        "cache" => dirs::cache_dir(),
        "desktop" => dirs::desktop_dir(),
        "documents" => dirs::document_dir(),
        "downloads" => dirs::download_dir(),
        "music" => dirs::audio_dir(),
        "pictures" => dirs::picture_dir(),
        "videos" => dirs::video_dir(),
        "exe" => std::env::current_exe().ok(),
        _ => return Err(IpcFault::not_found(format!("unknown path kind `{kind}`"))),
    };
    path.ok_or_else(|| IpcFault::not_found(format!("`{kind}` is not available on this system")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::host::dialog::{OpenDialogOptions, SaveDialogOptions};
    use crate::ipc::testing::spawn_renderer;

    /// Answers every dialog the same way.
    struct Scripted {
        open: Option<Vec<String>>,
        save: Option<String>,
    }

    impl Dialogs for Scripted {
        fn show_open(&self, _: &OpenDialogOptions) -> Option<Vec<String>> {
            self.open.clone()
        }

        fn show_save(&self, _: &SaveDialogOptions) -> Option<String> {
            self.save.clone()
        }
    }

    fn shell(open: Option<Vec<String>>, save: Option<String>) -> ShellCommands {
        ShellCommands::new("notes", Scripted { open, save })
    }

    #[test]
    fn test_unknown_command_not_found() {
        let err = shell(None, None).handle("reboot", &[]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_missing_argument_malformed() {
        let err = shell(None, None).handle(SET_TITLE, &[]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Malformed);
        let err = shell(None, None).handle(GET_PATH, &[json!(42)]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Malformed);
    }

    #[test]
    fn test_dialog_replies() {
        let options = json!({ "filters": [], "multiple": true });
        let picked = shell(Some(vec!["/a".into(), "/b".into()]), None);
        assert_eq!(picked.handle(OPEN_DIALOG, &[options.clone()]).unwrap(), json!(["/a", "/b"]));

        let cancelled = shell(None, None);
        assert_eq!(cancelled.handle(OPEN_DIALOG, &[options]).unwrap(), Value::Null);

        let save = json!({ "defaultPath": "a.txt", "filters": [] });
        let saved = shell(None, Some("/out/a.txt".into()));
        assert_eq!(saved.handle(SAVE_DIALOG, &[save]).unwrap(), json!("/out/a.txt"));
    }

    #[test]
    fn test_set_title_visible_through_handle() {
        let shell = shell(None, None);
        let window = shell.window();
        assert_eq!(window.title(), None);

        let (ipc, _main) = spawn_renderer(shell);
        ipc.send(SET_TITLE, vec![json!("notes - draft.md")]);
        ipc.send_sync(GET_PATH, vec![json!("temp")]).unwrap();
        assert_eq!(window.title().as_deref(), Some("notes - draft.md"));
    }

    #[test]
    fn test_get_path_kinds() {
        let temp = resolve_known_path("temp", "notes").unwrap();
        assert_eq!(temp, std::env::temp_dir());

        if let Some(config) = dirs::config_dir() {
            assert_eq!(resolve_known_path("userData", "notes").unwrap(), config.join("notes"));
        }

        let err = resolve_known_path("nowhere", "notes").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_open_external_rejects_bad_scheme() {
        let err = shell(None, None)
            .handle(OPEN_EXTERNAL, &[json!("javascript:alert(1)")])
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Malformed);
    }
}
