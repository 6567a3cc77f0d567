use std::io::Write;

/// collects a line of input from the user, e.g. the new name during a
/// rename. `None` aborts the operation.
pub trait Prompter: Send + Sync {
    fn prompt(&self, label: &str, current: &str) -> Option<String>;
}

/// never answers; renames are aborted when no real prompter is wired in
pub struct NoPrompt;

impl Prompter for NoPrompt {
    fn prompt(&self, _label: &str, _current: &str) -> Option<String> {
        None
    }
}

/// OS level clipboard used by the copy-id helpers. distinct from the
/// explorer's cut clipboard.
pub trait SystemClipboard: Send + Sync {
    fn write_text(&self, text: &str);
}

pub struct NoClipboard;

impl SystemClipboard for NoClipboard {
    fn write_text(&self, _text: &str) {}
}

/// opens an application url in whatever the surrounding shell considers
/// a browser
pub trait AppOpener: Send + Sync {
    fn open(&self, url: &str);
}

pub struct NoOpener;

impl AppOpener for NoOpener {
    fn open(&self, _url: &str) {}
}

/// receives the bytes of a downloaded asset
pub trait DownloadSink: Send + Sync {
    fn save(&self, name: &str, content_type: &mime::Mime, bytes: &[u8]) -> std::io::Result<()>;
}

/// writes downloads into the current working directory
pub struct CwdDownloads;

impl DownloadSink for CwdDownloads {
    fn save(&self, name: &str, _content_type: &mime::Mime, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(name)?;

        file.write_all(bytes)
    }
}
