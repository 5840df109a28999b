use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use regex::Regex;
use tracing::{debug, info};

use crate::{errors::WatchError, event::ScreenshotBatch};

/// Longest file name most filesystems accept, in bytes.
const MAX_NAME_BYTES: usize = 255;

struct Patterns {
    illegal: Regex,
    control: Regex,
    reserved: Regex,
    windows_reserved: Regex,
    trailing: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        illegal: Regex::new(r#"[/?<>\\:*|"]"#).unwrap(),
        control: Regex::new(r"[\x00-\x1f\x80-\x9f]").unwrap(),
        reserved: Regex::new(r"^\.+$").unwrap(),
        windows_reserved: Regex::new(
            r"(?i)^(con|prn|aux|nul|com[0-9]|lpt[0-9])(\..*)?$",
        )
        .unwrap(),
        trailing: Regex::new(r"[. ]+$").unwrap(),
    })
}

/// Turn a suite name into a single, non-empty path segment that is legal on
/// common filesystems.
pub fn sanitize(name: &str) -> String {
    let p = patterns();
    let name = p.illegal.replace_all(name, "");
    let name = p.control.replace_all(&name, "");
    let name = p.reserved.replace(&name, "");
    let name = p.windows_reserved.replace(&name, "");
    let name = p.trailing.replace(&name, "");

    let mut end = name.len().min(MAX_NAME_BYTES);
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    let name = &name[..end];

    if name.is_empty() {
        "_".to_string()
    } else {
        name.to_string()
    }
}

/// Persists screenshot batches under `<root>/<sanitized suite name>/`.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    root: PathBuf,
}

impl ArtifactWriter {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        ArtifactWriter { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the screenshots of a suite.
    pub fn dir_for(&self, name: &str) -> PathBuf {
        self.root.join(sanitize(name))
    }

    /// Decode and write every shot of the batch as `<index>.png`.
    /// An empty batch touches nothing on disk. Writes complete before this
    /// returns; any failure aborts the batch and leaves earlier files behind.
    pub fn on_screenshots(
        &self,
        batch: &ScreenshotBatch,
    ) -> Result<Vec<PathBuf>, WatchError> {
        if batch.shots.is_empty() {
            debug!("no screenshots for `{}`", batch.name);
            return Ok(Vec::new());
        }

        let dir = self.dir_for(&batch.name);
        fs::create_dir_all(&dir)
            .map_err(|err| WatchError::from(err).context(dir.display()))?;

        let mut written = Vec::with_capacity(batch.shots.len());
        for (idx, shot) in batch.shots.iter().enumerate() {
            let path = dir.join(format!("{}.png", idx));
            let bytes = STANDARD
                .decode(shot)
                .map_err(|err| WatchError::from(err).context(path.display()))?;
            fs::write(&path, bytes)
                .map_err(|err| WatchError::from(err).context(path.display()))?;
            written.push(path);
        }
        info!(
            "saved {} screenshot(s) for `{}` in {}",
            written.len(),
            batch.name,
            dir.display()
        );
        Ok(written)
    }
}
