//! Files and streams the verbs write their results to.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::ResourceError;

const OUTPUT_TARGET: &str = "cycloid_resource::output";

/// File receiving the raw Cycloid CLI output.
pub const RAW_OUTPUT_FILE: &str = "cy-output.json";

/// File receiving the normalised envelope.
pub const ENVELOPE_FILE: &str = "output.json";

/// Writes `contents` to `directory/name`, readable by the owner only.
///
/// Existing files are truncated and narrowed to mode `0600`.
///
/// # Errors
///
/// Returns [`ResourceError::WriteFile`] when the file cannot be created or
/// written.
pub fn write_private_file(
    directory: &Path,
    name: &str,
    contents: &[u8],
) -> Result<PathBuf, ResourceError> {
    let path = directory.join(name);
    let wrap = |source: std::io::Error| ResourceError::WriteFile {
        path: path.clone(),
        source: Arc::new(source),
    };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(&path).map_err(wrap)?;
    // The creation mode does not apply to a file that already exists.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600)).map_err(wrap)?;
    }
    file.write_all(contents).map_err(wrap)?;
    file.flush().map_err(wrap)?;
    debug!(target: OUTPUT_TARGET, path = %path.display(), bytes = contents.len(), "wrote output file");
    Ok(path)
}

/// Serialises `value` as one line of compact JSON.
///
/// # Errors
///
/// Returns [`ResourceError::Encode`] when serialisation fails and
/// [`ResourceError::Emit`] when the writer fails.
pub fn emit<W, T>(writer: &mut W, value: &T) -> Result<(), ResourceError>
where
    W: Write + ?Sized,
    T: Serialize + ?Sized,
{
    let rendered = serde_json::to_string(value).map_err(ResourceError::Encode)?;
    writer.write_all(rendered.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
