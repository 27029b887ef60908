//! External downloader subprocess and atomic install of finished parts.
//!
//! Downloads land in `<final>.inprogress` and are renamed into place only
//! after the subprocess exits 0; the rename is the commit point, so a
//! partially written file can never be mistaken for a complete one. Failed
//! or interrupted temporaries are deliberately left on disk: the
//! downloader's `-c` flag resumes them on the next run, and the operator
//! can inspect or remove them by hand.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{AppError, Result};

/// Download `url` to `final_path` via the external program.
///
/// The subprocess inherits stdio so its own progress output reaches the
/// operator. Blocks until the transfer is finished.
pub async fn download_part(program: &str, url: &str, final_path: &Path) -> Result<()> {
    let tmp_path = in_progress_path(final_path);
    info!(url, path = %tmp_path.display(), "downloading");

    let status = Command::new(program)
        .arg("--progress=dot:mega")
        .arg("-c")
        .arg(url)
        .arg("-O")
        .arg(&tmp_path)
        .status()
        .await?;

    if !status.success() {
        return Err(AppError::DownloaderFailed {
            program: program.to_string(),
            status: status.to_string(),
        });
    }

    debug!(from = %tmp_path.display(), to = %final_path.display(), "renaming finished part");
    tokio::fs::rename(&tmp_path, final_path).await?;
    Ok(())
}

fn in_progress_path(final_path: &Path) -> PathBuf {
    let mut name = OsString::from(final_path.as_os_str());
    name.push(".inprogress");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_progress_suffix() {
        assert_eq!(
            in_progress_path(Path::new("downloads/a_1_part00_2.flv")),
            Path::new("downloads/a_1_part00_2.flv.inprogress")
        );
    }

    #[cfg(unix)]
    mod subprocess {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        // A stand-in downloader: writes a fixed body to the -O target.
        fn fake_downloader(dir: &Path, body: &str, exit_code: i32) -> PathBuf {
            let script = dir.join("fake-wget");
            std::fs::write(
                &script,
                format!("#!/bin/sh\nprintf '%s' '{body}' > \"$5\"\nexit {exit_code}\n"),
            )
            .unwrap();
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
            script
        }

        #[tokio::test]
        async fn success_renames_into_place() {
            let dir = tempfile::tempdir().unwrap();
            let script = fake_downloader(dir.path(), "payload", 0);
            let final_path = dir.path().join("part.flv");

            download_part(script.to_str().unwrap(), "http://unused/", &final_path)
                .await
                .unwrap();

            assert_eq!(std::fs::read_to_string(&final_path).unwrap(), "payload");
            assert!(!in_progress_path(&final_path).exists());
        }

        #[tokio::test]
        async fn failure_leaves_temporary_for_resume() {
            let dir = tempfile::tempdir().unwrap();
            let script = fake_downloader(dir.path(), "partial", 1);
            let final_path = dir.path().join("part.flv");

            let err = download_part(script.to_str().unwrap(), "http://unused/", &final_path)
                .await
                .unwrap_err();

            assert!(matches!(err, AppError::DownloaderFailed { .. }));
            assert!(!final_path.exists());
            assert!(in_progress_path(&final_path).exists());
        }
    }
}
