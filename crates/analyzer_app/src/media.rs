use std::path::Path;

use analyzer_core::FileCandidate;
use anyhow::Context;

/// Builds a flow candidate from a local path, guessing the media type
/// from the extension the way a browser file input reports it.
pub fn candidate_from_path(path: &Path) -> anyhow::Result<FileCandidate> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("cannot read file metadata for {}", path.display()))?;
    anyhow::ensure!(metadata.is_file(), "{} is not a file", path.display());

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let media_type = guess_media_type(path);

    Ok(FileCandidate::new(name, media_type, metadata.len()).with_path(path))
}

fn guess_media_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .map(str::to_string)
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn common_extensions_map_to_expected_types() {
        assert_eq!(guess_media_type(&PathBuf::from("exam.pdf")), "application/pdf");
        assert_eq!(guess_media_type(&PathBuf::from("scan.png")), "image/png");
        assert_eq!(guess_media_type(&PathBuf::from("photo.jpg")), "image/jpeg");
        assert_eq!(guess_media_type(&PathBuf::from("photo.JPEG")), "image/jpeg");
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() {
        assert_eq!(
            guess_media_type(&PathBuf::from("notes.unknownext")),
            "application/octet-stream"
        );
    }

    #[test]
    fn candidate_carries_size_and_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::write(&path, b"0123456789").unwrap();

        let candidate = candidate_from_path(&path).unwrap();
        assert_eq!(candidate.name, "scan.png");
        assert_eq!(candidate.media_type, "image/png");
        assert_eq!(candidate.size_bytes, 10);
        assert_eq!(candidate.path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(candidate_from_path(&PathBuf::from("/no/such/file.pdf")).is_err());
    }
}
