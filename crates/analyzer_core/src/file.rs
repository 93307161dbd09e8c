use std::path::PathBuf;

/// A file offered by the user for one of the flows.
///
/// The candidate carries metadata only; the shell resolves `path` to
/// actual bytes when an effect is executed. Pure tests construct
/// candidates without a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    /// Declared media type, e.g. `application/pdf`.
    pub media_type: String,
    pub size_bytes: u64,
    pub path: Option<PathBuf>,
}

impl FileCandidate {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        size_bytes: u64,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size_bytes,
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// The files currently accepted for a flow.
///
/// Invariant: every member passed the acceptance policy. The set is
/// replaced wholesale on each selection gesture and cleared on explicit
/// removal; there is no incremental merge.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSet {
    files: Vec<FileCandidate>,
}

impl SelectionSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Only `validate_selection` constructs a non-empty set.
    pub(crate) fn from_validated(files: Vec<FileCandidate>) -> Self {
        Self { files }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn files(&self) -> &[FileCandidate] {
        &self.files
    }

    pub fn first(&self) -> Option<&FileCandidate> {
        self.files.first()
    }

    /// Display summary: single filename plus size, or a count when
    /// several files are selected. A pure projection of the set.
    pub fn summary(&self) -> Option<SelectionSummary> {
        match self.files.as_slice() {
            [] => None,
            [single] => Some(SelectionSummary::Single {
                name: single.name.clone(),
                size_label: format_size_mb(single.size_bytes),
            }),
            many => Some(SelectionSummary::Multiple { count: many.len() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionSummary {
    Single { name: String, size_label: String },
    Multiple { count: usize },
}

/// Fixed two-decimal megabyte label, e.g. `2.00 MB`.
pub fn format_size_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Log-scaled size label (`0 Bytes`, `2.5 KB`, `1.2 MB`, ...) with
/// trailing zeros trimmed.
pub fn format_size_scaled(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_labels() {
        assert_eq!(format_size_mb(2 * 1024 * 1024), "2.00 MB");
        assert_eq!(format_size_scaled(0), "0 Bytes");
        assert_eq!(format_size_scaled(512), "512 Bytes");
        assert_eq!(format_size_scaled(2560), "2.5 KB");
        assert_eq!(format_size_scaled(1024 * 1024), "1 MB");
    }

    #[test]
    fn summary_switches_to_count_for_multiple_files() {
        let set = SelectionSet::from_validated(vec![
            FileCandidate::new("a.pdf", "application/pdf", 10),
            FileCandidate::new("b.png", "image/png", 20),
        ]);
        assert_eq!(set.summary(), Some(SelectionSummary::Multiple { count: 2 }));
    }
}
