//! File name styling in the manner of `ls --color`.

use owo_colors::{OwoColorize, Style};
use std::path::Path;

/// Display category of a file, decided from its metadata and extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Missing,
    Directory,
    Executable,
    Archive,
    Image,
    Audio,
    Video,
    Code,
    Plain,
}

const ARCHIVE_EXTENSIONS: &[&str] = &["zip", "tar", "gz", "bz2", "xz", "rar", "7z"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "ogg", "m4a", "aac"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "wmv", "flv", "webm"];
const CODE_EXTENSIONS: &[&str] = &[
    "py", "js", "ts", "rb", "php", "java", "c", "cpp", "h", "cs", "go", "rs",
];

impl FileKind {
    /// Classify `path`. `missing` short-circuits any filesystem access.
    pub fn of(path: &Path, missing: bool) -> Self {
        if missing {
            return FileKind::Missing;
        }
        let Ok(metadata) = std::fs::metadata(path) else {
            return FileKind::by_extension(path);
        };
        if metadata.is_dir() {
            return FileKind::Directory;
        }
        if is_executable(path, &metadata) {
            return FileKind::Executable;
        }
        FileKind::by_extension(path)
    }

    fn by_extension(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let ext = ext.as_str();
        if ARCHIVE_EXTENSIONS.contains(&ext) {
            FileKind::Archive
        } else if IMAGE_EXTENSIONS.contains(&ext) {
            FileKind::Image
        } else if AUDIO_EXTENSIONS.contains(&ext) {
            FileKind::Audio
        } else if VIDEO_EXTENSIONS.contains(&ext) {
            FileKind::Video
        } else if CODE_EXTENSIONS.contains(&ext) {
            FileKind::Code
        } else {
            FileKind::Plain
        }
    }

    fn palette(self) -> Style {
        match self {
            FileKind::Missing => Style::new().red().bold(),
            FileKind::Directory => Style::new().bright_blue().bold(),
            FileKind::Executable => Style::new().bright_green().bold(),
            FileKind::Archive => Style::new().bright_red(),
            FileKind::Image => Style::new().bright_magenta(),
            FileKind::Audio => Style::new().cyan(),
            FileKind::Video => Style::new().bright_cyan(),
            FileKind::Code => Style::new().bright_yellow(),
            FileKind::Plain => Style::new().white(),
        }
    }
}

#[cfg(unix)]
fn is_executable(_path: &Path, metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.is_file() && metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(path: &Path, _metadata: &std::fs::Metadata) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_ascii_lowercase().as_str(), "exe" | "bat" | "cmd" | "ps1"))
        .unwrap_or(false)
}

/// Render the display name for `path` (its basename unless `full_path`).
///
/// Missing files get a trailing `*`. Styling is applied only when `color` is set.
pub fn format_file_name(path: &Path, missing: bool, full_path: bool, color: bool) -> String {
    let mut name = if full_path {
        path.display().to_string()
    } else {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    };
    if missing {
        name.push('*');
    }
    if !color {
        return name;
    }
    let kind = FileKind::of(path, missing);
    format!("{}", name.style(kind.palette()))
}

/// The missing-file legend line.
pub fn missing_legend(color: bool) -> String {
    let star = if color {
        format!("{}", "*".style(FileKind::Missing.palette()))
    } else {
        "*".to_string()
    };
    format!("Legend: {} = missing file", star)
}
