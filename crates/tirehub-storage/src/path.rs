//! Pure path helpers: lexical normalization and the image extension allow-list.

use std::path::{Component, Path, PathBuf};

use uuid::Uuid;

/// Extensions accepted for stored images. Matching is case-sensitive.
pub const ALLOWED_EXTENSIONS: [&str; 4] = [".png", ".jpg", ".jpeg", ".gif"];

/// Collapse `.` and `..` components without touching the filesystem.
///
/// `..` never climbs above the first component, so `/a/../../b` becomes `/b`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                ) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Extension of the last path component of a client file name, dot included.
///
/// Returns an empty string when the name has no dot after its first character.
pub fn extension_of(client_name: &str) -> &str {
    let base = client_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(client_name);
    match base.rfind('.') {
        Some(i) if i > 0 => &base[i..],
        _ => "",
    }
}

/// Whether `extension` (dot included) is on the allow-list.
pub fn is_allowed_extension(extension: &str) -> bool {
    ALLOWED_EXTENSIONS.contains(&extension)
}

/// A fresh random file name carrying `extension`.
pub fn generated_name(extension: &str) -> String {
    format!("{}{extension}", Uuid::new_v4())
}
