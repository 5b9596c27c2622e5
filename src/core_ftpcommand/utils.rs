use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Resolves `arg` against the virtual `current_dir` and collapses `.` and `..`.
///
/// The result is always rooted at "/"; `..` at the root stays at the root.
pub fn normalize_virtual(current_dir: &str, arg: &str) -> String {
    let joined = if arg.starts_with('/') {
        arg.to_string()
    } else {
        format!("{}/{}", current_dir, arg)
    };

    let mut parts: Vec<&str> = Vec::new();
    for part in joined.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            part => parts.push(part),
        }
    }
    format!("/{}", parts.join("/"))
}

/// Maps a virtual path onto the real filesystem under `root`.
///
/// Anything that would land outside `root`, lexically or through a symlink,
/// resolves to `root` itself. `root` must be canonical.
pub async fn resolve_path(root: &Path, current_dir: &str, arg: &str) -> PathBuf {
    let virtual_path = normalize_virtual(current_dir, arg);

    let mut real = root.to_path_buf();
    for part in virtual_path.split('/').filter(|p| !p.is_empty()) {
        let mut components = Path::new(part).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => real.push(name),
            _ => return root.to_path_buf(),
        }
    }

    if !real.starts_with(root) || escapes_root(root, &real).await {
        return root.to_path_buf();
    }
    real
}

/// Follows symlinks on the deepest existing ancestor of `real`, so a name
/// that does not exist yet is still checked against the links above it.
async fn escapes_root(root: &Path, real: &Path) -> bool {
    let mut candidate = real;
    loop {
        match fs::canonicalize(candidate).await {
            Ok(canonical) => return !canonical.starts_with(root),
            Err(_) => {
                // Present but unresolvable: a dangling or looping link
                if fs::symlink_metadata(candidate).await.is_ok() {
                    return true;
                }
                match candidate.parent() {
                    Some(parent) if parent.starts_with(root) => candidate = parent,
                    _ => return true,
                }
            }
        }
    }
}

/// Converts a real path under `root` back to its virtual form.
pub fn virtual_from_real(root: &Path, real: &Path) -> String {
    let relative = match real.strip_prefix(root) {
        Ok(relative) => relative,
        Err(_) => return String::from("/"),
    };
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    format!("/{}", parts.join("/"))
}

/// Fixed pseudo-`ls` line: only type, size and name carry information.
pub fn format_list_line(name: &str, is_dir: bool, size: u64) -> String {
    if is_dir {
        format!("drwxr-xr-x 1 owner group 0 Jan 01 00:00 {}\r\n", name)
    } else {
        format!("-rw-r--r-- 1 owner group {} Jan 01 00:00 {}\r\n", size, name)
    }
}
