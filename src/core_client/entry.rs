use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One line of a remote directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub name: String,
    pub kind: EntryKind,
    pub size: Option<u64>, // None when the line could not be parsed
}

impl RemoteEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Parses a pseudo-`ls` line: `perms links owner group size month day time name`.
    ///
    /// The name is everything after the eighth token, so it may contain
    /// spaces. Lines that do not fit become a plain file entry named by the
    /// whole line.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        match split_fields(line) {
            Some((perms, size, name)) => {
                let kind = if perms.starts_with('d') {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                };
                Some(Self {
                    name: name.to_string(),
                    kind,
                    size: size.parse().ok(),
                })
            }
            None => Some(Self {
                name: line.to_string(),
                kind: EntryKind::File,
                size: None,
            }),
        }
    }
}

// Returns (permissions, size, name) when the line has at least nine fields.
fn split_fields(line: &str) -> Option<(&str, &str, &str)> {
    let mut rest = line;
    let mut fields = [""; 8];
    for field in fields.iter_mut() {
        rest = rest.trim_start();
        let end = rest.find(char::is_whitespace)?;
        *field = &rest[..end];
        rest = &rest[end..];
    }
    let name = rest.trim_start();
    if name.is_empty() {
        return None;
    }
    Some((fields[0], fields[4], name))
}

/// Turns raw listing lines into sorted entries: directories first, then by
/// case-insensitive name. `.` and `..` are dropped.
pub fn parse_listing<I, S>(lines: I) -> Vec<RemoteEntry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut entries: Vec<RemoteEntry> = lines
        .into_iter()
        .filter_map(|line| RemoteEntry::parse_line(line.as_ref()))
        .filter(|entry| entry.name != "." && entry.name != "..")
        .collect();
    entries.sort_by(compare_entries);
    entries
}

fn compare_entries(a: &RemoteEntry, b: &RemoteEntry) -> Ordering {
    b.is_dir()
        .cmp(&a.is_dir())
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_and_directory() {
        let file = RemoteEntry::parse_line("-rw-r--r-- 1 owner group 42 Jan 01 00:00 report.txt").unwrap();
        assert_eq!(file.name, "report.txt");
        assert_eq!(file.kind, EntryKind::File);
        assert_eq!(file.size, Some(42));

        let dir = RemoteEntry::parse_line("drwxr-xr-x 1 owner group 0 Jan 01 00:00 docs").unwrap();
        assert!(dir.is_dir());
        assert_eq!(dir.size, Some(0));
    }

    #[test]
    fn test_name_keeps_inner_spaces() {
        let entry =
            RemoteEntry::parse_line("-rw-r--r-- 1 owner group 7 Jan 01 00:00 my  holiday photo.jpg").unwrap();
        assert_eq!(entry.name, "my  holiday photo.jpg");
    }

    #[test]
    fn test_short_line_falls_back_to_file() {
        let entry = RemoteEntry::parse_line("  readme  ").unwrap();
        assert_eq!(entry.name, "readme");
        assert_eq!(entry.kind, EntryKind::File);
        assert_eq!(entry.size, None);
        assert!(RemoteEntry::parse_line("   ").is_none());
    }

    #[test]
    fn test_listing_is_sorted_and_skips_dots() {
        let lines = [
            "-rw-r--r-- 1 owner group 3 Jan 01 00:00 beta.txt",
            "drwxr-xr-x 1 owner group 0 Jan 01 00:00 .",
            "drwxr-xr-x 1 owner group 0 Jan 01 00:00 ..",
            "drwxr-xr-x 1 owner group 0 Jan 01 00:00 zeta",
            "-rw-r--r-- 1 owner group 1 Jan 01 00:00 Alpha.txt",
            "drwxr-xr-x 1 owner group 0 Jan 01 00:00 Archive",
        ];
        let names: Vec<String> = parse_listing(lines).into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["Archive", "zeta", "Alpha.txt", "beta.txt"]);
    }
}
