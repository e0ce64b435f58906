//! Merge of overlay files into a base list.

use crds::File;

/// Adds `additions` to `base`, keyed by path.
///
/// An addition replaces the entry with the same path in place, otherwise it
/// is appended. Order of untouched entries is preserved.
pub fn ensure_files(mut base: Vec<File>, additions: impl IntoIterator<Item = File>) -> Vec<File> {
    for file in additions {
        match base.iter_mut().find(|existing| existing.path == file.path) {
            Some(existing) => *existing = file,
            None => base.push(file),
        }
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use crds::FileContent;

    fn file(path: &str, data: &str) -> File {
        File {
            path: path.to_string(),
            permissions: None,
            content: FileContent {
                inline: Some(crds::FileContentInline {
                    encoding: String::new(),
                    data: data.to_string(),
                }),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_single_file_into_empty_base() {
        let result = ensure_files(vec![], [file("/etc/foo", "foo")]);
        assert_eq!(result, vec![file("/etc/foo", "foo")]);
    }

    #[test]
    fn test_no_file_into_non_empty_base() {
        let result = ensure_files(vec![file("/etc/bar", "bar")], []);
        assert_eq!(result, vec![file("/etc/bar", "bar")]);
    }

    #[test]
    fn test_single_file_into_non_empty_base() {
        let result = ensure_files(vec![file("/etc/bar", "bar")], [file("/etc/foo", "foo")]);
        assert_eq!(result, vec![file("/etc/bar", "bar"), file("/etc/foo", "foo")]);
    }

    #[test]
    fn test_same_path_is_replaced() {
        let result = ensure_files(
            vec![file("/etc/bar", "bar")],
            [file("/etc/bar", "bar different")],
        );
        assert_eq!(result, vec![file("/etc/bar", "bar different")]);
    }

    #[test]
    fn test_replacement_keeps_position() {
        let base = vec![file("/a", "1"), file("/b", "2"), file("/c", "3")];
        let result = ensure_files(base, [file("/b", "new")]);
        let data: Vec<&str> = result
            .iter()
            .map(|f| f.content.inline.as_ref().unwrap().data.as_str())
            .collect();
        assert_eq!(data, vec!["1", "new", "3"]);
    }

    #[test]
    fn test_idempotent() {
        let additions = vec![file("/etc/resolv.conf", "nameserver 1.1.1.1\n"), file("/etc/x", "x")];
        let once = ensure_files(vec![file("/etc/hosts", "")], additions.clone());
        let twice = ensure_files(once.clone(), additions);
        assert_eq!(once, twice);
    }
}
