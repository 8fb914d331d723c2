//! Snapshot label shortening

/// Marker that replaces the prefix shared by all names
pub const ELLIPSIS: &str = "...";

/// Replace the prefix common to every name with [`ELLIPSIS`].
///
/// Names are returned unchanged when they share no prefix or when fewer
/// than two names are given.
pub fn shorten_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let prefix_len = if names.len() < 2 {
        0
    } else {
        common_prefix_len(names)
    };

    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            if prefix_len == 0 {
                name.to_string()
            } else {
                format!("{}{}", ELLIPSIS, &name[prefix_len..])
            }
        })
        .collect()
}

/// Byte length of the longest prefix shared by all names, on a char boundary
fn common_prefix_len<S: AsRef<str>>(names: &[S]) -> usize {
    let Some((first, rest)) = names.split_first() else {
        return 0;
    };
    let first = first.as_ref();

    let mut len = 0;
    for (offset, ch) in first.char_indices() {
        let end = offset + ch.len_utf8();
        let shared = rest
            .iter()
            .all(|name| name.as_ref().get(..end) == Some(&first[..end]));
        if !shared {
            break;
        }
        len = end;
    }

    len
}
