//! Windows path handling for text embedded in generated launchers.
//!
//! The launchers this tool produces are consumed by the Zaparoo frontend on
//! Windows, so every path written into a config is normalized to backslash
//! form regardless of the host the builder runs on. Escaping doubles each
//! backslash; the result is inserted verbatim into a TOML basic string, where
//! the doubled backslashes decode back to single ones.

/// Normalize a path string to Windows form: forward slashes become
/// backslashes, `.` and `..` segments are resolved, duplicate and trailing
/// separators are collapsed. Drive (`C:`) and UNC (`\\server`) prefixes are
/// preserved and `..` never climbs above a root.
pub fn normalize(path: &str) -> String {
    let unified = path.trim().replace('/', "\\");

    // Keep the drive prefix out of segment processing so "C:\.." cannot
    // escape the drive root.
    let (drive, rest) = match unified.as_bytes() {
        [d, b':', ..] if d.is_ascii_alphabetic() => (Some(&unified[..2]), &unified[2..]),
        _ => (None, unified.as_str()),
    };

    // UNC paths (\\server\share) keep both leading separators, matching
    // Windows path normalization rules.
    let unc = drive.is_none() && rest.starts_with("\\\\");
    let rooted = rest.starts_with('\\');
    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('\\') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let mut out = String::new();
    if let Some(drive) = drive {
        out.push_str(drive);
    }
    if unc {
        out.push_str("\\\\");
    } else if rooted {
        out.push('\\');
    }
    out.push_str(&segments.join("\\"));
    if out.is_empty() {
        out.push('.');
    }
    out
}

/// Normalize and escape a path for embedding in a TOML basic string.
pub fn escape(path: &str) -> String {
    normalize(path).replace('\\', "\\\\")
}

/// File name of a path without its extension, e.g.
/// `C:\Emus\retroarch.exe` -> `retroarch`.
pub fn file_stem(path: &str) -> &str {
    let normalized_end = path
        .rfind(['\\', '/'])
        .map(|i| &path[i + 1..])
        .unwrap_or(path);
    match normalized_end.rfind('.') {
        Some(0) | None => normalized_end,
        Some(i) => &normalized_end[..i],
    }
}
