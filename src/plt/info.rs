/// Extracts recorded file paths from `dialyzer --plt_info` output.
///
/// dialyzer prints the file list as an Erlang list of strings, so every
/// double-quoted string is taken. Output without any quotes falls back to
/// one path per line.
pub fn parse_plt_info(stdout: &str) -> Vec<String> {
    if stdout.contains('"') {
        return stdout
            .split('"')
            .skip(1)
            .step_by(2)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }

    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.contains('/'))
        .map(str::to_string)
        .collect()
}

/// True if any recorded path contains `name` anywhere.
///
/// Plain substring match: `kernel` also matches `superkernel.beam`.
pub fn plt_contains(files: &[String], name: &str) -> bool {
    files.iter().any(|f| f.contains(name))
}

/// Required names with no matching recorded path, in required order.
pub fn missing_apps(required: &[String], files: &[String]) -> Vec<String> {
    required
        .iter()
        .filter(|name| !plt_contains(files, name))
        .cloned()
        .collect()
}
