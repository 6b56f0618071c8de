//! Command lines handed to `dialyzer`.
//!
//! Lines run through `sh -c`, so every path is shell-quoted. Plain paths
//! stay unquoted and the line reads exactly like the documented contract.

use std::path::Path;

/// Quotes `word` for a POSIX shell when it has anything outside a safe set.
pub fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+:=@,%".contains(c));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', "'\\''"))
    }
}

fn quote_path(path: &Path) -> String {
    shell_quote(&path.display().to_string())
}

/// One `-pa <deps_dir>/<dep>/ebin` flag per declared dependency that is
/// also required, in declaration order.
pub fn aux_search_paths(deps: &[String], required: &[String], deps_dir: &Path) -> Vec<String> {
    deps.iter()
        .filter(|dep| required.contains(dep))
        .map(|dep| format!("-pa {}", quote_path(&deps_dir.join(dep).join("ebin"))))
        .collect()
}

/// `dialyzer --output_plt <path> --build_plt <aux flags> --apps <names> -r <dirs>`
///
/// `aux_flags` are inserted as given; `scan_dirs` are quoted here.
pub fn build_command(
    executable: &str,
    plt: &Path,
    aux_flags: &[String],
    apps: &[String],
    scan_dirs: &[String],
) -> String {
    let mut parts = vec![
        shell_quote(executable),
        "--output_plt".to_string(),
        quote_path(plt),
        "--build_plt".to_string(),
    ];
    parts.extend(aux_flags.iter().cloned());
    parts.push("--apps".to_string());
    parts.push(apps.join(" "));
    parts.push("-r".to_string());
    let dirs: Vec<String> = scan_dirs.iter().map(|d| shell_quote(d)).collect();
    parts.push(dirs.join(" "));
    parts.join(" ")
}

/// `dialyzer --add_to_plt --plt <path> --apps <missing>`
pub fn add_command(executable: &str, plt: &Path, missing: &[String]) -> String {
    format!(
        "{} --add_to_plt --plt {} --apps {}",
        shell_quote(executable),
        quote_path(plt),
        missing.join(" ")
    )
}

/// `dialyzer --plt_info --plt <path>`
pub fn info_command(executable: &str, plt: &Path) -> String {
    format!("{} --plt_info --plt {}", shell_quote(executable), quote_path(plt))
}
