//! Translation helpers over exported JSON trees.
//!
//! `extract` gathers every Japanese string stored under a translatable key
//! into `_translate_keys.json`, keyed by the file it came from:
//!
//! ```json
//! { "stage1.stg4_1020.json": { "スライム": "TODO" } }
//! ```
//!
//! Once the placeholders are filled in, `apply` writes the translations back
//! into the exported files, which can then be rebuilt with `ae4 import`.
//!
//! For games translated in several passes, `prefill` first fills the table
//! from earlier tables kept in a `_translate` directory and lists what is
//! left in `_todo.json`; `merge` folds the finished `_todo.json` back in.
//! None of these steps know anything about the binary formats.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::Value;

/// Name of the translation table inside the scanned directory.
pub const KEYS_FILE_NAME: &str = "_translate_keys.json";

/// Value of a table entry that has not been translated yet.
pub const PLACEHOLDER: &str = "TODO";

/// Object keys whose string values are offered for translation.
pub const TRANSLATABLE_KEYS: [&str; 8] = [
    "name",
    "text",
    "game_title",
    "description",
    "world_name",
    "memo",
    "character_name",
    "message",
];

/// Translation table: relative file path to original-to-translated strings.
pub type KeysTable = BTreeMap<String, BTreeMap<String, String>>;

/// Whether `text` contains kana or common CJK ideographs.
pub fn contains_japanese(text: &str) -> bool {
    text.chars()
        .any(|c| matches!(c, '\u{3040}'..='\u{30ff}' | '\u{4e00}'..='\u{9faf}'))
}

/// Collect translatable strings from a JSON tree.
pub fn collect_strings(value: &Value, found: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                match value {
                    Value::String(text)
                        if TRANSLATABLE_KEYS.contains(&key.as_str()) && contains_japanese(text) =>
                    {
                        found.insert(text.clone());
                    }
                    _ => collect_strings(value, found),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_strings(item, found);
            }
        }
        _ => {}
    }
}

/// Replace object string values found in `translations`, returning how
/// many were replaced. Entries still holding the placeholder are left alone.
pub fn apply_translations(value: &mut Value, translations: &BTreeMap<String, String>) -> usize {
    match value {
        Value::Object(map) => {
            let mut replaced = 0;
            for value in map.values_mut() {
                if let Value::String(text) = value {
                    if let Some(translated) = translations.get(text.as_str())
                        && translated != PLACEHOLDER
                    {
                        *text = translated.clone();
                        replaced += 1;
                    }
                } else {
                    replaced += apply_translations(value, translations);
                }
            }
            replaced
        }
        Value::Array(items) => items
            .iter_mut()
            .map(|item| apply_translations(item, translations))
            .sum(),
        _ => 0,
    }
}

/// Whether a path relative to the scanned directory is excluded.
///
/// Files inside a directory whose name starts with `__` and files whose
/// own name starts with `_translate` are skipped.
pub fn should_skip(relative: &Path) -> bool {
    let parts: Vec<_> = relative
        .components()
        .map(|part| part.as_os_str().to_string_lossy())
        .collect();
    let Some((file_name, dirs)) = parts.split_last() else {
        return true;
    };
    dirs.iter().any(|dir| dir.starts_with("__")) || file_name.starts_with("_translate")
}

/// List `.json` files under `dir`, sorted by path.
pub fn list_json_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let entries = fs::read_dir(&current)
            .with_context(|| format!("failed to read directory {}", current.display()))?;
        for entry in entries {
            let path = entry
                .with_context(|| format!("failed to read directory {}", current.display()))?
                .path();
            if path.is_dir() {
                if recursive {
                    pending.push(path);
                }
                continue;
            }
            let is_json = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if is_json {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Table key for a file: its path relative to the scanned directory with
/// `/` separators.
fn table_key(relative: &Path) -> String {
    relative
        .components()
        .map(|part| part.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Files that contributed at least one string.
    pub files: usize,
    /// Unique strings summed over files.
    pub strings: usize,
    /// The table written, or `None` when nothing was found.
    pub written: Option<PathBuf>,
}

/// Build `_translate_keys.json` for the JSON files in `dir`.
///
/// Files that cannot be parsed are logged and skipped. No table is written
/// when no translatable string is found.
pub fn extract(dir: &Path, recursive: bool) -> Result<ExtractSummary> {
    if !dir.is_dir() {
        bail!("directory not found: {}", dir.display());
    }

    let mut table = KeysTable::new();
    let mut summary = ExtractSummary::default();
    for path in list_json_files(dir, recursive)? {
        let relative = path.strip_prefix(dir).unwrap_or(&path);
        if should_skip(relative) {
            continue;
        }
        let value = match read_json(&path) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(path = %path.display(), "skipping file: {error:#}");
                continue;
            }
        };
        let mut found = BTreeSet::new();
        collect_strings(&value, &mut found);
        if found.is_empty() {
            continue;
        }
        tracing::debug!(path = %relative.display(), strings = found.len(), "collected strings");
        summary.files += 1;
        summary.strings += found.len();
        table.insert(
            table_key(relative),
            found
                .into_iter()
                .map(|text| (text, PLACEHOLDER.to_string()))
                .collect(),
        );
    }

    if table.is_empty() {
        return Ok(summary);
    }
    let out = dir.join(KEYS_FILE_NAME);
    write_json(&out, &table)?;
    summary.written = Some(out);
    Ok(summary)
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ApplySummary {
    /// Files rewritten with at least one replacement.
    pub files_patched: usize,
    pub replaced: usize,
    /// Table entries whose file does not exist.
    pub missing: Vec<String>,
}

/// Write the translations in `dir/_translate_keys.json` into the listed files.
///
/// Files without any replacement are left untouched.
pub fn apply(dir: &Path) -> Result<ApplySummary> {
    let table = read_table(dir, KEYS_FILE_NAME)?;

    let mut summary = ApplySummary::default();
    for (relative, translations) in &table {
        let path = dir.join(relative);
        if !path.is_file() {
            tracing::warn!(file = %relative, "skipping missing file");
            summary.missing.push(relative.clone());
            continue;
        }
        let mut value = read_json(&path)?;
        let replaced = apply_translations(&mut value, translations);
        if replaced == 0 {
            continue;
        }
        write_json(&path, &value)?;
        tracing::info!(file = %relative, replaced, "patched file");
        summary.files_patched += 1;
        summary.replaced += replaced;
    }
    Ok(summary)
}

/// Translation table with known translations filled in.
pub const PREFILLED_FILE_NAME: &str = "_translate_keys_pre.json";

/// Flat list of strings still missing a translation.
pub const TODO_FILE_NAME: &str = "_todo.json";

/// Directory of earlier translation tables reused by `prefill`.
pub const MEMORY_DIR_NAME: &str = "_translate";

/// Locate the translation memory for `dir`.
///
/// Looks in `dir/_translate`, then next to `dir`, then in the working
/// directory.
pub fn find_memory_dir(dir: &Path) -> Option<PathBuf> {
    let mut candidates = vec![dir.join(MEMORY_DIR_NAME)];
    if let Some(parent) = dir.parent() {
        candidates.push(parent.join(MEMORY_DIR_NAME));
    }
    candidates.push(PathBuf::from(MEMORY_DIR_NAME));
    candidates.into_iter().find(|path| path.is_dir())
}

/// Flatten every table in `memory_dir` into one original-to-translated map.
///
/// Tables are read in path order; a later table wins on conflicts.
pub fn load_memory(memory_dir: &Path) -> Result<BTreeMap<String, String>> {
    let mut memory = BTreeMap::new();
    for path in list_json_files(memory_dir, false)? {
        let table = read_json(&path).and_then(|value| {
            serde_json::from_value::<KeysTable>(value)
                .with_context(|| format!("invalid translation table {}", path.display()))
        });
        match table {
            Ok(table) => memory.extend(table.into_values().flatten()),
            Err(error) => tracing::warn!(path = %path.display(), "skipping table: {error:#}"),
        }
    }
    Ok(memory)
}

/// Fill entries of `table` from `memory`.
///
/// Returns the filled table and the originals that were still the
/// placeholder and had no translation in memory.
pub fn prefill_table(
    table: &KeysTable,
    memory: &BTreeMap<String, String>,
) -> (KeysTable, BTreeSet<String>) {
    let mut missing = BTreeSet::new();
    let filled = table
        .iter()
        .map(|(file, entries)| {
            let entries = entries
                .iter()
                .map(|(original, current)| {
                    let value = match memory.get(original) {
                        Some(known) => known.clone(),
                        None => {
                            if current == PLACEHOLDER {
                                missing.insert(original.clone());
                            }
                            current.clone()
                        }
                    };
                    (original.clone(), value)
                })
                .collect();
            (file.clone(), entries)
        })
        .collect();
    (filled, missing)
}

/// Replace placeholders in `prefilled` with translations from `todo`.
pub fn merge_table(prefilled: &KeysTable, todo: &BTreeMap<String, String>) -> KeysTable {
    prefilled
        .iter()
        .map(|(file, entries)| {
            let entries = entries
                .iter()
                .map(|(original, current)| {
                    let value = match todo.get(original) {
                        Some(done) if current == PLACEHOLDER => done.clone(),
                        _ => current.clone(),
                    };
                    (original.clone(), value)
                })
                .collect();
            (file.clone(), entries)
        })
        .collect()
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct PrefillSummary {
    /// Size of the translation memory, zero when none was found.
    pub known: usize,
    /// Strings written to `_todo.json`.
    pub missing: usize,
}

/// Fill `_translate_keys.json` from the translation memory.
///
/// Writes the result to `_translate_keys_pre.json` and the strings still
/// missing to `_todo.json` as a flat `{original: "TODO"}` map. The source
/// table is left as is.
pub fn prefill(dir: &Path) -> Result<PrefillSummary> {
    let table = read_table(dir, KEYS_FILE_NAME)?;
    let memory = match find_memory_dir(dir) {
        Some(memory_dir) => {
            let memory = load_memory(&memory_dir)?;
            tracing::info!(dir = %memory_dir.display(), known = memory.len(), "loaded translation memory");
            memory
        }
        None => {
            tracing::warn!("no translation memory found");
            BTreeMap::new()
        }
    };

    let (filled, missing) = prefill_table(&table, &memory);
    write_json(&dir.join(PREFILLED_FILE_NAME), &filled)?;
    let todo: BTreeMap<_, _> = missing
        .iter()
        .map(|original| (original.as_str(), PLACEHOLDER))
        .collect();
    write_json(&dir.join(TODO_FILE_NAME), &todo)?;
    Ok(PrefillSummary {
        known: memory.len(),
        missing: missing.len(),
    })
}

/// Merge a completed `_todo.json` into `_translate_keys_pre.json`, writing
/// the result over `_translate_keys.json`.
pub fn merge(dir: &Path) -> Result<PathBuf> {
    let prefilled = read_table(dir, PREFILLED_FILE_NAME)?;
    let todo_path = dir.join(TODO_FILE_NAME);
    if !todo_path.is_file() {
        bail!("todo file not found: {}", todo_path.display());
    }
    let todo: BTreeMap<String, String> = serde_json::from_value(read_json(&todo_path)?)
        .with_context(|| format!("invalid todo file {}", todo_path.display()))?;

    let out = dir.join(KEYS_FILE_NAME);
    write_json(&out, &merge_table(&prefilled, &todo))?;
    Ok(out)
}

fn read_table(dir: &Path, name: &str) -> Result<KeysTable> {
    if !dir.is_dir() {
        bail!("directory not found: {}", dir.display());
    }
    let path = dir.join(name);
    if !path.is_file() {
        bail!("translation file not found: {}", path.display());
    }
    serde_json::from_value(read_json(&path)?)
        .with_context(|| format!("invalid translation table {}", path.display()))
}

fn read_json(path: &Path) -> Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contains_japanese() {
        assert!(contains_japanese("ひらがな"));
        assert!(contains_japanese("カタカナ"));
        assert!(contains_japanese("abc漢字"));
        assert!(!contains_japanese("plain ascii"));
        assert!(!contains_japanese(""));
    }

    #[test]
    fn test_collect_only_translatable_keys() {
        let value = json!({
            "name": "勇者",
            "path": "画像.png",
            "flows": [{ "memo": "メモ", "commands": [{ "message": "hello" }] }],
            "terms": ["スコア"],
        });
        let mut found = BTreeSet::new();
        collect_strings(&value, &mut found);
        assert_eq!(
            found.into_iter().collect::<Vec<_>>(),
            vec!["メモ".to_string(), "勇者".to_string()]
        );
    }

    #[test]
    fn test_apply_skips_placeholders() {
        let mut value = json!({
            "name": "勇者",
            "items": [{ "text": "鍵", "path": "鍵" }],
            "terms": ["勇者"],
        });
        let translations = BTreeMap::from([
            ("勇者".to_string(), "Hero".to_string()),
            ("鍵".to_string(), PLACEHOLDER.to_string()),
        ]);
        assert_eq!(apply_translations(&mut value, &translations), 1);
        assert_eq!(value["name"], "Hero");
        assert_eq!(value["items"][0]["text"], "鍵");
        // bare array strings are not object values
        assert_eq!(value["terms"][0], "勇者");
    }

    #[test]
    fn test_prefill_reports_only_placeholders() {
        let table = KeysTable::from([(
            "a.json".to_string(),
            BTreeMap::from([
                ("勇者".to_string(), PLACEHOLDER.to_string()),
                ("魔王".to_string(), PLACEHOLDER.to_string()),
                ("村".to_string(), "Village".to_string()),
            ]),
        )]);
        let memory = BTreeMap::from([("勇者".to_string(), "Hero".to_string())]);
        let (filled, missing) = prefill_table(&table, &memory);
        assert_eq!(filled["a.json"]["勇者"], "Hero");
        assert_eq!(filled["a.json"]["村"], "Village");
        assert_eq!(missing.into_iter().collect::<Vec<_>>(), vec!["魔王".to_string()]);
    }

    #[test]
    fn test_merge_only_replaces_placeholders() {
        let prefilled = KeysTable::from([(
            "a.json".to_string(),
            BTreeMap::from([
                ("勇者".to_string(), "Hero".to_string()),
                ("魔王".to_string(), PLACEHOLDER.to_string()),
            ]),
        )]);
        let todo = BTreeMap::from([
            ("勇者".to_string(), "Brave".to_string()),
            ("魔王".to_string(), "Demon King".to_string()),
        ]);
        let merged = merge_table(&prefilled, &todo);
        assert_eq!(merged["a.json"]["勇者"], "Hero");
        assert_eq!(merged["a.json"]["魔王"], "Demon King");
    }

    #[test]
    fn test_should_skip() {
        assert!(should_skip(Path::new("_translate_keys.json")));
        assert!(should_skip(Path::new("__backup/stage.json")));
        assert!(should_skip(Path::new("a/__old/b/stage.json")));
        assert!(!should_skip(Path::new("__stage.json")));
        assert!(!should_skip(Path::new("data/System.json")));
    }

    #[test]
    fn test_table_key_uses_forward_slashes() {
        let relative: PathBuf = ["data", "Anime.json"].iter().collect();
        assert_eq!(table_key(&relative), "data/Anime.json");
    }
}
