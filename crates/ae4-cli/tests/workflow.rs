//! Integration tests for the export, translate and rebuild workflow.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use ae4_cli::cli::{ExportArgs, ImportArgs};
use ae4_cli::commands::{export_json, run_export, run_import};
use ae4_cli::keys::{self, KEYS_FILE_NAME, KeysTable};
use ae4_codec::formats::{Bgm, Catalog};
use ae4_codec::{DecodeOptions, Document, FormatKind};
use tempfile::TempDir;

fn bgm_document() -> Document {
    Document::Bgm(Catalog {
        version: 0x03FC,
        elements: vec![Bgm {
            volume: 70,
            name: "テーマ".to_string(),
            path: "bgm/theme.ogg".to_string(),
            ..Bgm::default()
        }],
    })
}

fn export_args(input: &Path) -> ExportArgs {
    ExportArgs {
        input: input.to_path_buf(),
        kind: None,
        out: None,
        compact: false,
        max_flow_depth: None,
    }
}

fn import_args(input: &Path) -> ImportArgs {
    ImportArgs {
        input: input.to_path_buf(),
        kind: None,
        out: None,
    }
}

#[test]
fn test_export_json_shape() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Bgm.dat");
    bgm_document().save(&path).unwrap();

    let json = export_json(&export_args(&path)).unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "format": "bgm",
      "version": 1020,
      "elements": [
        {
          "record": "Bgm",
          "header": 0,
          "is_name_same_path": 0,
          "volume": 70,
          "name": "テーマ",
          "path": "bgm/theme.ogg"
        }
      ]
    }
    "#);

    let compact = export_json(&ExportArgs {
        compact: true,
        ..export_args(&path)
    })
    .unwrap();
    assert!(!compact.contains('\n'));
    assert!(compact.starts_with(r#"{"format":"bgm","version":1020,"#));
}

#[test]
fn test_export_needs_a_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("music.bin");
    bgm_document().save(&path).unwrap();

    let err = export_json(&export_args(&path)).unwrap_err();
    assert!(format!("{err:#}").contains("--type"));

    let json = export_json(&ExportArgs {
        kind: Some(FormatKind::Bgm),
        ..export_args(&path)
    })
    .unwrap();
    assert_eq!(Document::from_json_str(&json).unwrap(), bgm_document());
}

#[test]
fn test_export_reports_decode_failure() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stage1.stg4_1020");
    fs::write(&path, 0xB6u32.to_le_bytes()).unwrap();

    let err = export_json(&export_args(&path)).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("as stage4"), "{message}");
}

#[test]
fn test_import_rebuilds_next_to_input() {
    let dir = TempDir::new().unwrap();
    let original = dir.path().join("Bgm.dat");
    bgm_document().save(&original).unwrap();
    let original_bytes = fs::read(&original).unwrap();

    let json_path = dir.path().join("Bgm.dat.json");
    run_export(&ExportArgs {
        out: Some(json_path.clone()),
        ..export_args(&original)
    })
    .unwrap();
    fs::remove_file(&original).unwrap();

    let out = run_import(&import_args(&json_path)).unwrap();
    assert_eq!(out, original);
    assert_eq!(fs::read(&out).unwrap(), original_bytes);
}

/// Log sink shared with the test body.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_import_warns_before_replacing_input() {
    let dir = TempDir::new().unwrap();
    let original = dir.path().join("Bgm.dat");
    fs::write(&original, b"stale").unwrap();
    let json_path = dir.path().join("Bgm.json");
    fs::write(&json_path, bgm_document().to_json_string().unwrap()).unwrap();

    let logs = CapturedLogs::default();
    let sink = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || sink.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, || run_import(&import_args(&json_path)))
        .unwrap();

    assert_eq!(out, original);
    assert_eq!(fs::read(&out).unwrap(), bgm_document().to_bytes().unwrap());
    let logs = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(logs.contains("replacing existing file"), "{logs}");
}

#[test]
fn test_import_rejects_mismatched_type() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("Bgm.json");
    fs::write(&json_path, bgm_document().to_json_string().unwrap()).unwrap();

    let err = run_import(&ImportArgs {
        kind: Some(FormatKind::Sound),
        ..import_args(&json_path)
    })
    .unwrap_err();
    assert!(err.to_string().contains("holds a bgm document, not sound"));
    assert!(!dir.path().join("Bgm.dat").exists());
}

#[test]
fn test_import_to_explicit_path() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("export.json");
    fs::write(&json_path, bgm_document().to_json_string().unwrap()).unwrap();
    let out = dir.path().join("rebuilt").join("Bgm.dat");
    fs::create_dir(out.parent().unwrap()).unwrap();

    let written = run_import(&ImportArgs {
        out: Some(out.clone()),
        ..import_args(&json_path)
    })
    .unwrap();
    assert_eq!(written, out);
    let loaded = Document::load(&out, FormatKind::Bgm, &DecodeOptions::default()).unwrap();
    assert_eq!(loaded, bgm_document());
}

#[test]
fn test_keys_extract_skips_reserved_paths() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join("Bgm.json"), bgm_document().to_json_string().unwrap()).unwrap();
    fs::write(root.join("broken.json"), "{ not json").unwrap();
    fs::create_dir_all(root.join("__backup")).unwrap();
    fs::write(root.join("__backup/old.json"), r#"{"name": "古い"}"#).unwrap();
    fs::create_dir_all(root.join("stages")).unwrap();
    fs::write(
        root.join("stages/one.json"),
        r#"{"memo": "メモ", "message": "ok", "path": "画像"}"#,
    )
    .unwrap();

    let flat = keys::extract(root, false).unwrap();
    assert_eq!((flat.files, flat.strings), (1, 1));

    let summary = keys::extract(root, true).unwrap();
    assert_eq!((summary.files, summary.strings), (2, 2));
    assert_eq!(summary.written, Some(root.join(KEYS_FILE_NAME)));

    let table = fs::read_to_string(root.join(KEYS_FILE_NAME)).unwrap();
    insta::assert_snapshot!(table.trim_end(), @r#"
    {
      "Bgm.json": {
        "テーマ": "TODO"
      },
      "stages/one.json": {
        "メモ": "TODO"
      }
    }
    "#);
}

#[test]
fn test_keys_extract_without_matches_writes_nothing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.json"), r#"{"name": "plain"}"#).unwrap();

    let summary = keys::extract(dir.path(), true).unwrap();
    assert_eq!(summary.written, None);
    assert!(!dir.path().join(KEYS_FILE_NAME).exists());
}

#[test]
fn test_keys_apply_requires_table() {
    let dir = TempDir::new().unwrap();
    let err = keys::apply(dir.path()).unwrap_err();
    assert!(err.to_string().contains("translation file not found"));
}

#[test]
fn test_translate_then_rebuild() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    let original = root.join("Bgm.dat");
    bgm_document().save(&original).unwrap();
    let json_path = root.join("Bgm.json");
    run_export(&ExportArgs {
        out: Some(json_path.clone()),
        ..export_args(&original)
    })
    .unwrap();

    keys::extract(root, false).unwrap();
    let table_path = root.join(KEYS_FILE_NAME);
    let mut table: KeysTable =
        serde_json::from_str(&fs::read_to_string(&table_path).unwrap()).unwrap();
    table
        .get_mut("Bgm.json")
        .unwrap()
        .insert("テーマ".to_string(), "Theme".to_string());
    table.insert(
        "gone.json".to_string(),
        [("消えた".to_string(), "Gone".to_string())].into(),
    );
    fs::write(&table_path, serde_json::to_string_pretty(&table).unwrap()).unwrap();

    let summary = keys::apply(root).unwrap();
    assert_eq!(summary.files_patched, 1);
    assert_eq!(summary.replaced, 1);
    assert_eq!(summary.missing, vec!["gone.json".to_string()]);

    let out = run_import(&import_args(&json_path)).unwrap();
    let Document::Bgm(catalog) =
        Document::load(&out, FormatKind::Bgm, &DecodeOptions::default()).unwrap()
    else {
        panic!("expected a bgm catalog");
    };
    assert_eq!(catalog.elements[0].name, "Theme");
    assert_eq!(catalog.elements[0].path, "bgm/theme.ogg");
}

#[test]
fn test_prefill_then_merge() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::write(
        root.join(KEYS_FILE_NAME),
        r#"{"a.json": {"勇者": "TODO", "魔王": "TODO"}, "b.json": {"村": "TODO"}}"#,
    )
    .unwrap();
    fs::create_dir(root.join("_translate")).unwrap();
    fs::write(
        root.join("_translate/earlier.json"),
        r#"{"old.json": {"勇者": "Hero", "村": "Village"}}"#,
    )
    .unwrap();

    let summary = keys::prefill(root).unwrap();
    assert_eq!((summary.known, summary.missing), (2, 1));
    let todo = fs::read_to_string(root.join(keys::TODO_FILE_NAME)).unwrap();
    insta::assert_snapshot!(todo.trim_end(), @r#"
    {
      "魔王": "TODO"
    }
    "#);

    fs::write(root.join(keys::TODO_FILE_NAME), r#"{"魔王": "Demon King"}"#).unwrap();
    let out = keys::merge(root).unwrap();
    let merged: KeysTable = serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(merged["a.json"]["勇者"], "Hero");
    assert_eq!(merged["a.json"]["魔王"], "Demon King");
    assert_eq!(merged["b.json"]["村"], "Village");
}

#[test]
fn test_merge_requires_todo_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(keys::PREFILLED_FILE_NAME), "{}").unwrap();
    let err = keys::merge(dir.path()).unwrap_err();
    assert!(err.to_string().contains("todo file not found"));
}
