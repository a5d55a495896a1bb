use std::fs;
use std::path::{Path, PathBuf};

use ae4_codec::{DEFAULT_MAX_DEPTH, DecodeOptions, Document, FormatKind, rebuild_file_name};
use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use crate::cli::{DetectArgs, ExportArgs, ImportArgs, KeysCommand};
use crate::keys;

/// Format given on the command line, or the one the file name implies.
fn resolve_kind(path: &Path, explicit: Option<FormatKind>) -> Result<FormatKind> {
    match explicit.or_else(|| FormatKind::detect(path)) {
        Some(kind) => Ok(kind),
        None => bail!(
            "cannot infer the format of {}; pass --type",
            path.display()
        ),
    }
}

/// Decode `args.input` and render it as JSON.
pub fn export_json(args: &ExportArgs) -> Result<String> {
    let kind = resolve_kind(&args.input, args.kind)?;
    let options = DecodeOptions {
        max_flow_depth: args.max_flow_depth.unwrap_or(DEFAULT_MAX_DEPTH),
    };
    let document = Document::load(&args.input, kind, &options)
        .with_context(|| format!("failed to decode {} as {kind}", args.input.display()))?;
    let json = if args.compact {
        document.to_json_compact()?
    } else {
        document.to_json_string()?
    };
    Ok(json)
}

pub fn run_export(args: &ExportArgs) -> Result<()> {
    let span = info_span!("export", input = %args.input.display());
    let _guard = span.enter();
    let json = export_json(args)?;
    match &args.out {
        Some(out) => {
            fs::write(out, format!("{json}\n"))
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!(out = %out.display(), "exported");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Rebuild a binary file from exported JSON, returning the path written.
pub fn run_import(args: &ImportArgs) -> Result<PathBuf> {
    let span = info_span!("import", input = %args.input.display());
    let _guard = span.enter();
    let json = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let document = Document::from_json_str(&json)
        .with_context(|| format!("invalid document in {}", args.input.display()))?;
    if let Some(kind) = args.kind
        && kind != document.kind()
    {
        bail!(
            "{} holds a {} document, not {kind}",
            args.input.display(),
            document.kind()
        );
    }

    let out = match &args.out {
        Some(out) => out.clone(),
        None => {
            let stem = args
                .input
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            let out = args
                .input
                .with_file_name(rebuild_file_name(&stem, &document));
            if out.exists() {
                warn!(out = %out.display(), "replacing existing file");
            }
            out
        }
    };
    document
        .save(&out)
        .with_context(|| format!("failed to write {}", out.display()))?;
    info!(out = %out.display(), format = %document.kind(), "rebuilt");
    Ok(out)
}

/// Inferred format key per file, `unknown` when none matches.
pub fn detect_lines(args: &DetectArgs) -> Vec<String> {
    args.files
        .iter()
        .map(|path| {
            let key = FormatKind::detect(path).map_or("unknown", FormatKind::key);
            format!("{}\t{key}", path.display())
        })
        .collect()
}

pub fn run_detect(args: &DetectArgs) {
    for line in detect_lines(args) {
        println!("{line}");
    }
}

pub fn run_keys(command: &KeysCommand) -> Result<()> {
    match command {
        KeysCommand::Extract(args) => {
            let summary = keys::extract(&args.dir, args.recursive)?;
            match summary.written {
                Some(path) => println!(
                    "extracted {} strings from {} files to {}",
                    summary.strings,
                    summary.files,
                    path.display()
                ),
                None => println!("no translatable strings found"),
            }
        }
        KeysCommand::Apply(args) => {
            let summary = keys::apply(&args.dir)?;
            println!(
                "replaced {} strings in {} files",
                summary.replaced, summary.files_patched
            );
        }
        KeysCommand::Prefill(args) => {
            let summary = keys::prefill(&args.dir)?;
            println!(
                "{} known translations, {} strings left in {}",
                summary.known,
                summary.missing,
                keys::TODO_FILE_NAME
            );
        }
        KeysCommand::Merge(args) => {
            let out = keys::merge(&args.dir)?;
            println!("merged translations into {}", out.display());
        }
    }
    Ok(())
}
