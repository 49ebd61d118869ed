use std::io::Write;
use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use tracing::error;

use crate::cli::{write_json, wprint, wprintln};
use crate::dump::category::HandlerSet;
use crate::dump::layout::{session_date, DumpRoot};
use crate::dump::record::Record;
use crate::dump::sports::{Resolution, SportReference, SportsIndex};
use crate::dump::traverse::{traverse_parallel, DumpItem, DumpTraversal, Outcome, Scope};
use crate::PolarError;

/// Options for `--dump` mode.
pub struct DumpOptions {
    pub dump: String,
    pub json: bool,
    /// 0 walks sequentially; anything else walks users in parallel.
    pub threads: usize,
}

/// Counts reported after a dump walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DumpSummary {
    pub sports: usize,
    pub decoded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub unresolved_references: usize,
}

impl DumpSummary {
    fn record(&mut self, item: &DumpItem) {
        match &item.outcome {
            Outcome::Decoded { references, .. } => {
                self.decoded += 1;
                self.unresolved_references += references.iter().filter(|r| !r.is_resolved()).count();
            }
            Outcome::Skipped => self.skipped += 1,
            Outcome::Failed(_) => self.failed += 1,
        }
    }
}

#[derive(Serialize)]
struct DumpJson<'a> {
    dump: &'a str,
    sports: Vec<SportJson>,
    items: Vec<ItemJson<'a>>,
    summary: &'a DumpSummary,
}

#[derive(Serialize)]
struct SportJson {
    id: u64,
    name: Option<String>,
}

#[derive(Serialize)]
struct ItemJson<'a> {
    path: String,
    #[serde(flatten)]
    scope: &'a Scope,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_date: Option<String>,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<&'a Record>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    references: &'a [SportReference],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Build the sport index for a dump and decode everything under `U/`.
///
/// Per-file failures are reported inline and counted; they do not make this
/// return `Err`. Only an invalid dump root or a failed sport index build does.
///
/// A sequential text walk prints each item as soon as it is decoded and
/// holds nothing but the running summary. JSON output and parallel walks
/// collect the items first.
pub fn execute(opts: &DumpOptions, writer: &mut dyn Write) -> Result<DumpSummary, PolarError> {
    let root = DumpRoot::open(&opts.dump).inspect_err(|_| {
        error!("Invalid dump dir ({}).", opts.dump);
    })?;

    let sports = root.build_sports_index()?;
    let mut summary = DumpSummary {
        sports: sports.len(),
        ..DumpSummary::default()
    };

    if opts.json {
        let items = collect_items(&root, &sports, opts.threads);
        for item in &items {
            summary.record(item);
        }
        let doc = DumpJson {
            dump: &opts.dump,
            sports: sports
                .iter()
                .map(|(id, sport)| SportJson {
                    id,
                    name: sport.display_name().map(str::to_string),
                })
                .collect(),
            items: items.iter().map(|item| item_json(root.path(), item)).collect(),
            summary: &summary,
        };
        write_json(writer, &doc)?;
        return Ok(summary);
    }

    wprintln!(writer, "Found {} sports descriptors.", sports.len())?;
    let items: Box<dyn Iterator<Item = DumpItem> + '_> = if opts.threads == 0 {
        Box::new(DumpTraversal::new(root.path(), &sports))
    } else {
        Box::new(traverse_parallel(root.path(), &sports, HandlerSet::builtin()).into_iter())
    };
    for item in items {
        summary.record(&item);
        print_item(writer, root.path(), &item)?;
    }
    print_summary(writer, &summary)?;
    Ok(summary)
}

fn collect_items(root: &DumpRoot, sports: &SportsIndex, threads: usize) -> Vec<DumpItem> {
    if threads == 0 {
        return DumpTraversal::new(root.path(), sports).collect();
    }
    traverse_parallel(root.path(), sports, HandlerSet::builtin())
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn session_label(scope: &Scope) -> Option<String> {
    let session = scope.session.as_deref()?;
    Some(match session_date(session) {
        Some(date) => date.to_string(),
        None => session.to_string(),
    })
}

fn item_json<'a>(root: &Path, item: &'a DumpItem) -> ItemJson<'a> {
    let date = item
        .scope
        .session
        .as_deref()
        .and_then(session_date)
        .map(|d| d.to_string());
    let mut json = ItemJson {
        path: relative(root, &item.path),
        scope: &item.scope,
        session_date: date,
        status: "skipped",
        record: None,
        references: &[],
        error: None,
    };
    match &item.outcome {
        Outcome::Decoded { record, references } => {
            json.status = "decoded";
            json.record = Some(record);
            json.references = references.as_slice();
        }
        Outcome::Skipped => {}
        Outcome::Failed(e) => {
            json.status = "failed";
            json.error = Some(e.to_string());
        }
    }
    json
}

fn print_item(writer: &mut dyn Write, root: &Path, item: &DumpItem) -> Result<(), PolarError> {
    let path = relative(root, &item.path);
    match &item.outcome {
        Outcome::Decoded { record, references } => {
            wprint!(writer, "{}", path.bold())?;
            if let Some(label) = session_label(&item.scope) {
                wprint!(writer, "  [{}]", label)?;
            }
            wprintln!(writer, "  {}", record.schema())?;
            wprintln!(writer, "{}", record.render_text())?;
            for reference in references {
                print_reference(writer, reference)?;
            }
        }
        // Already logged at debug level; not part of the report.
        Outcome::Skipped => {}
        Outcome::Failed(e) => {
            wprintln!(writer, "{}  {}", path.bold(), format!("FAILED: {}", e).red())?;
        }
    }
    Ok(())
}

fn print_reference(writer: &mut dyn Write, reference: &SportReference) -> Result<(), PolarError> {
    match &reference.resolution {
        Resolution::Resolved { name } => wprintln!(
            writer,
            "  sport {} -> {}",
            reference.sport_id,
            name.as_deref().unwrap_or("(unnamed)").green()
        ),
        Resolution::Unresolved => wprintln!(
            writer,
            "  sport {} -> {}",
            reference.sport_id,
            "not in sport index".yellow()
        ),
    }
}

fn print_summary(writer: &mut dyn Write, summary: &DumpSummary) -> Result<(), PolarError> {
    wprintln!(writer)?;
    wprintln!(writer, "{}", "Summary".bold())?;
    wprintln!(writer, "  Sports:     {}", summary.sports)?;
    wprintln!(writer, "  Decoded:    {}", summary.decoded)?;
    wprintln!(writer, "  Skipped:    {}", summary.skipped)?;
    if summary.failed > 0 {
        wprintln!(writer, "  Failed:     {}", summary.failed.to_string().red())?;
    } else {
        wprintln!(writer, "  Failed:     0")?;
    }
    if summary.unresolved_references > 0 {
        wprintln!(
            writer,
            "  Unresolved sport references: {}",
            summary.unresolved_references.to_string().yellow()
        )?;
    }
    Ok(())
}
