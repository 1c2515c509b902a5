//! Local note commands: ls, new, show, edit, rm.
//!
//! These run the same validators and service as the HTTP API, directly
//! against the data file.

use anyhow::{Context, Result};
use chrono::SecondsFormat;
use serde_json::{Map, Value};
use std::io::{self, Write};
use std::path::Path;

use super::{open_service, truncate_str, validated};
use crate::cli::output::{Output, OutputFormat};
use crate::cli::{EditArgs, ListArgs, NewArgs, RemoveArgs, ShowArgs};
use crate::domain::{
    ListParams, Note, validate_create, validate_id, validate_list, validate_update,
};
use crate::infra::NoteStore;
use crate::service::NoteService;

pub fn handle_list(args: &ListArgs, data_file: &Path) -> Result<()> {
    list_notes(&open_service(data_file), args, &mut io::stdout().lock())
}

pub fn handle_new(args: &NewArgs, data_file: &Path) -> Result<()> {
    new_note(&open_service(data_file), args, &mut io::stdout().lock())
}

pub fn handle_show(args: &ShowArgs, data_file: &Path) -> Result<()> {
    show_note(&open_service(data_file), args, &mut io::stdout().lock())
}

pub fn handle_edit(args: &EditArgs, data_file: &Path) -> Result<()> {
    edit_note(&open_service(data_file), args, &mut io::stdout().lock())
}

pub fn handle_remove(args: &RemoveArgs, data_file: &Path) -> Result<()> {
    remove_note(&open_service(data_file), args, &mut io::stdout().lock())
}

/// Builds a JSON object from the flags that were actually given, so an
/// omitted flag stays absent rather than becoming `null`.
fn body<const N: usize>(fields: [(&str, Option<&String>); N]) -> Value {
    let map: Map<String, Value> = fields
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), Value::String(v.clone()))))
        .collect();
    Value::Object(map)
}

pub(crate) fn list_notes<S: NoteStore>(
    service: &NoteService<S>,
    args: &ListArgs,
    out: &mut impl Write,
) -> Result<()> {
    let params = ListParams {
        page: args.page.clone(),
        limit: args.limit.clone(),
        search: args.search.clone(),
    };
    let query = validated(validate_list(&params))?;
    let page = service.list(&query).context("failed to list notes")?;

    match args.format {
        OutputFormat::Human => {
            if page.items.is_empty() {
                writeln!(out, "No notes found.")?;
                return Ok(());
            }

            writeln!(out, "{:<36}  {:<40}  {:>16}", "ID", "Title", "Updated")?;
            writeln!(
                out,
                "{:<36}  {:<40}  {:>16}",
                "-".repeat(36),
                "-".repeat(40),
                "-".repeat(16)
            )?;
            for note in &page.items {
                writeln!(
                    out,
                    "{:<36}  {:<40}  {:>16}",
                    note.id(),
                    truncate_str(note.title(), 40),
                    note.updated_at().format("%Y-%m-%d %H:%M")
                )?;
            }

            let p = page.pagination;
            writeln!(out)?;
            writeln!(
                out,
                "Page {} of {} ({} note(s))",
                p.page,
                p.total_pages.max(1),
                p.total
            )?;
        }
        OutputFormat::Json => {
            let output = Output::paginated(&page.items, page.pagination);
            writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        }
    }

    Ok(())
}

pub(crate) fn new_note<S: NoteStore>(
    service: &NoteService<S>,
    args: &NewArgs,
    out: &mut impl Write,
) -> Result<()> {
    let request = body([
        ("title", Some(&args.title)),
        ("content", args.content.as_ref()),
    ]);
    let new = validated(validate_create(&request))?;
    let note = service.create(new).context("failed to create note")?;

    write_result(out, "Created", &note, args.format)
}

pub(crate) fn show_note<S: NoteStore>(
    service: &NoteService<S>,
    args: &ShowArgs,
    out: &mut impl Write,
) -> Result<()> {
    let id = validated(validate_id(&args.id))?;
    let note = service.get(&id)?;

    match args.format {
        OutputFormat::Human => write_details(out, &note),
        OutputFormat::Json => write_json(out, &note),
    }
}

pub(crate) fn edit_note<S: NoteStore>(
    service: &NoteService<S>,
    args: &EditArgs,
    out: &mut impl Write,
) -> Result<()> {
    let request = body([
        ("title", args.title.as_ref()),
        ("content", args.content.as_ref()),
    ]);
    let (id, patch) = validated(validate_update(&args.id, &request))?;
    let note = service.update(&id, patch)?;

    write_result(out, "Updated", &note, args.format)
}

pub(crate) fn remove_note<S: NoteStore>(
    service: &NoteService<S>,
    args: &RemoveArgs,
    out: &mut impl Write,
) -> Result<()> {
    let id = validated(validate_id(&args.id))?;
    let note = service.delete(&id)?;

    write_result(out, "Deleted", &note, args.format)
}

fn write_result(out: &mut impl Write, verb: &str, note: &Note, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            writeln!(out, "{verb}: {note}")?;
            Ok(())
        }
        OutputFormat::Json => write_json(out, note),
    }
}

fn write_json(out: &mut impl Write, note: &Note) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(&Output::new(note))?)?;
    Ok(())
}

fn write_details(out: &mut impl Write, note: &Note) -> Result<()> {
    writeln!(out, "# {}", note.title())?;
    writeln!(out)?;
    writeln!(
        out,
        "ID: {}  Created: {}  Updated: {}",
        note.id(),
        note.created_at().to_rfc3339_opts(SecondsFormat::Millis, true),
        note.updated_at().to_rfc3339_opts(SecondsFormat::Millis, true)
    )?;

    if !note.content().is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", note.content())?;
    }
    Ok(())
}
