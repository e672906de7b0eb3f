//! Command handlers

use std::io::{BufRead, Read, Write};

use anyhow::{bail, Context, Result};

use notes_lite_app::AppState;
use notes_lite_core::content;
use notes_lite_core::traits::Confirm;
use notes_lite_core::types::{DeleteOutcome, Notebook};

use crate::Command;

/// Confirmation read from the terminal, or skipped with `--yes`.
struct PromptConfirm {
    assume_yes: bool,
}

impl Confirm for PromptConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{prompt} [y/N] ");
        let _ = std::io::stderr().flush();

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

pub async fn run(state: &AppState, command: Command, assume_yes: bool) -> Result<()> {
    let mut nb = state.load_notebook().await?;
    let confirm = PromptConfirm { assume_yes };

    match command {
        Command::Status => status(state, &nb).await,
        Command::Folders => folders(state, &nb),
        Command::List { folder, query } => {
            if let Some(folder) = folder {
                state.folder_service.select_folder(&mut nb, &folder)?;
            }
            if let Some(query) = query {
                state.search_service.set_query(&mut nb, &query);
            }
            list(state, &nb);
        }
        Command::Show { id } => show(&nb, &id)?,
        Command::New { text, folder } => {
            if let Some(folder) = folder {
                state.folder_service.select_folder(&mut nb, &folder)?;
            }
            let mut note = state.note_service.create_note(&mut nb).await?;
            if let Some(text) = text {
                note = state
                    .note_service
                    .update_content(&mut nb, &text_to_html(&text))
                    .await?;
            }
            println!("{}", note.id);
        }
        Command::Edit { id, text, html } => {
            let text = match text {
                Some(text) => text,
                None => read_stdin()?,
            };
            let body = if html { text } else { text_to_html(&text) };
            state.note_service.select_note(&mut nb, &id)?;
            let note = state.note_service.update_content(&mut nb, &body).await?;
            println!("{}\t{}", note.id, note.title);
        }
        Command::Rm { id } => {
            state.note_service.select_note(&mut nb, &id)?;
            let outcome = state
                .note_service
                .delete_active_note(&mut nb, &confirm)
                .await?;
            report(outcome);
        }
        Command::Mv { id, folder } => {
            state.note_service.select_note(&mut nb, &id)?;
            let note = state
                .note_service
                .move_active_to_folder(&mut nb, &folder)
                .await?;
            println!("{}\t{}", note.id, note.folder_key());
        }
        Command::Up { id, folder } => reorder(state, &mut nb, &id, folder, -1).await?,
        Command::Down { id, folder } => reorder(state, &mut nb, &id, folder, 1).await?,
        Command::Mkdir { name, parent } => {
            if let Some(parent) = parent {
                state.folder_service.select_folder(&mut nb, &parent)?;
            }
            let folder = state.folder_service.create_folder(&mut nb, &name).await?;
            println!("{}", folder.id);
        }
        Command::Rmdir { id } => {
            let outcome = state
                .folder_service
                .delete_folder(&mut nb, &id, &confirm)
                .await?;
            report(outcome);
        }
        Command::Tags => {
            for tag in state.search_service.all_tags(&nb) {
                println!("#{tag}");
            }
        }
        Command::Backlinks { id } => {
            for note in state.search_service.backlinks(&nb, &id)? {
                println!("{}\t{}", note.id, note.title);
            }
        }
    }

    for event in state.fallback_events().await {
        tracing::warn!(
            "{} was saved locally only: {}",
            event.operation,
            event.error
        );
    }
    Ok(())
}

async fn status(state: &AppState, nb: &Notebook) {
    println!("backend: {}", state.backend());
    println!("user:    {}", state.ctx.user_id());
    if let Some(reason) = state.local_reason {
        println!("reason:  {reason}");
    }
    // the root folder is implicit
    println!("folders: {}", nb.folders.len().saturating_sub(1));
    println!("notes:   {}", nb.notes.len());
    let fallbacks = state.fallback_events().await.len();
    if fallbacks > 0 {
        println!("fallbacks: {fallbacks}");
    }
}

fn folders(state: &AppState, nb: &Notebook) {
    let counts = state.folder_service.note_counts(nb);
    for entry in state.folder_service.tree(nb) {
        let count = counts.get(&entry.folder.id).copied().unwrap_or(0);
        println!("{}\t{} ({count})", entry.folder.id, entry.label());
    }
}

fn list(state: &AppState, nb: &Notebook) {
    for summary in state.search_service.summaries(nb) {
        println!(
            "{}\t{}\t{}\t{}",
            summary.id,
            summary.updated_at.format("%Y-%m-%d %H:%M"),
            summary.title,
            summary.snippet
        );
    }
}

fn show(nb: &Notebook, id: &str) -> Result<()> {
    let Some(note) = nb.note(id) else {
        bail!("Note not found: {id}");
    };
    println!("{}", note.title);
    if !note.tags.is_empty() {
        let tags: Vec<String> = note.tags.iter().map(|t| format!("#{t}")).collect();
        println!("{}", tags.join(" "));
    }
    println!();
    println!("{}", content::plain_text(&note.content).trim());
    Ok(())
}

async fn reorder(
    state: &AppState,
    nb: &mut Notebook,
    id: &str,
    folder: bool,
    delta: isize,
) -> Result<()> {
    let moved = if folder {
        state.folder_service.move_folder(nb, id, delta).await?
    } else {
        state.note_service.select_note(nb, id)?;
        state.note_service.move_active_note(nb, delta).await?
    };
    if !moved {
        println!("already at the {}", if delta < 0 { "top" } else { "bottom" });
    }
    Ok(())
}

fn report(outcome: DeleteOutcome) {
    match outcome {
        DeleteOutcome::Deleted => println!("deleted"),
        DeleteOutcome::Cancelled => println!("cancelled"),
    }
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read content from stdin")?;
    Ok(text)
}

/// Wraps each line of plain text in a block, escaping markup characters.
fn text_to_html(text: &str) -> String {
    text.lines()
        .map(|line| {
            let escaped = line
                .replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('>', "&gt;");
            if escaped.is_empty() {
                "<div><br></div>".to_string()
            } else {
                format!("<div>{escaped}</div>")
            }
        })
        .collect()
}
