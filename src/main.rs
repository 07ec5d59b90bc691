use std::{env, path::PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{self, WrapErr};
use notekeeper::{config, data_locator, init_tracing, open_file_store, summary_line, types::{NoteId, NotePatch}};

#[derive(Debug, Parser)]
#[command(version, about = "Keep short text notes on this machine", rename_all = "kebab")]
struct Args {
	/// Config file; defaults to `config.toml` in the data directory.
	#[arg(long, short = 'c', value_name = "FILE", global = true)]
	config: Option<PathBuf>,

	/// Data directory, overriding discovery.
	#[arg(long, short = 'd', value_name = "DIR", global = true)]
	dir: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// List notes, newest first, optionally filtered by QUERY.
	List { query: Option<String> },
	/// Create a note.
	New {
		#[arg(long, short = 't')]
		title:   Option<String>,
		#[arg(long, short = 'b')]
		content: Option<String>,
	},
	/// Change the title or content of a note.
	Edit {
		id:      String,
		#[arg(long, short = 't')]
		title:   Option<String>,
		#[arg(long, short = 'b')]
		content: Option<String>,
	},
	/// Print one note in full.
	Show { id: String },
	/// Delete a note.
	Delete { id: String },
}

fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = Args::parse();

	let cwd = env::current_dir().wrap_err("Cannot determine the working directory")?;
	// The config file may itself name the data directory, so probe without it first
	let probed = data_locator::resolve_data_directory(args.dir.as_deref(), None, &cwd);
	let config = config::load_or_default(args.config.as_deref(), &probed)?;
	init_tracing(&config.log.level);

	let data_dir =
		data_locator::resolve_data_directory(args.dir.as_deref(), config.storage.dir.as_deref(), &cwd);
	let mut store = open_file_store(&data_dir, &config.storage.key);

	match args.command {
		Command::List { query } => {
			store.set_query(query.unwrap_or_default());
			for note in store.visible_notes() {
				println!("{}", summary_line(note));
			}
		}
		Command::New { title, content } => {
			let id = store.create_and_stage();
			let patch = NotePatch { title, content };
			if !patch.is_empty() {
				store.edit_staged(patch);
			}
			store.commit_staged();
			println!("{id}");
		}
		Command::Edit { id, title, content } => {
			let id = NoteId::from(id);
			if !store.stage(&id) {
				eyre::bail!("Note '{}' not found", id);
			}
			store.edit_staged(NotePatch { title, content });
			store.commit_staged();
		}
		Command::Show { id } => {
			let id = NoteId::from(id);
			let note = store.get(&id).ok_or_else(|| eyre::eyre!("Note '{}' not found", id))?;
			println!("{}", note.display_title());
			println!("created {}  updated {}", note.created_at.to_rfc3339(), note.updated_at.to_rfc3339());
			if !note.content.is_empty() {
				println!();
				println!("{}", note.content);
			}
		}
		Command::Delete { id } => {
			let id = NoteId::from(id);
			if store.get(&id).is_none() {
				eyre::bail!("Note '{}' not found", id);
			}
			store.delete(&id);
		}
	}

	Ok(())
}
