mod cli;

use std::path::PathBuf;

use chrono::Local;
use clap::Parser;
use note_store::{
    config, logging::setup_tracing, Note, NoteId, NoteList, NoteSession, NoteStore, Result, StoreOpening,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config()?;

    setup_tracing(cli.json_logs || config.log_json);

    let path = cli.db.unwrap_or_else(|| PathBuf::from(&config.database_url));

    let result = run(cli.command, path).await;
    if let Err(err) = &result {
        tracing::error!("{:?}", err);
    }
    result
}

async fn run(command: Command, path: PathBuf) -> Result<()> {
    match command {
        Command::List { query, json } => list(path, query, json).await,
        Command::Add { title, body } => add(path, title, body).await,
        Command::Edit { id, title, body } => edit(path, id, title, body).await,
        Command::Delete { id, yes } => delete(path, id, yes).await,
        Command::Show { id } => show(path, id).await,
    }
}

async fn list(path: PathBuf, query: Option<String>, json: bool) -> Result<()> {
    let mut list = NoteList::new(NoteStore::open(path).await?);
    list.refresh().await?;
    if let Some(query) = query {
        list.search(query);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(list.visible())?);
        return Ok(());
    }

    for note in list.visible() {
        print_row(note);
    }
    Ok(())
}

fn print_row(note: &Note) {
    let updated = note.updated_at.with_timezone(&Local).format("%a, %b %-d, %Y %-I:%M %p");
    println!("{:>5}  {}", note.id, note.preview_title());
    println!("       {}", note.preview_body());
    println!("       {updated}");
}

async fn add(path: PathBuf, title: String, body: String) -> Result<()> {
    let mut session = NoteSession::compose(StoreOpening::spawn(path));
    session.set_title(title)?;
    session.set_body(body)?;

    match session.dismiss().await? {
        Some(id) => println!("saved note {id}"),
        None => println!("empty note discarded"),
    }
    Ok(())
}

async fn edit(path: PathBuf, id: NoteId, title: Option<String>, body: Option<String>) -> Result<()> {
    let store = NoteStore::open(path).await?;
    let Some(note) = store.get(id).await? else {
        println!("note {id} not found");
        return Ok(());
    };

    let mut session = NoteSession::edit(store, id, note.title.unwrap_or_default(), note.body.unwrap_or_default());
    if let Some(title) = title {
        session.set_title(title)?;
        session.commit().await?;
    }
    if let Some(body) = body {
        session.set_body(body)?;
        session.commit().await?;
    }
    session.dismiss().await?;

    println!("saved note {id}");
    Ok(())
}

async fn delete(path: PathBuf, id: NoteId, yes: bool) -> Result<()> {
    let store = NoteStore::open(path).await?;
    let Some(note) = store.get(id).await? else {
        println!("note {id} not found");
        return Ok(());
    };

    if !yes && !confirm(&format!("Delete \"{}\"? [y/N] ", note.preview_title())).await? {
        println!("kept note {id}");
        return Ok(());
    }

    store.delete(id).await?;
    println!("deleted note {id}");
    Ok(())
}

async fn show(path: PathBuf, id: NoteId) -> Result<()> {
    let store = NoteStore::open(path).await?;
    match store.get(id).await? {
        Some(note) => println!("{}", note.share_text()),
        None => println!("note {id} not found"),
    }
    Ok(())
}

async fn confirm(prompt: &str) -> Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(prompt.as_bytes()).await?;
    stdout.flush().await?;

    let answer = BufReader::new(tokio::io::stdin())
        .lines()
        .next_line()
        .await?
        .unwrap_or_default();

    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
