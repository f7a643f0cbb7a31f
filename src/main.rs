//! Interactive command dispatcher for blocktree index files.
//!
//! Reads commands from stdin and drives a [`Session`]. Engine and
//! store failures surface as messages and never end the loop; only
//! `quit` or end of input does.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use blocktree::{Error, Session};

#[derive(Parser)]
#[command(name = "blocktree", version, about = "Single-file B-tree index store")]
struct Args {
    /// Index file to open before the first command.
    file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut session = Session::new();

    if let Some(path) = args.file {
        match session.open(&path) {
            Ok(()) => println!("Opened index file: {}", path.display()),
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!();
        println!("Commands: create, open, insert, search, load, print, extract, quit");
        let Some(command) = prompt(&mut lines, "Enter command: ")? else {
            break;
        };

        match command.to_lowercase().as_str() {
            "create" => cmd_create(&mut session, &mut lines)?,
            "open" => cmd_open(&mut session, &mut lines)?,
            "insert" => cmd_insert(&mut session, &mut lines)?,
            "search" => cmd_search(&mut session, &mut lines)?,
            "load" => cmd_load(&mut session, &mut lines)?,
            "print" => match session.dump() {
                Ok(listing) => print!("{}", listing),
                Err(e) => eprintln!("Error: {}", e),
            },
            "extract" => cmd_extract(&mut session, &mut lines)?,
            "quit" => break,
            "" => {}
            other => println!("Unknown command: {}", other),
        }
    }

    if let Err(e) = session.close() {
        eprintln!("Error: {}", e);
    }
    Ok(())
}

type Lines<'a> = io::Lines<io::StdinLock<'a>>;

/// Print a prompt and read one trimmed line; `None` at end of input.
fn prompt(lines: &mut Lines<'_>, text: &str) -> io::Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

fn prompt_u64(lines: &mut Lines<'_>, text: &str) -> io::Result<Option<u64>> {
    let Some(raw) = prompt(lines, text)? else {
        return Ok(None);
    };
    match raw.parse() {
        Ok(n) => Ok(Some(n)),
        Err(_) => {
            println!("Error: expected an unsigned integer, got {:?}", raw);
            Ok(None)
        }
    }
}

fn cmd_create(session: &mut Session, lines: &mut Lines<'_>) -> io::Result<()> {
    let Some(path) = prompt(lines, "Enter file name: ")? else {
        return Ok(());
    };

    match session.create(&path, false) {
        Ok(()) => println!("Created and opened index file: {}", path),
        Err(Error::AlreadyExists(_)) => {
            let answer = prompt(lines, &format!("{} already exists. Overwrite? (yes/no): ", path))?;
            if answer.as_deref() == Some("yes") {
                match session.create(&path, true) {
                    Ok(()) => println!("Created and opened index file: {}", path),
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
        }
        Err(e) => eprintln!("Error: {}", e),
    }
    Ok(())
}

fn cmd_open(session: &mut Session, lines: &mut Lines<'_>) -> io::Result<()> {
    let Some(path) = prompt(lines, "Enter file name: ")? else {
        return Ok(());
    };
    match session.open(&path) {
        Ok(()) => println!("Opened index file: {}", path),
        Err(e) => eprintln!("Error: {}", e),
    }
    Ok(())
}

fn cmd_insert(session: &mut Session, lines: &mut Lines<'_>) -> io::Result<()> {
    let Some(key) = prompt_u64(lines, "Enter key: ")? else {
        return Ok(());
    };
    let Some(value) = prompt_u64(lines, "Enter value: ")? else {
        return Ok(());
    };
    match session.insert(key, value) {
        Ok(()) => println!("Inserted ({}, {})", key, value),
        Err(e) => eprintln!("Error: {}", e),
    }
    Ok(())
}

fn cmd_search(session: &mut Session, lines: &mut Lines<'_>) -> io::Result<()> {
    let Some(key) = prompt_u64(lines, "Enter key: ")? else {
        return Ok(());
    };
    match session.search(key) {
        Ok(Some(value)) => println!("Found: key {} has value {}", key, value),
        Ok(None) => println!("Key {} not found", key),
        Err(e) => eprintln!("Error: {}", e),
    }
    Ok(())
}

fn cmd_load(session: &mut Session, lines: &mut Lines<'_>) -> io::Result<()> {
    let Some(path) = prompt(lines, "Enter file name: ")? else {
        return Ok(());
    };
    match session.load(&path) {
        Ok(count) => println!("Loaded {} records from {}", count, path),
        Err(e) => eprintln!("Error: {}", e),
    }
    Ok(())
}

fn cmd_extract(session: &mut Session, lines: &mut Lines<'_>) -> io::Result<()> {
    let Some(path) = prompt(lines, "Enter file name: ")? else {
        return Ok(());
    };
    match session.extract(&path) {
        Ok(count) => println!("Extracted {} records to {}", count, path),
        Err(e) => eprintln!("Error: {}", e),
    }
    Ok(())
}
