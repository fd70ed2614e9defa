use std::path::PathBuf;

use miette::{IntoDiagnostic, Result};
use rustyline::error::ReadlineError;

use bracken::{render, throw, BrackenError, LoadError, SourceFile, Validator};

fn main() -> Result<()> {
    let mut args: Vec<_> = std::env::args().skip(1).collect();
    let file = args.pop();
    if !args.is_empty() {
        eprintln!("Unrecognized arguments: {:?}", args);
        eprintln!("Usage: bracken [file]");
        std::process::exit(1);
    }
    match file {
        Some(file) => run_file(PathBuf::from(file)),
        None => run_prompt(),
    }
}

fn run_file(path: PathBuf) -> Result<()> {
    if !path.exists() {
        throw(&LoadError::FileNotFound(path).into(), None);
    }
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(_) => throw(&LoadError::NotReadableFile(path).into(), None),
    };
    let file = match SourceFile::from_bytes(path.to_string_lossy(), bytes) {
        Ok(file) => file,
        Err(err) => throw(&err.into(), None),
    };
    if let Err(err) = Validator::validate(file.clone()) {
        let traceback = err.traceback(&file);
        throw(&err.into(), Some(&traceback));
    }
    Ok(())
}

fn run_prompt() -> Result<()> {
    let mut rl = rustyline::Editor::<()>::new();
    let mut repl_line: usize = 1;
    loop {
        match rl.readline(&format!("{}> ", repl_line)) {
            Ok(line) => {
                let file = SourceFile::new(format!("<repl-{}>", repl_line), line);
                if let Err(err) = Validator::validate(file.clone()) {
                    let traceback = err.traceback(&file);
                    let error = BrackenError::from(err);
                    match render(&error, Some(&traceback)) {
                        Ok(text) => println!("{}", text),
                        Err(infra) => println!("{}", infra),
                    }
                }
            }
            Err(ReadlineError::Interrupted) => return Ok(()),
            Err(ReadlineError::Eof) => return Ok(()),
            Err(err) => return Err(err).into_diagnostic(),
        }
        repl_line += 1;
    }
}
