use std::{env, fs, io, process};

use lox_lang::Lox;

fn usage() -> u8 {
    eprintln!("Usage: lox <tokenize|parse|evaluate|run|repl> <filename>");
    1
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut stdout = io::stdout();
    let mut lox = Lox::new(&mut stdout);

    let code = match args.get(1).map(String::as_str) {
        Some("repl") => {
            lox.repl();
            0
        },
        Some(command @ ("tokenize" | "parse" | "evaluate" | "run")) => match args.get(2) {
            Some(path) => match fs::read_to_string(path) {
                Ok(source) => match command {
                    "tokenize" => lox.tokenize(&source),
                    "parse" => lox.parse_expression(&source),
                    "evaluate" => lox.evaluate(&source),
                    _ => lox.run(&source),
                },
                Err(error) => {
                    eprintln!("Error reading file {path}: {error}");
                    1
                },
            },
            None => usage(),
        },
        Some(command) => {
            eprintln!("Unknown command: {command}");
            1
        },
        None => usage(),
    };

    process::exit(code as i32);
}
