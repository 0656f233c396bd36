//! Lox is a small dynamically typed scripting language with first-class
//! functions, closures and single-inheritance classes. This crate is a
//! tree-walk interpreter for it: source text goes through four stages,
//! each one feeding the next, and the last one produces the program's
//! effects.
//!
//! ## Scanning
//! The [`scanner`](scanner) turns the source string into a flat list of
//! [`Token`](token::Token)s terminated by an end-of-input sentinel.
//! Lexical problems like an unterminated string or a stray character are
//! reported as they are found and the scan keeps going, so a single run
//! surfaces every lexical error in the file.
//!
//! ## Parsing
//! The [`parser`](parser) is a hand-written recursive descent parser
//! that turns the token list into a tree of [`Expr`](expr::Expr) and
//! [`Stmt`](stmt::Stmt) nodes. Expressions produce values; statements
//! produce effects. `for` loops are rewritten during parsing into a
//! block around a `while` loop, so the later stages only ever see the
//! simpler form. The first syntax error aborts the parse.
//!
//! ## Resolving
//! The [`resolver`](resolver) walks the finished tree once and computes,
//! for every variable use, how many scopes lie between the use and the
//! binding it refers to. The interpreter later follows exactly that many
//! parent links, which is what makes closures capture the binding they
//! saw at declaration time rather than whatever happens to share its
//! name at call time. The same pass rejects programs that break static
//! rules, like returning from top-level code or a class inheriting from
//! itself.
//!
//! ## Interpreting
//! The [`interpreter`](interpreter) walks the tree and evaluates it
//! against a chain of [`Environment`](environment::Environment)s, one
//! per active scope, all rooted in the globals environment where the
//! built-ins live. Values are [`Object`](object::Object)s: literals are
//! compared and copied by value while functions, classes and instances
//! are shared by reference. Runtime errors like adding a string to a
//! number abort the program.
//!
//! The [`Lox`] driver ties the stages together and maps each failure
//! class to its process exit code: 65 for lexical, syntax and static
//! errors, 70 for runtime errors.

use std::fs;
use std::io::Write;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub mod ast;
pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use ast::ASTPrinter;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// The interpreter driver. Program output goes to the given writer;
/// diagnostics go to standard error. The interpreter is persistent, so
/// consecutive runs through the same driver share global state.
pub struct Lox<'a> {
    interpreter: Interpreter<'a>,
}

impl<'a> Lox<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        Lox {
            interpreter: Interpreter::new(output),
        }
    }

    /// Reads and runs a file, returning the process exit code.
    pub fn run_file(&mut self, path: &str) -> u8 {
        match fs::read_to_string(path) {
            Ok(source) => self.run(&source),
            Err(error) => {
                eprintln!("Error reading file {path}: {error}");
                1
            },
        }
    }

    /// Runs a full program through every stage.
    pub fn run(&mut self, source: &str) -> u8 {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens();
        if scanner.had_error() {
            return 65;
        }

        let statements = match Parser::new(tokens).parse() {
            Ok(statements) => statements,
            Err(error) => {
                eprintln!("{error}");
                return 65;
            },
        };

        if let Err(error) = Resolver::new(&mut self.interpreter).resolve(&statements) {
            eprintln!("{error}");
            return 65;
        }

        if let Err(error) = self.interpreter.interpret(&statements) {
            eprintln!("{error}");
            return 70;
        }

        0
    }

    /// Scans the source and prints one line per token. Lexical errors
    /// are reported but do not stop the listing.
    pub fn tokenize(&mut self, source: &str) -> u8 {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens();

        for token in &tokens {
            writeln!(self.interpreter.writer(), "{token}").expect("token listing to be writable");
        }

        if scanner.had_error() { 65 } else { 0 }
    }

    /// Parses the source as a single expression and prints its
    /// parenthesized form.
    pub fn parse_expression(&mut self, source: &str) -> u8 {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens();
        if scanner.had_error() {
            return 65;
        }

        match Parser::new(tokens).parse_expression() {
            Ok(expr) => {
                let form = ASTPrinter.print(&expr);
                writeln!(self.interpreter.writer(), "{form}").expect("expression form to be writable");
                0
            },
            Err(error) => {
                eprintln!("{error}");
                65
            },
        }
    }

    /// Evaluates the source as a single expression and prints the
    /// resulting value.
    pub fn evaluate(&mut self, source: &str) -> u8 {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens();
        if scanner.had_error() {
            return 65;
        }

        let expr = match Parser::new(tokens).parse_expression() {
            Ok(expr) => expr,
            Err(error) => {
                eprintln!("{error}");
                return 65;
            },
        };

        match self.interpreter.evaluate(&expr) {
            Ok(value) => {
                writeln!(self.interpreter.writer(), "{value}").expect("value to be writable");
                0
            },
            Err(error) => {
                eprintln!("{error}");
                70
            },
        }
    }

    /// Interactive prompt. Lines run against the same interpreter, so
    /// definitions carry over from one entry to the next.
    pub fn repl(&mut self) {
        let mut editor = DefaultEditor::new().expect("line editor to initialize");

        let history = home::home_dir().map(|dir| dir.join(".lox_history"));
        if let Some(path) = &history {
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    self.run(&line);
                },
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(error) => {
                    eprintln!("{error}");
                    break;
                },
            }
        }

        if let Some(path) = &history {
            let _ = editor.save_history(path);
        }
    }
}
