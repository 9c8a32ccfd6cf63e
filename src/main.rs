// ABOUTME: CLI/REPL driver for the interpreter

use clap::Parser as ClapParser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use std::rc::Rc;
use taulang::config::{VERSION, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use taulang::env::Environment;
use taulang::eval::eval_program;
use taulang::lexer::Lexer;
use taulang::parser::Parser;
use taulang::value::Value;

/// A tree-walking interpreter for a small dynamically-typed language
#[derive(ClapParser, Debug)]
#[command(name = "taulang")]
#[command(version = VERSION)]
#[command(about = "A tree-walking interpreter for a small dynamically-typed language")]
struct CliArgs {
    /// Script file to execute (optional — if not provided, starts the REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    let env = taulang::new_root_environment();

    if let Some(script_path) = args.script {
        return run_script(&script_path, &env);
    }

    run_repl(&env).map_err(|err| err.into())
}

fn run_script(path: &PathBuf, env: &Rc<Environment>) -> Result<(), Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read script file {}: {}", path.display(), e))?;

    let (program, parse_errors) = Parser::new(Lexer::new(contents)).parse();
    if !parse_errors.is_empty() {
        for err in &parse_errors {
            eprintln!("parse error: {}", err);
        }
        return Err("script failed to parse".into());
    }

    match eval_program(&program, env) {
        Value::Error(message) => Err(message.into()),
        _ => Ok(()),
    }
}

fn run_repl(env: &Rc<Environment>) -> rustyline::Result<()> {
    let mut editor = DefaultEditor::new()?;
    let history_file = ".taulang_history";
    let _ = editor.load_history(history_file);

    println!("{}", WELCOME_MESSAGE);
    println!("{}", WELCOME_SUBTITLE);

    loop {
        match editor.readline("taulang> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());

                let (program, parse_errors) = Parser::new(Lexer::new(line)).parse();
                for err in &parse_errors {
                    println!("parse error: {}", err);
                }
                if !parse_errors.is_empty() {
                    continue;
                }

                print_result(&eval_program(&program, env));
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\ngoodbye");
                break;
            }
            Err(err) => {
                eprintln!("error: {}", err);
                break;
            }
        }
    }

    let _ = editor.save_history(history_file);
    Ok(())
}

fn print_result(result: &Value) {
    match result {
        Value::Null => println!(),
        Value::Error(message) => println!("{}", message),
        other => println!("{}", other.inspect()),
    }
}
