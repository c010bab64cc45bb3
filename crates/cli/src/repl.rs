//! Interactive and pipe-mode drivers for the console.

use std::io::{self, BufRead};

use lodgedb::{check_meta_command, Error, Lodge, MetaCommand, Output};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const PROMPT: &str = "(lodge) ";

/// Interactive loop. Returns the process exit code.
pub fn run_repl(lodge: &mut Lodge) -> i32 {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                if check_meta_command(&line) == Some(MetaCommand::Quit) {
                    return 0;
                }
                if let Some(code) = dispatch(lodge, &line) {
                    return code;
                }
            }
            Err(ReadlineError::Eof) => {
                // end-of-input behaves like quit, with a newline echo
                println!();
                return 0;
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(e) => {
                eprintln!("{}", e);
                return 1;
            }
        }
    }
}

/// Line-by-line loop over a non-TTY stdin. Returns the process exit code.
pub fn run_pipe(lodge: &mut Lodge) -> i32 {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("{}", e);
                return 1;
            }
        };
        if check_meta_command(&line) == Some(MetaCommand::Quit) {
            return 0;
        }
        if let Some(code) = dispatch(lodge, &line) {
            return code;
        }
    }
    println!();
    0
}

/// Run one line. `Some(code)` means a fatal error ended the session;
/// usage diagnostics are printed and the loop keeps reading.
fn dispatch(lodge: &mut Lodge, line: &str) -> Option<i32> {
    match lodge.dispatch_line(line) {
        Ok(Some(output)) => {
            print_output(&output);
            None
        }
        Ok(None) => None,
        Err(Error::Usage(e)) => {
            println!("{}", e);
            None
        }
        Err(e) => {
            eprintln!("{}", e);
            Some(1)
        }
    }
}

fn print_output(output: &Output) {
    match output {
        Output::Created(id) => println!("{}", id),
        Output::Record(text) => println!("{}", text),
        Output::Records(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Output::Count(count) => println!("{}", count),
        Output::Unit => {}
    }
}
