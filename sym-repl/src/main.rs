use ariadne::Source;
use std::io::{self, BufRead, IsTerminal, Write};
use sym_engine::{simplify_with, Expr, Limits};
use sym_parser::parser::ast;
use sym_parser::Parser;

/// The limits applied to every simplification started from the prompt.
const LIMITS: Limits = Limits {
    max_ops: 32,
    max_iter: 256,
};

/// Parses and simplifies the given input line, printing the chain of rewrites that led to the
/// smallest term found.
fn simplify_line(input: &str) {
    match Parser::new(input).try_parse_full::<ast::Expr>() {
        Ok(ast) => {
            let result = simplify_with(&Expr::from(ast), LIMITS);
            for step in &result.steps {
                println!("({}) {}", step.op_count(), step);
            }
        },
        Err(err) => {
            // `ariadne` reports have no `Display` implementation; `eprint` writes to stderr
            let report = err.build_report();
            report.eprint(("input", Source::from(input))).unwrap();
        },
    }
}

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut lines = stdin.lock().lines();

    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }

        // an empty line (or the end of the input) ends the session
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            break;
        }

        simplify_line(&line);
    }

    Ok(())
}
