use std::fmt::Write as _;
use std::io::{Read, Write};
use std::process::ExitCode;

use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::{Files, SimpleFile};
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream, WriteColor};
use tallyc::buffer::{InputBuffer, Key, format_number};
use tallyc::lexer::Lexed;
use tallyc::{CalcError, evaluate, parse, tokenize};

use crate::cli::Cli;
use crate::editor::{Editor, EditorRead};
use crate::report::{Report, SimpleReport};

pub struct Driver {
    file:       Option<SimpleFile<String, String>>,
    max_errors: usize,
    quiet:      bool,
    show_ast:   bool,
}

impl Driver {
    fn read_stdin() -> std::io::Result<String> {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        Ok(input)
    }

    pub fn from_config(cfg: Cli) -> std::io::Result<Self> {
        let file = if let Some(expr) = cfg.expr {
            Some(SimpleFile::new("<expr>".to_string(), expr))
        } else if cfg.stdin {
            Some(SimpleFile::new("<stdin>".to_string(), Self::read_stdin()?))
        } else {
            cfg.file
                .map(|path| std::fs::read_to_string(&path).map(|source| SimpleFile::new(path, source)))
                .transpose()?
        };
        Ok(Self {
            file,
            max_errors: cfg.max_errors,
            quiet: cfg.quiet,
            show_ast: cfg.ast,
        })
    }

    pub fn run(self) -> ExitCode {
        if let Some(file) = &self.file {
            let stdout = std::io::stdout();
            let stderr = StandardStream::stderr(ColorChoice::Auto);
            match self.run_lines(file, &mut stdout.lock(), &mut stderr.lock()) {
                Ok(0) => ExitCode::SUCCESS,
                Ok(_) => ExitCode::FAILURE,
                Err(err) => {
                    eprintln!("error: {err}");
                    ExitCode::FAILURE
                }
            }
        } else if let Err(err) = self.repl() {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }

    fn emit<'a, F, W>(&self, writer: &mut W, files: &'a F, diagnostic: &Diagnostic<()>)
    where
        F: Files<'a, FileId = ()>,
        W: WriteColor,
    {
        if self.quiet {
            return;
        }
        let config = codespan_reporting::term::Config::default();
        if let Err(err) = term::emit(writer, &config, files, diagnostic) {
            tracing::error!(%err, "could not render diagnostic");
        }
    }

    /// Evaluates each non-blank line on its own and writes one result per
    /// line to `out`. Returns how many lines failed.
    fn run_lines<O, E>(
        &self,
        file: &SimpleFile<String, String>,
        out: &mut O,
        err_out: &mut E,
    ) -> std::io::Result<usize>
    where
        O: Write,
        E: WriteColor,
    {
        let mut failed = 0;
        let mut displayed = 0;
        let mut offset = 0;

        for (index, line) in file.source().split_inclusive('\n').enumerate() {
            let start = offset;
            offset += line.len();

            let input = line.trim_end_matches(['\n', '\r']);
            if input.trim().is_empty() {
                continue;
            }

            match self.evaluate_line(file, input, start, err_out) {
                Ok(Some(value)) => {
                    let result = format_number(value);
                    tracing::debug!(line = index + 1, %result, "evaluated line");
                    writeln!(out, "{result}")?;
                }
                Ok(None) => tracing::debug!(line = index + 1, "line holds no expression"),
                Err(err) => {
                    tracing::debug!(line = index + 1, %err, "line failed");
                    failed += 1;
                    if displayed < self.max_errors {
                        self.emit(err_out, file, &err.diagnose_at(start));
                        displayed += 1;
                    }
                }
            }
        }

        if failed > 0 {
            let mut message = format!("could not evaluate {}", file.name());
            let _ = message.write_fmt(format_args!(
                " due to {} previous {} ({} emitted)",
                failed,
                if failed > 1 { "errors" } else { "error" },
                displayed
            ));
            self.emit(err_out, file, &SimpleReport::new(message).diagnose());
        }

        out.flush()?;
        Ok(failed)
    }

    fn evaluate_line<E: WriteColor>(
        &self,
        file: &SimpleFile<String, String>,
        input: &str,
        offset: usize,
        err_out: &mut E,
    ) -> Result<Option<f64>, CalcError> {
        let Lexed { tokens, notices } = tokenize(input);
        for notice in &notices {
            self.emit(err_out, file, &notice.diagnose_at(offset));
        }

        let forest = parse(tokens)?;
        if self.show_ast {
            let nodes: Vec<String> = forest.iter().map(ToString::to_string).collect();
            println!("{}", nodes.join(" "));
        }

        Ok(evaluate(&forest)?)
    }

    /// Keypad session: every typed character is a key press on one
    /// persistent buffer, and `=` evaluates it.
    fn repl(&self) -> std::io::Result<()> {
        let mut buffer = InputBuffer::new();
        let mut editor = Editor::default();
        let stderr = StandardStream::stderr(ColorChoice::Auto);
        loop {
            let signal = editor.read(&buffer.text())?;
            let input = match signal {
                EditorRead::Read(input) => input,
                EditorRead::Break => break,
                EditorRead::Continue => continue,
            };

            let keys = input
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(Key::from_char);

            match buffer.press_all(keys) {
                Ok(()) if input.contains('=') => println!("{buffer}"),
                Ok(()) => {}
                Err(err) => {
                    let text = buffer.text();
                    let file = SimpleFile::new("<keypad>", text.as_str());
                    self.emit(&mut stderr.lock(), &file, &err.diagnose());
                }
            }
        }

        Ok(())
    }
}
