// ntviz: step through the scanner and parser pools of an expression

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use ntlang::constants::SNAPSHOT_MEMORY_LIMIT;
use ntlang::parser::limits::Limits;
use ntlang::program::Program;
use ntlang::snapshot::Recorder;
use ntlang::ui::{App, Outcome};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() != 2 {
        let program_name = args.first().map(|s| s.as_str()).unwrap_or("ntviz");
        eprintln!("Usage: {} <expression>", program_name);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} \"1 + 2 - 3\"", program_name);
        std::process::exit(1);
    }

    let input = args[1].clone();

    // Record the whole session up front; a failed session keeps its partial history
    let mut recorder = Recorder::new(SNAPSHOT_MEMORY_LIMIT);
    let outcome = match Program::compile(&input, &Limits::default(), &mut recorder) {
        Ok(program) => match program.evaluate() {
            Ok(value) => Outcome::Value(value),
            Err(e) => Outcome::Failed(e.to_string()),
        },
        Err(e) => Outcome::Failed(e.to_string()),
    };

    if recorder.is_truncated() {
        eprintln!(
            "Warning: snapshot memory limit reached after {} steps",
            recorder.history().len()
        );
    }

    let history = recorder.into_history();
    if history.is_empty() {
        if let Outcome::Failed(message) = &outcome {
            eprintln!("Error: {}", message);
        }
        std::process::exit(1);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(input, history, outcome);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
