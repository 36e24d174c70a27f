// ntlang: scan, parse and evaluate a +/- integer expression

use ntlang::logging::init_tracing;
use ntlang::parser::limits::Limits;
use ntlang::program::Program;
use ntlang::trace::LogTracer;
use tracing::info;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() != 2 {
        let program_name = args.first().map(|s| s.as_str()).unwrap_or("ntlang");
        eprintln!("Usage: {} <expression>", program_name);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} \"1 + 2\"", program_name);
        eprintln!("  {} \"10 - 3 + 4\"", program_name);
        std::process::exit(1);
    }

    let input = &args[1];
    let mut tracer = LogTracer::new();

    let program = match Program::compile(input, &Limits::default(), &mut tracer) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("Tokens:");
    print!("{}", program.scan_table);
    println!();
    println!("Tree:");
    print!("{}", program.tree);

    match program.evaluate() {
        Ok(value) => {
            println!();
            println!("Value: {}", value);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    info!(steps = tracer.steps(), "done");
}
