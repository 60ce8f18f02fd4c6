use std::env;
use std::fmt::Display;
use std::hash::Hash;
use std::process;

use bag::bag_generator::ReportGenerator;
use bag::bag_parser::Tokenizer;
use bag::Multiset;
use log::info;

const NUMERIC_FLAG: &str = "--numeric";

fn load_or_exit<T, F>(load: &F, file_path: &str) -> Multiset<T>
where
    F: Fn(&str) -> Result<Multiset<T>, String>,
{
    match load(file_path) {
        Ok(set) => set,
        Err(e) => {
            eprintln!("Error loading {}: {}", file_path, e);
            process::exit(1);
        }
    }
}

fn run<T, F>(load: F, left_file: &str, right_file: &str, output_file: &str)
where
    T: Eq + Hash + Clone + Ord + Display,
    F: Fn(&str) -> Result<Multiset<T>, String>,
{
    let left = load_or_exit(&load, left_file);
    let right = load_or_exit(&load, right_file);
    info!(
        "Loaded {} tokens from {} and {} tokens from {}",
        left.len(),
        left_file,
        right.len(),
        right_file
    );

    let generator = ReportGenerator::new(left, right);
    if let Err(e) = generator.write_to(output_file) {
        eprintln!("Error writing report: {}", e);
        process::exit(1);
    }

    println!("Multiset report has been saved to {}", output_file);
}

fn main() {
    env_logger::init();

    let mut args: Vec<String> = env::args().collect();
    let program = args.first().cloned().unwrap_or_else(|| "bag".to_string());
    let numeric = args.iter().skip(1).any(|arg| arg == NUMERIC_FLAG);
    args.retain(|arg| arg != NUMERIC_FLAG);

    if args.len() != 4 {
        eprintln!(
            "Usage: {} [{}] <left_file> <right_file> <output_file>",
            program, NUMERIC_FLAG
        );
        process::exit(1);
    }

    let tokenizer = match Tokenizer::new() {
        Ok(tokenizer) => tokenizer,
        Err(e) => {
            eprintln!("Error building tokenizer: {}", e);
            process::exit(1);
        }
    };

    let (left_file, right_file, output_file) = (&args[1], &args[2], &args[3]);
    if numeric {
        run(|path: &str| tokenizer.load_numbers(path), left_file, right_file, output_file);
    } else {
        run(|path: &str| tokenizer.load_words(path), left_file, right_file, output_file);
    }
}
