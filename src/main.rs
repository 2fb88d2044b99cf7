use std::{env, fs, process};

use luma::run;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        eprintln!("usage: luma <source-file> [input]");
        process::exit(2);
    }

    let source = match fs::read_to_string(&args[1]) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("error: failed to read {}: {}", args[1], error);
            process::exit(2);
        }
    };

    let input = args.get(2).map(String::as_str).unwrap_or("");

    match run(input, &source) {
        Ok(output) => println!("{}", output),
        Err(error) => {
            eprintln!("error: {}", error);
            process::exit(1);
        }
    }
}
