use rotation_detection::local::{process_file, simulate};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "process" => match args.get(2) {
                Some(log_path) => {
                    let settings_path = args.get(3).map(String::as_str);
                    if let Err(e) = process_file::run(log_path, settings_path) {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                }
                None => println!("Usage: main process <logfile> [settings.yaml]"),
            },
            "simulate" => simulate::run(),
            _ => println!("Invalid argument, please use 'process <logfile>' or 'simulate'"),
        }
    } else {
        println!("Please specify 'process <logfile>' or 'simulate' as argument");
    }
}
