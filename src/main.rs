use std::io::{self, BufRead};
use std::path::PathBuf;

use phishsieve::{ModelBundle, Predictor};

struct Args {
    models_dir: PathBuf,
    offline: bool,
    urls: Vec<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut models_dir = PathBuf::from("models");
    let mut offline = false;
    let mut urls = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--models" => {
                let dir = args.next().ok_or("--models requires a directory")?;
                models_dir = PathBuf::from(dir);
            }
            "--offline" => offline = true,
            "--help" | "-h" => return Err(String::new()),
            flag if flag.starts_with('-') => {
                return Err(format!("unknown flag: {}", flag));
            }
            url => urls.push(url.to_string()),
        }
    }

    Ok(Args {
        models_dir,
        offline,
        urls,
    })
}

fn usage() {
    eprintln!("Usage: phishsieve [--models DIR] [--offline] <url> [url ...]");
    eprintln!("   or: cat urls.txt | phishsieve [--models DIR] [--offline]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --models DIR   model bundle directory (default: models/)");
    eprintln!("  --offline      skip SSL/DNS probes");
    eprintln!();
    eprintln!("Prints one JSON result per URL on stdout.");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            if !msg.is_empty() {
                eprintln!("error: {}", msg);
                eprintln!();
            }
            usage();
            std::process::exit(1);
        }
    };

    // Get URLs: from CLI args or stdin lines
    let urls = if args.urls.is_empty() {
        let stdin = io::stdin();
        let mut urls = Vec::new();
        for line in stdin.lock().lines() {
            let line = line?;
            let line = line.trim();
            if !line.is_empty() {
                urls.push(line.to_string());
            }
        }
        urls
    } else {
        args.urls
    };

    if urls.is_empty() {
        usage();
        std::process::exit(1);
    }

    // A broken bundle is a startup error, never a degraded run.
    let bundle = match ModelBundle::load(&args.models_dir) {
        Ok(bundle) => bundle,
        Err(e) => {
            eprintln!("failed to load model bundle from {}: {}", args.models_dir.display(), e);
            std::process::exit(1);
        }
    };

    let predictor = if args.offline {
        Predictor::offline(bundle)
    } else {
        Predictor::new(bundle)
    };

    for item in predictor.predict_batch(&urls) {
        println!("{}", serde_json::to_string(&item)?);
    }

    Ok(())
}
