use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use std::fs;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage();
        std::process::exit(1);
    }

    let ok = match args[1].as_str() {
        "run" if args.len() > 2 => run(&args[2..]),
        "bless" => bless(args.get(2).map(Utf8PathBuf::from).unwrap_or_else(fixtures_dir)),
        _ => {
            eprintln!("Unknown command: {}", args[1..].join(" "));
            usage();
            false
        }
    };
    if !ok {
        std::process::exit(1);
    }
}

fn usage() {
    eprintln!("Usage: cargo xtask <command>");
    eprintln!("Commands:");
    eprintln!("  run <file>...   Print the report for each .imagemap description");
    eprintln!("  bless [dir]     Regenerate the .expected report of every fixture");
    eprintln!("                  (default: tests/fixtures)");
}

fn fixtures_dir() -> Utf8PathBuf {
    Utf8Path::new(env!("CARGO_MANIFEST_DIR")).join("../tests/fixtures")
}

fn run(files: &[String]) -> bool {
    let mut ok = true;
    for file in files {
        let source = match fs::read_to_string(file) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("{}: {}", file, e);
                ok = false;
                continue;
            }
        };
        match imagemap::run_named(file, &source) {
            Ok(report) => {
                if files.len() > 1 {
                    println!("## {}", file);
                }
                print!("{}", report);
            }
            Err(report) => {
                eprintln!("{:?}", report);
                ok = false;
            }
        }
    }
    ok
}

fn bless(dir: Utf8PathBuf) -> bool {
    let entries = match dir.read_dir_utf8() {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Failed to read {}: {}", dir, e);
            return false;
        }
    };
    let mut fixtures: Vec<Utf8PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.extension() == Some("imagemap"))
        .collect();
    fixtures.sort();

    let failures: Vec<String> = fixtures
        .par_iter()
        .filter_map(|path| bless_one(path).err())
        .collect();

    for failure in &failures {
        eprintln!("{}", failure);
    }
    eprintln!("Blessed {}/{} fixtures in {}", fixtures.len() - failures.len(), fixtures.len(), dir);
    failures.is_empty()
}

fn bless_one(path: &Utf8Path) -> Result<(), String> {
    let source = fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    let report = imagemap::run_named(path.as_str(), &source).map_err(|e| format!("{:?}", e))?;
    let expected = path.with_extension("expected");
    let unchanged = fs::read_to_string(&expected).is_ok_and(|old| old == report);
    if !unchanged {
        fs::write(&expected, report).map_err(|e| format!("{}: {}", expected, e))?;
        tracing::info!(%expected, "updated");
    }
    Ok(())
}
