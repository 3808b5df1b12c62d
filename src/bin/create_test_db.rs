use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use pos_rs::{CategoryName, NewCategory, create_category, initialize_db};

/// A utility for creating a test database for the REST API server of pos_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const SAMPLE_CATEGORIES: [(&str, &str); 4] = [
    ("Duelist", "First Contact. Enter Site. Frag"),
    ("Controller", "Divide the map. Gain positioning advantage."),
    ("Initiator", "Help Duelist entry. Gain info on the enemy"),
    ("Sentinel", "Site Anchor. Slow down enemy rush."),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample categories...");

    for (name, description) in SAMPLE_CATEGORIES {
        let category = create_category(
            NewCategory {
                name: CategoryName::new(name)?,
                description: description.to_owned(),
            },
            &conn,
        )?;
        println!("  {} {}", category.id, category.name);
    }

    println!("Success!");

    Ok(())
}
