use std::fs;
use std::io;
use std::process::ExitCode;

use ingest::normalize_records;
use serde_json::Value;

fn read_input(source: &str) -> io::Result<String> {
    if source == "-" {
        io::read_to_string(io::stdin())
    } else {
        fs::read_to_string(source)
    }
}

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let (Some(source), None) = (args.next(), args.next()) else {
        eprintln!("usage: normalize_cli <path|->");
        return ExitCode::from(2);
    };

    let input = match read_input(&source) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("failed to read {source}: {err}");
            return ExitCode::FAILURE;
        }
    };
    let records = match serde_json::from_str::<Value>(&input) {
        Ok(Value::Array(records)) => records,
        Ok(_) => {
            eprintln!("{source}: expected a JSON array of raw events");
            return ExitCode::FAILURE;
        }
        Err(err) => {
            eprintln!("{source}: invalid json: {err}");
            return ExitCode::FAILURE;
        }
    };

    let batch = normalize_records(&records, None);
    for issue in &batch.issues {
        eprintln!("rejected: {}", issue.message);
    }
    if batch.events.is_empty() {
        eprintln!("no events normalized");
        return ExitCode::from(3);
    }
    for event in &batch.events {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(err) => {
                eprintln!("failed to serialize event {}: {err}", event.id);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
