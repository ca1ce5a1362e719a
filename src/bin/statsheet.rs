//! CLI tool for reconstructing a stat sheet from a PDF

use statsheet::{classify, extract_sheet, Rank, SheetError, StatSheet};
use std::env;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <pdf_file>", args[0]);
        eprintln!("       {} <pdf_file> --json", args[0]);
        eprintln!();
        eprintln!("Reconstructs attribute ranges and rank boundaries from the");
        eprintln!("sheet's drawing commands.");
        process::exit(1);
    }

    let pdf_path = &args[1];
    let json_output = args.get(2).map(|a| a == "--json").unwrap_or(false);

    match extract_sheet(pdf_path) {
        Ok(sheet) => {
            if json_output {
                print_json(&sheet);
            } else {
                print_report(pdf_path, &sheet);
            }
        }
        Err(e) => {
            if json_output {
                println!(r#"{{"error":"{}"}}"#, e);
            } else {
                eprintln!("Error: {}", e);
            }
            process::exit(1);
        }
    }
}

fn print_report(pdf_path: &str, sheet: &StatSheet) {
    println!("Stat Sheet Reconstruction");
    println!("=========================");
    println!("File: {}", pdf_path);
    if let Some(title) = &sheet.title {
        println!("Title: {}", title);
    }
    if let Some(prepared) = &sheet.prepared {
        println!("Date Prepared: {}", prepared);
    }
    println!();

    println!("Attributes:");
    for attribute in &sheet.attributes {
        let candle = &attribute.candle;
        println!("  {}", attribute.name);
        println!(
            "    MIN {:9.3} + {:7.3} -> {:9.3} ({})",
            candle.min_origin,
            candle.minimum,
            candle.minimum_at(),
            rank_label(candle.minimum_at(), &sheet.ranks)
        );
        println!(
            "    MED {:9.3} + {:7.3} -> {:9.3} ({})",
            candle.median_origin,
            candle.median,
            candle.median_at(),
            rank_label(candle.median_at(), &sheet.ranks)
        );
        println!(
            "    MAX {:9.3} + {:7.3} -> {:9.3} ({})",
            candle.max_origin,
            candle.maximum,
            candle.maximum_at(),
            rank_label(candle.maximum_at(), &sheet.ranks)
        );
    }
    println!();

    println!("Rank scale:");
    for rank in &sheet.ranks {
        println!(
            "  {:5} {:9.3} - {:9.3}",
            rank.name.as_str(),
            rank.x_min,
            rank.x_max
        );
    }
}

/// Rank name for an axis position, or a marker when the value falls off the
/// reconstructed scale.
fn rank_label(value: f32, ranks: &[Rank]) -> String {
    match classify(value, ranks) {
        Ok(name) => name.to_string(),
        Err(SheetError::RankMiss(_)) => "off scale".to_string(),
        Err(e) => e.to_string(),
    }
}

fn print_json(sheet: &StatSheet) {
    let attributes: Vec<String> = sheet
        .attributes
        .iter()
        .map(|a| {
            let c = &a.candle;
            format!(
                r#"{{"name":"{}","minimum":{},"min_origin":{},"median":{},"median_origin":{},"maximum":{},"max_origin":{}}}"#,
                a.name, c.minimum, c.min_origin, c.median, c.median_origin, c.maximum, c.max_origin
            )
        })
        .collect();

    let ranks: Vec<String> = sheet
        .ranks
        .iter()
        .map(|r| {
            format!(
                r#"{{"name":"{}","x_min":{},"x_max":{}}}"#,
                r.name, r.x_min, r.x_max
            )
        })
        .collect();

    println!(
        r#"{{"title":{},"prepared":{},"attributes":[{}],"ranks":[{}]}}"#,
        sheet
            .title
            .as_ref()
            .map(|t| format!("\"{}\"", t.replace('"', "\\\"")))
            .unwrap_or_else(|| "null".to_string()),
        sheet
            .prepared
            .map(|p| format!("\"{}\"", p))
            .unwrap_or_else(|| "null".to_string()),
        attributes.join(","),
        ranks.join(",")
    );
}
