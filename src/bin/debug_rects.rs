use lopdf::content::Content;
use lopdf::Document;
use statsheet::walker::walk;
use std::env;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: debug_rects <pdf_path>");
        std::process::exit(1);
    }

    let doc = Document::load(&args[1]).expect("Failed to load PDF");
    let pages = doc.get_pages();
    let (_, &page_id) = pages.iter().next().expect("No pages");
    let content_data = doc.get_page_content(page_id).expect("No content stream");
    let content = Content::decode(&content_data).expect("Failed to decode content");

    let shapes = walk(&content.operations);

    println!("=== RECTANGLES ({}) ===", shapes.rects.len());
    for placed in &shapes.rects {
        println!(
            "  #{:3} origin=({:8.2},{:8.2}) bounds=({:7.2},{:7.2},{:7.2},{:7.2}) size={:6.2}x{:6.2}",
            placed.seq,
            placed.origin.x,
            placed.origin.y,
            placed.rect.x_min,
            placed.rect.y_min,
            placed.rect.x_max,
            placed.rect.y_max,
            placed.rect.width(),
            placed.rect.height()
        );
    }

    println!();
    println!("=== ICON ORIGINS ({}) ===", shapes.icon_origins.len());
    for (i, x) in shapes.icon_origins.iter().enumerate() {
        println!("  #{:2} x={:8.2}", i, x);
    }
}
