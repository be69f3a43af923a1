use std::env;
use std::fs;
use std::process;

use smooth_cursor::layout::{LayoutFile, StaticScore};
use smooth_cursor::{MemoryOverlay, SmoothCursor, TempoMap};

const DEFAULT_STEP_MS: f64 = 50.0;

fn usage() -> ! {
    eprintln!("Usage: smooth-cursor <layout.yaml> [--tempo BPM] [--step MS]");
    process::exit(1);
}

fn parse_number(flag: &str, value: Option<&String>) -> f64 {
    match value.map(|v| v.parse::<f64>()) {
        Some(Ok(n)) => n,
        _ => {
            eprintln!("Expected a number after {}", flag);
            usage();
        }
    }
}

fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .try_init();
}

fn main() {
    init_logger();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let input_path = &args[1];
    let mut tempo_override: Option<f64> = None;
    let mut step = DEFAULT_STEP_MS;

    // Parse flags
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--tempo" => tempo_override = Some(parse_number("--tempo", args.get(i + 1))),
            "--step" => step = parse_number("--step", args.get(i + 1)),
            other => {
                eprintln!("Unknown argument '{}'", other);
                usage();
            }
        }
        i += 2;
    }
    if step <= 0.0 {
        eprintln!("--step must be positive");
        process::exit(1);
    }

    // Read layout file
    let source = match fs::read_to_string(input_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", input_path, e);
            process::exit(1);
        }
    };

    let layout = match LayoutFile::from_yaml(&source) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("Error in '{}': {}", input_path, e);
            process::exit(1);
        }
    };

    let tempo = match tempo_override {
        Some(bpm) => TempoMap::constant(bpm),
        None => layout.tempo_map(),
    };
    let tempo = match tempo {
        Ok(tempo) => tempo,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let options = layout.options.clone();
    let result = SmoothCursor::new(layout.into_score(), options).and_then(|mut cursor| {
        cursor.attach_overlay(MemoryOverlay::new());
        cursor.initialize_cursor_tracking()?;
        cursor.set_tempo_map(tempo)?;
        Ok(cursor)
    });
    let mut cursor = match result {
        Ok(cursor) => cursor,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    print_trace(&mut cursor, step);
}

/// Play the score from the start and print one line per tick.
fn print_trace(cursor: &mut SmoothCursor<StaticScore, MemoryOverlay>, step: f64) {
    let end = cursor
        .locator()
        .and_then(|l| l.snapshots().last())
        .map(|s| s.time)
        .unwrap_or(0.0);

    println!("time_ms\tx\ty\tgroup\tmeasure");
    let mut tick = 0;
    loop {
        let time = tick as f64 * step;
        if time > end + step {
            break;
        }
        cursor.on_time_tick(time);

        let rect = cursor.overlay().map(|o| o.rect).unwrap_or_default();
        let group = cursor.locator().map(|l| l.cursor_index()).unwrap_or(0);
        let measure = cursor
            .current_measure_index()
            .map(|m| (m + 1).to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:.0}\t{:.1}\t{:.1}\t{}\t{}", time, rect.x, rect.y, group, measure);
        tick += 1;
    }

    for (note, color) in cursor.engine().paint_log() {
        println!("paint\t{}\t{}\t{}", note.group, note.id, color);
    }
}
