//! Normalization throughput benchmark.
//!
//! Measures the pipeline on a large text file such as a Wikipedia abstract
//! dump, in three modes:
//!
//! 1. **Whitespace**: `remove_extra_whitespaces` alone, into a reused buffer
//! 2. **Default**: the default pipeline
//! 3. **Full**: every operation, URLs and emails first
//!
//! ## Usage
//!
//! ```bash
//! ./target/release/normalize_bench /path/to/wiki.txt
//! ./target/release/normalize_bench /path/to/wiki.txt es
//! NORMALIZR_LOG=debug ./target/release/normalize_bench /path/to/wiki.txt
//! ```
//!
//! Build in release mode and use an input of at least a few MiB for stable
//! numbers.

use std::env;
use std::fs;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use normalizr_core::analyzer::{tokenizer, whitespace};
use normalizr_core::{Normalizr, NormalizrConfig, Result, Step};
use tracing::level_filters::LevelFilter;
use tracing::{error, info};

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;

fn main() -> ExitCode {
    let level = env::var("NORMALIZR_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: normalize_bench <path> [language]");
        return ExitCode::FAILURE;
    }

    let path = &args[1];
    let language = args.get(2).map_or("en", String::as_str);

    let input = match fs::read_to_string(path) {
        Ok(input) => input,
        Err(err) => {
            error!(%path, %err, "failed to read input");
            return ExitCode::FAILURE;
        }
    };

    let normalizr = match Normalizr::new(NormalizrConfig::new(language).with_log_level(level)) {
        Ok(n) => n,
        Err(err) => {
            error!(%err, "failed to build normalizer");
            return ExitCode::FAILURE;
        }
    };

    info!(size = %fmt_bytes(input.len() as f64), language, "loaded input");

    let runs = bench_whitespace(&input)
        .and_then(|()| bench_default(&normalizr, &input))
        .and_then(|()| bench_full(&normalizr, &input));
    if let Err(err) = runs {
        error!(%err, "normalization failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn bench_whitespace(input: &str) -> Result<()> {
    let mut buf = String::with_capacity(input.len());

    println!("=== Whitespace ===");

    let run = measure(|| {
        whitespace::collapse_into(input, &mut buf);
        Ok(buf.len())
    })?;

    print_perf("Whitespace", input.len(), &run, count_tokens(&buf));
    Ok(())
}

fn bench_default(normalizr: &Normalizr, input: &str) -> Result<()> {
    println!("=== Default pipeline ===");

    let mut out = String::new();
    let run = measure(|| {
        out = normalizr.normalize(input)?;
        Ok(out.len())
    })?;

    print_perf("Default", input.len(), &run, count_tokens(&out));
    Ok(())
}

fn bench_full(normalizr: &Normalizr, input: &str) -> Result<()> {
    let steps = [
        Step::from("replace_urls"),
        Step::from("replace_emails"),
        Step::from("replace_emojis"),
        Step::from("replace_hyphens"),
        Step::from("remove_accent_marks"),
        Step::from("replace_punctuation"),
        Step::from("replace_symbols"),
        Step::from("remove_extra_whitespaces"),
        Step::from("remove_stop_words"),
    ];
    let plan = normalizr_core::pipeline::resolve(&steps)?;

    println!("=== Full pipeline ===");

    let mut out = String::new();
    let run = measure(|| {
        out = normalizr.run(input, &plan)?;
        Ok(out.len())
    })?;

    print_perf("Full", input.len(), &run, count_tokens(&out));
    Ok(())
}

fn count_tokens(text: &str) -> u64 {
    let mut tokens = 0u64;
    tokenizer::for_each_token(text, |t| {
        if !t.is_empty() {
            tokens += 1;
        }
    });
    tokens
}

/// Timings of one benchmarked mode.
struct Run {
    mean: Duration,
    fastest: Duration,
    output_bytes: usize,
}

/// Runs `f` `WARMUP_RUNS` times untimed, then `MEASURE_RUNS` times timed.
/// The first error stops the benchmark; `f` reports the size of its output.
fn measure<F>(mut f: F) -> Result<Run>
where
    F: FnMut() -> Result<usize>,
{
    for _ in 0..WARMUP_RUNS {
        std::hint::black_box(f()?);
    }

    let mut total = Duration::ZERO;
    let mut fastest = Duration::MAX;
    let mut output_bytes = 0;

    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        output_bytes = std::hint::black_box(f()?);
        let elapsed = start.elapsed();

        total += elapsed;
        fastest = fastest.min(elapsed);
    }

    Ok(Run {
        mean: total / MEASURE_RUNS as u32,
        fastest,
        output_bytes,
    })
}

fn print_perf(label: &str, input_bytes: usize, run: &Run, tokens: u64) {
    let secs = run.mean.as_secs_f64();

    println!("--------------------------------");
    println!("Mode        : {label}");
    println!("Mean        : {:.3} s (fastest {:.3} s)", secs, run.fastest.as_secs_f64());
    println!("Throughput  : {}/s", fmt_bytes(input_bytes as f64 / secs));
    println!("Output      : {}", fmt_bytes(run.output_bytes as f64));
    println!("Tokens out  : {} ({}/s)", fmt_count(tokens), fmt_count((tokens as f64 / secs) as u64));
    println!("--------------------------------\n");
}

fn fmt_bytes(bytes: f64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

    let mut value = bytes;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{value:.0} {}", UNITS[unit])
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}

fn fmt_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}
