use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process;
use std::time::Instant;

use rand::random_range;
use serde_json::json;
use section_uid::radix::validate_radix;
use section_uid::{
    CounterConfig, SectionCounter, decode, encode, parse_section_id, validate_section_id,
};

#[derive(Debug, Clone, Default)]
struct CounterOpts {
    config: CounterConfig,
    count: usize,
    depth: usize,
    json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Op {
    Next,
    Enter(Option<String>),
    Exit,
}

fn print_help() {
    eprintln!(
        "section-uid - hierarchical section id CLI\n\n\
Usage:\n  section-uid next [--prefix <p>] [--radix <n>] [--count <n>]\n  section-uid run <script> [--prefix <p>] [--radix <n>] [--no-exit-consume] [--json]\n  section-uid encode <value> [--radix <n>]\n  section-uid decode <text> [--radix <n>]\n  section-uid validate <id> [--prefix <p>] [--radix <n>]\n  section-uid parse <id> [--prefix <p>] [--radix <n>] [--json]\n  section-uid bench [--count <n>] [--depth <n>] [--radix <n>]\n  section-uid selftest\n\n\
Common flags:\n  --config <file.json>   load prefix/radix/consume_on_exit from JSON (flags after it override)\n\n\
Script ops (space or comma separated):\n  n | next          emit the next id\n  enter[:<base>]    open a scope, optionally with a base\n  exit              close the active scope\n"
    );
}

fn parse_radix(s: &str) -> Result<u32, String> {
    let radix = s
        .parse::<u32>()
        .map_err(|_| "invalid integer for --radix".to_string())?;
    validate_radix(radix).map_err(|e| e.to_string())
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("missing value for {flag}"))
}

fn parse_counter_flags(args: &[String]) -> Result<CounterOpts, String> {
    let mut opts = CounterOpts::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                let path = flag_value(args, i, "--config")?;
                opts.config = CounterConfig::load(Path::new(path)).map_err(|e| e.to_string())?;
                opts.config.validate().map_err(|e| e.to_string())?;
                i += 2;
            }
            "--prefix" => {
                opts.config.prefix = Some(flag_value(args, i, "--prefix")?.to_string());
                i += 2;
            }
            "--radix" => {
                opts.config.radix = parse_radix(flag_value(args, i, "--radix")?)?;
                i += 2;
            }
            "--count" => {
                opts.count = flag_value(args, i, "--count")?
                    .parse::<usize>()
                    .map_err(|_| "invalid integer for --count".to_string())?;
                i += 2;
            }
            "--depth" => {
                opts.depth = flag_value(args, i, "--depth")?
                    .parse::<usize>()
                    .map_err(|_| "invalid integer for --depth".to_string())?;
                i += 2;
            }
            "--no-exit-consume" => {
                opts.config.consume_on_exit = false;
                i += 1;
            }
            "--json" => {
                opts.json = true;
                i += 1;
            }
            _ => return Err(format!("unknown flag: {}", args[i])),
        }
    }

    Ok(opts)
}

fn parse_script(script: &str) -> Result<Vec<Op>, String> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .map(|tok| match tok {
            "n" | "next" => Ok(Op::Next),
            "exit" => Ok(Op::Exit),
            "enter" => Ok(Op::Enter(None)),
            _ => match tok.strip_prefix("enter:") {
                Some(base) => Ok(Op::Enter(Some(base.to_string()))),
                None => Err(format!("unknown script op: {tok}")),
            },
        })
        .collect()
}

fn run_next(args: &[String]) -> Result<(), String> {
    let opts = parse_counter_flags(args)?;
    let mut counter = SectionCounter::from_config(&opts.config);
    let mut out = io::stdout().lock();
    let mut line = String::new();

    for _ in 0..opts.count.max(1) {
        line.clear();
        counter.next_id_into(&mut line);
        writeln!(out, "{line}").map_err(|e| e.to_string())?;
    }
    out.flush().map_err(|e| e.to_string())
}

fn run_script(args: &[String]) -> Result<(), String> {
    let Some(script) = args.first() else {
        return Err("run requires a script".to_string());
    };
    let ops = parse_script(script)?;
    let opts = parse_counter_flags(&args[1..])?;
    let mut counter = SectionCounter::from_config(&opts.config);
    let mut events = Vec::with_capacity(ops.len());

    for op in ops {
        match op {
            Op::Next => {
                let id = counter.next_id();
                if opts.json {
                    events.push(json!({ "op": "next", "id": id }));
                } else {
                    println!("{id}");
                }
            }
            Op::Enter(base) => {
                let scope = counter.enter_scope(base.as_deref());
                if opts.json {
                    events.push(json!({ "op": "enter", "scope": scope, "depth": counter.depth() }));
                } else {
                    println!("enter {scope}");
                }
            }
            Op::Exit => {
                counter.exit_scope();
                if opts.json {
                    events.push(json!({ "op": "exit", "depth": counter.depth() }));
                } else {
                    println!("exit");
                }
            }
        }
    }

    if opts.json {
        println!(
            "{}",
            serde_json::to_string(&events).map_err(|e| e.to_string())?
        );
    }
    Ok(())
}

fn run_encode(args: &[String]) -> Result<(), String> {
    let Some(value) = args.first() else {
        return Err("encode requires a value".to_string());
    };
    let value = value
        .parse::<i64>()
        .map_err(|_| format!("invalid integer: {value}"))?;
    let opts = parse_counter_flags(&args[1..])?;
    println!("{}", encode(value, opts.config.radix));
    Ok(())
}

fn run_decode(args: &[String]) -> Result<(), String> {
    let Some(text) = args.first() else {
        return Err("decode requires a value".to_string());
    };
    let opts = parse_counter_flags(&args[1..])?;
    let value = decode(text, opts.config.radix).map_err(|e| e.to_string())?;
    println!("{value}");
    Ok(())
}

fn run_validate(args: &[String]) -> Result<(), String> {
    let Some(id) = args.first() else {
        return Err("validate requires an id".to_string());
    };
    let opts = parse_counter_flags(&args[1..])?;

    let ok = validate_section_id(id, opts.config.prefix.as_deref(), opts.config.radix);
    println!("{}", if ok { "true" } else { "false" });
    if ok {
        Ok(())
    } else {
        Err("invalid section id".to_string())
    }
}

fn run_parse(args: &[String]) -> Result<(), String> {
    let Some(id) = args.first() else {
        return Err("parse requires an id".to_string());
    };
    let opts = parse_counter_flags(&args[1..])?;

    let parsed = parse_section_id(id, opts.config.prefix.as_deref(), opts.config.radix)
        .map_err(|e| e.to_string())?;
    if opts.json {
        let payload = json!({
            "raw": parsed.raw,
            "scope": parsed.scope,
            "segments": parsed.segment_count(),
            "counter": parsed.counter,
        });
        println!(
            "{}",
            serde_json::to_string(&payload).map_err(|e| e.to_string())?
        );
    } else {
        println!("raw={}", parsed.raw);
        println!("scope={}", parsed.scope.as_deref().unwrap_or_default());
        println!("segments={}", parsed.segment_count());
        println!("counter={}", parsed.counter);
    }
    Ok(())
}

/// Random nested workload: ids, scope entries and exits, bounded by `depth`.
fn run_bench(args: &[String]) -> Result<(), String> {
    let mut opts = parse_counter_flags(args)?;
    if opts.count == 0 {
        opts.count = 100_000;
    }
    if opts.depth == 0 {
        opts.depth = 8;
    }

    let mut counter = SectionCounter::from_config(&opts.config);
    let mut sink = String::with_capacity(64);
    let (mut ids, mut scopes) = (0usize, 0usize);
    let start = Instant::now();

    for _ in 0..opts.count {
        match random_range(0..10) {
            0 if counter.depth() < opts.depth => {
                counter.enter_scope(None);
                scopes += 1;
            }
            1 if counter.depth() > 0 => counter.exit_scope(),
            _ => {
                sink.clear();
                counter.next_id_into(&mut sink);
                ids += 1;
            }
        }
    }

    let secs = start.elapsed().as_secs_f64().max(1e-9);
    let payload = json!({
        "radix": opts.config.radix,
        "ops": opts.count,
        "ids": ids,
        "scopes": scopes,
        "max_depth": opts.depth,
        "seconds": secs,
        "ops_per_sec": opts.count as f64 / secs,
    });
    println!(
        "{}",
        serde_json::to_string(&payload).map_err(|e| e.to_string())?
    );
    Ok(())
}

fn run_selftest() -> Result<(), String> {
    let mut counter = SectionCounter::new();
    let mut seen = vec![counter.next_id(), counter.next_id()];
    seen.push(counter.enter_scope(None));
    seen.push(counter.next_id());
    seen.push(counter.next_id());
    counter.exit_scope();
    seen.push(counter.next_id());

    let expected = ["1", "2", "3", "3_1", "3_2", "4"];
    if seen == expected {
        Ok(())
    } else {
        Err(format!("selftest failed: got {seen:?}"))
    }
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        print_help();
        process::exit(2);
    }

    if args[0] == "-h" || args[0] == "--help" || args[0] == "help" {
        print_help();
        return;
    }

    let cmd = args[0].as_str();
    let rest = &args[1..];

    let res = match cmd {
        "next" => run_next(rest),
        "run" => run_script(rest),
        "encode" => run_encode(rest),
        "decode" => run_decode(rest),
        "validate" => run_validate(rest),
        "parse" => run_parse(rest),
        "bench" => run_bench(rest),
        "selftest" => run_selftest(),
        _ => Err(format!("unknown command: {}", cmd)),
    };

    if let Err(err) = res {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
