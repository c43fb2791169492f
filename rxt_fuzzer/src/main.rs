/**
 * Randomized robustness checks for the pattern translator.
 */

extern crate rxt_regexp;
extern crate rand;

mod rnd;
mod str_gen;
mod fuzz_gen;

use anyhow::{anyhow, bail, ensure, Context, Result};
use clap::Parser;
use tracing::{debug, info, trace};
use tracing_subscriber::EnvFilter;
use rxt_regexp::{parse_with_tokens, SyntaxError, TokenTable, Translator};
use rnd::*;
use str_gen::*;
use fuzz_gen::*;

#[derive(Parser, Debug)]
#[command(name = "rxt_fuzzer", about = "Feeds random patterns to the regexp translator")]
struct Args {
    /// Seed for the random generator, defaults to the current time
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rounds to run
    #[arg(long, default_value_t = 10_000)]
    iterations: usize,

    /// Maximum group nesting of generated patterns
    #[arg(long, default_value_t = 3)]
    max_depth: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    set_seed(args.seed.unwrap_or_else(seed_from_system_time));
    info!(seed = current_seed(), iterations = args.iterations, "fuzzing");

    let tokens: TokenTable = vec![("num", "[0-9]+"), ("id", r"a\b")].into_iter().collect();
    let token_names: Vec<String> = tokens.names().into_iter().map(String::from).collect();
    let translator = Translator::with_tokens(tokens);

    let well_formed = PatternGenerator::new(token_names.clone(), args.max_depth);
    let noise = RandomStringGenerator::noise(0..16);
    let mut edits = RandomEdit::new();
    edits.add(InsertEdit::appending(RandomStringGenerator::noise(1..3)));
    edits.add(InsertEdit::anywhere(RandomStringGenerator::noise(1..3)));
    edits.add(DeleteEdit::with_max_chars(3));
    edits.add(DuplicateEdit::with_max_chars(2));
    edits.add(SpliceEdit::with_gen(PatternGenerator::new(token_names.clone(), 1), 4));

    let mut accepted = 0;
    for iteration in 0..args.iterations {
        let pattern = well_formed.generate();
        check_well_formed(&translator, &token_names, &pattern)
            .with_context(|| format!("seed {}, iteration {}", current_seed(), iteration))?;

        let mutated = apply_edit(&pattern, &edits.make_edit(&pattern));
        let random = noise.generate();
        for candidate in &[mutated, random] {
            if check_any(&translator, candidate)
                .with_context(|| format!("seed {}, iteration {}", current_seed(), iteration))? {
                accepted += 1;
            }
        }
    }

    info!(accepted, rejected = 2 * args.iterations - accepted, "no failures");
    Ok(())
}

/// A pattern built from the grammar must always translate.
fn check_well_formed(translator: &Translator, token_names: &[String], pattern: &str) -> Result<()> {
    if let Err(err) = translator.translate(pattern) {
        bail!("well-formed pattern rejected: {}\n{}", err, err.caret_diagnostic());
    }
    if let Ok(Some(tree)) = parse_with_tokens(pattern, token_names) {
        trace!("{}", tree);
    }
    check_any(translator, pattern).map(|_| ())
}

/// Any input must be handled without panicking and deterministically. Errors
/// must point inside the pattern, results must be patterns again. Returns
/// whether the pattern was accepted.
fn check_any(translator: &Translator, pattern: &str) -> Result<bool> {
    let first = translate_guarded(translator, pattern)?;
    let second = translate_guarded(translator, pattern)?;
    ensure!(first == second, "translating {:?} is not deterministic", pattern);

    match first {
        Ok(result) => {
            check_output(&result)
                .with_context(|| format!("{:?} translated to {:?}", pattern, result))?;
            debug!(pattern, result = result.as_str(), "accepted");
            Ok(true)
        },
        Err(err) => {
            ensure!(err.position <= pattern.len(), "error offset {} outside of {:?}", err.position, pattern);
            ensure!(pattern.is_char_boundary(err.position), "error offset {} splits a character of {:?}", err.position, pattern);
            ensure!(err.pattern == pattern, "error carries {:?} instead of {:?}", err.pattern, pattern);
            debug!(pattern, position = err.position, kind = ?err.kind, "rejected");
            Ok(false)
        },
    }
}

fn translate_guarded(translator: &Translator, pattern: &str) -> Result<std::result::Result<String, SyntaxError>> {
    std::panic::catch_unwind(|| translator.translate(pattern))
        .map_err(|_| anyhow!("translator panicked on {:?}", pattern))
}

/// Compiles the translation where the `regex` crate shares the JDK syntax,
/// the rest only gets its structure checked.
fn check_output(result: &str) -> Result<()> {
    check_structure(result)?;
    // Quoting, POSIX properties and repeated assertions are JDK only
    if [r"\Q", r"\p{", r"\b", r"\B"].iter().any(|jdk_only| result.contains(jdk_only)) {
        return Ok(());
    }
    match regex::Regex::new(result) {
        Ok(_) | Err(regex::Error::CompiledTooBig(_)) => Ok(()),
        Err(err) => bail!("the translation does not compile: {}", err),
    }
}

/// Groups are balanced, no set starts with a raw `]`, and every raw `-` in a
/// set sits between two range endpoints.
fn check_structure(result: &str) -> Result<()> {
    let mut chars = result.chars().peekable();
    let mut groups = 0usize;
    let mut in_set = false;
    // Inside a set: the previous item can be the low end of a range
    let mut endpoint = false;
    let mut after_dash = false;
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                match chars.next() {
                    Some('Q') if !in_set => {
                        loop {
                            match chars.next() {
                                Some('\\') if chars.peek() == Some(&'E') => {
                                    chars.next();
                                    break;
                                },
                                Some(_) => {},
                                None => bail!("unterminated \\Q"),
                            }
                        }
                    },
                    Some('u') => {
                        for _ in 0..4 {
                            chars.next();
                        }
                    },
                    Some(_) => {},
                    None => bail!("dangling backslash"),
                }
                endpoint = in_set && !after_dash;
                after_dash = false;
            },
            '[' if !in_set => {
                in_set = true;
                endpoint = false;
                after_dash = false;
                if chars.peek() == Some(&'^') {
                    chars.next();
                }
                ensure!(chars.peek() != Some(&']'), "a set starts with a raw ']'");
            },
            ']' if in_set => {
                ensure!(!after_dash, "a raw '-' ends a set");
                in_set = false;
            },
            '-' if in_set => {
                ensure!(endpoint, "a raw '-' in a set has no low endpoint");
                endpoint = false;
                after_dash = true;
            },
            _ if in_set => {
                endpoint = !after_dash;
                after_dash = false;
            },
            '(' => groups += 1,
            ')' => {
                ensure!(groups > 0, "unbalanced ')'");
                groups -= 1;
            },
            _ => {},
        }
    }
    ensure!(!in_set, "unterminated set");
    ensure!(groups == 0, "unbalanced '('");
    Ok(())
}
