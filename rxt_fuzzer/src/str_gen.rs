/**
 * String generation strategies.
 */

use std::ops::Range;
use rxt_regexp::parser::POSIX_CLASSES;
use crate::rnd::*;

pub trait StringGenStrategy {
    fn generate(&self) -> String;
}

/**
 * Random string from a charset.
 */

pub struct RandomStringGenerator {
    len: Range<usize>,
    charset: Vec<char>,
}

impl RandomStringGenerator {
    pub fn with_len_and_charset(len: Range<usize>, charset: &str) -> Self {
        Self{ len, charset: charset.chars().collect() }
    }

    /// Mostly metacharacters, so nearly every result is malformed.
    pub fn noise(len: Range<usize>) -> Self {
        Self{ len, charset: Alphabet::Noise.chars().to_vec() }
    }
}

impl StringGenStrategy for RandomStringGenerator {
    fn generate(&self) -> String {
        rand_string(&self.len, &self.charset)
    }
}

/**
 * Well-formed patterns, generated by walking the grammar.
 */

// Escapes valid anywhere
const ESCAPES: &[&str] = &[
    r"\t", r"\n", r"\r", r"\f", r"\\", r"\.", r"\*", r"\+", r"\?", r"\|",
    r"\(", r"\)", r"\[", r"\]", r"\{", r"\}", r"\^", r"\$", r"\b", r"\B", r"\d",
];

pub struct PatternGenerator {
    token_names: Vec<String>,
    max_depth: usize,
}

impl PatternGenerator {
    pub fn new(token_names: Vec<String>, max_depth: usize) -> Self {
        Self{ token_names, max_depth }
    }

    fn multi_regexp(&self, depth: usize, out: &mut String) {
        let branches = rand_range(&(1..3));
        for i in 0..branches {
            if i > 0 {
                out.push('|');
            }
            self.simple_regexp(depth, out);
        }
    }

    fn simple_regexp(&self, depth: usize, out: &mut String) {
        for _ in 0..rand_range(&(1..4)) {
            self.single_regexp(depth, out);
            self.quantifier(out);
        }
    }

    fn single_regexp(&self, depth: usize, out: &mut String) {
        let choices = if depth < self.max_depth { 8 } else { 7 };
        match rand_range(&(0..choices)) {
            0 => out.push(rand_char(Alphabet::Literal)),
            1 => out.push('.'),
            2 => out.push_str(sample::<&str>(ESCAPES)),
            3 => unicode_escape(rand_range(&(0x20..0xd000)), out),
            4 => self.set(out),
            5 => {
                out.push_str("[:");
                out.push_str(sample::<&str>(POSIX_CLASSES));
                out.push_str(":]");
            },
            6 => {
                if self.token_names.is_empty() {
                    out.push(rand_char(Alphabet::Literal));
                }
                else {
                    out.push('{');
                    out.push_str(sample::<String>(&self.token_names));
                    out.push('}');
                }
            },
            _ => {
                out.push('(');
                self.multi_regexp(depth + 1, out);
                out.push(')');
            },
        }
    }

    fn quantifier(&self, out: &mut String) {
        match rand_range(&(0..10)) {
            0 => out.push('*'),
            1 => out.push('+'),
            2 => out.push('?'),
            3 => out.push_str(&format!("{{{}}}", rand_range(&(0..1000)))),
            4 => out.push_str(&format!("{{{},}}", rand_range(&(0..1000)))),
            5 => {
                let low = rand_range(&(0..1000));
                let high = rand_range(&(low..1000));
                out.push_str(&format!("{{{},{}}}", low, high));
            },
            _ => {},
        }
    }

    fn set(&self, out: &mut String) {
        out.push('[');
        for special in &['^', ']', '-'] {
            if one_in(4) {
                out.push(*special);
            }
        }
        for _ in 0..rand_range(&(1..4)) {
            match rand_range(&(0..3)) {
                0 => {
                    let (low, high) = rand_endpoints();
                    out.push(low);
                    out.push('-');
                    out.push(high);
                },
                1 => unicode_escape(rand_range(&(0x80..0xd000)), out),
                _ => out.push(rand_char(Alphabet::SetBody)),
            }
        }
        out.push(']');
    }
}

impl StringGenStrategy for PatternGenerator {
    fn generate(&self) -> String {
        let mut res = String::new();
        if one_in(4) {
            res.push('^');
        }
        self.multi_regexp(0, &mut res);
        if one_in(4) {
            res.push('$');
        }
        res
    }
}

fn unicode_escape(value: usize, out: &mut String) {
    out.push('\\');
    out.push_str(&format!("u{:04x}", value));
}

#[cfg(test)]
mod str_gen_tests {
    use super::*;
    use rxt_regexp::parse_with_tokens;

    #[test]
    fn generated_patterns_parse() {
        set_seed(1234);
        let names = vec!["num".to_string(), "id".to_string()];
        let gen = PatternGenerator::new(names.clone(), 3);
        for _ in 0..500 {
            let pattern = gen.generate();
            if let Err(err) = parse_with_tokens(&pattern, names.as_slice()) {
                panic!("generated pattern rejected:\n{}", err.caret_diagnostic());
            }
        }
    }
}
