/**
 * Edit strategies, turning well-formed patterns into near misses.
 */

use std::ops::Range;
use crate::rnd::*;
use crate::str_gen::*;

/// An edit replaces the byte range of the source with the string.
/// Both ends of the range are character boundaries.
pub type Edit = (Range<usize>, String);

pub trait FuzzStrategy {
    fn make_edit(&self, src: &str) -> Edit;
}

pub fn apply_edit(src: &str, edit: &Edit) -> String {
    let (range, text) = edit;
    let mut res = String::with_capacity(src.len() + text.len());
    res.push_str(&src[..range.start]);
    res.push_str(text);
    res.push_str(&src[range.end..]);
    res
}

/// A random character boundary of `src`, including its end.
fn rand_offset(src: &str) -> usize {
    let boundaries: Vec<usize> = src.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(src.len()))
        .collect();
    *sample(&boundaries)
}

/// A random span of at most `max_chars` characters.
fn rand_span(src: &str, max_chars: usize) -> Range<usize> {
    let start = rand_offset(src);
    let len = rand_range(&(0..(max_chars + 1)));
    let end = src[start..].char_indices()
        .nth(len)
        .map_or(src.len(), |(i, _)| start + i);
    start..end
}

/**
 * Inserts generated text, either at the end or anywhere.
 */

pub struct InsertEdit {
    gen: Box<dyn StringGenStrategy>,
    append: bool,
}

impl InsertEdit {
    pub fn appending<G>(g: G) -> Self where G : StringGenStrategy + 'static {
        Self{ gen: Box::new(g), append: true }
    }

    pub fn anywhere<G>(g: G) -> Self where G : StringGenStrategy + 'static {
        Self{ gen: Box::new(g), append: false }
    }
}

impl FuzzStrategy for InsertEdit {
    fn make_edit(&self, src: &str) -> Edit {
        let offs = if self.append { src.len() } else { rand_offset(src) };
        (offs..offs, self.gen.generate())
    }
}

/**
 * Deletes a short span, which tends to unbalance brackets and braces.
 */

pub struct DeleteEdit {
    max_chars: usize,
}

impl DeleteEdit {
    pub fn with_max_chars(max_chars: usize) -> Self {
        Self{ max_chars }
    }
}

impl FuzzStrategy for DeleteEdit {
    fn make_edit(&self, src: &str) -> Edit {
        (rand_span(src, self.max_chars), String::new())
    }
}

/**
 * Repeats a short span in place, producing things like doubled quantifiers.
 */

pub struct DuplicateEdit {
    max_chars: usize,
}

impl DuplicateEdit {
    pub fn with_max_chars(max_chars: usize) -> Self {
        Self{ max_chars }
    }
}

impl FuzzStrategy for DuplicateEdit {
    fn make_edit(&self, src: &str) -> Edit {
        let span = rand_span(src, self.max_chars);
        let text = src[span.clone()].repeat(2);
        (span, text)
    }
}

/**
 * Replaces a span with generated text.
 */

pub struct SpliceEdit {
    gen: Box<dyn StringGenStrategy>,
    max_chars: usize,
}

impl SpliceEdit {
    pub fn with_gen<G>(g: G, max_chars: usize) -> Self where G : StringGenStrategy + 'static {
        Self{ gen: Box::new(g), max_chars }
    }
}

impl FuzzStrategy for SpliceEdit {
    fn make_edit(&self, src: &str) -> Edit {
        (rand_span(src, self.max_chars), self.gen.generate())
    }
}

/**
 * Chooses from a collection of strategies and uses that.
 */

pub struct RandomEdit {
    strats: Vec<Box<dyn FuzzStrategy>>,
}

impl RandomEdit {
    pub fn new() -> Self {
        Self{ strats: Vec::new() }
    }

    pub fn add<G>(&mut self, g: G) where G : FuzzStrategy + 'static {
        self.strats.push(Box::new(g));
    }
}

impl FuzzStrategy for RandomEdit {
    fn make_edit(&self, src: &str) -> Edit {
        sample(&self.strats).make_edit(src)
    }
}
