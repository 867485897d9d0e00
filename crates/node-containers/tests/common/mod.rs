//! Fixtures shared by the integration tests.
#![allow(dead_code)]

use std::cell::Cell;
use std::fmt::Display;

use node_containers::{Iterable, Visitor};
use simplelog::{Config, LevelFilter, TestLogger};

pub fn init_logging() {
    // Several tests in one binary race to install the logger; only the first wins.
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

pub fn collect<T: Clone, C: Iterable<T>>(container: &C) -> Vec<T> {
    container.iter().cloned().collect()
}

/// Sums every visited element.
#[derive(Default)]
pub struct AddingVisitor {
    pub sum: i64,
}

impl Visitor<i32> for AddingVisitor {
    fn visit(&mut self, element: &mut i32) {
        self.sum += i64::from(*element);
    }
}

/// Records the rendered form of every visited element.
#[derive(Default)]
pub struct PrintingVisitor {
    pub lines: Vec<String>,
}

impl<T: Display> Visitor<T> for PrintingVisitor {
    fn visit(&mut self, element: &mut T) {
        self.lines.push(element.to_string());
    }
}

/// Stops once a value in `[17, 42]` has been seen. Counts how often the
/// traversal asked whether it is finished and how many elements it saw.
#[derive(Default)]
pub struct RangeSearchingVisitor {
    pub found: Option<i32>,
    pub visits: usize,
    pub finished_queries: Cell<usize>,
}

impl Visitor<i32> for RangeSearchingVisitor {
    fn visit(&mut self, element: &mut i32) {
        self.visits += 1;
        if (17..=42).contains(element) {
            self.found = Some(*element);
        }
    }

    fn finished(&self) -> bool {
        self.finished_queries.set(self.finished_queries.get() + 1);
        self.found.is_some()
    }
}
