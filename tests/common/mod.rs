//! Shared fixture nodes for the integration suites
//!
//! The fixtures implement the node contract the way a host program
//! would: sources own an `Output` cell and write into it on `Ready`,
//! consumers cache the typed handle they receive in `bind` and read the
//! latest upstream value on every poll. Every fixture records its polls
//! in a shared [`PollLog`] so tests can assert exactly which nodes a
//! tick visited.
#![allow(dead_code)]

use rheo::{Node, Output, Poll, SourceView, ValueRef};
use std::any::TypeId;
use std::cell::RefCell;
use std::rc::Rc;

/// Installs a fmt subscriber honoring `RUST_LOG`, once per test binary
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Shared record of which nodes were polled, in poll order
#[derive(Clone, Default)]
pub struct PollLog(Rc<RefCell<Vec<String>>>);

impl PollLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &str) {
        self.0.borrow_mut().push(name.to_string());
    }

    /// Drains the log and returns the polled names sorted
    pub fn take_sorted(&self) -> Vec<String> {
        let mut polled = std::mem::take(&mut *self.0.borrow_mut());
        polled.sort_unstable();
        polled
    }
}

/// Integer source: counts up each poll; `Empty` while the value is
/// non-positive, `Closed` once it reaches 5
pub struct IntSource {
    value: i64,
    name: String,
    log: PollLog,
    out: Output<i64>,
}

impl IntSource {
    pub fn new(start: i64, name: &str, log: PollLog) -> Self {
        Self {
            value: start,
            name: name.to_string(),
            log,
            out: Output::new(0),
        }
    }
}

impl Node for IntSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_types(&self) -> Vec<TypeId> {
        Vec::new()
    }

    fn output_type(&self) -> Option<TypeId> {
        Some(TypeId::of::<i64>())
    }

    fn poll_next(&mut self) -> Poll {
        self.log.record(&self.name);
        self.value += 1;
        if self.value >= 5 {
            return Poll::Closed;
        }
        if self.value <= 0 {
            return Poll::Empty;
        }
        self.out.set(self.value);
        Poll::Ready
    }

    fn source_view(&self) -> Option<SourceView> {
        Some(self.out.view())
    }
}

/// String source: appends one "a" per poll, `Closed` at length 3
pub struct StringSource {
    value: String,
    name: String,
    log: PollLog,
    out: Output<String>,
}

impl StringSource {
    pub fn new(start: &str, name: &str, log: PollLog) -> Self {
        Self {
            value: start.to_string(),
            name: name.to_string(),
            log,
            out: Output::new(String::new()),
        }
    }
}

impl Node for StringSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_types(&self) -> Vec<TypeId> {
        Vec::new()
    }

    fn output_type(&self) -> Option<TypeId> {
        Some(TypeId::of::<String>())
    }

    fn poll_next(&mut self) -> Poll {
        self.log.record(&self.name);
        if self.value.len() >= 3 {
            return Poll::Closed;
        }
        self.value.push('a');
        self.out.set(self.value.clone());
        Poll::Ready
    }

    fn source_view(&self) -> Option<SourceView> {
        Some(self.out.view())
    }
}

/// `(i64) -> i64` pass-through component
pub struct IntRelay {
    name: String,
    log: PollLog,
    input: Option<ValueRef<i64>>,
    out: Output<i64>,
}

impl IntRelay {
    pub fn new(name: &str, log: PollLog) -> Self {
        Self {
            name: name.to_string(),
            log,
            input: None,
            out: Output::new(0),
        }
    }
}

impl Node for IntRelay {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_types(&self) -> Vec<TypeId> {
        vec![TypeId::of::<i64>()]
    }

    fn output_type(&self) -> Option<TypeId> {
        Some(TypeId::of::<i64>())
    }

    fn poll_next(&mut self) -> Poll {
        self.log.record(&self.name);
        match &self.input {
            Some(input) => {
                let value = *input.get();
                self.out.set(value);
                Poll::Ready
            }
            None => Poll::Empty,
        }
    }

    fn bind(&mut self, source: SourceView, slot: usize) {
        if slot == 0 {
            self.input = source.downcast::<i64>();
        }
    }

    fn unbind(&mut self, slot: usize) {
        if slot == 0 {
            self.input = None;
        }
    }

    fn source_view(&self) -> Option<SourceView> {
        Some(self.out.view())
    }
}

/// `(String) -> String` pass-through component
pub struct StringRelay {
    name: String,
    log: PollLog,
    input: Option<ValueRef<String>>,
    out: Output<String>,
}

impl StringRelay {
    pub fn new(name: &str, log: PollLog) -> Self {
        Self {
            name: name.to_string(),
            log,
            input: None,
            out: Output::new(String::new()),
        }
    }
}

impl Node for StringRelay {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_types(&self) -> Vec<TypeId> {
        vec![TypeId::of::<String>()]
    }

    fn output_type(&self) -> Option<TypeId> {
        Some(TypeId::of::<String>())
    }

    fn poll_next(&mut self) -> Poll {
        self.log.record(&self.name);
        match &self.input {
            Some(input) => {
                let value = input.get().clone();
                self.out.set(value);
                Poll::Ready
            }
            None => Poll::Empty,
        }
    }

    fn bind(&mut self, source: SourceView, slot: usize) {
        if slot == 0 {
            self.input = source.downcast::<String>();
        }
    }

    fn unbind(&mut self, slot: usize) {
        if slot == 0 {
            self.input = None;
        }
    }

    fn source_view(&self) -> Option<SourceView> {
        Some(self.out.view())
    }
}

/// `(i64, String) -> String` join formatting "<int> <string>"
pub struct Join {
    name: String,
    log: PollLog,
    number: Option<ValueRef<i64>>,
    text: Option<ValueRef<String>>,
    out: Output<String>,
}

impl Join {
    pub fn new(name: &str, log: PollLog) -> Self {
        Self {
            name: name.to_string(),
            log,
            number: None,
            text: None,
            out: Output::new(String::new()),
        }
    }
}

impl Node for Join {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_types(&self) -> Vec<TypeId> {
        vec![TypeId::of::<i64>(), TypeId::of::<String>()]
    }

    fn output_type(&self) -> Option<TypeId> {
        Some(TypeId::of::<String>())
    }

    fn poll_next(&mut self) -> Poll {
        self.log.record(&self.name);
        match (&self.number, &self.text) {
            (Some(number), Some(text)) => {
                let value = format!("{} {}", number.get(), text.get());
                self.out.set(value);
                Poll::Ready
            }
            _ => Poll::Empty,
        }
    }

    fn bind(&mut self, source: SourceView, slot: usize) {
        match slot {
            0 => self.number = source.downcast::<i64>(),
            1 => self.text = source.downcast::<String>(),
            _ => {}
        }
    }

    fn unbind(&mut self, slot: usize) {
        match slot {
            0 => self.number = None,
            1 => self.text = None,
            _ => {}
        }
    }

    fn source_view(&self) -> Option<SourceView> {
        Some(self.out.view())
    }
}

/// `(i64, i64) -> i64` two-input sum, for fan-in and cycle scenarios
pub struct Adder {
    name: String,
    log: PollLog,
    lhs: Option<ValueRef<i64>>,
    rhs: Option<ValueRef<i64>>,
    out: Output<i64>,
}

impl Adder {
    pub fn new(name: &str, log: PollLog) -> Self {
        Self {
            name: name.to_string(),
            log,
            lhs: None,
            rhs: None,
            out: Output::new(0),
        }
    }
}

impl Node for Adder {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_types(&self) -> Vec<TypeId> {
        vec![TypeId::of::<i64>(), TypeId::of::<i64>()]
    }

    fn output_type(&self) -> Option<TypeId> {
        Some(TypeId::of::<i64>())
    }

    fn poll_next(&mut self) -> Poll {
        self.log.record(&self.name);
        match (&self.lhs, &self.rhs) {
            (Some(lhs), Some(rhs)) => {
                let sum = *lhs.get() + *rhs.get();
                self.out.set(sum);
                Poll::Ready
            }
            _ => Poll::Empty,
        }
    }

    fn bind(&mut self, source: SourceView, slot: usize) {
        match slot {
            0 => self.lhs = source.downcast::<i64>(),
            1 => self.rhs = source.downcast::<i64>(),
            _ => {}
        }
    }

    fn unbind(&mut self, slot: usize) {
        match slot {
            0 => self.lhs = None,
            1 => self.rhs = None,
            _ => {}
        }
    }

    fn source_view(&self) -> Option<SourceView> {
        Some(self.out.view())
    }
}

/// Sink that reads its producer's latest value on demand
pub struct RecordingSink<T: 'static> {
    name: String,
    log: PollLog,
    input: Option<ValueRef<T>>,
}

impl<T: Clone + 'static> RecordingSink<T> {
    pub fn new(name: &str, log: PollLog) -> Self {
        Self {
            name: name.to_string(),
            log,
            input: None,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.input.is_some()
    }

    /// The producer's current value; panics if the sink was never bound
    pub fn outcome(&self) -> T {
        self.input.as_ref().expect("sink is not bound").get().clone()
    }
}

impl<T: Clone + 'static> Node for RecordingSink<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_types(&self) -> Vec<TypeId> {
        vec![TypeId::of::<T>()]
    }

    fn output_type(&self) -> Option<TypeId> {
        None
    }

    fn poll_next(&mut self) -> Poll {
        self.log.record(&self.name);
        if self.input.is_some() {
            Poll::Ready
        } else {
            Poll::Empty
        }
    }

    fn bind(&mut self, source: SourceView, slot: usize) {
        if slot == 0 {
            self.input = source.downcast::<T>();
        }
    }

    fn unbind(&mut self, slot: usize) {
        if slot == 0 {
            self.input = None;
        }
    }
}
