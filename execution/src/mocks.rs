//! Deterministic collaborators for tests: a scripted randomness source and a
//! scripted console.

use std::collections::VecDeque;
use std::io;

use fairdice_types::DiceSet;

use crate::rng_pipeline::KEY_LEN;
use crate::{Console, RandomSource, Tone};

/// The three-dice configuration used throughout the tests.
pub fn default_dice() -> DiceSet {
    DiceSet::parse(&["2,2,4,4,9,9", "6,8,1,1,8,6", "7,5,3,7,5,3"])
        .expect("default dice are valid")
}

/// Randomness source replaying a fixed sequence of numbers.
///
/// `uniform(max)` returns the next scripted value reduced into `[0, max]`,
/// cycling when the script runs out. Keys are distinct per call unless a
/// constant key is configured.
#[derive(Clone, Debug)]
pub struct FixedRandom {
    numbers: Vec<u64>,
    next: usize,
    constant_key: Option<[u8; KEY_LEN]>,
    keys_drawn: u64,
}

impl FixedRandom {
    pub fn new(numbers: impl IntoIterator<Item = u64>) -> Self {
        let numbers: Vec<u64> = numbers.into_iter().collect();
        assert!(!numbers.is_empty(), "FixedRandom needs at least one value");
        Self {
            numbers,
            next: 0,
            constant_key: None,
            keys_drawn: 0,
        }
    }

    /// Source that always yields `0`.
    pub fn zeros() -> Self {
        Self::new([0])
    }

    /// Return `key` for every draw, which trips the key-reuse warning.
    pub fn with_constant_key(mut self, key: [u8; KEY_LEN]) -> Self {
        self.constant_key = Some(key);
        self
    }

    pub fn keys_drawn(&self) -> u64 {
        self.keys_drawn
    }
}

impl RandomSource for FixedRandom {
    fn secret_key(&mut self) -> [u8; KEY_LEN] {
        self.keys_drawn += 1;
        if let Some(key) = self.constant_key {
            return key;
        }
        let mut key = [0u8; KEY_LEN];
        key[..8].copy_from_slice(&self.keys_drawn.to_be_bytes());
        key
    }

    fn uniform(&mut self, max: u64) -> u64 {
        let value = self.numbers[self.next % self.numbers.len()];
        self.next += 1;
        value % (max + 1)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Entry {
    Line(String),
    Prompt,
}

/// Console fed from a queue of input lines, recording everything printed.
///
/// Once the queue is empty `read_line` reports end of input, or an I/O
/// error after [`ScriptedConsole::then_fail`].
#[derive(Clone, Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    transcript: Vec<Entry>,
    fail_when_empty: bool,
}

impl ScriptedConsole {
    pub fn new<S: Into<String>>(inputs: impl IntoIterator<Item = S>) -> Self {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
            fail_when_empty: false,
        }
    }

    /// Fail reads once the scripted inputs are used up.
    pub fn then_fail(mut self) -> Self {
        self.fail_when_empty = true;
        self
    }

    /// Printed lines, in order, without prompts.
    pub fn lines(&self) -> Vec<String> {
        self.transcript
            .iter()
            .filter_map(|entry| match entry {
                Entry::Line(text) => Some(text.clone()),
                Entry::Prompt => None,
            })
            .collect()
    }

    /// Whether `line` was printed exactly.
    pub fn contains(&self, line: &str) -> bool {
        self.count(line) > 0
    }

    /// Whether any printed line contains `fragment`.
    pub fn contains_fragment(&self, fragment: &str) -> bool {
        self.lines().iter().any(|line| line.contains(fragment))
    }

    /// How many times `line` was printed exactly.
    pub fn count(&self, line: &str) -> usize {
        self.lines().iter().filter(|l| l.as_str() == line).count()
    }

    /// Number of prompts issued.
    pub fn prompts(&self) -> usize {
        self.transcript
            .iter()
            .filter(|entry| matches!(entry, Entry::Prompt))
            .count()
    }

    /// Number of lines printed before the `n`-th prompt (zero based), or all
    /// lines if fewer prompts were issued.
    pub fn lines_before_prompt(&self, n: usize) -> usize {
        let mut prompts = 0;
        let mut lines = 0;
        for entry in &self.transcript {
            match entry {
                Entry::Prompt if prompts == n => return lines,
                Entry::Prompt => prompts += 1,
                Entry::Line(_) => lines += 1,
            }
        }
        lines
    }

    /// Input lines not consumed yet.
    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn emit(&mut self, _tone: Tone, text: &str) {
        self.transcript.push(Entry::Line(text.to_string()));
    }

    fn read_line(&mut self, _prompt: &str) -> io::Result<Option<String>> {
        self.transcript.push(Entry::Prompt);
        match self.inputs.pop_front() {
            None if self.fail_when_empty => {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed"))
            }
            line => Ok(line),
        }
    }
}
