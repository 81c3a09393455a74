//! Text loader for the MAX-SC-QBF instance format.
//!
//! Whitespace-separated tokens:
//!
//! ```text
//! n
//! |S_1| |S_2| ... |S_n|
//! S_1 elements (1-based)
//! ...
//! S_n elements (1-based)
//! a_11 a_12 ... a_1n
//!      a_22 ... a_2n
//!           ...
//!               a_nn
//! ```
//!
//! The universe is `{1, ..., n}`; element ids are converted to 0-based.

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use super::model::Instance;
use crate::coefficient::Coefficient;
use crate::error::MalformedInstanceError;

struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
            position: 0,
        }
    }

    fn next<V: FromStr>(&mut self, expected: &'static str) -> Result<V, MalformedInstanceError> {
        let token = self
            .inner
            .next()
            .ok_or(MalformedInstanceError::UnexpectedEof { expected })?;
        let position = self.position;
        self.position += 1;
        token
            .parse()
            .map_err(|_| MalformedInstanceError::InvalidToken {
                position,
                token: token.to_string(),
            })
    }

    fn finish(mut self) -> Result<(), MalformedInstanceError> {
        match self.inner.next() {
            Some(_) => Err(MalformedInstanceError::TrailingData {
                position: self.position,
            }),
            None => Ok(()),
        }
    }
}

impl<T: Coefficient> FromStr for Instance<T> {
    type Err = MalformedInstanceError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut tokens = Tokens::new(text);

        let n: usize = tokens.next("item count")?;
        if n == 0 {
            return Err(MalformedInstanceError::NoItems);
        }

        // every remaining value needs at least one byte of input
        let bound = |k: usize| k.min(text.len());

        let mut sizes = Vec::with_capacity(bound(n));
        for _ in 0..n {
            sizes.push(tokens.next::<usize>("coverage set sizes")?);
        }

        let mut coverage = Vec::with_capacity(bound(n));
        for (item, &size) in sizes.iter().enumerate() {
            let mut set = Vec::with_capacity(bound(size));
            for _ in 0..size {
                let element: usize = tokens.next("coverage sets")?;
                if element == 0 || element > n {
                    return Err(MalformedInstanceError::ElementOutOfRange {
                        item,
                        element,
                        universe_size: n,
                    });
                }
                set.push(element - 1);
            }
            coverage.push(set);
        }

        let mut rows = Vec::with_capacity(bound(n));
        for i in 0..n {
            let mut row = Vec::with_capacity(bound(n - i));
            for _ in i..n {
                row.push(tokens.next::<T>("coefficient matrix")?);
            }
            rows.push(row);
        }
        tokens.finish()?;

        Instance::from_upper_triangular(n, coverage, rows)
    }
}

impl<T: Coefficient> Instance<T> {
    /// Reads an instance from any reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, MalformedInstanceError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| MalformedInstanceError::Io(e.to_string()))?;
        text.parse()
    }

    /// Reads an instance from a file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, MalformedInstanceError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| MalformedInstanceError::Io(e.to_string()))?;
        text.parse()
    }
}
