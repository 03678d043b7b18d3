//! Built-in spreadsheet functions and their metadata.
//!
//! Conventions:
//! - Function names are lowercase in the table and matched case-insensitively.
//! - Every function takes the comma-separated numeric arguments of the call.
//! - The empty name is the identity, so a bare `(expr)` resolves to `expr`.
//! - If you add a new built-in, add a [`Function`] variant, list it in
//!   [`BUILTINS`] and implement it in [`Function::apply`].

use rand::Rng;
use std::collections::HashSet;

use crate::engine::Value;
use crate::error::{EvalError, Result};

/// Largest sequence `range` will produce.
pub const MAX_RANGE_LEN: usize = 1_000_000;

/// The closed set of functions formulas can call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    Sum,
    Average,
    Median,
    Even,
    SomeEven,
    EveryEven,
    FirstTwo,
    LastTwo,
    Has2,
    Increment,
    Random,
    Range,
    NoDupes,
    Identity,
}

pub struct Builtin {
    pub name: &'static str,
    pub function: Function,
    pub description: &'static str,
}

pub const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "sum",
        function: Function::Sum,
        description: "Sum of the arguments (0 when empty)",
    },
    Builtin {
        name: "average",
        function: Function::Average,
        description: "Arithmetic mean of the arguments",
    },
    Builtin {
        name: "median",
        function: Function::Median,
        description: "Middle value; mean of the middle pair for even counts",
    },
    Builtin {
        name: "even",
        function: Function::Even,
        description: "Only the even arguments",
    },
    Builtin {
        name: "someeven",
        function: Function::SomeEven,
        description: "true if any argument is even",
    },
    Builtin {
        name: "everyeven",
        function: Function::EveryEven,
        description: "true if every argument is even",
    },
    Builtin {
        name: "firsttwo",
        function: Function::FirstTwo,
        description: "The first two arguments",
    },
    Builtin {
        name: "lasttwo",
        function: Function::LastTwo,
        description: "The last two arguments",
    },
    Builtin {
        name: "has2",
        function: Function::Has2,
        description: "true if any argument equals 2",
    },
    Builtin {
        name: "increment",
        function: Function::Increment,
        description: "Every argument plus one",
    },
    Builtin {
        name: "random",
        function: Function::Random,
        description: "Random integer between the two arguments, inclusive",
    },
    Builtin {
        name: "range",
        function: Function::Range,
        description: "Consecutive integers from the first argument up to the second",
    },
    Builtin {
        name: "nodupes",
        function: Function::NoDupes,
        description: "Arguments without repeats, first occurrence kept",
    },
    Builtin {
        name: "",
        function: Function::Identity,
        description: "Parenthesised value, passed through unchanged",
    },
];

impl Function {
    /// Resolve a function by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Function> {
        BUILTINS
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name))
            .map(|b| b.function)
    }

    pub fn name(self) -> &'static str {
        BUILTINS
            .iter()
            .find(|b| b.function == self)
            .map(|b| b.name)
            .unwrap_or("")
    }

    /// Apply the function to its numeric arguments.
    pub fn apply(self, nums: &[f64]) -> Result<Value> {
        let value = match self {
            Function::Sum => Value::Number(sum(nums)),
            Function::Average => Value::Number(average(nums)?),
            Function::Median => Value::Number(median(nums)?),
            Function::Even => Value::List(nums.iter().copied().filter(|n| is_even(*n)).collect()),
            Function::SomeEven => Value::Bool(nums.iter().any(|n| is_even(*n))),
            Function::EveryEven => Value::Bool(nums.iter().all(|n| is_even(*n))),
            Function::FirstTwo => Value::List(nums.iter().take(2).copied().collect()),
            Function::LastTwo => Value::List(nums[nums.len().saturating_sub(2)..].to_vec()),
            Function::Has2 => Value::Bool(nums.contains(&2.0)),
            Function::Increment => Value::List(nums.iter().map(|n| n + 1.0).collect()),
            Function::Random => Value::Number(random(nums)?),
            Function::Range => Value::List(number_range(nums)?),
            Function::NoDupes => Value::List(no_dupes(nums)),
            Function::Identity => match nums {
                [single] => Value::Number(*single),
                _ => Value::List(nums.to_vec()),
            },
        };
        Ok(value)
    }
}

pub fn is_even(n: f64) -> bool {
    n % 2.0 == 0.0
}

pub fn sum(nums: &[f64]) -> f64 {
    nums.iter().sum()
}

pub fn average(nums: &[f64]) -> Result<f64> {
    if nums.is_empty() {
        return Err(EvalError::EmptyInput {
            function: Function::Average.name(),
        });
    }
    Ok(sum(nums) / nums.len() as f64)
}

pub fn median(nums: &[f64]) -> Result<f64> {
    if nums.is_empty() {
        return Err(EvalError::EmptyInput {
            function: Function::Median.name(),
        });
    }
    let mut sorted = nums.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let middle = sorted.len() / 2;
    if sorted.len().is_multiple_of(2) {
        average(&sorted[middle - 1..=middle])
    } else {
        Ok(sorted[middle])
    }
}

/// Random integer between `x` and `y` inclusive, in either order.
pub fn random(nums: &[f64]) -> Result<f64> {
    let &[x, y] = nums else {
        return Err(EvalError::InvalidRange {
            function: Function::Random.name(),
            len: nums.len(),
        });
    };
    let min = x.min(y);
    let max = x.max(y);
    let unit: f64 = rand::thread_rng().r#gen();
    Ok((unit * (max - min + 1.0)).floor() + min)
}

fn number_range(nums: &[f64]) -> Result<Vec<f64>> {
    let &[start, end] = nums else {
        return Err(EvalError::InvalidRange {
            function: Function::Range.name(),
            len: nums.len(),
        });
    };
    if end < start {
        return Ok(Vec::new());
    }
    let span = (end - start).floor();
    if span.is_nan() || span >= MAX_RANGE_LEN as f64 {
        return Err(EvalError::RangeTooLarge {
            function: Function::Range.name(),
            limit: MAX_RANGE_LEN,
        });
    }
    Ok((0..=span as usize).map(|i| start + i as f64).collect())
}

fn no_dupes(nums: &[f64]) -> Vec<f64> {
    // NaN equals NaN and -0 equals 0 here.
    let key = |n: f64| {
        if n.is_nan() {
            f64::NAN.to_bits()
        } else if n == 0.0 {
            0
        } else {
            n.to_bits()
        }
    };
    let mut seen = HashSet::new();
    nums.iter().copied().filter(|n| seen.insert(key(*n))).collect()
}

/// Inclusive integer range; empty when `end < start`.
pub fn int_range(start: i64, end: i64) -> Vec<i64> {
    if end < start {
        return Vec::new();
    }
    (start..=end).collect()
}

/// Inclusive range over character codes; empty when `end < start`.
pub fn char_range(start: char, end: char) -> Vec<char> {
    int_range(start as i64, end as i64)
        .into_iter()
        .filter_map(|code| char::from_u32(code as u32))
        .collect()
}
