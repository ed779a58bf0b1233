//! Built-in demo programs traced by the `recex` binary.
//!
//! Each demo is plain Rust recursion that reports itself through
//! [`Instrument`]. They stand in for user-supplied instrumented code.

use recex_core::vars;
use recex_trace::Instrument;
use serde_json::json;

/// A named demo with a default input.
pub struct Demo {
    pub name: &'static str,
    pub description: &'static str,
    pub default_input: u32,
    /// Largest input the demo accepts; keeps traces printable.
    pub max_input: u32,
    pub run: fn(&mut dyn Instrument, u32),
}

pub const DEMOS: &[Demo] = &[
    Demo {
        name: "fibonacci",
        description: "naive recursive Fibonacci",
        default_input: 5,
        max_input: 20,
        run: |api, n| {
            fibonacci(api, u64::from(n));
        },
    },
    Demo {
        name: "factorial",
        description: "recursive factorial",
        default_input: 5,
        max_input: 20,
        run: |api, n| {
            factorial(api, u64::from(n));
        },
    },
    Demo {
        name: "subsets",
        description: "all subsets of 1..=n by backtracking",
        default_input: 3,
        max_input: 10,
        run: |api, n| {
            subsets(api, n);
        },
    },
    Demo {
        name: "n-queens",
        description: "n queens by backtracking, pruning branches with no solution",
        default_input: 4,
        max_input: 8,
        run: |api, n| {
            n_queens(api, n as usize);
        },
    },
    Demo {
        name: "fibonacci-memo",
        description: "memoized Fibonacci, publishing the memo table",
        default_input: 10,
        max_input: 60,
        run: |api, n| {
            fibonacci_memo(api, u64::from(n));
        },
    },
];

pub fn find(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|d| d.name == name)
}

pub fn fibonacci(api: &mut dyn Instrument, n: u64) -> u64 {
    api.enter("fibonacci", vars! { "n" => n });
    if n <= 1 {
        api.exit(json!(n));
        return n;
    }
    let result = fibonacci(api, n - 1) + fibonacci(api, n - 2);
    api.exit(json!(result));
    result
}

pub fn factorial(api: &mut dyn Instrument, n: u64) -> u64 {
    api.enter("factorial", vars! { "n" => n });
    if n <= 1 {
        api.exit(json!(1));
        return 1;
    }
    let result = n * factorial(api, n - 1);
    api.exit(json!(result));
    result
}

pub fn subsets(api: &mut dyn Instrument, n: u32) -> Vec<Vec<u32>> {
    fn backtrack(
        api: &mut dyn Instrument,
        nums: &[u32],
        current: &mut Vec<u32>,
        start: usize,
        out: &mut Vec<Vec<u32>>,
    ) {
        api.enter(
            "backtrack",
            vars! { "current" => current.clone(), "start" => start },
        );
        out.push(current.clone());
        api.set(vars! { "found" => out.len() });

        for (i, &num) in nums.iter().enumerate().skip(start) {
            current.push(num);
            backtrack(api, nums, current, i + 1, out);
            current.pop();
        }
        api.exit_null();
    }

    let nums: Vec<u32> = (1..=n).collect();
    let mut out = Vec::new();
    backtrack(api, &nums, &mut Vec::new(), 0, &mut out);
    out
}

pub fn n_queens(api: &mut dyn Instrument, n: usize) -> Vec<Vec<String>> {
    fn is_safe(queens: &[usize], row: usize) -> bool {
        let col = queens.len();
        queens
            .iter()
            .enumerate()
            .all(|(c, &r)| r != row && r.abs_diff(row) != col - c)
    }

    fn solve(
        api: &mut dyn Instrument,
        n: usize,
        queens: &mut Vec<usize>,
        out: &mut Vec<Vec<String>>,
    ) {
        let col = queens.len();
        api.enter("solve", vars! { "col" => col, "queens" => queens.clone() });

        if col == n {
            let board = (0..n)
                .map(|row| {
                    (0..n)
                        .map(|c| if queens[c] == row { 'Q' } else { '.' })
                        .collect()
                })
                .collect();
            out.push(board);
            api.exit(json!(true));
            return;
        }

        let solutions_before = out.len();
        for row in 0..n {
            if !is_safe(queens, row) {
                continue;
            }
            queens.push(row);
            solve(api, n, queens, out);
            queens.pop();
        }

        let solved = out.len() > solutions_before;
        if !solved {
            // Nothing below this column worked: cut the whole branch.
            api.prune();
        }
        api.exit(json!(solved));
    }

    let mut out = Vec::new();
    solve(api, n, &mut Vec::with_capacity(n), &mut out);
    out
}

pub fn fibonacci_memo(api: &mut dyn Instrument, n: u64) -> u64 {
    fn go(api: &mut dyn Instrument, n: u64, memo: &mut [Option<u64>]) -> u64 {
        let known: Vec<usize> = memo
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|_| i))
            .collect();
        api.enter("fibonacciDP", vars! { "n" => n, "memo" => known });

        if let Some(value) = memo[n as usize] {
            api.exit(json!(value));
            return value;
        }

        let value = if n <= 1 {
            n
        } else {
            go(api, n - 1, memo) + go(api, n - 2, memo)
        };
        memo[n as usize] = Some(value);
        api.set(vars! { "memo" => memo_table(memo) });
        api.exit(json!(value));
        value
    }

    fn memo_table(memo: &[Option<u64>]) -> serde_json::Value {
        memo.iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i.to_string(), json!(v))))
            .collect::<serde_json::Map<_, _>>()
            .into()
    }

    let mut memo = vec![None; n as usize + 1];
    go(api, n, &mut memo)
}
