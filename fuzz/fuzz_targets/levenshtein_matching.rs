// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bounded edit distance against a plain full-matrix oracle.

#![no_main]

use ayat_search::fuzzy::bounded_distance;
use libfuzzer_sys::fuzz_target;

fn full_distance(a: &[char], b: &[char]) -> usize {
    let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        dp[0][j] = j;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            dp[i][j] = (dp[i - 1][j] + 1).min(dp[i][j - 1] + 1).min(dp[i - 1][j - 1] + cost);
        }
    }
    dp[a.len()][b.len()]
}

fuzz_target!(|input: (&str, &str, u8)| {
    let (a, b, max) = input;
    let a: Vec<char> = a.chars().take(32).collect();
    let b: Vec<char> = b.chars().take(32).collect();
    let max = usize::from(max % 6);

    let expected = full_distance(&a, &b);
    let a: String = a.into_iter().collect();
    let b: String = b.into_iter().collect();

    let got = bounded_distance(&a, &b, max);
    assert_eq!(got, (expected <= max).then_some(expected));
});
