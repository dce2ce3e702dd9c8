//! Simple Sieve of Eratosthenes and integer square root.

use crate::Number;

/// Floor of the square root of `n`; 0 for `n <= 0`.
///
/// Starts from the truncated `f64` square root and then corrects it, since
/// `f64` cannot represent every `i64` and the estimate may be one off near
/// large perfect squares.
#[must_use]
pub fn isqrt(n: Number) -> Number {
    if n <= 0 {
        return 0;
    }

    let mut root = (n as f64).sqrt() as Number;
    while root > 0 && root.checked_mul(root).map_or(true, |sq| sq > n) {
        root -= 1;
    }
    while (root + 1)
        .checked_mul(root + 1)
        .is_some_and(|sq| sq <= n)
    {
        root += 1;
    }
    root
}

/// Returns every prime in `[2, limit]` in ascending order.
///
/// Used for the base primes up to `isqrt(N)`. Memory is one byte per
/// candidate, so this is not meant for the full range.
#[must_use]
pub fn simple_sieve(limit: Number) -> Vec<Number> {
    if limit < 2 {
        return Vec::new();
    }

    let size = limit as usize + 1;
    let mut is_prime = vec![true; size];
    is_prime[0] = false;
    is_prime[1] = false;

    let mut p = 2usize;
    while p * p < size {
        if is_prime[p] {
            for composite in (p * p..size).step_by(p) {
                is_prime[composite] = false;
            }
        }
        p += 1;
    }

    is_prime
        .iter()
        .enumerate()
        .filter_map(|(n, &prime)| prime.then_some(n as Number))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn is_prime_by_division(n: Number) -> bool {
        if n < 2 {
            return false;
        }
        let mut d = 2;
        while d * d <= n {
            if n % d == 0 {
                return false;
            }
            d += 1;
        }
        true
    }

    #[test]
    fn below_two_is_empty() {
        assert!(simple_sieve(-10).is_empty());
        assert!(simple_sieve(0).is_empty());
        assert!(simple_sieve(1).is_empty());
    }

    #[test]
    fn small_limits() {
        assert_eq!(simple_sieve(2), vec![2]);
        assert_eq!(simple_sieve(3), vec![2, 3]);
        assert_eq!(simple_sieve(4), vec![2, 3]);
        assert_eq!(simple_sieve(9), vec![2, 3, 5, 7]);
        assert_eq!(simple_sieve(25), vec![2, 3, 5, 7, 11, 13, 17, 19, 23]);
    }

    #[test]
    fn matches_trial_division() {
        let expected: Vec<Number> = (0..=5000).filter(|&n| is_prime_by_division(n)).collect();
        assert_eq!(simple_sieve(5000), expected);
    }

    #[test]
    fn prime_counts() {
        assert_eq!(simple_sieve(100).len(), 25);
        assert_eq!(simple_sieve(1000).len(), 168);
        assert_eq!(simple_sieve(100_000).len(), 9592);
    }

    #[test]
    fn isqrt_small_values() {
        let cases = [
            (-1, 0),
            (0, 0),
            (1, 1),
            (2, 1),
            (3, 1),
            (4, 2),
            (8, 2),
            (9, 3),
            (24, 4),
            (25, 5),
            (26, 5),
        ];
        for (n, root) in cases {
            assert_eq!(isqrt(n), root, "isqrt({n})");
        }
    }

    #[test]
    fn isqrt_near_large_perfect_squares() {
        for root in [
            (1 << 26) + 1,
            94_906_265,
            (1 << 31) - 1,
            3_037_000_499,
        ] {
            let square: Number = root * root;
            assert_eq!(isqrt(square), root);
            assert_eq!(isqrt(square - 1), root - 1);
            if let Some(next) = square.checked_add(1) {
                assert_eq!(isqrt(next), root);
            }
        }
    }

    #[test]
    fn isqrt_of_max() {
        assert_eq!(isqrt(Number::MAX), 3_037_000_499);
    }

    proptest! {
        #[test]
        fn isqrt_brackets_value(n in 0i64..=Number::MAX) {
            let r = isqrt(n);
            prop_assert!(r * r <= n);
            prop_assert!((r + 1).checked_mul(r + 1).map_or(true, |sq| sq > n));
        }

        #[test]
        fn sieve_output_is_prime_and_ascending(limit in 0i64..3000) {
            let primes = simple_sieve(limit);
            prop_assert!(primes.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(primes.iter().all(|&p| p <= limit && is_prime_by_division(p)));
            let count = (0..=limit).filter(|&n| is_prime_by_division(n)).count();
            prop_assert_eq!(primes.len(), count);
        }
    }
}
