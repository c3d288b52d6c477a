//! Prime capacity helpers.
//!
//! Every table in this crate keeps a prime number of slots. With a prime
//! capacity the first `(capacity + 1) / 2` quadratic probe positions are all
//! distinct, which is what lets open addressing guarantee a free slot while
//! the load stays below one half.

/// Returns true if `n` is prime.
///
/// Trial division by odd factors up to `sqrt(n)`.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n < 2 || n % 2 == 0 {
        return false;
    }

    let mut factor: usize = 3;
    while factor.saturating_mul(factor) <= n {
        if n % factor == 0 {
            return false;
        }
        factor += 2;
    }

    true
}

/// Returns the first prime reached by stepping through odd numbers from `n`.
///
/// An even `n` is bumped to the next odd number first, so `next_prime(2)` is
/// 3 and `next_prime(23)` is 23.
#[must_use]
pub fn next_prime(n: usize) -> usize {
    let mut candidate = if n % 2 == 0 { n.saturating_add(1) } else { n };
    while !is_prime(candidate) {
        candidate = candidate.saturating_add(2);
    }
    candidate
}

/// `n` itself when it is prime, otherwise [`next_prime`] of it.
///
/// This is the normalization applied to resize targets, where a prime request
/// (including 2) is honoured as given.
#[must_use]
pub fn prime_capacity(n: usize) -> usize {
    if is_prime(n) { n } else { next_prime(n) }
}
