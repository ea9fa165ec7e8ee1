use crate::{FilterOptions, MatchResult};

/**
Apply the same-order policy to matches that are still in index order.

Strict mode keeps only same-order matches. Otherwise, with `same_order_first`,
same-order matches move ahead of the rest; both groups keep their relative
order. With neither option the input is returned unchanged.
*/
pub fn apply_same_order_policy<'a, T>(
    results: Vec<MatchResult<'a, T>>,
    options: &FilterOptions,
) -> Vec<MatchResult<'a, T>> {
    if options.same_order_strict {
        return results.into_iter().filter(|r| r.is_same_order).collect();
    }

    if !options.same_order_first {
        return results;
    }

    let (mut ordered, rest): (Vec<_>, Vec<_>) =
        results.into_iter().partition(|r| r.is_same_order);
    ordered.extend(rest);
    ordered
}

#[cfg(test)]
#[path = "rank_tests.rs"]
mod tests;
