//! Order-preserving parallel map for the fetch and extract stages.

/// Apply `f` to every item using up to `threads` worker threads.
///
/// Output order matches input order regardless of thread count. The first
/// error encountered (in input order) wins; later results are discarded.
pub fn map_ordered<T, U, E, F>(items: Vec<T>, threads: usize, f: F) -> Result<Vec<U>, E>
where
    T: Send,
    U: Send,
    E: Send,
    F: Fn(T) -> Result<U, E> + Sync,
{
    if threads <= 1 || items.len() <= 1 {
        return items.into_iter().map(f).collect();
    }

    let chunks = split_chunks(items, threads);
    let f = &f;
    let results: Vec<Result<Vec<U>, E>> = std::thread::scope(|scope| {
        let handles: Vec<_> = chunks
            .into_iter()
            .map(|chunk| scope.spawn(move || chunk.into_iter().map(f).collect()))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect()
    });

    let mut out = Vec::new();
    for result in results {
        out.extend(result?);
    }
    Ok(out)
}

/// Split into at most `parts` contiguous chunks of near-equal size.
fn split_chunks<T>(mut items: Vec<T>, parts: usize) -> Vec<Vec<T>> {
    let len = items.len();
    let parts = parts.min(len).max(1);
    let base = len / parts;
    let remainder = len % parts;

    let mut chunks = Vec::with_capacity(parts);
    // The first `remainder` chunks carry one extra item.
    for i in (0..parts).rev() {
        let size = base + usize::from(i < remainder);
        chunks.push(items.split_off(items.len() - size));
    }
    chunks.reverse();
    chunks
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_map_ordered_matches_sequential(
            items in proptest::collection::vec(0u32..1000, 0..64),
            threads in 1usize..8
        ) {
            let sequential: Vec<u32> = items.iter().map(|x| x + 1).collect();
            let parallel: Vec<u32> =
                map_ordered(items, threads, |x| Ok::<_, ()>(x + 1)).unwrap();
            prop_assert_eq!(parallel, sequential);
        }
    }
}
