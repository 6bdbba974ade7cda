//! Bounded-retry reachability check over a randomized endpoint pool

use std::future::Future;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::Endpoint;

/// Draw a uniformly random endpoint, rejecting only the immediately previous
/// draw. A single-member pool always yields its only endpoint; revisiting an
/// endpoint after one intervening different draw is intentional.
fn draw<R: Rng>(pool: &[Endpoint], previous: Option<Endpoint>, rng: &mut R) -> Option<Endpoint> {
    let mut pick = pool.choose(rng).copied()?;
    while pool.len() > 1 && previous == Some(pick) {
        pick = pool.choose(rng).copied()?;
    }
    Some(pick)
}

/// Decide overall connectivity: probe up to `max_retries` randomly chosen
/// endpoints, returning true as soon as any probe succeeds and false once
/// every attempt has failed.
///
/// The probe is injected so the check can be exercised with substitute pools
/// and scripted outcomes.
pub async fn is_internet_up<R, F, Fut>(
    pool: &[Endpoint],
    max_retries: u32,
    rng: &mut R,
    mut probe: F,
) -> bool
where
    R: Rng,
    F: FnMut(Endpoint) -> Fut,
    Fut: Future<Output = bool>,
{
    let mut previous: Option<Endpoint> = None;
    let mut tries = 0;

    while tries < max_retries {
        let Some(server) = draw(pool, previous, rng) else {
            return false;
        };

        if probe(server).await {
            return true;
        }

        tracing::warn!("Connection didn't work for host {}", server.host);
        previous = Some(server);
        tries += 1;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;

    const POOL_OF_ONE: &[Endpoint] = &[Endpoint::new("192.0.2.1", 53)];
    const POOL_OF_THREE: &[Endpoint] = &[
        Endpoint::new("192.0.2.1", 53),
        Endpoint::new("192.0.2.2", 53),
        Endpoint::new("192.0.2.3", 53),
    ];

    #[tokio::test]
    async fn exhausts_retries_on_single_failing_endpoint() {
        let mut rng = StdRng::seed_from_u64(1);
        let calls = RefCell::new(Vec::new());

        let up = is_internet_up(POOL_OF_ONE, 2, &mut rng, |ep| {
            calls.borrow_mut().push(ep);
            async { false }
        })
        .await;

        assert!(!up);
        // Exactly two probes, both against the pool's only endpoint.
        assert_eq!(*calls.borrow(), vec![POOL_OF_ONE[0], POOL_OF_ONE[0]]);
    }

    #[tokio::test]
    async fn returns_true_without_consuming_remaining_attempts() {
        let mut rng = StdRng::seed_from_u64(2);
        let calls = RefCell::new(Vec::new());

        let up = is_internet_up(POOL_OF_THREE, 2, &mut rng, |ep| {
            calls.borrow_mut().push(ep);
            async { true }
        })
        .await;

        assert!(up);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn succeeds_on_second_attempt_after_one_failure() {
        let mut rng = StdRng::seed_from_u64(3);
        let calls = RefCell::new(Vec::new());
        let mut outcomes = [false, true].into_iter();

        let up = is_internet_up(POOL_OF_THREE, 2, &mut rng, |ep| {
            calls.borrow_mut().push(ep);
            let outcome = outcomes.next().unwrap_or(false);
            async move { outcome }
        })
        .await;

        assert!(up);
        assert_eq!(calls.borrow().len(), 2);
    }

    #[tokio::test]
    async fn never_probes_same_endpoint_twice_in_a_row() {
        let mut rng = StdRng::seed_from_u64(4);
        let calls = RefCell::new(Vec::new());

        let up = is_internet_up(POOL_OF_THREE, 200, &mut rng, |ep| {
            calls.borrow_mut().push(ep);
            async { false }
        })
        .await;

        assert!(!up);
        let calls = calls.borrow();
        assert_eq!(calls.len(), 200);
        for pair in calls.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[tokio::test]
    async fn empty_pool_is_down_without_probing() {
        let mut rng = StdRng::seed_from_u64(5);
        let calls = RefCell::new(Vec::new());

        let up = is_internet_up(&[], 2, &mut rng, |ep| {
            calls.borrow_mut().push(ep);
            async { true }
        })
        .await;

        assert!(!up);
        assert!(calls.borrow().is_empty());
    }
}
