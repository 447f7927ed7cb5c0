//! Bounded retry for fallible async operations.

/// Runs `op` up to `max_attempts` times, returning the first success or the
/// last error. The 1-based attempt number is passed to `op` so it can vary
/// its input (e.g. rebuild a prompt) and label its logging.
///
/// A `max_attempts` of zero behaves as one attempt.
///
/// # Errors
///
/// Returns the error of the final attempt once all attempts are exhausted.
pub async fn attempt<T, E, F>(max_attempts: usize, mut op: F) -> Result<T, E>
where
    F: AsyncFnMut(usize) -> Result<T, E>,
{
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= max_attempts => return Err(err),
            Err(_) => attempt += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_first_success() {
        let result: Result<usize, ()> = attempt(3, async |n| Ok(n)).await;
        assert_eq!(result, Ok(1));
    }

    #[tokio::test]
    async fn retries_until_success() {
        let mut calls = 0;
        let result: Result<usize, &str> = attempt(3, async |n| {
            calls += 1;
            if n < 3 { Err("not yet") } else { Ok(n) }
        })
        .await;
        assert_eq!(result, Ok(3));
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn surfaces_last_error_when_exhausted() {
        let mut calls = 0;
        let result: Result<(), String> = attempt(2, async |n| {
            calls += 1;
            Err(format!("attempt {n}"))
        })
        .await;
        assert_eq!(result, Err("attempt 2".to_owned()));
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn zero_attempts_behaves_as_one() {
        let result: Result<(), &str> = attempt(0, async |_| Err("once")).await;
        assert_eq!(result, Err("once"));
    }
}
