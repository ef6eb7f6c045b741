//! Sleep and wall-clock helpers that work on both wasm and native targets.

use time::OffsetDateTime;

/// Suspend the current task for `ms` milliseconds.
pub async fn sleep_ms(ms: u64) {
    #[cfg(target_arch = "wasm32")]
    {
        let ms = u32::try_from(ms).unwrap_or(u32::MAX);
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
    }
}

/// Measures how long the analysis request takes.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: OffsetDateTime,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started: OffsetDateTime::now_utc(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        let millis = (OffsetDateTime::now_utc() - self.started).whole_milliseconds();
        u64::try_from(millis).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopwatch_never_goes_negative() {
        let watch = Stopwatch::start();
        assert!(watch.elapsed_ms() < 60_000);
    }
}
