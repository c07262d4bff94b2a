//! # Example: retry_with_backoff
//!
//! Demonstrates how [`CallLoop`] retries a failing sender according to
//! [`RetryConfig`], and how the original error comes back once the schedule
//! is exhausted.
//!
//! The first loop's sender fails twice before succeeding. The second loop's
//! sender never succeeds.
//!
//! ## Flow
//! ```text
//! CallLoop::run(flaky)
//!   ├─► call{calls=0}
//!   ├─► send() → Err("boom #1")
//!   ├─► retry{backoff=100ms, remain=3, current=1}
//!   ├─► sleep(100ms)
//!   ├─► call{calls=0}
//!   ├─► send() → Err("boom #2")
//!   ├─► retry{backoff=200ms, remain=2, current=2}
//!   ├─► sleep(200ms)
//!   ├─► call{calls=0}
//!   ├─► send() → Ok("payload")
//!   ├─► return{calls=1}
//!   └─► receiver → Stop
//!
//! CallLoop::run(broken)
//!   ├─► 1 call + 2 retries, all Err
//!   └─► CallError::Sender("permanently down")
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=pacecall=debug cargo run --example retry_with_backoff
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use pacecall::{CallLoop, Event, EventKind, LogWriter, RetryConfig, Subscribe};
use tracing_subscriber::EnvFilter;

static FAIL_COUNT: AtomicU64 = AtomicU64::new(0);

#[derive(Debug)]
struct Boom(String);

impl std::fmt::Display for Boom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Boom {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Route loop events to stdout (default filter: pacecall=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pacecall=debug")),
        )
        .init();

    // 2. Retry policy: 4 retries, 100ms doubling, with jitter disabled
    let retry = RetryConfig::default()
        .with_retries(4)
        .with_min_timeout(Duration::from_millis(100))
        .with_max_timeout(Duration::from_secs(2));
    println!("[main] backoff schedule: {:?}", pacecall::compute(&retry)?);

    // 3. Flaky sender: fails twice, then succeeds
    let writer: Arc<dyn Subscribe<&'static str, Boom>> = Arc::new(LogWriter::new("flaky"));
    let mut flaky = CallLoop::builder()
        .retry(retry)
        .with_subscriber(writer)
        .receiver(|value: &'static str| async move {
            println!("[main] received {value:?}");
            Ok::<_, Boom>(false)
        })
        .build();

    flaky
        .run(|| async {
            let attempt = FAIL_COUNT.fetch_add(1, Ordering::Relaxed) + 1;
            println!("[flaky] attempt {attempt}");
            if attempt < 3 {
                Err(Boom(format!("boom #{attempt}")))
            } else {
                Ok("payload")
            }
        })
        .await?;
    println!("[main] flaky stats: {:?}", flaky.stats());

    // 4. Broken sender: exhausts its retries and surfaces the original error
    let mut broken = CallLoop::<(), Boom>::builder()
        .retry(retry.with_retries(2))
        .on(EventKind::Retry, |ev| {
            if let Event::Retry(r) = ev {
                println!(
                    "[broken] retry {}/{} in {:?}",
                    r.current_retries,
                    r.current_retries + r.remain_retries as u64,
                    r.backoff_time
                );
            }
        })
        .build();

    let err = broken
        .run(|| async { Err(Boom("permanently down".into())) })
        .await
        .expect_err("sender never succeeds");
    println!("[main] gave up with {}: {}", err.as_label(), err);

    match err.into_sender() {
        Some(original) => println!("[main] original error: {original:?}"),
        None => println!("[main] failure did not come from the sender"),
    }
    Ok(())
}
