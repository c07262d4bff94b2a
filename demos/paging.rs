//! # Example: paging
//!
//! Walks a paginated source with a [`CallLoop`]. The sender fetches the page
//! after the cursor; the receiver stores the rows and continues while the page
//! is full. One fetch times out once and is retried transparently.
//!
//! ## Flow
//! ```text
//! CallLoop::run(fetch)
//!   ├─► call → fetch(page 0) → return → store 3 rows → Continue
//!   ├─► next{sleep=50ms}, sleep
//!   ├─► call → fetch(page 1) → Err(timeout)
//!   │     └─► retry{backoff=20ms}, sleep
//!   ├─► call → fetch(page 1) → return → store 3 rows → Continue
//!   ├─► next{sleep=50ms}, sleep
//!   ├─► call → fetch(page 2) → return → store 1 row → Stop (short page)
//!   └─► Ok(())
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=pacecall=debug cargo run --example paging
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use pacecall::{CallLoop, Event, EventKind, LogWriter, RetryConfig};
use tracing_subscriber::EnvFilter;

const PAGE_SIZE: usize = 3;
const ROWS: [&str; 7] = ["ada", "brian", "claude", "dennis", "edsger", "grace", "ken"];

#[derive(Debug)]
struct FetchError(&'static str);

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for FetchError {}

/// Simulated remote source; the first request for page 1 times out.
async fn fetch_page(page: usize, flaked: &AtomicBool) -> Result<Vec<String>, FetchError> {
    tokio::time::sleep(Duration::from_millis(5)).await;
    if page == 1 && !flaked.swap(true, Ordering::Relaxed) {
        return Err(FetchError("request timed out"));
    }
    Ok(ROWS
        .iter()
        .skip(page * PAGE_SIZE)
        .take(PAGE_SIZE)
        .map(|s| s.to_string())
        .collect())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pacecall=debug")),
        )
        .init();

    let cursor = AtomicUsize::new(0);
    let flaked = Arc::new(AtomicBool::new(false));
    let mut rows = Vec::new();

    let mut pager = CallLoop::<Vec<String>, FetchError>::builder()
        .retry(
            RetryConfig::default()
                .with_retries(3)
                .with_min_timeout(Duration::from_millis(20)),
        )
        .sleep(Duration::from_millis(50))
        .with_subscriber(Arc::new(LogWriter::new("pages")))
        .on(EventKind::Return, |ev| {
            if let Event::Return(r, page) = ev {
                println!("[pages] page #{} has {} rows", r.calls, page.len());
            }
        })
        .receiver(|page: Vec<String>| {
            let full = page.len() == PAGE_SIZE;
            cursor.fetch_add(1, Ordering::Relaxed);
            rows.extend(page);
            async move { Ok::<_, FetchError>(full) }
        })
        .build();

    pager
        .run(|| {
            let page = cursor.load(Ordering::Relaxed);
            let flaked = Arc::clone(&flaked);
            async move { fetch_page(page, &flaked).await }
        })
        .await?;

    let stats = pager.stats();
    drop(pager);

    println!(
        "[main] {} rows in {} calls ({} retries): {rows:?}",
        rows.len(),
        stats.calls,
        stats.total_retries
    );
    Ok(())
}
