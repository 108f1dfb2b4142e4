use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix::{Actor, Context, Handler};
use futures::future;

use tuneforge_api::{ApiError, SongStatus};
use tuneforge_client::poller::{FetchFn, PollResult, Poller};

struct Recorder {
    seen: Arc<Mutex<Vec<Result<SongStatus, String>>>>,
}

impl Actor for Recorder {
    type Context = Context<Self>;
}

impl Handler<PollResult<SongStatus>> for Recorder {
    type Result = ();

    fn handle(&mut self, msg: PollResult<SongStatus>, _ctx: &mut Self::Context) -> Self::Result {
        self.seen
            .lock()
            .unwrap()
            .push(msg.0.map_err(|error| error.to_string()));
    }
}

fn recorder() -> (actix::Addr<Recorder>, Arc<Mutex<Vec<Result<SongStatus, String>>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let addr = Recorder { seen: seen.clone() }.start();

    (addr, seen)
}

#[actix::test]
async fn stop_before_first_response_delivers_nothing() {
    let (addr, seen) = recorder();

    let fetch: FetchFn<SongStatus> = Box::new(|| {
        Box::pin(async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(SongStatus::Pending)
        })
    });

    let subscription = Poller::start_polling(fetch, Duration::from_millis(50), addr.recipient());
    subscription.stop();
    // stop is idempotent
    subscription.stop();

    tokio::time::sleep(Duration::from_millis(400)).await;

    assert!(seen.lock().unwrap().is_empty());
}

#[actix::test]
async fn tick_rate_is_independent_of_fetch_latency() {
    let (addr, seen) = recorder();

    let calls = Arc::new(AtomicUsize::new(0));
    let fetch_calls = calls.clone();

    // a fetch that hangs forever must not delay subsequent ticks
    let fetch: FetchFn<SongStatus> = Box::new(move || {
        fetch_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(future::pending())
    });

    let subscription = Poller::start_polling(fetch, Duration::from_millis(50), addr.recipient());

    tokio::time::sleep(Duration::from_millis(260)).await;
    subscription.stop();

    // immediate fetch plus one per elapsed interval, with timer slack
    let calls = calls.load(Ordering::SeqCst);
    assert!((4..=7).contains(&calls), "expected ~6 fetch calls, got {calls}");

    assert!(seen.lock().unwrap().is_empty());
}

#[actix::test]
async fn results_arrive_in_order_and_polling_survives_terminal_status() {
    let (addr, seen) = recorder();

    let script = Arc::new(Mutex::new(vec![SongStatus::Pending, SongStatus::Pending]));
    let fetch: FetchFn<SongStatus> = Box::new(move || {
        let script = script.clone();
        Box::pin(async move {
            let mut script = script.lock().unwrap();
            Ok(if script.is_empty() {
                SongStatus::Completed
            } else {
                script.remove(0)
            })
        })
    });

    let subscription = Poller::start_polling(fetch, Duration::from_millis(40), addr.recipient());

    tokio::time::sleep(Duration::from_millis(230)).await;
    subscription.stop();
    tokio::time::sleep(Duration::from_millis(20)).await;

    let after_stop = {
        let seen = seen.lock().unwrap();

        assert!(seen.len() >= 4, "polling should have continued past the terminal status");
        assert_eq!(seen[0], Ok(SongStatus::Pending));
        assert_eq!(seen[1], Ok(SongStatus::Pending));
        assert_eq!(seen[2], Ok(SongStatus::Completed));
        assert!(seen[2..].iter().all(|status| status == &Ok(SongStatus::Completed)));

        seen.len()
    };

    // nothing is delivered once the subscription is stopped
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(seen.lock().unwrap().len(), after_stop);
}

#[actix::test]
async fn fetch_errors_are_reported_and_polling_continues() {
    let (addr, seen) = recorder();

    let first = Arc::new(AtomicUsize::new(0));
    let fetch: FetchFn<SongStatus> = Box::new(move || {
        let attempt = first.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            if attempt == 0 {
                Err(ApiError::Network("connection refused".to_owned()))
            } else {
                Ok(SongStatus::Processing)
            }
        })
    });

    let subscription = Poller::start_polling(fetch, Duration::from_millis(40), addr.recipient());

    tokio::time::sleep(Duration::from_millis(150)).await;
    subscription.stop();

    let seen = seen.lock().unwrap();

    assert!(seen.len() >= 2, "a failed tick must not stop the poller");
    assert!(seen[0].is_err());
    assert!(seen[1..].iter().all(|status| status == &Ok(SongStatus::Processing)));
}

#[actix::test]
async fn dropping_the_subscription_stops_polling() {
    let (addr, seen) = recorder();

    let fetch: FetchFn<SongStatus> = Box::new(|| Box::pin(async { Ok(SongStatus::Pending) }));

    let subscription = Poller::start_polling(fetch, Duration::from_millis(40), addr.recipient());

    tokio::time::sleep(Duration::from_millis(100)).await;
    drop(subscription);
    tokio::time::sleep(Duration::from_millis(20)).await;

    let delivered = seen.lock().unwrap().len();
    assert!(delivered >= 1);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(seen.lock().unwrap().len(), delivered);
}
