use std::time::Duration;

use actix::{Actor, ActorContext, ActorFutureExt, AsyncContext, Context, ContextFutureSpawner, Handler, Message,
            Recipient, WrapFuture};
use futures::future::LocalBoxFuture;

use tuneforge_api::ApiError;

// the interval the original views refresh at
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

pub type FetchFn<T> = Box<dyn Fn() -> LocalBoxFuture<'static, Result<T, ApiError>>>;

// One fetch result, delivered to the subscribing view in arrival order.
pub struct PollResult<T>(pub Result<T, ApiError>);

impl<T: 'static> Message for PollResult<T> {
    type Result = ();
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct StopPolling;

// Polls a resource at a fixed rate until explicitly stopped. The timer runs
// from tick scheduling, never from fetch completion: a slow or hung fetch
// does not delay the next tick. There is deliberately no backoff and no
// terminal-state short-circuit; the owning view decides when to stop.
pub struct Poller<T>
    where T: Send + 'static
{
    fetch:      FetchFn<T>,
    interval:   Duration,
    subscriber: Recipient<PollResult<T>>,
}

impl<T> Poller<T> where T: Send + 'static
{
    pub fn start_polling(fetch: FetchFn<T>,
                         interval: Duration,
                         subscriber: Recipient<PollResult<T>>)
                         -> PollSubscription {
        let addr = Poller { fetch,
                            interval,
                            subscriber }.start();

        PollSubscription { stop: addr.recipient() }
    }

    fn tick(&mut self, ctx: &mut Context<Self>) {
        (self.fetch)().into_actor(self)
                      .map(|result, actor, _ctx| {
                          actor.subscriber.do_send(PollResult(result));
                      })
                      .spawn(ctx);
    }
}

impl<T> Actor for Poller<T> where T: Send + 'static
{
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.tick(ctx);
        ctx.run_interval(self.interval, Self::tick);
    }
}

impl<T> Handler<StopPolling> for Poller<T> where T: Send + 'static
{
    type Result = ();

    fn handle(&mut self, _msg: StopPolling, ctx: &mut Self::Context) -> Self::Result {
        // stopping the context drops the interval timer and every in-flight
        // fetch future, so nothing is delivered past this point
        ctx.stop();
    }
}

// Per-view handle. A view unmount must stop its subscription; dropping the
// handle stops it as a backstop.
pub struct PollSubscription {
    stop: Recipient<StopPolling>,
}

impl PollSubscription {
    // Safe to call at any time, any number of times. Stopping is a mailbox
    // message: a result already queued ahead of it may still reach the
    // subscriber after this returns; once the stop is processed nothing
    // further is delivered. Views that must not render after teardown stop
    // themselves in the same handler turn.
    pub fn stop(&self) {
        self.stop.do_send(StopPolling);
    }
}

impl Drop for PollSubscription {
    fn drop(&mut self) {
        self.stop();
    }
}
