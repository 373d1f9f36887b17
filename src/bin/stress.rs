use bytemuck::Pod;
use log::{error, info};
use ringq::ring::{ByteQueue, TypedRing};
use std::fmt::Debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

const RUN_FOR: Duration = Duration::from_secs(5);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("ringq stress test");

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| format!("Failed to set Ctrl+C handler: {}", e))?;

    let mut storage = [0u8; 256];
    let mut bytes = ByteQueue::with_storage(&mut storage)?;
    let (ops, elapsed) = churn(&running, &mut bytes, |seq| seq as u8)?;
    report("byte queue (borrowed, 256 slots)", ops, elapsed);

    let mut words = TypedRing::<u64>::owned(64 * 1024)?;
    let (ops, elapsed) = churn(&running, &mut words, |seq| seq)?;
    report("u64 ring (owned, 65536 slots)", ops, elapsed);
    words.destroy();

    Ok(())
}

/// Alternates bursts of pushes and pops of varying length and checks that
/// values come out in push order with `size()` matching the in-flight count.
fn churn<T>(
    running: &AtomicBool,
    ring: &mut TypedRing<'_, T>,
    encode: fn(u64) -> T,
) -> Result<(u64, Duration), String>
where
    T: Pod + PartialEq + Debug,
{
    let start = Instant::now();
    let mut next_push = 0u64;
    let mut next_pop = 0u64;
    let mut ops = 0u64;
    let mut round = 0u64;

    while running.load(Ordering::Relaxed) && start.elapsed() < RUN_FOR {
        let pushes = 1 + (round * 7) % 301;
        for _ in 0..pushes {
            if ring.enqueue(encode(next_push)).is_err() {
                break;
            }
            next_push += 1;
            ops += 1;
        }

        let pops = 1 + (round * 13) % 293;
        for _ in 0..pops {
            let Ok(value) = ring.dequeue() else {
                break;
            };
            let expected = encode(next_pop);
            if value != expected {
                return Err(format!(
                    "out of order at #{}: got {:?}, expected {:?}",
                    next_pop, value, expected
                ));
            }
            next_pop += 1;
            ops += 1;
        }

        let in_flight = next_push - next_pop;
        if ring.size() as u64 != in_flight || ring.size() > ring.capacity() {
            return Err(format!(
                "size {} does not match {} in flight",
                ring.size(),
                in_flight
            ));
        }
        round += 1;
    }

    Ok((ops, start.elapsed()))
}

fn report(name: &str, ops: u64, elapsed: Duration) {
    let secs = elapsed.as_secs_f64().max(f64::EPSILON);
    info!(
        "{}: {} ops in {:.2}s ({:.2} Mops/s)",
        name,
        ops,
        secs,
        ops as f64 / secs / 1_000_000.0
    );
}
