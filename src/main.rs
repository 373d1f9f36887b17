use log::{error, info, warn};
use ringq::config::RingConfig;
use ringq::mmap::MmapRegion;
use ringq::ring::{RingBuffer, RingError};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

const BURST: u64 = 48;
const DRAIN_PER_TICK: usize = 32;

#[derive(Default)]
struct Stats {
    produced: u64,
    consumed: u64,
    dropped: u64,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = RingConfig::from_env()?;
    info!(
        "ringq v0.1.0: capacity={} element_size={} backing={}",
        config.capacity,
        config.element_size,
        config
            .mmap_path
            .as_ref()
            .map_or("heap".to_string(), |p| p.display().to_string())
    );

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| format!("Failed to set Ctrl+C handler: {}", e))?;

    match &config.mmap_path {
        Some(path) => {
            let mut region = MmapRegion::create(path, config.capacity, config.element_size)?;
            let mut ring = region.ring()?;
            serve(&mut ring, &running);
            drop(ring);
            region.flush()?;
        }
        None => {
            let mut ring = config.build_owned()?;
            serve(&mut ring, &running);
            ring.destroy();
        }
    }

    info!("Shut down");
    Ok(())
}

/// Bursty producer, steady consumer. Stops when `running` goes false.
fn serve(ring: &mut RingBuffer<'_>, running: &AtomicBool) {
    let mut stats = Stats::default();
    let mut record = vec![0u8; ring.element_size()];
    let mut out = vec![0u8; ring.element_size()];
    let mut last_report = Instant::now();
    let mut tick = 0u64;

    info!("Service running. Press Ctrl+C to stop");

    while running.load(Ordering::SeqCst) {
        if tick % 4 == 0 {
            for _ in 0..BURST {
                encode(stats.produced, &mut record);
                match ring.enqueue(&record) {
                    Ok(()) => stats.produced += 1,
                    Err(RingError::QueueFull { .. }) => {
                        stats.dropped += 1;
                        break;
                    }
                    Err(e) => {
                        warn!("enqueue failed: {}", e);
                        break;
                    }
                }
            }
        }

        for _ in 0..DRAIN_PER_TICK {
            if ring.dequeue(&mut out).is_err() {
                break;
            }
            stats.consumed += 1;
        }

        if last_report.elapsed() >= Duration::from_secs(5) {
            info!(
                "[STATUS] produced={} consumed={} dropped_bursts={} ring_used={} ring_available={}",
                stats.produced,
                stats.consumed,
                stats.dropped,
                ring.size(),
                ring.available()
            );
            last_report = Instant::now();
        }

        tick += 1;
        std::thread::sleep(Duration::from_millis(10));
    }

    info!(
        "Total records produced={} consumed={} left_in_ring={}",
        stats.produced,
        stats.consumed,
        ring.size()
    );
}

/// Little-endian sequence number, truncated or zero-padded to the slot width.
fn encode(seq: u64, record: &mut [u8]) {
    let bytes = seq.to_le_bytes();
    let n = bytes.len().min(record.len());
    record[..n].copy_from_slice(&bytes[..n]);
    record[n..].fill(0);
}
