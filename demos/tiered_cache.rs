//! A two-tier cache built from the crate's composites.
//!
//! This example demonstrates:
//! - a small heap cache in front of a larger "disk" buffer
//! - cache misses promoted into the cache on read
//! - writes staying in the cache until an explicit flush
//! - a resumable flush driven one page at a time
//!
//! Run with: `cargo run --example tiered_cache`
//! Set `RUST_LOG=salt_stores=trace` to see transfer chunks.

use salt_stores::*;

// =============================================================================
// Step 1: A backing store with some existing content
// =============================================================================

/// Pretend disk: a fixed buffer with a recognizable pattern.
fn disk_image(len: usize) -> Vec<u8> {
    (0..len).map(|i| b'a' + (i % 26) as u8).collect()
}

fn main() -> Result<(), StoreError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut disk = disk_image(3 * PAGE_SIZE);
    let mut cache = HeapResource::new(3 * PAGE_SIZE);

    use_resource(&mut cache, |acquired| {
        let mut hot = acquired.store();
        let mut tiers = Fallback::new(&mut hot, MemoryStore::new(&mut disk));

        // =====================================================================
        // Step 2: Reads fill the cache
        // =====================================================================

        let mut warm = vec![0u8; 2 * PAGE_SIZE];
        tiers.read(&mut warm)?;
        println!("read header: {}", String::from_utf8_lossy(&warm[..26]));
        println!(
            "cache watermark after miss: {}",
            tiers.primary().map_or(0, |cache| cache.written())
        );

        // =====================================================================
        // Step 3: Writes stay in the cache
        // =====================================================================

        tiers.write_at(0, b"UPDATED")?;
        let mut on_disk = [0u8; 7];
        if let Some(disk) = tiers.secondary() {
            disk.read(&mut on_disk)?;
        }
        println!("disk before flush: {}", String::from_utf8_lossy(&on_disk));

        // =====================================================================
        // Step 4: Flush page by page
        // =====================================================================

        let dirty = tiers.primary().map_or(0, |cache| cache.written());
        let mut progress = Progress::new(dirty);
        while !progress.is_complete() {
            let before = progress.completed();
            let completed = tiers.flush_step(&mut progress)?;
            if completed == before {
                break;
            }
            println!("flushed {completed} of {} bytes", progress.total());
        }

        if let Some(disk) = tiers.secondary() {
            disk.read(&mut on_disk)?;
        }
        println!("disk after flush:  {}", String::from_utf8_lossy(&on_disk));
        Ok(())
    })
}
