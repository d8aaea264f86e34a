//! Acquiring and releasing composite resources.
//!
//! This example demonstrates:
//! - `use_resource` releasing on every path
//! - `First` falling back past a resource that cannot be acquired
//! - mirrored writes through a `PairListResource`
//! - `Lazy` deferring acquisition until first use
//! - `LoggerResource` turning outcomes into labelled log lines
//!
//! Run with: `cargo run --example guarded_resources`

use salt_stores::*;

fn main() -> Result<(), StoreError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // =========================================================================
    // First: an impossible allocation, then a sensible one
    // =========================================================================

    let mut first = First::new(vec![HeapResource::new(usize::MAX), HeapResource::new(64)]);
    use_resource(&mut first, |acquired| {
        acquired.write(b"fits")?;
        Ok(())
    })?;
    println!("first chose candidate {:?}", first.chosen());

    // =========================================================================
    // Mirrors: every write lands in all members
    // =========================================================================

    let mut mirrors = PairListResource::new(vec![
        HeapResource::new(16),
        HeapResource::new(16),
        HeapResource::new(16),
    ])?;
    let written = use_resource(&mut mirrors, |acquired| acquired.write(b"replicated"))?;
    println!("mirrored {written} bytes to {} members", mirrors.len());

    // =========================================================================
    // Lazy + logging
    // =========================================================================

    let messages = LogMessages::new()
        .on(Operation::Init, Outcome::Success, "acquired")
        .on(Operation::Write, Outcome::Success, "stored")
        .on(Operation::Write, Outcome::Partial, "truncated");
    let mut log = Pipe::new();

    {
        let mut logged = LoggerResource::new(Lazy::new(HeapResource::new(8)), &mut log, &messages);
        use_resource(&mut logged, |acquired| {
            acquired.write(b"short")?;
            acquired.write(b"much too long")?;
            Ok(())
        })?;
    }

    print!("{}", String::from_utf8_lossy(&log.take()));
    Ok(())
}
