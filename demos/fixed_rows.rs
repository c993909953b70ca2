// Example: uniform rows resolved in closed form, with slots from a standalone allocator.
use slot_virtualizer::{FixedSizeWindow, KeyAllocator, ScrollDirection, SlotReset};

fn main() -> Result<(), slot_virtualizer::Error> {
    let fixed = FixedSizeWindow::new(1_000_000, 24, 480, 4)?;
    let mut slots = KeyAllocator::new(SlotReset::Continue);

    println!(
        "visible_count={} total_extent={}",
        fixed.visible_count(),
        fixed.total_extent()
    );

    let mut previous = 0u64;
    for offset in [0u64, 30, 96, 60, 12_000_000] {
        let direction = ScrollDirection::between(previous, offset);
        previous = offset;

        slots.resolve(fixed.resolve(offset, direction));
        let live: Vec<_> = slots.iter().collect();
        println!(
            "offset={offset} {direction:?} window={:?} next_slot={} slots={live:?}",
            slots.window(),
            slots.next_slot_id()
        );
    }
    Ok(())
}
