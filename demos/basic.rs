// Example: variable-size rows, scrolling forward and back, and slot reuse.
use slot_virtualizer::{Engine, EngineOptions, RenderedItem};

fn main() -> Result<(), slot_virtualizer::Error> {
    // Every fifth row is a tall section header.
    let mut engine = Engine::new(
        EngineOptions::new(10_000, 600, |i| if i % 5 == 0 { 120 } else { 40 }).with_overscan(3),
    )?;
    print(&engine, "initial");

    engine.apply_scroll(250)?;
    print(&engine, "scrolled to 250");

    engine.apply_scroll(180)?;
    print(&engine, "scrolled back to 180");

    // A far jump shares no index with the previous window; slots are numbered afresh.
    engine.apply_scroll(250_000)?;
    print(&engine, "jumped to 250000");

    println!("estimated_total_extent={}", engine.estimated_total_extent());
    println!("placement(12)={:?}", engine.placement(12)?);
    Ok(())
}

fn print(engine: &Engine, label: &str) {
    println!(
        "{label}: offset={} direction={:?} window={:?}",
        engine.scroll_offset(),
        engine.scroll_direction(),
        engine.render_window()
    );
    engine.render(&mut |it: RenderedItem| {
        println!("  slot {:>2} <- index {:>5} at {:>7} ({}px)", it.slot, it.index, it.offset, it.size);
    });
}
