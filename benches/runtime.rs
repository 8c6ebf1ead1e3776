use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::rc::Rc;

use tui_rooms::core::{Backend, BoxFuture, InputSource, Room, Runtime};
use tui_rooms::types::{Buttons, Frame, Text, GRID_HEIGHT, GRID_WIDTH};

struct NullBackend;

impl Backend for NullBackend {
    fn dims(&self) -> (u16, u16) {
        (GRID_WIDTH, GRID_HEIGHT)
    }

    fn render<'a>(&'a mut self, frame: &'a Frame) -> BoxFuture<'a, anyhow::Result<()>> {
        black_box(frame.get(0, 0));
        Box::pin(async { Ok(()) })
    }
}

struct NoInput;

impl InputSource for NoInput {
    fn button(&self) -> BoxFuture<'_, anyhow::Result<Buttons>> {
        Box::pin(async { Ok(Buttons::empty()) })
    }
}

fn bench_full_grid_render(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let room = Room::new("full-grid", |ctx| async move {
        for y in 0..ctx.height() {
            ctx.locate(0, y);
            ctx.print_part(Text::repeat(3, ctx.width() as usize))?;
        }
        Ok(())
    });
    let mut runtime = Runtime::new(room, Rc::new(NoInput), Box::new(NullBackend));

    c.bench_function("full_grid_render_tick", |b| {
        b.iter(|| {
            runtime.seed();
            rt.block_on(runtime.step()).unwrap();
        })
    });
}

fn bench_idle_loop_tick(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let room = Room::new("idle", |ctx| async move {
        ctx.print("IDLE")?;
        ctx.loop_fn(|_ctx| async { Ok(()) });
        Ok(())
    });
    let mut runtime = Runtime::new(room, Rc::new(NoInput), Box::new(NullBackend));
    runtime.seed();
    rt.block_on(runtime.step()).unwrap();

    // Steady state: each tick drains one non-rendering update and runs
    // the loop once.
    c.bench_function("idle_loop_tick", |b| {
        b.iter(|| {
            rt.block_on(runtime.step()).unwrap();
        })
    });
}

fn bench_state_update_tick(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let room = Room::new("counter", |ctx| async move {
        let (n, set_n) = ctx.state("n", 0u64)?;
        ctx.print(format!("{n}"))?;
        ctx.loop_fn(move |_ctx| {
            let set_n = set_n.clone();
            async move {
                set_n.set(n + 1);
                Ok(())
            }
        });
        Ok(())
    });
    let mut runtime = Runtime::new(room, Rc::new(NoInput), Box::new(NullBackend));
    runtime.seed();
    rt.block_on(runtime.step()).unwrap();

    // Each tick applies one queued state change and re-renders.
    c.bench_function("state_update_tick", |b| {
        b.iter(|| {
            rt.block_on(runtime.step()).unwrap();
        })
    });
}

fn bench_stencil_text(c: &mut Criterion) {
    c.bench_function("stencil_letterform_row", |b| {
        b.iter(|| Text::stencil(black_box("  XXX XXX XXX XX  "), 143).unwrap())
    });
}

criterion_group!(
    benches,
    bench_full_grid_render,
    bench_idle_loop_tick,
    bench_state_update_tick,
    bench_stencil_text
);
criterion_main!(benches);
