use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use engine_core::{BoardAction, GameState};
use games_tictactoe::TicTacToe;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn bench_actions(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_actions");
    group.bench_function("opening", |b| {
        let state = TicTacToe::new();
        b.iter(|| black_box(state.actions()));
    });
    group.finish();
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_step");
    group.bench_function("updated_center", |b| {
        let base_state = TicTacToe::new();
        b.iter(|| black_box(base_state.updated(&BoardAction::at(1, 1))));
    });
    group.bench_function("update_in_place", |b| {
        b.iter_batched(
            TicTacToe::new,
            |mut state| {
                state.update(&BoardAction::at(1, 1));
                state
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_random_game(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_random_game");
    group.bench_function("play_out", |b| {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        b.iter(|| {
            let mut state = TicTacToe::new();
            while !state.finished() {
                let actions = state.actions();
                if let Some(action) = actions.choose(&mut rng) {
                    state.update(action);
                }
            }
            black_box(state.winner())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_actions, bench_step, bench_random_game);
criterion_main!(benches);
