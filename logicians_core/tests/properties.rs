use logicians_core::{
    simulate, world_count, Position, Round, Simulation, SolverConfig, WorldIndexer, WorldTable,
};
use proptest::prelude::*;
use std::collections::HashSet;

/// (num_logicians, num_positions, arrangement) with up to 5 positions.
fn arrangement() -> impl Strategy<Value = (usize, usize, Vec<Position>)> {
    (1usize..=5)
        .prop_flat_map(|positions| (1usize..=positions, Just(positions)))
        .prop_flat_map(|(logicians, positions)| {
            let line: Vec<Position> = (0..positions as Position).collect();
            (Just(logicians), Just(positions), Just(line).prop_shuffle())
        })
        .prop_map(|(logicians, positions, mut line)| {
            line.truncate(logicians);
            (logicians, positions, line)
        })
}

/// An arrangement plus a relabelling of its logicians.
fn relabelled() -> impl Strategy<Value = (usize, usize, Vec<Position>, Vec<usize>)> {
    arrangement().prop_flat_map(|(logicians, positions, world)| {
        let labels: Vec<usize> = (0..logicians).collect();
        (
            Just(logicians),
            Just(positions),
            Just(world),
            Just(labels).prop_shuffle(),
        )
    })
}

#[test]
fn test_world_count_matches_table_size() {
    for positions in 1..=6 {
        for logicians in 1..=positions {
            let indexer = WorldIndexer::new(logicians, positions).unwrap();
            let table = WorldTable::new(indexer);
            let falling: usize = (positions - logicians + 1..=positions).product();
            assert_eq!(table.len(), falling);
            assert_eq!(world_count(logicians, positions), Some(falling));
        }
    }
}

#[test]
fn test_index_injective_and_dense() {
    for positions in 1..=6 {
        for logicians in 1..=positions {
            let indexer = WorldIndexer::new(logicians, positions).unwrap();
            let table = WorldTable::new(indexer.clone());
            let indices: HashSet<usize> = (0..table.len())
                .map(|i| indexer.index(table.world(i)))
                .collect();
            assert_eq!(indices, (0..indexer.len()).collect());
        }
    }
}

#[test]
fn test_every_small_arrangement_terminates() {
    for positions in 1..=6usize {
        for logicians in 1..=positions.min(3) {
            let worlds = world_count(logicians, positions).unwrap();
            let indexer = WorldIndexer::new(logicians, positions).unwrap();
            let table = WorldTable::new(indexer);
            for index in 0..table.len() {
                let world = table.world(index);
                let outcome = Simulation::new(SolverConfig::default(), logicians, positions, world)
                    .unwrap()
                    .run()
                    .unwrap();
                assert!(outcome.rounds_performed() <= worlds + 1);
                assert!(outcome.live_worlds() >= 1, "real world {:?} was ruled out", world);
            }
        }
    }
}

#[test]
fn test_far_apart_pair_reaches_finite_round() {
    let first_yes = simulate(2, 3, &[0, 2]).unwrap();
    assert!(first_yes.iter().all(Option::is_some));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_elimination_is_monotone((logicians, positions, world) in arrangement()) {
        let mut sim =
            Simulation::new(SolverConfig::default(), logicians, positions, &world).unwrap();
        let mut previous: Vec<Option<Round>> =
            (0..sim.table().len()).map(|i| sim.table().status(i)).collect();
        let mut live = sim.table().live_count();

        while !sim.is_settled() {
            let report = sim.step().unwrap().clone();
            prop_assert!(report.live_worlds <= live);
            live = report.live_worlds;

            for (index, before) in previous.iter_mut().enumerate() {
                let now = sim.table().status(index);
                if before.is_some() {
                    prop_assert_eq!(now, *before);
                } else if let Some(round) = now {
                    prop_assert_eq!(round, report.round);
                }
                *before = now;
            }
        }
    }

    #[test]
    fn prop_real_world_survives((logicians, positions, world) in arrangement()) {
        let mut sim =
            Simulation::new(SolverConfig::default(), logicians, positions, &world).unwrap();
        while !sim.is_settled() {
            sim.step().unwrap();
        }
        prop_assert_eq!(sim.table().get(&world), None);
    }

    #[test]
    fn prop_relabelling_permutes_result(
        (logicians, positions, world, labels) in relabelled()
    ) {
        let first_yes = simulate(logicians, positions, &world).unwrap();

        let relabelled_world: Vec<Position> = labels.iter().map(|&l| world[l]).collect();
        let relabelled_yes = simulate(logicians, positions, &relabelled_world).unwrap();

        for (new_label, &old_label) in labels.iter().enumerate() {
            prop_assert_eq!(relabelled_yes[new_label], first_yes[old_label]);
        }
    }

    #[test]
    fn prop_mirror_image_gives_same_rounds((logicians, positions, world) in arrangement()) {
        let mirrored: Vec<Position> = world
            .iter()
            .map(|&p| (positions - 1) as Position - p)
            .collect();

        prop_assert_eq!(
            simulate(logicians, positions, &world).unwrap(),
            simulate(logicians, positions, &mirrored).unwrap()
        );
    }

    #[test]
    fn prop_lone_logician_round_zero(positions in 1usize..=12, seed in any::<usize>()) {
        let position = (seed % positions) as Position;
        prop_assert_eq!(simulate(1, positions, &[position]).unwrap(), vec![Some(0)]);
    }
}
