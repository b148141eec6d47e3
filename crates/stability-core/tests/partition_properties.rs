use stability_core::domain::ParameterRecord;
use stability_core::sweep::{
    JobSlice, MultivariateSlice, ParameterAxes, ParameterGrid, SingleAxisSlice,
};

fn compact_axes() -> ParameterAxes {
    ParameterAxes::new(
        vec![1.0, 2.0, 3.0],
        vec![0.25, 0.5],
        vec![0.9, 1.0, 1.1],
        vec![0.95, 1.05],
    )
    .expect("compact axes should validate")
}

#[test]
fn multivariate_blocks_cover_the_grid_exactly_once() {
    for axes in [compact_axes(), ParameterAxes::reference()] {
        let grid = ParameterGrid::cartesian(&axes);
        let mut owners = vec![0_usize; grid.len()];

        for job_index in 0..axes.pair_count() {
            let slice = MultivariateSlice::new(&axes, job_index).expect("job should build");
            for index in slice.block_bounds() {
                owners[index] += 1;
            }
        }

        assert!(
            owners.iter().all(|&count| count == 1),
            "every grid entry should be owned by exactly one job"
        );
    }
}

#[test]
fn reference_partition_matches_the_production_shape() {
    let axes = ParameterAxes::reference();
    assert_eq!(axes.pair_count(), 18);
    assert_eq!(axes.block_size(), 441);
    assert_eq!(axes.grid_len(), 7938);

    let last = MultivariateSlice::new(&axes, 17).expect("last job should build");
    assert_eq!(last.block_bounds(), 7497..7938);
    assert_eq!(last.planned_steps(), 882);
}

#[test]
fn doubled_plan_overruns_only_at_the_grid_end() {
    let axes = ParameterAxes::reference();
    let grid = ParameterGrid::cartesian(&axes);

    // Every job except the last can walk its full doubled plan, reading
    // its own block and its right-hand neighbor's.
    let next_to_last = MultivariateSlice::new(&axes, 16).expect("job 16 should build");
    for step in 0..next_to_last.planned_steps() {
        let record = next_to_last
            .record(step)
            .expect("job 16 should resolve its whole plan");
        assert_eq!(Some(&record), grid.record(16 * 441 + step));
    }

    // The last job exhausts the grid after its own block.
    let last = MultivariateSlice::new(&axes, 17).expect("job 17 should build");
    last.record(440)
        .expect("final owned record should resolve");
    let error = last
        .record(441)
        .expect_err("step past the grid should fail");
    assert_eq!(error.placeholder(), "INPUT.GRID_RANGE");
    assert_eq!(error.exit_code(), 2);
}

#[test]
fn strategies_agree_on_the_pair_enumeration() {
    let axes = compact_axes();
    let grid = ParameterGrid::cartesian(&axes);

    for job_index in 0..axes.pair_count() {
        let single = SingleAxisSlice::new(&axes, job_index).expect("single job should build");
        let multi = MultivariateSlice::new(&axes, job_index).expect("multi job should build");
        let block_first = grid
            .record(multi.block_bounds().start)
            .expect("block start should exist");

        assert_eq!(
            (single.ed_point(), single.sigma()),
            (block_first.ed_point, block_first.sigma),
            "job {} should address the same pair in both strategies",
            job_index
        );
    }
}

#[test]
fn rebuilt_slices_yield_bit_identical_records() {
    // The cross-process contract: rebuilding axes and slices from
    // scratch yields identical record sequences.
    let first = collect_records(&SingleAxisSlice::new(&ParameterAxes::reference(), 7)
        .expect("job 7 should build"));
    let second = collect_records(&SingleAxisSlice::new(&ParameterAxes::reference(), 7)
        .expect("job 7 should build"));
    assert_eq!(first, second);

    let multi_first = collect_block_records(
        &MultivariateSlice::new(&ParameterAxes::reference(), 3).expect("job 3 should build"),
    );
    let multi_second = collect_block_records(
        &MultivariateSlice::new(&ParameterAxes::reference(), 3).expect("job 3 should build"),
    );
    assert_eq!(multi_first, multi_second);
}

fn collect_records(slice: &SingleAxisSlice) -> Vec<ParameterRecord> {
    (0..slice.planned_steps())
        .map(|step| slice.record(step).expect("record should resolve"))
        .collect()
}

fn collect_block_records(slice: &MultivariateSlice) -> Vec<ParameterRecord> {
    slice
        .block_bounds()
        .map(|index| {
            slice
                .record(index - slice.block_bounds().start)
                .expect("record should resolve")
        })
        .collect()
}
