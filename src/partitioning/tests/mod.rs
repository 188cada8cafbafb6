use super::*;
use crate::mesh_generation::StructuredGrid;

static_assertions::assert_impl_all!(PartitionAssignment: Send, Sync, Clone);
static_assertions::assert_impl_all!(PartitionerConfig: Send, Sync, Default);

#[test]
fn four_by_four_into_quadrants() {
    let g = StructuredGrid::cartesian_2d(4, 4).unwrap();
    let cfg = PartitionerConfig {
        split: [2, 2, 1],
        ensure_connectivity: false,
        ..Default::default()
    };
    let pm = partition(&g, &cfg).expect("partition must succeed");
    assert_eq!(pm.num_parts, 4);
    assert_eq!(
        pm.cell_part,
        vec![
            0, 0, 1, 1, //
            0, 0, 1, 1, //
            2, 2, 3, 3, //
            2, 2, 3, 3,
        ]
    );
    assert_eq!(part_sizes(&pm), vec![4, 4, 4, 4]);
}

#[test]
fn uneven_split_along_i() {
    let g = StructuredGrid::cartesian_3d(7, 1, 1).unwrap();
    let pm = partition(&g, &PartitionerConfig::with_split([3, 1, 1])).unwrap();
    assert_eq!(pm.cell_part, vec![0, 0, 0, 1, 1, 2, 2]);
}

#[test]
fn split_larger_than_extent_is_rejected() {
    let g = StructuredGrid::cartesian_3d(4, 2, 1).unwrap();
    let err = partition(&g, &PartitionerConfig::with_split([2, 3, 1])).unwrap_err();
    assert_eq!(
        err,
        PartitionError::InvalidConfiguration {
            axis: 1,
            split: 3,
            extent: 2
        }
    );
    assert_eq!(err.to_string(), "In direction 1 requested splitting 3 size 2");
}

#[test]
fn zero_split_is_rejected() {
    let g = StructuredGrid::cartesian_3d(4, 2, 1).unwrap();
    let err = partition(&g, &PartitionerConfig::with_split([2, 1, 0])).unwrap_err();
    assert_eq!(err, PartitionError::ZeroSplit { axis: 2 });
}

#[test]
fn empty_buckets_are_compacted() {
    // 4x1 box without its second cell: bucket 1 stays empty
    let g = StructuredGrid::with_active_mask([4, 1, 1], &[true, false, true, true]).unwrap();
    let pm = partition(&g, &PartitionerConfig::with_split([4, 1, 1])).unwrap();
    assert_eq!(pm.num_parts, 3);
    assert_eq!(pm.cell_part, vec![0, 1, 2]);
}

#[test]
fn grid_without_active_cells_has_no_parts() {
    let g = StructuredGrid::from_predicate([3, 3, 1], |_| false).unwrap();
    let pm = partition(&g, &PartitionerConfig::with_split([3, 3, 1])).unwrap();
    assert_eq!(pm.num_parts, 0);
    assert!(pm.is_empty());
}

/// 3x3 box, middle row of the two left columns removed:
///
/// ```text
/// j=2  A A B
/// j=1  . . B
/// j=0  A A B
/// ```
fn dumbbell() -> StructuredGrid {
    StructuredGrid::from_predicate([3, 3, 1], |[i, j, _]| !(j == 1 && i < 2)).unwrap()
}

#[test]
fn dumbbell_bucket_is_split_in_two() {
    let g = dumbbell();
    let cfg = PartitionerConfig {
        split: [2, 1, 1],
        ensure_connectivity: false,
        ..Default::default()
    };
    let plain = partition(&g, &cfg).unwrap();
    assert_eq!(plain.num_parts, 2);
    assert_eq!(plain.cell_part, vec![0, 0, 1, 1, 0, 0, 1]);

    for flood_fill in [FloodFill::Recursive, FloodFill::ExplicitStack] {
        let cfg = PartitionerConfig {
            split: [2, 1, 1],
            ensure_connectivity: true,
            flood_fill,
        };
        let pm = partition(&g, &cfg).unwrap();
        assert_eq!(pm.num_parts, plain.num_parts + 1);
        assert_eq!(pm.cell_part, vec![0, 0, 1, 1, 2, 2, 1]);
        assert!(is_connected(&g, &pm));
    }
}

#[test]
fn partition_is_deterministic() {
    let g = dumbbell();
    let cfg = PartitionerConfig::with_split([2, 2, 1]);
    assert_eq!(partition(&g, &cfg).unwrap(), partition(&g, &cfg).unwrap());
}

#[test]
fn cells_of_lists_leaf_order() {
    let g = StructuredGrid::cartesian_2d(4, 1).unwrap();
    let pm = partition(&g, &PartitionerConfig::with_split([2, 1, 1])).unwrap();
    assert_eq!(pm.cells_of(1).collect::<Vec<_>>(), vec![2, 3]);
    assert_eq!(pm.part_of(0), 0);
    assert_eq!(pm.len(), 4);
}

#[test]
fn config_loads_from_json_with_defaults() {
    let cfg: PartitionerConfig = serde_json::from_str(r#"{"split":[4,2,1]}"#).unwrap();
    assert_eq!(cfg.split, [4, 2, 1]);
    assert!(cfg.ensure_connectivity);
    assert_eq!(cfg.flood_fill, FloodFill::ExplicitStack);
    assert_eq!(cfg.num_buckets(), 8);

    let json = serde_json::to_string(&PartitionerConfig {
        flood_fill: FloodFill::Recursive,
        ..PartitionerConfig::with_split([1, 2, 3])
    })
    .unwrap();
    let back: PartitionerConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.flood_fill, FloodFill::Recursive);
    assert_eq!(back.split, [1, 2, 3]);
}
